//! # Backup Command Implementation
//!
//! Clones every (filtered) repository of the given users into a dated
//! `repoherd-backup_YYYY-MM-DD` folder under the inventory root, leaving the
//! regular inventory untouched.

use anyhow::Result;
use clap::Args;
use time::macros::format_description;
use time::OffsetDateTime;

use repoherd::output::print_outcomes;
use repoherd::reconcile::Reconciler;

use super::{clone::clone_set, FilterArgs, Session};

/// Backup all repositories of the provided users
#[derive(Args, Debug)]
pub struct BackupArgs {
    /// The users to clone repositories from
    #[arg(value_name = "USERS", required = true, num_args = 1..)]
    pub users: Vec<String>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Execute the `backup` command.
pub fn execute(args: BackupArgs, session: &Session) -> Result<()> {
    let date = OffsetDateTime::now_utc().format(&format_description!("[year]-[month]-[day]"))?;
    let backup_root = session
        .settings
        .root
        .join(format!("repoherd-backup_{}", date));

    let reconciler = Reconciler::new(&backup_root, &session.forge, &session.git);
    let filter = args.filter.to_filter();

    for user in &args.users {
        let repos = session.forge.fetch_all(user, &filter)?;
        let outcomes = clone_set(&reconciler, &repos);
        print_outcomes(&outcomes);
    }

    Ok(())
}
