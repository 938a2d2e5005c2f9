//! # Sh Command Implementation
//!
//! Runs one shell command inside every repository of the (filtered) local
//! inventory. Repositories execute concurrently with settle-all semantics;
//! the report lists failures first, each with the command's captured
//! stderr, then successes with their stdout.

use anyhow::Result;
use clap::Args;

use repoherd::batch::run_batch;
use repoherd::git::GitOperations;
use repoherd::output::print_outcomes;
use repoherd::scanner;

use super::{FilterArgs, Session};

/// Execute a shell command in all known repositories
#[derive(Args, Debug)]
pub struct ShArgs {
    /// The shell command to execute
    #[arg(value_name = "COMMAND")]
    pub command: String,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Execute the `sh` command.
pub fn execute(args: ShArgs, session: &Session) -> Result<()> {
    let repos = scanner::scan(
        &session.settings.root,
        true,
        &args.filter.to_filter(),
        &session.git,
    )?;

    let outcomes = run_batch(
        &repos,
        |repo| repo.full_name(),
        |repo| session.git.shell(&repo.path, &args.command),
    );

    print_outcomes(&outcomes);
    Ok(())
}
