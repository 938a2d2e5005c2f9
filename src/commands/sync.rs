//! # Sync Command Implementation
//!
//! Synchronizes a repository with its remote counterpart - fetch all remote
//! refs, then push the manifest's keywords and description to GitHub where
//! they differ - or, with `<owner>/*`, every local repository of that owner
//! matching the filters. The success line names exactly which sub-updates
//! ran.

use anyhow::Result;
use clap::Args;

use repoherd::batch::{run_batch, BatchOutcome};
use repoherd::model::RepoId;
use repoherd::output::print_outcomes;
use repoherd::scanner;

use super::{FilterArgs, Session};

/// Synchronize repositories with GitHub
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// The repository to sync, as <owner>/<name> (or <owner>/* for all)
    #[arg(value_name = "REPOSITORY")]
    pub repository: String,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs, session: &Session) -> Result<()> {
    let id: RepoId = args.repository.parse()?;
    let reconciler = session.reconciler();

    let outcomes = if id.is_wildcard() {
        let mut repos = scanner::scan(
            &session.settings.root,
            true,
            &args.filter.to_filter(),
            &session.git,
        )?;
        repos.retain(|repo| repo.owner == id.owner);
        run_batch(
            &repos,
            |repo| repo.full_name(),
            |repo| {
                reconciler
                    .sync(&repo.owner, &repo.name)
                    .map(|report| report.describe())
            },
        )
    } else {
        vec![BatchOutcome {
            id: id.to_string(),
            result: reconciler
                .sync(&id.owner, &id.name)
                .map(|report| report.describe())
                .map_err(|e| e.to_string()),
        }]
    };

    print_outcomes(&outcomes);
    Ok(())
}
