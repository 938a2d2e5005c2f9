//! # Publish Command Implementation
//!
//! Publishes a local-only repository to GitHub, or - with `<owner>/*` -
//! every local repository of that owner matching the filters. A repository
//! that already has a remote counterpart reports `Already published!`
//! without performing any mutating call.

use anyhow::Result;
use clap::Args;

use repoherd::batch::{run_batch, BatchOutcome};
use repoherd::model::RepoId;
use repoherd::output::print_outcomes;
use repoherd::reconcile::PublishOutcome;
use repoherd::scanner;

use super::{FilterArgs, Session};

/// Publish a local repository to GitHub
#[derive(Args, Debug)]
pub struct PublishArgs {
    /// The repository to publish, as <owner>/<name> (or <owner>/* for all)
    #[arg(value_name = "REPOSITORY")]
    pub repository: String,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Execute the `publish` command.
pub fn execute(args: PublishArgs, session: &Session) -> Result<()> {
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
                    .publish(&repo.owner, &repo.name)
                    .map(describe)
            },
        )
    } else {
        vec![BatchOutcome {
            id: id.to_string(),
            result: reconciler
                .publish(&id.owner, &id.name)
                .map(describe)
                .map_err(|e| e.to_string()),
        }]
    };

    print_outcomes(&outcomes);
    Ok(())
}

fn describe(outcome: PublishOutcome) -> String {
    match outcome {
        PublishOutcome::Published => "Published!".to_string(),
        PublishOutcome::AlreadyPublished => "Published already!".to_string(),
    }
}
