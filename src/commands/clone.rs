//! # Clone Command Implementation
//!
//! Clones one remote repository into `<root>/<owner>/<name>`, or - with the
//! `<owner>/*` form - every repository of that owner matching the filters.
//! Cloning is idempotent: an already-cloned repository reports success
//! without touching anything, and a foreign folder at the target path is a
//! per-repository failure.

use anyhow::Result;
use clap::Args;

use repoherd::batch::{run_batch, BatchOutcome};
use repoherd::model::{RemoteRepository, RepoId};
use repoherd::output::print_outcomes;
use repoherd::reconcile::{CloneOutcome, Reconciler};

use super::{FilterArgs, Session};

/// Clone a remote repository
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// The repository to clone, as <owner>/<name> (or <owner>/* for all)
    #[arg(value_name = "REPOSITORY")]
    pub repository: String,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Execute the `clone` command.
pub fn execute(args: CloneArgs, session: &Session) -> Result<()> {
    let id: RepoId = args.repository.parse()?;
    let reconciler = session.reconciler();

    let outcomes = if id.is_wildcard() {
        let repos = session.forge.fetch_all(&id.owner, &args.filter.to_filter())?;
        clone_set(&reconciler, &repos)
    } else {
        vec![BatchOutcome {
            id: id.to_string(),
            result: reconciler
                .clone_repository(&id.owner, &id.name)
                .map(describe)
                .map_err(|e| e.to_string()),
        }]
    };

    print_outcomes(&outcomes);
    Ok(())
}

/// Fan a clone out over a fetched repository set.
pub fn clone_set(reconciler: &Reconciler<'_>, repos: &[RemoteRepository]) -> Vec<BatchOutcome> {
    run_batch(
        repos,
        |repo| repo.full_name(),
        |repo| {
            reconciler
                .clone_repository(&repo.owner, &repo.name)
                .map(describe)
        },
    )
}

fn describe(outcome: CloneOutcome) -> String {
    match outcome {
        CloneOutcome::Cloned(path) => path.display().to_string(),
        CloneOutcome::AlreadyCloned => "Cloned already!".to_string(),
    }
}
