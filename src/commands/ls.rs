//! # Ls Command Implementation
//!
//! Lists repositories from either data source: the local inventory under the
//! configured root, or - with `--user` - the remote catalog of that owner.
//! Both listings go through the same filter options; output is one line per
//! repository, truncated to the terminal width, or raw JSON with `--json`.

use anyhow::Result;
use clap::Args;
use console::style;

use repoherd::model::{LocalRepository, RemoteRepository};
use repoherd::output::{self, truncate_line};
use repoherd::scanner;

use super::{FilterArgs, Session};

/// List all known repositories
#[derive(Args, Debug)]
pub struct LsArgs {
    /// List remote repositories for this user or organization
    #[arg(short, long, value_name = "USERNAME")]
    pub user: Option<String>,

    /// Include only minimal, quick to retrieve, data for each repository
    #[arg(short, long)]
    pub minimal: bool,

    /// Output repositories as JSON
    #[arg(short, long)]
    pub json: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, session: &Session) -> Result<()> {
    let filter = args.filter.to_filter();

    if let Some(user) = &args.user {
        let repos = session.forge.fetch_all(user, &filter)?;
        if args.json {
            println!("{}", serde_json::to_string(&repos)?);
        } else {
            for repo in &repos {
                println!("{}", truncate_line(&remote_line(repo)));
            }
        }
    } else {
        let repos = scanner::scan(&session.settings.root, args.minimal, &filter, &session.git)?;
        if args.json {
            println!("{}", serde_json::to_string(&repos)?);
        } else {
            for repo in &repos {
                println!("{}", truncate_line(&local_line(repo)));
            }
        }
    }

    Ok(())
}

fn remote_line(repo: &RemoteRepository) -> String {
    let mut parts = vec![style(&repo.name).cyan().to_string()];
    if repo.is_fork {
        parts.push(style(output::FORK).magenta().to_string());
    }
    if repo.is_archived {
        parts.push(style(output::ARCHIVED).yellow().to_string());
    }
    if repo.is_private {
        parts.push(style(output::PRIVATE).red().to_string());
    }
    if !repo.description.is_empty() {
        parts.push(style(&repo.description).dim().to_string());
    }
    parts.join(" ")
}

fn local_line(repo: &LocalRepository) -> String {
    let mut parts = vec![style(repo.full_name()).cyan().to_string()];
    if !repo.branch.is_empty() {
        parts.push(style(&repo.branch).magenta().to_string());
    }
    if repo.is_dirty {
        parts.push(style(output::DIRTY).yellow().to_string());
    }
    if repo.stats.ahead > 0 {
        parts.push(
            style(format!("{}{}", repo.stats.ahead, output::AHEAD))
                .yellow()
                .to_string(),
        );
    }
    if repo.stats.behind > 0 {
        parts.push(
            style(format!("{}{}", repo.stats.behind, output::BEHIND))
                .yellow()
                .to_string(),
        );
    }
    if !repo.description.is_empty() {
        parts.push(style(&repo.description).dim().to_string());
    }
    parts.join(" ")
}
