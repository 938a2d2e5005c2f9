//! # Cd Command Implementation
//!
//! Spawns an interactive shell inside a repository of the local inventory.
//! The process exits with the shell's own exit code once it closes.

use std::env;
use std::path::Path;
use std::process::Command;

use anyhow::Result;
use clap::Args;

use repoherd::error::Error;
use repoherd::model::RepoId;
use repoherd::scanner;

use super::Session;

/// Open a shell inside a local repository
#[derive(Args, Debug)]
pub struct CdArgs {
    /// The repository to open a shell in, as <owner>/<name>
    #[arg(value_name = "REPOSITORY")]
    pub repository: String,
}

/// Execute the `cd` command.
pub fn execute(args: CdArgs, session: &Session) -> Result<()> {
    let id: RepoId = args.repository.parse()?;
    let path = session.settings.root.join(&id.owner).join(&id.name);
    if !path.join(scanner::GIT_DIR).is_dir() {
        return Err(Error::NotFound { id: id.to_string() }.into());
    }

    let status = Command::new(default_shell())
        .current_dir(Path::new(&path))
        .status()?;
    std::process::exit(status.code().unwrap_or(0));
}

#[cfg(not(windows))]
fn default_shell() -> String {
    env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
}

#[cfg(windows)]
fn default_shell() -> String {
    env::var("COMSPEC").unwrap_or_else(|_| "cmd".to_string())
}
