//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use repoherd::config::Settings;
use repoherd::output::OutputConfig;

use crate::commands;
use crate::commands::Session;

/// Repoherd - Inventory, clone, publish and synchronize your repositories
#[derive(Parser, Debug)]
#[command(name = "repoherd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// GitHub personal access token
    #[arg(
        long,
        global = true,
        value_name = "TOKEN",
        env = "REPOHERD_GITHUB_TOKEN",
        hide_env_values = true
    )]
    github_token: Option<String>,

    /// The folder path where repositories are cloned
    #[arg(long, global = true, value_name = "PATH", env = "REPOHERD_ROOT")]
    root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Backup all repositories of the provided users
    Backup(commands::backup::BackupArgs),
    /// Open a shell inside a local repository
    Cd(commands::cd::CdArgs),
    /// Clone a remote repository, or all matching ones with `<owner>/*`
    Clone(commands::clone::CloneArgs),
    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
    /// List all known repositories
    Ls(commands::ls::LsArgs),
    /// Publish a local repository to GitHub
    Publish(commands::publish::PublishArgs),
    /// Execute a shell command in all known repositories
    Sh(commands::sh::ShArgs),
    /// Synchronize repositories with GitHub (fetch, description, keywords)
    Sync(commands::sync::SyncArgs),
    /// Output the user associated with the provided GitHub token, if any
    Whoami,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.log_level),
        )
        .init();
        OutputConfig::from_env_and_flag(&self.color).apply();

        let session = Session::new(Settings::resolve(self.root, self.github_token))?;

        match self.command {
            Commands::Backup(args) => commands::backup::execute(args, &session),
            Commands::Cd(args) => commands::cd::execute(args, &session),
            Commands::Clone(args) => commands::clone::execute(args, &session),
            Commands::Completions(args) => commands::completions::execute(args),
            Commands::Ls(args) => commands::ls::execute(args, &session),
            Commands::Publish(args) => commands::publish::execute(args, &session),
            Commands::Sh(args) => commands::sh::execute(args, &session),
            Commands::Sync(args) => commands::sync::execute(args, &session),
            Commands::Whoami => commands::whoami::execute(&session),
        }
    }
}
