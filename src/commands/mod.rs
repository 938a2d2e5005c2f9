//! # CLI Command Implementations
//!
//! One module per subcommand of the `repoherd` command-line tool. Each
//! module defines an `Args` struct (derived with `clap`) and an `execute`
//! function that orchestrates the necessary library calls.
//!
//! The shared pieces live here: the per-invocation `Session` holding the
//! resolved settings and the two capability seams, and the `FilterArgs`
//! group flattened into every repository-set command.

pub mod backup;
pub mod cd;
pub mod clone;
pub mod completions;
pub mod ls;
pub mod publish;
pub mod sh;
pub mod sync;
pub mod whoami;

use anyhow::Result;
use clap::Args;

use repoherd::config::Settings;
use repoherd::filter::FilterConfig;
use repoherd::forge::ForgeClient;
use repoherd::git::DefaultGitOperations;
use repoherd::reconcile::Reconciler;

/// Per-invocation context shared by all commands.
pub struct Session {
    pub settings: Settings,
    pub forge: ForgeClient,
    pub git: DefaultGitOperations,
}

impl Session {
    pub fn new(settings: Settings) -> Result<Self> {
        let forge = ForgeClient::with_token(settings.github_token.clone())?;
        Ok(Self {
            settings,
            forge,
            git: DefaultGitOperations,
        })
    }

    pub fn reconciler(&self) -> Reconciler<'_> {
        Reconciler::new(&self.settings.root, &self.forge, &self.git)
    }
}

/// Filter options shared by the repository-set commands.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Ignore archived repositories
    #[arg(long = "no-archived")]
    pub no_archived: bool,

    /// Ignore forked repositories
    #[arg(long = "no-forks")]
    pub no_forks: bool,

    /// Ignore private repositories
    #[arg(long = "no-private")]
    pub no_private: bool,

    /// Ignore public repositories
    #[arg(long = "no-public")]
    pub no_public: bool,

    /// Include only repositories matching this glob
    #[arg(short, long, value_name = "GLOB")]
    pub include: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> FilterConfig {
        FilterConfig {
            archived: self.no_archived.then_some(false),
            forks: self.no_forks.then_some(false),
            private: self.no_private.then_some(false),
            public: self.no_public.then_some(false),
            include: self.include.clone(),
        }
    }
}
