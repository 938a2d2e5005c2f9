//! Environment and default resolution for repoherd.
//!
//! Two knobs exist: the GitHub token and the inventory root. Both can come
//! from CLI flags (which carry their own `REPOHERD_*` environment fallbacks
//! via clap) and this module fills in the remaining defaults: the generic
//! `GITHUB_TOKEN` variable and the conventional clone folders under the home
//! directory.

use std::env;
use std::path::PathBuf;

/// Folder names probed under the home directory, in order, when no root is
/// configured.
const ROOT_CANDIDATES: &[&str] = &["GitHub", "github", "Code", "code", "Projects", "projects"];

/// Resolved invocation settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// The folder that holds `<owner>/<name>` clones.
    pub root: PathBuf,
    pub github_token: Option<String>,
}

impl Settings {
    /// Resolve settings from CLI-provided values, filling in environment and
    /// filesystem defaults.
    pub fn resolve(root: Option<PathBuf>, github_token: Option<String>) -> Self {
        Self {
            root: root.unwrap_or_else(default_root),
            github_token: github_token.or_else(|| env::var("GITHUB_TOKEN").ok()),
        }
    }
}

/// Returns the default inventory root.
///
/// Probes the conventional clone folders under the home directory and falls
/// back to `~/Code` when none exists. Can be overridden by the `--root` flag
/// or the `REPOHERD_ROOT` environment variable.
pub fn default_root() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

    for candidate in ROOT_CANDIDATES {
        let path = home.join(candidate);
        if path.is_dir() {
            return path;
        }
    }

    home.join("Code")
}
