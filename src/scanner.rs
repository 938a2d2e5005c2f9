//! # Local Inventory Scanner
//!
//! Builds the inventory of git-controlled repositories under a two-level
//! `root/<owner>/<name>` tree.
//!
//! ## Algorithm
//!
//! First-level entries are owners, second-level entries are repository
//! names. An entry only becomes a `LocalRepository` when it contains a
//! `.git` directory; symbolic links are resolved before the check, since
//! owners and repositories are commonly symlinked into place. Every
//! `(owner, name)` pair is inspected concurrently, and within a single
//! repository the git probes (branch, dirty state, divergence) themselves
//! run concurrently.
//!
//! ## Degraded defaults
//!
//! A failing metadata probe never fails the repository. It degrades to a
//! documented default - branch `"???"`, `ahead`/`behind` `0`, clean tree,
//! empty manifest fields - and the underlying cause is logged at debug
//! level. With `minimal` set, the git probes are skipped entirely and only
//! manifest-derived fields are read.
//!
//! Results are sorted by `"{owner}/{name}"` in natural order so output is
//! stable regardless of filesystem enumeration order.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use rayon::prelude::*;
use regex::Regex;

use crate::error::Result;
use crate::filter::FilterConfig;
use crate::git::GitOperations;
use crate::model::{LocalRepository, LocalStats, Manifest};

/// The version-control marker directory.
pub const GIT_DIR: &str = ".git";

/// The per-repository manifest file.
pub const MANIFEST_FILENAME: &str = "package.json";

/// Branch placeholder when neither a symbolic ref nor a commit hash could be
/// derived.
pub const UNKNOWN_BRANCH: &str = "???";

/// Scan the inventory root and return the matching repositories, sorted by
/// `"{owner}/{name}"` in natural order.
///
/// A missing root yields an empty inventory. Unsupported filter dimensions
/// fail fast before any filesystem access.
pub fn scan(
    root: &Path,
    minimal: bool,
    filter: &FilterConfig,
    git: &dyn GitOperations,
) -> Result<Vec<LocalRepository>> {
    filter.ensure_local_supported()?;

    let mut found: Vec<(String, String, PathBuf)> = Vec::new();

    if root.is_dir() {
        for owner_entry in fs::read_dir(root)? {
            let owner_entry = owner_entry?;
            let owner_path = owner_entry.path();
            // is_dir resolves symlinks before the check
            if !owner_path.is_dir() {
                continue;
            }
            let owner = owner_entry.file_name().to_string_lossy().into_owned();

            for repo_entry in fs::read_dir(&owner_path)? {
                let repo_entry = repo_entry?;
                let repo_path = repo_entry.path();
                if !repo_path.is_dir() {
                    continue;
                }
                if !repo_path.join(GIT_DIR).is_dir() {
                    continue;
                }
                let name = repo_entry.file_name().to_string_lossy().into_owned();
                found.push((owner.clone(), name, repo_path));
            }
        }
    }

    let mut repos: Vec<LocalRepository> = found
        .par_iter()
        .map(|(owner, name, path)| inspect(owner, name, path, minimal, git))
        .collect();

    repos.sort_by(|a, b| natord::compare(&a.full_name(), &b.full_name()));

    filter.apply_local(repos)
}

/// Build one `LocalRepository`, running the git probes concurrently.
fn inspect(
    owner: &str,
    name: &str,
    path: &Path,
    minimal: bool,
    git: &dyn GitOperations,
) -> LocalRepository {
    let manifest = read_manifest(path);

    let (branch, is_dirty, stats) = if minimal {
        (String::new(), false, LocalStats::default())
    } else {
        let ((branch, is_dirty), stats) = rayon::join(
            || {
                rayon::join(
                    || probe_branch(path, git),
                    || probe_dirty(path, git),
                )
            },
            || probe_divergence(path, git),
        );
        (branch, is_dirty, stats)
    };

    LocalRepository {
        owner: owner.to_string(),
        name: name.to_string(),
        path: path.to_path_buf(),
        description: manifest.description.unwrap_or_default(),
        keywords: manifest.keywords.unwrap_or_default(),
        branch,
        is_dirty,
        is_private: manifest.private.unwrap_or(false),
        stats,
    }
}

/// Read the manifest, degrading to an empty one when the file is absent or
/// unparseable.
pub fn read_manifest(path: &Path) -> Manifest {
    let manifest_path = path.join(MANIFEST_FILENAME);
    let Ok(text) = fs::read_to_string(&manifest_path) else {
        return Manifest::default();
    };
    match serde_json::from_str(&text) {
        Ok(manifest) => manifest,
        Err(e) => {
            debug!("ignoring corrupt manifest {}: {}", manifest_path.display(), e);
            Manifest::default()
        }
    }
}

/// Current branch: symbolic ref first, then an abbreviated commit hash
/// prefixed with `#` for a detached HEAD, then `"???"`.
fn probe_branch(path: &Path, git: &dyn GitOperations) -> String {
    if let Ok(branch) = git.git(path, &["symbolic-ref", "--short", "HEAD"]) {
        if !branch.is_empty() {
            return branch;
        }
    }
    match git.git(path, &["rev-parse", "--short", "HEAD"]) {
        Ok(hash) if !hash.is_empty() => format!("#{}", hash),
        Ok(_) => UNKNOWN_BRANCH.to_string(),
        Err(e) => {
            debug!("branch probe failed for {}: {}", path.display(), e);
            UNKNOWN_BRANCH.to_string()
        }
    }
}

fn probe_dirty(path: &Path, git: &dyn GitOperations) -> bool {
    match git.git(path, &["status", "--porcelain", "--untracked-files"]) {
        Ok(status) => !status.is_empty(),
        Err(e) => {
            debug!("dirty probe failed for {}: {}", path.display(), e);
            false
        }
    }
}

/// Commits ahead of / behind the configured upstream. Any failure (no
/// upstream, detached HEAD, unreachable remote) defaults both counters to 0.
fn probe_divergence(path: &Path, git: &dyn GitOperations) -> LocalStats {
    let output = match git.git(
        path,
        &["rev-list", "--left-right", "--count", "HEAD...@{upstream}"],
    ) {
        Ok(output) => output,
        Err(e) => {
            debug!("divergence probe failed for {}: {}", path.display(), e);
            return LocalStats::default();
        }
    };

    let re = Regex::new(r"(\d+)\s+(\d+)").expect("divergence regex is valid");
    match re.captures(&output) {
        Some(captures) => LocalStats {
            ahead: captures[1].parse().unwrap_or(0),
            behind: captures[2].parse().unwrap_or(0),
        },
        None => {
            debug!(
                "unparseable divergence output for {}: {:?}",
                path.display(),
                output
            );
            LocalStats::default()
        }
    }
}
