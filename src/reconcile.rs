//! # Reconciliation Flows
//!
//! Per-repository convergence between the local clone and its remote
//! counterpart: `clone` (remote-only to local), `publish` (local-only to
//! remote) and `sync` (refs plus two metadata fields, remote-ward).
//!
//! Every flow is idempotent from the caller's point of view: re-running it
//! against already-converged state performs no mutating calls. None of the
//! flows retries or rolls back - a failing step aborts the remaining steps
//! for that repository and the failure is reported once with the captured
//! diagnostic text. In particular, `publish` can leave a remote repository
//! created but unpushed; a follow-up `sync` or manual cleanup converges it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::forge::ForgeClient;
use crate::git::GitOperations;
use crate::scanner;

/// Result of a clone attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum CloneOutcome {
    Cloned(PathBuf),
    /// The target already holds a repository; nothing was done.
    AlreadyCloned,
}

/// Result of a publish attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    /// A remote counterpart already exists; nothing was mutated.
    AlreadyPublished,
}

/// Which sub-updates a successful sync performed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: bool,
    pub keywords_updated: bool,
    pub description_updated: bool,
}

impl SyncReport {
    pub fn describe(&self) -> String {
        match (self.keywords_updated, self.description_updated) {
            (false, false) => "Fetched".to_string(),
            (true, false) => "Fetched, updated keywords".to_string(),
            (false, true) => "Fetched, updated description".to_string(),
            (true, true) => "Fetched, updated keywords and description".to_string(),
        }
    }
}

/// Reconciles single repositories against the forge. Holds the inventory
/// root and the two capability seams; owns no repository state itself.
pub struct Reconciler<'a> {
    root: &'a Path,
    forge: &'a ForgeClient,
    git: &'a dyn GitOperations,
}

impl<'a> Reconciler<'a> {
    pub fn new(root: &'a Path, forge: &'a ForgeClient, git: &'a dyn GitOperations) -> Self {
        Self { root, forge, git }
    }

    fn repo_path(&self, owner: &str, name: &str) -> PathBuf {
        self.root.join(owner).join(name)
    }

    /// Require a local clone to exist before reconciling it.
    fn require_local(&self, owner: &str, name: &str) -> Result<PathBuf> {
        let path = self.repo_path(owner, name);
        if !path.join(scanner::GIT_DIR).is_dir() {
            return Err(Error::NotFound {
                id: format!("{}/{}", owner, name),
            });
        }
        Ok(path)
    }

    /// Clone `owner/name` into the inventory. Already-cloned targets are a
    /// no-op success; a foreign directory at the target path is an error.
    pub fn clone_repository(&self, owner: &str, name: &str) -> Result<CloneOutcome> {
        let path = self.repo_path(owner, name);
        if path.join(scanner::GIT_DIR).is_dir() {
            return Ok(CloneOutcome::AlreadyCloned);
        }
        if path.exists() {
            return Err(Error::PathOccupied {
                path: path.display().to_string(),
            });
        }

        fs::create_dir_all(&path)?;
        self.git
            .git(&path, &["clone", &ForgeClient::clone_url(owner, name), "."])?;
        Ok(CloneOutcome::Cloned(path))
    }

    /// Publish a local-only repository to the forge.
    ///
    /// Steps: ensure at least one commit exists (staging everything for an
    /// initial commit when the history is empty), create the remote
    /// repository with the manifest's visibility, add it as the push target
    /// and push all branches and tags.
    pub fn publish(&self, owner: &str, name: &str) -> Result<PublishOutcome> {
        let path = self.require_local(owner, name)?;

        if self.forge.repository_exists(owner, name)? {
            return Ok(PublishOutcome::AlreadyPublished);
        }

        if self.git.git(&path, &["rev-parse", "HEAD"]).is_err() {
            self.git.git(&path, &["add", "--all"])?;
            self.git
                .git(&path, &["commit", "--message", "Initial commit"])?;
        }

        let manifest = scanner::read_manifest(&path);
        self.forge.create_repository(
            name,
            manifest.description.as_deref(),
            manifest.private.unwrap_or(false),
        )?;

        let url = ForgeClient::clone_url(owner, name);
        self.git.git(&path, &["remote", "add", "origin", &url])?;
        self.git.git(&path, &["push", "--all", "origin"])?;
        self.git.git(&path, &["push", "--tags", "origin"])?;

        Ok(PublishOutcome::Published)
    }

    /// Synchronize a repository with its remote counterpart: fetch all
    /// remote refs, then push the manifest's keywords and description to the
    /// forge where they differ.
    ///
    /// A missing remote counterpart is `Error::NotFound`, distinct from a
    /// failed fetch (`Error::Process`). Empty local keywords or an empty
    /// local description never overwrite remote values. The two updates are
    /// independent - a keywords failure does not prevent the description
    /// attempt - but any failure makes the whole flow fail with the first
    /// error.
    pub fn sync(&self, owner: &str, name: &str) -> Result<SyncReport> {
        let path = self.require_local(owner, name)?;

        let remote = match self.forge.get_repository(owner, name) {
            Ok(remote) => remote,
            Err(e) if e.is_http_not_found() => {
                return Err(Error::NotFound {
                    id: format!("{}/{}", owner, name),
                })
            }
            Err(e) => return Err(e),
        };

        self.git.git(&path, &["fetch", "--all"])?;
        let mut report = SyncReport {
            fetched: true,
            ..Default::default()
        };
        let mut first_error: Option<Error> = None;

        let manifest = scanner::read_manifest(&path);

        let keywords = manifest.keywords.unwrap_or_default();
        if !keywords.is_empty() && sorted(&keywords) != sorted(&remote.keywords) {
            match self.forge.set_topics(owner, name, &keywords) {
                Ok(()) => report.keywords_updated = true,
                Err(e) => first_error = Some(e),
            }
        }

        let description = manifest.description.unwrap_or_default();
        if !description.is_empty() && description != remote.description {
            match self.forge.set_description(owner, name, &description) {
                Ok(()) => report.description_updated = true,
                Err(e) => first_error = first_error.or(Some(e)),
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }
}

fn sorted(keywords: &[String]) -> Vec<String> {
    let mut sorted = keywords.to_vec();
    sorted.sort();
    sorted
}
