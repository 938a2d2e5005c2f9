//! # Error Handling
//!
//! Centralized error taxonomy for repoherd, built with `thiserror`.
//!
//! The variants map onto the failure classes the rest of the crate reasons
//! about:
//!
//! - `UnsupportedFilter` is a configuration error: a filter dimension was
//!   requested against a data source that cannot express it. It aborts the
//!   whole invocation rather than silently returning a wrong result set.
//! - `NotFound` is terminal for a single repository (absent locally or
//!   remotely where it was expected), never for the batch.
//! - `Http` and `Process` are terminal for the failing step; callers either
//!   degrade to a documented default or abort that repository's flow.
//! - `Io`, `Json` and `Glob` wrap the underlying library errors.

use thiserror::Error;

/// Main error type for repoherd operations
#[derive(Error, Debug)]
pub enum Error {
    /// A filter dimension was requested against a data source that cannot
    /// evaluate it (e.g. `--no-archived` against the local inventory).
    #[error("Unsupported {data_source} filter: \"{option}\"")]
    UnsupportedFilter { option: String, data_source: String },

    /// A repository argument that does not parse as `<owner>/<name>`.
    #[error("Invalid repository identifier \"{input}\": expected <owner>/<name>")]
    InvalidIdentifier { input: String },

    /// A repository was absent (locally or remotely) where it was expected.
    #[error("Repository not found: {id}")]
    NotFound { id: String },

    /// The target directory for a clone exists but is not a repository.
    #[error("Folder already in use: {path}")]
    PathOccupied { path: String },

    /// A transport failure: non-2xx response or network-level error.
    ///
    /// `status` is `None` when the request never produced a response.
    #[error("HTTP error for {url}: {message}")]
    Http {
        url: String,
        status: Option<u16>,
        message: String,
    },

    /// A subprocess exited non-zero or could not be spawned. Carries the
    /// trimmed stderr text.
    #[error("Command failed: {command} - {stderr}")]
    Process { command: String, stderr: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

impl Error {
    /// True when this is an HTTP 404, i.e. the remote side reported the
    /// resource as missing rather than the request failing.
    pub fn is_http_not_found(&self) -> bool {
        matches!(
            self,
            Error::Http {
                status: Some(404),
                ..
            }
        )
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
