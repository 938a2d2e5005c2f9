//! # Repository Records
//!
//! Value records for the two data sources and the small identity types shared
//! across the crate. `RemoteRepository` is built fresh from each API response
//! and `LocalRepository` is rebuilt on every scan; neither is ever persisted.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An `<owner>/<name>` pair as given on the command line.
///
/// `name` may be the literal `*`, which commands interpret as "every matching
/// repository of that owner".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// True when the name component is the `*` wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.name == "*"
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(owner, name))
            }
            _ => Err(Error::InvalidIdentifier {
                input: s.to_string(),
            }),
        }
    }
}

/// Statistics block of a remote repository.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RemoteStats {
    pub forks: u64,
    pub issues: u64,
    pub stargazers: u64,
    /// RFC 3339 timestamps straight from the API.
    pub created: String,
    pub pushed: String,
    pub updated: String,
}

/// A repository as reported by the forge catalog.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteRepository {
    /// Opaque forge-assigned identifier.
    pub id: String,
    pub owner: String,
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub default_branch: String,
    pub is_archived: bool,
    pub is_disabled: bool,
    pub is_fork: bool,
    pub is_private: bool,
    pub stats: RemoteStats,
}

impl RemoteRepository {
    /// Derived, never stored independently.
    pub fn is_public(&self) -> bool {
        !self.is_private
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Parse one element of a repository listing response.
    pub fn from_api(value: &serde_json::Value) -> Result<Self> {
        let raw: ApiRepository = serde_json::from_value(value.clone())?;
        Ok(Self {
            id: raw.id.to_string(),
            owner: raw.owner.login,
            name: raw.name,
            description: raw.description.unwrap_or_default(),
            keywords: raw.topics.unwrap_or_default(),
            default_branch: raw.default_branch.unwrap_or_default(),
            is_archived: raw.archived,
            is_disabled: raw.disabled,
            is_fork: raw.fork,
            is_private: raw.private,
            stats: RemoteStats {
                forks: raw.forks_count,
                issues: raw.open_issues_count,
                stargazers: raw.stargazers_count,
                created: raw.created_at.unwrap_or_default(),
                pushed: raw.pushed_at.unwrap_or_default(),
                updated: raw.updated_at.unwrap_or_default(),
            },
        })
    }
}

/// The wire shape of a repository in GitHub's listing responses. Only the
/// fields the records carry; everything else is ignored.
#[derive(Debug, Deserialize)]
struct ApiRepository {
    id: u64,
    name: String,
    owner: ApiOwner,
    description: Option<String>,
    topics: Option<Vec<String>>,
    default_branch: Option<String>,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    fork: bool,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    open_issues_count: u64,
    #[serde(default)]
    stargazers_count: u64,
    created_at: Option<String>,
    pushed_at: Option<String>,
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiOwner {
    login: String,
}

/// Divergence counters relative to the configured upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LocalStats {
    pub ahead: u64,
    pub behind: u64,
}

/// A repository found under the inventory root.
#[derive(Debug, Clone, Serialize)]
pub struct LocalRepository {
    pub owner: String,
    pub name: String,
    pub path: PathBuf,
    pub description: String,
    pub keywords: Vec<String>,
    pub branch: String,
    pub is_dirty: bool,
    pub is_private: bool,
    pub stats: LocalStats,
}

impl LocalRepository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// The optional per-repository manifest (`package.json`), supplying the
/// metadata the filesystem cannot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub private: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repo_id_display() {
        assert_eq!(RepoId::new("octo", "herd").to_string(), "octo/herd");
    }

    #[test]
    fn test_repo_id_parse() {
        assert_eq!(
            "octo/herd".parse::<RepoId>().unwrap(),
            RepoId::new("octo", "herd")
        );
        assert_eq!("octo/*".parse::<RepoId>().unwrap(), RepoId::new("octo", "*"));
        assert!("octo/*".parse::<RepoId>().unwrap().is_wildcard());
    }

    #[test]
    fn test_repo_id_parse_rejects_malformed() {
        for input in ["herd", "octo/", "/herd", ""] {
            let err = input.parse::<RepoId>().unwrap_err();
            assert!(
                matches!(err, Error::InvalidIdentifier { .. }),
                "expected InvalidIdentifier for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_remote_repository_from_api() {
        let value = json!({
            "id": 42,
            "name": "herd",
            "owner": { "login": "octo" },
            "description": "A tool",
            "topics": ["cli", "git"],
            "default_branch": "main",
            "archived": false,
            "disabled": false,
            "fork": true,
            "private": false,
            "forks_count": 3,
            "open_issues_count": 1,
            "stargazers_count": 7,
            "created_at": "2020-01-01T00:00:00Z",
            "pushed_at": "2024-06-01T00:00:00Z",
            "updated_at": "2024-06-02T00:00:00Z"
        });

        let repo = RemoteRepository::from_api(&value).unwrap();
        assert_eq!(repo.id, "42");
        assert_eq!(repo.full_name(), "octo/herd");
        assert_eq!(repo.keywords, vec!["cli", "git"]);
        assert_eq!(repo.default_branch, "main");
        assert!(repo.is_fork);
        assert!(repo.is_public());
        assert_eq!(repo.stats.stargazers, 7);
        assert_eq!(repo.stats.created, "2020-01-01T00:00:00Z");
    }

    #[test]
    fn test_remote_repository_from_api_null_fields() {
        // description/topics come back null for bare repositories
        let value = json!({
            "id": 1,
            "name": "bare",
            "owner": { "login": "octo" },
            "description": null,
            "private": true
        });

        let repo = RemoteRepository::from_api(&value).unwrap();
        assert_eq!(repo.description, "");
        assert!(repo.keywords.is_empty());
        assert!(repo.is_private);
        assert!(!repo.is_public());
        assert_eq!(repo.stats.forks, 0);
    }

    #[test]
    fn test_manifest_ignores_unknown_fields() {
        let manifest: Manifest = serde_json::from_str(
            r#"{
                "name": "some-package",
                "version": "1.0.0",
                "description": "hello",
                "keywords": ["a", "b"],
                "private": true,
                "dependencies": {"left-pad": "^1.0.0"}
            }"#,
        )
        .unwrap();
        assert_eq!(manifest.description.as_deref(), Some("hello"));
        assert_eq!(manifest.keywords.as_deref(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(manifest.private, Some(true));
    }
}
