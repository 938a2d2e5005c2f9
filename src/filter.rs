//! # Filter Predicate
//!
//! A `FilterConfig` narrows a repository set along optional boolean
//! dimensions plus an include glob matched against `"{owner}/{name}"`. The
//! same configuration is applied to both data sources; dimensions the local
//! filesystem cannot express fail fast with a configuration error instead of
//! being silently ignored.
//!
//! The predicate is stateless: it owns no data and evaluates one record at a
//! time. Every populated dimension must agree (logical AND); an absent
//! dimension leaves that axis unconstrained, and an empty config is the
//! identity transform.

use glob::Pattern;

use crate::error::{Error, Result};
use crate::model::{LocalRepository, RemoteRepository};

/// The data source for filtering by the `local` inventory.
const LOCAL_SOURCE: &str = "local";

/// Optional constraints shared by the scanner and the catalog fetcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub archived: Option<bool>,
    pub forks: Option<bool>,
    pub private: Option<bool>,
    pub public: Option<bool>,
    /// Glob matched against `"{owner}/{name}"`.
    pub include: Option<String>,
}

impl FilterConfig {
    /// True when no dimension is populated, i.e. everything matches.
    pub fn is_empty(&self) -> bool {
        self.archived.is_none()
            && self.forks.is_none()
            && self.private.is_none()
            && self.public.is_none()
            && self.include.is_none()
    }

    fn compile_include(&self) -> Result<Option<Pattern>> {
        match &self.include {
            Some(pattern) => Ok(Some(Pattern::new(pattern)?)),
            None => Ok(None),
        }
    }

    /// Fail fast when a boolean dimension is requested that the local
    /// inventory cannot evaluate.
    pub fn ensure_local_supported(&self) -> Result<()> {
        let unsupported = [
            ("archived", self.archived),
            ("forks", self.forks),
            ("private", self.private),
            ("public", self.public),
        ];
        for (option, value) in unsupported {
            if value.is_some() {
                return Err(Error::UnsupportedFilter {
                    option: option.to_string(),
                    data_source: LOCAL_SOURCE.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Evaluate a remote record against this configuration.
    pub fn matches_remote(&self, repo: &RemoteRepository) -> Result<bool> {
        let include = self.compile_include()?;
        Ok(self.matches_remote_compiled(repo, include.as_ref()))
    }

    fn matches_remote_compiled(&self, repo: &RemoteRepository, include: Option<&Pattern>) -> bool {
        if let Some(archived) = self.archived {
            if repo.is_archived != archived {
                return false;
            }
        }
        if let Some(forks) = self.forks {
            if repo.is_fork != forks {
                return false;
            }
        }
        if let Some(private) = self.private {
            if repo.is_private != private {
                return false;
            }
        }
        if let Some(public) = self.public {
            if repo.is_public() != public {
                return false;
            }
        }
        if let Some(pattern) = include {
            if !pattern.matches(&repo.full_name()) {
                return false;
            }
        }
        true
    }

    /// Evaluate a local record against this configuration. Boolean
    /// dimensions are unsupported here and error out.
    pub fn matches_local(&self, repo: &LocalRepository) -> Result<bool> {
        self.ensure_local_supported()?;
        let include = self.compile_include()?;
        Ok(match include {
            Some(pattern) => pattern.matches(&repo.full_name()),
            None => true,
        })
    }

    /// Filter a fetched remote set, compiling the include glob once.
    pub fn apply_remote(&self, repos: Vec<RemoteRepository>) -> Result<Vec<RemoteRepository>> {
        let include = self.compile_include()?;
        Ok(repos
            .into_iter()
            .filter(|repo| self.matches_remote_compiled(repo, include.as_ref()))
            .collect())
    }

    /// Filter a scanned local set. Fails fast on unsupported dimensions
    /// before looking at any record.
    pub fn apply_local(&self, repos: Vec<LocalRepository>) -> Result<Vec<LocalRepository>> {
        self.ensure_local_supported()?;
        let include = self.compile_include()?;
        Ok(repos
            .into_iter()
            .filter(|repo| match &include {
                Some(pattern) => pattern.matches(&repo.full_name()),
                None => true,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LocalStats, RemoteStats};
    use std::path::PathBuf;

    fn remote(owner: &str, name: &str) -> RemoteRepository {
        RemoteRepository {
            id: "0".to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
            description: String::new(),
            keywords: Vec::new(),
            default_branch: "main".to_string(),
            is_archived: false,
            is_disabled: false,
            is_fork: false,
            is_private: false,
            stats: RemoteStats::default(),
        }
    }

    fn local(owner: &str, name: &str) -> LocalRepository {
        LocalRepository {
            owner: owner.to_string(),
            name: name.to_string(),
            path: PathBuf::from(format!("/tmp/{}/{}", owner, name)),
            description: String::new(),
            keywords: Vec::new(),
            branch: "main".to_string(),
            is_dirty: false,
            is_private: false,
            stats: LocalStats::default(),
        }
    }

    #[test]
    fn test_empty_config_matches_everything() {
        let config = FilterConfig::default();
        assert!(config.is_empty());
        assert!(config.matches_remote(&remote("octo", "herd")).unwrap());
        assert!(config.matches_local(&local("octo", "herd")).unwrap());
    }

    #[test]
    fn test_boolean_dimension_must_agree_exactly() {
        let mut fork = remote("octo", "fork");
        fork.is_fork = true;
        let plain = remote("octo", "plain");

        let only_forks = FilterConfig {
            forks: Some(true),
            ..Default::default()
        };
        assert!(only_forks.matches_remote(&fork).unwrap());
        assert!(!only_forks.matches_remote(&plain).unwrap());

        let no_forks = FilterConfig {
            forks: Some(false),
            ..Default::default()
        };
        assert!(!no_forks.matches_remote(&fork).unwrap());
        assert!(no_forks.matches_remote(&plain).unwrap());
    }

    #[test]
    fn test_dimensions_combine_with_logical_and() {
        let mut repo = remote("octo", "herd");
        repo.is_archived = true;
        repo.is_fork = true;

        let config = FilterConfig {
            archived: Some(true),
            forks: Some(false),
            ..Default::default()
        };
        // archived agrees but forks does not; one mismatch rejects
        assert!(!config.matches_remote(&repo).unwrap());
    }

    #[test]
    fn test_private_and_public_are_complementary() {
        let mut secret = remote("octo", "secret");
        secret.is_private = true;
        let open = remote("octo", "open");

        let config = FilterConfig {
            private: Some(true),
            public: Some(true),
            ..Default::default()
        };
        // no repository is both private and public
        assert!(!config.matches_remote(&secret).unwrap());
        assert!(!config.matches_remote(&open).unwrap());
    }

    #[test]
    fn test_include_glob_is_exact_subset() {
        let repos = vec![
            remote("octo", "herd"),
            remote("octo", "other"),
            remote("acme", "herd"),
        ];
        let config = FilterConfig {
            include: Some("octo/*".to_string()),
            ..Default::default()
        };

        let matched = config.apply_remote(repos).unwrap();
        let names: Vec<String> = matched.iter().map(|r| r.full_name()).collect();
        assert_eq!(names, vec!["octo/herd", "octo/other"]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let repos = vec![
            remote("octo", "herd"),
            remote("octo", "other"),
            remote("acme", "herd"),
        ];
        let config = FilterConfig {
            include: Some("*/herd".to_string()),
            ..Default::default()
        };

        let once = config.apply_remote(repos).unwrap();
        let expected: Vec<String> = once.iter().map(|r| r.full_name()).collect();
        let twice = config.apply_remote(once).unwrap();
        let actual: Vec<String> = twice.iter().map(|r| r.full_name()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_invalid_glob_is_a_configuration_error() {
        let config = FilterConfig {
            include: Some("[invalid".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.matches_remote(&remote("octo", "herd")),
            Err(Error::Glob(_))
        ));
    }

    #[test]
    fn test_local_boolean_dimensions_fail_fast() {
        for config in [
            FilterConfig {
                archived: Some(false),
                ..Default::default()
            },
            FilterConfig {
                forks: Some(false),
                ..Default::default()
            },
            FilterConfig {
                private: Some(false),
                ..Default::default()
            },
            FilterConfig {
                public: Some(false),
                ..Default::default()
            },
        ] {
            let err = config.apply_local(Vec::new()).unwrap_err();
            assert!(
                matches!(err, Error::UnsupportedFilter { .. }),
                "expected UnsupportedFilter, got {:?}",
                err
            );
        }
    }

    #[test]
    fn test_local_include_glob() {
        let repos = vec![local("octo", "herd"), local("acme", "herd")];
        let config = FilterConfig {
            include: Some("octo/*".to_string()),
            ..Default::default()
        };
        let matched = config.apply_local(repos).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].full_name(), "octo/herd");
    }
}
