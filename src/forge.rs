//! # Remote Catalog Client
//!
//! Talks to the GitHub REST API: the paginated repository listing, the
//! single-repository lookups used by the reconciliation flows, and the
//! metadata mutations (topics, description).
//!
//! The transport is the `HttpOperations` trait - an opaque
//! `request(method, path, body) -> JSON` capability. The default
//! implementation wraps a blocking `reqwest` client; tests substitute mocks.
//!
//! Listing pages are fetched strictly sequentially and accumulation stops at
//! the first page shorter than the page size - the standard end-of-pagination
//! signal - never relying on a total-count field. Filtering happens once over
//! the accumulated set, so truncation detection stays independent of the
//! filter.

use std::sync::OnceLock;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::filter::FilterConfig;
use crate::model::RemoteRepository;

/// Base URL of the GitHub REST API.
pub const API_ROOT: &str = "https://api.github.com";

/// Fixed page size for repository listings.
pub const REPOS_PER_PAGE: usize = 100;

/// Opaque JSON transport. `path` is relative to the API root.
pub trait HttpOperations: Send + Sync {
    fn request(&self, method: &str, path: &str, body: Option<&Value>) -> Result<Value>;
}

/// The default transport, backed by a blocking `reqwest` client.
pub struct DefaultHttpOperations {
    client: Client,
    token: Option<String>,
}

impl DefaultHttpOperations {
    pub fn new(token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Http {
                url: API_ROOT.to_string(),
                status: None,
                message: e.to_string(),
            })?;
        Ok(Self { client, token })
    }
}

impl HttpOperations for DefaultHttpOperations {
    fn request(&self, method: &str, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = format!("{}{}", API_ROOT, path);
        let mut request = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "PUT" => self.client.put(&url),
            "PATCH" => self.client.patch(&url),
            "DELETE" => self.client.delete(&url),
            other => {
                return Err(Error::Http {
                    url,
                    status: None,
                    message: format!("unsupported method: {}", other),
                })
            }
        };

        request = request
            .header(
                header::USER_AGENT,
                concat!("repoherd/v", env!("CARGO_PKG_VERSION")),
            )
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().map_err(|e| Error::Http {
            url: url.clone(),
            status: None,
            message: e.to_string(),
        })?;
        let status = response.status();
        let text = response.text().map_err(|e| Error::Http {
            url: url.clone(),
            status: Some(status.as_u16()),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(Error::Http {
                url,
                status: Some(status.as_u16()),
                message: format!("status {}: {}", status.as_u16(), text.trim()),
            });
        }
        if text.trim().is_empty() {
            // 204-style responses (topic updates) have no body
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Client for one forge, owning the transport and the memoized
/// authenticated-identity lookup.
///
/// The identity is invariant for the process lifetime, so it is resolved at
/// most once per client and cached in a `OnceLock` field: callers pass the
/// client around explicitly instead of consulting a global. A failed lookup
/// memoizes "unknown" and is only logged at debug level.
pub struct ForgeClient {
    http: Box<dyn HttpOperations>,
    identity: OnceLock<Option<String>>,
}

impl ForgeClient {
    pub fn new(http: Box<dyn HttpOperations>) -> Self {
        Self {
            http,
            identity: OnceLock::new(),
        }
    }

    /// Build a client over the default transport.
    pub fn with_token(token: Option<String>) -> Result<Self> {
        Ok(Self::new(Box::new(DefaultHttpOperations::new(token)?)))
    }

    /// The login of the authenticated identity, if any.
    pub fn viewer(&self) -> Option<&str> {
        self.identity
            .get_or_init(|| match self.http.request("GET", "/user", None) {
                Ok(value) => value
                    .get("login")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                Err(e) => {
                    debug!("identity lookup failed: {}", e);
                    None
                }
            })
            .as_deref()
    }

    /// The git endpoint a repository is cloned from and pushed to.
    pub fn clone_url(owner: &str, name: &str) -> String {
        format!("https://github.com/{}/{}.git", owner, name)
    }

    /// Fetch every repository of `owner` matching `filter`.
    pub fn fetch_all(&self, owner: &str, filter: &FilterConfig) -> Result<Vec<RemoteRepository>> {
        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let records = self.fetch_page(owner, page)?;
            let count = records.len();
            all.extend(records);
            if count < REPOS_PER_PAGE {
                break;
            }
            page += 1;
        }
        filter.apply_remote(all)
    }

    fn fetch_page(&self, owner: &str, page: usize) -> Result<Vec<RemoteRepository>> {
        let value = self.http.request("GET", &self.list_path(owner, page), None)?;
        let records: Vec<Value> = serde_json::from_value(value)?;
        records.iter().map(RemoteRepository::from_api).collect()
    }

    /// Self-listings go through `/user/repos` so private repositories
    /// visible only to the token holder are included.
    fn list_path(&self, owner: &str, page: usize) -> String {
        let query = format!(
            "page={}&per_page={}&sort=full_name&direction=asc&type=owner",
            page, REPOS_PER_PAGE
        );
        if self.viewer() == Some(owner) {
            format!("/user/repos?{}", query)
        } else {
            format!("/users/{}/repos?{}", owner, query)
        }
    }

    /// Fetch a single repository record.
    pub fn get_repository(&self, owner: &str, name: &str) -> Result<RemoteRepository> {
        let value = self
            .http
            .request("GET", &format!("/repos/{}/{}", owner, name), None)?;
        RemoteRepository::from_api(&value)
    }

    /// Whether a remote counterpart exists. A 404 is a definite "no"; any
    /// other failure propagates.
    pub fn repository_exists(&self, owner: &str, name: &str) -> Result<bool> {
        match self.get_repository(owner, name) {
            Ok(_) => Ok(true),
            Err(e) if e.is_http_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Create a repository under the authenticated identity.
    pub fn create_repository(
        &self,
        name: &str,
        description: Option<&str>,
        private: bool,
    ) -> Result<()> {
        let body = json!({
            "name": name,
            "description": description,
            "private": private,
        });
        self.http.request("POST", "/user/repos", Some(&body))?;
        Ok(())
    }

    /// Replace the topic set of a repository.
    pub fn set_topics(&self, owner: &str, name: &str, keywords: &[String]) -> Result<()> {
        let body = json!({ "names": keywords });
        self.http.request(
            "PUT",
            &format!("/repos/{}/{}/topics", owner, name),
            Some(&body),
        )?;
        Ok(())
    }

    /// Update the description of a repository.
    pub fn set_description(&self, owner: &str, name: &str, description: &str) -> Result<()> {
        let body = json!({ "description": description });
        self.http.request(
            "PATCH",
            &format!("/repos/{}/{}", owner, name),
            Some(&body),
        )?;
        Ok(())
    }
}
