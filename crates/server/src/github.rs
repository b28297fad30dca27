//! GitHub REST API client.
//!
//! Each call returns either the decoded success body or a [`GitHubFailure`]
//! produced by [`classify`]; callers never see raw upstream statuses.

use crate::classify::{GitHubFailure, GitHubOperation, GitHubSuccess, classify};
use crate::webhook::HookRegistration;
use axum::http::StatusCode;
use reqwest::header::{ACCEPT, LINK};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use snapbridge_core::{GitHubConfig, PageLinks};

const JSON_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";

/// A repository as listed by `GET /user/repos`.
///
/// Only `full_name` and `url` are interpreted; every other upstream field is
/// carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub full_name: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Snap information attached to a listed repository.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapInfo {
    pub name: Option<String>,
}

/// A repository with its snap information.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRepository {
    #[serde(flatten)]
    pub repository: RepositorySummary,
    pub snap_info: SnapInfo,
}

impl EnrichedRepository {
    pub fn new(mut repository: RepositorySummary, snap_name: Option<String>) -> Self {
        // The enrichment owns this key.
        repository.extra.remove("snap_info");
        Self {
            repository,
            snap_info: SnapInfo { name: snap_name },
        }
    }
}

/// One page of the authenticated user's repositories.
#[derive(Clone, Debug)]
pub struct RepositoryPage {
    pub repositories: Vec<RepositorySummary>,
    pub links: PageLinks,
}

/// The parts of a build manifest the gateway reads.
#[derive(Debug, Default, Deserialize)]
struct SnapcraftManifest {
    name: Option<String>,
}

/// Why a manifest lookup produced no answer.
///
/// A missing manifest is not an error: it is `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("manifest request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("manifest request returned {0}")]
    Status(StatusCode),

    #[error("manifest is not valid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Client for the GitHub REST API.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    manifest_path: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            manifest_path: config.manifest_path.trim_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and classify the response, returning its body on success.
    async fn send(
        &self,
        operation: GitHubOperation,
        req: reqwest::RequestBuilder,
    ) -> Result<(GitHubSuccess, reqwest::header::HeaderMap, Vec<u8>), GitHubFailure> {
        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                crate::metrics::record_upstream("github", operation.as_str(), None);
                return Err(GitHubFailure::unusable_response(operation, e));
            }
        };

        let status = response.status();
        crate::metrics::record_upstream("github", operation.as_str(), Some(status));
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| GitHubFailure::unusable_response(operation, e))?;

        let success = classify(operation, status, &body)?;
        Ok((success, headers, body.to_vec()))
    }

    /// `GET /user`: the authenticated user, exactly as GitHub returned it.
    pub async fn get_user(&self, token: &str) -> Result<Value, GitHubFailure> {
        let operation = GitHubOperation::User;
        let req = self
            .http
            .get(self.url("/user"))
            .bearer_auth(token)
            .header(ACCEPT, JSON_MEDIA_TYPE);

        let (_, _, body) = self.send(operation, req).await?;
        serde_json::from_slice(&body).map_err(|e| GitHubFailure::unusable_response(operation, e))
    }

    /// `GET /user/repos?affiliation=owner`: one page of owned repositories.
    pub async fn list_repositories(&self, token: &str) -> Result<RepositoryPage, GitHubFailure> {
        let operation = GitHubOperation::ListRepositories;
        let req = self
            .http
            .get(self.url("/user/repos"))
            .query(&[("affiliation", "owner")])
            .bearer_auth(token)
            .header(ACCEPT, JSON_MEDIA_TYPE);

        let (_, headers, body) = self.send(operation, req).await?;
        let repositories: Vec<RepositorySummary> = serde_json::from_slice(&body)
            .map_err(|e| GitHubFailure::unusable_response(operation, e))?;
        let links = PageLinks::from_header(headers.get(LINK).and_then(|v| v.to_str().ok()));

        Ok(RepositoryPage {
            repositories,
            links,
        })
    }

    /// Look up the snap name declared in a repository's build manifest.
    ///
    /// Returns `Ok(None)` when the repository has no manifest or the manifest
    /// declares no name.
    pub async fn fetch_snap_name(
        &self,
        token: &str,
        full_name: &str,
    ) -> Result<Option<String>, ManifestError> {
        let url = self.url(&format!(
            "/repos/{full_name}/contents/{}",
            self.manifest_path
        ));
        let result = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, RAW_MEDIA_TYPE)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                crate::metrics::record_upstream("github", "manifest", None);
                return Err(e.into());
            }
        };

        let status = response.status();
        crate::metrics::record_upstream("github", "manifest", Some(status));
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ManifestError::Status(status));
        }

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let manifest: SnapcraftManifest = serde_yaml::from_slice(&body)?;
        Ok(manifest.name)
    }

    /// `POST /repos/{owner}/{name}/hooks`.
    pub async fn create_webhook(
        &self,
        token: &str,
        owner: &str,
        name: &str,
        registration: &HookRegistration,
    ) -> Result<GitHubSuccess, GitHubFailure> {
        let req = self
            .http
            .post(self.url(&format!("/repos/{owner}/{name}/hooks")))
            .bearer_auth(token)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .json(registration);

        let (success, _, _) = self.send(GitHubOperation::CreateWebhook, req).await?;
        Ok(success)
    }
}
