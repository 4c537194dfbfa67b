// crates/chart-gate-github/src/client.rs
// ============================================================================
// Module: Pull Request Client
// Description: Blocking GitHub REST client for one certification run.
// Purpose: List a PR's changed files page by page, read its labels, and
// probe release tags, failing fast on any API error.
// Dependencies: chart-gate-core, reqwest, serde, tracing
// ============================================================================

//! ## Overview
//! The changed-file listing drives the whole classification, so its failure
//! modes are strict: GitHub's error shape (a JSON object carrying `message`)
//! or any non-2xx status aborts the run. Pagination fetches pages of 100
//! until a short page is returned. Rate-limit headers are logged at debug
//! level on every page.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use chart_gate_core::ChangeStatus;
use chart_gate_core::ChangedFile;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::ACCEPT;
use reqwest::header::AUTHORIZATION;
use reqwest::redirect::Policy;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use tracing::info;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// GitHub REST media type sent with every request.
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Page size for the changed-files listing.
const FILES_PAGE_SIZE: usize = 100;

/// Rate-limit ceiling header.
const X_RATE_LIMIT: &str = "X-RateLimit-Limit";

/// Rate-limit remaining header.
const X_RATE_REMAIN: &str = "X-RateLimit-Remaining";

/// Label that exempts a PR from chart-content checks.
pub const ALLOW_CI_CHANGES_LABEL: &str = "allow/ci-changes";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure talking to the GitHub API.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The API answered with its error shape.
    #[error("[ERROR] getting pr files: {message}")]
    Api {
        /// Message reported by GitHub.
        message: String,
    },
    /// The API answered with an unexpected status code.
    #[error("github api returned status {status} for {url}")]
    Status {
        /// HTTP status code received.
        status: StatusCode,
        /// Request URL.
        url: String,
    },
    /// The request could not be sent or the body could not be read.
    #[error("github api request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the pull request client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestClientConfig {
    /// Bearer token for authenticated requests, when available.
    pub token: Option<String>,
    /// Base URL of the GitHub REST API.
    pub api_base: String,
    /// Base URL for raw repository content.
    pub raw_base: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for PullRequestClientConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: "https://api.github.com".to_string(),
            raw_base: "https://raw.githubusercontent.com".to_string(),
            timeout_ms: 30_000,
            user_agent: "chart-gate/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// One file entry of the changed-files listing.
#[derive(Debug, Deserialize)]
struct ApiFile {
    /// Repository-relative path of the file.
    filename: String,
    /// Change status string as GitHub spells it.
    #[serde(default)]
    status: Option<String>,
}

/// Changed-files response: either a page of files or GitHub's error shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FilesResponse {
    /// Error object carrying a message.
    Error {
        /// Message reported by GitHub.
        message: String,
    },
    /// A page of changed files.
    Page(Vec<ApiFile>),
}

/// One label entry of the pull request payload.
#[derive(Debug, Deserialize)]
struct ApiLabel {
    /// Label name.
    name: String,
}

/// Pull request payload subset used for label checks.
#[derive(Debug, Deserialize)]
struct ApiPullRequest {
    /// Labels attached to the pull request.
    #[serde(default)]
    labels: Vec<ApiLabel>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking GitHub REST client scoped to one certification run.
#[derive(Debug)]
pub struct PullRequestClient {
    /// Client configuration.
    config: PullRequestClientConfig,
    /// Underlying HTTP client.
    client: Client,
}

impl PullRequestClient {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::ClientBuild`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: PullRequestClientConfig) -> Result<Self, GithubError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(GithubError::ClientBuild)?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Issues a GET with the GitHub media type and optional bearer token.
    fn get(&self, url: &str) -> Result<Response, GithubError> {
        let mut request = self.client.get(url).header(ACCEPT, GITHUB_MEDIA_TYPE);
        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        Ok(request.send()?)
    }

    /// Lists the files changed by the pull request at `api_url`.
    ///
    /// Fetches pages of 100 until a short page is returned. GitHub statuses
    /// outside the recognized set collapse to `modified`; the classifier
    /// only distinguishes removal.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] on transport failure, a non-2xx status, or
    /// GitHub's error shape in the body.
    pub fn changed_files(&self, api_url: &str) -> Result<Vec<ChangedFile>, GithubError> {
        let files_api_url = format!("{api_url}/files");
        let mut page_number = 1usize;
        let mut page_size = FILES_PAGE_SIZE;
        let mut files = Vec::new();

        while page_size == FILES_PAGE_SIZE {
            let query = format!("{files_api_url}?per_page={FILES_PAGE_SIZE}&page={page_number}");
            info!(url = %query, "query pr files");
            let response = self.get(&query)?;
            log_rate_limits(&response);
            let status = response.status();
            let body: FilesResponse = response.json()?;
            let page = match body {
                FilesResponse::Error {
                    message,
                } => {
                    return Err(GithubError::Api {
                        message,
                    });
                }
                FilesResponse::Page(page) => {
                    if !status.is_success() {
                        return Err(GithubError::Status {
                            status,
                            url: query,
                        });
                    }
                    page
                }
            };
            page_size = page.len();
            page_number += 1;
            for file in page {
                files.push(ChangedFile {
                    path: file.filename,
                    status: parse_change_status(file.status.as_deref()),
                });
            }
        }
        Ok(files)
    }

    /// Returns true when the pull request carries the given label.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] on transport failure or a non-2xx status.
    pub fn has_label(&self, api_url: &str, label: &str) -> Result<bool, GithubError> {
        let response = self.get(api_url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Status {
                status,
                url: api_url.to_string(),
            });
        }
        let pull_request: ApiPullRequest = response.json()?;
        Ok(pull_request.labels.iter().any(|entry| entry.name == label))
    }

    /// Returns true when the release tag already exists in `repository`.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] on transport failure or a status other than
    /// 200/404.
    pub fn release_tag_exists(&self, repository: &str, tag: &str) -> Result<bool, GithubError> {
        let url = format!("{}/repos/{repository}/git/ref/tags/{tag}", self.config.api_base);
        info!(url = %url, "checking tag");
        let mut request = self.client.head(&url).header(ACCEPT, GITHUB_MEDIA_TYPE);
        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = request.send()?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(GithubError::Status {
                status,
                url,
            }),
        }
    }

    /// Returns the raw-content base URL configured for this client.
    #[must_use]
    pub fn raw_base(&self) -> &str {
        &self.config.raw_base
    }

    /// Issues a GET without GitHub headers, for raw repository content.
    pub(crate) fn get_raw(&self, url: &str) -> Result<Response, GithubError> {
        Ok(self.client.get(url).send()?)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Logs rate-limit headers when the API reports them.
fn log_rate_limits(response: &Response) {
    for header in [X_RATE_LIMIT, X_RATE_REMAIN] {
        if let Some(value) = response.headers().get(header)
            && let Ok(value) = value.to_str()
        {
            debug!(header, value, "github rate limit");
        }
    }
}

/// Maps GitHub's change-status spelling onto the classifier's enum.
///
/// Unrecognized statuses collapse to `modified`; only removal changes
/// classification behavior.
fn parse_change_status(status: Option<&str>) -> ChangeStatus {
    match status {
        Some("added") => ChangeStatus::Added,
        Some("removed") => ChangeStatus::Removed,
        Some("renamed") => ChangeStatus::Renamed,
        _ => ChangeStatus::Modified,
    }
}
