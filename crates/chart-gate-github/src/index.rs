// crates/chart-gate-github/src/index.rs
// ============================================================================
// Module: Helm Repository Index
// Description: Fetch and query the published Helm repository index.
// Purpose: Back the duplicate-release check with the chart versions already
// released for an index entry.
// Dependencies: chart-gate-core, serde, serde_yaml, tracing
// ============================================================================

//! ## Overview
//! The published `index.yaml` on the index branch is the source of truth for
//! which chart versions already exist. A missing index (fresh repository,
//! 404) is not an error: it degrades to the empty `v1` index so first-time
//! submissions validate cleanly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::client::GithubError;
use crate::client::PullRequestClient;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure interpreting a fetched index document.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index could not be fetched.
    #[error(transparent)]
    Fetch(#[from] GithubError),
    /// The index body is not valid YAML of the expected shape.
    #[error("failed to parse index.yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

// ============================================================================
// SECTION: Data Model
// ============================================================================

/// One released chart version in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Released chart version.
    pub version: String,
}

/// The Helm repository index document, reduced to the fields the
/// duplicate-release check consults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelmIndex {
    /// Index schema version.
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    /// Released versions keyed by `{organization}-{name}` entry name.
    #[serde(default)]
    pub entries: BTreeMap<String, Vec<IndexEntry>>,
}

impl HelmIndex {
    /// The empty `v1` index used when no index has been published yet.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            api_version: "v1".to_string(),
            entries: BTreeMap::new(),
        }
    }

    /// Parses an index document from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Parse`] when the document is not valid YAML of
    /// the expected shape.
    pub fn from_yaml(contents: &str) -> Result<Self, IndexError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// True when `version` is already released under `entry_name`.
    #[must_use]
    pub fn contains_version(&self, entry_name: &str, version: &str) -> bool {
        self.entries
            .get(entry_name)
            .is_some_and(|released| released.iter().any(|entry| entry.version == version))
    }
}

// ============================================================================
// SECTION: Fetch
// ============================================================================

/// Downloads the index published on `branch` of `repository`.
///
/// A non-2xx response yields the empty index rather than an error, matching
/// the behavior expected for repositories that have not published yet.
///
/// # Errors
///
/// Returns [`IndexError`] on transport failure or an unparseable document.
pub fn download_index(
    client: &PullRequestClient,
    repository: &str,
    branch: &str,
) -> Result<HelmIndex, IndexError> {
    let url = format!("{}/{repository}/{branch}/index.yaml", client.raw_base());
    info!(url = %url, "downloading index.yaml");
    let response = client.get_raw(&url)?;
    if !response.status().is_success() {
        return Ok(HelmIndex::empty());
    }
    let body = response.text().map_err(GithubError::from)?;
    HelmIndex::from_yaml(&body)
}
