// crates/chart-gate-owners/src/lib.rs
// ============================================================================
// Module: OWNERS File Reader
// Description: Data model and YAML reader for per-chart OWNERS files.
// Purpose: Expose the vendor, chart, user, and delivery-mode declarations a
// certification run consults.
// Dependencies: chart-gate-core, serde, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! Every certified chart carries an OWNERS file at
//! `charts/<category>/<organization>/<name>/OWNERS` declaring the vendor,
//! the chart name, the GitHub users authorized to submit, an optional PGP
//! public key, and the delivery mode. The delivery-mode flag appears under
//! two spellings: the current `web_catalog_only` and the legacy
//! `providerDelivery`; either one set to true means the chart is distributed
//! outside the public catalog index.
//!
//! Absent keys are not errors. Accessors default to empty values so callers
//! can consult a partially filled OWNERS file the way the automation always
//! has.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use chart_gate_core::Category;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure reading or parsing an OWNERS file.
#[derive(Debug, Error)]
pub enum OwnersError {
    /// The OWNERS file could not be read.
    #[error("failed to read OWNERS file at {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The OWNERS file is not valid YAML of the expected shape.
    #[error("failed to parse OWNERS file at {path}: {source}")]
    Parse {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

// ============================================================================
// SECTION: Data Model
// ============================================================================

/// Vendor block of an OWNERS file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vendor {
    /// Vendor display name.
    #[serde(default)]
    pub name: String,
    /// Vendor label used in chart annotations.
    #[serde(default)]
    pub label: String,
}

/// Chart block of an OWNERS file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartRef {
    /// Chart name the OWNERS file governs.
    #[serde(default)]
    pub name: String,
}

/// One authorized submitter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    /// GitHub login of the user.
    #[serde(default, rename = "githubUsername")]
    pub github_username: String,
}

/// Parsed OWNERS file contents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OwnersFile {
    /// Vendor declaration.
    #[serde(default)]
    pub vendor: Vendor,
    /// Chart declaration.
    #[serde(default)]
    pub chart: ChartRef,
    /// Authorized submitters.
    #[serde(default)]
    pub users: Vec<User>,
    /// PGP public key used to verify signed reports.
    #[serde(default, rename = "publicPgpKey")]
    pub public_pgp_key: String,
    /// Current spelling of the provider-controlled delivery flag.
    #[serde(default)]
    pub web_catalog_only: Option<bool>,
    /// Legacy spelling of the provider-controlled delivery flag.
    #[serde(default, rename = "providerDelivery")]
    pub provider_delivery: Option<bool>,
}

impl OwnersFile {
    /// Parses OWNERS contents from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`OwnersError::Parse`] when the document is not valid YAML of
    /// the expected shape. The reported path is whatever the caller passes
    /// for context.
    pub fn from_yaml(contents: &str, path: &Path) -> Result<Self, OwnersError> {
        serde_yaml::from_str(contents).map_err(|source| OwnersError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads and parses the OWNERS file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`OwnersError::Read`] when the file cannot be read and
    /// [`OwnersError::Parse`] when its contents are not valid YAML.
    pub fn load(path: &Path) -> Result<Self, OwnersError> {
        let contents = fs::read_to_string(path).map_err(|source| OwnersError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents, path)
    }

    /// True when the chart is delivered outside the public catalog index,
    /// under either spelling of the flag.
    #[must_use]
    pub fn web_catalog_only(&self) -> bool {
        self.web_catalog_only.unwrap_or(false) || self.provider_delivery.unwrap_or(false)
    }

    /// True when at least one authorized submitter is declared.
    #[must_use]
    pub fn has_users(&self) -> bool {
        !self.users.is_empty()
    }
}

// ============================================================================
// SECTION: Path Construction
// ============================================================================

/// Returns the checkout-relative path of the OWNERS file for a chart.
#[must_use]
pub fn expected_path(category: Category, organization: &str, name: &str) -> PathBuf {
    ["charts", category.as_str(), organization, name, "OWNERS"].iter().collect()
}
