// crates/chart-gate-core/src/core/identity.rs
// ============================================================================
// Module: Chart Identity
// Description: Submission track categories and the chart coordinate tuple.
// Purpose: Provide the unique identity a certification PR is allowed to
// reference, with stable wire forms for artifacts and annotations.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A chart is identified by `category/organization/name/version`. Within one
//! pull request at most one distinct identity may appear across all
//! chart-path files; the submission builder enforces that invariant. This
//! module only carries the identity value type and its derived labels
//! (index entry name, release tag, vendor annotation).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Category
// ============================================================================

/// Submission track for a chart.
///
/// # Invariants
/// - Spellings match the second path segment of the chart path grammar and
///   are stable for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Partner-submitted charts.
    Partners,
    /// Red Hat submitted charts.
    Redhat,
    /// Community-submitted charts.
    Community,
}

impl Category {
    /// Returns the path-segment spelling of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Partners => "partners",
            Self::Redhat => "redhat",
            Self::Community => "community",
        }
    }

    /// Returns the vendor annotation emitted for downstream workflow steps.
    ///
    /// The annotation uses the singular `partner` spelling while the path
    /// grammar uses `partners`.
    #[must_use]
    pub const fn vendor_label(self) -> &'static str {
        match self {
            Self::Partners => "partner",
            Self::Redhat => "redhat",
            Self::Community => "community",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a path segment is not a recognized category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory;

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "partners" => Ok(Self::Partners),
            "redhat" => Ok(Self::Redhat),
            "community" => Ok(Self::Community),
            _ => Err(UnknownCategory),
        }
    }
}

// ============================================================================
// SECTION: Chart Identity
// ============================================================================

/// The chart coordinate tuple extracted from a chart-shaped path.
///
/// # Invariants
/// - At most one distinct identity may be registered per submission; the
///   builder rejects conflicting values.
/// - `version` is validated as a semantic version at registration time, not
///   at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartIdentity {
    /// Submission track.
    pub category: Category,
    /// Vendor organization path segment.
    pub organization: String,
    /// Chart name path segment.
    pub name: String,
    /// Chart version path segment.
    pub version: String,
}

impl ChartIdentity {
    /// Returns the Helm repository index entry name for this chart.
    #[must_use]
    pub fn entry_name(&self) -> String {
        format!("{}-{}", self.organization, self.name)
    }

    /// Returns the GitHub release tag name for this chart version.
    #[must_use]
    pub fn release_tag(&self) -> String {
        format!("{}-{}-{}", self.organization, self.name, self.version)
    }

    /// Returns the expected tarball file name for this chart version.
    #[must_use]
    pub fn tarball_name(&self) -> String {
        format!("{}-{}.tgz", self.name, self.version)
    }
}

impl fmt::Display for ChartIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.category, self.organization, self.name, self.version
        )
    }
}
