// crates/chart-gate-core/src/core/path.rs
// ============================================================================
// Module: Chart Path Classifier
// Description: Canonical parser for the chart path grammar.
// Purpose: Classify one changed-file path into a tagged match variant so no
// caller re-derives fields from raw strings.
// Dependencies: crate::core::identity
// ============================================================================

//! ## Overview
//! The classification key is the path grammar
//! `charts/<category>/<organization>/<name>/<version>/<rest>` with
//! `<category>` one of `partners`, `redhat`, `community`. Recognized leaves
//! are the verifier report (`report.yaml`, `report.yaml.asc`), the chart
//! tarball (`*.tgz`, `*.tgz.prov`), and the source marker (`Chart.yaml`).
//! The versionless shape `charts/<category>/<organization>/<name>/OWNERS`
//! addresses the per-chart OWNERS file. Everything else is unmatched.
//!
//! The classifier extracts fields only. Semantic checks (version validity,
//! tarball naming, identity conflicts) belong to the submission builder.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::identity::Category;
use crate::core::identity::ChartIdentity;

// ============================================================================
// SECTION: Match Variants
// ============================================================================

/// Classification of one changed-file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatch {
    /// A chart-shaped path with no more specific role.
    Chart {
        /// Identity extracted from the path segments.
        identity: ChartIdentity,
        /// True when the basename is exactly `Chart.yaml` (source marker).
        source: bool,
    },
    /// A verifier report file inside the version directory.
    Report {
        /// Identity extracted from the path segments.
        identity: ChartIdentity,
        /// True for the detached signature (`report.yaml.asc`).
        signed: bool,
    },
    /// A chart tarball or its provenance file inside the version directory.
    Tarball {
        /// Identity extracted from the path segments.
        identity: ChartIdentity,
        /// File name as it appears in the path.
        file_name: String,
        /// True for the provenance companion (`.tgz.prov`).
        provenance: bool,
    },
    /// The per-chart OWNERS file (versionless shape).
    Owners(OwnersPath),
    /// A path outside the chart grammar.
    Unmatched,
}

/// Coordinates of an OWNERS file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnersPath {
    /// Submission track.
    pub category: Category,
    /// Vendor organization path segment.
    pub organization: String,
    /// Chart name path segment.
    pub name: String,
}

// ============================================================================
// SECTION: Classifier
// ============================================================================

/// Classifies one changed-file path against the chart path grammar.
#[must_use]
pub fn classify(path: &str) -> PathMatch {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.first() != Some(&"charts") || segments.len() < 5 {
        return PathMatch::Unmatched;
    }
    let Ok(category) = segments[1].parse::<Category>() else {
        return PathMatch::Unmatched;
    };
    let organization = segments[2];
    let name = segments[3];
    if organization.is_empty() || name.is_empty() {
        return PathMatch::Unmatched;
    }

    // Versionless OWNERS shape: charts/<category>/<organization>/<name>/OWNERS
    if segments.len() == 5 {
        if segments[4] == "OWNERS" {
            return PathMatch::Owners(OwnersPath {
                category,
                organization: organization.to_string(),
                name: name.to_string(),
            });
        }
        return PathMatch::Unmatched;
    }

    let version = segments[4];
    if version.is_empty() {
        return PathMatch::Unmatched;
    }
    let identity = ChartIdentity {
        category,
        organization: organization.to_string(),
        name: name.to_string(),
        version: version.to_string(),
    };
    let rest = &segments[5..];

    if let [leaf] = rest {
        if *leaf == "report.yaml" {
            return PathMatch::Report {
                identity,
                signed: false,
            };
        }
        if *leaf == "report.yaml.asc" {
            return PathMatch::Report {
                identity,
                signed: true,
            };
        }
        if leaf.ends_with(".tgz.prov") {
            return PathMatch::Tarball {
                identity,
                file_name: (*leaf).to_string(),
                provenance: true,
            };
        }
        if leaf.ends_with(".tgz") {
            return PathMatch::Tarball {
                identity,
                file_name: (*leaf).to_string(),
                provenance: false,
            };
        }
    }

    let source = rest.last().is_some_and(|leaf| *leaf == "Chart.yaml");
    PathMatch::Chart {
        identity,
        source,
    }
}
