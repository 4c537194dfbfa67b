// crates/chart-gate-core/src/core/submission.rs
// ============================================================================
// Module: Submission Builder
// Description: Folds a changed-file list into an immutable submission record.
// Purpose: Classify every file of one pull request and enforce the
// structural rules with explicit conflict detection.
// Dependencies: crate::core::{identity, path}, semver, serde, thiserror
// ============================================================================

//! ## Overview
//! The builder consumes the changed files of one pull request in input order
//! and produces a [`Submission`]: the single chart identity, the report /
//! source / tarball artifacts, the OWNERS paths, and the files that match
//! nothing. Structural problems (two charts, a bad version, a misnamed
//! tarball) abort the build with a [`SubmissionError`]; everything else is
//! reported through verdicts evaluated after a successful build.
//!
//! Removal handling is an explicit policy. The changed-file listing includes
//! deleted paths, and script generations disagreed on whether those count
//! toward presence checks; [`RemovedFilePolicy::Exclude`] is the default.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use semver::Version;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identity::ChartIdentity;
use crate::core::path::PathMatch;
use crate::core::path::classify;

// ============================================================================
// SECTION: Changed Files
// ============================================================================

/// Change status reported by the pull request files listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    /// File added by the pull request.
    Added,
    /// File modified by the pull request.
    Modified,
    /// File removed by the pull request.
    Removed,
    /// File renamed by the pull request.
    Renamed,
}

/// One entry of the pull request changed-file listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Repository-relative path of the file.
    pub path: String,
    /// Change status for the file.
    pub status: ChangeStatus,
}

impl ChangedFile {
    /// Convenience constructor for an added file.
    #[must_use]
    pub fn added(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: ChangeStatus::Added,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Unrecoverable structural problem with a pull request's file set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// More than one distinct chart identity touched in one pull request.
    #[error(
        "[ERROR] A PR must contain only one chart. Current PR includes files for multiple charts."
    )]
    DuplicateChart,
    /// Chart version string fails semantic-version validation.
    #[error("[ERROR] Helm chart version is not a valid semantic version: {version}")]
    InvalidVersion {
        /// The rejected version string.
        version: String,
    },
    /// Tarball file name does not match `{name}-{version}.tgz`.
    #[error("[ERROR] the tgz file is named incorrectly. Expected: {expected}. Got: {found}")]
    MisnamedTarball {
        /// The file name mandated by the chart identity.
        expected: String,
        /// The file name seen in the pull request.
        found: String,
    },
}

// ============================================================================
// SECTION: Artifact Records
// ============================================================================

/// Verifier report presence for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Report {
    /// True when a `report.yaml` is part of the pull request.
    pub found: bool,
    /// True when a `report.yaml.asc` signature accompanies the report.
    pub signed: bool,
    /// Path of the unsigned `report.yaml`.
    pub path: Option<String>,
}

/// Chart source presence for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Source {
    /// True when the chart source tree is part of the pull request.
    pub found: bool,
    /// Path of the source tree's `Chart.yaml`.
    pub path: Option<String>,
}

/// Chart tarball presence for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tarball {
    /// True when the chart tarball is part of the pull request.
    pub found: bool,
    /// Path of the tarball.
    pub path: Option<String>,
    /// Path of the `.tgz.prov` provenance companion, when present.
    pub provenance: Option<String>,
}

// ============================================================================
// SECTION: Submission
// ============================================================================

/// Aggregate classification of one pull request.
///
/// # Invariants
/// - `chart` is the single identity shared by every chart-path file.
/// - `report`, `source`, and `tarball` are independently optional; multiple
///   artifact kinds are legal together.
/// - `modified_unknown` is keyed by basename; the first path recorded for a
///   basename is kept as the representative example.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Submission {
    /// Chart identity referenced by the pull request, when any chart-path
    /// file is present.
    pub chart: Option<ChartIdentity>,
    /// Verifier report files.
    pub report: Report,
    /// Chart source files.
    pub source: Source,
    /// Chart tarball files.
    pub tarball: Tarball,
    /// OWNERS file paths touched by the pull request.
    pub modified_owners: Vec<String>,
    /// Files outside the chart grammar, keyed by basename.
    pub modified_unknown: BTreeMap<String, String>,
}

impl Submission {
    /// Returns true when the pull request touches any chart-bearing file or
    /// an OWNERS file, i.e. is in scope for certification at all.
    #[must_use]
    pub fn is_chart_related(&self) -> bool {
        self.chart.is_some() || !self.modified_owners.is_empty()
    }

    /// Registers a chart identity, enforcing the single-chart invariant.
    ///
    /// The conflict check precedes version validation, so a second chart is
    /// always reported as a duplicate even when its version is malformed.
    /// Re-registration with an equal value is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::DuplicateChart`] on a conflicting identity
    /// and [`SubmissionError::InvalidVersion`] when the version is not a
    /// valid semantic version.
    pub fn register(&mut self, incoming: ChartIdentity) -> Result<(), SubmissionError> {
        if let Some(existing) = &self.chart
            && *existing != incoming
        {
            return Err(SubmissionError::DuplicateChart);
        }
        if Version::parse(&incoming.version).is_err() {
            return Err(SubmissionError::InvalidVersion {
                version: incoming.version,
            });
        }
        self.chart = Some(incoming);
        Ok(())
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Policy for files the pull request removes.
///
/// Removed chart files do not prove the presence of an artifact, so the
/// default keeps them out of identity registration and found-flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovedFilePolicy {
    /// Skip removed files entirely (default).
    #[default]
    Exclude,
    /// Classify removed files like any other change.
    Include,
}

/// Builder folding a changed-file list into a [`Submission`].
#[derive(Debug, Clone, Default)]
pub struct SubmissionBuilder {
    /// Policy applied to removed files.
    removed_files: RemovedFilePolicy,
}

impl SubmissionBuilder {
    /// Creates a builder with the default removed-file policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the removed-file policy.
    #[must_use]
    pub const fn removed_files(mut self, policy: RemovedFilePolicy) -> Self {
        self.removed_files = policy;
        self
    }

    /// Classifies every changed file and assembles the submission.
    ///
    /// Files are processed in input order; the result does not depend on
    /// that order except for which unmatched path is kept as the
    /// representative example per basename.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmissionError`] when the file set is structurally
    /// invalid: more than one chart identity, a version that is not
    /// semver-compatible, or a misnamed tarball.
    pub fn build(&self, files: &[ChangedFile]) -> Result<Submission, SubmissionError> {
        let mut submission = Submission::default();
        for file in files {
            if self.removed_files == RemovedFilePolicy::Exclude
                && file.status == ChangeStatus::Removed
            {
                continue;
            }
            Self::apply(&mut submission, &file.path)?;
        }
        Ok(submission)
    }

    /// Applies one classified path to the submission under construction.
    fn apply(submission: &mut Submission, path: &str) -> Result<(), SubmissionError> {
        match classify(path) {
            PathMatch::Chart {
                identity,
                source,
            } => {
                submission.register(identity)?;
                if source {
                    submission.source.found = true;
                    submission.source.path = Some(path.to_string());
                }
            }
            PathMatch::Report {
                identity,
                signed,
            } => {
                submission.register(identity)?;
                if signed {
                    submission.report.signed = true;
                } else {
                    submission.report.found = true;
                    submission.report.path = Some(path.to_string());
                }
            }
            PathMatch::Tarball {
                identity,
                file_name,
                provenance,
            } => {
                submission.register(identity.clone())?;
                let mut expected = identity.tarball_name();
                if provenance {
                    expected.push_str(".prov");
                }
                if file_name != expected {
                    return Err(SubmissionError::MisnamedTarball {
                        expected,
                        found: file_name,
                    });
                }
                if provenance {
                    submission.tarball.provenance = Some(path.to_string());
                } else {
                    submission.tarball.found = true;
                    submission.tarball.path = Some(path.to_string());
                }
            }
            PathMatch::Owners(_) => {
                submission.modified_owners.push(path.to_string());
            }
            PathMatch::Unmatched => {
                let basename = path.rsplit('/').next().unwrap_or(path).to_string();
                submission.modified_unknown.entry(basename).or_insert_with(|| path.to_string());
            }
        }
        Ok(())
    }
}
