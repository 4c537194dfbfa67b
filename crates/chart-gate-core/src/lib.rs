// crates/chart-gate-core/src/lib.rs
// ============================================================================
// Module: Chart Gate Core
// Description: Pure classification and validation of chart certification PRs.
// Purpose: Turn a pull request's changed-file list into a structured
// submission with deterministic pass/fail verdicts.
// Dependencies: semver, serde, thiserror
// ============================================================================

//! ## Overview
//! This crate holds the deterministic core of the chart certification
//! pipeline: given the flat list of files changed by a pull request, it
//! classifies the PR into exactly one semantic category (report-only,
//! tarball, source, OWNERS-only, mixed/invalid) and evaluates the
//! certification and OWNERS rule sets. No network or filesystem access
//! happens here; everything is a pure function of the input file list, which
//! keeps the rules unit-testable without mocking HTTP.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use crate::core::identity::Category;
pub use crate::core::identity::ChartIdentity;
pub use crate::core::path::OwnersPath;
pub use crate::core::path::PathMatch;
pub use crate::core::path::classify;
pub use crate::core::submission::ChangeStatus;
pub use crate::core::submission::ChangedFile;
pub use crate::core::submission::RemovedFilePolicy;
pub use crate::core::submission::Report;
pub use crate::core::submission::Source;
pub use crate::core::submission::Submission;
pub use crate::core::submission::SubmissionBuilder;
pub use crate::core::submission::SubmissionError;
pub use crate::core::submission::Tarball;
pub use crate::core::verdict::NO_OWNERS_FILE;
pub use crate::core::verdict::OWNERS_MANUAL_REVIEW;
pub use crate::core::verdict::OWNERS_PARTNERS_FORBIDDEN;
pub use crate::core::verdict::OWNERS_SEPARATE_PR;
pub use crate::core::verdict::Verdict;
