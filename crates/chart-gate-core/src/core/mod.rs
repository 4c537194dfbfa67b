// crates/chart-gate-core/src/core/mod.rs
// ============================================================================
// Module: Core Submodules
// Description: Module wiring for the classification and validation core.
// ============================================================================

//! ## Overview
//! Submodules covering the chart path grammar, chart identity, submission
//! building, and rule verdicts.

pub mod identity;
pub mod path;
pub mod submission;
pub mod verdict;
