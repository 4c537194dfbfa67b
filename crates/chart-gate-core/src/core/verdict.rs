// crates/chart-gate-core/src/core/verdict.rs
// ============================================================================
// Module: Rule Verdicts
// Description: Non-fatal validation verdicts over a built submission.
// Purpose: Evaluate the certification-submission and OWNERS rule sets as
// explicit results a driver can turn into PR comments and exit codes.
// Dependencies: crate::core::submission
// ============================================================================

//! ## Overview
//! Two independent rule sets run after a successful build. Neither is an
//! error: each returns a [`Verdict`] carrying the pass/fail flag and the
//! human-readable message destined for the pull request comment. Structural
//! problems never reach this point; they abort the build instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::submission::Submission;

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Outcome of one validation rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// True when the rule set passed.
    pub valid: bool,
    /// Message destined for the pull request comment. Empty on a pass with
    /// nothing to say.
    pub message: String,
}

impl Verdict {
    /// A passing verdict with no message.
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    /// A passing verdict carrying an informational message.
    #[must_use]
    pub fn pass_with(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            message: message.into(),
        }
    }

    /// A failing verdict carrying the rejection message.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

// ============================================================================
// SECTION: Rule Messages
// ============================================================================

/// Message for OWNERS files bundled into a certification PR.
pub const OWNERS_SEPARATE_PR: &str = "[ERROR] Send OWNERS file by itself in a separate PR.";

/// Message for an OWNERS rule evaluation without any OWNERS file.
pub const NO_OWNERS_FILE: &str = "[ERROR] No OWNERS file provided.";

/// Message for an accepted OWNERS-only PR, which still needs a human.
pub const OWNERS_MANUAL_REVIEW: &str =
    "[INFO] OWNERS file changes require manual review by maintainers.";

/// Message for partner-authored OWNERS edits, which are never accepted.
pub const OWNERS_PARTNERS_FORBIDDEN: &str =
    "[ERROR] OWNERS file should never be set directly by partners. See certification docs.";

// ============================================================================
// SECTION: Rule Evaluation
// ============================================================================

impl Submission {
    /// Checks that this PR is a valid chart certification submission.
    ///
    /// Fails when files outside the chart grammar are present, naming one
    /// representative example. Fails when an OWNERS change is bundled in,
    /// unless `ignore_owners` defers that rule to the OWNERS evaluation.
    /// Report, source, and tarball artifacts are all legal together under
    /// the single registered chart identity.
    #[must_use]
    pub fn certification_verdict(&self, ignore_owners: bool) -> Verdict {
        if let Some(example) = self.modified_unknown.values().next() {
            return Verdict::fail(format!(
                "[ERROR] PR includes one or more files not related to charts: {example}"
            ));
        }
        if !self.modified_owners.is_empty() && !ignore_owners {
            return Verdict::fail(OWNERS_SEPARATE_PR);
        }
        Verdict::pass()
    }

    /// Checks that this PR is a valid OWNERS submission.
    ///
    /// Valid only when exactly one OWNERS file is the sole change; the
    /// passing message points maintainers at the required manual review.
    /// The partner-authored OWNERS rejection is applied by the driver on
    /// top of this verdict, keyed on the OWNERS path category.
    #[must_use]
    pub fn owners_verdict(&self) -> Verdict {
        if self.modified_owners.is_empty() {
            return Verdict::fail(NO_OWNERS_FILE);
        }
        if self.modified_owners.len() > 1
            || self.chart.is_some()
            || !self.modified_unknown.is_empty()
        {
            return Verdict::fail(OWNERS_SEPARATE_PR);
        }
        Verdict::pass_with(OWNERS_MANUAL_REVIEW)
    }
}
