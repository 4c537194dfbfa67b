// crates/chart-gate-cli/src/checkpr.rs
// ============================================================================
// Module: PR Content Checks
// Description: Pure message crafting for the check-pr driver.
// Purpose: Turn verdicts and duplicate-release lookups into the exact
// comment texts posted on the pull request.
// Dependencies: chart-gate-core, chart-gate-github
// ============================================================================

//! ## Overview
//! The driver separates network access from decision making: everything in
//! this module is a pure function of a built submission plus already-fetched
//! collaborator answers (the Helm index, the tag probe). That keeps the
//! comment texts and the partners OWNERS policy unit-testable without HTTP.

// ============================================================================
// SECTION: Imports
// ============================================================================

use chart_gate_core::Category;
use chart_gate_core::OWNERS_MANUAL_REVIEW;
use chart_gate_core::OWNERS_PARTNERS_FORBIDDEN;
use chart_gate_core::PathMatch;
use chart_gate_core::Submission;
use chart_gate_core::classify;
use chart_gate_github::HelmIndex;

// ============================================================================
// SECTION: Owners Message
// ============================================================================

/// Crafts the `owners-error-message` output for a PR touching OWNERS files.
///
/// Returns `None` when no OWNERS file is touched. A structurally valid
/// OWNERS-only PR still yields a message: partner-authored OWNERS edits are
/// rejected outright, every other category is routed to manual maintainer
/// review. The category comes from the OWNERS path itself since an
/// OWNERS-only PR registers no chart identity.
#[must_use]
pub(crate) fn craft_owners_error_message(submission: &Submission) -> Option<String> {
    let first_owners = submission.modified_owners.first()?;
    let verdict = submission.owners_verdict();
    if !verdict.valid {
        return Some(verdict.message);
    }
    let message = match classify(first_owners) {
        PathMatch::Owners(owners) if owners.category == Category::Partners => {
            OWNERS_PARTNERS_FORBIDDEN
        }
        _ => OWNERS_MANUAL_REVIEW,
    };
    Some(message.to_string())
}

// ============================================================================
// SECTION: Content Message
// ============================================================================

/// Crafts the `pr-content-error-message` output for a certification PR.
///
/// Evaluates the certification verdict and, for a registered chart, the
/// duplicate-release checks against the published index and the release
/// tag. Returns `None` when the PR content is acceptable.
#[must_use]
pub(crate) fn craft_pr_content_error_message(
    submission: &Submission,
    index: Option<&HelmIndex>,
    release_tag_exists: bool,
    ignore_owners: bool,
) -> Option<String> {
    let verdict = submission.certification_verdict(ignore_owners);
    if !verdict.valid {
        return Some(verdict.message);
    }
    let chart = submission.chart.as_ref()?;
    if let Some(index) = index
        && index.contains_version(&chart.entry_name(), &chart.version)
    {
        return Some(format!(
            "[ERROR] Helm chart release already exists in the index.yaml: {}",
            chart.version
        ));
    }
    if release_tag_exists {
        return Some(format!(
            "[ERROR] Helm chart release already exists in the GitHub Release/Tag: {}",
            chart.release_tag()
        ));
    }
    None
}
