// crates/chart-gate-core/tests/validation.rs
// ============================================================================
// Module: Rule Verdict Tests
// Description: Certification and OWNERS rule evaluation over built
// submissions.
// ============================================================================
//! ## Overview
//! Verdicts are non-fatal results evaluated after a successful build; these
//! tests pin the pass/fail flags and the exact comment texts.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use chart_gate_core::ChangedFile;
use chart_gate_core::Submission;
use chart_gate_core::SubmissionBuilder;

fn build(paths: &[&str]) -> Submission {
    let files: Vec<ChangedFile> = paths.iter().map(|path| ChangedFile::added(*path)).collect();
    SubmissionBuilder::new().build(&files).unwrap()
}

// ============================================================================
// SECTION: Certification Rule
// ============================================================================

#[test]
fn report_only_submission_is_a_valid_certification() {
    let submission = build(&["charts/partners/acme/awesome/1.42.0/report.yaml"]);
    let verdict = submission.certification_verdict(false);
    assert!(verdict.valid);
    assert!(verdict.message.is_empty());
}

#[test]
fn unknown_files_fail_the_certification_rule() {
    let submission = build(&["charts/path/to/some/file"]);
    let verdict = submission.certification_verdict(false);
    assert!(!verdict.valid);
    assert!(
        verdict.message.contains("PR includes one or more files not related to charts:"),
        "unexpected message: {}",
        verdict.message
    );
    assert!(verdict.message.contains("charts/path/to/some/file"));
}

#[test]
fn bundled_owners_fail_unless_ignored() {
    let submission = build(&["charts/partners/acme/awesome/OWNERS"]);
    let strict = submission.certification_verdict(false);
    assert!(!strict.valid);
    assert!(strict.message.contains("Send OWNERS file by itself in a separate PR."));

    let lenient = submission.certification_verdict(true);
    assert!(lenient.valid);
}

#[test]
fn report_with_source_is_a_valid_certification() {
    let submission = build(&[
        "charts/partners/acme/awesome/1.42.0/report.yaml",
        "charts/partners/acme/awesome/1.42.0/src/Chart.yaml",
        "charts/partners/acme/awesome/1.42.0/src/values.yaml",
    ]);
    assert!(submission.certification_verdict(false).valid);
}

#[test]
fn unknown_check_precedes_the_owners_check() {
    let submission =
        build(&["charts/partners/acme/awesome/OWNERS", "unrelated.txt"]);
    let verdict = submission.certification_verdict(false);
    assert!(!verdict.valid);
    assert!(verdict.message.contains("not related to charts"));
}

// ============================================================================
// SECTION: Owners Rule
// ============================================================================

#[test]
fn single_owners_file_alone_passes_with_manual_review() {
    let submission = build(&["charts/partners/acme/awesome/OWNERS"]);
    let verdict = submission.owners_verdict();
    assert!(verdict.valid);
    assert!(verdict.message.contains("manual review"));
}

#[test]
fn missing_owners_file_fails() {
    let submission = build(&["charts/partners/acme/awesome/1.42.0/report.yaml"]);
    let verdict = submission.owners_verdict();
    assert!(!verdict.valid);
    assert!(verdict.message.contains("No OWNERS file provided"));
}

#[test]
fn multiple_owners_files_fail() {
    let submission = build(&[
        "charts/partners/acme/awesome/OWNERS",
        "charts/partners/acme/another-chart/OWNERS",
    ]);
    let verdict = submission.owners_verdict();
    assert!(!verdict.valid);
    assert!(verdict.message.contains("Send OWNERS file by itself in a separate PR."));
}

#[test]
fn owners_mixed_with_chart_files_fails() {
    let submission = build(&[
        "charts/partners/acme/awesome/OWNERS",
        "charts/partners/acme/awesome/1.42.0/report.yaml",
    ]);
    let verdict = submission.owners_verdict();
    assert!(!verdict.valid);
    assert!(verdict.message.contains("Send OWNERS file by itself in a separate PR."));
}

#[test]
fn owners_mixed_with_unknown_files_fails() {
    let submission = build(&["charts/partners/acme/awesome/OWNERS", "unrelated.txt"]);
    let verdict = submission.owners_verdict();
    assert!(!verdict.valid);
    assert!(verdict.message.contains("Send OWNERS file by itself in a separate PR."));
}
