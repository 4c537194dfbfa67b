// crates/chart-gate-github/tests/outputs.rs
// ============================================================================
// Module: Actions Output Tests
// Description: Annotation writing against a temporary output file.
// ============================================================================
//! ## Overview
//! Verifies the `name=value` line format, append semantics, and the heredoc
//! form for multi-line values.

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

use std::fs;

use chart_gate_github::append_output;

#[test]
fn outputs_append_as_key_value_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output");

    append_output(&path, "chart_entry_name", "acme-awesome").unwrap();
    append_output(&path, "release_tag", "acme-awesome-1.42.0").unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "chart_entry_name=acme-awesome\nrelease_tag=acme-awesome-1.42.0\n");
}

#[test]
fn multiline_values_use_the_heredoc_form() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output");

    append_output(&path, "pr-content-error-message", "line one\nline two").unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("pr-content-error-message<<"));
    assert!(contents.contains("line one\nline two\n"));
    let delimiter = contents
        .lines()
        .next()
        .and_then(|line| line.split("<<").nth(1))
        .unwrap()
        .to_string();
    assert!(contents.trim_end().ends_with(&delimiter));
}

#[test]
fn unwritable_target_reports_the_key() {
    let err = append_output(
        std::path::Path::new("/nonexistent/dir/output"),
        "vendor_type",
        "partner",
    )
    .unwrap_err();
    assert!(err.to_string().contains("vendor_type"));
}
