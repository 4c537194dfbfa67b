// crates/chart-gate-owners/tests/owners_file.rs
// ============================================================================
// Module: OWNERS Reader Tests
// Description: Parsing and accessor behavior for per-chart OWNERS files.
// ============================================================================
//! ## Overview
//! Exercises the YAML data model, the legacy delivery-flag alias, defaulting
//! for absent keys, and filesystem loading.

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

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use chart_gate_core::Category;
use chart_gate_owners::OwnersError;
use chart_gate_owners::OwnersFile;
use chart_gate_owners::expected_path;

const FULL_OWNERS: &str = r"
chart:
  name: awesome
  shortDescription: A chart to test things with
publicPgpKey: unknown
users:
  - githubUsername: alice
  - githubUsername: bob
vendor:
  label: acme
  name: ACME Inc.
web_catalog_only: false
";

#[test]
fn full_owners_file_parses() {
    let owners = OwnersFile::from_yaml(FULL_OWNERS, Path::new("OWNERS")).unwrap();
    assert_eq!(owners.chart.name, "awesome");
    assert_eq!(owners.vendor.name, "ACME Inc.");
    assert_eq!(owners.vendor.label, "acme");
    assert_eq!(owners.public_pgp_key, "unknown");
    assert!(owners.has_users());
    assert_eq!(owners.users[0].github_username, "alice");
    assert!(!owners.web_catalog_only());
}

#[test]
fn legacy_provider_delivery_alias_counts() {
    let owners =
        OwnersFile::from_yaml("providerDelivery: true\n", Path::new("OWNERS")).unwrap();
    assert!(owners.web_catalog_only());
}

#[test]
fn either_delivery_spelling_wins() {
    let owners = OwnersFile::from_yaml(
        "providerDelivery: false\nweb_catalog_only: true\n",
        Path::new("OWNERS"),
    )
    .unwrap();
    assert!(owners.web_catalog_only());
}

#[test]
fn absent_keys_default_to_empty_values() {
    let owners = OwnersFile::from_yaml("vendor:\n  name: ACME Inc.\n", Path::new("OWNERS")).unwrap();
    assert_eq!(owners.chart.name, "");
    assert_eq!(owners.vendor.label, "");
    assert!(!owners.has_users());
    assert!(!owners.web_catalog_only());
    assert_eq!(owners.public_pgp_key, "");
}

#[test]
fn load_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("OWNERS");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(FULL_OWNERS.as_bytes()).unwrap();

    let owners = OwnersFile::load(&path).unwrap();
    assert_eq!(owners.chart.name, "awesome");
}

#[test]
fn load_reports_the_missing_path() {
    let err = OwnersFile::load(Path::new("/nonexistent/OWNERS")).unwrap_err();
    match err {
        OwnersError::Read {
            path, ..
        } => assert_eq!(path, PathBuf::from("/nonexistent/OWNERS")),
        OwnersError::Parse {
            ..
        } => panic!("expected a read error"),
    }
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let err = OwnersFile::from_yaml("vendor: [not, a, mapping", Path::new("OWNERS")).unwrap_err();
    assert!(matches!(err, OwnersError::Parse { .. }));
}

#[test]
fn expected_path_matches_the_checkout_layout() {
    assert_eq!(
        expected_path(Category::Partners, "acme", "awesome"),
        PathBuf::from("charts/partners/acme/awesome/OWNERS")
    );
}
