// crates/chart-gate-github/tests/index.rs
// ============================================================================
// Module: Helm Index Tests
// Description: Index parsing and duplicate-release queries.
// ============================================================================
//! ## Overview
//! Exercises the reduced index data model, the empty-index fallback, and
//! fetching over a local HTTP server.

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

use chart_gate_github::HelmIndex;
use chart_gate_github::PullRequestClient;
use chart_gate_github::PullRequestClientConfig;
use chart_gate_github::download_index;
use tiny_http::Response;
use tiny_http::Server;

const SAMPLE_INDEX: &str = r"
apiVersion: v1
entries:
  acme-awesome:
    - version: 1.41.0
    - version: 1.42.0
  acme-other:
    - version: 0.1.0
";

#[test]
fn parsed_index_answers_version_queries() {
    let index = HelmIndex::from_yaml(SAMPLE_INDEX).unwrap();
    assert!(index.contains_version("acme-awesome", "1.42.0"));
    assert!(!index.contains_version("acme-awesome", "1.43.0"));
    assert!(!index.contains_version("missing-entry", "1.0.0"));
}

#[test]
fn empty_index_contains_nothing() {
    let index = HelmIndex::empty();
    assert_eq!(index.api_version, "v1");
    assert!(!index.contains_version("acme-awesome", "1.42.0"));
}

#[test]
fn download_parses_a_published_index() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let base = format!("http://{}", server.server_addr().to_ip().unwrap());
    let handle = std::thread::spawn(move || {
        let request = server.recv().unwrap();
        assert!(request.url().ends_with("/charts-repo/gh-pages/index.yaml"));
        request.respond(Response::from_string(SAMPLE_INDEX)).unwrap();
    });

    let client = PullRequestClient::new(PullRequestClientConfig {
        raw_base: base,
        ..PullRequestClientConfig::default()
    })
    .unwrap();
    let index = download_index(&client, "charts-repo", "gh-pages").unwrap();
    handle.join().unwrap();
    assert!(index.contains_version("acme-awesome", "1.42.0"));
}

#[test]
fn missing_index_degrades_to_the_empty_index() {
    let server = Server::http("127.0.0.1:0").unwrap();
    let base = format!("http://{}", server.server_addr().to_ip().unwrap());
    let handle = std::thread::spawn(move || {
        let request = server.recv().unwrap();
        request.respond(Response::from_string("Not Found").with_status_code(404)).unwrap();
    });

    let client = PullRequestClient::new(PullRequestClientConfig {
        raw_base: base,
        ..PullRequestClientConfig::default()
    })
    .unwrap();
    let index = download_index(&client, "charts-repo", "gh-pages").unwrap();
    handle.join().unwrap();
    assert_eq!(index, HelmIndex::empty());
}
