// crates/chart-gate-github/src/lib.rs
// ============================================================================
// Module: Chart Gate GitHub Collaborators
// Description: GitHub API client, Helm index fetcher, and Actions outputs.
// Purpose: Provide the external collaborators one certification run needs:
// the PR changed-file listing, duplicate-release detection, and CI
// annotations.
// Dependencies: chart-gate-core, reqwest, serde, serde_yaml, thiserror,
// tracing
// ============================================================================

//! ## Overview
//! Everything network- or environment-facing lives in this crate so the core
//! stays pure. Each certification run is independent and stateless: state is
//! read fresh from the GitHub API every time, a non-2xx response is fatal,
//! and nothing is retried.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod actions;
pub mod client;
pub mod index;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use actions::OutputError;
pub use actions::append_output;
pub use actions::set_output;
pub use client::ALLOW_CI_CHANGES_LABEL;
pub use client::GithubError;
pub use client::PullRequestClient;
pub use client::PullRequestClientConfig;
pub use index::HelmIndex;
pub use index::IndexEntry;
pub use index::IndexError;
pub use index::download_index;
