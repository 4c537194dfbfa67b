// crates/chart-gate-cli/src/main.rs
// ============================================================================
// Module: Chart Gate CLI Entry Point
// Description: Certification driver for one pull request inspection.
// Purpose: Build the submission, evaluate verdicts, write Actions outputs
// and the submission artifact, and map outcomes to exit codes CI branches
// on.
// Dependencies: chart-gate-core, chart-gate-github, chart-gate-owners,
// clap, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! The `chart-gate` binary handles exactly one pull request per invocation
//! and exits. All decision making lives in the library crates; this driver
//! sequences the collaborators and owns the exit-code contract:
//!
//! - `0` — the PR passed every check.
//! - `10` — the file set is structurally invalid (two charts, a bad
//!   version, a misnamed tarball); construction was aborted.
//! - `20` — construction succeeded but a validation rule failed; the
//!   message was written to the Actions outputs for the PR comment.
//!
//! Network failures are fatal and reported with the generic failure code,
//! never retried.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod checkpr;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use chart_gate_core::RemovedFilePolicy;
use chart_gate_core::Submission;
use chart_gate_core::SubmissionBuilder;
use chart_gate_github::ALLOW_CI_CHANGES_LABEL;
use chart_gate_github::OutputError;
use chart_gate_github::PullRequestClient;
use chart_gate_github::PullRequestClientConfig;
use chart_gate_github::download_index;
use chart_gate_github::set_output;
use chart_gate_owners::OwnersFile;
use chart_gate_owners::expected_path;
use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::checkpr::craft_owners_error_message;
use crate::checkpr::craft_pr_content_error_message;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Exit code for structural submission-construction failures.
const EXIT_STRUCTURAL: u8 = 10;

/// Exit code for validation-rule failures.
const EXIT_VALIDATION: u8 = 20;

/// Environment variable carrying the bot token.
const BOT_TOKEN_ENV: &str = "BOT_TOKEN";

/// Fallback environment variable carrying the workflow token.
const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "chart-gate", disable_help_subcommand = true)]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect one pull request and emit classification outputs.
    CheckPr(CheckPrCommand),
}

/// Arguments for the check-pr command.
#[derive(Args, Debug)]
struct CheckPrCommand {
    /// API URL for the pull request.
    #[arg(short = 'u', long)]
    api_url: String,
    /// Git repository holding the published index and release tags.
    #[arg(short = 'r', long)]
    repository: String,
    /// Branch the published index.yaml lives on.
    #[arg(short = 'b', long, default_value = "gh-pages")]
    index_branch: String,
    /// Path to write the submission artifact JSON.
    #[arg(short = 'o', long)]
    output: PathBuf,
    /// Local checkout used to read the chart's OWNERS file.
    #[arg(long, default_value = ".")]
    checkout: PathBuf,
    /// Require this PR to be a certification submission; bundled OWNERS
    /// changes then fail the content check as well.
    #[arg(long, action = ArgAction::SetTrue)]
    require_certification: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for fatal driver failures.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
    match run() {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::CheckPr(command) => command_check_pr(&command),
    }
}

// ============================================================================
// SECTION: Check PR Command
// ============================================================================

/// Executes the `check-pr` command for one pull request.
fn command_check_pr(command: &CheckPrCommand) -> CliResult<ExitCode> {
    let client = PullRequestClient::new(PullRequestClientConfig {
        token: bot_token(),
        ..PullRequestClientConfig::default()
    })
    .map_err(|err| CliError::new(err.to_string()))?;

    // CI-maintenance PRs are exempt from chart-content checks.
    if client
        .has_label(&command.api_url, ALLOW_CI_CHANGES_LABEL)
        .map_err(|err| CliError::new(err.to_string()))?
    {
        info!(label = ALLOW_CI_CHANGES_LABEL, "label present, skipping content checks");
        return Ok(ExitCode::SUCCESS);
    }

    let files = client
        .changed_files(&command.api_url)
        .map_err(|err| CliError::new(err.to_string()))?;

    let submission = match SubmissionBuilder::new()
        .removed_files(RemovedFilePolicy::Exclude)
        .build(&files)
    {
        Ok(submission) => submission,
        Err(err) => {
            let message = err.to_string();
            info!("{message}");
            emit_output("pr-content-error-message", &message);
            return Ok(ExitCode::from(EXIT_STRUCTURAL));
        }
    };

    let owners_error_message = craft_owners_error_message(&submission);
    if let Some(message) = &owners_error_message {
        info!("{message}");
        emit_output("owners-error-message", message);
    }

    let pr_content_error_message =
        content_error_message(&client, command, &submission)?;
    if let Some(message) = &pr_content_error_message {
        info!("{message}");
        emit_output("pr-content-error-message", message);
    }

    emit_chart_outputs(&submission, &command.checkout);
    write_artifact(&command.output, &submission)?;

    if owners_error_message.is_some() || pr_content_error_message.is_some() {
        return Ok(ExitCode::from(EXIT_VALIDATION));
    }
    Ok(ExitCode::SUCCESS)
}

/// Evaluates the certification content check, including duplicate-release
/// lookups when a chart identity is registered.
fn content_error_message(
    client: &PullRequestClient,
    command: &CheckPrCommand,
    submission: &Submission,
) -> CliResult<Option<String>> {
    let ignore_owners = !command.require_certification;
    let (index, tag_exists) = if let Some(chart) = &submission.chart {
        let branch = command.index_branch.rsplit('/').next().unwrap_or("gh-pages");
        let index = download_index(client, &command.repository, branch)
            .map_err(|err| CliError::new(err.to_string()))?;
        let tag_exists = client
            .release_tag_exists(&command.repository, &chart.release_tag())
            .map_err(|err| CliError::new(err.to_string()))?;
        (Some(index), tag_exists)
    } else {
        (None, false)
    };
    Ok(craft_pr_content_error_message(
        submission,
        index.as_ref(),
        tag_exists,
        ignore_owners,
    ))
}

// ============================================================================
// SECTION: Outputs and Artifact
// ============================================================================

/// Writes the chart-derived Actions outputs consumed by later workflow
/// steps.
fn emit_chart_outputs(submission: &Submission, checkout: &Path) {
    let Some(chart) = &submission.chart else {
        return;
    };
    emit_output("chart_entry_name", &chart.entry_name());
    emit_output("release_tag", &chart.release_tag());
    emit_output("vendor_type", chart.category.vendor_label());
    emit_output("category", chart.category.vendor_label());
    let web_catalog_only = web_catalog_only(submission, checkout);
    emit_output("web_catalog_only", if web_catalog_only { "true" } else { "false" });
}

/// Reads the chart's OWNERS file from the local checkout to determine the
/// delivery mode. A missing or unreadable OWNERS file means catalog
/// delivery.
fn web_catalog_only(submission: &Submission, checkout: &Path) -> bool {
    let Some(chart) = &submission.chart else {
        return false;
    };
    let owners_path =
        checkout.join(expected_path(chart.category, &chart.organization, &chart.name));
    match OwnersFile::load(&owners_path) {
        Ok(owners) => owners.web_catalog_only(),
        Err(err) => {
            info!("no readable OWNERS file in checkout: {err}");
            false
        }
    }
}

/// Writes one Actions output, tolerating a non-Actions environment.
fn emit_output(name: &str, value: &str) {
    match set_output(name, value) {
        Ok(()) => {}
        Err(OutputError::Unset) => {
            warn!(name, "GITHUB_OUTPUT not set, skipping output");
        }
        Err(err) => {
            warn!(name, "failed to write output: {err}");
        }
    }
}

/// Saves the JSON representation of the submission for later workflow jobs.
fn write_artifact(path: &Path, submission: &Submission) -> CliResult<()> {
    let data = serde_json::to_vec_pretty(submission)
        .map_err(|err| CliError::new(format!("failed to encode submission artifact: {err}")))?;
    fs::write(path, data).map_err(|err| {
        CliError::new(format!("failed to write submission artifact to {}: {err}", path.display()))
    })
}

// ============================================================================
// SECTION: Environment
// ============================================================================

/// Resolves the API token from the bot or workflow environment.
fn bot_token() -> Option<String> {
    std::env::var(BOT_TOKEN_ENV).ok().or_else(|| std::env::var(GITHUB_TOKEN_ENV).ok())
}
