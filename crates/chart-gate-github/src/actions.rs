// crates/chart-gate-github/src/actions.rs
// ============================================================================
// Module: Actions Outputs
// Description: Key/value annotations for the GitHub Actions environment.
// Purpose: Let subsequent workflow steps branch on classification results
// and error messages.
// Dependencies: thiserror, tracing
// ============================================================================

//! ## Overview
//! Workflow steps communicate through the file named by `GITHUB_OUTPUT`:
//! one `name=value` line per annotation, or the heredoc form for values
//! containing newlines. Keys written by the certification driver include
//! `chart_entry_name`, `release_tag`, `vendor_type`, `category`,
//! `web_catalog_only`, `pr-content-error-message`, and
//! `owners-error-message`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the Actions output file.
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Heredoc delimiter used for multi-line output values.
const MULTILINE_DELIMITER: &str = "CHART_GATE_EOF";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure writing an Actions output annotation.
#[derive(Debug, Error)]
pub enum OutputError {
    /// `GITHUB_OUTPUT` is not set; the process is not running under Actions.
    #[error("GITHUB_OUTPUT is not set")]
    Unset,
    /// The output file could not be written.
    #[error("failed to write output {name} to {path}: {source}")]
    Write {
        /// Output key being written.
        name: String,
        /// Output file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// SECTION: Output Writing
// ============================================================================

/// Appends one `name=value` annotation to the output file at `path`.
///
/// Values containing newlines use the heredoc form so they round-trip
/// through the Actions environment intact.
///
/// # Errors
///
/// Returns [`OutputError::Write`] when the file cannot be appended.
pub fn append_output(path: &Path, name: &str, value: &str) -> Result<(), OutputError> {
    let mut file =
        OpenOptions::new().create(true).append(true).open(path).map_err(|source| {
            OutputError::Write {
                name: name.to_string(),
                path: path.to_path_buf(),
                source,
            }
        })?;
    let line = if value.contains('\n') {
        format!("{name}<<{MULTILINE_DELIMITER}\n{value}\n{MULTILINE_DELIMITER}\n")
    } else {
        format!("{name}={value}\n")
    };
    file.write_all(line.as_bytes()).map_err(|source| OutputError::Write {
        name: name.to_string(),
        path: path.to_path_buf(),
        source,
    })?;
    debug!(name, value, "set github output");
    Ok(())
}

/// Appends one annotation to the file named by `GITHUB_OUTPUT`.
///
/// # Errors
///
/// Returns [`OutputError::Unset`] outside an Actions environment and
/// [`OutputError::Write`] when the file cannot be appended.
pub fn set_output(name: &str, value: &str) -> Result<(), OutputError> {
    let path = env::var_os(GITHUB_OUTPUT_ENV).ok_or(OutputError::Unset)?;
    append_output(Path::new(&path), name, value)
}
