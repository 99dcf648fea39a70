//! Sync command implementation.
//!
//! Copies the configured framework files without generating anything.

use super::common::{load_config, print_report};
use crate::sync::sync_files;
use anyhow::{Context, Result};
use std::path::PathBuf;
use toolgen_core::cli::{ExitCode, OutputFormat};

/// Runs the sync command.
///
/// Runs even when `sync.enabled` is false in the configuration. Missing
/// individual files are listed in the report but do not fail the command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the source directory
/// does not exist, or a copy fails.
pub fn run(config_path: Option<PathBuf>, output_format: OutputFormat) -> Result<ExitCode> {
    let config = load_config(config_path.as_deref())?;

    let report = sync_files(&config.sync).context("failed to sync framework files")?;
    print_report(&report, output_format)?;

    Ok(ExitCode::SUCCESS)
}
