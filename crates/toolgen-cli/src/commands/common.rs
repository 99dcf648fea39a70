//! Common utilities shared across CLI commands.
//!
//! Configuration loading and report printing.

use crate::formatters::format_output;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use toolgen_core::GeneratorConfig;
use toolgen_core::cli::OutputFormat;
use tracing::debug;

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "toolgen.toml";

/// Loads the generator configuration.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
/// the working directory is used when present, and built-in defaults
/// otherwise.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails validation.
///
/// # Examples
///
/// ```no_run
/// use toolgen_cli::commands::common::load_config;
///
/// let config = load_config(None).unwrap();
/// assert_eq!(config.source.command_prefix, "/flow-");
/// ```
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                return Ok(GeneratorConfig::default());
            }
            default
        }
    };

    GeneratorConfig::from_file(&path)
        .with_context(|| format!("failed to load config {}", path.display()))
}

/// Replaces the configured document path when `document` is given.
pub fn override_document(config: &mut GeneratorConfig, document: Option<PathBuf>) {
    if let Some(document) = document {
        config.source.document = document;
    }
}

/// Formats `report` and prints it to stdout.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub fn print_report<T: Serialize>(report: &T, output_format: OutputFormat) -> Result<()> {
    let formatted = format_output(report, output_format)?;
    println!("{formatted}");
    Ok(())
}
