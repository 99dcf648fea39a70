//! Validate command implementation.
//!
//! Extracts the records and runs the validation pass without generating
//! anything.

use super::common::{load_config, override_document, print_report};
use crate::pipeline::Pipeline;
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use toolgen_core::cli::{ExitCode, OutputFormat};
use toolgen_extract::{SkippedSection, ValidationReport};

/// Result of a validation run.
#[derive(Debug, Serialize)]
struct ValidationSummary {
    /// Document path
    document: String,
    /// Records extracted
    records: usize,
    /// Sections skipped during extraction
    skipped: Vec<SkippedSection>,
    /// Validation findings
    validation: ValidationReport,
}

/// Runs the validate command.
///
/// Returns [`ExitCode::VALIDATION_FAILED`] if any error-severity issue was
/// found. Warnings never change the exit code.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the document cannot
/// be read.
pub fn run(
    config_path: Option<PathBuf>,
    document: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let mut config = load_config(config_path.as_deref())?;
    override_document(&mut config, document);

    let pipeline = Pipeline::new(config);
    let (document, extraction) = pipeline.extract()?;
    let validation = pipeline.validate(&document, &extraction);

    let exit_code = match validation.clone().into_result() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::warn!("{err}");
            ExitCode::for_error(&err)
        }
    };

    let summary = ValidationSummary {
        document: pipeline.config().source.document.display().to_string(),
        records: extraction.records.len(),
        skipped: extraction.skipped,
        validation,
    };
    print_report(&summary, output_format)?;

    Ok(exit_code)
}
