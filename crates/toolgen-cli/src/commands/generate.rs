//! Generate command implementation.
//!
//! Runs the full pipeline:
//! 1. Loads the configuration and applies flag overrides
//! 2. Extracts command records from the document
//! 3. Validates them (unless `--no-validate`)
//! 4. Renders the server module
//! 5. Syncs the bundled documents (unless `--no-sync`)
//! 6. Writes the module

use super::common::{load_config, override_document, print_report};
use crate::pipeline::Pipeline;
use anyhow::Result;
use std::path::PathBuf;
use toolgen_core::GenerationMode;
use toolgen_core::cli::{ExitCode, OutputFormat};
use tracing::info;

/// Flag overrides of the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Command document path
    pub document: Option<PathBuf>,
    /// Output module path
    pub output: Option<PathBuf>,
    /// Generation mode name (`lookup`/`embed`, or `a`/`b`)
    pub mode: Option<String>,
    /// Skip the validation pass
    pub no_validate: bool,
    /// Skip the auxiliary file sync
    pub no_sync: bool,
}

/// Runs the generate command.
///
/// Prints a generation report. Returns [`ExitCode::VALIDATION_FAILED`]
/// when validation found errors and nothing was written.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration or a flag value is invalid
/// - The document cannot be read
/// - A function or parameter name is not a valid Python identifier
/// - Sync or the final write fails
///
/// # Examples
///
/// ```no_run
/// use toolgen_cli::commands::generate::{self, GenerateArgs};
/// use toolgen_core::cli::{ExitCode, OutputFormat};
///
/// let args = GenerateArgs {
///     mode: Some("embed".to_string()),
///     no_sync: true,
///     ..GenerateArgs::default()
/// };
/// let code = generate::run(None, args, OutputFormat::Pretty).unwrap();
/// assert_eq!(code, ExitCode::SUCCESS);
/// ```
pub fn run(
    config_path: Option<PathBuf>,
    args: GenerateArgs,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let mut config = load_config(config_path.as_deref())?;

    override_document(&mut config, args.document);
    if let Some(output) = args.output {
        config.output.path = output;
    }
    if let Some(mode) = args.mode {
        config.output.mode = mode.parse::<GenerationMode>()?;
    }
    if args.no_validate {
        config.validation.enabled = false;
    }
    if args.no_sync {
        config.sync.enabled = false;
    }

    info!("Generate command ({} mode)", config.output.mode);

    let report = Pipeline::new(config).run()?;
    print_report(&report, output_format)?;

    Ok(report.exit_code())
}
