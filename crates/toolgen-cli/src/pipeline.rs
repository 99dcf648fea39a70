//! The generation pipeline.
//!
//! Load the document once, extract records, validate them against the same
//! document, render the module, sync the bundled documents, and write the
//! module. A validation error stops the run before anything is written.

use crate::sync::{SyncReport, sync_files};
use anyhow::{Context, Result};
use serde::Serialize;
use toolgen_codegen::{GeneratedArtifact, SynthesisOptions, Synthesizer};
use toolgen_core::cli::ExitCode;
use toolgen_core::{GenerationMode, GeneratorConfig};
use toolgen_extract::{
    Extraction, Extractor, ScanOptions, SkippedSection, SourceDocument, ValidationReport,
    Validator,
};
use tracing::{info, warn};

/// Final status of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// The module was written
    Generated,
    /// Validation found errors; nothing was written
    ValidationFailed,
}

/// Summary of a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Final status
    pub status: GenerationStatus,
    /// Source document path
    pub document: String,
    /// Output module path
    pub output: String,
    /// Generation mode used
    pub mode: GenerationMode,
    /// Records extracted
    pub records: usize,
    /// Tools written to the module, zero when nothing was written
    pub tools_written: usize,
    /// Sections skipped during extraction
    pub skipped: Vec<SkippedSection>,
    /// Validation result, absent when validation is disabled
    pub validation: Option<ValidationReport>,
    /// Why nothing was written, when validation failed
    pub error: Option<String>,
    /// Sync result, absent when sync is disabled or did not run
    pub sync: Option<SyncReport>,
}

impl GenerationReport {
    /// Exit code for this outcome.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.status {
            GenerationStatus::Generated => ExitCode::SUCCESS,
            GenerationStatus::ValidationFailed => ExitCode::VALIDATION_FAILED,
        }
    }
}

/// Runs the extraction, validation and synthesis stages for one configuration.
///
/// # Examples
///
/// ```no_run
/// use toolgen_cli::Pipeline;
/// use toolgen_core::GeneratorConfig;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = GeneratorConfig::from_file("toolgen.toml")?;
/// let report = Pipeline::new(config).run()?;
/// println!("wrote {} tools", report.tools_written);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: GeneratorConfig,
}

impl Pipeline {
    /// Creates a pipeline for `config`.
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Loads the configured document and extracts its records.
    pub fn extract(&self) -> Result<(SourceDocument, Extraction)> {
        let document = &self.config.source.document;
        let extractor = Extractor::new(ScanOptions::from(&self.config.source));
        extractor
            .extract_file(document)
            .with_context(|| format!("failed to extract commands from {}", document.display()))
    }

    /// Validates `extraction` against `document` with the configured thresholds.
    #[must_use]
    pub fn validate(&self, document: &SourceDocument, extraction: &Extraction) -> ValidationReport {
        Validator::from(&self.config.validation).validate(&extraction.records, document)
    }

    /// Renders the module without writing it.
    pub fn synthesize(
        &self,
        document: &SourceDocument,
        extraction: &Extraction,
    ) -> Result<GeneratedArtifact> {
        let synthesizer = Synthesizer::new(SynthesisOptions::from(&self.config))
            .context("failed to initialize synthesizer")?;
        synthesizer
            .synthesize(&extraction.records, document)
            .context("failed to synthesize server module")
    }

    /// Runs the full pipeline.
    ///
    /// Returns a report with [`GenerationStatus::ValidationFailed`] (and
    /// nothing written) when validation finds errors; other failures are
    /// returned as errors.
    pub fn run(&self) -> Result<GenerationReport> {
        let config = &self.config;
        info!(
            "Generating {} from {}",
            config.output.path.display(),
            config.source.document.display()
        );

        let (document, extraction) = self.extract()?;
        if extraction.records.is_empty() {
            warn!("No command records found; the module will only contain the initializer");
        }

        let mut report = GenerationReport {
            status: GenerationStatus::Generated,
            document: config.source.document.display().to_string(),
            output: config.output.path.display().to_string(),
            mode: config.output.mode,
            records: extraction.records.len(),
            tools_written: 0,
            skipped: extraction.skipped.clone(),
            validation: None,
            error: None,
            sync: None,
        };

        if config.validation.enabled {
            let validation = self.validate(&document, &extraction);
            let outcome = validation.clone().into_result();
            report.validation = Some(validation);
            if let Err(err) = outcome {
                warn!("{err}; {} not written", report.output);
                report.status = GenerationStatus::ValidationFailed;
                report.error = Some(err.to_string());
                return Ok(report);
            }
        }

        let artifact = self.synthesize(&document, &extraction)?;

        if config.sync.enabled {
            report.sync = Some(sync_files(&config.sync).context("failed to sync framework files")?);
        }

        artifact
            .write_to(&config.output.path)
            .with_context(|| format!("failed to write {}", config.output.path.display()))?;
        report.tools_written = artifact.unit_count();

        info!(
            "Generated {} tools ({} skipped sections)",
            report.tools_written,
            report.skipped.len()
        );
        Ok(report)
    }
}
