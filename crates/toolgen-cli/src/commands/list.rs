//! List command implementation.
//!
//! Prints every extracted command with its category and parameter count,
//! followed by a per-category summary.

use super::common::{load_config, override_document, print_report};
use crate::pipeline::Pipeline;
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use toolgen_core::CommandRecord;
use toolgen_core::cli::{ExitCode, OutputFormat};
use toolgen_extract::SkippedSection;

const UNKNOWN_CATEGORY: &str = "unknown";

/// One listed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSummary {
    /// Command name
    pub name: String,
    /// Generated function name
    pub function_name: String,
    /// Category, `unknown` when undeclared
    pub category: String,
    /// Number of declared parameters
    pub parameters: usize,
    /// Heading line in the document
    pub line: usize,
}

impl From<&CommandRecord> for CommandSummary {
    fn from(record: &CommandRecord) -> Self {
        Self {
            name: record.name().to_string(),
            function_name: record.function_identifier(),
            category: record.category().unwrap_or(UNKNOWN_CATEGORY).to_string(),
            parameters: record.parameters().len(),
            line: record.line(),
        }
    }
}

/// Command listing with category totals.
#[derive(Debug, Clone, Serialize)]
pub struct CommandListing {
    /// Document path
    pub document: String,
    /// Total commands with metadata
    pub total: usize,
    /// Commands in document order
    pub commands: Vec<CommandSummary>,
    /// Command count per category, sorted by category
    pub categories: BTreeMap<String, usize>,
    /// Sections skipped during extraction
    pub skipped: Vec<SkippedSection>,
}

impl CommandListing {
    /// Builds the listing of `records`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::Map;
    /// use toolgen_cli::commands::list::CommandListing;
    /// use toolgen_core::CommandRecord;
    ///
    /// let record = CommandRecord::from_metadata("/flow-status", "Status", Map::new()).unwrap();
    /// let listing = CommandListing::new("SLASH_COMMANDS.md", &[record], Vec::new());
    ///
    /// assert_eq!(listing.total, 1);
    /// assert_eq!(listing.categories["unknown"], 1);
    /// ```
    #[must_use]
    pub fn new(
        document: impl Into<String>,
        records: &[CommandRecord],
        skipped: Vec<SkippedSection>,
    ) -> Self {
        let commands: Vec<CommandSummary> = records.iter().map(CommandSummary::from).collect();

        let mut categories = BTreeMap::new();
        for command in &commands {
            *categories.entry(command.category.clone()).or_insert(0) += 1;
        }

        Self {
            document: document.into(),
            total: commands.len(),
            commands,
            categories,
            skipped,
        }
    }
}

/// Runs the list command.
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
    let (_, extraction) = pipeline.extract()?;

    let listing = CommandListing::new(
        pipeline.config().source.document.display().to_string(),
        &extraction.records,
        extraction.skipped,
    );
    print_report(&listing, output_format)?;

    Ok(ExitCode::SUCCESS)
}
