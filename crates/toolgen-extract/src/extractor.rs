//! Command record extraction.
//!
//! Turns the sections of a [`SourceDocument`] into [`CommandRecord`]s. A
//! section without a metadata block is dropped; a section whose block cannot
//! be decoded is logged and skipped. Neither stops extraction.

use crate::document::SourceDocument;
use crate::metadata::{decode_metadata, extract_command_file, extract_description};
use crate::scanner::{ScanOptions, Section};
use serde::Serialize;
use std::path::Path;
use toolgen_core::{CommandRecord, DEFAULT_DESCRIPTION, Error, Result};

/// Why a section produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The section has no metadata block, or the block is empty
    MissingMetadata,
    /// The metadata block or its parameter list could not be decoded
    DecodeFailed {
        /// Decoder message
        message: String,
    },
}

/// A section that did not become a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSection {
    /// Command heading
    pub name: String,
    /// 1-based heading line
    pub line: usize,
    /// Skip reason
    pub reason: SkipReason,
}

impl SkippedSection {
    /// Returns the recoverable decode error for this section, if it failed to decode.
    #[must_use]
    pub fn to_error(&self) -> Option<Error> {
        match &self.reason {
            SkipReason::MissingMetadata => None,
            SkipReason::DecodeFailed { message } => Some(Error::SectionDecode {
                command: self.name.clone(),
                line: self.line,
                message: message.clone(),
            }),
        }
    }
}

/// Result of extracting one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
    /// Records in document order, duplicates included
    pub records: Vec<CommandRecord>,
    /// Sections that produced no record
    pub skipped: Vec<SkippedSection>,
}

impl Extraction {
    /// Number of sections skipped because their metadata failed to decode.
    #[must_use]
    pub fn decode_failures(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::DecodeFailed { .. }))
            .count()
    }
}

/// Metadata extractor.
///
/// # Examples
///
/// ```
/// use toolgen_extract::Extractor;
///
/// let text = r#"## /flow-status
/// <!-- MCP_METADATA
/// category: navigation
/// MCP_METADATA_END -->
///
/// ---
/// description: Show current position
/// ---
/// "#;
///
/// let extractor = Extractor::default();
/// let document = extractor.parse(text);
/// let extraction = extractor.extract(&document);
///
/// assert_eq!(extraction.records.len(), 1);
/// assert_eq!(extraction.records[0].description(), "Show current position");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ScanOptions,
}

impl Extractor {
    /// Creates an extractor with the given scan options.
    #[must_use]
    pub const fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Scan options in use.
    #[must_use]
    pub const fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Loads and segments the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentNotFound`] or [`Error::Io`] if the document
    /// cannot be read.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<SourceDocument> {
        SourceDocument::load(path, &self.options)
    }

    /// Segments in-memory document text.
    #[must_use]
    pub fn parse(&self, text: &str) -> SourceDocument {
        SourceDocument::parse(text, &self.options)
    }

    /// Extracts records from every section of `document`.
    #[must_use]
    pub fn extract(&self, document: &SourceDocument) -> Extraction {
        let mut extraction = Extraction::default();

        for section in document.sections() {
            match build_record(section) {
                Ok(record) => {
                    tracing::debug!("Extracted {} (line {})", record.name(), record.line());
                    extraction.records.push(record);
                }
                Err(reason) => {
                    let skipped = SkippedSection {
                        name: section.name.clone(),
                        line: section.line,
                        reason,
                    };
                    match skipped.to_error() {
                        Some(err) => tracing::warn!("Skipping section: {err}"),
                        None => tracing::debug!("No metadata found for {}", section.name),
                    }
                    extraction.skipped.push(skipped);
                }
            }
        }

        tracing::info!(
            "Found {} commands with metadata ({} sections skipped)",
            extraction.records.len(),
            extraction.skipped.len()
        );
        extraction
    }

    /// Loads `path` and extracts its records.
    ///
    /// # Errors
    ///
    /// Returns an error only if the document cannot be read.
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<(SourceDocument, Extraction)> {
        let document = self.load(path)?;
        let extraction = self.extract(&document);
        Ok((document, extraction))
    }
}

fn build_record(section: &Section) -> std::result::Result<CommandRecord, SkipReason> {
    let metadata = match decode_metadata(&section.body) {
        Ok(Some(metadata)) => metadata,
        Ok(None) => return Err(SkipReason::MissingMetadata),
        Err(e) => {
            return Err(SkipReason::DecodeFailed {
                message: e.to_string(),
            });
        }
    };

    let description =
        extract_description(&section.body).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

    CommandRecord::from_metadata(&section.name, description, metadata)
        .map(|record| {
            record
                .with_command_file(extract_command_file(&section.body))
                .with_line(section.line)
        })
        .map_err(|e| SkipReason::DecodeFailed {
            message: e.to_string(),
        })
}
