//! Metadata extraction for the MCP tool generator.
//!
//! Reads a markdown command document, splits it into command sections with a
//! two-state line scanner, and decodes each section's metadata block and
//! description into a [`CommandRecord`](toolgen_core::CommandRecord). The
//! [`Validator`] re-checks the records against the document before any code
//! is generated.
//!
//! # Examples
//!
//! ```
//! use toolgen_extract::{Extractor, Validator};
//!
//! let text = r#"## /flow-status
//! <!-- MCP_METADATA
//! category: navigation
//! parameters: []
//! MCP_METADATA_END -->
//!
//! ~~~markdown
//! Read .flow/PLAN.md and report the current phase, task and iteration.
//! ~~~
//! "#;
//!
//! let extractor = Extractor::default();
//! let document = extractor.parse(text);
//! let extraction = extractor.extract(&document);
//! let report = Validator::default().validate(&extraction.records, &document);
//!
//! assert_eq!(extraction.records.len(), 1);
//! assert!(!report.has_errors());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod document;
mod extractor;
mod metadata;
mod scanner;
mod validation;

pub use document::SourceDocument;
pub use extractor::{Extraction, Extractor, SkipReason, SkippedSection};
pub use metadata::{MetadataError, decode_metadata, extract_command_file, extract_description};
pub use scanner::{
    DEFAULT_COMMAND_PREFIX, DEFAULT_INSTRUCTION_LANGUAGE, FenceTracker, LineKind, ScanOptions,
    Section, Segmenter, classify, instruction_block, is_command_heading, segment,
};
pub use validation::{
    DEFAULT_MIN_INSTRUCTION_LENGTH, IssueKind, Severity, ValidationIssue, ValidationReport,
    Validator,
};
