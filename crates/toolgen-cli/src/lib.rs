//! Toolgen CLI library.
//!
//! Driver glue around the extractor and the synthesizer: configuration
//! loading, the generation pipeline, auxiliary file sync, and output
//! formatting. Exposed as a library so the commands can be tested.

#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unnecessary_wraps)]

pub mod commands;
pub mod formatters;
pub mod pipeline;
pub mod sync;

pub use pipeline::{GenerationReport, GenerationStatus, Pipeline};
pub use sync::{SyncReport, sync_files};
