//! Core types and errors for the MCP tool generator.
//!
//! This crate holds what the extractor, the synthesizer and the `toolgen`
//! driver share:
//!
//! - [`CommandRecord`] and [`ParameterSpec`], the extracted command definitions
//! - [`InstructionSource`], the instruction lookup capability
//! - [`GeneratorConfig`], the TOML configuration
//! - the [`Error`] hierarchy and CLI exit codes

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod record;
mod source;

pub mod cli;
pub mod identifier;

pub use config::{
    BoundaryRule, GenerationMode, GeneratorConfig, InitializerConfig, OutputConfig, SourceConfig,
    SyncConfig, ValidationConfig,
};
pub use error::{Error, Result};
pub use record::{
    CommandRecord, DEFAULT_DESCRIPTION, DEFAULT_PARAMETER_TYPE, DEFAULT_RETURN_TYPE, ParameterSpec,
};
pub use source::{InstructionSource, NoInstructions};
