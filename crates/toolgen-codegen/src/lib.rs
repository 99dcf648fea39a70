//! Code generation for command-documented MCP servers.
//!
//! Renders a list of [`toolgen_core::CommandRecord`]s into a Python module
//! exposing one MCP tool per command, using Handlebars templates.
//!
//! # Examples
//!
//! ```
//! use toolgen_codegen::{SynthesisOptions, Synthesizer};
//! use toolgen_core::NoInstructions;
//!
//! let synthesizer = Synthesizer::new(SynthesisOptions::default()).unwrap();
//! let artifact = synthesizer.synthesize(&[], &NoInstructions).unwrap();
//!
//! assert_eq!(artifact.unit_count(), 0);
//! assert!(artifact.contents().contains("mcp = FastMCP(\"Flow\")"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod common;
pub mod server;
pub mod template_engine;

pub use common::artifact::{GeneratedArtifact, GeneratedUnit};
pub use server::{FailureCause, SynthesisOptions, Synthesizer};
pub use template_engine::TemplateEngine;
