//! Command implementations for the toolgen CLI.
//!
//! Each command loads the configuration, applies its flag overrides, runs
//! its stage of the pipeline, and prints a report in the requested format.

pub mod common;
pub mod completions;
pub mod export;
pub mod generate;
pub mod list;
pub mod sync;
pub mod validate;
