//! Python MCP server synthesis.
//!
//! The generated module has three slots:
//!
//! ```text
//! mcp_server.py
//! ├── preamble   # imports, FastMCP instance, response helpers,
//! │              # document reader, lookup cache, initializer tool
//! ├── units      # one @mcp.tool() function per command record
//! └── closing    # main() entry point
//! ```
//!
//! In lookup mode each tool fetches its instructions from the bundled
//! document on first call; in embed mode the instructions are string
//! literals in the module.

pub mod generator;
pub mod types;

pub use generator::Synthesizer;
pub use types::{FailureCause, SynthesisOptions};
