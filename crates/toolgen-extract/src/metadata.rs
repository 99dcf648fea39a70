//! Per-section field decoding.
//!
//! A command section carries three optional fields:
//!
//! ```markdown
//! <!-- MCP_METADATA
//! function_name: flow_status
//! category: navigation
//! parameters: []
//! MCP_METADATA_END -->
//!
//! **File**: `flow-status.md`
//!
//! ---
//! description: Show current position in the plan
//! ---
//! ```

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use thiserror::Error;

static METADATA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!-- MCP_METADATA\n(.*?)\nMCP_METADATA_END -->").expect("valid regex")
});
static DESCRIPTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)---\ndescription: (.+?)\n---").expect("valid regex"));
static COMMAND_FILE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*\*File\*\*:\s*`([\w.-]+\.md)`").expect("valid regex")
});

/// Errors decoding a metadata block.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The payload is not valid YAML or contains values JSON cannot hold.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The payload decoded to something other than a mapping.
    #[error("expected a mapping, found {found}")]
    NotAMapping {
        /// Kind of value found
        found: &'static str,
    },
}

/// Decodes the first metadata block in `body`.
///
/// Returns `Ok(None)` when there is no block or the block is empty.
///
/// # Errors
///
/// Returns [`MetadataError`] when the payload is not a YAML mapping.
///
/// # Examples
///
/// ```
/// use toolgen_extract::decode_metadata;
///
/// let body = "<!-- MCP_METADATA\ncategory: x\nparameters: []\nMCP_METADATA_END -->\n";
/// let metadata = decode_metadata(body).unwrap().unwrap();
/// assert_eq!(metadata["category"], "x");
///
/// assert!(decode_metadata("no block here").unwrap().is_none());
/// ```
pub fn decode_metadata(body: &str) -> Result<Option<Map<String, Value>>, MetadataError> {
    let Some(captures) = METADATA_REGEX.captures(body) else {
        return Ok(None);
    };

    let payload = &captures[1];
    if payload.trim().is_empty() {
        return Ok(None);
    }

    match serde_yaml::from_str::<Value>(payload)? {
        Value::Object(map) if map.is_empty() => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        other => Err(MetadataError::NotAMapping {
            found: value_kind(&other),
        }),
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Extracts the frontmatter-style description, trimmed.
///
/// # Examples
///
/// ```
/// use toolgen_extract::extract_description;
///
/// let body = "---\ndescription: Show status \n---\n";
/// assert_eq!(extract_description(body).as_deref(), Some("Show status"));
/// assert!(extract_description("description: loose").is_none());
/// ```
#[must_use]
pub fn extract_description(body: &str) -> Option<String> {
    DESCRIPTION_REGEX
        .captures(body)
        .map(|captures| captures[1].trim().to_string())
}

/// Extracts the exported command file name from a `**File**:` line.
///
/// # Examples
///
/// ```
/// use toolgen_extract::extract_command_file;
///
/// let body = "**File**: `flow-status.md`\n";
/// assert_eq!(extract_command_file(body).as_deref(), Some("flow-status.md"));
/// ```
#[must_use]
pub fn extract_command_file(body: &str) -> Option<String> {
    COMMAND_FILE_REGEX
        .captures(body)
        .map(|captures| captures[1].to_string())
}
