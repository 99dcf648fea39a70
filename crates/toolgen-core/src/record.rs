//! Command records extracted from the command document.
//!
//! A [`CommandRecord`] is the decoded metadata mapping of one command section
//! plus its name and description. Typed views (`parameters`, `returns`,
//! `function_identifier`) are computed from that mapping; nothing else is
//! normalized.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use toolgen_core::CommandRecord;
//!
//! let metadata = json!({
//!     "category": "planning",
//!     "parameters": [
//!         {"name": "title", "type": "str", "required": true, "description": "Task title"}
//!     ]
//! });
//!
//! let record = CommandRecord::from_metadata(
//!     "/flow-task-add",
//!     "Add a task to the current phase",
//!     metadata.as_object().unwrap().clone(),
//! )
//! .unwrap();
//!
//! assert_eq!(record.function_identifier(), "flow_task_add");
//! assert_eq!(record.parameters().len(), 1);
//! assert_eq!(record.returns(), "dict[str, Any]");
//! ```

use crate::identifier::derive_identifier;
use crate::{Error, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Description used when a section carries no description frontmatter.
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// Return annotation used when metadata declares none.
pub const DEFAULT_RETURN_TYPE: &str = "dict[str, Any]";

/// Parameter type used when a parameter declares none.
pub const DEFAULT_PARAMETER_TYPE: &str = "str";

/// One parameter of a generated tool function.
///
/// Decoded from an entry of the `parameters` metadata sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Parameter name as it appears in the signature
    pub name: String,

    /// Python type annotation
    #[serde(rename = "type", default = "default_parameter_type")]
    pub type_name: String,

    /// Whether the caller must supply the parameter
    ///
    /// Besides booleans, the YAML 1.1 words `yes`/`no`/`on`/`off` (and
    /// their capitalized forms) are accepted.
    #[serde(default = "default_required", deserialize_with = "deserialize_flag")]
    pub required: bool,

    /// Declared default; `Some(Value::Null)` when the document says `default: null`
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,

    /// Argument description for the docstring
    #[serde(default)]
    pub description: String,
}

impl ParameterSpec {
    /// Returns `true` if the declared type is the textual type `str`.
    #[must_use]
    pub fn is_textual(&self) -> bool {
        self.type_name.trim() == DEFAULT_PARAMETER_TYPE
    }

    /// Returns `true` if the parameter declares a default value.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

fn default_parameter_type() -> String {
    DEFAULT_PARAMETER_TYPE.to_string()
}

const fn default_required() -> bool {
    true
}

// YAML 1.1 resolves these words to booleans; YAML 1.2 keeps them as strings.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(flag) => Ok(flag),
        Value::String(word) => match word.as_str() {
            "yes" | "Yes" | "YES" | "on" | "On" | "ON" | "true" | "True" | "TRUE" => Ok(true),
            "no" | "No" | "NO" | "off" | "Off" | "OFF" | "false" | "False" | "FALSE" => Ok(false),
            _ => Err(D::Error::custom(format!(
                "invalid value: string \"{word}\", expected a boolean"
            ))),
        },
        other => Err(D::Error::custom(format!(
            "invalid type: {other}, expected a boolean"
        ))),
    }
}

// Keeps an explicit `null` distinguishable from an absent key.
fn deserialize_present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// One command definition extracted from the source document.
///
/// Immutable once built; the synthesizer only reads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandRecord {
    name: String,
    description: String,
    metadata: Map<String, Value>,
    parameters: Vec<ParameterSpec>,
    command_file: Option<String>,
    line: usize,
}

impl CommandRecord {
    /// Builds a record from a decoded metadata mapping.
    ///
    /// A `description` string inside `metadata` takes precedence over the
    /// frontmatter description, since metadata keys are merged last.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if `parameters` is present but is
    /// not a sequence of parameter mappings.
    pub fn from_metadata(
        name: impl Into<String>,
        description: impl Into<String>,
        metadata: Map<String, Value>,
    ) -> Result<Self> {
        let name = name.into();
        let parameters = decode_parameters(&name, metadata.get("parameters"))?;
        let description = metadata
            .get("description")
            .and_then(Value::as_str)
            .map_or_else(|| description.into(), str::to_string);

        Ok(Self {
            name,
            description,
            metadata,
            parameters,
            command_file: None,
            line: 0,
        })
    }

    /// Attaches the command file name found in the section.
    #[must_use]
    pub fn with_command_file(mut self, command_file: Option<String>) -> Self {
        self.command_file = command_file;
        self
    }

    /// Attaches the 1-based line number of the section heading.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Command name, equal to the section heading text.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Single-line summary.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Decoded metadata block, exactly as found in the document.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Looks up a raw metadata value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Declared parameters in document order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Name of the generated function: `function_name` or derived from the command name.
    #[must_use]
    pub fn function_identifier(&self) -> String {
        self.metadata
            .get("function_name")
            .and_then(Value::as_str)
            .map_or_else(|| derive_identifier(&self.name), str::to_string)
    }

    /// Return annotation of the generated function.
    #[must_use]
    pub fn returns(&self) -> &str {
        self.metadata
            .get("returns")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_RETURN_TYPE)
    }

    /// Opaque category label.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.metadata.get("category").and_then(Value::as_str)
    }

    /// Plan operations (`READ`, `WRITE`, ...) in declared order.
    #[must_use]
    pub fn plan_operations(&self) -> Vec<&str> {
        self.metadata
            .get("plan_operations")
            .and_then(Value::as_array)
            .map(|ops| ops.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// File name the command's instructions are exported to, if declared.
    #[must_use]
    pub fn command_file(&self) -> Option<&str> {
        self.command_file.as_deref()
    }

    /// 1-based heading line, `0` when the record was built outside a document.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// The merged mapping: `command_name` and `description`, then every metadata key.
    #[must_use]
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut mapping = Map::new();
        mapping.insert("command_name".to_string(), Value::String(self.name.clone()));
        mapping.insert(
            "description".to_string(),
            Value::String(self.description.clone()),
        );
        for (key, value) in &self.metadata {
            mapping.insert(key.clone(), value.clone());
        }
        mapping
    }
}

fn decode_parameters(command: &str, value: Option<&Value>) -> Result<Vec<ParameterSpec>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                serde_json::from_value(item.clone()).map_err(|e| Error::SerializationError {
                    message: format!("invalid parameter in {command}: {e}"),
                    source: Some(e),
                })
            })
            .collect(),
        Some(other) => Err(Error::SerializationError {
            message: format!("parameters of {command} must be a sequence, found {other}"),
            source: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_defaults_when_metadata_is_minimal() {
        let record =
            CommandRecord::from_metadata("/flow-status", DEFAULT_DESCRIPTION, Map::new()).unwrap();

        assert_eq!(record.name(), "/flow-status");
        assert_eq!(record.description(), DEFAULT_DESCRIPTION);
        assert_eq!(record.function_identifier(), "flow_status");
        assert_eq!(record.returns(), DEFAULT_RETURN_TYPE);
        assert!(record.parameters().is_empty());
        assert!(record.category().is_none());
        assert!(record.plan_operations().is_empty());
    }

    #[test]
    fn test_declared_function_name_wins() {
        let record = CommandRecord::from_metadata(
            "/flow-task-add",
            "Add task",
            metadata(json!({"function_name": "add_task"})),
        )
        .unwrap();

        assert_eq!(record.function_identifier(), "add_task");
    }

    #[test]
    fn test_parameter_defaults_applied() {
        let record = CommandRecord::from_metadata(
            "/flow-task-add",
            "Add task",
            metadata(json!({
                "parameters": [
                    {"name": "title"},
                    {"name": "priority", "type": "int", "required": false, "default": 3},
                    {"name": "note", "required": false, "default": null}
                ]
            })),
        )
        .unwrap();

        let params = record.parameters();
        assert_eq!(params.len(), 3);

        assert_eq!(params[0].type_name, "str");
        assert!(params[0].required);
        assert!(params[0].default.is_none());
        assert!(params[0].is_textual());

        assert_eq!(params[1].default, Some(json!(3)));
        assert!(!params[1].is_textual());

        // explicit null is kept
        assert_eq!(params[2].default, Some(Value::Null));
    }

    #[test]
    fn test_parameters_must_be_a_sequence() {
        let result = CommandRecord::from_metadata(
            "/flow-x",
            "x",
            metadata(json!({"parameters": "title"})),
        );
        assert!(matches!(result, Err(Error::SerializationError { .. })));
    }

    #[test]
    fn test_parameter_without_name_is_rejected() {
        let result = CommandRecord::from_metadata(
            "/flow-x",
            "x",
            metadata(json!({"parameters": [{"type": "str"}]})),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_metadata_description_overrides_frontmatter() {
        let record = CommandRecord::from_metadata(
            "/flow-x",
            "from frontmatter",
            metadata(json!({"description": "from metadata"})),
        )
        .unwrap();
        assert_eq!(record.description(), "from metadata");
    }

    #[test]
    fn test_to_mapping_merges_name_and_description() {
        let record = CommandRecord::from_metadata(
            "cmd-alpha",
            "does alpha",
            metadata(json!({"category": "x", "parameters": []})),
        )
        .unwrap();

        let mapping = record.to_mapping();
        assert_eq!(mapping["command_name"], json!("cmd-alpha"));
        assert_eq!(mapping["description"], json!("does alpha"));
        assert_eq!(mapping["category"], json!("x"));
        assert_eq!(mapping["parameters"], json!([]));
        assert_eq!(mapping.len(), 4);
    }

    #[test]
    fn test_plan_operations_skip_non_strings() {
        let record = CommandRecord::from_metadata(
            "/flow-x",
            "x",
            metadata(json!({"plan_operations": ["READ", 3, "WRITE"]})),
        )
        .unwrap();
        assert_eq!(record.plan_operations(), vec!["READ", "WRITE"]);
    }

    #[test]
    fn test_builder_attachments() {
        let record = CommandRecord::from_metadata("/flow-x", "x", Map::new())
            .unwrap()
            .with_command_file(Some("flow-x.md".to_string()))
            .with_line(12);
        assert_eq!(record.command_file(), Some("flow-x.md"));
        assert_eq!(record.line(), 12);
    }

    #[test]
    fn test_required_accepts_yaml_1_1_words() {
        let record = CommandRecord::from_metadata(
            "/flow-x",
            "x",
            metadata(json!({"parameters": [
                {"name": "a", "required": "yes"},
                {"name": "b", "required": "Off", "default": "z"},
                {"name": "c", "required": "TRUE"}
            ]})),
        )
        .unwrap();
        let flags: Vec<bool> = record.parameters().iter().map(|p| p.required).collect();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn test_required_rejects_other_words() {
        let err = CommandRecord::from_metadata(
            "/flow-x",
            "x",
            metadata(json!({"parameters": [{"name": "a", "required": "maybe"}]})),
        )
        .unwrap_err();
        assert!(err.to_string().contains("maybe"));

        let err = CommandRecord::from_metadata(
            "/flow-x",
            "x",
            metadata(json!({"parameters": [{"name": "a", "required": 1}]})),
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected a boolean"));
    }
}
