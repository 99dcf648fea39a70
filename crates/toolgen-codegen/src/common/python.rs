//! Python source text helpers.
//!
//! Everything user-authored that ends up in generated code passes through one
//! of these functions: string literals, docstring text, comments, and
//! default values. Templates only place the results.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use toolgen_codegen::common::python::{python_literal, string_literal};
//!
//! assert_eq!(string_literal("say \"hi\"\n"), r#""say \"hi\"\n""#);
//! assert_eq!(python_literal(&json!({"ops": ["READ"], "flag": true, "n": null})),
//!            r#"{"flag": True, "n": None, "ops": ["READ"]}"#);
//! ```

use serde_json::Value;
use std::fmt::Write;
use toolgen_core::ParameterSpec;

/// Renders `text` as a double-quoted Python string literal.
#[must_use]
pub fn string_literal(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('"');
    for c in text.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(literal, "\\x{:02x}", u32::from(c));
            }
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// Renders a decoded metadata value as a Python literal.
///
/// Mappings keep their key order, which is sorted for decoded metadata.
#[must_use]
pub fn python_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string_literal(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(python_literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", string_literal(key), python_literal(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Escapes text placed inside a `"""` docstring indented by four spaces.
///
/// Continuation lines are indented to match the first line.
#[must_use]
pub fn docstring_text(text: &str) -> String {
    text.trim()
        .replace('\\', "\\\\")
        .replace("\"\"\"", "\\\"\\\"\\\"")
        .replace("\r\n", "\n")
        .replace('\n', "\n    ")
}

/// Flattens text placed after a `#` comment marker onto one line.
#[must_use]
pub fn comment_text(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the default value of an optional parameter.
///
/// A string default is quoted for the textual type `str` and emitted as
/// source text otherwise (`None`, `[]`). Other values become Python literals.
/// A missing default falls back to `""` for `str` and `None` for anything else.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use toolgen_core::ParameterSpec;
/// use toolgen_codegen::common::python::default_literal;
///
/// let mut param = ParameterSpec {
///     name: "template".to_string(),
///     type_name: "str".to_string(),
///     required: false,
///     default: Some(json!("standard")),
///     description: String::new(),
/// };
/// assert_eq!(default_literal(&param), "\"standard\"");
///
/// param.type_name = "list[str] | None".to_string();
/// param.default = Some(json!("None"));
/// assert_eq!(default_literal(&param), "None");
/// ```
#[must_use]
pub fn default_literal(param: &ParameterSpec) -> String {
    match &param.default {
        Some(Value::String(text)) if param.is_textual() => string_literal(text),
        Some(Value::String(text)) if text.trim().is_empty() => "None".to_string(),
        Some(Value::String(text)) => text.trim().to_string(),
        Some(value) => python_literal(value),
        None if param.is_textual() => "\"\"".to_string(),
        None => "None".to_string(),
    }
}

/// Renders one parameter of a function signature.
///
/// Required parameters never carry a default; optional parameters always do.
#[must_use]
pub fn render_parameter(param: &ParameterSpec) -> String {
    if param.required {
        format!("{}: {}", param.name, param.type_name)
    } else {
        format!(
            "{}: {} = {}",
            param.name,
            param.type_name,
            default_literal(param)
        )
    }
}

/// Renders `def name(params) -> returns:`.
#[must_use]
pub fn render_signature(function_name: &str, params: &[ParameterSpec], returns: &str) -> String {
    let params: Vec<String> = params.iter().map(render_parameter).collect();
    format!("def {function_name}({}) -> {returns}:", params.join(", "))
}
