//! Output formatters for CLI reports.
//!
//! Every command builds a serializable report and prints it through
//! [`format_output`], so all formats carry the same information.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use toolgen_core::cli::OutputFormat;

/// Formats a report according to the requested output format.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use toolgen_cli::formatters::format_output;
/// use toolgen_core::cli::OutputFormat;
///
/// #[derive(Serialize)]
/// struct Report {
///     records: usize,
/// }
///
/// let output = format_output(&Report { records: 3 }, OutputFormat::Text)?;
/// assert_eq!(output, "records: 3");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Formats data as indented JSON.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize};
    use serde_json::Value;

    /// Formats data as one `path: value` line per scalar.
    ///
    /// Nested keys are joined with `.`, sequence items are indexed with
    /// `[n]`. Empty containers print as `[]` or `{}`. Suitable for `grep`.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        flatten("", &value, &mut lines);
        Ok(lines.join("\n"))
    }

    fn flatten(path: &str, value: &Value, lines: &mut Vec<String>) {
        match value {
            Value::Object(map) if !map.is_empty() => {
                for (key, item) in map {
                    let child = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    flatten(&child, item, lines);
                }
            }
            Value::Array(items) if !items.is_empty() => {
                for (index, item) in items.iter().enumerate() {
                    flatten(&format!("{path}[{index}]"), item, lines);
                }
            }
            Value::Object(_) => lines.push(line(path, "{}")),
            Value::Array(_) => lines.push(line(path, "[]")),
            Value::String(s) => lines.push(line(path, s)),
            other => lines.push(line(path, &other.to_string())),
        }
    }

    fn line(path: &str, value: &str) -> String {
        if path.is_empty() {
            value.to_string()
        } else {
            format!("{path}: {value}")
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};
    use serde_json::Value;

    /// Formats data as a colorized, indented outline.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = String::new();
        match &value {
            Value::Object(_) | Value::Array(_) => write_block(&value, 0, &mut out),
            scalar => out.push_str(&scalar_text(scalar)),
        }
        Ok(out.trim_end().to_string())
    }

    fn write_block(value: &Value, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(map) => {
                for (key, item) in map {
                    let label = format!("{pad}{}:", key.blue().bold());
                    if is_nested(item) {
                        out.push_str(&label);
                        out.push('\n');
                        write_block(item, indent + 1, out);
                    } else {
                        out.push_str(&format!("{label} {}\n", scalar_text(item)));
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    if is_nested(item) {
                        out.push_str(&format!("{pad}{}\n", "-".dimmed()));
                        write_block(item, indent + 1, out);
                    } else {
                        out.push_str(&format!("{pad}{} {}\n", "-".dimmed(), scalar_text(item)));
                    }
                }
            }
            scalar => {
                out.push_str(&pad);
                out.push_str(&scalar_text(scalar));
                out.push('\n');
            }
        }
    }

    fn is_nested(value: &Value) -> bool {
        match value {
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => false,
        }
    }

    fn scalar_text(value: &Value) -> String {
        match value {
            Value::Null => "none".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => s.green().to_string(),
            Value::Array(_) => "[]".dimmed().to_string(),
            Value::Object(_) => "{}".dimmed().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Issue {
        command: String,
        line: usize,
    }

    #[derive(Serialize)]
    struct TestReport {
        document: String,
        records: usize,
        valid: bool,
        output: Option<String>,
        issues: Vec<Issue>,
        skipped: Vec<String>,
    }

    fn report() -> TestReport {
        TestReport {
            document: "SLASH_COMMANDS.md".to_string(),
            records: 2,
            valid: true,
            output: None,
            issues: vec![Issue {
                command: "/flow-status".to_string(),
                line: 12,
            }],
            skipped: vec![],
        }
    }

    #[test]
    fn test_json_format() {
        let output = json::format(&report()).unwrap();
        assert!(output.contains("\"document\": \"SLASH_COMMANDS.md\""));
        assert!(output.contains("\"records\": 2"));
        assert!(output.contains("\"output\": null"));
    }

    #[test]
    fn test_text_format_flattens_paths() {
        let output = text::format(&report()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines.contains(&"document: SLASH_COMMANDS.md"));
        assert!(lines.contains(&"records: 2"));
        assert!(lines.contains(&"valid: true"));
        assert!(lines.contains(&"output: null"));
        assert!(lines.contains(&"issues[0].command: /flow-status"));
        assert!(lines.contains(&"issues[0].line: 12"));
        assert!(lines.contains(&"skipped: []"));
    }

    #[test]
    fn test_pretty_format() {
        colored::control::set_override(false);
        let output = pretty::format(&report()).unwrap();

        assert!(output.contains("document: SLASH_COMMANDS.md"));
        assert!(output.contains("issues:\n  -\n    command: /flow-status"));
        assert!(output.contains("skipped: []"));
        assert!(output.contains("output: none"));
    }

    #[test]
    fn test_format_output_dispatch() {
        let data = report();
        assert!(
            format_output(&data, OutputFormat::Json)
                .unwrap()
                .starts_with('{')
        );
        assert!(
            format_output(&data, OutputFormat::Text)
                .unwrap()
                .starts_with("document:")
        );
        assert!(
            format_output(&data, OutputFormat::Pretty)
                .unwrap()
                .contains("records")
        );
    }

    #[test]
    fn test_scalar_report() {
        assert_eq!(text::format(&5).unwrap(), "5");
        colored::control::set_override(false);
        assert_eq!(pretty::format(&"done").unwrap(), "done");
    }
}
