//! Export-commands command implementation.
//!
//! Writes each command's instruction block to the file named on its
//! `**File**:` line, producing one slash command file per command.

use super::common::{load_config, override_document, print_report};
use crate::pipeline::Pipeline;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use toolgen_core::cli::{ExitCode, OutputFormat};
use toolgen_core::{CommandRecord, InstructionSource};
use tracing::{debug, info, warn};

/// One exported command file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedCommand {
    /// Command name
    pub command: String,
    /// File name written inside the output directory
    pub file: String,
}

/// Outcome of an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    /// Directory the files were written to
    pub output_dir: String,
    /// Files written, in document order
    pub exported: Vec<ExportedCommand>,
    /// Commands without a declared file or without instructions
    pub skipped: Vec<String>,
}

/// Writes the instruction block of every record that declares a command file.
///
/// The output directory is created. Existing files are overwritten.
///
/// # Errors
///
/// Returns an error if the directory or a file cannot be written.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use serde_json::Map;
/// use tempfile::TempDir;
/// use toolgen_cli::commands::export::export_commands;
/// use toolgen_core::CommandRecord;
///
/// let temp = TempDir::new().unwrap();
/// let record = CommandRecord::from_metadata("/flow-status", "Status", Map::new())
///     .unwrap()
///     .with_command_file(Some("flow-status.md".to_string()));
///
/// let mut source = HashMap::new();
/// source.insert("/flow-status".to_string(), "Report the phase.\n".to_string());
///
/// let report = export_commands(&[record], &source, temp.path()).unwrap();
/// assert_eq!(report.exported.len(), 1);
/// assert!(temp.path().join("flow-status.md").is_file());
/// ```
pub fn export_commands(
    records: &[CommandRecord],
    source: &dyn InstructionSource,
    output_dir: &Path,
) -> Result<ExportReport> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let mut report = ExportReport {
        output_dir: output_dir.display().to_string(),
        ..ExportReport::default()
    };

    for record in records {
        let Some(file) = record.command_file() else {
            debug!("{} declares no command file", record.name());
            report.skipped.push(record.name().to_string());
            continue;
        };
        let Some(instructions) = source.instructions(record.name()) else {
            warn!("No instructions for {}, not exported", record.name());
            report.skipped.push(record.name().to_string());
            continue;
        };

        let path = output_dir.join(file);
        fs::write(&path, instructions)
            .with_context(|| format!("failed to write {}", path.display()))?;

        report.exported.push(ExportedCommand {
            command: record.name().to_string(),
            file: file.to_string(),
        });
    }

    info!(
        "Exported {} command files to {}",
        report.exported.len(),
        output_dir.display()
    );
    Ok(report)
}

/// Runs the export-commands command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the document cannot be
/// read, or a file cannot be written.
pub fn run(
    config_path: Option<PathBuf>,
    document: Option<PathBuf>,
    output_dir: &Path,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let mut config = load_config(config_path.as_deref())?;
    override_document(&mut config, document);

    let pipeline = Pipeline::new(config);
    let (document, extraction) = pipeline.extract()?;

    let report = export_commands(&extraction.records, &document, output_dir)?;
    print_report(&report, output_format)?;

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn record(name: &str, file: Option<&str>) -> CommandRecord {
        CommandRecord::from_metadata(name, "x", Map::new())
            .unwrap()
            .with_command_file(file.map(str::to_string))
    }

    #[test]
    fn test_skips_records_without_file_or_instructions() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join(".claude/commands");

        let mut source = HashMap::new();
        source.insert("/flow-a".to_string(), "a".to_string());
        source.insert("/flow-b".to_string(), "b".to_string());

        let records = vec![
            record("/flow-a", Some("flow-a.md")),
            record("/flow-b", None),
            record("/flow-c", Some("flow-c.md")),
        ];

        let report = export_commands(&records, &source, &out).unwrap();
        assert_eq!(
            report.exported,
            vec![ExportedCommand {
                command: "/flow-a".to_string(),
                file: "flow-a.md".to_string(),
            }]
        );
        assert_eq!(report.skipped, vec!["/flow-b", "/flow-c"]);
        assert_eq!(fs::read_to_string(out.join("flow-a.md")).unwrap(), "a");
        assert!(!out.join("flow-c.md").exists());
    }
}
