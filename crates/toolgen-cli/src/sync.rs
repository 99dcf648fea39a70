//! Auxiliary file sync.
//!
//! Copies the framework documents the generated server bundles (the command
//! document among them) from the source directory into the package
//! directory next to the generated module.

use serde::Serialize;
use std::fs;
use std::path::Path;
use toolgen_core::{Error, Result, SyncConfig};
use tracing::{info, warn};

/// Outcome of a sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Directory the files were copied into
    pub target_dir: String,
    /// File names copied, in configured order
    pub copied: Vec<String>,
    /// File names missing from the source directory
    pub missing: Vec<String>,
}

/// Copies every configured file from `source_dir` to `target_dir`.
///
/// The target directory is created. Files missing from the source directory
/// are reported and skipped; existing target files are overwritten.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the source directory does not exist and
/// [`Error::Io`] if a copy or directory creation fails.
///
/// # Examples
///
/// ```
/// use tempfile::TempDir;
/// use toolgen_cli::sync_files;
/// use toolgen_core::SyncConfig;
///
/// let temp = TempDir::new().unwrap();
/// std::fs::write(temp.path().join("SLASH_COMMANDS.md"), "# Commands\n").unwrap();
///
/// let config = SyncConfig {
///     source_dir: temp.path().to_path_buf(),
///     target_dir: temp.path().join("pkg/framework"),
///     files: vec!["SLASH_COMMANDS.md".to_string(), "EXAMPLE_PLAN.md".to_string()],
///     ..SyncConfig::default()
/// };
///
/// let report = sync_files(&config).unwrap();
/// assert_eq!(report.copied, vec!["SLASH_COMMANDS.md"]);
/// assert_eq!(report.missing, vec!["EXAMPLE_PLAN.md"]);
/// ```
pub fn sync_files(config: &SyncConfig) -> Result<SyncReport> {
    let source_dir = &config.source_dir;
    if !source_dir.is_dir() {
        return Err(Error::ConfigError {
            message: format!(
                "sync source directory {} does not exist",
                source_dir.display()
            ),
        });
    }

    let target_dir = &config.target_dir;
    fs::create_dir_all(target_dir).map_err(|source| io_error(target_dir, source))?;

    let mut report = SyncReport {
        target_dir: target_dir.display().to_string(),
        ..SyncReport::default()
    };

    for file in &config.files {
        let source = source_dir.join(file);
        if !source.is_file() {
            warn!("Sync source {} not found", source.display());
            report.missing.push(file.clone());
            continue;
        }

        let target = target_dir.join(file);
        fs::copy(&source, &target).map_err(|e| io_error(&target, e))?;
        report.copied.push(file.clone());
    }

    info!(
        "Synced {}/{} files to {}",
        report.copied.len(),
        config.files.len(),
        target_dir.display()
    );
    Ok(report)
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(temp: &TempDir, files: &[&str]) -> SyncConfig {
        SyncConfig {
            enabled: true,
            source_dir: temp.path().join("framework"),
            target_dir: temp.path().join("mcp-server-flow/framework"),
            files: files.iter().map(|f| (*f).to_string()).collect(),
        }
    }

    #[test]
    fn test_copies_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, &["SLASH_COMMANDS.md"]);
        fs::create_dir_all(&config.source_dir).unwrap();
        fs::create_dir_all(&config.target_dir).unwrap();
        fs::write(config.source_dir.join("SLASH_COMMANDS.md"), "new").unwrap();
        fs::write(config.target_dir.join("SLASH_COMMANDS.md"), "old").unwrap();

        let report = sync_files(&config).unwrap();
        assert_eq!(report.copied, vec!["SLASH_COMMANDS.md"]);
        assert!(report.missing.is_empty());
        assert_eq!(
            fs::read_to_string(config.target_dir.join("SLASH_COMMANDS.md")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_missing_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, &["EXAMPLE_PLAN.md"]);
        fs::create_dir_all(&config.source_dir).unwrap();

        let report = sync_files(&config).unwrap();
        assert!(report.copied.is_empty());
        assert_eq!(report.missing, vec!["EXAMPLE_PLAN.md"]);
        assert!(config.target_dir.is_dir());
    }

    #[test]
    fn test_missing_source_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp, &["SLASH_COMMANDS.md"]);

        let err = sync_files(&config).unwrap_err();
        assert!(err.is_config_error());
        assert!(!config.target_dir.exists());
    }
}
