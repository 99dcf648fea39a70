//! The loaded command document.

use crate::scanner::{ScanOptions, Section, segment};
use std::path::{Path, PathBuf};
use toolgen_core::{Error, InstructionSource, Result};

/// Replaces the home directory with `~` in paths shown to users.
pub(crate) fn sanitize_path_for_error(path: &Path) -> String {
    dirs::home_dir().map_or_else(
        || path.display().to_string(),
        |home| {
            let path_str = path.display().to_string();
            path_str.replace(&home.display().to_string(), "~")
        },
    )
}

/// A segmented command document.
///
/// The document is read and segmented once; instruction lookups afterwards
/// are served from the parsed sections.
///
/// # Examples
///
/// ```
/// use toolgen_core::InstructionSource;
/// use toolgen_extract::{ScanOptions, SourceDocument};
///
/// let text = "## /flow-status\n```markdown\nShow the dashboard\n```\n";
/// let document = SourceDocument::parse(text, &ScanOptions::default());
///
/// assert_eq!(document.sections().len(), 1);
/// assert_eq!(
///     document.instructions("/flow-status").as_deref(),
///     Some("Show the dashboard\n")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: Option<PathBuf>,
    sections: Vec<Section>,
    instruction_language: String,
}

impl SourceDocument {
    /// Reads and segments the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentNotFound`] if the file does not exist and
    /// [`Error::Io`] if it cannot be read.
    pub fn load(path: impl AsRef<Path>, options: &ScanOptions) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                Error::DocumentNotFound {
                    path: sanitize_path_for_error(path),
                }
            } else {
                Error::Io {
                    path: sanitize_path_for_error(path),
                    source,
                }
            }
        })?;

        let mut document = Self::parse(&text, options);
        document.path = Some(path.to_path_buf());

        tracing::info!(
            "Loaded {} command sections from {}",
            document.sections.len(),
            path.display()
        );
        Ok(document)
    }

    /// Segments document text that is already in memory.
    #[must_use]
    pub fn parse(text: &str, options: &ScanOptions) -> Self {
        Self {
            path: None,
            sections: segment(text, options),
            instruction_language: options.instruction_language.clone(),
        }
    }

    /// Path the document was loaded from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Command sections in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First section whose heading equals `name`.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Instruction block of the first section named `name`.
    #[must_use]
    pub fn instruction_block(&self, name: &str) -> Option<String> {
        self.section(name)?
            .instruction_block(&self.instruction_language)
    }
}

impl InstructionSource for SourceDocument {
    fn instructions(&self, command: &str) -> Option<String> {
        self.instruction_block(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOC: &str = "## /flow-a\n```markdown\nfirst\n```\n## /flow-a\n```markdown\nsecond\n```\n## /flow-b\nno block\n";

    #[test]
    fn test_lookup_uses_first_section() {
        let document = SourceDocument::parse(DOC, &ScanOptions::default());
        assert_eq!(document.sections().len(), 3);
        assert_eq!(document.instruction_block("/flow-a").as_deref(), Some("first\n"));
    }

    #[test]
    fn test_lookup_missing() {
        let document = SourceDocument::parse(DOC, &ScanOptions::default());
        assert!(document.instruction_block("/flow-b").is_none());
        assert!(document.instruction_block("/flow-c").is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DOC.as_bytes()).unwrap();

        let document = SourceDocument::load(file.path(), &ScanOptions::default()).unwrap();
        assert_eq!(document.path(), Some(file.path()));
        assert_eq!(document.sections().len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SourceDocument::load("/nonexistent/SLASH_COMMANDS.md", &ScanOptions::default())
            .unwrap_err();
        assert!(err.is_document_not_found());
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = SourceDocument::load(dir.path(), &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_sanitize_path_replaces_home() {
        if let Some(home) = dirs::home_dir() {
            let sanitized = sanitize_path_for_error(&home.join("docs/COMMANDS.md"));
            assert!(sanitized.starts_with('~'));
        }
    }
}
