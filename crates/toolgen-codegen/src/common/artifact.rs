//! The assembled output module.
//!
//! # Examples
//!
//! ```
//! use toolgen_codegen::{GeneratedArtifact, GeneratedUnit};
//!
//! let mut artifact = GeneratedArtifact::new("# preamble\n", "\n# closing\n");
//! artifact.add_unit(GeneratedUnit {
//!     command: "cmd-alpha".to_string(),
//!     function_name: "cmd_alpha".to_string(),
//!     code: "\ndef cmd_alpha():\n    pass\n".to_string(),
//! });
//!
//! assert_eq!(artifact.unit_count(), 1);
//! assert_eq!(
//!     artifact.contents(),
//!     "# preamble\n\ndef cmd_alpha():\n    pass\n\n# closing\n"
//! );
//! ```

use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use toolgen_core::{Error, Result};

/// Rendered code of one command record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    /// Command name the unit was rendered from
    pub command: String,
    /// Name of the generated function
    pub function_name: String,
    /// Python source of the unit
    pub code: String,
}

/// Output module with named slots: preamble, one unit per record, closing.
///
/// The text is only ever produced whole; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GeneratedArtifact {
    preamble: String,
    units: Vec<GeneratedUnit>,
    closing: String,
}

impl GeneratedArtifact {
    /// Creates an artifact with fixed preamble and closing text and no units.
    #[must_use]
    pub fn new(preamble: impl Into<String>, closing: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
            units: Vec::new(),
            closing: closing.into(),
        }
    }

    /// Appends a unit; units keep insertion order.
    pub fn add_unit(&mut self, unit: GeneratedUnit) {
        self.units.push(unit);
    }

    /// Preamble slot.
    #[must_use]
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Per-record units in order.
    #[must_use]
    pub fn units(&self) -> &[GeneratedUnit] {
        &self.units
    }

    /// Closing slot.
    #[must_use]
    pub fn closing(&self) -> &str {
        &self.closing
    }

    /// Number of per-record units.
    #[inline]
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Full module text: preamble, units joined by a newline, closing.
    #[must_use]
    pub fn contents(&self) -> String {
        let units: Vec<&str> = self.units.iter().map(|unit| unit.code.as_str()).collect();
        let mut text = String::with_capacity(
            self.preamble.len()
                + self.closing.len()
                + units.iter().map(|code| code.len() + 1).sum::<usize>(),
        );
        text.push_str(&self.preamble);
        text.push_str(&units.join("\n"));
        text.push_str(&self.closing);
        text
    }

    /// Writes the module to `path`, replacing any previous content.
    ///
    /// Parent directories are created. The text is written to a temporary
    /// file next to `path` and renamed over it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a directory or file operation fails.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
        }

        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).map_err(|source| io_error(&temp_path, source))?;
        file.write_all(self.contents().as_bytes())
            .map_err(|source| io_error(&temp_path, source))?;
        file.sync_all()
            .map_err(|source| io_error(&temp_path, source))?;
        drop(file);

        fs::rename(&temp_path, path).map_err(|source| io_error(path, source))?;

        tracing::info!("Wrote {} tools to {}", self.unit_count(), path.display());
        Ok(())
    }
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

    fn unit(name: &str) -> GeneratedUnit {
        GeneratedUnit {
            command: format!("/flow-{name}"),
            function_name: format!("flow_{name}"),
            code: format!("def flow_{name}():\n    pass\n"),
        }
    }

    #[test]
    fn test_empty_artifact_is_preamble_and_closing() {
        let artifact = GeneratedArtifact::new("A", "Z");
        assert_eq!(artifact.contents(), "AZ");
        assert_eq!(artifact.unit_count(), 0);
    }

    #[test]
    fn test_units_keep_order() {
        let mut artifact = GeneratedArtifact::new("", "");
        artifact.add_unit(unit("b"));
        artifact.add_unit(unit("a"));

        let contents = artifact.contents();
        let b = contents.find("flow_b").unwrap();
        let a = contents.find("flow_a").unwrap();
        assert!(b < a);
        assert_eq!(artifact.units()[0].command, "/flow-b");
    }

    #[test]
    fn test_write_creates_parents_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pkg/server/mcp_server.py");

        let mut artifact = GeneratedArtifact::new("# v1\n", "");
        artifact.write_to(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# v1\n");

        artifact = GeneratedArtifact::new("# v2\n", "");
        artifact.add_unit(unit("x"));
        artifact.write_to(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# v2\n"));
        assert!(written.contains("def flow_x()"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_write_to_unwritable_location_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let err = GeneratedArtifact::new("", "")
            .write_to(blocker.join("out.py"))
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
