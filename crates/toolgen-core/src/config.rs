//! Generator configuration.
//!
//! Configuration is stored in TOML. Every section is optional and falls back
//! to the defaults of the Flow framework layout, so an empty file is a valid
//! configuration.
//!
//! # Examples
//!
//! ```toml
//! [source]
//! document = "framework/SLASH_COMMANDS.md"
//! command_prefix = "/flow-"
//! boundary = "command-headings"
//! instruction_language = "markdown"
//!
//! [output]
//! path = "mcp-server-flow/mcp_server.py"
//! mode = "lookup"
//! server_name = "Flow"
//! support_module = "flow_core"
//! bundled_document = "framework/SLASH_COMMANDS.md"
//!
//! [validation]
//! enabled = true
//! min_instruction_length = 50
//!
//! [sync]
//! enabled = true
//! source_dir = "framework"
//! target_dir = "mcp-server-flow/framework"
//! files = ["DEVELOPMENT_FRAMEWORK.md", "EXAMPLE_PLAN.md", "SLASH_COMMANDS.md"]
//!
//! [initializer]
//! name = "flow_init"
//! project_dir = ".flow"
//! docs = ["DEVELOPMENT_FRAMEWORK.md", "EXAMPLE_PLAN.md"]
//! commands_dir = ".claude/commands"
//! ```

use crate::identifier::{is_valid_identifier, is_valid_module_path};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Rule deciding whether a non-command level-2 heading ends a command section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryRule {
    /// Only another command heading ends a section
    #[default]
    CommandHeadings,
    /// Any level-2 heading outside a fence ends a section
    SameLevel,
}

impl BoundaryRule {
    /// Returns the configuration spelling of the rule.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CommandHeadings => "command-headings",
            Self::SameLevel => "same-level",
        }
    }
}

impl fmt::Display for BoundaryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "command-headings" => Ok(Self::CommandHeadings),
            "same-level" => Ok(Self::SameLevel),
            _ => Err(Error::InvalidArgument(format!(
                "invalid boundary rule: '{s}' (expected: command-headings or same-level)"
            ))),
        }
    }
}

/// How generated tool bodies obtain their instruction text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    /// Mode A: the generated body looks the section up in the bundled document at run time
    #[default]
    Lookup,
    /// Mode B: the instruction text is embedded as a string literal at generation time
    Embed,
}

impl GenerationMode {
    /// Returns the configuration spelling of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lookup => "lookup",
            Self::Embed => "embed",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lookup" | "a" => Ok(Self::Lookup),
            "embed" | "b" => Ok(Self::Embed),
            _ => Err(Error::InvalidArgument(format!(
                "invalid generation mode: '{s}' (expected: lookup or embed)"
            ))),
        }
    }
}

/// Complete generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GeneratorConfig {
    /// Source document settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Artifact settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Validation pass settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Auxiliary file sync settings
    #[serde(default)]
    pub sync: SyncConfig,

    /// Hand-authored initializer tool settings
    #[serde(default)]
    pub initializer: InitializerConfig,
}

/// Where the command document lives and how it is segmented.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    /// Path of the command document
    pub document: PathBuf,

    /// Prefix a heading must start with to be a command heading
    pub command_prefix: String,

    /// Section termination rule
    pub boundary: BoundaryRule,

    /// Info string of the fenced block holding a command's instructions
    pub instruction_language: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            document: PathBuf::from("framework/SLASH_COMMANDS.md"),
            command_prefix: "/flow-".to_string(),
            boundary: BoundaryRule::default(),
            instruction_language: "markdown".to_string(),
        }
    }
}

/// Generated artifact settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file path
    pub path: PathBuf,

    /// Instruction embedding strategy
    pub mode: GenerationMode,

    /// Name passed to the `FastMCP` constructor
    pub server_name: String,

    /// Python module providing plan helpers (`find_plan_file`, `read_plan`, `PlanNotFoundError`)
    pub support_module: String,

    /// Location of the bundled document, relative to the generated module
    pub bundled_document: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("mcp-server-flow/mcp_server.py"),
            mode: GenerationMode::default(),
            server_name: "Flow".to_string(),
            support_module: "flow_core".to_string(),
            bundled_document: "framework/SLASH_COMMANDS.md".to_string(),
        }
    }
}

/// Validation pass settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Run the validation pass before writing the artifact
    pub enabled: bool,

    /// Instruction texts shorter than this (after trimming) produce a warning
    pub min_instruction_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_instruction_length: 50,
        }
    }
}

/// Auxiliary documentation copy settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    /// Copy files before generating
    pub enabled: bool,

    /// Directory the files are copied from
    pub source_dir: PathBuf,

    /// Directory the files are copied to (created if absent)
    pub target_dir: PathBuf,

    /// File names to copy
    pub files: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source_dir: PathBuf::from("framework"),
            target_dir: PathBuf::from("mcp-server-flow/framework"),
            files: vec![
                "DEVELOPMENT_FRAMEWORK.md".to_string(),
                "EXAMPLE_PLAN.md".to_string(),
                "SLASH_COMMANDS.md".to_string(),
            ],
        }
    }
}

/// Settings of the hand-authored initializer tool in the preamble.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InitializerConfig {
    /// Function name of the initializer tool
    pub name: String,

    /// Project directory the documentation is copied into
    pub project_dir: String,

    /// Bundled documentation files copied into `project_dir`
    pub docs: Vec<String>,

    /// Directory the per-command instruction files are written to
    pub commands_dir: String,
}

impl Default for InitializerConfig {
    fn default() -> Self {
        Self {
            name: "flow_init".to_string(),
            project_dir: ".flow".to_string(),
            docs: vec![
                "DEVELOPMENT_FRAMEWORK.md".to_string(),
                "EXAMPLE_PLAN.md".to_string(),
            ],
            commands_dir: ".claude/commands".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a configuration from TOML text and validates it.
    ///
    /// Paths are kept as written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the text is not valid TOML, has
    /// unexpected value types, or fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolgen_core::{GenerationMode, GeneratorConfig};
    ///
    /// let config = GeneratorConfig::from_toml_str("[output]\nmode = \"embed\"\n").unwrap();
    /// assert_eq!(config.output.mode, GenerationMode::Embed);
    /// assert_eq!(config.source.command_prefix, "/flow-");
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::ConfigError {
            message: format!("failed to parse config: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// Relative paths inside the file are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::ConfigError`] if it cannot be parsed or is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut config = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Rewrites relative filesystem paths so they are anchored at `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.source.document,
            &mut self.output.path,
            &mut self.sync.source_dir,
            &mut self.sync.target_dir,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Checks values that would otherwise produce an unusable artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] naming the first invalid key.
    pub fn validate(&self) -> Result<()> {
        let prefix = &self.source.command_prefix;
        if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
            return Err(config_error(
                "source.command_prefix must be non-empty and contain no whitespace",
            ));
        }

        if self.source.instruction_language.trim().is_empty() {
            return Err(config_error("source.instruction_language cannot be empty"));
        }

        if self.output.server_name.trim().is_empty() {
            return Err(config_error("output.server_name cannot be empty"));
        }

        if !is_valid_module_path(&self.output.support_module) {
            return Err(config_error(&format!(
                "output.support_module '{}' is not a Python module path",
                self.output.support_module
            )));
        }

        if self.output.bundled_document.trim().is_empty() {
            return Err(config_error("output.bundled_document cannot be empty"));
        }

        if !is_valid_identifier(&self.initializer.name) {
            return Err(config_error(&format!(
                "initializer.name '{}' is not a Python identifier",
                self.initializer.name
            )));
        }

        if self.sync.enabled && self.sync.files.iter().any(|f| f.trim().is_empty()) {
            return Err(config_error("sync.files cannot contain empty names"));
        }

        Ok(())
    }
}

fn config_error(message: &str) -> Error {
    Error::ConfigError {
        message: message.to_string(),
    }
}
