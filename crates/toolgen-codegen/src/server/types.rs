//! Template contexts and options for Python server synthesis.
//!
//! Every string field ending in `_literal` is a complete Python literal;
//! other text fields are already escaped for the place they are rendered.

use serde::Serialize;
use toolgen_core::{BoundaryRule, GenerationMode, GeneratorConfig};

/// Names the preamble and closing bind at module level.
///
/// A tool function with one of these names would replace the module's own
/// definition.
pub const MODULE_NAMES: &[&str] = &[
    "re",
    "shutil",
    "threading",
    "Path",
    "Any",
    "FastMCP",
    "find_plan_file",
    "read_plan",
    "PlanNotFoundError",
    "mcp",
    "PACKAGE_DIR",
    "BUNDLED_DOCUMENT",
    "COMMAND_PREFIX",
    "INSTRUCTION_LANGUAGE",
    "SAME_LEVEL_BOUNDARY",
    "tool_success",
    "tool_failure",
    "InstructionNotFoundError",
    "split_sections",
    "instruction_block",
    "export_commands",
    "InstructionSource",
    "get_instruction_source",
    "set_instruction_source",
    "main",
    "_lines",
    "_classify",
    "_is_command_heading",
    "_next_depth",
    "_store",
    "_FILE_LINE",
    "_instruction_source",
    "_instruction_source_lock",
];

/// Names a tool body reads besides module names; parameters must not shadow them.
pub const TOOL_BODY_NAMES: &[&str] = &[
    "instructions",
    "plan_path",
    "plan_content",
    "e",
    "str",
    "Exception",
    "FileNotFoundError",
];

/// Settings that shape the generated module.
///
/// # Examples
///
/// ```
/// use toolgen_codegen::SynthesisOptions;
/// use toolgen_core::GenerationMode;
///
/// let options = SynthesisOptions::default();
/// assert_eq!(options.mode, GenerationMode::Lookup);
/// assert_eq!(options.server_name, "Flow");
/// assert_eq!(options.initializer_name, "flow_init");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Instruction embedding strategy
    pub mode: GenerationMode,
    /// Name passed to `FastMCP`
    pub server_name: String,
    /// Module providing `find_plan_file`, `read_plan` and `PlanNotFoundError`
    pub support_module: String,
    /// Bundled document path relative to the generated module
    pub bundled_document: String,
    /// Command heading prefix used by the generated document reader
    pub command_prefix: String,
    /// Instruction block info string used by the generated document reader
    pub instruction_language: String,
    /// Whether any level-2 heading ends a section in the generated reader
    pub same_level_boundary: bool,
    /// Function name of the initializer tool
    pub initializer_name: String,
    /// Directory the initializer copies documentation into
    pub project_dir: String,
    /// Documentation files the initializer copies
    pub docs: Vec<String>,
    /// Directory the initializer exports slash commands into
    pub commands_dir: String,
    /// Source document name shown in the module docstring
    pub source_label: String,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self::from(&GeneratorConfig::default())
    }
}

impl From<&GeneratorConfig> for SynthesisOptions {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            mode: config.output.mode,
            server_name: config.output.server_name.clone(),
            support_module: config.output.support_module.clone(),
            bundled_document: config.output.bundled_document.clone(),
            command_prefix: config.source.command_prefix.clone(),
            instruction_language: config.source.instruction_language.clone(),
            same_level_boundary: config.source.boundary == BoundaryRule::SameLevel,
            initializer_name: config.initializer.name.clone(),
            project_dir: config.initializer.project_dir.clone(),
            docs: config.initializer.docs.clone(),
            commands_dir: config.initializer.commands_dir.clone(),
            source_label: config.source.document.file_name().map_or_else(
                || config.source.document.display().to_string(),
                |name| name.to_string_lossy().into_owned(),
            ),
        }
    }
}

/// Run-time failure causes every generated tool distinguishes.
///
/// Each cause becomes one `except` clause returning a failure payload, in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCause {
    /// The command's instruction block is not in the bundled document
    MissingInstructions,
    /// A required file (plan or bundled document) does not exist
    MissingPrerequisite,
    /// Anything else
    Unexpected,
}

impl FailureCause {
    /// All causes in `except` clause order.
    pub const ALL: [Self; 3] = [
        Self::MissingInstructions,
        Self::MissingPrerequisite,
        Self::Unexpected,
    ];

    /// Python exception expression caught for this cause.
    #[must_use]
    pub const fn exceptions(&self) -> &'static str {
        match self {
            Self::MissingInstructions => "InstructionNotFoundError",
            Self::MissingPrerequisite => "(FileNotFoundError, PlanNotFoundError)",
            Self::Unexpected => "Exception",
        }
    }

    /// Short failure message for `command`.
    #[must_use]
    pub fn message(&self, command: &str) -> String {
        match self {
            Self::MissingInstructions => format!("Instructions not found for {command}"),
            Self::MissingPrerequisite => "Required file not found".to_string(),
            Self::Unexpected => format!("Failed to execute {command}"),
        }
    }

    /// Remediation hint, if there is one.
    #[must_use]
    pub fn hint(&self, initializer: &str) -> Option<String> {
        match self {
            Self::MissingInstructions => Some(
                "Regenerate the server so the bundled command document matches the tools"
                    .to_string(),
            ),
            Self::MissingPrerequisite => Some(format!(
                "Run {initializer}() first, then create a plan"
            )),
            Self::Unexpected => None,
        }
    }
}

/// Context of one `except` clause.
#[derive(Debug, Clone, Serialize)]
pub struct FailureContext {
    /// Exception expression
    pub exceptions: &'static str,
    /// Command name literal
    pub command_literal: String,
    /// Failure message literal
    pub message_literal: String,
    /// Hint literal or `None`
    pub hint_literal: String,
}

/// One `Args:` entry of a docstring.
#[derive(Debug, Clone, Serialize)]
pub struct ArgContext {
    /// Parameter name
    pub name: String,
    /// Docstring-escaped description
    pub description: String,
}

/// Context for the `python/tool` template.
#[derive(Debug, Clone, Serialize)]
pub struct ToolContext {
    /// Command name flattened for a comment
    pub command_comment: String,
    /// Command name literal, the run-time lookup key
    pub command_literal: String,
    /// Generated function name
    pub function_name: String,
    /// Complete `def` line
    pub signature: String,
    /// Docstring-escaped description
    pub description: String,
    /// Docstring argument entries, empty when there are no parameters
    pub args: Vec<ArgContext>,
    /// Whether the body locates the plan file
    pub needs_plan: bool,
    /// Whether the body reads the plan file
    pub reads_plan: bool,
    /// Category flattened for a comment
    pub category_comment: String,
    /// Plan operations flattened for a comment
    pub operations_comment: String,
    /// Whether instructions are embedded instead of looked up
    pub embed: bool,
    /// Embedded instruction literal; `None` in lookup mode or when not found
    pub instructions_literal: Option<String>,
    /// Success summary literal
    pub summary_literal: String,
    /// Next steps literal
    pub next_steps_literal: String,
    /// Echoed record mapping as a dict literal
    pub metadata_literal: String,
    /// `except` clauses in order
    pub failures: Vec<FailureContext>,
}

/// Context for the `python/preamble` template.
#[derive(Debug, Clone, Serialize)]
pub struct PreambleContext {
    /// Docstring-escaped server name
    pub server_title: String,
    /// Docstring-escaped source document label
    pub source_label: String,
    /// Support module path
    pub support_module: String,
    /// Server name literal
    pub server_name_literal: String,
    /// Bundled document path literal
    pub bundled_document_literal: String,
    /// Command prefix literal
    pub command_prefix_literal: String,
    /// Instruction language literal
    pub instruction_language_literal: String,
    /// `True` or `False`
    pub same_level_literal: String,
    /// Whether the lookup cache is emitted
    pub lookup_mode: bool,
    /// Initializer function name
    pub init_name: String,
    /// Initializer command literal
    pub init_name_literal: String,
    /// Project directory literal
    pub project_dir_literal: String,
    /// Documentation file list literal
    pub docs_literal: String,
    /// Commands directory literal
    pub commands_dir_literal: String,
}

/// Context for the `python/closing` template.
#[derive(Debug, Clone, Serialize)]
pub struct ClosingContext {
    /// Docstring-escaped server name
    pub server_title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_cause_order() {
        assert_eq!(FailureCause::ALL[0], FailureCause::MissingInstructions);
        assert_eq!(FailureCause::ALL[2].exceptions(), "Exception");
    }

    #[test]
    fn test_failure_cause_text() {
        assert_eq!(
            FailureCause::Unexpected.message("/flow-x"),
            "Failed to execute /flow-x"
        );
        assert!(FailureCause::Unexpected.hint("flow_init").is_none());
        assert!(
            FailureCause::MissingPrerequisite
                .hint("flow_init")
                .unwrap()
                .contains("flow_init()")
        );
    }

    #[test]
    fn test_options_from_config() {
        let mut config = GeneratorConfig::default();
        config.output.mode = GenerationMode::Embed;
        config.source.boundary = BoundaryRule::SameLevel;

        let options = SynthesisOptions::from(&config);
        assert_eq!(options.mode, GenerationMode::Embed);
        assert!(options.same_level_boundary);
        assert_eq!(options.docs.len(), 2);
        assert_eq!(options.source_label, "SLASH_COMMANDS.md");
    }
}
