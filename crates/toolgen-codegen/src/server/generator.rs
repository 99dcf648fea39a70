//! Python MCP server synthesizer.
//!
//! Turns an ordered list of [`CommandRecord`]s into one Python module: a
//! fixed preamble, one tool function per record and a closing entry point.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use toolgen_codegen::{SynthesisOptions, Synthesizer};
//! use toolgen_core::{CommandRecord, GenerationMode};
//! use std::collections::HashMap;
//!
//! let record = CommandRecord::from_metadata(
//!     "cmd-alpha",
//!     "does alpha",
//!     json!({"parameters": []}).as_object().unwrap().clone(),
//! )
//! .unwrap();
//!
//! let mut instructions = HashMap::new();
//! instructions.insert("cmd-alpha".to_string(), "step 1\n".to_string());
//!
//! let options = SynthesisOptions {
//!     mode: GenerationMode::Embed,
//!     ..SynthesisOptions::default()
//! };
//! let synthesizer = Synthesizer::new(options).unwrap();
//! let artifact = synthesizer.synthesize(&[record], &instructions).unwrap();
//!
//! let text = artifact.contents();
//! assert!(text.contains("def cmd_alpha() -> dict[str, Any]:"));
//! assert!(text.contains("\"step 1\\n\""));
//! ```

use crate::common::artifact::{GeneratedArtifact, GeneratedUnit};
use crate::common::python::{
    comment_text, docstring_text, python_literal, render_signature, string_literal,
};
use crate::server::types::{
    ArgContext, ClosingContext, FailureCause, FailureContext, MODULE_NAMES, PreambleContext,
    SynthesisOptions, TOOL_BODY_NAMES, ToolContext,
};
use crate::template_engine::TemplateEngine;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use toolgen_core::identifier::is_valid_identifier;
use toolgen_core::{CommandRecord, Error, GenerationMode, InstructionSource, Result};

const READ_OPERATION: &str = "READ";
const WRITE_OPERATION: &str = "WRITE";

/// Generator for the Python MCP server module.
///
/// Output is a pure function of the records, the instruction source (embed
/// mode only) and the options; rendering the same input twice yields
/// byte-identical text.
///
/// # Examples
///
/// ```
/// use toolgen_codegen::{SynthesisOptions, Synthesizer};
///
/// let synthesizer = Synthesizer::new(SynthesisOptions::default()).unwrap();
/// ```
#[derive(Debug)]
pub struct Synthesizer<'a> {
    engine: TemplateEngine<'a>,
    options: SynthesisOptions,
}

impl Synthesizer<'_> {
    /// Creates a synthesizer with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if template registration fails,
    /// [`Error::InvalidIdentifier`] if the initializer name is not a valid
    /// Python identifier, or [`Error::InvalidSignature`] if it collides with
    /// a module-level name.
    pub fn new(options: SynthesisOptions) -> Result<Self> {
        let init = &options.initializer_name;
        if !is_valid_identifier(init) {
            return Err(Error::InvalidIdentifier {
                command: init.clone(),
                identifier: init.clone(),
            });
        }
        if MODULE_NAMES.contains(&init.as_str()) {
            return Err(Error::InvalidSignature {
                command: init.clone(),
                message: format!("initializer name '{init}' is already defined by the module"),
            });
        }

        let engine = TemplateEngine::new()?;
        Ok(Self { engine, options })
    }

    /// Options this synthesizer renders with.
    #[must_use]
    pub const fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    /// Renders the whole module.
    ///
    /// Units follow the order of `records`; duplicate names produce
    /// duplicate units, and a later unit with the same function name replaces
    /// the earlier one when Python loads the module. `source` is only
    /// consulted in embed mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if a function or parameter name
    /// is not a valid Python identifier, [`Error::InvalidSignature`] if a
    /// signature would not compile or shadows a module name, or
    /// [`Error::TemplateError`] if rendering fails. No partial artifact is
    /// returned.
    pub fn synthesize(
        &self,
        records: &[CommandRecord],
        source: &dyn InstructionSource,
    ) -> Result<GeneratedArtifact> {
        tracing::info!(
            "Synthesizing {} tools ({} mode)",
            records.len(),
            self.options.mode
        );

        let preamble = self
            .engine
            .render("python/preamble", &self.preamble_context())?;
        let closing = self.engine.render(
            "python/closing",
            &ClosingContext {
                server_title: docstring_text(&self.options.server_name),
            },
        )?;

        let mut artifact = GeneratedArtifact::new(preamble, closing);
        let mut defined: HashMap<String, String> = HashMap::new();
        for record in records {
            let unit = self.render_unit(record, source)?;
            if let Some(previous) = defined.insert(unit.function_name.clone(), unit.command.clone())
            {
                tracing::warn!(
                    "Tool {} for {} replaces the one generated for {}",
                    unit.function_name,
                    unit.command,
                    previous
                );
            }
            artifact.add_unit(unit);
        }

        tracing::info!("Synthesized {} tools", artifact.unit_count());
        Ok(artifact)
    }

    /// Renders the tool function of a single record.
    ///
    /// # Errors
    ///
    /// Same as [`Synthesizer::synthesize`].
    pub fn render_unit(
        &self,
        record: &CommandRecord,
        source: &dyn InstructionSource,
    ) -> Result<GeneratedUnit> {
        let context = self.tool_context(record, source)?;
        let code = self.engine.render("python/tool", &context)?;

        tracing::debug!(
            "Generated tool {} for {}",
            context.function_name,
            record.name()
        );

        Ok(GeneratedUnit {
            command: record.name().to_string(),
            function_name: context.function_name,
            code,
        })
    }

    fn tool_context(
        &self,
        record: &CommandRecord,
        source: &dyn InstructionSource,
    ) -> Result<ToolContext> {
        let function_name = record.function_identifier();
        self.check_signature(record, &function_name)?;

        let operations = record.plan_operations();
        let reads_plan = operations.contains(&READ_OPERATION);
        let needs_plan = reads_plan || operations.contains(&WRITE_OPERATION);

        let embed = self.options.mode == GenerationMode::Embed;
        let instructions_literal = if embed {
            let found = source.instructions(record.name());
            if found.is_none() {
                tracing::warn!(
                    "No instructions for {}; the tool will report them missing",
                    record.name()
                );
            }
            found.as_deref().map(string_literal)
        } else {
            None
        };

        let next_steps = record
            .get("next_steps")
            .and_then(Value::as_str)
            .map_or_else(|| format!("Next steps for {}", record.name()), str::to_string);

        Ok(ToolContext {
            command_comment: comment_text(record.name()),
            command_literal: string_literal(record.name()),
            signature: render_signature(&function_name, record.parameters(), record.returns()),
            description: docstring_text(record.description()),
            args: record
                .parameters()
                .iter()
                .map(|param| ArgContext {
                    name: param.name.clone(),
                    description: docstring_text(&comment_text(&param.description)),
                })
                .collect(),
            needs_plan,
            reads_plan,
            category_comment: comment_text(record.category().unwrap_or("unknown")),
            operations_comment: if operations.is_empty() {
                "None".to_string()
            } else {
                comment_text(&operations.join(", "))
            },
            embed,
            instructions_literal,
            summary_literal: string_literal(&format!("{function_name} executed")),
            next_steps_literal: string_literal(&next_steps),
            metadata_literal: python_literal(&Value::Object(record.to_mapping())),
            failures: self.failure_contexts(record),
            function_name,
        })
    }

    /// Rejects signatures Python would refuse to compile or that would
    /// replace a name the module relies on.
    fn check_signature(&self, record: &CommandRecord, function_name: &str) -> Result<()> {
        check_identifier(record, function_name)?;
        if MODULE_NAMES.contains(&function_name) || function_name == self.options.initializer_name
        {
            return Err(signature_error(
                record,
                format!("function name '{function_name}' is already defined by the module"),
            ));
        }

        let mut seen = HashSet::new();
        let mut first_optional: Option<&str> = None;
        for param in record.parameters() {
            let name = param.name.as_str();
            check_identifier(record, name)?;
            if MODULE_NAMES.contains(&name) || TOOL_BODY_NAMES.contains(&name) {
                return Err(signature_error(
                    record,
                    format!("parameter '{name}' shadows a name the tool body uses"),
                ));
            }
            if !seen.insert(name) {
                return Err(signature_error(
                    record,
                    format!("parameter '{name}' is declared more than once"),
                ));
            }
            match first_optional {
                Some(optional) if param.required => {
                    return Err(signature_error(
                        record,
                        format!(
                            "required parameter '{name}' follows optional parameter '{optional}'"
                        ),
                    ));
                }
                None if !param.required => first_optional = Some(name),
                _ => {}
            }
        }
        Ok(())
    }

    fn failure_contexts(&self, record: &CommandRecord) -> Vec<FailureContext> {
        FailureCause::ALL
            .iter()
            .map(|cause| FailureContext {
                exceptions: cause.exceptions(),
                command_literal: string_literal(record.name()),
                message_literal: string_literal(&cause.message(record.name())),
                hint_literal: cause
                    .hint(&self.options.initializer_name)
                    .map_or_else(|| "None".to_string(), |hint| string_literal(&hint)),
            })
            .collect()
    }

    fn preamble_context(&self) -> PreambleContext {
        let options = &self.options;
        let docs: Vec<Value> = options
            .docs
            .iter()
            .map(|doc| Value::String(doc.clone()))
            .collect();

        PreambleContext {
            server_title: docstring_text(&options.server_name),
            source_label: docstring_text(&options.source_label),
            support_module: options.support_module.clone(),
            server_name_literal: string_literal(&options.server_name),
            bundled_document_literal: string_literal(&options.bundled_document),
            command_prefix_literal: string_literal(&options.command_prefix),
            instruction_language_literal: string_literal(&options.instruction_language),
            same_level_literal: if options.same_level_boundary {
                "True"
            } else {
                "False"
            }
            .to_string(),
            lookup_mode: options.mode == GenerationMode::Lookup,
            init_name: options.initializer_name.clone(),
            init_name_literal: string_literal(&options.initializer_name),
            project_dir_literal: string_literal(&options.project_dir),
            docs_literal: python_literal(&Value::Array(docs)),
            commands_dir_literal: string_literal(&options.commands_dir),
        }
    }
}

fn check_identifier(record: &CommandRecord, identifier: &str) -> Result<()> {
    if is_valid_identifier(identifier) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            command: record.name().to_string(),
            identifier: identifier.to_string(),
        })
    }
}

fn signature_error(record: &CommandRecord, message: String) -> Error {
    Error::InvalidSignature {
        command: record.name().to_string(),
        message,
    }
}
