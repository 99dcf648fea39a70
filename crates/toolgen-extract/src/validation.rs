//! Build-time validation of extracted records.
//!
//! Every record must have instruction text that can be located with the same
//! rule the generated lookup uses, and a parameter list that forms a legal
//! Python signature. Short instruction text, duplicate names and inconsistent
//! defaults are reported as warnings and never block generation.

use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use toolgen_core::{CommandRecord, Error, InstructionSource, Result, ValidationConfig};

/// Default minimum length of trimmed instruction text.
pub const DEFAULT_MIN_INSTRUCTION_LENGTH: usize = 50;

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks generation
    Error,
    /// Reported only
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// What a validation issue is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// No instruction block could be located
    MissingInstructions,
    /// Instruction text is shorter than the configured minimum
    ShortInstructions,
    /// The command name was already defined earlier in the document
    DuplicateCommand,
    /// Another command derives the same function identifier
    DuplicateIdentifier,
    /// A parameter name appears twice in one signature
    DuplicateParameter,
    /// A required parameter follows an optional one
    RequiredAfterOptional,
    /// A required parameter declares a default, which is ignored
    RequiredWithDefault,
    /// An optional parameter declares no default
    OptionalWithoutDefault,
}

impl IssueKind {
    /// Severity findings of this kind are reported with.
    ///
    /// Kinds that would make the generated module fail to load are errors.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::MissingInstructions | Self::DuplicateParameter | Self::RequiredAfterOptional => {
                Severity::Error
            }
            Self::ShortInstructions
            | Self::DuplicateCommand
            | Self::DuplicateIdentifier
            | Self::RequiredWithDefault
            | Self::OptionalWithoutDefault => Severity::Warning,
        }
    }
}

/// One finding of the validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Severity
    pub severity: Severity,
    /// Kind of finding
    pub kind: IssueKind,
    /// Command the issue belongs to
    pub command: String,
    /// Heading line of the record
    pub line: usize,
    /// Human-readable message
    pub message: String,
}

/// All findings of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Number of records checked
    pub checked: usize,
    /// Findings in record order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Number of error-level findings.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warning-level findings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Returns `true` if any finding blocks generation.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Error-level findings.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }

    /// Converts the report into a pass/fail result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInstructionBlock`] when the only error is a
    /// single missing instruction block, otherwise [`Error::ValidationFailed`].
    pub fn into_result(self) -> Result<Self> {
        let errors = self.error_count();
        if errors == 0 {
            return Ok(self);
        }

        if errors == 1
            && let Some(issue) = self.errors().next()
            && issue.kind == IssueKind::MissingInstructions
        {
            return Err(Error::MissingInstructionBlock {
                command: issue.command.clone(),
            });
        }

        Err(Error::ValidationFailed { errors })
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }

    fn push(&mut self, kind: IssueKind, record: &CommandRecord, message: String) {
        let severity = kind.severity();
        match severity {
            Severity::Error => tracing::error!("{}: {}", record.name(), message),
            Severity::Warning => tracing::warn!("{}: {}", record.name(), message),
        }
        self.issues.push(ValidationIssue {
            severity,
            kind,
            command: record.name().to_string(),
            line: record.line(),
            message,
        });
    }
}

/// Validation pass over extracted records.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use serde_json::Map;
/// use toolgen_core::CommandRecord;
/// use toolgen_extract::Validator;
///
/// let records = vec![CommandRecord::from_metadata("cmd-alpha", "does alpha", Map::new()).unwrap()];
/// let source: HashMap<String, String> = HashMap::new();
///
/// let report = Validator::default().validate(&records, &source);
/// assert_eq!(report.error_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    min_instruction_length: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INSTRUCTION_LENGTH)
    }
}

impl From<&ValidationConfig> for Validator {
    fn from(config: &ValidationConfig) -> Self {
        Self::new(config.min_instruction_length)
    }
}

impl Validator {
    /// Creates a validator with the given short-instruction threshold.
    #[must_use]
    pub const fn new(min_instruction_length: usize) -> Self {
        Self {
            min_instruction_length,
        }
    }

    /// Checks every record against `source`.
    #[must_use]
    pub fn validate(
        &self,
        records: &[CommandRecord],
        source: &dyn InstructionSource,
    ) -> ValidationReport {
        let mut report = ValidationReport {
            checked: records.len(),
            issues: Vec::new(),
        };
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        let mut identifiers: HashMap<String, &str> = HashMap::new();

        for record in records {
            if let Some(first_line) = first_seen.get(record.name()) {
                report.push(
                    IssueKind::DuplicateCommand,
                    record,
                    format!("duplicate command name (first defined at line {first_line})"),
                );
            } else {
                first_seen.insert(record.name(), record.line());
            }

            match identifiers.entry(record.function_identifier()) {
                Entry::Occupied(entry) if *entry.get() != record.name() => report.push(
                    IssueKind::DuplicateIdentifier,
                    record,
                    format!(
                        "function '{}' is also generated for {}",
                        entry.key(),
                        entry.get()
                    ),
                ),
                Entry::Occupied(_) => {}
                Entry::Vacant(entry) => {
                    entry.insert(record.name());
                }
            }

            match source.instructions(record.name()) {
                None => report.push(
                    IssueKind::MissingInstructions,
                    record,
                    "instruction block not found".to_string(),
                ),
                Some(text) => {
                    let length = text.trim().chars().count();
                    if length < self.min_instruction_length {
                        report.push(
                            IssueKind::ShortInstructions,
                            record,
                            format!(
                                "instruction text is short ({length} < {} characters)",
                                self.min_instruction_length
                            ),
                        );
                    }
                }
            }

            check_parameters(record, &mut report);
        }

        tracing::info!(
            "Validated {} commands: {} errors, {} warnings",
            report.checked,
            report.error_count(),
            report.warning_count()
        );
        report
    }
}

fn check_parameters(record: &CommandRecord, report: &mut ValidationReport) {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut first_optional: Option<&str> = None;

    for param in record.parameters() {
        if !seen.insert(param.name.as_str()) {
            report.push(
                IssueKind::DuplicateParameter,
                record,
                format!("parameter '{}' is declared more than once", param.name),
            );
        }
        if param.required && param.has_default() {
            report.push(
                IssueKind::RequiredWithDefault,
                record,
                format!("required parameter '{}' declares a default", param.name),
            );
        }
        if !param.required && !param.has_default() {
            report.push(
                IssueKind::OptionalWithoutDefault,
                record,
                format!("optional parameter '{}' declares no default", param.name),
            );
        }
        match first_optional {
            Some(optional) if param.required => report.push(
                IssueKind::RequiredAfterOptional,
                record,
                format!(
                    "required parameter '{}' follows optional parameter '{optional}'",
                    param.name
                ),
            ),
            None if !param.required => first_optional = Some(param.name.as_str()),
            _ => {}
        }
    }
}
