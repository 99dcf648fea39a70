//! Error types for the MCP tool generator.
//!
//! One error hierarchy is shared by the extractor, the validation pass and
//! the synthesizer so the driver can map every failure to an exit code.
//!
//! # Examples
//!
//! ```
//! use toolgen_core::{Error, Result};
//!
//! fn load(path: &str) -> Result<String> {
//!     Err(Error::DocumentNotFound {
//!         path: path.to_string(),
//!     })
//! }
//!
//! let err = load("framework/SLASH_COMMANDS.md").unwrap_err();
//! assert!(err.is_document_not_found());
//! ```

use thiserror::Error;

/// Main error type for the generator.
#[derive(Error, Debug)]
pub enum Error {
    /// The source command document does not exist.
    ///
    /// Fatal for the whole pipeline.
    #[error("Command document not found: {path}")]
    DocumentNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Reading or writing a file failed for a reason other than absence.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path involved in the failed operation
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A command section carries a structured-data block that cannot be decoded.
    ///
    /// Recoverable: the extractor logs it and skips the section.
    #[error("Failed to decode metadata for {command} (line {line}): {message}")]
    SectionDecode {
        /// Command heading of the offending section
        command: String,
        /// 1-based line number of the heading
        line: usize,
        /// Decoder message
        message: String,
    },

    /// No instruction block could be located for a command.
    ///
    /// Fatal only during the validation pass.
    #[error("Instruction block not found for command: {command}")]
    MissingInstructionBlock {
        /// Command name
        command: String,
    },

    /// The validation pass reported at least one error.
    #[error("Validation failed with {errors} error(s)")]
    ValidationFailed {
        /// Number of validation errors
        errors: usize,
    },

    /// A declared or derived function name is not a valid Python identifier.
    #[error("Invalid function identifier '{identifier}' for command {command}")]
    InvalidIdentifier {
        /// Command name
        command: String,
        /// Offending identifier
        identifier: String,
    },

    /// A tool signature would not compile or would shadow a module name.
    ///
    /// Covers repeated parameter names, a required parameter after an
    /// optional one, and names reserved by the generated module.
    #[error("Invalid signature for command {command}: {message}")]
    InvalidSignature {
        /// Command name
        command: String,
        /// What is wrong with the signature
        message: String,
    },

    /// Template registration or rendering failed.
    #[error("Template error: {message}")]
    TemplateError {
        /// Description of the template failure
        message: String,
    },

    /// Configuration error.
    ///
    /// Raised when configuration is invalid, missing required fields,
    /// or contains contradictory settings.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl Error {
    /// Returns `true` if the source document is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolgen_core::Error;
    ///
    /// let err = Error::DocumentNotFound { path: "missing.md".to_string() };
    /// assert!(err.is_document_not_found());
    /// ```
    #[must_use]
    pub const fn is_document_not_found(&self) -> bool {
        matches!(self, Self::DocumentNotFound { .. })
    }

    /// Returns `true` if this is a per-section decode error.
    #[must_use]
    pub const fn is_section_decode_error(&self) -> bool {
        matches!(self, Self::SectionDecode { .. })
    }

    /// Returns `true` if this is a validation failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolgen_core::Error;
    ///
    /// let err = Error::ValidationFailed { errors: 2 };
    /// assert!(err.is_validation_failure());
    /// ```
    #[must_use]
    pub const fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed { .. } | Self::MissingInstructionBlock { .. }
        )
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this error happened while producing the artifact text.
    #[must_use]
    pub const fn is_synthesis_error(&self) -> bool {
        matches!(
            self,
            Self::TemplateError { .. }
                | Self::InvalidIdentifier { .. }
                | Self::InvalidSignature { .. }
        )
    }
}

/// Result type alias used throughout the generator crates.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_not_found_detection() {
        let err = Error::DocumentNotFound {
            path: "framework/SLASH_COMMANDS.md".to_string(),
        };
        assert!(err.is_document_not_found());
        assert!(!err.is_validation_failure());
        assert!(err.to_string().contains("SLASH_COMMANDS.md"));
    }

    #[test]
    fn test_section_decode_display() {
        let err = Error::SectionDecode {
            command: "/flow-status".to_string(),
            line: 42,
            message: "mapping values are not allowed".to_string(),
        };
        assert!(err.is_section_decode_error());
        let display = err.to_string();
        assert!(display.contains("/flow-status"));
        assert!(display.contains("line 42"));
    }

    #[test]
    fn test_validation_failure_detection() {
        assert!(Error::ValidationFailed { errors: 1 }.is_validation_failure());
        assert!(
            Error::MissingInstructionBlock {
                command: "/flow-x".to_string()
            }
            .is_validation_failure()
        );
        assert!(
            !Error::ConfigError {
                message: "x".to_string()
            }
            .is_validation_failure()
        );
    }

    #[test]
    fn test_synthesis_error_detection() {
        let err = Error::InvalidIdentifier {
            command: "/flow-x".to_string(),
            identifier: "class".to_string(),
        };
        assert!(err.is_synthesis_error());
        assert!(
            Error::TemplateError {
                message: "boom".to_string()
            }
            .is_synthesis_error()
        );
    }

    #[test]
    fn test_invalid_signature_display() {
        let err = Error::InvalidSignature {
            command: "/flow-x".to_string(),
            message: "duplicate parameter 'a'".to_string(),
        };
        assert!(err.is_synthesis_error());
        assert_eq!(
            err.to_string(),
            "Invalid signature for command /flow-x: duplicate parameter 'a'"
        );
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;

        let err = Error::Io {
            path: "out.py".to_string(),
            source: std::io::Error::other("disk full"),
        };
        assert!(err.source().is_some());
    }
}
