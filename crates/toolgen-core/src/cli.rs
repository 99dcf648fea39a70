//! CLI-facing types shared by the driver and the library crates.
//!
//! # Examples
//!
//! ```
//! use toolgen_core::cli::{ExitCode, OutputFormat};
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format, OutputFormat::Json);
//!
//! assert_eq!(ExitCode::VALIDATION_FAILED.as_i32(), 3);
//! ```

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// CLI output format.
///
/// All formats carry the same information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON output for machine parsing
    Json,
    /// Plain text output for scripts
    Text,
    /// Colored output for humans
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Returns the string representation of the format.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolgen_core::cli::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Text.as_str(), "text");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::InvalidArgument(format!(
                "invalid output format: '{s}' (expected: json, text, or pretty)"
            ))),
        }
    }
}

/// Process exit code of the `toolgen` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// General error (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Invalid input, arguments or configuration (exit code 2).
    pub const INVALID_INPUT: Self = Self(2);

    /// The validation pass reported errors (exit code 3).
    pub const VALIDATION_FAILED: Self = Self(3);

    /// The command document does not exist (exit code 4).
    pub const DOCUMENT_NOT_FOUND: Self = Self(4);

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolgen_core::cli::ExitCode;
    ///
    /// assert!(ExitCode::SUCCESS.is_success());
    /// assert!(!ExitCode::DOCUMENT_NOT_FOUND.is_success());
    /// ```
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Maps a generator error to the exit code reported for it.
    ///
    /// # Examples
    ///
    /// ```
    /// use toolgen_core::Error;
    /// use toolgen_core::cli::ExitCode;
    ///
    /// let err = Error::DocumentNotFound { path: "x.md".to_string() };
    /// assert_eq!(ExitCode::for_error(&err), ExitCode::DOCUMENT_NOT_FOUND);
    /// ```
    #[must_use]
    pub const fn for_error(error: &Error) -> Self {
        match error {
            Error::DocumentNotFound { .. } => Self::DOCUMENT_NOT_FOUND,
            Error::ValidationFailed { .. } | Error::MissingInstructionBlock { .. } => {
                Self::VALIDATION_FAILED
            }
            Error::ConfigError { .. } | Error::InvalidArgument(_) => Self::INVALID_INPUT,
            _ => Self::ERROR,
        }
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str_valid() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!(
            "Pretty".parse::<OutputFormat>().unwrap(),
            OutputFormat::Pretty
        );
    }

    #[test]
    fn test_output_format_from_str_invalid() {
        let result = "xml".parse::<OutputFormat>();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("xml"));
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Pretty);
    }

    #[test]
    fn test_exit_code_constants() {
        assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
        assert_eq!(ExitCode::ERROR.as_i32(), 1);
        assert_eq!(ExitCode::INVALID_INPUT.as_i32(), 2);
        assert_eq!(ExitCode::VALIDATION_FAILED.as_i32(), 3);
        assert_eq!(ExitCode::DOCUMENT_NOT_FOUND.as_i32(), 4);
    }

    #[test]
    fn test_exit_code_for_error() {
        assert_eq!(
            ExitCode::for_error(&Error::ValidationFailed { errors: 1 }),
            ExitCode::VALIDATION_FAILED
        );
        assert_eq!(
            ExitCode::for_error(&Error::ConfigError {
                message: "bad".to_string()
            }),
            ExitCode::INVALID_INPUT
        );
        assert_eq!(
            ExitCode::for_error(&Error::TemplateError {
                message: "bad".to_string()
            }),
            ExitCode::ERROR
        );
    }

    #[test]
    fn test_exit_code_into_i32_and_display() {
        let value: i32 = ExitCode::VALIDATION_FAILED.into();
        assert_eq!(value, 3);
        assert_eq!(ExitCode::DOCUMENT_NOT_FOUND.to_string(), "4");
        assert_eq!(ExitCode::default(), ExitCode::SUCCESS);
    }
}
