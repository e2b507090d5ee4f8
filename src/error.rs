//! Error types for scicalc-rs operations.
//!
//! This module provides the error hierarchy using `thiserror`. Calculation
//! failures ([`CalcError`]) are recoverable at the session level and carry a
//! message meant for direct display; the remaining variants belong to the
//! command-line shell and configuration loading.

use thiserror::Error;

/// Result type alias for scicalc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Expression validation or evaluation failed.
    #[error("calculation error: {0}")]
    Calc(#[from] CalcError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// I/O errors (configuration files, terminal streams).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

impl Error {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Failures of expression validation and evaluation.
///
/// Every variant renders to a message suitable for showing the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Nothing to evaluate.
    #[error("empty expression")]
    EmptyExpression,

    /// Unbalanced parentheses or otherwise malformed syntax.
    #[error("invalid expression: {reason}")]
    Syntax {
        /// What was wrong with the expression.
        reason: String,
    },

    /// An identifier outside the function/constant whitelist.
    #[error("use of '{name}' not allowed")]
    DisallowedIdentifier {
        /// The rejected identifier.
        name: String,
    },

    /// Mathematically undefined or out-of-range operation.
    #[error("{message}")]
    Domain {
        /// Description of the domain violation.
        message: String,
    },

    /// Catch-all for anything else the sandboxed evaluator refuses.
    #[error("evaluation error: {message}")]
    Evaluation {
        /// Description of the failure.
        message: String,
    },
}

impl CalcError {
    /// Creates a syntax error.
    pub fn syntax(reason: impl Into<String>) -> Self {
        Self::Syntax {
            reason: reason.into(),
        }
    }

    /// Creates a domain error.
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain {
            message: message.into(),
        }
    }

    /// Creates a generic evaluation error.
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
        }
    }

    /// Short machine-readable name of the error kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::EmptyExpression => "empty_expression",
            Self::Syntax { .. } => "syntax",
            Self::DisallowedIdentifier { .. } => "disallowed_identifier",
            Self::Domain { .. } => "domain",
            Self::Evaluation { .. } => "evaluation",
        }
    }
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Missing required argument.
    #[error("missing required argument: {0}")]
    MissingArgument(String),
}

/// I/O-specific errors.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_error_display() {
        assert_eq!(CalcError::EmptyExpression.to_string(), "empty expression");

        let err = CalcError::DisallowedIdentifier {
            name: "open".to_string(),
        };
        assert_eq!(err.to_string(), "use of 'open' not allowed");

        let err = CalcError::domain("division by zero");
        assert_eq!(err.to_string(), "division by zero");

        let err = CalcError::syntax("unbalanced parentheses");
        assert_eq!(err.to_string(), "invalid expression: unbalanced parentheses");

        let err = CalcError::evaluation("invalid expression");
        assert_eq!(err.to_string(), "evaluation error: invalid expression");
    }

    #[test]
    fn test_calc_error_kind() {
        assert_eq!(CalcError::EmptyExpression.kind(), "empty_expression");
        assert_eq!(CalcError::syntax("x").kind(), "syntax");
        assert_eq!(CalcError::domain("x").kind(), "domain");
        assert_eq!(CalcError::evaluation("x").kind(), "evaluation");
        let err = CalcError::DisallowedIdentifier {
            name: "x".to_string(),
        };
        assert_eq!(err.kind(), "disallowed_identifier");
    }

    #[test]
    fn test_error_from_calc() {
        let err: Error = CalcError::EmptyExpression.into();
        assert!(matches!(err, Error::Calc(CalcError::EmptyExpression)));
        assert_eq!(err.to_string(), "calculation error: empty expression");
    }

    #[test]
    fn test_error_from_command() {
        let err: Error = CommandError::MissingArgument("EXPR".to_string()).into();
        assert!(matches!(err, Error::Command(_)));
        assert!(err.to_string().contains("missing required argument: EXPR"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(IoError::Generic(_))));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_io_error_variants() {
        let err = IoError::FileNotFound {
            path: "/tmp/calc.json".to_string(),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/calc.json");

        let err = IoError::ReadFailed {
            path: "/tmp/calc.json".to_string(),
            reason: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_error_config() {
        let err = Error::config("bad angle mode");
        assert_eq!(err.to_string(), "configuration error: bad angle mode");
    }
}
