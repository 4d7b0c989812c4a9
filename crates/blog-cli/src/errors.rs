//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// The database could not be opened
    StoreUnavailable { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// The integrity check found a problem
    IntegrityFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::StoreUnavailable { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::IntegrityFailed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a StoreUnavailable error with message and hint.
    pub fn store_unavailable(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::StoreUnavailable {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::StoreUnavailable { .. } => exit_codes::STORE_UNAVAILABLE,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::exit_codes;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CliError::store_unavailable("m", "h").exit_code(),
            exit_codes::STORE_UNAVAILABLE
        );
        assert_eq!(
            CliError::invalid_input("bad").exit_code(),
            exit_codes::INVALID_INPUT
        );
        assert_eq!(
            CliError::IntegrityFailed("x".into()).exit_code(),
            exit_codes::INTEGRITY_FAILED
        );
    }

    #[test]
    fn test_display_includes_hint() {
        let err = CliError::store_unavailable("Cannot open", "Check --db");
        assert_eq!(err.to_string(), "Cannot open\nCheck --db");
    }
}
