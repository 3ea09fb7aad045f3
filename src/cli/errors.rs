//! CLI-specific error types

use std::fmt;

use crate::daemon::HostError;
use crate::fake::ScriptError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Daemon script missing or invalid
    ScriptError,
    /// Input file missing or invalid
    InputError,
    /// The replayed call failed
    CheckFailed,
    /// Result could not be written
    OutputError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ScriptError => "HOSTCTL_SCRIPT_ERROR",
            Self::InputError => "HOSTCTL_INPUT_ERROR",
            Self::CheckFailed => "HOSTCTL_CHECK_FAILED",
            Self::OutputError => "HOSTCTL_OUTPUT_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Input file error
    pub fn input_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InputError, msg)
    }

    /// Output error
    pub fn output_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::OutputError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ScriptError> for CliError {
    fn from(e: ScriptError) -> Self {
        Self::new(CliErrorCode::ScriptError, e.to_string())
    }
}

impl From<HostError> for CliError {
    fn from(e: HostError) -> Self {
        Self::new(CliErrorCode::CheckFailed, format!("{}: {}", e.code(), e))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_keeps_code() {
        let err: CliError = HostError::NoSchema.into();
        assert_eq!(err.code(), CliErrorCode::CheckFailed);
        assert!(err.message().starts_with("HOST_NO_SCHEMA"));
        assert!(err.to_string().starts_with("[HOSTCTL_CHECK_FAILED]"));
    }
}
