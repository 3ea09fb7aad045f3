//! Schema error types

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema filtering errors
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// A table or exclude pattern is not a valid regular expression
    #[error("invalid table pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern, as given by the caller
        pattern: String,
        /// Regex compiler diagnostic
        message: String,
    },
}

impl SchemaError {
    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => "SCHEMA_INVALID_PATTERN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_display() {
        let err = SchemaError::invalid_pattern("a(", "unclosed group");
        let display = err.to_string();
        assert!(display.contains("a("));
        assert!(display.contains("unclosed group"));
        assert_eq!(err.code(), "SCHEMA_INVALID_PATTERN");
    }
}
