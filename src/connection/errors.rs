//! Connection error types

use thiserror::Error;

/// Result type for connection operations
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Failure reported by a connection factory or a pooled connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConnectionError {
    message: String,
}

impl ConnectionError {
    /// Create a connection error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Create an error for a use of a closed connection.
    pub fn closed() -> Self {
        Self::new("connection is closed")
    }

    /// Get the message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
