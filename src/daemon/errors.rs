//! Host control error types
//!
//! Every contract operation reports failure to its immediate caller.
//! Nothing here retries or suppresses; retry policy belongs to the
//! orchestrator.

use std::fmt;

use thiserror::Error;

use crate::connection::{ConnectionError, ConnectionRole};
use crate::replication::ReplicationStatus;
use crate::schema::SchemaError;

use super::context::CancelReason;

/// Result type for host control operations
pub type HostResult<T> = Result<T, HostError>;

/// Which check rejected an administrative statement batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchReason {
    /// Batch length differs from the expected list
    Size,
    /// A compared position differs
    Content,
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size => write!(f, "size"),
            Self::Content => write!(f, "content"),
        }
    }
}

/// Host control errors
#[derive(Debug, Error)]
pub enum HostError {
    /// Host has no configured master
    #[error("not a replica: no master configured")]
    NotAReplica,

    /// Simple scalar query failed
    #[error("{operation} failed: {message}")]
    QueryFailed {
        /// Operation that issued the query
        operation: &'static str,
        /// Failure detail
        message: String,
    },

    /// No replication status is known
    #[error("no slave status defined")]
    NoStatus,

    /// No schema is available
    #[error("no schema defined")]
    NoSchema,

    /// Reparent status argument differs from the expected one
    #[error("wrong status for start_replication_commands: expected {expected:?} got {got:?}")]
    StatusMismatch {
        /// Status the host was told to expect (None if never set)
        expected: Option<Box<ReplicationStatus>>,
        /// Status the caller passed
        got: Box<ReplicationStatus>,
    },

    /// Administrative statement batch failed expectation matching
    #[error("wrong query list {reason} for execute_super_query_list: expected {expected:?} got {actual:?}")]
    StatementMismatch {
        /// Which check failed
        reason: MismatchReason,
        /// Expected list, unmodified
        expected: Vec<String>,
        /// Actual list, unmodified
        actual: Vec<String>,
    },

    /// No connection factory set for the role
    #[error("no {0} connection factory set")]
    NoFactory(ConnectionRole),

    /// Connection factory returned an error
    #[error("{role} connection factory failed: {source}")]
    FactoryError {
        /// Role that was requested
        role: ConnectionRole,
        /// Factory failure
        #[source]
        source: ConnectionError,
    },

    /// Blocking wait aborted
    #[error("wait aborted: {0}")]
    Cancelled(CancelReason),

    /// Detaching replicas failed
    #[error("break slaves failed: {0}")]
    BreakSlavesFailed(String),

    /// Schema filter failed
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Host error kinds, for callers that branch on the failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostErrorKind {
    NotAReplica,
    QueryFailed,
    NoStatus,
    NoSchema,
    StatusMismatch,
    StatementMismatch,
    NoFactory,
    FactoryError,
    Cancelled,
    BreakSlavesFailed,
    Schema,
}

impl HostError {
    /// Create a query failure for `operation`.
    pub fn query_failed(operation: &'static str, message: impl Into<String>) -> Self {
        Self::QueryFailed {
            operation,
            message: message.into(),
        }
    }

    /// Create a status mismatch error.
    pub fn status_mismatch(expected: Option<&ReplicationStatus>, got: &ReplicationStatus) -> Self {
        Self::StatusMismatch {
            expected: expected.map(|s| Box::new(s.clone())),
            got: Box::new(got.clone()),
        }
    }

    /// Create a statement mismatch error carrying both lists.
    pub fn statement_mismatch(reason: MismatchReason, expected: &[String], actual: &[String]) -> Self {
        Self::StatementMismatch {
            reason,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> HostErrorKind {
        match self {
            Self::NotAReplica => HostErrorKind::NotAReplica,
            Self::QueryFailed { .. } => HostErrorKind::QueryFailed,
            Self::NoStatus => HostErrorKind::NoStatus,
            Self::NoSchema => HostErrorKind::NoSchema,
            Self::StatusMismatch { .. } => HostErrorKind::StatusMismatch,
            Self::StatementMismatch { .. } => HostErrorKind::StatementMismatch,
            Self::NoFactory(_) => HostErrorKind::NoFactory,
            Self::FactoryError { .. } => HostErrorKind::FactoryError,
            Self::Cancelled(_) => HostErrorKind::Cancelled,
            Self::BreakSlavesFailed(_) => HostErrorKind::BreakSlavesFailed,
            Self::Schema(_) => HostErrorKind::Schema,
        }
    }

    /// Stable error code for logs and CLI output.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            HostErrorKind::NotAReplica => "HOST_NOT_A_REPLICA",
            HostErrorKind::QueryFailed => "HOST_QUERY_FAILED",
            HostErrorKind::NoStatus => "HOST_NO_STATUS",
            HostErrorKind::NoSchema => "HOST_NO_SCHEMA",
            HostErrorKind::StatusMismatch => "HOST_STATUS_MISMATCH",
            HostErrorKind::StatementMismatch => "HOST_STATEMENT_MISMATCH",
            HostErrorKind::NoFactory => "HOST_NO_FACTORY",
            HostErrorKind::FactoryError => "HOST_FACTORY_ERROR",
            HostErrorKind::Cancelled => "HOST_CANCELLED",
            HostErrorKind::BreakSlavesFailed => "HOST_BREAK_SLAVES_FAILED",
            HostErrorKind::Schema => "HOST_SCHEMA_ERROR",
        }
    }
}
