//! Observable host control events
//!
//! Events are explicit and typed; each carries its own severity.

use std::fmt;

use super::logger::Severity;

/// Events emitted by host controllers and the double
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    // Replication
    /// Replication started
    ReplicationStart,
    /// Replication stopped
    ReplicationStop,

    // Reparenting
    /// Read-only flag changed
    ReadOnlySet,
    /// Replicas detached
    BreakSlaves,
    /// Detaching replicas failed
    BreakSlavesFailed,
    /// Replication start commands built
    StartCommandsBuilt,
    /// Reparent status did not match expectation
    StatusMismatch,
    /// Waiting on the reparent journal
    ReparentJournalWait,
    /// Reparent journal entry found
    ReparentJournalObserved,
    /// Reparent journal wait cancelled
    ReparentJournalCancelled,

    // Statements
    /// Statement batch accepted
    QueryListExecuted,
    /// Statement batch rejected by expectation matching
    StatementMismatch,

    // Connections
    /// Connection handed out
    ConnectionAcquired,
    /// Connection factory missing or failed
    ConnectionFailed,

    // Configuration
    /// Daemon script loaded
    ScriptLoaded,
}

impl HostEvent {
    /// Returns the event name
    pub fn as_str(&self) -> &'static str {
        match self {
            HostEvent::ReplicationStart => "REPLICATION_START",
            HostEvent::ReplicationStop => "REPLICATION_STOP",
            HostEvent::ReadOnlySet => "READ_ONLY_SET",
            HostEvent::BreakSlaves => "BREAK_SLAVES",
            HostEvent::BreakSlavesFailed => "BREAK_SLAVES_FAILED",
            HostEvent::StartCommandsBuilt => "START_COMMANDS_BUILT",
            HostEvent::StatusMismatch => "STATUS_MISMATCH",
            HostEvent::ReparentJournalWait => "REPARENT_JOURNAL_WAIT",
            HostEvent::ReparentJournalObserved => "REPARENT_JOURNAL_OBSERVED",
            HostEvent::ReparentJournalCancelled => "REPARENT_JOURNAL_CANCELLED",
            HostEvent::QueryListExecuted => "QUERY_LIST_EXECUTED",
            HostEvent::StatementMismatch => "STATEMENT_MISMATCH",
            HostEvent::ConnectionAcquired => "CONNECTION_ACQUIRED",
            HostEvent::ConnectionFailed => "CONNECTION_FAILED",
            HostEvent::ScriptLoaded => "SCRIPT_LOADED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            HostEvent::StatusMismatch
            | HostEvent::StatementMismatch
            | HostEvent::ReparentJournalCancelled
            | HostEvent::BreakSlavesFailed
            | HostEvent::ConnectionFailed => Severity::Warn,
            HostEvent::ReplicationStart
            | HostEvent::ReplicationStop
            | HostEvent::ReadOnlySet
            | HostEvent::BreakSlaves
            | HostEvent::ScriptLoaded => Severity::Info,
            _ => Severity::Trace,
        }
    }
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
