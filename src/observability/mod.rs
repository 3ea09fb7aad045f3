//! Observability for host control
//!
//! - Structured logging (JSON lines)
//! - Typed host events
//!
//! Observability is read-only: logging never changes the outcome of the
//! operation being logged.
//!
//! # Usage
//!
//! ```ignore
//! use hostctl::observability::{log_event, HostEvent};
//!
//! log_event(HostEvent::ReadOnlySet, &[("read_only", "true")]);
//! ```

mod events;
mod logger;

pub use events::HostEvent;
pub use logger::{Logger, Severity};

/// Log a host event at its own severity.
pub fn log_event(event: HostEvent, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
