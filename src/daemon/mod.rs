//! Host Control Subsystem
//!
//! The contract a cluster-management layer uses to operate one database
//! host, grouped into:
//! - connection provisioning
//! - replication control
//! - reparenting
//! - schema introspection
//! - statement execution
//!
//! Failures are explicit `HostError` values. Blocking waits observe a
//! `WaitContext` and return promptly when it is cancelled.

mod context;
mod contract;
mod errors;

pub use context::{CancelHandle, CancelReason, WaitContext};
pub use contract::MysqlDaemon;
pub use errors::{HostError, HostErrorKind, HostResult, MismatchReason};
