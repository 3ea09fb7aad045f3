//! Host Control Contract
//!
//! The operations a cluster-management layer needs from one database host.
//! Real controllers and the scriptable double implement the same trait, so
//! orchestration code can be written once, generic over `MysqlDaemon`, and
//! tested against the double.

use std::collections::HashMap;
use std::future::Future;

use crate::connection::{ConnectionRole, PooledConnection};
use crate::replication::{ReplicationPosition, ReplicationStatus};
use crate::schema::SchemaDefinition;

use super::context::WaitContext;
use super::errors::HostResult;

/// Control surface of a single database host.
///
/// Every operation except `wait_for_reparent_journal` returns immediately.
/// Operations that change host state take `&mut self`; a caller serializes
/// its interactions with one host.
pub trait MysqlDaemon {
    /// Address of this host's master, as shown by the replication status.
    ///
    /// Fails with `NotAReplica` when the host has no master.
    fn master_addr(&self) -> HostResult<String>;

    /// Port the engine listens on.
    fn mysql_port(&self) -> HostResult<i32>;

    // Replication

    /// Start applying replication. `hook_extra_env` is passed to any
    /// start hook the host runs.
    fn start_slave(&mut self, hook_extra_env: &HashMap<String, String>) -> HostResult<()>;

    /// Stop applying replication.
    fn stop_slave(&mut self, hook_extra_env: &HashMap<String, String>) -> HostResult<()>;

    /// Current replication status. A fresh value on every call.
    fn slave_status(&self) -> HostResult<ReplicationStatus>;

    // Reparenting

    /// Forcibly detach every replica of this host.
    fn break_slaves(&self) -> HostResult<()>;

    /// Current position of this host as a (potential) master.
    fn master_position(&self) -> HostResult<ReplicationPosition>;

    /// Set or clear read-only mode.
    fn set_read_only(&mut self, on: bool) -> HostResult<()>;

    /// Ordered statements that start replicating from `status`.
    fn start_replication_commands(&self, status: &ReplicationStatus) -> HostResult<Vec<String>>;

    /// Wait until the reparent journal holds an entry created at
    /// `time_created_ns`.
    ///
    /// Returns `Cancelled` promptly once `ctx` is cancelled or expires.
    fn wait_for_reparent_journal(
        &self,
        ctx: &WaitContext,
        time_created_ns: i64,
    ) -> impl Future<Output = HostResult<()>> + Send;

    // Schema

    /// Schema of `db_name`, narrowed by the table filters.
    fn get_schema(
        &self,
        db_name: &str,
        tables: &[String],
        exclude_tables: &[String],
        include_views: bool,
    ) -> HostResult<SchemaDefinition>;

    // Connections

    /// A pooled connection for `role`. The caller owns the handle.
    fn get_db_connection(&self, role: ConnectionRole) -> HostResult<Box<dyn PooledConnection>>;

    // Query execution

    /// Execute a batch of administrative statements as a unit.
    fn execute_super_query_list(&self, queries: &[String]) -> HostResult<()>;
}
