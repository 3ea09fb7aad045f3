//! Replication Status
//!
//! Snapshot of a replica's state relative to its master, as reported by
//! the host. A fresh value is produced on every query and never updated in
//! place.

use serde::{Deserialize, Serialize};

use super::position::ReplicationPosition;

/// Replica state relative to its master.
///
/// Consumed whole: callers compare statuses structurally and hand them to
/// `start_replication_commands`. The double matches them with `==`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplicationStatus {
    /// Position the replica has applied up to
    pub position: ReplicationPosition,

    /// Whether the IO thread (fetching from master) is running
    pub slave_io_running: bool,

    /// Whether the SQL thread (applying events) is running
    pub slave_sql_running: bool,

    /// Replication lag
    pub seconds_behind_master: u32,

    /// Master host name
    pub master_host: String,

    /// Master port
    pub master_port: i32,

    /// Seconds between reconnect attempts to the master
    pub master_connect_retry: i32,
}

impl ReplicationStatus {
    /// Create a status for a replica of `master_host:master_port` at `position`.
    ///
    /// Both replication threads are reported as running and lag is zero.
    pub fn new(
        position: ReplicationPosition,
        master_host: impl Into<String>,
        master_port: i32,
    ) -> Self {
        Self {
            position,
            slave_io_running: true,
            slave_sql_running: true,
            seconds_behind_master: 0,
            master_host: master_host.into(),
            master_port,
            master_connect_retry: 10,
        }
    }

    /// Both replication threads are running.
    pub fn slave_running(&self) -> bool {
        self.slave_io_running && self.slave_sql_running
    }

    /// Master address as `host:port`.
    pub fn master_addr(&self) -> String {
        format!("{}:{}", self.master_host, self.master_port)
    }
}
