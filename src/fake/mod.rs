//! Scriptable Double
//!
//! A `MysqlDaemon` implementation driven entirely by configuration, used to
//! test orchestration code without a live database engine.
//!
//! # Verification
//!
//! - Scalar reads return configured values or synthesized errors
//! - `start_replication_commands` requires an exact status match
//! - `execute_super_query_list` matches the batch with prefix markers
//!   (see [`match_query_list`])
//! - Mismatches are errors carrying both sides, never panics
//!
//! The double is not thread-safe by itself: mutating calls take `&mut self`,
//! so a test drives one instance from one place at a time.

mod connection;
mod daemon;
mod matcher;
mod script;

pub use connection::{failing_factory, fake_factory, FakeConnection, QueryLog};
pub use daemon::{FakeMysqlDaemon, MASTER_ADDR_ERROR, MYSQL_PORT_ERROR, NOT_A_REPLICA};
pub use matcher::{match_query_list, prefix_expectation, QueryListMismatch, PREFIX_SENTINEL};
pub use script::{DaemonScript, ScriptError, ScriptResult};
