//! Fully scriptable `MysqlDaemon`
//!
//! Every operation either returns a configured value, flips one of two
//! state flags, or validates its input against a configured expectation.
//! The double never panics on a mismatch: it returns a `HostError` naming
//! both sides so tests can assert on it.
//!
//! Only `replicating` (start/stop) and `read_only` (set_read_only) are
//! changed by calls. Everything else is set by the test author before the
//! call under test.

use std::collections::HashMap;
use std::future::Future;

use crate::connection::{ConnectionFactories, ConnectionRole, FactoryOutcome, PooledConnection};
use crate::daemon::{HostError, HostResult, MysqlDaemon, WaitContext};
use crate::observability::{log_event, HostEvent};
use crate::replication::{ReplicationPosition, ReplicationStatus};
use crate::schema::SchemaDefinition;

use super::matcher::match_query_list;

/// `master_addr` value reporting that the host is not a replica.
pub const NOT_A_REPLICA: &str = "";

/// `master_addr` value forcing a query failure.
pub const MASTER_ADDR_ERROR: &str = "ERROR";

/// `mysql_port` value forcing a query failure.
pub const MYSQL_PORT_ERROR: i32 = -1;

/// Scriptable stand-in for a database host.
#[derive(Debug, Default)]
pub struct FakeMysqlDaemon {
    /// Returned by `master_addr()`. [`NOT_A_REPLICA`] yields `NotAReplica`,
    /// [`MASTER_ADDR_ERROR`] yields `QueryFailed`.
    pub master_addr: String,

    /// Returned by `mysql_port()`. [`MYSQL_PORT_ERROR`] yields `QueryFailed`.
    pub mysql_port: i32,

    /// Set by `start_slave`, cleared by `stop_slave`.
    pub replicating: bool,

    /// Returned by `slave_status()`. `None` yields `NoStatus`.
    pub current_slave_status: Option<ReplicationStatus>,

    /// If set, `break_slaves()` fails with this message.
    pub break_slaves_error: Option<String>,

    /// Returned by `master_position()`.
    pub current_master_position: ReplicationPosition,

    /// Current read-only flag. Set by `set_read_only`.
    pub read_only: bool,

    /// Status `start_replication_commands` must be called with.
    /// `None` rejects every call.
    pub start_replication_commands_status: Option<ReplicationStatus>,

    /// Returned by `start_replication_commands` on a status match.
    pub start_replication_commands_result: Vec<String>,

    /// Returned (filtered) by `get_schema()`. `None` yields `NoSchema`.
    pub schema: Option<SchemaDefinition>,

    /// Batch `execute_super_query_list` must be called with.
    /// Entries starting with `SUB` are compared by prefix, other entries
    /// are not compared.
    pub expected_execute_super_query_list: Vec<String>,

    /// Reparent journal entries (creation times in ns) the host has.
    /// `None` makes every journal wait succeed at once.
    pub reparent_journal: Option<Vec<i64>>,

    /// Connection factories per role.
    pub connection_factories: ConnectionFactories,
}

impl FakeMysqlDaemon {
    /// Create a double that is not a replica and has nothing configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the master address.
    pub fn with_master_addr(mut self, addr: impl Into<String>) -> Self {
        self.master_addr = addr.into();
        self
    }

    /// Configure the expected statement batch.
    pub fn expect_query_list<I, S>(&mut self, queries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_execute_super_query_list = queries.into_iter().map(Into::into).collect();
    }
}

impl MysqlDaemon for FakeMysqlDaemon {
    fn master_addr(&self) -> HostResult<String> {
        match self.master_addr.as_str() {
            NOT_A_REPLICA => Err(HostError::NotAReplica),
            MASTER_ADDR_ERROR => Err(HostError::query_failed(
                "master_addr",
                "FakeMysqlDaemon.master_addr returns an error",
            )),
            addr => Ok(addr.to_string()),
        }
    }

    fn mysql_port(&self) -> HostResult<i32> {
        if self.mysql_port == MYSQL_PORT_ERROR {
            return Err(HostError::query_failed(
                "mysql_port",
                "FakeMysqlDaemon.mysql_port returns an error",
            ));
        }
        Ok(self.mysql_port)
    }

    fn start_slave(&mut self, hook_extra_env: &HashMap<String, String>) -> HostResult<()> {
        self.replicating = true;
        let env_vars = hook_extra_env.len().to_string();
        log_event(HostEvent::ReplicationStart, &[("hook_env_vars", env_vars.as_str())]);
        Ok(())
    }

    fn stop_slave(&mut self, hook_extra_env: &HashMap<String, String>) -> HostResult<()> {
        self.replicating = false;
        let env_vars = hook_extra_env.len().to_string();
        log_event(HostEvent::ReplicationStop, &[("hook_env_vars", env_vars.as_str())]);
        Ok(())
    }

    fn slave_status(&self) -> HostResult<ReplicationStatus> {
        self.current_slave_status.clone().ok_or(HostError::NoStatus)
    }

    fn break_slaves(&self) -> HostResult<()> {
        match &self.break_slaves_error {
            Some(message) => {
                log_event(HostEvent::BreakSlavesFailed, &[("reason", message.as_str())]);
                Err(HostError::BreakSlavesFailed(message.clone()))
            }
            None => {
                log_event(HostEvent::BreakSlaves, &[]);
                Ok(())
            }
        }
    }

    fn master_position(&self) -> HostResult<ReplicationPosition> {
        Ok(self.current_master_position.clone())
    }

    fn set_read_only(&mut self, on: bool) -> HostResult<()> {
        self.read_only = on;
        log_event(HostEvent::ReadOnlySet, &[("read_only", if on { "true" } else { "false" })]);
        Ok(())
    }

    fn start_replication_commands(&self, status: &ReplicationStatus) -> HostResult<Vec<String>> {
        if self.start_replication_commands_status.as_ref() != Some(status) {
            log_event(
                HostEvent::StatusMismatch,
                &[
                    ("expected_set", if self.start_replication_commands_status.is_some() { "true" } else { "false" }),
                    ("got_position", status.position.as_str()),
                ],
            );
            return Err(HostError::status_mismatch(
                self.start_replication_commands_status.as_ref(),
                status,
            ));
        }

        let commands = self.start_replication_commands_result.len().to_string();
        log_event(HostEvent::StartCommandsBuilt, &[("commands", commands.as_str())]);
        Ok(self.start_replication_commands_result.clone())
    }

    fn wait_for_reparent_journal(
        &self,
        ctx: &WaitContext,
        time_created_ns: i64,
    ) -> impl Future<Output = HostResult<()>> + Send {
        let observed = match &self.reparent_journal {
            None => true,
            Some(entries) => entries.contains(&time_created_ns),
        };
        let ctx = ctx.clone();

        async move {
            let time_created = time_created_ns.to_string();
            if observed {
                log_event(HostEvent::ReparentJournalObserved, &[("time_created_ns", time_created.as_str())]);
                return Ok(());
            }

            log_event(HostEvent::ReparentJournalWait, &[("time_created_ns", time_created.as_str())]);
            let reason = ctx.cancelled().await;
            let reason_text = reason.to_string();
            log_event(
                HostEvent::ReparentJournalCancelled,
                &[("reason", reason_text.as_str()), ("time_created_ns", time_created.as_str())],
            );
            Err(HostError::Cancelled(reason))
        }
    }

    fn get_schema(
        &self,
        _db_name: &str,
        tables: &[String],
        exclude_tables: &[String],
        include_views: bool,
    ) -> HostResult<SchemaDefinition> {
        let schema = self.schema.as_ref().ok_or(HostError::NoSchema)?;
        Ok(schema.filter_tables(tables, exclude_tables, include_views)?)
    }

    fn get_db_connection(&self, role: ConnectionRole) -> HostResult<Box<dyn PooledConnection>> {
        match self.connection_factories.connect(role) {
            FactoryOutcome::Connected(conn) => {
                let connection_id = conn.connection_id().to_string();
                log_event(
                    HostEvent::ConnectionAcquired,
                    &[("connection_id", connection_id.as_str()), ("role", role.as_str())],
                );
                Ok(conn)
            }
            FactoryOutcome::Unset => {
                log_event(HostEvent::ConnectionFailed, &[("reason", "no factory"), ("role", role.as_str())]);
                Err(HostError::NoFactory(role))
            }
            FactoryOutcome::Failed(source) => {
                log_event(
                    HostEvent::ConnectionFailed,
                    &[("reason", source.message()), ("role", role.as_str())],
                );
                Err(HostError::FactoryError { role, source })
            }
        }
    }

    fn execute_super_query_list(&self, queries: &[String]) -> HostResult<()> {
        let expected = &self.expected_execute_super_query_list;
        match match_query_list(expected, queries) {
            Ok(()) => {
                let count = queries.len().to_string();
                log_event(HostEvent::QueryListExecuted, &[("queries", count.as_str())]);
                Ok(())
            }
            Err(mismatch) => {
                let actual_len = queries.len().to_string();
                let expected_len = expected.len().to_string();
                let index = mismatch.index.map(|i| i.to_string()).unwrap_or_default();
                let reason = mismatch.reason.to_string();
                log_event(
                    HostEvent::StatementMismatch,
                    &[
                        ("actual_len", actual_len.as_str()),
                        ("expected_len", expected_len.as_str()),
                        ("index", index.as_str()),
                        ("reason", reason.as_str()),
                    ],
                );
                Err(HostError::statement_mismatch(mismatch.reason, expected, queries))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daemon::{HostErrorKind, MismatchReason};

    fn status(position: &str) -> ReplicationStatus {
        ReplicationStatus::new(ReplicationPosition::new(position), "master-1", 3306)
    }

    #[test]
    fn test_default_is_not_a_replica() {
        let fmd = FakeMysqlDaemon::new();
        assert_eq!(fmd.master_addr().unwrap_err().kind(), HostErrorKind::NotAReplica);
        assert_eq!(fmd.mysql_port().unwrap(), 0);
        assert!(!fmd.replicating);
        assert!(!fmd.read_only);
    }

    #[test]
    fn test_master_addr_sentinels() {
        let fmd = FakeMysqlDaemon::new().with_master_addr("master-1:3306");
        assert_eq!(fmd.master_addr().unwrap(), "master-1:3306");

        let fmd = FakeMysqlDaemon::new().with_master_addr(MASTER_ADDR_ERROR);
        assert_eq!(fmd.master_addr().unwrap_err().kind(), HostErrorKind::QueryFailed);
    }

    #[test]
    fn test_mysql_port_sentinel() {
        let mut fmd = FakeMysqlDaemon::new();
        fmd.mysql_port = 3306;
        assert_eq!(fmd.mysql_port().unwrap(), 3306);

        fmd.mysql_port = MYSQL_PORT_ERROR;
        assert_eq!(fmd.mysql_port().unwrap_err().kind(), HostErrorKind::QueryFailed);
    }

    #[test]
    fn test_replicating_flag() {
        let mut fmd = FakeMysqlDaemon::new();
        let env = HashMap::new();

        fmd.start_slave(&env).unwrap();
        assert!(fmd.replicating);
        fmd.start_slave(&env).unwrap();
        assert!(fmd.replicating);

        fmd.stop_slave(&env).unwrap();
        assert!(!fmd.replicating);
    }

    #[test]
    fn test_read_only_flag() {
        let mut fmd = FakeMysqlDaemon::new();
        fmd.set_read_only(true).unwrap();
        assert!(fmd.read_only);
        fmd.set_read_only(false).unwrap();
        assert!(!fmd.read_only);
    }

    #[test]
    fn test_slave_status_unset() {
        let mut fmd = FakeMysqlDaemon::new();
        assert_eq!(fmd.slave_status().unwrap_err().kind(), HostErrorKind::NoStatus);

        fmd.current_slave_status = Some(status("0-1-5"));
        assert_eq!(fmd.slave_status().unwrap(), status("0-1-5"));
    }

    #[test]
    fn test_break_slaves_error() {
        let mut fmd = FakeMysqlDaemon::new();
        assert!(fmd.break_slaves().is_ok());

        fmd.break_slaves_error = Some("replica still attached".into());
        let err = fmd.break_slaves().unwrap_err();
        assert!(err.to_string().contains("replica still attached"));
    }

    #[test]
    fn test_start_replication_commands_match() {
        let mut fmd = FakeMysqlDaemon::new();
        fmd.start_replication_commands_status = Some(status("0-1-5"));
        fmd.start_replication_commands_result = vec!["CHANGE MASTER TO".into(), "START SLAVE".into()];

        assert_eq!(
            fmd.start_replication_commands(&status("0-1-5")).unwrap(),
            vec!["CHANGE MASTER TO", "START SLAVE"]
        );

        let err = fmd.start_replication_commands(&status("0-1-6")).unwrap_err();
        assert_eq!(err.kind(), HostErrorKind::StatusMismatch);
        assert!(err.to_string().contains("0-1-6"));
    }

    #[test]
    fn test_start_replication_commands_unset_never_matches() {
        let fmd = FakeMysqlDaemon::new();
        let err = fmd.start_replication_commands(&ReplicationStatus::default()).unwrap_err();
        assert!(matches!(err, HostError::StatusMismatch { expected: None, .. }));
    }

    #[test]
    fn test_execute_super_query_list_reports_lists() {
        let mut fmd = FakeMysqlDaemon::new();
        fmd.expect_query_list(["SUBinsert into"]);

        let actual = vec!["delete from t".to_string()];
        match fmd.execute_super_query_list(&actual).unwrap_err() {
            HostError::StatementMismatch { reason, expected, actual: got } => {
                assert_eq!(reason, MismatchReason::Content);
                assert_eq!(expected, vec!["SUBinsert into"]);
                assert_eq!(got, actual);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_calls_do_not_touch_expectations() {
        let mut fmd = FakeMysqlDaemon::new();
        fmd.expect_query_list(["SUBSTOP SLAVE", "placeholder"]);
        fmd.start_replication_commands_status = Some(status("0-1-5"));

        let _ = fmd.execute_super_query_list(&["START SLAVE".to_string()]);
        let _ = fmd.start_replication_commands(&status("0-1-9"));

        assert_eq!(fmd.expected_execute_super_query_list, vec!["SUBSTOP SLAVE", "placeholder"]);
        assert_eq!(fmd.start_replication_commands_status, Some(status("0-1-5")));
    }
}
