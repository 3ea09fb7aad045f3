//! Daemon scripts
//!
//! A daemon script is a JSON document holding the serializable part of a
//! `FakeMysqlDaemon`'s expectation record. It lets a scenario be kept in a
//! fixture file and replayed from tests or the CLI.
//!
//! Missing fields take the double's defaults. Unknown fields are rejected
//! at every level, nested statuses and schemas included, so a typo cannot
//! silently turn an expectation off. Connection factories
//! cannot be scripted and are left unset.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event, HostEvent};
use crate::replication::{ReplicationPosition, ReplicationStatus};
use crate::schema::SchemaDefinition;

use super::daemon::{FakeMysqlDaemon, MYSQL_PORT_ERROR};

/// Result type for script loading
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Script loading errors
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Script file could not be read
    #[error("failed to read script {path}: {source}")]
    Io {
        /// Script path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Script is not valid JSON for a daemon script
    #[error("invalid script JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Script parsed but holds an impossible value
    #[error("invalid script: {0}")]
    Invalid(String),
}

/// Serializable expectation record of a `FakeMysqlDaemon`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonScript {
    /// See [`FakeMysqlDaemon::master_addr`]
    pub master_addr: String,
    /// See [`FakeMysqlDaemon::mysql_port`]
    pub mysql_port: i32,
    /// See [`FakeMysqlDaemon::replicating`]
    pub replicating: bool,
    /// See [`FakeMysqlDaemon::current_slave_status`]
    pub current_slave_status: Option<ReplicationStatus>,
    /// See [`FakeMysqlDaemon::break_slaves_error`]
    pub break_slaves_error: Option<String>,
    /// See [`FakeMysqlDaemon::current_master_position`]
    pub current_master_position: ReplicationPosition,
    /// See [`FakeMysqlDaemon::read_only`]
    pub read_only: bool,
    /// See [`FakeMysqlDaemon::start_replication_commands_status`]
    pub start_replication_commands_status: Option<ReplicationStatus>,
    /// See [`FakeMysqlDaemon::start_replication_commands_result`]
    pub start_replication_commands_result: Vec<String>,
    /// See [`FakeMysqlDaemon::schema`]
    pub schema: Option<SchemaDefinition>,
    /// See [`FakeMysqlDaemon::expected_execute_super_query_list`]
    pub expected_execute_super_query_list: Vec<String>,
    /// See [`FakeMysqlDaemon::reparent_journal`]
    pub reparent_journal: Option<Vec<i64>>,
}

impl DaemonScript {
    /// Load and validate a script file.
    pub fn load(path: &Path) -> ScriptResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let script = Self::parse(&content)?;
        let path_text = path.display().to_string();
        log_event(HostEvent::ScriptLoaded, &[("path", path_text.as_str())]);
        Ok(script)
    }

    /// Parse and validate a script from JSON text.
    pub fn parse(json: &str) -> ScriptResult<Self> {
        let script: DaemonScript = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    /// Reject values no host could report.
    pub fn validate(&self) -> ScriptResult<()> {
        if self.mysql_port < MYSQL_PORT_ERROR {
            return Err(ScriptError::Invalid(format!(
                "mysql_port must be >= {}, got {}",
                MYSQL_PORT_ERROR, self.mysql_port
            )));
        }
        Ok(())
    }

    /// Build a double from this script. Connection factories are unset.
    pub fn into_daemon(self) -> FakeMysqlDaemon {
        FakeMysqlDaemon {
            master_addr: self.master_addr,
            mysql_port: self.mysql_port,
            replicating: self.replicating,
            current_slave_status: self.current_slave_status,
            break_slaves_error: self.break_slaves_error,
            current_master_position: self.current_master_position,
            read_only: self.read_only,
            start_replication_commands_status: self.start_replication_commands_status,
            start_replication_commands_result: self.start_replication_commands_result,
            schema: self.schema,
            expected_execute_super_query_list: self.expected_execute_super_query_list,
            reparent_journal: self.reparent_journal,
            ..FakeMysqlDaemon::default()
        }
    }
}

impl From<&FakeMysqlDaemon> for DaemonScript {
    fn from(fmd: &FakeMysqlDaemon) -> Self {
        Self {
            master_addr: fmd.master_addr.clone(),
            mysql_port: fmd.mysql_port,
            replicating: fmd.replicating,
            current_slave_status: fmd.current_slave_status.clone(),
            break_slaves_error: fmd.break_slaves_error.clone(),
            current_master_position: fmd.current_master_position.clone(),
            read_only: fmd.read_only,
            start_replication_commands_status: fmd.start_replication_commands_status.clone(),
            start_replication_commands_result: fmd.start_replication_commands_result.clone(),
            schema: fmd.schema.clone(),
            expected_execute_super_query_list: fmd.expected_execute_super_query_list.clone(),
            reparent_journal: fmd.reparent_journal.clone(),
        }
    }
}
