//! CLI command implementations
//!
//! Each command loads a daemon script, replays one contract call against
//! the resulting double, and writes the JSON result. A rejected call is a
//! command failure.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::daemon::MysqlDaemon;
use crate::fake::DaemonScript;
use crate::replication::ReplicationStatus;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Run one command, writing its output to `out`.
pub fn run_command<W: Write>(command: Command, out: &mut W) -> CliResult<()> {
    match command {
        Command::CheckQueries { script, queries } => check_queries(&script, &queries, out),
        Command::CheckStatus { script, status } => check_status(&script, &status, out),
        Command::Schema {
            script,
            db_name,
            tables,
            exclude_tables,
            include_views,
        } => schema(&script, &db_name, &tables, &exclude_tables, include_views, out),
    }
}

/// Replay `execute_super_query_list`.
pub fn check_queries<W: Write>(script: &Path, queries: &Path, out: &mut W) -> CliResult<()> {
    let fmd = DaemonScript::load(script)?.into_daemon();
    let queries: Vec<String> = read_json(queries)?;

    fmd.execute_super_query_list(&queries)?;
    write_json(out, &json!({ "matched": true, "queries": queries.len() }))
}

/// Replay `start_replication_commands`.
pub fn check_status<W: Write>(script: &Path, status: &Path, out: &mut W) -> CliResult<()> {
    let fmd = DaemonScript::load(script)?.into_daemon();
    let status: ReplicationStatus = read_json(status)?;

    let commands = fmd.start_replication_commands(&status)?;
    write_json(out, &json!({ "commands": commands }))
}

/// Replay `get_schema`.
pub fn schema<W: Write>(
    script: &Path,
    db_name: &str,
    tables: &[String],
    exclude_tables: &[String],
    include_views: bool,
    out: &mut W,
) -> CliResult<()> {
    let fmd = DaemonScript::load(script)?.into_daemon();
    let sd = fmd.get_schema(db_name, tables, exclude_tables, include_views)?;
    write_json(out, &sd)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::input_error(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_str(&content)
        .map_err(|e| CliError::input_error(format!("Invalid JSON in {}: {}", path.display(), e)))
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::output_error(format!("Failed to encode output: {}", e)))?;

    writeln!(out, "{}", text)
        .map_err(|e| CliError::output_error(format!("Failed to write output: {}", e)))
}
