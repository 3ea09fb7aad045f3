//! CLI module for hostctl
//!
//! Provides command-line access to the scriptable double:
//! - check-queries: replay a statement batch
//! - check-status: replay a reparent status
//! - schema: print a filtered schema

mod args;
mod commands;
mod errors;

use std::io;

use crate::observability::Logger;

pub use args::{Cli, Command};
pub use commands::{check_queries, check_status, run_command, schema};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments and run the selected command against stdout.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    Logger::set_min_severity(cli.log_level);
    run_command(cli.command, &mut io::stdout())
}
