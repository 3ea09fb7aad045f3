//! CLI argument definitions using clap
//!
//! Commands:
//! - hostctl check-queries --script <path> --queries <path>
//! - hostctl check-status --script <path> --status <path>
//! - hostctl schema --script <path> [--table P]... [--exclude P]... [--include-views]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::observability::Severity;

/// hostctl - replay host control calls against a scripted double
#[derive(Parser, Debug)]
#[command(name = "hostctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Minimum severity of log lines (trace, info, warn, error, fatal)
    #[arg(long, global = true, default_value = "error")]
    pub log_level: Severity,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a statement batch against the script's expected batch
    CheckQueries {
        /// Path to the daemon script
        #[arg(long)]
        script: PathBuf,

        /// Path to a JSON array of statements
        #[arg(long)]
        queries: PathBuf,
    },

    /// Check a replication status against the script's expected status
    CheckStatus {
        /// Path to the daemon script
        #[arg(long)]
        script: PathBuf,

        /// Path to a JSON replication status
        #[arg(long)]
        status: PathBuf,
    },

    /// Print the script's schema, filtered
    Schema {
        /// Path to the daemon script
        #[arg(long)]
        script: PathBuf,

        /// Database name
        #[arg(long, default_value = "")]
        db_name: String,

        /// Table name or pattern to include (repeatable)
        #[arg(long = "table")]
        tables: Vec<String>,

        /// Table name or pattern to exclude (repeatable)
        #[arg(long = "exclude")]
        exclude_tables: Vec<String>,

        /// Keep views in the output
        #[arg(long)]
        include_views: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema_command() {
        let cli = Cli::try_parse_from([
            "hostctl",
            "schema",
            "--script",
            "s.json",
            "--table",
            "users",
            "--table",
            "order.*",
            "--exclude",
            "order_items",
            "--include-views",
        ])
        .unwrap();

        match cli.command {
            Command::Schema {
                tables,
                exclude_tables,
                include_views,
                db_name,
                ..
            } => {
                assert_eq!(tables, vec!["users", "order.*"]);
                assert_eq!(exclude_tables, vec!["order_items"]);
                assert!(include_views);
                assert_eq!(db_name, "");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_check_queries_requires_paths() {
        assert!(Cli::try_parse_from(["hostctl", "check-queries", "--script", "s.json"]).is_err());
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::try_parse_from(["hostctl", "schema", "--script", "s.json"]).unwrap();
        assert_eq!(cli.log_level, Severity::Error);

        let cli =
            Cli::try_parse_from(["hostctl", "schema", "--script", "s.json", "--log-level", "trace"]).unwrap();
        assert_eq!(cli.log_level, Severity::Trace);

        assert!(Cli::try_parse_from(["hostctl", "--log-level", "loud", "schema", "--script", "s.json"]).is_err());
    }
}
