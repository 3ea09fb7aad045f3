//! hostctl - control contract for a single database host
//!
//! - `daemon`: the `MysqlDaemon` contract, its errors, and wait contexts
//! - `replication`, `schema`: the state model the contract exchanges
//! - `connection`: per-role connection factories
//! - `fake`: a fully scriptable double of the contract

pub mod cli;
pub mod connection;
pub mod daemon;
pub mod fake;
pub mod observability;
pub mod replication;
pub mod schema;
