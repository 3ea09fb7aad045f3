//! Schema Model
//!
//! Definitions of a database's tables and views, as returned by
//! `get_schema`, plus the table filter applied to them.
//!
//! How a schema is read from a live engine is not this module's concern;
//! it only shapes and narrows the result.

mod errors;
mod filter;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use types::{SchemaDefinition, TableDefinition, TableType};
