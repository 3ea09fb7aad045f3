//! Connection Provisioning
//!
//! Pluggable per-role factories and the opaque pooled-connection handle
//! they produce.
//!
//! The handle's lifecycle belongs to whichever pool produced it. Nothing in
//! this crate closes, recycles, or evicts a connection.

mod errors;
mod factory;
mod role;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use errors::{ConnectionError, ConnectionResult};
pub use factory::{ConnectionFactories, ConnectionFactory, FactoryOutcome};
pub use role::ConnectionRole;

/// Rows returned by a query, as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Column names
    pub fields: Vec<String>,
    /// Row values, one `Vec` per row
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    /// Create a result with the given columns and rows.
    pub fn new(fields: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { fields, rows }
    }

    /// Number of rows.
    pub fn rows_affected(&self) -> usize {
        self.rows.len()
    }
}

/// A usable database connection borrowed from a pool.
pub trait PooledConnection: fmt::Debug + Send {
    /// Identifier of the underlying connection, unique within its pool.
    fn connection_id(&self) -> u64;

    /// Check if the connection has been closed by its owner.
    fn is_closed(&self) -> bool;

    /// Run a query and return at most `max_rows` rows.
    fn execute_fetch(&mut self, query: &str, max_rows: usize) -> ConnectionResult<QueryResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct CountingConnection {
        id: u64,
    }

    impl PooledConnection for CountingConnection {
        fn connection_id(&self) -> u64 {
            self.id
        }

        fn is_closed(&self) -> bool {
            false
        }

        fn execute_fetch(&mut self, _query: &str, _max_rows: usize) -> ConnectionResult<QueryResult> {
            Ok(QueryResult::default())
        }
    }

    #[test]
    fn test_unset_factory() {
        let factories = ConnectionFactories::new();
        assert!(!factories.is_set(ConnectionRole::Dba));
        assert!(matches!(factories.connect(ConnectionRole::Dba), FactoryOutcome::Unset));
        assert!(matches!(factories.connect(ConnectionRole::App), FactoryOutcome::Unset));
    }

    #[test]
    fn test_factory_is_called_per_request() {
        let next_id = Arc::new(AtomicU64::new(1));
        let counter = Arc::clone(&next_id);
        let factories = ConnectionFactories::new().with(ConnectionRole::App, move || {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CountingConnection { id }) as Box<dyn PooledConnection>)
        });

        for expected in 1..=3 {
            match factories.connect(ConnectionRole::App) {
                FactoryOutcome::Connected(conn) => assert_eq!(conn.connection_id(), expected),
                other => panic!("expected connection, got {:?}", other),
            }
        }

        // The other role stays unset
        assert!(matches!(factories.connect(ConnectionRole::Dba), FactoryOutcome::Unset));
    }

    #[test]
    fn test_factory_failure_is_reported() {
        let factories = ConnectionFactories::new()
            .with(ConnectionRole::Dba, || Err(ConnectionError::new("access denied")));

        match factories.connect(ConnectionRole::Dba) {
            FactoryOutcome::Failed(e) => assert_eq!(e.message(), "access denied"),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_clear_factory() {
        let mut factories = ConnectionFactories::new()
            .with(ConnectionRole::Dba, || Err(ConnectionError::new("unused")));
        assert!(factories.is_set(ConnectionRole::Dba));

        factories.clear(ConnectionRole::Dba);
        assert!(!factories.is_set(ConnectionRole::Dba));
    }
}
