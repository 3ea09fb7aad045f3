//! Scripted pooled connections
//!
//! `FakeConnection` answers queries from a fixed result table and records
//! every query it sees in a `QueryLog` shared with the test.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::connection::{
    ConnectionError, ConnectionResult, ConnectionRole, PooledConnection, QueryResult,
};

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Queries seen by fake connections, in order.
#[derive(Debug, Clone, Default)]
pub struct QueryLog {
    queries: Arc<Mutex<Vec<String>>>,
}

impl QueryLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded queries.
    pub fn queries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of recorded queries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn record(&self, query: &str) {
        self.lock().push(query.to_string());
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        // A panicking test thread must not hide what was recorded.
        self.queries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Pooled connection answering from a scripted result table.
#[derive(Debug)]
pub struct FakeConnection {
    id: u64,
    role: ConnectionRole,
    results: HashMap<String, QueryResult>,
    log: QueryLog,
    closed: bool,
}

impl FakeConnection {
    /// Create a connection with no scripted results.
    pub fn new(role: ConnectionRole) -> Self {
        Self::with_log(role, HashMap::new(), QueryLog::new())
    }

    /// Create a connection sharing `log`.
    pub fn with_log(role: ConnectionRole, results: HashMap<String, QueryResult>, log: QueryLog) -> Self {
        Self {
            id: NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
            role,
            results,
            log,
            closed: false,
        }
    }

    /// Script the result of `query`.
    pub fn with_result(mut self, query: impl Into<String>, result: QueryResult) -> Self {
        self.results.insert(query.into(), result);
        self
    }

    /// Role this connection was created for.
    pub fn role(&self) -> ConnectionRole {
        self.role
    }

    /// The log this connection records into.
    pub fn query_log(&self) -> QueryLog {
        self.log.clone()
    }

    /// Close the connection. Later queries fail.
    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl PooledConnection for FakeConnection {
    fn connection_id(&self) -> u64 {
        self.id
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn execute_fetch(&mut self, query: &str, max_rows: usize) -> ConnectionResult<QueryResult> {
        if self.closed {
            return Err(ConnectionError::closed());
        }
        self.log.record(query);

        let result = self.results.get(query).ok_or_else(|| {
            ConnectionError::new(format!("unexpected query on fake {} connection: {}", self.role, query))
        })?;

        if result.rows.len() > max_rows {
            return Err(ConnectionError::new(format!(
                "row count exceeded {} for query: {}",
                max_rows, query
            )));
        }
        Ok(result.clone())
    }
}

/// Factory handing out a fresh `FakeConnection` per call.
///
/// Every connection answers from `results` and records into the returned
/// log.
pub fn fake_factory(
    role: ConnectionRole,
    results: HashMap<String, QueryResult>,
) -> (
    impl Fn() -> ConnectionResult<Box<dyn PooledConnection>> + Send + Sync + 'static,
    QueryLog,
) {
    let log = QueryLog::new();
    let shared = log.clone();
    let factory = move || {
        Ok(Box::new(FakeConnection::with_log(role, results.clone(), shared.clone()))
            as Box<dyn PooledConnection>)
    };
    (factory, log)
}

/// Factory that always fails with `message`.
pub fn failing_factory(
    message: impl Into<String>,
) -> impl Fn() -> ConnectionResult<Box<dyn PooledConnection>> + Send + Sync + 'static {
    let message = message.into();
    move || Err(ConnectionError::new(message.clone()))
}
