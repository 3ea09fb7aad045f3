//! Per-role connection factories
//!
//! Real and fake hosts alike obtain connections through these pluggable
//! functions, so a test can hand the double a factory that returns a
//! scripted connection or a scripted failure.

use std::fmt;

use super::errors::ConnectionResult;
use super::role::ConnectionRole;
use super::PooledConnection;

/// Zero-argument function producing a pooled connection.
pub type ConnectionFactory =
    Box<dyn Fn() -> ConnectionResult<Box<dyn PooledConnection>> + Send + Sync>;

/// Outcome of asking for a connection by role.
///
/// Distinguishes "no factory configured" from "the factory itself failed",
/// which callers report differently.
#[derive(Debug)]
pub enum FactoryOutcome {
    /// The factory produced a connection
    Connected(Box<dyn PooledConnection>),
    /// No factory is set for the role
    Unset,
    /// The factory returned an error
    Failed(super::ConnectionError),
}

/// One optional factory per role.
#[derive(Default)]
pub struct ConnectionFactories {
    dba: Option<ConnectionFactory>,
    app: Option<ConnectionFactory>,
}

impl ConnectionFactories {
    /// Create with both factories unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the factory for `role`, replacing any previous one.
    pub fn set<F>(&mut self, role: ConnectionRole, factory: F)
    where
        F: Fn() -> ConnectionResult<Box<dyn PooledConnection>> + Send + Sync + 'static,
    {
        *self.slot_mut(role) = Some(Box::new(factory));
    }

    /// Builder form of [`set`](Self::set).
    pub fn with<F>(mut self, role: ConnectionRole, factory: F) -> Self
    where
        F: Fn() -> ConnectionResult<Box<dyn PooledConnection>> + Send + Sync + 'static,
    {
        self.set(role, factory);
        self
    }

    /// Remove the factory for `role`.
    pub fn clear(&mut self, role: ConnectionRole) {
        *self.slot_mut(role) = None;
    }

    /// Check if a factory is set for `role`.
    pub fn is_set(&self, role: ConnectionRole) -> bool {
        self.slot(role).is_some()
    }

    /// Invoke the factory for `role`.
    pub fn connect(&self, role: ConnectionRole) -> FactoryOutcome {
        match self.slot(role) {
            None => FactoryOutcome::Unset,
            Some(factory) => match factory() {
                Ok(conn) => FactoryOutcome::Connected(conn),
                Err(e) => FactoryOutcome::Failed(e),
            },
        }
    }

    fn slot(&self, role: ConnectionRole) -> &Option<ConnectionFactory> {
        match role {
            ConnectionRole::Dba => &self.dba,
            ConnectionRole::App => &self.app,
        }
    }

    fn slot_mut(&mut self, role: ConnectionRole) -> &mut Option<ConnectionFactory> {
        match role {
            ConnectionRole::Dba => &mut self.dba,
            ConnectionRole::App => &mut self.app,
        }
    }
}

impl fmt::Debug for ConnectionFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionFactories")
            .field("dba", &self.dba.is_some())
            .field("app", &self.app.is_some())
            .finish()
    }
}
