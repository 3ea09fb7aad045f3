//! Replication Position
//!
//! An opaque token naming a point in the replication stream.
//!
//! The position is produced by `master_position()` and handed back to
//! replication commands unchanged. It is never parsed here; the only
//! operations are equality, ordering, and display.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque replication stream position (e.g. a GTID set).
///
/// Ordering is the lexical order of the underlying token. It is stable and
/// total, which is all sorting and map keys need; it says nothing about
/// which position is further along in the stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplicationPosition(String);

impl ReplicationPosition {
    /// Wrap an engine-provided position token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The empty position, reported by hosts that never replicated.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Check if this is the empty position.
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReplicationPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ReplicationPosition {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ReplicationPosition {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
