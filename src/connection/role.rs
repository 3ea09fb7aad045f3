//! Connection roles
//!
//! A host hands out connections under one of two database users. The role
//! picks which factory is asked for the connection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ConnectionError;

/// Database user a connection is opened as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionRole {
    /// Administrative user (replication control, super queries)
    Dba,
    /// Application user (regular query traffic)
    App,
}

impl ConnectionRole {
    /// Both roles, in a fixed order.
    pub const ALL: [ConnectionRole; 2] = [ConnectionRole::Dba, ConnectionRole::App];

    /// Short name used in logs and config.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dba => "dba",
            Self::App => "app",
        }
    }
}

impl fmt::Display for ConnectionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectionRole {
    type Err = ConnectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dba" => Ok(Self::Dba),
            "app" => Ok(Self::App),
            other => Err(ConnectionError::new(format!(
                "unknown connection role: '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_round_trip() {
        for role in ConnectionRole::ALL {
            assert_eq!(role.as_str().parse::<ConnectionRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = "filtered".parse::<ConnectionRole>().unwrap_err();
        assert!(err.to_string().contains("filtered"));
    }
}
