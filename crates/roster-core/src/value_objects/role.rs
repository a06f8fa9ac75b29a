//! Job roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role held by a user
///
/// Only `ProjectManager` and `Supervisor` are managerial: they may administer
/// other users and their attendance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ProjectManager,
    Supervisor,
    #[default]
    Driver,
    DeliveryAssociate,
    Sweeper,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 5] = [
        Role::ProjectManager,
        Role::Supervisor,
        Role::Driver,
        Role::DeliveryAssociate,
        Role::Sweeper,
    ];

    /// Wire and storage representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProjectManager => "project_manager",
            Self::Supervisor => "supervisor",
            Self::Driver => "driver",
            Self::DeliveryAssociate => "delivery_associate",
            Self::Sweeper => "sweeper",
        }
    }

    /// Whether this role may manage other users
    #[inline]
    pub const fn is_managerial(self) -> bool {
        matches!(self, Self::ProjectManager | Self::Supervisor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unknown role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}
