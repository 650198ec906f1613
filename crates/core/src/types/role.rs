//! Admin role levels.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role/permission level of an admin panel user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access to all admin features including user management.
    SuperAdmin,
    /// Full access to store management features.
    Admin,
    /// Read-only access to store data.
    Viewer,
}

impl AdminRole {
    /// Whether this role may manage catalog data (edit products, etc.).
    #[must_use]
    pub const fn can_manage_store(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }
}

impl core::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

/// Error returned when parsing an unknown role string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown admin role: {0}")]
pub struct AdminRoleParseError(pub String);

impl core::str::FromStr for AdminRole {
    type Err = AdminRoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            other => Err(AdminRoleParseError(other.to_owned())),
        }
    }
}
