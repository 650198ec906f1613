//! Admin identity as asserted by the fronting access proxy.

use serde::{Deserialize, Serialize};

// Re-export AdminRole from core for convenience
pub use oakmere_core::AdminRole;

/// The admin on whose behalf a request is being handled.
///
/// Authentication itself is owned by the access proxy in front of this
/// panel; by the time a request reaches us the identity has already been
/// verified and is carried in trusted headers (see [`crate::middleware::auth`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Display name.
    pub name: String,
    /// Email address, when the proxy forwards one.
    pub email: Option<String>,
    /// Role/permission level.
    pub role: AdminRole,
}

impl CurrentAdmin {
    /// Whether this admin may edit catalog data.
    #[must_use]
    pub const fn can_manage_store(&self) -> bool {
        self.role.can_manage_store()
    }
}
