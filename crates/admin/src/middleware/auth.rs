//! Authentication extractor for admin.
//!
//! Authentication itself lives in the access proxy fronting this panel; the
//! panel is never reachable without it. The proxy asserts the verified
//! identity in trusted headers on every request, and [`RequireAdminAuth`]
//! turns those into a [`CurrentAdmin`] or rejects the request.

use axum::{extract::FromRequestParts, http::request::Parts};

use oakmere_core::AdminRole;

use crate::{error::AppError, models::CurrentAdmin};

/// Identity headers set by the fronting access proxy.
pub mod identity_headers {
    /// Display name of the authenticated admin.
    pub const USER: &str = "x-admin-user";
    /// Email address, if the proxy forwards one.
    pub const EMAIL: &str = "x-admin-email";
    /// Role string: `super_admin`, `admin` or `viewer`.
    pub const ROLE: &str = "x-admin-role";
}

/// Extractor that requires an authenticated admin with store-management
/// rights.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

fn unauthorized() -> AppError {
    AppError::Unauthorized("Admin authentication required".to_owned())
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        // Missing or unknown identity means the request bypassed the proxy.
        let name = header(identity_headers::USER).ok_or_else(unauthorized)?;
        let role: AdminRole = header(identity_headers::ROLE)
            .ok_or_else(unauthorized)?
            .parse()
            .map_err(|_| unauthorized())?;

        let admin = CurrentAdmin {
            name,
            email: header(identity_headers::EMAIL),
            role,
        };

        if !admin.can_manage_store() {
            return Err(AppError::Forbidden(
                "Your role does not allow store management".to_owned(),
            ));
        }

        Ok(Self(admin))
    }
}
