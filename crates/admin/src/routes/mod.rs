//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to the product listing
//! GET  /products               - Product listing (navigation target after updates)
//! GET  /products/{id}/edit     - Edit form for one product
//! POST /products/{id}          - Submit the edited product to the catalog API
//! ```

use axum::{
    Router,
    response::Redirect,
    routing::get,
};

use crate::{models::CurrentAdmin, state::AppState};

pub mod products;

/// Admin user view for templates.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub is_super_admin: bool,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            is_super_admin: admin.role == oakmere_core::AdminRole::SuperAdmin,
        }
    }
}

/// Build the full admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .merge(products::router())
}

/// The panel has no dashboard; land on the product listing.
async fn root() -> Redirect {
    Redirect::to("/products")
}
