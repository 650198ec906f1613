//! Wire types for the catalog API.

use serde::Deserialize;

use oakmere_core::ProductRecord;

/// Envelope of `GET /api/products/{id}`.
#[derive(Debug, Deserialize)]
pub struct ProductEnvelope {
    pub product: ProductRecord,
}

/// Envelope of `GET /api/products`.
#[derive(Debug, Deserialize)]
pub struct ProductListEnvelope {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

/// Structured error body the catalog API sends on failures.
#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    pub message: Option<String>,
}
