//! Catalog API client.
//!
//! The admin panel does not own product data; the catalog API does. This
//! client wraps the shared `reqwest` client with the base URL and bearer
//! token injected from configuration, so route handlers only deal in
//! records and payloads.
//!
//! # API Reference
//!
//! - `GET /api/products` - product listing
//! - `GET /api/products/{id}` - single product, wrapped in `{"product": …}`
//! - `PUT /api/products/{id}` - multipart update (text fields plus optional
//!   `image`/`hoverImage` file parts)
//! - Failures carry an optional `{"message": …}` body, surfaced verbatim to
//!   the admin when present

mod types;

pub use types::*;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;

use oakmere_core::{ProductId, ProductRecord};

use crate::config::CatalogConfig;
use crate::models::UpdatePayload;

/// Errors that can occur when interacting with the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {}", .message.as_deref().unwrap_or("resource missing"))]
    NotFound { message: Option<String> },

    /// Unauthorized (invalid API token).
    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("invalid catalog API token"))]
    Unauthorized { message: Option<String> },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl CatalogError {
    /// The message to show the admin when an update fails.
    ///
    /// Uses the server's structured `message` verbatim when present,
    /// whatever the response status, otherwise a generic fallback.
    #[must_use]
    pub fn update_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::NotFound { message: Some(m) } | Self::Unauthorized { message: Some(m) } => {
                m.clone()
            }
            _ => "Error updating product".to_owned(),
        }
    }
}

/// Catalog API client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the token is
    /// not a valid header value.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_token.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| CatalogError::Parse(format!("Invalid API token format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Fetch one product record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on network failure, non-2xx responses, or a
    /// malformed body.
    pub async fn product(&self, id: &ProductId) -> Result<ProductRecord, CatalogError> {
        let url = format!("{}/api/products/{id}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let envelope: ProductEnvelope = self.handle_response(response).await?;
        Ok(envelope.product)
    }

    /// Fetch the product listing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on network failure, non-2xx responses, or a
    /// malformed body.
    pub async fn products(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        let url = format!("{}/api/products", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let envelope: ProductListEnvelope = self.handle_response(response).await?;
        Ok(envelope.products)
    }

    /// Submit a product update as a multipart request.
    ///
    /// Text fields are sent as form fields, replaced images as binary file
    /// parts; `reqwest` sets the multipart content type with its boundary.
    /// Any 2xx counts as success; no response body is consumed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on network failure or a non-2xx response,
    /// with the server's `message` extracted when the body carries one.
    pub async fn update_product(
        &self,
        id: &ProductId,
        payload: UpdatePayload,
    ) -> Result<(), CatalogError> {
        let url = format!("{}/api/products/{id}", self.inner.base_url);
        let form = multipart_form(payload)?;

        let response = self.inner.client.put(&url).multipart(form).send().await?;
        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::parse_error(response).await)
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CatalogError> {
        if response.status().is_success() {
            return response
                .json()
                .await
                .map_err(|e| CatalogError::Parse(format!("Failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Parse an error response from the catalog API.
    ///
    /// The body's `message` is read for every status so callers can surface
    /// it verbatim; the status only picks the variant.
    async fn parse_error(response: reqwest::Response) -> CatalogError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = error_message_from_body(&body);

        match status {
            401 | 403 => CatalogError::Unauthorized { message },
            404 => CatalogError::NotFound { message },
            _ => CatalogError::Api {
                status,
                message: message.unwrap_or_else(|| "Unknown error".to_owned()),
            },
        }
    }
}

/// Extract the structured `message` field from an error body, if any.
fn error_message_from_body(body: &str) -> Option<String> {
    if let Ok(api) = serde_json::from_str::<ApiMessage>(body)
        && let Some(message) = api.message
        && !message.is_empty()
    {
        return Some(message);
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Build the multipart form from an update payload.
fn multipart_form(payload: UpdatePayload) -> Result<reqwest::multipart::Form, CatalogError> {
    let mut form = reqwest::multipart::Form::new();

    for (name, value) in payload.fields {
        form = form.text(name, value);
    }

    for (name, upload) in payload.files {
        let part = reqwest::multipart::Part::bytes(upload.data.to_vec())
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        form = form.part(name, part);
    }

    Ok(form)
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}
