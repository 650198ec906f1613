//! Newtype ID for type-safe product references.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a catalog product.
///
/// The catalog API mints these; the admin panel only ever passes them back
/// as path parameters. Wrapping the raw string prevents accidentally mixing
/// product ids with other route parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from a raw string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_inner() {
        let id = ProductId::new("prod-42");
        assert_eq!(id.to_string(), "prod-42");
        assert_eq!(id.as_str(), "prod-42");
    }

    #[test]
    fn test_serde_transparent() {
        let id: ProductId = serde_json::from_str("\"66f1a2b3\"").unwrap();
        assert_eq!(id, ProductId::new("66f1a2b3"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"66f1a2b3\"");
    }
}
