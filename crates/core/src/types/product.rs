//! Catalog product record as served by the catalog API.

use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;

/// A product record fetched from `GET /api/products/{id}`.
///
/// The catalog API is loose about field presence and numeric encoding:
/// `price`, `stock` and `discount` may arrive as JSON numbers or strings,
/// and any field may be missing entirely. Deserialization normalizes the
/// numeric-ish fields to their string form (the admin form keeps numerics
/// string-encoded until submission) and collapses empty/zero values to
/// `None` so callers fall back to a single, type-appropriate default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductRecord {
    /// Catalog-assigned product id.
    #[serde(alias = "_id")]
    pub id: Option<ProductId>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "stringly_number")]
    pub price: Option<String>,
    #[serde(deserialize_with = "stringly_number")]
    pub stock: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "stringly_number")]
    pub discount: Option<String>,
    pub is_new: Option<bool>,
    /// URL of the stored primary image, if any.
    pub image: Option<String>,
    /// URL of the stored hover image, if any.
    pub hover_image: Option<String>,
}

/// Accept a JSON number or string and normalize it to a non-empty string.
///
/// Empty strings and zero collapse to `None`, matching the API's habit of
/// sending either depending on how the record was created.
fn stringly_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    let raw = Option::<Raw>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(Raw::Text(s)) if s.is_empty() => None,
        Some(Raw::Text(s)) => Some(s),
        Some(Raw::Number(n)) if n == 0.0 => None,
        Some(Raw::Number(n)) => Some(format_number(n)),
    })
}

/// Format a JSON number without a trailing `.0` for whole values.
fn format_number(n: f64) -> String {
    #[allow(clippy::cast_possible_truncation)] // catalog quantities fit in i64
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
