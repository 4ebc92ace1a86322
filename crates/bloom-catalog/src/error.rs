//! Catalog error types.
//!
//! The query engine never fails: malformed filter input degrades to "no
//! constraint". These errors only surface while loading catalog data or
//! resolving a shop/product by slug.

use thiserror::Error;

/// Errors that can occur while loading or looking up catalog data.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Shop not found.
    #[error("Shop not found: {0}")]
    ShopNotFound(String),

    /// Product not found within a shop.
    #[error("Product not found: {shop_slug}/{product_slug}")]
    ProductNotFound {
        shop_slug: String,
        product_slug: String,
    },

    /// A product record violates a data invariant.
    #[error("Invalid product {product_id}: {reason}")]
    InvalidProduct { product_id: String, reason: String },

    /// The catalog snapshot is inconsistent (dangling shop reference,
    /// duplicate slug).
    #[error("Invalid catalog snapshot: {0}")]
    Snapshot(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error while reading catalog data.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e.to_string())
    }
}

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
