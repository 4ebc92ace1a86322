//! Product catalog query engine for the Bloom flower marketplace.
//!
//! Given the shops and products of the marketplace and a declarative query,
//! the engine returns the matching products in a fully deterministic order:
//!
//! - **Query**: parameter normalization, predicate evaluation, free-text
//!   search and sorting
//! - **Catalog**: shop and product reference data
//! - **Source**: the read interface to catalog data and an in-memory snapshot
//! - **Facade**: browse, search and product-page operations
//!
//! Every query is a pure function of its inputs; nothing is cached or
//! mutated between calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bloom_catalog::prelude::*;
//!
//! let snapshot = CatalogSnapshot::load("catalog.json")?;
//! let catalog = Catalog::new(Arc::new(snapshot));
//!
//! let params = RawParams::from_pairs([("colors", "red,white"), ("sort", "priceDesc")]);
//! for listing in catalog.browse(&params).listings {
//!     println!("{} ({})", listing.product.title, listing.shop.name);
//! }
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod facade;
pub mod query;
pub mod reference;
pub mod related;
pub mod source;

pub use error::CatalogError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{CompositionItem, GiftType, Product, ProductGift, Rating, Shop};

    // Query
    pub use crate::query::{
        active_tags, filter_products, normalize_filter_spec, search_products, sort_products,
        FilterSpec, FlowerCountBucket, RawParams, SortKey,
    };

    // Source and facade
    pub use crate::facade::{BrowseResult, Catalog, Listing, ProductPage};
    pub use crate::related::RelatedProducts;
    pub use crate::source::{CatalogData, CatalogSnapshot, CatalogSource, SnapshotStore};
}
