//! Query engine.
//!
//! Raw parameters flow one way: normalized into a [`FilterSpec`], evaluated
//! against every product, then sorted. Search replaces predicate evaluation
//! with term matching and keeps input order.

mod filter;
mod params;
mod search;
mod sort;
mod spec;
mod tags;

pub use filter::{filter_products, matches, LookupFn, PreparedFilter, ShopLookup};
pub use params::normalize_filter_spec;
pub use search::{haystack, matches_terms, search_products, tokenize};
pub use sort::{compare, sort_products};
pub use spec::{FilterSpec, FlowerCountBucket, ParamValue, RawParams, SortKey};
pub use tags::{active_tags, FilterTag};
