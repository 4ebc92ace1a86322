//! Catalog data model.
//!
//! Contains shops and products. Both are immutable reference data: loaded
//! once from the data source and only read afterwards.

mod product;
mod shop;

pub use product::{CompositionItem, GiftType, Product, ProductGift, Rating};
pub use shop::{GeoPoint, Shop, ShopContacts};
