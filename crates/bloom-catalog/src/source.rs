//! Catalog data source.
//!
//! [`CatalogSource`] is the read interface the engine consumes.
//! [`CatalogSnapshot`] is the in-memory implementation: an immutable,
//! validated set of shops and products. [`SnapshotStore`] swaps whole
//! snapshots so a reader never observes a half-updated catalog.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, Shop};
use crate::error::{CatalogError, Result};
use crate::ids::ShopId;
use crate::query::ShopLookup;

/// Read access to shops and products.
pub trait CatalogSource {
    fn list_all_shops(&self) -> &[Shop];

    fn list_all_products(&self) -> &[Product];

    fn find_shop_by_id(&self, id: &ShopId) -> Option<&Shop>;

    fn find_shop_by_slug(&self, slug: &str) -> Option<&Shop>;

    fn list_products_by_shop_id(&self, id: &ShopId) -> Vec<&Product> {
        self.list_all_products()
            .iter()
            .filter(|p| p.shop_id == *id)
            .collect()
    }

    /// Products of the shop with `slug`; empty when the shop is unknown.
    fn list_products_by_shop_slug(&self, slug: &str) -> Vec<&Product> {
        match self.find_shop_by_slug(slug) {
            Some(shop) => self.list_products_by_shop_id(&shop.id),
            None => Vec::new(),
        }
    }

    fn find_product_by_slug_within_shop(
        &self,
        shop_slug: &str,
        product_slug: &str,
    ) -> Option<&Product> {
        let shop = self.find_shop_by_slug(shop_slug)?;
        self.list_all_products()
            .iter()
            .find(|p| p.shop_id == shop.id && p.slug == product_slug)
    }
}

/// Serialized catalog document: `{ "shops": [...], "products": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub shops: Vec<Shop>,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Immutable, indexed catalog contents.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    shops: Vec<Shop>,
    products: Vec<Product>,
    shop_by_id: HashMap<ShopId, usize>,
    shop_by_slug: HashMap<String, usize>,
}

impl CatalogSnapshot {
    /// Build a snapshot, rejecting duplicate shop ids or slugs, duplicate
    /// product ids, duplicate product slugs within a shop, and products that
    /// reference an unknown shop.
    pub fn new(shops: Vec<Shop>, products: Vec<Product>) -> Result<Self> {
        let mut shop_by_id = HashMap::with_capacity(shops.len());
        let mut shop_by_slug = HashMap::with_capacity(shops.len());

        for (idx, shop) in shops.iter().enumerate() {
            if shop_by_id.insert(shop.id.clone(), idx).is_some() {
                return Err(CatalogError::Snapshot(format!("duplicate shop id {}", shop.id)));
            }
            if shop_by_slug.insert(shop.slug.clone(), idx).is_some() {
                return Err(CatalogError::Snapshot(format!("duplicate shop slug {}", shop.slug)));
            }
        }

        let mut product_ids = HashSet::with_capacity(products.len());
        let mut product_slugs = HashSet::with_capacity(products.len());
        for product in &products {
            if !shop_by_id.contains_key(&product.shop_id) {
                return Err(CatalogError::Snapshot(format!(
                    "product {} references unknown shop {}",
                    product.id, product.shop_id
                )));
            }
            if !product_ids.insert(&product.id) {
                return Err(CatalogError::Snapshot(format!("duplicate product id {}", product.id)));
            }
            if !product_slugs.insert((&product.shop_id, product.slug.as_str())) {
                return Err(CatalogError::Snapshot(format!(
                    "duplicate product slug {} in shop {}",
                    product.slug, product.shop_id
                )));
            }
            if let Err(e) = product.validate() {
                tracing::warn!(error = %e, "catalog product failed validation");
            }
        }

        tracing::info!(shops = shops.len(), products = products.len(), "catalog snapshot built");

        Ok(Self {
            shops,
            products,
            shop_by_id,
            shop_by_slug,
        })
    }

    pub fn empty() -> Self {
        Self {
            shops: Vec::new(),
            products: Vec::new(),
            shop_by_id: HashMap::new(),
            shop_by_slug: HashMap::new(),
        }
    }

    pub fn from_data(data: CatalogData) -> Result<Self> {
        Self::new(data.shops, data.products)
    }

    /// Parse a JSON catalog document.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// Read and parse a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading catalog");
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_data(&self) -> CatalogData {
        CatalogData {
            shops: self.shops.clone(),
            products: self.products.clone(),
        }
    }

    pub fn shop_count(&self) -> usize {
        self.shops.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}

impl CatalogSource for CatalogSnapshot {
    fn list_all_shops(&self) -> &[Shop] {
        &self.shops
    }

    fn list_all_products(&self) -> &[Product] {
        &self.products
    }

    fn find_shop_by_id(&self, id: &ShopId) -> Option<&Shop> {
        self.shop_by_id.get(id).map(|&idx| &self.shops[idx])
    }

    fn find_shop_by_slug(&self, slug: &str) -> Option<&Shop> {
        self.shop_by_slug.get(slug).map(|&idx| &self.shops[idx])
    }
}

impl ShopLookup for CatalogSnapshot {
    fn shop_id_for_slug(&self, slug: &str) -> Option<ShopId> {
        self.find_shop_by_slug(slug).map(|s| s.id.clone())
    }
}

/// Holder for the current snapshot.
///
/// Readers clone the inner `Arc` and query it for as long as they like; a
/// refresh replaces the whole snapshot in one step.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl SnapshotStore {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The snapshot queries should run against.
    pub fn current(&self) -> Arc<CatalogSnapshot> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in a new snapshot, returning the previous one.
    pub fn replace(&self, snapshot: CatalogSnapshot) -> Arc<CatalogSnapshot> {
        let next = Arc::new(snapshot);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        tracing::info!(
            shops = next.shop_count(),
            products = next.product_count(),
            "catalog snapshot replaced"
        );
        std::mem::replace(&mut *guard, next)
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(CatalogSnapshot::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shops() -> Vec<Shop> {
        vec![
            Shop::new("s1", "rose-house", "Rose House"),
            Shop::new("s2", "tulip-garden", "Tulip Garden"),
        ]
    }

    fn snapshot() -> CatalogSnapshot {
        let mut p3 = Product::new("p3", "s2", "Tulips", 18000);
        p3.slug = "roses".to_string();
        CatalogSnapshot::new(
            shops(),
            vec![
                Product::new("p1", "s1", "Roses", 45000),
                Product::new("p2", "s1", "White roses", 26000),
                p3,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_lookups() {
        let snapshot = snapshot();
        assert_eq!(
            snapshot.find_shop_by_slug("tulip-garden").map(|s| s.name.as_str()),
            Some("Tulip Garden")
        );
        assert!(snapshot.find_shop_by_id(&ShopId::new("s1")).is_some());
        assert!(snapshot.find_shop_by_slug("nope").is_none());
        assert_eq!(snapshot.list_products_by_shop_id(&ShopId::new("s1")).len(), 2);
        assert!(snapshot.list_products_by_shop_slug("nope").is_empty());
    }

    #[test]
    fn test_product_slug_scoped_to_shop() {
        let snapshot = snapshot();
        let found = snapshot.find_product_by_slug_within_shop("tulip-garden", "roses").unwrap();
        assert_eq!(found.id.as_str(), "p3");
        assert!(snapshot.find_product_by_slug_within_shop("rose-house", "roses").is_none());
        assert!(snapshot.find_product_by_slug_within_shop("nope", "p1").is_none());
    }

    #[test]
    fn test_rejects_dangling_shop_reference() {
        let result = CatalogSnapshot::new(shops(), vec![Product::new("p1", "ghost", "Roses", 100)]);
        assert!(matches!(result, Err(CatalogError::Snapshot(_))));
    }

    #[test]
    fn test_rejects_duplicate_slugs() {
        let result = CatalogSnapshot::new(
            vec![Shop::new("s1", "same", "A"), Shop::new("s2", "same", "B")],
            Vec::new(),
        );
        assert!(matches!(result, Err(CatalogError::Snapshot(_))));

        let mut p2 = Product::new("p2", "s1", "Roses", 100);
        p2.slug = "p1".to_string();
        let result =
            CatalogSnapshot::new(shops(), vec![Product::new("p1", "s1", "Roses", 100), p2]);
        assert!(matches!(result, Err(CatalogError::Snapshot(_))));
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::to_string(&snapshot().to_data()).unwrap();
        let loaded = CatalogSnapshot::from_json(&json).unwrap();
        assert_eq!(loaded.shop_count(), 2);
        assert_eq!(loaded.product_count(), 3);

        assert!(matches!(
            CatalogSnapshot::from_json("{ not json"),
            Err(CatalogError::Serialization(_))
        ));
    }

    #[test]
    fn test_store_swaps_whole_snapshot() {
        let store = SnapshotStore::new(snapshot());
        let before = store.current();
        assert_eq!(before.product_count(), 3);

        let previous = store.replace(CatalogSnapshot::empty());
        assert_eq!(previous.product_count(), 3);
        assert_eq!(store.current().product_count(), 0);
        // Readers holding the old snapshot keep a consistent view.
        assert_eq!(before.product_count(), 3);
    }
}
