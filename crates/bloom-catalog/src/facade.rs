//! Catalog facade: the read operations the storefront calls.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Product, Shop};
use crate::error::{CatalogError, Result};
use crate::ids::ShopId;
use crate::query::{
    filter_products, normalize_filter_spec, search_products, sort_products, FilterSpec, RawParams,
};
use crate::related::RelatedProducts;
use crate::source::{CatalogSnapshot, CatalogSource};

/// A product together with its owning shop, ready for rendering.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Listing<'a> {
    pub product: &'a Product,
    pub shop: &'a Shop,
}

/// Result of a browse: the normalized spec and the ordered listings.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseResult<'a> {
    pub filter: FilterSpec,
    pub listings: Vec<Listing<'a>>,
}

/// A product page: the product, its shop and the related sections.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage<'a> {
    pub listing: Listing<'a>,
    pub related: RelatedProducts<'a>,
}

/// Stateless query facade over a catalog source.
///
/// Holds the source behind an `Arc`, so a facade built from
/// [`SnapshotStore::current`](crate::source::SnapshotStore::current) keeps
/// querying the same snapshot even if the store is refreshed meanwhile.
#[derive(Debug, Clone)]
pub struct Catalog<S = CatalogSnapshot> {
    source: Arc<S>,
}

impl<S: CatalogSource> Catalog<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn shops(&self) -> &[Shop] {
        self.source.list_all_shops()
    }

    /// Filtered browse across all shops. `shopSlug` in the parameters scopes
    /// the result; an unknown slug yields nothing.
    pub fn browse(&self, params: &RawParams) -> BrowseResult<'_> {
        let filter = normalize_filter_spec(params);
        let products = self.browse_with(&filter, self.source.list_all_products());
        BrowseResult {
            listings: self.attach_shops(products),
            filter,
        }
    }

    /// Filtered browse within one shop. The scope comes from `shop_slug`;
    /// any `shopSlug` in the parameters is ignored.
    pub fn browse_shop(&self, shop_slug: &str, params: &RawParams) -> Result<BrowseResult<'_>> {
        let shop = self.require_shop(shop_slug)?;
        let mut filter = normalize_filter_spec(params);
        filter.shop_slug = None;

        let products = self.browse_with(&filter, self.source.list_products_by_shop_id(&shop.id));
        Ok(BrowseResult {
            listings: self.attach_shops(products),
            filter,
        })
    }

    /// Filter then sort an already-normalized spec.
    pub fn browse_with<'a, I>(&'a self, filter: &FilterSpec, products: I) -> Vec<&'a Product>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let matched = filter_products(products, filter, self.source.list_all_shops());
        sort_products(&matched, filter.sort)
    }

    /// Free-text search across all shops, in catalog order.
    pub fn search(&self, query: &str) -> Vec<Listing<'_>> {
        self.search_in(query, None)
    }

    /// Free-text search within one shop.
    pub fn search_shop(&self, shop_slug: &str, query: &str) -> Result<Vec<Listing<'_>>> {
        let shop = self.require_shop(shop_slug)?;
        Ok(self.search_in(query, Some(&shop.id)))
    }

    fn search_in(&self, query: &str, shop_id: Option<&ShopId>) -> Vec<Listing<'_>> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let found = search_products(
            query,
            self.source.list_all_products(),
            self.source.list_all_shops(),
            shop_id,
        );
        self.attach_shops(found)
    }

    /// Look up a product by shop and product slug.
    pub fn product(&self, shop_slug: &str, product_slug: &str) -> Result<Listing<'_>> {
        let shop = self.require_shop(shop_slug)?;
        let product = self
            .source
            .find_product_by_slug_within_shop(shop_slug, product_slug)
            .ok_or_else(|| CatalogError::ProductNotFound {
                shop_slug: shop_slug.to_string(),
                product_slug: product_slug.to_string(),
            })?;
        Ok(Listing { product, shop })
    }

    /// Product page with related sections drawn from the whole catalog.
    pub fn product_page(
        &self,
        shop_slug: &str,
        product_slug: &str,
        limit: usize,
    ) -> Result<ProductPage<'_>> {
        let listing = self.product(shop_slug, product_slug)?;
        let related = RelatedProducts::build_where(
            listing.product,
            self.source.list_all_products(),
            limit,
            |p| self.source.find_shop_by_id(&p.shop_id).is_some(),
        );
        Ok(ProductPage { listing, related })
    }

    fn require_shop(&self, slug: &str) -> Result<&Shop> {
        self.source
            .find_shop_by_slug(slug)
            .ok_or_else(|| CatalogError::ShopNotFound(slug.to_string()))
    }

    /// Pair each product with its shop, dropping products whose shop does
    /// not resolve.
    fn attach_shops<'a>(&'a self, products: Vec<&'a Product>) -> Vec<Listing<'a>> {
        let shops: HashMap<&ShopId, &Shop> = self
            .source
            .list_all_shops()
            .iter()
            .map(|s| (&s.id, s))
            .collect();
        products
            .into_iter()
            .filter_map(|product| match shops.get(&product.shop_id).copied() {
                Some(shop) => Some(Listing { product, shop }),
                None => {
                    tracing::warn!(
                        product_id = %product.id,
                        shop_id = %product.shop_id,
                        "dropping product with unknown shop"
                    );
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GiftType;
    use crate::query::SortKey;

    fn catalog() -> Catalog {
        let shops = vec![
            Shop::new("s1", "rose-house", "Rose House"),
            Shop::new("s2", "tulip-garden", "Tulip Garden"),
        ];
        let products = vec![
            Product::new("p1", "s1", "Classic 51 red roses", 45000)
                .with_discount(52000)
                .with_colors(["red"])
                .with_flowers_count(51)
                .with_gift(GiftType::Card, "Card"),
            Product::new("p2", "s1", "25 white roses", 26000)
                .with_colors(["white"])
                .with_flowers_count(25),
            Product::new("p3", "s2", "Spring tulip mix", 18000)
                .with_colors(["pink", "white"])
                .with_flowers_count(31)
                .with_rating(4.9, 40),
        ];
        Catalog::new(Arc::new(CatalogSnapshot::new(shops, products).unwrap()))
    }

    fn ids(listings: &[Listing<'_>]) -> Vec<String> {
        listings.iter().map(|l| l.product.id.to_string()).collect()
    }

    #[test]
    fn test_browse_default_sort() {
        let catalog = catalog();
        let result = catalog.browse(&RawParams::new());
        assert_eq!(result.filter.sort, SortKey::PriceAsc);
        assert_eq!(ids(&result.listings), vec!["p3", "p2", "p1"]);
        assert_eq!(result.listings[0].shop.slug, "tulip-garden");
    }

    #[test]
    fn test_browse_with_params() {
        let catalog = catalog();
        let params = RawParams::from_pairs([("colors", "white"), ("sort", "ratingDesc")]);
        let result = catalog.browse(&params);
        assert_eq!(ids(&result.listings), vec!["p3", "p2"]);
    }

    #[test]
    fn test_browse_unknown_shop_slug_is_empty() {
        let catalog = catalog();
        let params = RawParams::from_pairs([("shopSlug", "nonexistent")]);
        assert!(catalog.browse(&params).listings.is_empty());

        let params = RawParams::from_pairs([("shopSlug", "   ")]);
        assert!(catalog.browse(&params).listings.is_empty());
    }

    #[test]
    fn test_browse_shop_context_wins() {
        let catalog = catalog();
        let params = RawParams::from_pairs([("shopSlug", "tulip-garden")]);
        let result = catalog.browse_shop("rose-house", &params).unwrap();
        assert_eq!(ids(&result.listings), vec!["p2", "p1"]);
        assert_eq!(result.filter.shop_slug, None);

        assert!(matches!(
            catalog.browse_shop("nope", &RawParams::new()),
            Err(CatalogError::ShopNotFound(_))
        ));
    }

    #[test]
    fn test_search_keeps_catalog_order() {
        let catalog = catalog();
        assert_eq!(ids(&catalog.search("roses")), vec!["p1", "p2"]);
        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn test_search_shop() {
        let catalog = catalog();
        assert_eq!(ids(&catalog.search_shop("tulip-garden", "white").unwrap()), vec!["p3"]);
        assert!(catalog.search_shop("nope", "white").is_err());
    }

    #[test]
    fn test_product_lookup() {
        let catalog = catalog();
        let listing = catalog.product("rose-house", "p2").unwrap();
        assert_eq!(listing.shop.name, "Rose House");

        assert!(matches!(
            catalog.product("rose-house", "p3"),
            Err(CatalogError::ProductNotFound { .. })
        ));
    }

    #[test]
    fn test_product_page_related() {
        let catalog = catalog();
        let page = catalog.product_page("rose-house", "p2", 12).unwrap();
        let same_shop: Vec<&str> = page.related.same_shop.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(same_shop, vec!["p1"]);
    }

    /// Source without integrity checks: products may point at unknown shops.
    struct UncheckedSource {
        shops: Vec<Shop>,
        products: Vec<Product>,
    }

    impl CatalogSource for UncheckedSource {
        fn list_all_shops(&self) -> &[Shop] {
            &self.shops
        }

        fn list_all_products(&self) -> &[Product] {
            &self.products
        }

        fn find_shop_by_id(&self, id: &ShopId) -> Option<&Shop> {
            self.shops.iter().find(|s| s.id == *id)
        }

        fn find_shop_by_slug(&self, slug: &str) -> Option<&Shop> {
            self.shops.iter().find(|s| s.slug == slug)
        }
    }

    fn unchecked_catalog() -> Catalog<UncheckedSource> {
        Catalog::new(Arc::new(UncheckedSource {
            shops: vec![Shop::new("s1", "rose-house", "Rose House")],
            products: vec![
                Product::new("cur", "s1", "Current", 10000),
                Product::new("orphan", "ghost", "Orphan", 10000),
                Product::new("ok", "s1", "Ok", 10100),
            ],
        }))
    }

    #[test]
    fn test_product_page_drops_orphans_before_limit() {
        let catalog = unchecked_catalog();
        let page = catalog.product_page("rose-house", "cur", 1).unwrap();

        let section_ids = |section: &[&Product]| -> Vec<String> {
            section.iter().map(|p| p.id.to_string()).collect()
        };
        assert_eq!(section_ids(&page.related.by_price_band), vec!["ok"]);
        assert_eq!(section_ids(&page.related.similar), vec!["ok"]);
    }

    #[test]
    fn test_browse_drops_orphans() {
        let catalog = unchecked_catalog();
        assert_eq!(ids(&catalog.browse(&RawParams::new()).listings), vec!["cur", "ok"]);
    }
}
