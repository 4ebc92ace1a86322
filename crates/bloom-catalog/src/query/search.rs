//! Free-text product search.
//!
//! Pure filtering: a product matches when every query term is a substring of
//! its haystack. No ranking or scoring; matches keep their input order.

use std::collections::HashMap;

use crate::catalog::{Product, Shop};
use crate::ids::ShopId;

/// Lower-case the query and split it on whitespace runs.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Build the lower-cased searchable text of a product.
///
/// Field order: title, description, composition flower types, colors,
/// flower type tags, stem heights, owning shop name. Fields are joined by a
/// single space.
pub fn haystack(product: &Product, shop: Option<&Shop>) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(
        3 + product.composition.len()
            + product.colors.len()
            + product.flower_types.len()
            + product.stem_heights.len(),
    );

    parts.push(product.title.to_lowercase());
    parts.push(product.description.to_lowercase());
    parts.extend(product.composition.iter().map(|c| c.flower_type.to_lowercase()));
    parts.extend(product.colors.iter().map(|c| c.to_lowercase()));
    parts.extend(product.flower_types.iter().map(|t| t.to_lowercase()));
    parts.extend(product.stem_heights.iter().map(|h| h.to_string()));
    if let Some(shop) = shop {
        parts.push(shop.name.to_lowercase());
    }

    parts.join(" ")
}

/// True iff every term occurs in the haystack.
pub fn matches_terms(haystack: &str, terms: &[String]) -> bool {
    terms.iter().all(|term| haystack.contains(term.as_str()))
}

/// Search `products`, optionally restricted to one shop.
///
/// An empty or whitespace-only query returns no results.
pub fn search_products<'a, I>(
    query: &str,
    products: I,
    shops: &[Shop],
    shop_id: Option<&ShopId>,
) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let terms = tokenize(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let shops_by_id: HashMap<&ShopId, &Shop> = shops.iter().map(|s| (&s.id, s)).collect();

    let found: Vec<&Product> = products
        .into_iter()
        .filter(|p| shop_id.map_or(true, |id| p.shop_id == *id))
        .filter(|p| {
            let shop = shops_by_id.get(&p.shop_id).copied();
            matches_terms(&haystack(p, shop), &terms)
        })
        .collect();

    tracing::debug!(query, terms = terms.len(), matched = found.len(), "searched products");
    found
}
