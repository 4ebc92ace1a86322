//! Predicate evaluation of products against a [`FilterSpec`].

use std::collections::HashMap;

use crate::catalog::{Product, Shop};
use crate::ids::ShopId;

use super::spec::FilterSpec;

/// Resolves a shop slug to a shop id.
///
/// Injected into the evaluator so filtering never depends on a global shop
/// registry. Implemented for shop slices, slug maps and wrapped closures
/// ([`LookupFn`]).
pub trait ShopLookup {
    fn shop_id_for_slug(&self, slug: &str) -> Option<ShopId>;
}

impl ShopLookup for [Shop] {
    fn shop_id_for_slug(&self, slug: &str) -> Option<ShopId> {
        self.iter().find(|s| s.slug == slug).map(|s| s.id.clone())
    }
}

impl ShopLookup for HashMap<String, ShopId> {
    fn shop_id_for_slug(&self, slug: &str) -> Option<ShopId> {
        self.get(slug).cloned()
    }
}

/// Adapts a resolver function into a [`ShopLookup`].
pub struct LookupFn<F>(pub F);

impl<F> ShopLookup for LookupFn<F>
where
    F: Fn(&str) -> Option<ShopId>,
{
    fn shop_id_for_slug(&self, slug: &str) -> Option<ShopId> {
        (self.0)(slug)
    }
}

/// Shop restriction after slug resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShopScope {
    Any,
    Only(ShopId),
    /// The slug matched no shop: nothing passes.
    Unresolved,
}

/// A [`FilterSpec`] with its lookups done up front: the shop slug resolved
/// and the case-insensitive sets lower-cased once per query.
#[derive(Debug, Clone)]
pub struct PreparedFilter<'a> {
    spec: &'a FilterSpec,
    colors: Option<Vec<String>>,
    flower_types: Option<Vec<String>>,
    shop: ShopScope,
}

impl<'a> PreparedFilter<'a> {
    pub fn new<S>(spec: &'a FilterSpec, shops: &S) -> Self
    where
        S: ShopLookup + ?Sized,
    {
        let shop = match spec.shop_slug.as_deref() {
            None => ShopScope::Any,
            Some(slug) => match shops.shop_id_for_slug(slug) {
                Some(id) => ShopScope::Only(id),
                None => {
                    tracing::debug!(
                        shop_slug = slug,
                        "shop slug did not resolve, filtering to nothing"
                    );
                    ShopScope::Unresolved
                }
            },
        };

        Self {
            spec,
            colors: lowercase_set(spec.colors.as_deref()),
            flower_types: lowercase_set(spec.flower_types.as_deref()),
            shop,
        }
    }

    /// Conjunction of every present criterion.
    pub fn matches(&self, product: &Product) -> bool {
        let spec = self.spec;

        if let Some(from) = spec.price_from {
            if (product.price as f64) < from {
                return false;
            }
        }

        if let Some(to) = spec.price_to {
            if (product.price as f64) > to {
                return false;
            }
        }

        match spec.flowers_count_range {
            Some(bucket) => {
                if !bucket.contains(product.flowers_count) {
                    return false;
                }
            }
            None => {
                if let Some(from) = spec.flowers_count_from {
                    if (product.flowers_count as f64) < from {
                        return false;
                    }
                }
            }
        }

        if let Some(wanted) = spec.has_discount {
            if product.has_discount != wanted {
                return false;
            }
        }

        if let Some(required) = &self.colors {
            if !any_in_set(&product.colors, required) {
                return false;
            }
        }

        if let Some(required) = &spec.stem_heights {
            let hit = product
                .stem_heights
                .iter()
                .any(|h| required.contains(&(*h as f64)));
            if !hit {
                return false;
            }
        }

        if let Some(required) = &self.flower_types {
            if !any_in_set(&product.flower_types, required) {
                return false;
            }
        }

        if let Some(wanted) = spec.has_gift {
            if product.has_gift() != wanted {
                return false;
            }
        }

        match &self.shop {
            ShopScope::Any => true,
            ShopScope::Only(id) => product.shop_id == *id,
            ShopScope::Unresolved => false,
        }
    }
}

fn lowercase_set(values: Option<&[String]>) -> Option<Vec<String>> {
    values.map(|v| v.iter().map(|s| s.to_lowercase()).collect())
}

fn any_in_set(values: &[String], required: &[String]) -> bool {
    values
        .iter()
        .any(|v| required.iter().any(|r| *r == v.to_lowercase()))
}

/// Decide whether a single product satisfies `spec`.
pub fn matches<S>(product: &Product, spec: &FilterSpec, shops: &S) -> bool
where
    S: ShopLookup + ?Sized,
{
    PreparedFilter::new(spec, shops).matches(product)
}

/// Keep the products that satisfy `spec`, preserving input order.
pub fn filter_products<'a, I, S>(products: I, spec: &FilterSpec, shops: &S) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
    S: ShopLookup + ?Sized,
{
    let prepared = PreparedFilter::new(spec, shops);
    let mut total = 0usize;
    let matched: Vec<&Product> = products
        .into_iter()
        .inspect(|_| total += 1)
        .filter(|p| prepared.matches(p))
        .collect();

    tracing::debug!(total, matched = matched.len(), "filtered products");
    matched
}
