//! Related-product sections shown next to a product.
//!
//! Every section excludes the current product (by id), keeps a stable order
//! and is capped at the requested limit.

use serde::Serialize;

use crate::catalog::Product;

/// Default number of items per section.
pub const DEFAULT_LIMIT: usize = 12;

/// All related-product sections for one product.
#[derive(Debug, Clone, Serialize)]
pub struct RelatedProducts<'a> {
    /// Price within 15% either way, closest first.
    pub by_price_band: Vec<&'a Product>,
    /// Same shop, cheapest first.
    pub same_shop: Vec<&'a Product>,
    /// Different flower count, closest count first.
    pub by_flowers_count: Vec<&'a Product>,
    /// Shares a flower type, most expensive first.
    pub by_flower_types: Vec<&'a Product>,
    /// Shares a color or flower type, or price within 20%; best rated first.
    pub similar: Vec<&'a Product>,
}

impl<'a> RelatedProducts<'a> {
    pub fn build<I>(current: &Product, candidates: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = &'a Product>,
    {
        Self::build_where(current, candidates, limit, |_| true)
    }

    /// Like [`build`](Self::build), but only candidates passing `keep` are
    /// considered. Filtering happens before each section is capped, so a
    /// rejected candidate never takes a slot.
    pub fn build_where<I, F>(current: &Product, candidates: I, limit: usize, keep: F) -> Self
    where
        I: IntoIterator<Item = &'a Product>,
        F: Fn(&Product) -> bool,
    {
        let others: Vec<&'a Product> = candidates
            .into_iter()
            .filter(|p| p.id != current.id && keep(p))
            .collect();

        Self {
            by_price_band: capped(by_price_band(current, &others), limit),
            same_shop: capped(same_shop(current, &others), limit),
            by_flowers_count: capped(by_flowers_count(current, &others), limit),
            by_flower_types: capped(by_flower_types(current, &others), limit),
            similar: capped(similar(current, &others), limit),
        }
    }
}

fn capped<'a>(mut products: Vec<&'a Product>, limit: usize) -> Vec<&'a Product> {
    products.truncate(limit);
    products
}

fn shares_any(a: &[String], b: &[String]) -> bool {
    a.iter().any(|x| b.contains(x))
}

pub fn by_price_band<'a>(current: &Product, others: &[&'a Product]) -> Vec<&'a Product> {
    let price = current.price as f64;
    let (min, max) = (price * 0.85, price * 1.15);
    let mut found: Vec<&Product> = others
        .iter()
        .copied()
        .filter(|p| (p.price as f64) >= min && (p.price as f64) <= max)
        .collect();
    found.sort_by_key(|p| (p.price - current.price).abs());
    found
}

pub fn same_shop<'a>(current: &Product, others: &[&'a Product]) -> Vec<&'a Product> {
    let mut found: Vec<&Product> = others
        .iter()
        .copied()
        .filter(|p| p.shop_id == current.shop_id)
        .collect();
    found.sort_by_key(|p| p.price);
    found
}

pub fn by_flowers_count<'a>(current: &Product, others: &[&'a Product]) -> Vec<&'a Product> {
    let mut found: Vec<&Product> = others
        .iter()
        .copied()
        .filter(|p| p.flowers_count != current.flowers_count)
        .collect();
    found.sort_by_key(|p| p.flowers_count.abs_diff(current.flowers_count));
    found
}

pub fn by_flower_types<'a>(current: &Product, others: &[&'a Product]) -> Vec<&'a Product> {
    let mut found: Vec<&Product> = others
        .iter()
        .copied()
        .filter(|p| shares_any(&p.flower_types, &current.flower_types))
        .collect();
    found.sort_by(|a, b| b.price.cmp(&a.price));
    found
}

pub fn similar<'a>(current: &Product, others: &[&'a Product]) -> Vec<&'a Product> {
    let tolerance = current.price as f64 * 0.2;
    let mut found: Vec<&Product> = others
        .iter()
        .copied()
        .filter(|p| {
            shares_any(&p.colors, &current.colors)
                || shares_any(&p.flower_types, &current.flower_types)
                || ((p.price - current.price).abs() as f64) <= tolerance
        })
        .collect();
    found.sort_by(|a, b| b.rating_value().total_cmp(&a.rating_value()));
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("cur", "s1", "Current", 10000)
                .with_flowers_count(25)
                .with_colors(["red"])
                .with_flower_types(["роза"]),
            Product::new("a", "s1", "A", 11000).with_flowers_count(25).with_rating(4.0, 1),
            Product::new("b", "s2", "B", 9000)
                .with_flowers_count(51)
                .with_flower_types(["роза"])
                .with_rating(4.8, 1),
            Product::new("c", "s2", "C", 30000)
                .with_flowers_count(11)
                .with_colors(["red"]),
            Product::new("d", "s1", "D", 8600).with_flowers_count(101),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_sections() {
        let all = catalog();
        let related = RelatedProducts::build(&all[0], &all, DEFAULT_LIMIT);

        // 8500..=11500, distances a=1000, b=1000, d=1400
        assert_eq!(ids(&related.by_price_band), vec!["a", "b", "d"]);
        assert_eq!(ids(&related.same_shop), vec!["d", "a"]);
        // distances b=26, c=14, d=76; a has the same count
        assert_eq!(ids(&related.by_flowers_count), vec!["c", "b", "d"]);
        assert_eq!(ids(&related.by_flower_types), vec!["b"]);
        // a: price within 20%, b: type + price, c: color, d: price within 20%
        assert_eq!(ids(&related.similar), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_limit() {
        let all = catalog();
        let related = RelatedProducts::build(&all[0], &all, 1);
        assert_eq!(ids(&related.similar), vec!["b"]);
        assert_eq!(ids(&related.same_shop), vec!["d"]);
    }

    #[test]
    fn test_rejected_candidates_do_not_take_slots() {
        let all = catalog();
        let related =
            RelatedProducts::build_where(&all[0], &all, 1, |p| p.shop_id.as_str() != "s2");
        // b and c are rejected before capping, so the next best fill the slot
        assert_eq!(ids(&related.similar), vec!["a"]);
        assert_eq!(ids(&related.by_price_band), vec!["a"]);
        assert_eq!(ids(&related.by_flowers_count), vec!["d"]);
        assert!(related.by_flower_types.is_empty());
    }

    #[test]
    fn test_current_excluded() {
        let all = catalog();
        let related = RelatedProducts::build(&all[0], &all, DEFAULT_LIMIT);
        assert!(!related.same_shop.iter().any(|p| p.id.as_str() == "cur"));
    }
}
