//! Deterministic multi-key ordering of products.

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::catalog::Product;

use super::spec::SortKey;

/// Compare two products under `key`: primary key, then tie-break.
pub fn compare(a: &Product, b: &Product, key: SortKey) -> Ordering {
    match key {
        SortKey::PriceAsc => a
            .price
            .cmp(&b.price)
            .then_with(|| b.rating_value().total_cmp(&a.rating_value())),
        SortKey::PriceDesc => b
            .price
            .cmp(&a.price)
            .then_with(|| b.rating_value().total_cmp(&a.rating_value())),
        SortKey::RatingDesc => b
            .rating_value()
            .total_cmp(&a.rating_value())
            .then_with(|| a.price.cmp(&b.price)),
    }
}

/// Return a new sequence ordered by `key`. The input is left untouched and
/// products equal under both keys keep their relative order.
pub fn sort_products<T>(products: &[T], key: SortKey) -> Vec<T>
where
    T: Borrow<Product> + Clone,
{
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| compare(a.borrow(), b.borrow(), key));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product::new("a", "s1", "A", 300).with_rating(4.0, 10),
            Product::new("b", "s1", "B", 100),
            Product::new("c", "s1", "C", 300).with_rating(4.9, 3),
            Product::new("d", "s1", "D", 200).with_rating(4.9, 8),
        ]
    }

    fn ids<T: Borrow<Product>>(products: &[T]) -> Vec<String> {
        products.iter().map(|p| p.borrow().id.to_string()).collect()
    }

    #[test]
    fn test_price_asc_tie_break_by_rating() {
        let sorted = sort_products(&products(), SortKey::PriceAsc);
        assert_eq!(ids(&sorted), vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_price_desc_tie_break_by_rating() {
        let sorted = sort_products(&products(), SortKey::PriceDesc);
        assert_eq!(ids(&sorted), vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_rating_desc_tie_break_by_price() {
        let sorted = sort_products(&products(), SortKey::RatingDesc);
        assert_eq!(ids(&sorted), vec!["d", "c", "a", "b"]);
    }

    #[test]
    fn test_stable_for_full_ties() {
        let products = vec![
            Product::new("x", "s1", "X", 100).with_rating(4.5, 1),
            Product::new("y", "s1", "Y", 100).with_rating(4.5, 9),
            Product::new("z", "s1", "Z", 100).with_rating(4.5, 2),
        ];
        for key in SortKey::ALL {
            assert_eq!(ids(&sort_products(&products, key)), vec!["x", "y", "z"]);
        }
    }

    #[test]
    fn test_sort_references_leaves_input() {
        let products = products();
        let refs: Vec<&Product> = products.iter().collect();
        let sorted = sort_products(&refs, SortKey::PriceAsc);
        assert_eq!(ids(&sorted), vec!["b", "d", "c", "a"]);
        assert_eq!(ids(&refs), vec!["a", "b", "c", "d"]);
    }
}
