//! Raw query parameter normalization.
//!
//! Malformed input never fails: a field that does not parse is simply absent
//! from the resulting [`FilterSpec`].

use super::spec::{FilterSpec, FlowerCountBucket, ParamValue, RawParams, SortKey};

/// Normalize an untyped parameter bag into a [`FilterSpec`].
///
/// When both `flowersCountFrom` and `flowersCountRange` are valid, the bucket
/// wins and the threshold is dropped.
pub fn normalize_filter_spec(params: &RawParams) -> FilterSpec {
    let flowers_count_range =
        single(params, "flowersCountRange").and_then(FlowerCountBucket::parse);
    let flowers_count_from = if flowers_count_range.is_some() {
        None
    } else {
        single(params, "flowersCountFrom").and_then(parse_number)
    };

    let spec = FilterSpec {
        price_from: single(params, "priceFrom").and_then(parse_number),
        price_to: single(params, "priceTo").and_then(parse_number),
        flowers_count_from,
        flowers_count_range,
        has_discount: single(params, "hasDiscount").and_then(parse_bool),
        has_gift: single(params, "hasGift").and_then(parse_bool),
        colors: string_list(params.get("colors")),
        stem_heights: number_list(params.get("stemHeights")),
        flower_types: string_list(params.get("flowerTypes")),
        shop_slug: single(params, "shopSlug")
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        sort: single(params, "sort")
            .map(SortKey::parse_or_default)
            .unwrap_or_default(),
    };

    tracing::trace!(?spec, "normalized filter spec");
    spec
}

fn single<'a>(params: &'a RawParams, key: &str) -> Option<&'a str> {
    params.get(key).and_then(ParamValue::first)
}

/// Base-10 number; empty, malformed or non-finite input is absent.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Only the exact literals `true` and `false` count.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Split list input: each element may itself be comma-delimited.
fn split_list(value: &ParamValue) -> impl Iterator<Item = &str> {
    value
        .values()
        .into_iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn string_list(value: Option<&ParamValue>) -> Option<Vec<String>> {
    let items: Vec<String> = split_list(value?).map(str::to_string).collect();
    (!items.is_empty()).then_some(items)
}

fn number_list(value: Option<&ParamValue>) -> Option<Vec<f64>> {
    let items: Vec<f64> = split_list(value?).filter_map(parse_number).collect();
    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RawParams {
        RawParams::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_empty_params_yield_default_spec() {
        let spec = normalize_filter_spec(&RawParams::new());
        assert_eq!(spec, FilterSpec::default());
        assert_eq!(spec.sort, SortKey::PriceAsc);
    }

    #[test]
    fn test_numeric_fields() {
        let spec = normalize_filter_spec(&params(&[
            ("priceFrom", " 10000 "),
            ("priceTo", "abc"),
            ("flowersCountFrom", "15.5"),
        ]));
        assert_eq!(spec.price_from, Some(10000.0));
        assert_eq!(spec.price_to, None);
        assert_eq!(spec.flowers_count_from, Some(15.5));
    }

    #[test]
    fn test_non_finite_numbers_are_absent() {
        let spec = normalize_filter_spec(&params(&[("priceFrom", "inf"), ("priceTo", "NaN")]));
        assert_eq!(spec.price_from, None);
        assert_eq!(spec.price_to, None);
    }

    #[test]
    fn test_boolean_tri_state() {
        let spec = normalize_filter_spec(&params(&[("hasDiscount", "true"), ("hasGift", "false")]));
        assert_eq!(spec.has_discount, Some(true));
        assert_eq!(spec.has_gift, Some(false));

        let spec = normalize_filter_spec(&params(&[("hasDiscount", "TRUE"), ("hasGift", "")]));
        assert_eq!(spec.has_discount, None);
        assert_eq!(spec.has_gift, None);
    }

    #[test]
    fn test_enum_fields_asymmetric_fallback() {
        let spec =
            normalize_filter_spec(&params(&[("flowersCountRange", "1-5"), ("sort", "cheapest")]));
        assert_eq!(spec.flowers_count_range, None);
        assert_eq!(spec.sort, SortKey::PriceAsc);

        let spec = normalize_filter_spec(&params(&[
            ("flowersCountRange", "gt91"),
            ("sort", "ratingDesc"),
        ]));
        assert_eq!(spec.flowers_count_range, Some(FlowerCountBucket::Gt91));
        assert_eq!(spec.sort, SortKey::RatingDesc);
    }

    #[test]
    fn test_bucket_overrides_threshold() {
        let spec = normalize_filter_spec(&params(&[
            ("flowersCountFrom", "50"),
            ("flowersCountRange", "11-31"),
        ]));
        assert_eq!(spec.flowers_count_range, Some(FlowerCountBucket::From11To31));
        assert_eq!(spec.flowers_count_from, None);

        // An invalid bucket does not suppress the threshold.
        let spec = normalize_filter_spec(&params(&[
            ("flowersCountFrom", "50"),
            ("flowersCountRange", "bogus"),
        ]));
        assert_eq!(spec.flowers_count_from, Some(50.0));
    }

    #[test]
    fn test_list_from_comma_string() {
        let spec = normalize_filter_spec(&params(&[("colors", " red, white ,,")]));
        assert_eq!(spec.colors, Some(vec!["red".to_string(), "white".to_string()]));
    }

    #[test]
    fn test_list_from_repeated_values() {
        let mut raw = RawParams::new();
        raw.insert_list("flowerTypes", ["роза", "тюльпан,ирис"]);
        let spec = normalize_filter_spec(&raw);
        assert_eq!(
            spec.flower_types,
            Some(vec!["роза".to_string(), "тюльпан".to_string(), "ирис".to_string()])
        );
    }

    #[test]
    fn test_stem_heights_drop_unparseable() {
        let spec = normalize_filter_spec(&params(&[("stemHeights", "50,abc, 70")]));
        assert_eq!(spec.stem_heights, Some(vec![50.0, 70.0]));

        let spec = normalize_filter_spec(&params(&[("stemHeights", "abc,def")]));
        assert_eq!(spec.stem_heights, None);
    }

    #[test]
    fn test_empty_lists_are_absent() {
        let spec = normalize_filter_spec(&params(&[("colors", " , "), ("flowerTypes", "")]));
        assert_eq!(spec.colors, None);
        assert_eq!(spec.flower_types, None);
    }

    #[test]
    fn test_shop_slug_empty_is_absent() {
        let spec = normalize_filter_spec(&params(&[("shopSlug", "")]));
        assert_eq!(spec.shop_slug, None);

        let spec = normalize_filter_spec(&params(&[("shopSlug", "rose-house")]));
        assert_eq!(spec.shop_slug.as_deref(), Some("rose-house"));

        // Only the empty string is absent; anything else is kept verbatim.
        let spec = normalize_filter_spec(&params(&[("shopSlug", "   ")]));
        assert_eq!(spec.shop_slug.as_deref(), Some("   "));
    }

    #[test]
    fn test_query_pairs_round_trip_through_normalizer() {
        let spec = normalize_filter_spec(&params(&[
            ("priceFrom", "100"),
            ("flowersCountRange", "31-61"),
            ("hasGift", "true"),
            ("colors", "red,white"),
            ("stemHeights", "60"),
            ("sort", "priceDesc"),
        ]));
        let again = normalize_filter_spec(&RawParams::from_pairs(spec.to_query_pairs()));
        assert_eq!(again, spec);
    }
}
