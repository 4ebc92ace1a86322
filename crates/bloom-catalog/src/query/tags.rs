//! Human-readable chips for the active constraints of a filter.

use serde::Serialize;

use crate::catalog::Shop;
use crate::reference::{label_for, COLOR_OPTIONS, FLOWER_TYPE_OPTIONS};

use super::spec::{format_number, FilterSpec};

/// One active constraint: display label plus a `key:value` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterTag {
    pub label: String,
    pub value: String,
}

impl FilterTag {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// List the active constraints of `spec` in display order.
///
/// Colors and flower types use reference labels where known; unknown values
/// are shown as-is. The shop tag shows the shop name when it resolves.
pub fn active_tags(spec: &FilterSpec, shops: &[Shop]) -> Vec<FilterTag> {
    let mut tags = Vec::new();

    if let Some(v) = spec.price_from {
        tags.push(FilterTag::new(format!("от {}₸", format_number(v)), "priceFrom"));
    }
    if let Some(v) = spec.price_to {
        tags.push(FilterTag::new(format!("до {}₸", format_number(v)), "priceTo"));
    }
    if let Some(bucket) = spec.flowers_count_range {
        tags.push(FilterTag::new(
            bucket.label(),
            format!("flowersCountRange:{}", bucket.as_str()),
        ));
    } else if let Some(v) = spec.flowers_count_from {
        tags.push(FilterTag::new(format!("от {} шт", format_number(v)), "flowersCountFrom"));
    }
    if let Some(v) = spec.has_discount {
        let label = if v { "со скидкой" } else { "без скидки" };
        tags.push(FilterTag::new(label, format!("hasDiscount:{}", v)));
    }
    if let Some(v) = spec.has_gift {
        let label = if v { "с подарком" } else { "без подарка" };
        tags.push(FilterTag::new(label, format!("hasGift:{}", v)));
    }
    if let Some(slug) = &spec.shop_slug {
        let label = shops
            .iter()
            .find(|s| &s.slug == slug)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "магазин".to_string());
        tags.push(FilterTag::new(label, format!("shop:{}", slug)));
    }

    for color in spec.colors.iter().flatten() {
        let label = label_for(COLOR_OPTIONS, color).unwrap_or(color.as_str());
        tags.push(FilterTag::new(label, format!("color:{}", color)));
    }
    for flower in spec.flower_types.iter().flatten() {
        let label = label_for(FLOWER_TYPE_OPTIONS, flower).unwrap_or(flower.as_str());
        tags.push(FilterTag::new(label, format!("flower:{}", flower)));
    }
    for height in spec.stem_heights.iter().flatten() {
        let height = format_number(*height);
        tags.push(FilterTag::new(format!("{} см", height), format!("height:{}", height)));
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FlowerCountBucket;

    #[test]
    fn test_no_tags_for_empty_spec() {
        assert!(active_tags(&FilterSpec::new(), &[]).is_empty());
    }

    #[test]
    fn test_tags_in_display_order() {
        let shops = vec![Shop::new("s1", "rose-house", "Rose House")];
        let spec = FilterSpec::new()
            .with_price_range(Some(10000.0), None)
            .with_bucket(FlowerCountBucket::From31To61)
            .with_gift(true)
            .with_shop_slug("rose-house")
            .with_colors(["red", "teal"])
            .with_stem_heights([60.0]);

        let tags = active_tags(&spec, &shops);
        let labels: Vec<&str> = tags.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "от 10000₸",
                "от 31 до 61 шт",
                "с подарком",
                "Rose House",
                "Красный",
                "teal",
                "60 см"
            ]
        );
        assert_eq!(tags[1].value, "flowersCountRange:31-61");
        assert_eq!(tags[6].value, "height:60");
    }

    #[test]
    fn test_unknown_shop_gets_generic_label() {
        let spec = FilterSpec::new().with_shop_slug("nowhere");
        let tags = active_tags(&spec, &[]);
        assert_eq!(tags, vec![FilterTag::new("магазин", "shop:nowhere")]);
    }
}
