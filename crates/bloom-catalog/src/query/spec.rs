//! Filter specification and the raw parameter bag it is built from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single raw parameter value, as decoded from a URL query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    List(Vec<String>),
}

impl ParamValue {
    /// First value, for fields that only take one.
    pub fn first(&self) -> Option<&str> {
        match self {
            ParamValue::Single(s) => Some(s.as_str()),
            ParamValue::List(values) => values.first().map(String::as_str),
        }
    }

    /// All values in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(s) => vec![s.as_str()],
            ParamValue::List(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Untyped parameter bag: name to a single string or a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawParams(BTreeMap<String, ParamValue>);

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs. Repeated keys accumulate into a list.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.append(key, value);
        }
        params
    }

    /// Set a single value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), ParamValue::Single(value.into()));
    }

    /// Set a list value, replacing any previous one.
    pub fn insert_list<I, S>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.0.insert(key.into(), ParamValue::List(values));
    }

    /// Add a value, turning an existing single value into a list.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let key = key.into();
        let next = match self.0.remove(&key) {
            None => ParamValue::Single(value),
            Some(ParamValue::Single(prev)) => ParamValue::List(vec![prev, value]),
            Some(ParamValue::List(mut values)) => {
                values.push(value);
                ParamValue::List(values)
            }
        };
        self.0.insert(key, next);
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Sort keys for browse results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKey {
    /// Cheapest first, ties by best rating.
    #[default]
    #[serde(rename = "priceAsc")]
    PriceAsc,
    /// Most expensive first, ties by best rating.
    #[serde(rename = "priceDesc")]
    PriceDesc,
    /// Best rated first, ties by cheapest.
    #[serde(rename = "ratingDesc")]
    RatingDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::PriceAsc, SortKey::PriceDesc, SortKey::RatingDesc];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "priceAsc",
            SortKey::PriceDesc => "priceDesc",
            SortKey::RatingDesc => "ratingDesc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "priceAsc" => Some(SortKey::PriceAsc),
            "priceDesc" => Some(SortKey::PriceDesc),
            "ratingDesc" => Some(SortKey::RatingDesc),
            _ => None,
        }
    }

    /// Parse, falling back to the default for unknown keys.
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "Сначала дешевые",
            SortKey::PriceDesc => "Сначала дорогие",
            SortKey::RatingDesc => "По рейтингу",
        }
    }
}

/// Named half-open flower count range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowerCountBucket {
    #[serde(rename = "lt11")]
    Lt11,
    #[serde(rename = "11-31")]
    From11To31,
    #[serde(rename = "31-61")]
    From31To61,
    #[serde(rename = "61-91")]
    From61To91,
    #[serde(rename = "gt91")]
    Gt91,
}

impl FlowerCountBucket {
    pub const ALL: [FlowerCountBucket; 5] = [
        FlowerCountBucket::Lt11,
        FlowerCountBucket::From11To31,
        FlowerCountBucket::From31To61,
        FlowerCountBucket::From61To91,
        FlowerCountBucket::Gt91,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowerCountBucket::Lt11 => "lt11",
            FlowerCountBucket::From11To31 => "11-31",
            FlowerCountBucket::From31To61 => "31-61",
            FlowerCountBucket::From61To91 => "61-91",
            FlowerCountBucket::Gt91 => "gt91",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "lt11" => Some(FlowerCountBucket::Lt11),
            "11-31" => Some(FlowerCountBucket::From11To31),
            "31-61" => Some(FlowerCountBucket::From31To61),
            "61-91" => Some(FlowerCountBucket::From61To91),
            "gt91" => Some(FlowerCountBucket::Gt91),
            _ => None,
        }
    }

    /// Inclusive lower bound and exclusive upper bound (`None` = unbounded).
    pub fn bounds(&self) -> (u32, Option<u32>) {
        match self {
            FlowerCountBucket::Lt11 => (0, Some(11)),
            FlowerCountBucket::From11To31 => (11, Some(31)),
            FlowerCountBucket::From31To61 => (31, Some(61)),
            FlowerCountBucket::From61To91 => (61, Some(91)),
            FlowerCountBucket::Gt91 => (91, None),
        }
    }

    pub fn contains(&self, count: u32) -> bool {
        let (low, high) = self.bounds();
        count >= low && high.map_or(true, |high| count < high)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FlowerCountBucket::Lt11 => "до 11 шт",
            FlowerCountBucket::From11To31 => "от 11 до 31 шт",
            FlowerCountBucket::From31To61 => "от 31 до 61 шт",
            FlowerCountBucket::From61To91 => "от 61 до 91 шт",
            FlowerCountBucket::Gt91 => "более 91 шт",
        }
    }
}

/// Normalized, typed browse query.
///
/// Every constraint is optional: `None` means "no restriction", never
/// "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_from: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_to: Option<f64>,
    /// Minimum flower count. Ignored while `flowers_count_range` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowers_count_from: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowers_count_range: Option<FlowerCountBucket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_discount: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_gift: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stem_heights: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flower_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_slug: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field other than `sort` constrains the result.
    pub fn is_empty(&self) -> bool {
        self.price_from.is_none()
            && self.price_to.is_none()
            && self.flowers_count_from.is_none()
            && self.flowers_count_range.is_none()
            && self.has_discount.is_none()
            && self.has_gift.is_none()
            && self.colors.is_none()
            && self.stem_heights.is_none()
            && self.flower_types.is_none()
            && self.shop_slug.is_none()
    }

    pub fn with_price_range(mut self, from: Option<f64>, to: Option<f64>) -> Self {
        self.price_from = from;
        self.price_to = to;
        self
    }

    pub fn with_bucket(mut self, bucket: FlowerCountBucket) -> Self {
        self.flowers_count_range = Some(bucket);
        self
    }

    pub fn with_discount(mut self, has_discount: bool) -> Self {
        self.has_discount = Some(has_discount);
        self
    }

    pub fn with_gift(mut self, has_gift: bool) -> Self {
        self.has_gift = Some(has_gift);
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_flower_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flower_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_stem_heights(mut self, heights: impl IntoIterator<Item = f64>) -> Self {
        self.stem_heights = Some(heights.into_iter().collect());
        self
    }

    pub fn with_shop_slug(mut self, slug: impl Into<String>) -> Self {
        self.shop_slug = Some(slug.into());
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Re-serialize into query-string pairs, lists comma-joined.
    ///
    /// Feeding the pairs back through the normalizer yields the same spec.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(v) = self.price_from {
            pairs.push(("priceFrom", format_number(v)));
        }
        if let Some(v) = self.price_to {
            pairs.push(("priceTo", format_number(v)));
        }
        if let Some(v) = self.flowers_count_from {
            pairs.push(("flowersCountFrom", format_number(v)));
        }
        if let Some(bucket) = self.flowers_count_range {
            pairs.push(("flowersCountRange", bucket.as_str().to_string()));
        }
        if let Some(v) = self.has_discount {
            pairs.push(("hasDiscount", v.to_string()));
        }
        if let Some(v) = self.has_gift {
            pairs.push(("hasGift", v.to_string()));
        }
        if let Some(colors) = &self.colors {
            pairs.push(("colors", colors.join(",")));
        }
        if let Some(heights) = &self.stem_heights {
            let joined = heights.iter().map(|h| format_number(*h)).collect::<Vec<_>>();
            pairs.push(("stemHeights", joined.join(",")));
        }
        if let Some(types) = &self.flower_types {
            pairs.push(("flowerTypes", types.join(",")));
        }
        if let Some(slug) = &self.shop_slug {
            pairs.push(("shopSlug", slug.clone()));
        }
        if self.sort != SortKey::default() {
            pairs.push(("sort", self.sort.as_str().to_string()));
        }

        pairs
    }
}

/// Render a number the way a query string carries it: integers without a
/// fractional part.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
