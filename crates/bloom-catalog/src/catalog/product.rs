//! Product listing types.

use crate::error::{CatalogError, Result};
use crate::ids::{ProductId, ShopId};
use serde::{Deserialize, Serialize};

/// Kind of gift bundled with a bouquet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiftType {
    Toy,
    Cake,
    Chocolate,
    Card,
}

impl GiftType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GiftType::Toy => "toy",
            GiftType::Cake => "cake",
            GiftType::Chocolate => "chocolate",
            GiftType::Card => "card",
        }
    }
}

/// A gift item bundled with a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductGift {
    #[serde(rename = "type")]
    pub gift_type: GiftType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One line of a bouquet's composition (e.g. 25 x "white rose").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionItem {
    pub flower_type: String,
    pub quantity: u32,
}

/// Aggregated customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score.
    pub value: f64,
    /// Number of reviews.
    pub count: u32,
}

/// A product listing owned by one shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// URL-friendly slug, unique within the owning shop.
    pub slug: String,
    /// Owning shop. Must reference an existing shop.
    pub shop_id: ShopId,
    pub title: String,
    pub description: String,
    /// Price in whole currency units.
    pub price: i64,
    /// Price before discount. Greater than `price` when `has_discount` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<i64>,
    pub has_discount: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u32>,
    /// Total number of stems in the bouquet.
    pub flowers_count: u32,
    /// Ordered composition; quantities roughly sum to `flowers_count`.
    #[serde(default)]
    pub composition: Vec<CompositionItem>,
    /// Color tags (e.g. "red", "white").
    #[serde(default)]
    pub colors: Vec<String>,
    /// Available stem heights in centimeters.
    #[serde(default)]
    pub stem_heights: Vec<u32>,
    /// Flower type tags used by the flower-type filter and search.
    #[serde(default)]
    pub flower_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gifts: Option<Vec<ProductGift>>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    pub is_available: bool,
}

impl Product {
    /// Create an available, undiscounted single-stem product.
    pub fn new(
        id: impl Into<ProductId>,
        shop_id: impl Into<ShopId>,
        title: impl Into<String>,
        price: i64,
    ) -> Self {
        let id = id.into();
        Self {
            slug: id.as_str().to_string(),
            id,
            shop_id: shop_id.into(),
            title: title.into(),
            description: String::new(),
            price,
            old_price: None,
            has_discount: false,
            discount_percent: None,
            flowers_count: 1,
            composition: Vec::new(),
            colors: Vec::new(),
            stem_heights: Vec::new(),
            flower_types: Vec::new(),
            gifts: None,
            images: Vec::new(),
            rating: None,
            is_available: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the product as discounted from `old_price`.
    pub fn with_discount(mut self, old_price: i64) -> Self {
        self.old_price = Some(old_price);
        self.has_discount = true;
        self
    }

    pub fn with_flowers_count(mut self, count: u32) -> Self {
        self.flowers_count = count;
        self
    }

    pub fn with_composition(mut self, flower_type: impl Into<String>, quantity: u32) -> Self {
        self.composition.push(CompositionItem {
            flower_type: flower_type.into(),
            quantity,
        });
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_flower_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flower_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_stem_heights(mut self, heights: impl IntoIterator<Item = u32>) -> Self {
        self.stem_heights = heights.into_iter().collect();
        self
    }

    pub fn with_gift(mut self, gift_type: GiftType, title: impl Into<String>) -> Self {
        self.gifts.get_or_insert_with(Vec::new).push(ProductGift {
            gift_type,
            title: title.into(),
            description: None,
        });
        self
    }

    pub fn with_rating(mut self, value: f64, count: u32) -> Self {
        self.rating = Some(Rating { value, count });
        self
    }

    /// True iff the gift list is present and non-empty.
    pub fn has_gift(&self) -> bool {
        self.gifts.as_ref().is_some_and(|g| !g.is_empty())
    }

    /// Rating value, with rating-less products counted as 0.
    pub fn rating_value(&self) -> f64 {
        self.rating.map(|r| r.value).unwrap_or(0.0)
    }

    /// Discount percentage: the explicit value if present, otherwise derived
    /// from `old_price`.
    pub fn discount_percent(&self) -> Option<u32> {
        if !self.has_discount {
            return None;
        }
        self.discount_percent.or_else(|| {
            self.old_price.and_then(|old| {
                if old > self.price && old > 0 {
                    let savings = (old - self.price) as f64;
                    Some((savings / old as f64 * 100.0).round() as u32)
                } else {
                    None
                }
            })
        })
    }

    /// Check that the discount flag agrees with the discount fields.
    pub fn is_consistent(&self) -> bool {
        if self.has_discount {
            let old_ok = self.old_price.map_or(true, |old| old > self.price);
            old_ok && (self.old_price.is_some() || self.discount_percent.is_some())
        } else {
            true
        }
    }

    /// Validate data invariants the query engine relies on.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| CatalogError::InvalidProduct {
            product_id: self.id.to_string(),
            reason: reason.to_string(),
        };

        if self.price <= 0 {
            return Err(invalid("price must be positive"));
        }
        if self.flowers_count == 0 {
            return Err(invalid("flowers count must be positive"));
        }
        if !self.is_consistent() {
            return Err(invalid("discount flag disagrees with old price"));
        }
        Ok(())
    }
}
