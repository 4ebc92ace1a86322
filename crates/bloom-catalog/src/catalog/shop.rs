//! Shop reference data.

use crate::ids::ShopId;
use serde::{Deserialize, Serialize};

/// Geographic position of a shop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Shop contact channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ShopContacts {
    /// Phone number as displayed.
    pub phone: String,
    /// WhatsApp number, if the shop takes orders there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    /// Instagram handle without the leading `@`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// A shop on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    /// Unique shop identifier.
    pub id: ShopId,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Display name. Part of the search haystack of every product the shop owns.
    pub name: String,
    pub description: String,
    pub city: String,
    /// Street address.
    pub address: String,
    pub location: GeoPoint,
    /// Free-text working hours, e.g. "Daily 9:00-21:00".
    pub working_hours: String,
    pub contacts: ShopContacts,
}

impl Shop {
    /// Create a shop with empty descriptive fields.
    pub fn new(id: impl Into<ShopId>, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            name: name.into(),
            description: String::new(),
            city: String::new(),
            address: String::new(),
            location: GeoPoint { lat: 0.0, lng: 0.0 },
            working_hours: String::new(),
            contacts: ShopContacts::default(),
        }
    }

    pub fn has_whatsapp(&self) -> bool {
        self.contacts.whatsapp.as_deref().is_some_and(|w| !w.is_empty())
    }

    pub fn has_instagram(&self) -> bool {
        self.contacts.instagram.as_deref().is_some_and(|i| !i.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_deserializes_camel_case() {
        let json = r#"{
            "id": "rose-house",
            "slug": "rose-house",
            "name": "Rose House",
            "description": "Roses",
            "city": "Almaty",
            "address": "Abay ave, 25",
            "location": { "lat": 43.23, "lng": 76.88 },
            "workingHours": "Daily 9:00-21:00",
            "contacts": { "phone": "+7 700 123 45 67", "instagram": "rose.house" }
        }"#;

        let shop: Shop = serde_json::from_str(json).unwrap();
        assert_eq!(shop.id.as_str(), "rose-house");
        assert_eq!(shop.working_hours, "Daily 9:00-21:00");
        assert!(shop.has_instagram());
        assert!(!shop.has_whatsapp());
    }
}
