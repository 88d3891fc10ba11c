//! Catalog product types.
//!
//! [`Product`] mirrors the record shape served by the demo catalog API.
//! [`FeaturedProduct`] is the static fixture used for the home page
//! highlights, which never hit the network.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rating: Rating,
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    /// Average score out of 5.
    pub rate: f64,
    /// Number of ratings.
    pub count: u32,
}

/// A hand-picked product shown without a catalog round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedProduct {
    pub serial_number: u32,
    pub name: &'static str,
    pub image: &'static str,
    pub alt: &'static str,
    pub price: Price,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_record() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::from_cents(10995));
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.count, 120);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"id": 2, "title": "Mug", "price": 5, "image": "mug.jpg"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.description.is_empty());
        assert_eq!(product.rating, Rating::default());
    }
}
