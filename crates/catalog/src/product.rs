//! Catalog products and the sourced listings they are built from.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// Resale markup applied to sourced prices, in tenths (25 = x2.5).
pub const RESALE_MARKUP_TENTHS: i64 = 25;

/// Rating assigned to listings that arrive without one.
pub const DEFAULT_RATING: u8 = 5;

/// Description assigned to listings that arrive without one.
pub const DEFAULT_DESCRIPTION: &str = "Trending item";

/// One product as served to the storefront grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image_url: String,
    pub source_url: String,
    pub rating: u8,
}

/// A raw listing scraped from the upstream source, before markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceListing {
    pub name: String,
    pub source_price: Money,
    pub image_url: String,
    pub source_url: String,
    pub description: Option<String>,
    pub rating: Option<u8>,
}

impl SourceListing {
    /// Converts the listing into a catalog product under `id`.
    ///
    /// Applies the fixed resale markup to the sourced price and fills in the
    /// defaults for missing description and rating.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            price: apply_markup(self.source_price),
            image_url: self.image_url,
            source_url: self.source_url,
            rating: self.rating.unwrap_or(DEFAULT_RATING),
        }
    }
}

/// Applies the resale markup, rounding half-up to the nearest cent.
pub fn apply_markup(source_price: Money) -> Money {
    let cents = (source_price.cents() * RESALE_MARKUP_TENTHS + 5) / 10;
    Money::from_cents(cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(cents: i64) -> SourceListing {
        SourceListing {
            name: "Enamel Mug".to_string(),
            source_price: Money::from_cents(cents),
            image_url: "https://img.example/mug.png".to_string(),
            source_url: "https://source.example/mug".to_string(),
            description: None,
            rating: None,
        }
    }

    #[test]
    fn test_markup_multiplies_by_two_and_a_half() {
        assert_eq!(apply_markup(Money::from_cents(1000)).cents(), 2500);
        assert_eq!(apply_markup(Money::from_cents(399)).cents(), 998);
    }

    #[test]
    fn test_markup_rounds_half_up() {
        // 101 * 2.5 = 252.5 cents
        assert_eq!(apply_markup(Money::from_cents(101)).cents(), 253);
    }

    #[test]
    fn test_into_product_fills_defaults() {
        let product = listing(400).into_product(ProductId::new(7));

        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.price.cents(), 1000);
        assert_eq!(product.description, DEFAULT_DESCRIPTION);
        assert_eq!(product.rating, DEFAULT_RATING);
    }

    #[test]
    fn test_into_product_keeps_provided_fields() {
        let mut source = listing(400);
        source.description = Some("Hand-thrown stoneware".to_string());
        source.rating = Some(4);

        let product = source.into_product(ProductId::new(1));
        assert_eq!(product.description, "Hand-thrown stoneware");
        assert_eq!(product.rating, 4);
    }

    #[test]
    fn test_product_serialization_roundtrip() {
        let product = listing(250).into_product(ProductId::new(3));
        let json = serde_json::to_string(&product).unwrap();
        let deserialized: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(product, deserialized);
    }
}
