//! Cart line items and the product payload that creates them.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// The product payload handed to the cart when adding an item.
///
/// Everything a [`CartItem`] carries except the quantity, which the cart
/// manages itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    /// The product identifier.
    pub id: ProductId,

    /// Human-readable product name, opaque to the cart.
    pub name: String,

    /// Price per unit.
    pub unit_price: Money,

    /// Image reference, opaque to the cart.
    pub image: String,
}

impl ProductInfo {
    /// Creates a new product payload.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            image: image.into(),
        }
    }
}

/// One product line in the cart.
///
/// Invariant: `quantity >= 1`. A line whose quantity would reach zero is
/// removed from the cart, never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product identifier. At most one line per id exists in a cart.
    pub product_id: ProductId,

    /// Human-readable product name.
    pub name: String,

    /// Price per unit.
    pub unit_price: Money,

    /// Image reference.
    pub image: String,

    /// Quantity in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a line with quantity 1 from a product payload.
    ///
    /// A negative unit price is sanitized to zero rather than rejected.
    pub fn from_product(product: ProductInfo) -> Self {
        Self {
            product_id: product.id,
            name: product.name,
            unit_price: product.unit_price.clamp_non_negative(),
            image: product.image,
            quantity: 1,
        }
    }

    /// Returns the total price for this line (quantity * unit_price).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_product_starts_at_quantity_one() {
        let product = ProductInfo::new(1, "Widget", Money::from_cents(1000), "widget.png");
        let item = CartItem::from_product(product);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price.cents(), 1000);
        assert_eq!(item.name, "Widget");
    }

    #[test]
    fn test_negative_price_is_sanitized_to_zero() {
        let product = ProductInfo::new(1, "Freebie", Money::from_cents(-250), "x.png");
        let item = CartItem::from_product(product);
        assert_eq!(item.unit_price, Money::zero());
    }

    #[test]
    fn test_line_total() {
        let mut item = CartItem::from_product(ProductInfo::new(
            7,
            "Gadget",
            Money::from_cents(500),
            "g.png",
        ));
        item.quantity = 3;
        assert_eq!(item.line_total().cents(), 1500);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let item = CartItem::from_product(ProductInfo::new(
            42,
            "Widget",
            Money::from_cents(999),
            "w.png",
        ));
        let json = serde_json::to_string(&item).unwrap();
        let deserialized: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, deserialized);
    }
}
