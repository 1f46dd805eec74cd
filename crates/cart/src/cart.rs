//! The cart collection and its snapshot codec.

use common::{Money, ProductId};

use crate::item::{CartItem, ProductInfo};

/// Ordered collection of cart lines, at most one per product id.
///
/// Insertion order is preserved; merging by id never reorders existing lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from previously persisted lines.
    ///
    /// Re-establishes the invariants on untrusted input: duplicate ids are
    /// merged by summing quantities and zero-quantity lines are dropped.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match cart.position(item.product_id) {
                Some(idx) => cart.items[idx].quantity += item.quantity,
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Adds one unit of `product`.
    ///
    /// If a line with the same id exists its quantity is incremented and its
    /// stored name/price/image are left unchanged; the identifier, not the
    /// payload, is authoritative for the merge. Otherwise a new line with
    /// quantity 1 is appended.
    pub fn add(&mut self, product: ProductInfo) {
        match self.position(product.id) {
            Some(idx) => self.items[idx].quantity += 1,
            None => self.items.push(CartItem::from_product(product)),
        }
    }

    /// Removes the line with the given id.
    ///
    /// Returns true if a line was removed; an absent id is a no-op.
    pub fn remove(&mut self, id: ProductId) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Empties the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of line totals, recomputed on every call.
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.line_total())
    }

    /// Sum of quantities, recomputed on every call.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Returns true if the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterates the lines in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Clones the full ordered line set.
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    /// Serializes the cart as a JSON array of lines.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.items)
    }

    /// Parses a cart from a JSON array of lines.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let items: Vec<CartItem> = serde_json::from_str(json)?;
        Ok(Self::from_items(items))
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.product_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ProductInfo {
        ProductInfo::new(1, "Widget", Money::from_cents(1000), "widget.png")
    }

    fn gadget() -> ProductInfo {
        ProductInfo::new(2, "Gadget", Money::from_cents(500), "gadget.png")
    }

    #[test]
    fn test_add_new_product_appends_line() {
        let mut cart = Cart::new();
        cart.add(widget());
        cart.add(gadget());

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_adding_same_id_twice_merges() {
        let mut cart = Cart::new();
        cart.add(widget());
        cart.add(widget());

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.snapshot()[0].quantity, 2);
    }

    #[test]
    fn test_merge_keeps_existing_payload() {
        let mut cart = Cart::new();
        cart.add(widget());
        // Same id, different name and price: the stored line wins.
        cart.add(ProductInfo::new(
            1,
            "Renamed",
            Money::from_cents(9999),
            "other.png",
        ));

        let items = cart.snapshot();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Widget");
        assert_eq!(items[0].unit_price.cents(), 1000);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(widget());

        assert!(!cart.remove(ProductId::new(99)));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total().cents(), 1000);
    }

    #[test]
    fn test_remove_deletes_whole_line() {
        let mut cart = Cart::new();
        cart.add(widget());
        cart.add(widget());
        cart.add(gadget());

        assert!(cart.remove(ProductId::new(1)));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_clear_zeroes_everything() {
        let mut cart = Cart::new();
        cart.add(widget());
        cart.add(gadget());
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_totals_scenario() {
        // [{id:1, price:$10, qty:2}, {id:2, price:$5, qty:1}]
        let mut cart = Cart::new();
        cart.add(widget());
        cart.add(widget());
        cart.add(gadget());

        assert_eq!(cart.total(), Money::from_cents(2500));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(gadget());
        cart.add(widget());
        cart.add(gadget());

        let ids: Vec<i64> = cart.items().map(|i| i.product_id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut cart = Cart::new();
        cart.add(widget());
        cart.add(widget());
        cart.add(gadget());

        let json = cart.to_json().unwrap();
        let restored = Cart::from_json(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_from_items_merges_duplicates_and_drops_zero_quantities() {
        let mut a = CartItem::from_product(widget());
        a.quantity = 2;
        let b = CartItem::from_product(widget());
        let mut zero = CartItem::from_product(gadget());
        zero.quantity = 0;

        let cart = Cart::from_items(vec![a, b, zero]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_from_json_rejects_malformed_content() {
        assert!(Cart::from_json("not json").is_err());
        assert!(Cart::from_json(r#"{"items": 3}"#).is_err());
    }
}
