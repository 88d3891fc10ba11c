//! Cart lines and the cart itself.
//!
//! A [`Cart`] keeps at most one [`CartItem`] per product id, in insertion
//! order. All mutation goes through the methods here so that invariant
//! can't be broken from outside.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// One product line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog product id.
    pub id: ProductId,
    /// Product title at the time it was added.
    pub title: String,
    /// Unit price at the time it was added.
    pub price: Price,
    /// Product image URL.
    pub image: String,
    /// Number of units, at least 1 once in a cart.
    pub quantity: u32,
}

impl CartItem {
    /// Build a cart line for `quantity` units of a catalog product.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// An ordered list of cart lines, unique by product id.
///
/// Serializes as a bare JSON array, the persisted `cart_<email>` format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a line. If the product is already in the cart its quantity grows
    /// by `item.quantity`; otherwise the line is appended.
    pub fn add(&mut self, item: CartItem) {
        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None if item.quantity > 0 => self.items.push(item),
            None => {}
        }
    }

    /// Remove the line for `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.id != id);
        self.items.len() != before
    }

    /// Set the quantity for `id`. A quantity of zero removes the line.
    ///
    /// Returns `false` if the product isn't in the cart.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id);
        }
        match self.items.iter_mut().find(|line| line.id == id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Look up the line for `id`.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all lines (the navigation badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

impl From<Vec<CartItem>> for Cart {
    /// Builds a cart from raw lines, merging duplicate ids and dropping
    /// zero-quantity lines, as persisted data may not honour the invariants.
    fn from(lines: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            cart.add(line);
        }
        cart
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn item(id: i32, quantity: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(1000),
            image: format!("https://img.example/{id}.jpg"),
            quantity,
        }
    }

    #[test]
    fn test_add_same_id_sums_quantities() {
        let mut cart = Cart::new();
        cart.add(item(1, 1));
        cart.add(item(1, 2));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(item(3, 1));
        cart.add(item(1, 1));
        cart.add(item(3, 1));
        let ids: Vec<i32> = cart.items().iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_remove_leaves_others_untouched() {
        let mut cart = Cart::new();
        cart.add(item(1, 1));
        cart.add(item(2, 5));
        cart.add(item(3, 2));
        assert!(cart.remove(ProductId::new(2)));
        assert!(!cart.remove(ProductId::new(2)));
        assert_eq!(cart.items(), &[item(1, 1), item(3, 2)]);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(item(1, 1));
        assert!(cart.set_quantity(ProductId::new(1), 4));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 4);
        assert!(!cart.set_quantity(ProductId::new(9), 4));
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(item(1, 2));
        assert!(cart.set_quantity(ProductId::new(1), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add(item(1, 2));
        cart.add(item(2, 3));
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.subtotal(), Price::from_cents(5000));
        cart.clear();
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_persisted_format() {
        let mut cart = Cart::new();
        cart.add(CartItem {
            id: ProductId::new(1),
            title: "Backpack".to_string(),
            price: Price::from_cents(10995),
            image: "https://img.example/1.jpg".to_string(),
            quantity: 2,
        });
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "id": 1,
                "title": "Backpack",
                "price": 109.95,
                "image": "https://img.example/1.jpg",
                "quantity": 2
            }])
        );
    }

    #[test]
    fn test_from_lines_normalises() {
        let cart = Cart::from(vec![item(1, 1), item(2, 0), item(1, 2)]);
        assert_eq!(cart.items(), &[item(1, 3)]);
    }

    #[test]
    fn test_totals_of_huge_persisted_prices_saturate() {
        let json = r#"[
            {"id":1,"title":"Yacht","price":1e28,"image":"y.jpg","quantity":10},
            {"id":2,"title":"Pen","price":1.5,"image":"p.jpg","quantity":1}
        ]"#;
        let cart = Cart::from(serde_json::from_str::<Vec<CartItem>>(json).unwrap());

        assert_eq!(cart.items()[0].line_total().amount(), rust_decimal::Decimal::MAX);
        assert_eq!(cart.subtotal().amount(), rust_decimal::Decimal::MAX);
        assert_eq!(cart.item_count(), 11);
    }
}
