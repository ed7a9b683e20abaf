//! Shopping cart state.
//!
//! `Cart` is a pure state machine: no I/O and no locking happens here. The
//! [`CartManager`](crate::services::CartManager) owns a cart, publishes
//! snapshots to subscribers and mirrors every change to the session store.
//!
//! # Invariants
//!
//! - At most one item per product id
//! - Every stored item has `quantity >= 1`
//! - Totals use the product snapshot captured when the item was first added

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::product::{Product, ProductId};

/// Errors raised by cart input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// `add` was called with a quantity below one.
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),
}

/// A product snapshot paired with the quantity in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product as it looked when it was added.
    pub product: Product,
    /// Always at least one.
    pub quantity: u32,
}

impl CartItem {
    /// `price × quantity` for this line.
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// The session cart, keyed by product id in insertion order.
///
/// Serialized as a plain JSON array of [`CartItem`], which is the durable
/// session schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: IndexMap<ProductId, CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product is already present its quantity is incremented and the
    /// original snapshot is kept.
    pub fn add(&mut self, product: Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        self.merge_line(product, quantity);
        Ok(())
    }

    fn merge_line(&mut self, product: Product, quantity: u32) {
        self.items
            .entry(product.id.clone())
            .and_modify(|item| item.quantity = item.quantity.saturating_add(quantity))
            .or_insert(CartItem { product, quantity });
    }

    /// Remove a product. Returns `true` if it was present.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        self.items.shift_remove(id).is_some()
    }

    /// Replace a product's quantity.
    ///
    /// `quantity <= 0` removes the item. Unknown ids are ignored because the
    /// cart may reference products the caller no longer has loaded.
    /// Returns `true` if the cart changed.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.items.get_mut(id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// `Σ price × quantity`; zero for an empty cart.
    pub fn total(&self) -> Decimal {
        self.items.values().map(CartItem::line_total).sum()
    }

    /// `Σ quantity`.
    pub fn item_count(&self) -> u64 {
        self.items.values().map(|item| u64::from(item.quantity)).sum()
    }

    /// Look up an item by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.get(id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.values()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<CartItem>> for Cart {
    /// Rebuild a cart from its durable form.
    ///
    /// Duplicate entries are merged and zero-quantity entries dropped so a
    /// hand-edited or legacy payload still satisfies the invariants.
    fn from(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items.into_iter().filter(|item| item.quantity > 0) {
            cart.merge_line(item.product, item.quantity);
        }
        cart
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Decimal::new(price, 2),
            category: "Audio".to_string(),
            brand: "Acme".to_string(),
            images: vec![],
            specs: BTreeMap::new(),
        }
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut cart = Cart::new();
        cart.add(product("p", 1000), 2).unwrap();
        cart.add(product("p", 1000), 3).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&"p".into()).unwrap().quantity, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_add_zero_is_rejected() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add(product("p", 1000), 0),
            Err(CartError::InvalidQuantity(0))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut a = Cart::new();
        a.add(product("p", 1999), 2).unwrap();
        a.add(product("q", 500), 1).unwrap();
        let mut b = a.clone();

        a.set_quantity(&"p".into(), 0);
        b.remove(&"p".into());

        assert_eq!(a, b);
        assert_eq!(a.total(), b.total());
        assert_eq!(a.item_count(), b.item_count());
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let mut cart = Cart::new();
        cart.add(product("p", 1999), 2).unwrap();
        assert!(cart.set_quantity(&"p".into(), -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_replaces_not_adds() {
        let mut cart = Cart::new();
        cart.add(product("p", 1999), 2).unwrap();
        assert!(cart.set_quantity(&"p".into(), 7));
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_set_quantity_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("p", 1999), 2).unwrap();
        let before = cart.clone();
        assert!(!cart.set_quantity(&"missing".into(), 4));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.remove(&"missing".into()));
    }

    #[test]
    fn test_total_uses_snapshot_price() {
        let mut cart = Cart::new();
        let mut p = product("p", 1000);
        cart.add(p.clone(), 2).unwrap();

        // Live price change, then add again: the stored snapshot wins.
        p.price = Decimal::new(9999, 2);
        cart.add(p, 1).unwrap();

        assert_eq!(cart.total(), Decimal::new(3000, 2));
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let cart = Cart::new();
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(product("b", 1), 1).unwrap();
        cart.add(product("a", 1), 1).unwrap();
        cart.add(product("c", 1), 1).unwrap();
        cart.remove(&"a".into());

        let ids: Vec<&str> = cart.items().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_serializes_as_array() {
        let mut cart = Cart::new();
        cart.add(product("p", 1999), 2).unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["quantity"], 2);
        assert_eq!(json[0]["product"]["id"], "p");

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_deserialize_merges_duplicates_and_drops_zero() {
        let p = serde_json::to_value(product("p", 100)).unwrap();
        let q = serde_json::to_value(product("q", 100)).unwrap();
        let json = serde_json::json!([
            { "product": p, "quantity": 1 },
            { "product": q, "quantity": 0 },
            { "product": p, "quantity": 2 },
        ]);

        let cart: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_item_count_matches_quantities_over_mixed_ops() {
        let mut cart = Cart::new();
        let ops: [(&str, i64); 8] = [
            ("a", 3),
            ("b", 1),
            ("a", -1),
            ("c", 4),
            ("b", 0),
            ("c", 2),
            ("a", 5),
            ("d", 1),
        ];
        for (id, qty) in ops {
            if qty > 0 && cart.get(&id.into()).is_none() {
                cart.add(product(id, 100), u32::try_from(qty).unwrap()).unwrap();
            } else {
                cart.set_quantity(&id.into(), qty);
            }
        }

        let sum: u64 = cart.items().map(|i| u64::from(i.quantity)).sum();
        assert_eq!(cart.item_count(), sum);
        assert!(cart.items().all(|i| i.quantity >= 1));
    }
}
