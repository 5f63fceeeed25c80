//! # Cart
//!
//! The ordered collection of cart lines and the three transitions the UI
//! drives it with.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  UI Action             Method              Cart Change                  │
//! │  ─────────             ──────              ───────────                  │
//! │                                                                         │
//! │  "Add" on product ───► add_to_cart(d) ──► new id:  push(d, qty 1)      │
//! │                                           same id: replace(d, qty + 1) │
//! │                                                                         │
//! │  "+" on cart line ───► increment(id) ───► qty + 1                      │
//! │                                                                         │
//! │  "-" on cart line ───► decrement(id) ───► qty 1: remove line           │
//! │                                           else:  qty - 1               │
//! │                                                                         │
//! │  Unknown ids leave the cart untouched.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order is insertion order. A repeat `add_to_cart` replaces the line in
//! place, taking title, image and price from the new descriptor.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::{CartItem, CartTotals, ProductDescriptor};
use crate::validation::validate_snapshot;

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id`
/// - Every item has `quantity >= 1`
///
/// Serializes as a bare JSON array, which is the storage payload format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from lines that already satisfy the cart invariants.
    pub fn from_items(items: Vec<CartItem>) -> CoreResult<Self> {
        validate_snapshot(&items)?;
        Ok(Cart { items })
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up a line by product id.
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product not in cart: appended with quantity 1
    /// - Product in cart: the line is rebuilt from `descriptor` with the old
    ///   quantity + 1, at the same position
    pub fn add_to_cart(&mut self, descriptor: &ProductDescriptor) {
        match self.items.iter_mut().find(|item| item.id == descriptor.id) {
            Some(existing) => {
                let quantity = existing.quantity.saturating_add(1);
                *existing = CartItem::from_descriptor(descriptor, quantity);
            }
            None => self.items.push(CartItem::from_descriptor(descriptor, 1)),
        }
    }

    /// Adds one unit to the line with `id`. No-op if absent.
    pub fn increment(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = item.quantity.saturating_add(1);
        }
    }

    /// Removes one unit from the line with `id`, dropping the line when its
    /// last unit goes. No-op if absent.
    pub fn decrement(&mut self, id: &str) {
        let Some(position) = self.items.iter().position(|item| item.id == id) else {
            return;
        };

        if self.items[position].quantity == 1 {
            self.items.remove(position);
        } else {
            self.items[position].quantity -= 1;
        }
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Display summary of the cart.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.len(),
            total_quantity: self.total_quantity(),
            subtotal: self.subtotal(),
        }
    }

    // =========================================================================
    // Payload
    // =========================================================================

    /// Serializes the whole cart into the storage payload.
    pub fn to_payload(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a storage payload and checks the cart invariants.
    pub fn from_payload(payload: &str) -> CoreResult<Self> {
        let items: Vec<CartItem> = serde_json::from_str(payload)?;
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn product(id: &str) -> ProductDescriptor {
        ProductDescriptor::new(id, format!("Product {}", id), format!("https://img/{}", id), 10.0)
    }

    fn quantities(cart: &Cart) -> Vec<(&str, u32)> {
        cart.items()
            .iter()
            .map(|item| (item.id.as_str(), item.quantity))
            .collect()
    }

    #[test]
    fn test_add_new_product_appends_with_quantity_one() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product("a"));
        cart.add_to_cart(&product("b"));

        assert_eq!(quantities(&cart), vec![("a", 1), ("b", 1)]);
        assert_eq!(cart.items()[0].title, "Product a");
        assert_eq!(cart.items()[0].image_url, "https://img/a");
        assert_eq!(cart.items()[0].price, 10.0);
    }

    #[test]
    fn test_add_existing_product_overwrites_fields_in_place() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product("a"));
        cart.add_to_cart(&product("b"));

        let renamed = ProductDescriptor::new("a", "Renamed", "https://img/new", 12.5);
        cart.add_to_cart(&renamed);

        assert_eq!(quantities(&cart), vec![("a", 2), ("b", 1)]);
        let line = cart.get("a").unwrap();
        assert_eq!(line.title, "Renamed");
        assert_eq!(line.image_url, "https://img/new");
        assert_eq!(line.price, 12.5);
    }

    #[test]
    fn test_increment_touches_only_matching_line() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product("a"));
        cart.add_to_cart(&product("b"));

        cart.increment("b");

        assert_eq!(quantities(&cart), vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn test_decrement_above_one_keeps_line() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product("a"));
        cart.increment("a");

        cart.decrement("a");

        assert_eq!(quantities(&cart), vec![("a", 1)]);
    }

    #[test]
    fn test_decrement_at_one_removes_line() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product("a"));
        cart.add_to_cart(&product("b"));
        cart.add_to_cart(&product("c"));

        cart.decrement("b");

        assert_eq!(quantities(&cart), vec![("a", 1), ("c", 1)]);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product("a"));
        let before = cart.clone();

        cart.increment("missing");
        cart.decrement("missing");

        assert_eq!(cart, before);
    }

    #[test]
    fn test_full_lifecycle() {
        let mut cart = Cart::new();
        let a = product("a");

        cart.add_to_cart(&a);
        assert_eq!(quantities(&cart), vec![("a", 1)]);
        cart.add_to_cart(&a);
        assert_eq!(quantities(&cart), vec![("a", 2)]);
        cart.increment("a");
        assert_eq!(quantities(&cart), vec![("a", 3)]);
        cart.decrement("a");
        cart.decrement("a");
        assert_eq!(quantities(&cart), vec![("a", 1)]);
        cart.decrement("a");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_to_cart(&ProductDescriptor::new("a", "A", "u", 2.5));
        cart.add_to_cart(&ProductDescriptor::new("b", "B", "u", 4.0));
        cart.increment("a");

        let totals = cart.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.subtotal, 9.0);
    }

    #[test]
    fn test_payload_preserves_order_and_fields() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product("z"));
        cart.add_to_cart(&product("a"));
        cart.increment("z");

        let restored = Cart::from_payload(&cart.to_payload().unwrap()).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_payload_is_bare_array() {
        let mut cart = Cart::new();
        cart.add_to_cart(&ProductDescriptor::new("p1", "T", "u", 10.0));

        let payload = cart.to_payload().unwrap();
        assert!(payload.starts_with('['));
        assert!(payload.contains(r#""image_url":"u""#));
    }

    #[test]
    fn test_payload_with_empty_id_reads_back() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product("good"));
        cart.add_to_cart(&ProductDescriptor::new("", "", "", 1.0));

        let restored = Cart::from_payload(&cart.to_payload().unwrap()).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_payload_with_null_price_keeps_other_lines() {
        let payload = r#"[
            {"id":"a","title":"T","image_url":"u","price":null,"quantity":1},
            {"id":"b","title":"T","image_url":"u","price":3.5,"quantity":2}
        ]"#;

        let cart = Cart::from_payload(payload).unwrap();
        assert_eq!(quantities(&cart), vec![("a", 1), ("b", 2)]);
        assert!(cart.items()[0].price.is_nan());
        assert_eq!(cart.items()[1].price, 3.5);
    }

    #[test]
    fn test_from_payload_rejects_malformed() {
        assert!(matches!(
            Cart::from_payload("{not json"),
            Err(CoreError::MalformedPayload(_))
        ));
        assert!(matches!(
            Cart::from_payload(r#"{"id":"p1"}"#),
            Err(CoreError::MalformedPayload(_))
        ));

        let duplicated = r#"[
            {"id":"a","title":"T","image_url":"u","price":1,"quantity":1},
            {"id":"a","title":"T","image_url":"u","price":1,"quantity":2}
        ]"#;
        assert!(matches!(
            Cart::from_payload(duplicated),
            Err(CoreError::Validation(_))
        ));
    }
}
