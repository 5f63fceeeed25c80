//! # Cart Commands
//!
//! The calls the UI makes against the cart, each returning the updated cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart  ┌──────────┐  decrement (last unit)        │
//! │  │  Empty   │──────────────►│ In Cart  │──────────────────┐            │
//! │  │  Cart    │◄──────────────│          │◄─┐               │            │
//! │  └──────────┘   (all lines  └──────────┘  │ add_to_cart   │            │
//! │                  removed)        │        │ increment     │            │
//! │                                  └────────┘ decrement     ▼            │
//! │                                                      line removed      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use gomarket_core::{Cart, CartItem, CartTotals, ProductDescriptor};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::CartState;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: cart.totals(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|cart| CartResponse::from(cart))
}

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity increases, and title, image and
///   price are taken from `product`
/// - Product not in cart: added as a new line with quantity 1
pub fn add_to_cart(cart: &CartState, product: &ProductDescriptor) -> CartResponse {
    cart.add_to_cart(product);
    get_cart(cart)
}

/// Adds one unit to an existing line.
pub fn increment(cart: &CartState, id: &str) -> CartResponse {
    cart.increment(id);
    get_cart(cart)
}

/// Removes one unit from a line; the line goes away with its last unit.
pub fn decrement(cart: &CartState, id: &str) -> CartResponse {
    cart.decrement(id);
    get_cart(cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use gomarket_storage::MemoryStorage;

    #[tokio::test]
    async fn test_commands_return_updated_cart() {
        let cart = CartState::load(Arc::new(MemoryStorage::new())).await;
        let shirt = ProductDescriptor::new("p1", "Shirt", "u", 20.0);

        let response = add_to_cart(&cart, &shirt);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.subtotal, 20.0);

        let response = increment(&cart, "p1");
        assert_eq!(response.items[0].quantity, 2);
        assert_eq!(response.totals.total_quantity, 2);
        assert_eq!(response.totals.subtotal, 40.0);

        let response = decrement(&cart, "p1");
        assert_eq!(response.items[0].quantity, 1);

        let response = decrement(&cart, "p1");
        assert!(response.items.is_empty());
        assert_eq!(response.totals.item_count, 0);
    }

    #[tokio::test]
    async fn test_response_serialization() {
        let cart = CartState::load(Arc::new(MemoryStorage::new())).await;
        let response = add_to_cart(&cart, &ProductDescriptor::new("p1", "T", "u", 10.0));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["items"][0]["image_url"], "u");
        assert_eq!(json["totals"]["total_quantity"], 1);
    }
}
