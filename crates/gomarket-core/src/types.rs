//! # Domain Types
//!
//! Cart types shared between the store, the storage payload and the
//! mobile frontend (via `ts-rs` bindings).
//!
//! ## Payload Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  @GoMarketplace:products                                                │
//! │                                                                         │
//! │  [                                                                      │
//! │    { "id": "p1", "title": "Shirt", "image_url": "https://…",           │
//! │      "price": 19.9, "quantity": 2 },                                    │
//! │    ...                                                                  │
//! │  ]                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names are snake_case on the wire; they must stay that way to read
//! carts written by earlier app versions.
//!
//! A non-finite price is written as `null` by `serde_json`. Such a line
//! reads back with a NaN price rather than failing the whole payload.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

// =============================================================================
// Product Descriptor
// =============================================================================

/// What the UI hands to `add_to_cart`: a cart line without a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDescriptor {
    /// Opaque product identifier.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Product image shown in the cart list.
    pub image_url: String,

    /// Unit price.
    pub price: f64,
}

impl ProductDescriptor {
    /// Creates a descriptor from its parts.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        ProductDescriptor {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// One product line in the cart.
///
/// ## Invariant
/// `quantity >= 1` while the item is in a cart. Lines that would drop to
/// zero are removed instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Opaque product identifier, unique within a cart.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Product image shown in the cart list.
    pub image_url: String,

    /// Unit price. `null` in a stored payload reads as NaN.
    #[serde(deserialize_with = "nullable_price")]
    #[ts(type = "number | null")]
    pub price: f64,

    /// Units of this product in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Builds a line from a descriptor. Every non-quantity field comes from
    /// `descriptor`.
    pub fn from_descriptor(descriptor: &ProductDescriptor, quantity: u32) -> Self {
        CartItem {
            id: descriptor.id.clone(),
            title: descriptor.title.clone(),
            image_url: descriptor.image_url.clone(),
            price: descriptor.price,
            quantity,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

fn nullable_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Display summary for the cart screen's footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    /// Distinct lines.
    pub item_count: usize,

    /// Sum of quantities.
    pub total_quantity: u64,

    /// Sum of line totals. No taxes or discounts.
    pub subtotal: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_descriptor_copies_fields() {
        let descriptor = ProductDescriptor::new("p1", "Shirt", "u", 19.5);
        let item = CartItem::from_descriptor(&descriptor, 3);

        assert_eq!(item.id, "p1");
        assert_eq!(item.title, "Shirt");
        assert_eq!(item.image_url, "u");
        assert_eq!(item.price, 19.5);
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::from_descriptor(&ProductDescriptor::new("p1", "T", "u", 2.5), 4);
        assert_eq!(item.line_total(), 10.0);
    }

    #[test]
    fn test_wire_field_names() {
        let item = CartItem::from_descriptor(&ProductDescriptor::new("p1", "T", "u", 10.0), 2);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["id"], "p1");
        assert_eq!(json["title"], "T");
        assert_eq!(json["image_url"], "u");
        assert_eq!(json["price"], 10.0);
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn test_integer_price_parses() {
        let item: CartItem = serde_json::from_str(
            r#"{"id":"p1","title":"T","image_url":"u","price":10,"quantity":2}"#,
        )
        .unwrap();
        assert_eq!(item.price, 10.0);
    }

    #[test]
    fn test_null_price_reads_as_nan() {
        let item: CartItem = serde_json::from_str(
            r#"{"id":"p1","title":"T","image_url":"u","price":null,"quantity":2}"#,
        )
        .unwrap();
        assert!(item.price.is_nan());
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_non_finite_price_survives_serialization() {
        let item = CartItem::from_descriptor(&ProductDescriptor::new("p1", "T", "u", f64::INFINITY), 1);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""price":null"#));

        let restored: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, "p1");
        assert!(restored.price.is_nan());
    }
}
