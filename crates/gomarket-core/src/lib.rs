//! # gomarket-core: Pure Cart Logic for GoMarketplace
//!
//! This crate holds the cart as plain data plus the pure transitions the
//! storefront applies to it. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      GoMarketplace Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile UI (screens)                          │   │
//! │  │     Dashboard ──► addToCart        Cart ──► increment/decrement │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ use_cart()                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           CartState (apps/storefront, owns the lock)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gomarket-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │   types   │  │   cart    │  │ validation│                 │   │
//! │  │   │ CartItem  │  │   Cart    │  │  snapshot │                 │   │
//! │  │   │ Descriptor│  │  payload  │  │  checks   │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              gomarket-storage (key-value persistence)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `CartItem`, `ProductDescriptor`, `CartTotals`
//! - [`cart`] - The `Cart` collection and its transitions
//! - [`validation`] - Snapshot checks applied to stored payloads
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use gomarket_core::{Cart, ProductDescriptor};
//!
//! let mut cart = Cart::new();
//! let shirt = ProductDescriptor::new("p1", "Shirt", "https://cdn/p1.png", 19.9);
//!
//! cart.add_to_cart(&shirt);
//! cart.add_to_cart(&shirt);
//! assert_eq!(cart.items()[0].quantity, 2);
//!
//! cart.decrement("p1");
//! cart.decrement("p1");
//! assert!(cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::{CartItem, CartTotals, ProductDescriptor};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key under which the serialized cart lives.
///
/// Shared with the mobile app's async storage, so the namespace must not
/// change between releases or existing carts are orphaned.
pub const CART_STORAGE_KEY: &str = "@GoMarketplace:products";
