//! # Cart Provider
//!
//! Shared-context access to the cart store.
//!
//! ## Provider / Consumer
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  let provider = CartProvider::mount(storage).await;   ◄── loads cart   │
//! │                                                                         │
//! │  provider.scope(async {                                                 │
//! │      ┌──────────────────────────────────────────────────────────────┐  │
//! │      │  let cart = use_cart();          ◄── OK: inside the scope    │  │
//! │      │  cart.add_to_cart(&product);                                  │  │
//! │      └──────────────────────────────────────────────────────────────┘  │
//! │  }).await;                                                              │
//! │                                                                         │
//! │  use_cart();                             ◄── PANIC: no provider        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The scope is task-local: a task spawned from inside a scope is outside
//! the provider unless it is wrapped in `scope` again. Code that already
//! holds the provider should prefer passing `provider.state()` explicitly.

use std::future::Future;
use std::sync::Arc;

use gomarket_storage::AsyncStorage;
use tracing::info;

use crate::state::CartState;

/// Panic message for `use_cart` outside a provider.
pub const MISSING_PROVIDER: &str = "use_cart must be used within a CartProvider";

tokio::task_local! {
    static CART_CONTEXT: CartState;
}

/// Owns the cart store for everything run inside its scopes.
#[derive(Debug, Clone)]
pub struct CartProvider {
    state: CartState,
}

impl CartProvider {
    /// Mounts the provider: loads the cart from `storage` once. Access is
    /// handed out only after the load finished.
    pub async fn mount(storage: Arc<dyn AsyncStorage>) -> Self {
        let state = CartState::load(storage).await;
        info!("CartProvider mounted");
        CartProvider { state }
    }

    /// The store, for explicit passing.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Runs `future` with this provider in scope.
    pub async fn scope<F>(&self, future: F) -> F::Output
    where
        F: Future,
    {
        CART_CONTEXT.scope(self.state.clone(), future).await
    }

    /// Runs `f` with this provider in scope.
    pub fn sync_scope<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        CART_CONTEXT.sync_scope(self.state.clone(), f)
    }
}

/// Returns the cart store of the enclosing provider.
///
/// # Panics
/// Always panics when no `CartProvider` scope encloses the caller. This is
/// a wiring bug, so there is no fallback value.
pub fn use_cart() -> CartState {
    match CART_CONTEXT.try_with(CartState::clone) {
        Ok(state) => state,
        Err(_) => panic!("{}", MISSING_PROVIDER),
    }
}
