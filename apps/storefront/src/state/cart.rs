//! # Cart State
//!
//! The cart store: owns the current `Cart`, loads it once from storage and
//! writes the whole cart back after every mutation.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every consumer holds a clone of the same `CartState`
//! 2. A mutation must run to completion before anyone reads the result
//! 3. The writes it spawns run on other tasks
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action              CartState               Side Effect             │
//! │  ─────────              ─────────               ───────────             │
//! │                                                                         │
//! │  Mount provider ───────► load() ──────────────► get_item(key) once     │
//! │                                                                         │
//! │  "Add" ────────────────► add_to_cart(d) ─┐                             │
//! │  "+" ──────────────────► increment(id) ──┼───► spawn set_item(key,     │
//! │  "-" ──────────────────► decrement(id) ──┘         <full snapshot>)    │
//! │                                                                         │
//! │  Render ───────────────► products() ────────── (read only)             │
//! │                                                                         │
//! │  NOTE: The in-memory change is visible as soon as the call returns.    │
//! │        The write is fire-and-forget; failures are logged and dropped.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes are not ordered against each other. Each carries the snapshot
//! taken under the lock by its own mutation, so whichever lands last wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gomarket_core::{Cart, CartItem, CartTotals, ProductDescriptor, CART_STORAGE_KEY};
use gomarket_storage::AsyncStorage;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Shared handle to the cart store.
///
/// Cloning is cheap and every clone sees the same cart. Consumers can read
/// snapshots and call the three mutating operations; nothing else can
/// touch the collection.
#[derive(Clone)]
pub struct CartState {
    inner: Arc<CartInner>,
}

struct CartInner {
    cart: Mutex<Cart>,
    storage: Arc<dyn AsyncStorage>,
    runtime: Handle,
    writes: Mutex<Vec<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CartState {
    /// Loads the cart from `storage` and returns the store.
    ///
    /// ## Behavior
    /// - Stored payload present and valid: becomes the initial cart
    /// - Absent, unreadable or malformed: the cart starts empty
    ///
    /// The read happens once and is never retried. Writes are spawned on the
    /// runtime this is awaited on.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub async fn load(storage: Arc<dyn AsyncStorage>) -> Self {
        let cart = match storage.get_item(CART_STORAGE_KEY).await {
            Ok(Some(payload)) => Cart::from_payload(&payload).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding stored cart");
                Cart::new()
            }),
            Ok(None) => {
                debug!("No stored cart");
                Cart::new()
            }
            Err(e) => {
                warn!(error = %e, "Cart read failed, starting empty");
                Cart::new()
            }
        };

        info!(items = cart.len(), "Cart loaded");
        Self::with_cart_and_runtime(storage, cart, Handle::current())
    }

    fn with_cart_and_runtime(storage: Arc<dyn AsyncStorage>, cart: Cart, runtime: Handle) -> Self {
        CartState {
            inner: Arc::new(CartInner {
                cart: Mutex::new(cart),
                storage,
                runtime,
                writes: Mutex::new(Vec::new()),
            }),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| cart.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = lock(&self.inner.cart);
        f(&cart)
    }

    /// Snapshot of the current lines, in cart order.
    pub fn products(&self) -> Vec<CartItem> {
        self.with_cart(|cart| cart.items().to_vec())
    }

    /// Snapshot of one line.
    pub fn get(&self, id: &str) -> Option<CartItem> {
        self.with_cart(|cart| cart.get(id).cloned())
    }

    /// Display summary of the current cart.
    pub fn totals(&self) -> CartTotals {
        self.with_cart(Cart::totals)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.with_cart(Cart::is_empty)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of `product`, appending a new line or bumping the
    /// existing one (whose title, image and price are replaced by the
    /// descriptor's).
    pub fn add_to_cart(&self, product: &ProductDescriptor) {
        debug!(id = %product.id, "add_to_cart");
        self.mutate(|cart| cart.add_to_cart(product));
    }

    /// Adds one unit to the line with `id`.
    ///
    /// An unknown id leaves the cart as is but still writes it back.
    pub fn increment(&self, id: &str) {
        debug!(id = %id, "increment");
        self.mutate(|cart| cart.increment(id));
    }

    /// Removes one unit from the line with `id`, dropping the line at zero.
    ///
    /// An unknown id leaves the cart as is but still writes it back.
    pub fn decrement(&self, id: &str) {
        debug!(id = %id, "decrement");
        self.mutate(|cart| cart.decrement(id));
    }

    /// Applies `f` and spawns the write while still holding the lock, so
    /// writes are spawned in mutation order.
    fn mutate<F>(&self, f: F)
    where
        F: FnOnce(&mut Cart),
    {
        let mut cart = lock(&self.inner.cart);
        f(&mut cart);

        match cart.to_payload() {
            Ok(payload) => self.persist(payload),
            Err(e) => warn!(error = %e, "Cart could not be serialized, write skipped"),
        }
    }

    fn persist(&self, payload: String) {
        let storage = Arc::clone(&self.inner.storage);
        let write = self.inner.runtime.spawn(async move {
            if let Err(e) = storage.set_item(CART_STORAGE_KEY, &payload).await {
                warn!(error = %e, "Cart write dropped");
            }
        });

        let mut writes = lock(&self.inner.writes);
        writes.retain(|handle| !handle.is_finished());
        writes.push(write);
    }

    // =========================================================================
    // Write Settlement
    // =========================================================================

    /// Number of spawned writes that have not finished yet.
    pub fn pending_writes(&self) -> usize {
        let mut writes = lock(&self.inner.writes);
        writes.retain(|handle| !handle.is_finished());
        writes.len()
    }

    /// Waits for every write spawned so far. Write failures stay swallowed.
    pub async fn settle(&self) {
        let writes = std::mem::take(&mut *lock(&self.inner.writes));
        for write in writes {
            if let Err(e) = write.await {
                warn!(error = %e, "Cart write task failed");
            }
        }
    }
}

impl std::fmt::Debug for CartState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartState")
            .field("cart", &*lock(&self.inner.cart))
            .finish_non_exhaustive()
    }
}
