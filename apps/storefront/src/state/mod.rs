//! # State Module
//!
//! Application state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppConfig ──► open_storage() ──► Arc<dyn AsyncStorage>                │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                                   CartProvider::mount                   │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                              ┌──────────────────────┐                  │
//! │                              │      CartState        │                  │
//! │                              │  Arc<Mutex<Cart>>     │                  │
//! │                              │  + spawned writes     │                  │
//! │                              └──────────────────────┘                  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • AppConfig: Read-only after startup                                  │
//! │  • Storage: Send + Sync, shared by the writes CartState spawns         │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
pub mod config;
mod storage;

pub use cart::CartState;
pub use config::{AppConfig, StorageBackend};
pub use storage::open_storage;
