//! # gomarket-storage: Key-Value Persistence for GoMarketplace
//!
//! This crate provides the async key-value storage the cart store persists
//! into. One trait, two implementations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     GoMarketplace Persistence                           │
//! │                                                                         │
//! │  CartState (after every mutation)                                      │
//! │       │  set_item("@GoMarketplace:products", <full snapshot>)          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 gomarket-storage (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ AsyncStorage  │    │ MemoryStorage │    │ SqliteStorage│  │   │
//! │  │   │   (kv.rs)     │◄───│ (HashMap)     │    │ (pool.rs)    │  │   │
//! │  │   │ get_item      │◄───┼───────────────┼────│ kv_store     │  │   │
//! │  │   │ set_item      │    │ tests         │    │ table        │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite file in the platform data dir (gomarket.db)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The `AsyncStorage` contract and `MemoryStorage`
//! - [`pool`] - SQLite pool creation and `SqliteStorage`
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gomarket_storage::{AsyncStorage, SqliteStorage, StorageConfig};
//!
//! let storage = SqliteStorage::new(StorageConfig::new("gomarket.db")).await?;
//! storage.set_item("greeting", "hello").await?;
//! assert_eq!(storage.get_item("greeting").await?.as_deref(), Some("hello"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use kv::{AsyncStorage, MemoryStorage};
pub use pool::{SqliteStorage, StorageConfig};
