//! # Async Key-Value Storage
//!
//! The storage contract the cart store persists through, plus an in-memory
//! implementation.
//!
//! ## Contract
//! ```text
//! get_item(key)        → Ok(Some(value)) | Ok(None) | Err(StorageError)
//! set_item(key, value) → Ok(())          | Err(StorageError)
//! ```
//!
//! Values are whole strings. `set_item` replaces whatever the key held;
//! there is no append or merge.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::trace;

use crate::error::StorageResult;

/// Async key-value storage backend.
///
/// Implementations must be shareable across tasks: the cart store spawns
/// each write onto the runtime and holds the backend behind an `Arc`.
#[async_trait]
pub trait AsyncStorage: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Volatile storage backed by a `HashMap`.
///
/// Used by tests and as the fallback when no durable backend is configured.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with one entry.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        MemoryStorage {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl AsyncStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        trace!(key = %key, "memory get_item");
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        trace!(key = %key, bytes = value.len(), "memory set_item");
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites_whole_value() {
        let storage = MemoryStorage::with_item("k", "first");
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("first"));

        storage.set_item("k", "second").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("second"));
    }
}
