//! # Storage State
//!
//! Opens the `AsyncStorage` backend named by the config.
//!
//! The cart store only ever sees `Arc<dyn AsyncStorage>`; which backend sits
//! behind it is decided here, once, at startup.

use std::sync::Arc;

use gomarket_storage::{AsyncStorage, MemoryStorage, SqliteStorage, StorageConfig};
use tracing::{info, warn};

use crate::error::AppResult;
use crate::state::config::{AppConfig, StorageBackend};

/// Opens the configured storage backend.
///
/// ## Returns
/// * `Ok(storage)` - Ready for `CartProvider::mount`
/// * `Err(AppError)` - The SQLite file could not be opened or migrated
pub async fn open_storage(config: &AppConfig) -> AppResult<Arc<dyn AsyncStorage>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; the cart will not survive restarts");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::Sqlite => {
            let path = config.storage_path()?;
            info!(?path, "Storage path determined");

            let storage_config =
                StorageConfig::new(path).max_connections(config.storage.max_connections);
            let storage = SqliteStorage::new(storage_config).await?;

            Ok(Arc::new(storage))
        }
    }
}
