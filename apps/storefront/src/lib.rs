//! # GoMarketplace Storefront Library
//!
//! Host side of the storefront: owns the cart store, exposes it to screens
//! through `CartProvider`/`use_cart`, and persists it under a fixed storage key.
//!
//! ## Module Organization
//! ```text
//! gomarket_storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── provider.rs     ◄─── CartProvider, use_cart()
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartState: in-memory cart + write-through
//! │   ├── config.rs   ◄─── AppConfig (defaults, TOML, env)
//! │   └── storage.rs  ◄─── Storage backend selection
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart commands returning CartResponse
//! │   └── shell.rs    ◄─── Line-oriented shell over the cart commands
//! └── error.rs        ◄─── AppError for startup and shell input
//! ```

pub mod commands;
pub mod error;
pub mod provider;
pub mod state;

use std::path::PathBuf;

use tokio::io::{stdin, stdout, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::config::DEFAULT_LOG_FILTER;

pub use error::{AppError, AppResult, ErrorCode};
pub use provider::{use_cart, CartProvider};
pub use state::{open_storage, AppConfig, CartState, StorageBackend};

/// Runs the storefront shell on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults, then gomarket.toml, then GOMARKET_* variables           │
/// │     • an unreadable or invalid config falls back to defaults            │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG wins, otherwise the configured filter                    │
/// │     • Written to stderr so stdout stays the shell's                     │
/// │                                                                         │
/// │  3. Open Storage ─────────────────────────────────────────────────────► │
/// │     • SQLite file in the app data directory, or memory                  │
/// │                                                                         │
/// │  4. Mount CartProvider ───────────────────────────────────────────────► │
/// │     • Restores the saved cart before any command runs                   │
/// │                                                                         │
/// │  5. Run Shell, then wait for outstanding writes                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> AppResult<()> {
    let config = load_config(None);
    init_tracing(&config.logging.filter);

    info!(backend = %config.storage.backend, "Starting GoMarketplace storefront");

    let storage = open_storage(&config).await?;
    let provider = CartProvider::mount(storage).await;
    info!(items = provider.state().totals().item_count, "Cart restored");

    let result = provider
        .scope(commands::shell::run_shell(BufReader::new(stdin()), stdout()))
        .await;

    // Writes are never cancelled; let them land before the runtime goes away.
    provider.state().settle().await;
    info!("Storefront stopped");

    result
}

/// Loads the config under a scoped subscriber with the default filter, so
/// what loading logs is not lost before `init_tracing` runs.
fn load_config(config_path: Option<PathBuf>) -> AppConfig {
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_LOG_FILTER))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::with_default(bootstrap, || AppConfig::load_or_default(config_path))
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=gomarket=trace` - Show trace for gomarket crates only
/// - Default: `logging.filter` from the config
fn init_tracing(default_filter: &str) {
    let filter = env_filter(default_filter);

    // A second init (tests, embedding hosts) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "gomarket-{}-{}.toml",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_config_reads_file() {
        let path = temp_config("lib-valid", "[storage]\nbackend = \"memory\"\n");

        let config = load_config(Some(path.clone()));
        assert_eq!(config.storage.backend, StorageBackend::Memory);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_config_falls_back_to_defaults() {
        let path = temp_config("lib-invalid", "[storage\nbackend = ");

        let config = load_config(Some(path.clone()));
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);

        let _ = std::fs::remove_file(path);
    }
}
