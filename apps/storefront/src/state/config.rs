//! # App Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GOMARKET_STORAGE_BACKEND=memory                                    │
//! │     GOMARKET_STORAGE_PATH=/tmp/cart.db                                 │
//! │     GOMARKET_STORAGE_MAX_CONNECTIONS=2                                 │
//! │     GOMARKET_LOG=debug                                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cart/gomarket.toml (Linux)                               │
//! │     ~/Library/Application Support/com.gomarketplace.cart/… (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     SQLite in the platform data dir, filter "info,gomarket=debug"      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! backend = "sqlite"          # sqlite | memory
//! path = "/data/gomarket.db"  # optional, defaults to the data dir
//! max_connections = 4
//!
//! [logging]
//! filter = "info,gomarket=debug,sqlx=warn"
//! ```
//!
//! ## Thread Safety
//! Read-only after startup, so no lock.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Default tracing filter when neither `RUST_LOG` nor config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,gomarket=debug,sqlx=warn";

const CONFIG_FILE_NAME: &str = "gomarket.toml";
const DATABASE_FILE_NAME: &str = "gomarket.db";

// =============================================================================
// Storage Backend
// =============================================================================

/// Which `AsyncStorage` implementation backs the cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite file on disk.
    #[default]
    Sqlite,

    /// Process memory; the cart is gone on exit.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(AppError::config(format!(
                "Unknown storage backend '{}', expected sqlite or memory",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[storage]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Backend to open.
    #[serde(default)]
    pub backend: StorageBackend,

    /// SQLite file path. `None` uses the platform data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// SQLite pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    4
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            backend: StorageBackend::default(),
            path: None,
            max_connections: default_max_connections(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive string.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Storefront configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`gomarket.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing sections take their defaults.
    pub fn from_toml(contents: &str) -> AppResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Renders the config as TOML.
    pub fn to_toml(&self) -> AppResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.storage.max_connections == 0 {
            return Err(AppError::config(
                "storage.max_connections must be greater than 0",
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(AppError::config("logging.filter must not be empty"));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(backend) = std::env::var("GOMARKET_STORAGE_BACKEND") {
            match backend.parse::<StorageBackend>() {
                Ok(parsed) => {
                    debug!(backend = %backend, "Overriding storage backend from environment");
                    self.storage.backend = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring GOMARKET_STORAGE_BACKEND"),
            }
        }

        if let Ok(path) = std::env::var("GOMARKET_STORAGE_PATH") {
            debug!(path = %path, "Overriding storage path from environment");
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Ok(max) = std::env::var("GOMARKET_STORAGE_MAX_CONNECTIONS") {
            if let Ok(n) = max.parse::<u32>() {
                self.storage.max_connections = n;
            }
        }

        if let Ok(filter) = std::env::var("GOMARKET_LOG") {
            self.logging.filter = filter;
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "gomarketplace", "cart")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Resolves the SQLite file path, creating the data dir when the
    /// default location is used.
    pub fn storage_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.storage.path {
            return Ok(path.clone());
        }

        let dirs = Self::project_dirs()
            .ok_or_else(|| AppError::config("Could not determine app data directory"))?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("sqlite".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
        assert_eq!("MEMORY".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("redis".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.max_connections, 4);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.max_connections, 4);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[storage]\nbackend = 3").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.storage.max_connections = 0;
        assert!(config.validate().is_err());

        config.storage.max_connections = 1;
        config.logging.filter = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_falls_back_on_invalid_file() {
        let path = std::env::temp_dir().join(format!(
            "gomarket-config-invalid-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[storage]\nmax_connections = \"many\"\n").unwrap();

        let err = AppConfig::load(Some(path.clone())).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);

        let config = AppConfig::load_or_default(Some(path.clone()));
        assert_eq!(config.storage.max_connections, 4);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_or_default_with_missing_file() {
        let path = std::env::temp_dir().join("gomarket-config-does-not-exist.toml");
        let config = AppConfig::load_or_default(Some(path));
        assert_eq!(config.storage.max_connections, 4);
    }

    #[test]
    fn test_explicit_storage_path_wins() {
        let mut config = AppConfig::default();
        config.storage.path = Some(PathBuf::from("/tmp/cart.db"));
        assert_eq!(config.storage_path().unwrap(), PathBuf::from("/tmp/cart.db"));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = AppConfig::default().to_toml().unwrap();
        assert!(toml_str.contains("[storage]"));
        assert!(toml_str.contains("[logging]"));

        let parsed = AppConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed.storage.backend, StorageBackend::Sqlite);
    }
}
