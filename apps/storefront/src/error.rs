//! # App Error Type
//!
//! Unified error type for startup, configuration and shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Startup                                                                │
//! │  ├── config file unreadable ──── AppError(CONFIG_ERROR)                │
//! │  └── storage won't open ──────── AppError(STORAGE_ERROR) → exit 1      │
//! │                                                                         │
//! │  Cart operations                                                        │
//! │  └── never fail; storage faults are logged and swallowed by CartState  │
//! │                                                                         │
//! │  Shell                                                                  │
//! │  └── bad command line ────────── AppError(VALIDATION_ERROR) → printed  │
//! │                                                                         │
//! │  Provider misuse (use_cart outside a CartProvider) is a panic, not an  │
//! │  AppError.                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use gomarket_core::CoreError;
use gomarket_storage::StorageError;
use serde::Serialize;

/// Error surfaced by the storefront app.
///
/// ## Serialization
/// Mobile shells receive:
/// ```json
/// {
///   "code": "STORAGE_ERROR",
///   "message": "Storage could not be opened"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for app failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Storage could not be opened or queried
    StorageError,

    /// Configuration could not be loaded or is invalid
    ConfigError,

    /// Internal error
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to app errors.
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                tracing::error!("Storage connection failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Storage could not be opened")
            }
            StorageError::MigrationFailed(e) => {
                tracing::error!("Storage migration failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Storage migration failed")
            }
            StorageError::PoolExhausted => {
                AppError::new(ErrorCode::StorageError, "Storage pool exhausted")
            }
            StorageError::QueryFailed(e) | StorageError::Internal(e) => {
                tracing::error!("Storage operation failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => AppError::validation(e.to_string()),
            CoreError::MalformedPayload(e) => AppError::internal(e.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(format!("I/O error: {}", err))
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::config(format!("Invalid config file: {}", err))
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::config(format!("Config could not be serialized: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for app operations.
pub type AppResult<T> = Result<T, AppError>;
