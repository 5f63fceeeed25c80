//! # Error Types
//!
//! Domain-specific error types for gomarket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gomarket-core errors (this file)                                      │
//! │  ├── CoreError        - Payload decoding failures                      │
//! │  └── ValidationError  - Snapshot rule violations                       │
//! │                                                                         │
//! │  gomarket-storage errors (separate crate)                              │
//! │  └── StorageError     - Key-value read/write failures                  │
//! │                                                                         │
//! │  storefront app errors                                                 │
//! │  └── AppError         - Startup, config and shell errors               │
//! │                                                                         │
//! │  Cart transitions themselves never fail.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while turning a stored payload back into a cart.
///
/// The cart store treats every variant the same way: the payload is
/// discarded and the cart starts empty.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The payload is not a JSON array of cart items.
    #[error("Malformed cart payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The payload parsed but breaks a cart invariant.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Cart snapshot rule violations.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., two lines sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
