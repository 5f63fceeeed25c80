//! # Validation Module
//!
//! Checks applied to a cart snapshot read back from storage.
//!
//! Cart operations keep these invariants by construction, so validation
//! only runs on data that crossed the storage boundary:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storage.get_item(key)                                                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  serde_json::from_str ──── bad JSON ─────────► CoreError::Malformed     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  validate_snapshot ─────── quantity 0 ───────► MustBePositive           │
//! │        │             └──── repeated id ──────► Duplicate                │
//! │        ▼                                                                │
//! │  Cart                                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Descriptors passed to `add_to_cart` are not validated, so field values
//! (an empty id, an empty title) are whatever the caller sent. A snapshot
//! the store wrote itself must always read back, so only the two
//! invariants `Cart` keeps by construction are checked here.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::CartItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a line quantity.
///
/// ## Example
/// ```rust
/// use gomarket_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a full snapshot: positive quantities, no id repeated.
pub fn validate_snapshot(items: &[CartItem]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        validate_quantity(item.quantity)?;

        if !seen.insert(item.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: item.id.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductDescriptor;

    fn item(id: &str, quantity: u32) -> CartItem {
        CartItem::from_descriptor(&ProductDescriptor::new(id, "T", "u", 1.0), quantity)
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
    }

    #[test]
    fn test_validate_snapshot_accepts_valid() {
        assert!(validate_snapshot(&[]).is_ok());
        assert!(validate_snapshot(&[item("a", 1), item("b", 7)]).is_ok());
    }

    #[test]
    fn test_validate_snapshot_rejects_duplicate_ids() {
        let err = validate_snapshot(&[item("a", 1), item("a", 2)]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Duplicate {
                field: "id".to_string(),
                value: "a".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_snapshot_rejects_zero_quantity() {
        assert!(matches!(
            validate_snapshot(&[item("a", 0)]),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_validate_snapshot_accepts_empty_id() {
        assert!(validate_snapshot(&[item("", 1), item("a", 1)]).is_ok());
        assert!(validate_snapshot(&[item("", 1), item("", 1)]).is_err());
    }
}
