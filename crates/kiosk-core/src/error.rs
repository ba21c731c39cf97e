//! # Error Types
//!
//! Domain-specific error types for kiosk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kiosk-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations (currency, size)     │
//! │  └── ValidationError  - Field-level input validation failures          │
//! │                                                                         │
//! │  kiosk-checkout errors (separate crate)                                │
//! │  └── CheckoutError    - Gateway handoff failures                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → caller            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (currencies, field names)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::Currency;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are raised by the
/// order mutation API *before* any state changes; a rejected mutation leaves
/// the order untouched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An item's currency differs from the currency the order is locked to.
    ///
    /// ## When This Occurs
    /// - Adding a USD item to an order that already holds RUB items
    /// - A batch add where the added items disagree among themselves
    ///
    /// ## User Workflow
    /// ```text
    /// Add item (usd) to order (rub)
    ///      │
    ///      ▼
    /// CurrencyMismatch { expected: rub, found: usd }
    ///      │
    ///      ▼
    /// UI shows: "Order items should have the same currency"
    /// ```
    #[error("order items should have the same currency: order is {expected}, got {found}")]
    CurrencyMismatch {
        expected: Currency,
        found: Currency,
    },

    /// A shipping rate's currency differs from the order's item currency.
    ///
    /// Shipping is charged in the order's currency; a rate denominated in
    /// anything else cannot be attached.
    #[error("shipping rate is {shipping}, but order items are {order}")]
    ShippingCurrencyMismatch {
        order: Currency,
        shipping: Currency,
    },

    /// Order has exceeded maximum allowed items.
    #[error("order cannot have more than {max} items")]
    OrderTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when administratively entered data doesn't meet
/// requirements. Used at the data-entry boundary, before any record is
/// constructed: a `Discount` with 150% off or an `Item` with a negative
/// price is unrepresentable, so the pricing engine never has to re-check.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be zero or positive.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::CurrencyMismatch {
            expected: Currency::Rub,
            found: Currency::Usd,
        };
        assert_eq!(
            err.to_string(),
            "order items should have the same currency: order is rub, got usd"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "percent_off".to_string(),
            min: 0,
            max: 10_000,
        };
        assert_eq!(err.to_string(), "percent_off must be between 0 and 10000");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
