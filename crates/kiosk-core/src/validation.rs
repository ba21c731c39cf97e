//! # Validation Module
//!
//! Input validation utilities for administratively entered catalog data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin frontend                                               │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (called from the fallible constructors)          │
//! │  ├── Field-level business rules                                        │
//! │  └── Makes invalid records unrepresentable                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order mutation API (order.rs)                                │
//! │  └── Cross-record rules (currency homogeneity)                         │
//! │                                                                         │
//! │  The pricing engine sits BELOW all three layers and assumes its        │
//! │  inputs are valid - it never re-validates.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kiosk_core::validation::{validate_name, validate_percent_bps};
//!
//! validate_name("Mug").unwrap();
//! validate_percent_bps(825).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an entity display name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 255 characters (gateway display-name cap)
///
/// ## Example
/// ```rust
/// use kiosk_core::validation::validate_name;
///
/// assert!(validate_name("Mug").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name(&"A".repeat(300)).is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an entity description.
///
/// ## Rules
/// - May be empty
/// - Must be at most 255 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.trim().len() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates an opaque gateway identifier (tax-rate id, tax code).
///
/// ## Rules
/// - Must not be empty: records without their provisioned gateway
///   counterpart cannot be used at checkout
pub fn validate_gateway_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a monetary amount in minor units.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, free shipping)
///
/// ## Example
/// ```rust
/// use kiosk_core::validation::validate_amount_minor;
///
/// assert!(validate_amount_minor("price", 1099).is_ok());
/// assert!(validate_amount_minor("price", 0).is_ok());
/// assert!(validate_amount_minor("price", -100).is_err());
/// ```
pub fn validate_amount_minor(field: &str, minor: i64) -> ValidationResult<()> {
    if minor < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a percentage in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
///
/// A 100% value is deliberately allowed: a 100% discount prices an order at
/// zero, which is a real promotional scenario.
pub fn validate_percent_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "percent".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Mug").is_ok());
        assert!(validate_name("  Mug  ").is_ok());

        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("").is_ok());
        assert!(validate_description("A mug").is_ok());
        assert!(validate_description(&"A".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_gateway_id() {
        assert!(validate_gateway_id("gateway_rate_id", "txr_123").is_ok());
        assert!(validate_gateway_id("gateway_rate_id", "").is_err());
        assert!(validate_gateway_id("gateway_rate_id", "  ").is_err());
    }

    #[test]
    fn test_validate_amount_minor() {
        assert!(validate_amount_minor("price", 0).is_ok());
        assert!(validate_amount_minor("price", 1099).is_ok());
        assert!(validate_amount_minor("price", -100).is_err());
    }

    #[test]
    fn test_validate_percent_bps() {
        assert!(validate_percent_bps(0).is_ok());
        assert!(validate_percent_bps(825).is_ok());
        assert!(validate_percent_bps(10_000).is_ok());
        assert!(validate_percent_bps(10_001).is_err());
    }
}
