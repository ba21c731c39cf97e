//! # Checkout Error Types
//!
//! Errors raised at the gateway handoff boundary. Core business errors pass
//! through transparently; everything the gateway itself refuses surfaces as
//! [`CheckoutError::Gateway`].

use thiserror::Error;

use kiosk_core::CoreError;

/// Errors from the checkout handoff layer.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The gateway rejected or failed a call.
    ///
    /// Network failures, unknown coupon/tax-rate ids, declined sessions -
    /// anything on the far side of the [`crate::PaymentGateway`] trait lands
    /// here, with the gateway's own message preserved.
    #[error("gateway error: {message}")]
    Gateway { message: String },

    /// A business rule failed before the gateway was ever called.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CheckoutError {
    /// Convenience constructor for gateway-side failures.
    pub fn gateway(message: impl Into<String>) -> Self {
        CheckoutError::Gateway {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::types::Currency;

    #[test]
    fn test_gateway_error_message() {
        let err = CheckoutError::gateway("no such coupon: coupon_42");
        assert_eq!(err.to_string(), "gateway error: no such coupon: coupon_42");
    }

    #[test]
    fn test_core_error_passes_through() {
        let core = CoreError::CurrencyMismatch {
            expected: Currency::Rub,
            found: Currency::Usd,
        };
        let err: CheckoutError = core.into();
        // Transparent: the core message is the checkout message
        assert!(err.to_string().contains("same currency"));
    }
}
