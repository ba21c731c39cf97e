//! # Mock Gateway
//!
//! A recording, in-memory [`PaymentGateway`] for tests: every call is stored
//! for later assertions and answered with deterministic canned ids. No
//! network, no provider account, no flakiness.
//!
//! ## Usage
//! ```rust
//! use std::sync::Arc;
//! use kiosk_checkout::{CheckoutService, MockGateway};
//! use kiosk_core::types::Currency;
//!
//! let gateway = Arc::new(MockGateway::new());
//! let service = CheckoutService::new(gateway.clone(), Currency::Rub);
//! // ... drive the service, then assert on gateway.sessions() etc.
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{CheckoutError, CheckoutResult};
use crate::gateway::{CheckoutSession, PaymentGateway, PaymentIntentHandle};
use crate::params::{CheckoutSessionParams, CouponParams, PaymentIntentParams, TaxRateParams};

/// Everything the mock has been asked to do.
#[derive(Debug, Default)]
struct MockState {
    sessions: Vec<CheckoutSessionParams>,
    intents: Vec<PaymentIntentParams>,
    coupons: HashMap<String, CouponParams>,
    tax_rates: HashMap<String, TaxRateParams>,
    counter: u64,
}

/// Recording in-memory gateway.
///
/// `Mutex` rather than async locking: every operation is a short in-memory
/// update with no await point while the lock is held.
#[derive(Debug, Default)]
pub struct MockGateway {
    state: Mutex<MockState>,
    fail: bool,
}

impl MockGateway {
    /// A mock that answers every call successfully.
    pub fn new() -> Self {
        MockGateway::default()
    }

    /// A mock that refuses every call, for error-path tests.
    pub fn failing() -> Self {
        MockGateway {
            state: Mutex::new(MockState::default()),
            fail: true,
        }
    }

    /// Recorded checkout-session requests, oldest first.
    pub fn sessions(&self) -> Vec<CheckoutSessionParams> {
        self.lock().sessions.clone()
    }

    /// Recorded payment-intent requests, oldest first.
    pub fn intents(&self) -> Vec<PaymentIntentParams> {
        self.lock().intents.clone()
    }

    /// Currently provisioned coupons, keyed by coupon id.
    pub fn coupons(&self) -> HashMap<String, CouponParams> {
        self.lock().coupons.clone()
    }

    /// Currently provisioned tax rates, keyed by gateway rate id.
    pub fn tax_rates(&self) -> HashMap<String, TaxRateParams> {
        self.lock().tax_rates.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock gateway state poisoned")
    }

    fn check_failing(&self) -> CheckoutResult<()> {
        if self.fail {
            Err(CheckoutError::gateway("mock gateway configured to fail"))
        } else {
            Ok(())
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut state = self.lock();
        state.counter += 1;
        format!("{}_mock_{}", prefix, state.counter)
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_checkout_session(
        &self,
        params: CheckoutSessionParams,
    ) -> CheckoutResult<CheckoutSession> {
        self.check_failing()?;
        let id = self.next_id("cs");
        self.lock().sessions.push(params);
        Ok(CheckoutSession {
            url: format!("https://gateway.test/pay/{id}"),
            id,
        })
    }

    async fn create_payment_intent(
        &self,
        params: PaymentIntentParams,
    ) -> CheckoutResult<PaymentIntentHandle> {
        self.check_failing()?;
        let id = self.next_id("pi");
        let handle = PaymentIntentHandle {
            client_secret: format!("{id}_secret"),
            amount: params.amount,
            currency: params.currency,
            id,
        };
        self.lock().intents.push(params);
        Ok(handle)
    }

    async fn create_coupon(&self, params: CouponParams) -> CheckoutResult<()> {
        self.check_failing()?;
        self.lock().coupons.insert(params.id.clone(), params);
        Ok(())
    }

    async fn delete_coupon(&self, coupon_id: &str) -> CheckoutResult<()> {
        self.check_failing()?;
        match self.lock().coupons.remove(coupon_id) {
            Some(_) => Ok(()),
            None => Err(CheckoutError::gateway(format!(
                "no such coupon: {coupon_id}"
            ))),
        }
    }

    async fn create_tax_rate(&self, params: TaxRateParams) -> CheckoutResult<String> {
        self.check_failing()?;
        let id = self.next_id("txr");
        self.lock().tax_rates.insert(id.clone(), params);
        Ok(id)
    }

    async fn update_tax_rate(
        &self,
        rate_id: &str,
        display_name: &str,
        description: &str,
    ) -> CheckoutResult<()> {
        self.check_failing()?;
        let mut state = self.lock();
        match state.tax_rates.get_mut(rate_id) {
            Some(rate) => {
                rate.display_name = display_name.to_string();
                rate.description = description.to_string();
                Ok(())
            }
            None => Err(CheckoutError::gateway(format!(
                "no such tax rate: {rate_id}"
            ))),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::types::{Currency, Item};
    use crate::params::session_params_for_item;

    fn any_session_params() -> CheckoutSessionParams {
        let item = Item::new("Mug", "", 1000, Currency::Rub).unwrap();
        session_params_for_item(&item, "https://shop.test/ok", "https://shop.test/no")
    }

    #[tokio::test]
    async fn test_mock_records_sessions_with_fresh_ids() {
        let gateway = MockGateway::new();
        let first = gateway
            .create_checkout_session(any_session_params())
            .await
            .unwrap();
        let second = gateway
            .create_checkout_session(any_session_params())
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(gateway.sessions().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_coupon_lifecycle() {
        let gateway = MockGateway::new();
        let params = CouponParams {
            id: "coupon_42".to_string(),
            name: "Promo".to_string(),
            duration: "forever".to_string(),
            percent_off: 10.0,
        };

        gateway.create_coupon(params).await.unwrap();
        assert!(gateway.coupons().contains_key("coupon_42"));

        gateway.delete_coupon("coupon_42").await.unwrap();
        assert!(gateway.coupons().is_empty());

        // Deleting again reports the gateway-side error
        assert!(gateway.delete_coupon("coupon_42").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_tax_rate_update() {
        let gateway = MockGateway::new();
        let rate_id = gateway
            .create_tax_rate(TaxRateParams {
                display_name: "VAT".to_string(),
                description: String::new(),
                percentage: 20.0,
                inclusive: true,
            })
            .await
            .unwrap();

        gateway
            .update_tax_rate(&rate_id, "VAT (updated)", "twenty percent")
            .await
            .unwrap();
        assert_eq!(gateway.tax_rates()[&rate_id].display_name, "VAT (updated)");

        assert!(gateway
            .update_tax_rate("txr_unknown", "x", "y")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_failing_mock_refuses_everything() {
        let gateway = MockGateway::failing();
        assert!(gateway
            .create_checkout_session(any_session_params())
            .await
            .is_err());
        assert!(gateway.delete_coupon("coupon_1").await.is_err());
    }
}
