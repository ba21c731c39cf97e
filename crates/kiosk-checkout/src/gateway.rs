//! # Payment Gateway Boundary
//!
//! The [`PaymentGateway`] trait is the seam between the storefront and the
//! payment provider: everything on this side is typed payload construction,
//! everything on the far side is someone else's HTTP client.
//!
//! ## Why a Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Gateway Boundary                                    │
//! │                                                                         │
//! │   CheckoutService ──► dyn PaymentGateway ──┬──► production client       │
//! │   (orchestration)     (this trait)         │    (SDK/HTTP, external)    │
//! │                                            └──► MockGateway (tests)     │
//! │                                                                         │
//! │   The whole handoff is testable without a network.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use kiosk_core::types::{Currency, Discount, Item, Tax};
use kiosk_core::Order;

use crate::error::CheckoutResult;
use crate::params::{
    self, CheckoutSessionParams, CouponParams, PaymentIntentParams, TaxRateParams,
};

// =============================================================================
// Gateway Responses
// =============================================================================

/// A created hosted-checkout session: the customer is redirected to `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Gateway session id (correlate webhooks against this).
    pub id: String,

    /// Hosted payment page the customer is sent to.
    pub url: String,
}

/// A created payment intent for the card-element flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntentHandle {
    /// Gateway intent id.
    pub id: String,

    /// Client secret the frontend confirms the payment with.
    pub client_secret: String,

    /// Echo of the charged amount in minor units.
    pub amount: i64,

    /// Echo of the charge currency.
    pub currency: Currency,
}

// =============================================================================
// Payment Gateway Trait
// =============================================================================

/// The calls the storefront makes against the payment provider.
///
/// A concrete implementation (outside this workspace) maps each method onto
/// the provider's SDK or REST API; [`crate::MockGateway`] records them for
/// tests.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a hosted checkout session.
    async fn create_checkout_session(
        &self,
        params: CheckoutSessionParams,
    ) -> CheckoutResult<CheckoutSession>;

    /// Creates a payment intent.
    async fn create_payment_intent(
        &self,
        params: PaymentIntentParams,
    ) -> CheckoutResult<PaymentIntentHandle>;

    /// Provisions a coupon under the given id.
    async fn create_coupon(&self, params: CouponParams) -> CheckoutResult<()>;

    /// Deletes a provisioned coupon. Deleting an unknown coupon is an error
    /// (callers that don't care should ignore it explicitly).
    async fn delete_coupon(&self, coupon_id: &str) -> CheckoutResult<()>;

    /// Provisions a tax rate, returning the gateway's id for it. The caller
    /// stores that id on the local [`Tax`] record.
    async fn create_tax_rate(&self, params: TaxRateParams) -> CheckoutResult<String>;

    /// Updates the display fields of a provisioned tax rate. Percentage and
    /// behavior are immutable gateway-side; changing those means
    /// provisioning a new rate.
    async fn update_tax_rate(
        &self,
        rate_id: &str,
        display_name: &str,
        description: &str,
    ) -> CheckoutResult<()>;

    /// Gateway name, for logs.
    fn name(&self) -> &str;
}

// =============================================================================
// Checkout Service
// =============================================================================

/// Orchestrates the handoff: builds payloads from domain records and pushes
/// them through the gateway.
///
/// This is the piece upstream code (HTTP handlers, admin hooks) talks to;
/// it owns nothing but a gateway handle and the store's default currency.
pub struct CheckoutService {
    gateway: Arc<dyn PaymentGateway>,
    default_currency: Currency,
}

impl CheckoutService {
    /// Creates a service over a gateway implementation.
    pub fn new(gateway: Arc<dyn PaymentGateway>, default_currency: Currency) -> Self {
        CheckoutService {
            gateway,
            default_currency,
        }
    }

    /// Starts a hosted checkout for a single item ("buy now").
    pub async fn checkout_item(
        &self,
        item: &Item,
        success_url: &str,
        cancel_url: &str,
    ) -> CheckoutResult<CheckoutSession> {
        let params = params::session_params_for_item(item, success_url, cancel_url);
        debug!(gateway = self.gateway.name(), item = %item.id, "creating item checkout session");

        let session = self.gateway.create_checkout_session(params).await?;
        info!(session = %session.id, item = %item.id, "checkout session created");
        Ok(session)
    }

    /// Starts a hosted checkout for a whole order.
    pub async fn checkout_order(
        &self,
        order: &Order,
        success_url: &str,
        cancel_url: &str,
    ) -> CheckoutResult<CheckoutSession> {
        let params = params::session_params_for_order(order, success_url, cancel_url);
        debug!(
            gateway = self.gateway.name(),
            order = %order.id(),
            lines = params.line_items.len(),
            "creating order checkout session"
        );

        let session = self.gateway.create_checkout_session(params).await?;
        info!(session = %session.id, order = %order.id(), "checkout session created");
        Ok(session)
    }

    /// Creates a payment intent charging the order's engine-computed final
    /// price in the order's currency.
    pub async fn intent_for_order(&self, order: &Order) -> CheckoutResult<PaymentIntentHandle> {
        let params = params::intent_params_for_order(order, self.default_currency);
        debug!(
            gateway = self.gateway.name(),
            order = %order.id(),
            amount = params.amount,
            currency = %params.currency,
            "creating payment intent"
        );

        let intent = self.gateway.create_payment_intent(params).await?;
        info!(intent = %intent.id, order = %order.id(), "payment intent created");
        Ok(intent)
    }

    /// Provisions the coupon for a newly created discount.
    pub async fn provision_discount(&self, discount: &Discount) -> CheckoutResult<()> {
        self.gateway
            .create_coupon(params::coupon_params(discount))
            .await
    }

    /// Re-provisions the coupon for an edited discount.
    ///
    /// Gateway coupons are immutable, so edit = delete + create. A failed
    /// delete (coupon never existed) is ignored; the create is what matters.
    pub async fn reprovision_discount(&self, discount: &Discount) -> CheckoutResult<()> {
        let id = params::coupon_id(discount);
        if let Err(err) = self.gateway.delete_coupon(&id).await {
            debug!(coupon = %id, %err, "stale coupon delete failed, continuing");
        }
        self.gateway
            .create_coupon(params::coupon_params(discount))
            .await
    }

    /// Provisions a tax rate, returning the gateway id to store on the
    /// local tax record.
    pub async fn provision_tax_rate(&self, params: TaxRateParams) -> CheckoutResult<String> {
        let rate_id = self.gateway.create_tax_rate(params).await?;
        info!(rate = %rate_id, "tax rate provisioned");
        Ok(rate_id)
    }

    /// Pushes an edited tax record's display fields to the gateway.
    pub async fn update_tax_rate(&self, tax: &Tax) -> CheckoutResult<()> {
        self.gateway
            .update_tax_rate(&tax.gateway_rate_id, &tax.name, &tax.description)
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGateway;
    use kiosk_core::types::{Percent, TaxBehavior};

    fn service(gateway: Arc<MockGateway>) -> CheckoutService {
        CheckoutService::new(gateway, Currency::Rub)
    }

    fn sample_order() -> Order {
        let mut order = Order::new();
        order
            .add_item(Item::new("Mug", "", 1000, Currency::Rub).unwrap())
            .unwrap();
        order.attach_discount(
            Discount::new("Promo", Percent::from_whole(10).unwrap()).unwrap(),
        );
        order
    }

    #[tokio::test]
    async fn test_checkout_order_hands_session_back() {
        let gateway = Arc::new(MockGateway::new());
        let order = sample_order();

        let session = service(gateway.clone())
            .checkout_order(&order, "https://shop.test/ok", "https://shop.test/no")
            .await
            .unwrap();

        assert!(session.url.contains(&session.id));
        let recorded = gateway.sessions();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].metadata["order_id"], order.id());
    }

    #[tokio::test]
    async fn test_intent_charges_engine_final_price() {
        let gateway = Arc::new(MockGateway::new());
        let order = sample_order(); // 1000 - 10% = 900

        let intent = service(gateway.clone())
            .intent_for_order(&order)
            .await
            .unwrap();

        assert_eq!(intent.amount, 900);
        assert_eq!(intent.currency, Currency::Rub);
        assert_eq!(gateway.intents()[0].amount, 900);
    }

    #[tokio::test]
    async fn test_reprovision_survives_missing_coupon() {
        let gateway = Arc::new(MockGateway::new());
        let discount = Discount::new("Promo", Percent::from_whole(15).unwrap()).unwrap();

        // Never provisioned before: the delete fails, the create must not
        service(gateway.clone())
            .reprovision_discount(&discount)
            .await
            .unwrap();
        assert_eq!(gateway.coupons().len(), 1);

        // Provisioned now: delete succeeds and the coupon is replaced
        service(gateway.clone())
            .reprovision_discount(&discount)
            .await
            .unwrap();
        assert_eq!(gateway.coupons().len(), 1);
    }

    #[tokio::test]
    async fn test_provision_tax_rate_returns_gateway_id() {
        let gateway = Arc::new(MockGateway::new());
        let svc = service(gateway.clone());

        let params = params::tax_rate_params(
            &Tax::new(
                "VAT",
                "VAT 20%",
                Percent::from_whole(20).unwrap(),
                TaxBehavior::Inclusive,
                "txr_placeholder",
            )
            .unwrap(),
        );
        let rate_id = svc.provision_tax_rate(params).await.unwrap();
        assert!(rate_id.starts_with("txr_"));
    }

    #[tokio::test]
    async fn test_gateway_failure_propagates() {
        let gateway = Arc::new(MockGateway::failing());
        let order = sample_order();

        let err = service(gateway)
            .checkout_order(&order, "https://shop.test/ok", "https://shop.test/no")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("gateway error"));
    }
}
