//! # Gateway Request Payloads
//!
//! Typed request bodies for the payment gateway, plus the builders that fill
//! them from domain records.
//!
//! ## Wire Fidelity
//! These structs serialize to the exact JSON shape the gateway's API
//! expects: snake_case keys, lowercase currency codes, the literal
//! `"fixed_amount"` type tag on shipping rates, amounts in minor units.
//! Shape tests at the bottom of this file pin every payload against a JSON
//! literal - if a field is renamed or a default drifts, a test breaks before
//! the gateway does.
//!
//! ## Builder Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Domain record                     Payload                             │
//! │   ─────────────                     ───────                             │
//! │   Item            ──────────────►   LineItem (quantity always 1)        │
//! │   Discount        ──────────────►   DiscountParam { coupon } /          │
//! │                                     CouponParams (provisioning)         │
//! │   Tax             ──────────────►   tax_rates: [gateway_rate_id] /      │
//! │                                     TaxRateParams (provisioning)        │
//! │   ShippingRate    ──────────────►   ShippingRateData                    │
//! │   Order           ──────────────►   CheckoutSessionParams /             │
//! │                                     PaymentIntentParams                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use kiosk_core::pricing;
use kiosk_core::types::{Currency, Discount, Item, ShippingRate, Tax, TaxBehavior};
use kiosk_core::Order;

/// The one payment method the storefront offers at checkout.
const PAYMENT_METHOD_CARD: &str = "card";

/// Session mode for one-off payments (as opposed to subscriptions).
const MODE_PAYMENT: &str = "payment";

// =============================================================================
// Line Items
// =============================================================================

/// Product display data nested inside [`PriceData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    /// Name shown on the hosted checkout page.
    pub name: String,
}

/// Ad-hoc price data for one line: the gateway creates a throwaway price
/// object from this instead of referencing a pre-provisioned one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceData {
    /// Lowercase currency code.
    pub currency: Currency,

    /// Unit price in minor currency units.
    pub unit_amount: i64,

    /// Product display data.
    pub product_data: ProductData,
}

/// One line of a checkout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub price_data: PriceData,

    /// Always 1: the order model counts duplicates individually instead of
    /// carrying quantities.
    pub quantity: u32,

    /// Gateway tax-rate ids applied to this line.
    pub tax_rates: Vec<String>,
}

/// Builds the line payload for one item.
pub fn line_item(item: &Item, tax_rates: &[String]) -> LineItem {
    LineItem {
        price_data: PriceData {
            currency: item.currency,
            unit_amount: item.price.minor(),
            product_data: ProductData {
                name: item.name.clone(),
            },
        },
        quantity: 1,
        tax_rates: tax_rates.to_vec(),
    }
}

// =============================================================================
// Discounts / Coupons
// =============================================================================

/// Reference to a previously provisioned coupon, attached to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountParam {
    pub coupon: String,
}

/// The gateway-side coupon id for a discount record.
///
/// Deterministic (`"coupon_" + local id`) so the session builder can resolve
/// the coupon without a lookup table.
pub fn coupon_id(discount: &Discount) -> String {
    format!("coupon_{}", discount.id)
}

/// Payload for provisioning a coupon in the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponParams {
    /// Gateway coupon id (see [`coupon_id`]).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Coupon lifetime; storefront coupons never expire on their own.
    pub duration: String,

    /// Percentage off. The gateway's provisioning API takes a number here;
    /// this is display/provisioning only, money math never sees it.
    pub percent_off: f64,
}

/// Builds the provisioning payload for a discount.
pub fn coupon_params(discount: &Discount) -> CouponParams {
    CouponParams {
        id: coupon_id(discount),
        name: discount.name.clone(),
        duration: "forever".to_string(),
        percent_off: discount.percent_off.as_percentage(),
    }
}

// =============================================================================
// Tax Rates
// =============================================================================

/// Payload for provisioning a tax rate in the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRateParams {
    pub display_name: String,
    pub description: String,

    /// Percentage as a number (provisioning only).
    pub percentage: f64,

    /// True when the rate is embedded in prices.
    pub inclusive: bool,
}

/// Builds the provisioning payload for a tax record.
pub fn tax_rate_params(tax: &Tax) -> TaxRateParams {
    TaxRateParams {
        display_name: tax.name.clone(),
        description: tax.description.clone(),
        percentage: tax.percentage.as_percentage(),
        inclusive: tax.behavior == TaxBehavior::Inclusive,
    }
}

// =============================================================================
// Shipping
// =============================================================================

/// Fixed amount block inside [`ShippingRateData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedAmount {
    /// Charge in minor currency units.
    pub amount: i64,
    pub currency: Currency,
}

/// Ad-hoc shipping rate data for a checkout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingRateData {
    pub display_name: String,
    pub fixed_amount: FixedAmount,
    pub tax_behavior: TaxBehavior,

    /// Gateway product tax code, e.g. `txcd_92010001`.
    pub tax_code: String,

    /// Always `"fixed_amount"` - the only rate type the storefront uses.
    #[serde(rename = "type")]
    pub rate_type: String,
}

/// One entry of a session's `shipping_options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingOption {
    pub shipping_rate_data: ShippingRateData,
}

/// Builds the shipping rate payload for a shipping record.
pub fn shipping_rate_data(shipping: &ShippingRate) -> ShippingRateData {
    ShippingRateData {
        display_name: shipping.name.clone(),
        fixed_amount: FixedAmount {
            amount: shipping.amount.minor(),
            currency: shipping.currency,
        },
        tax_behavior: shipping.behavior,
        tax_code: shipping.tax_code.clone(),
        rate_type: "fixed_amount".to_string(),
    }
}

// =============================================================================
// Checkout Session
// =============================================================================

/// Request body for creating a hosted checkout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSessionParams {
    pub payment_method_types: Vec<String>,
    pub line_items: Vec<LineItem>,

    /// Coupon references; omitted from the wire when there are none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discounts: Vec<DiscountParam>,

    /// Free-form correlation ids (`order_id` / `product_id`).
    pub metadata: HashMap<String, String>,

    pub mode: String,
    pub success_url: String,
    pub cancel_url: String,

    /// Shipping choices; omitted from the wire when there are none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shipping_options: Vec<ShippingOption>,
}

/// Builds a single-item checkout session ("buy now" on an item page).
pub fn session_params_for_item(
    item: &Item,
    success_url: &str,
    cancel_url: &str,
) -> CheckoutSessionParams {
    CheckoutSessionParams {
        payment_method_types: vec![PAYMENT_METHOD_CARD.to_string()],
        line_items: vec![line_item(item, &[])],
        discounts: Vec::new(),
        metadata: HashMap::from([("product_id".to_string(), item.id.clone())]),
        mode: MODE_PAYMENT.to_string(),
        success_url: success_url.to_string(),
        cancel_url: cancel_url.to_string(),
        shipping_options: Vec::new(),
    }
}

/// Builds a checkout session for a whole order: every item as a line (with
/// the order's tax rate applied per line), the discount resolved to its
/// coupon, and the shipping rate as a session-level option.
pub fn session_params_for_order(
    order: &Order,
    success_url: &str,
    cancel_url: &str,
) -> CheckoutSessionParams {
    let tax_rates: Vec<String> = order
        .tax()
        .map(|tax| vec![tax.gateway_rate_id.clone()])
        .unwrap_or_default();

    let line_items = order
        .items()
        .iter()
        .map(|item| line_item(item, &tax_rates))
        .collect();

    let discounts = order
        .discount()
        .map(|discount| {
            vec![DiscountParam {
                coupon: coupon_id(discount),
            }]
        })
        .unwrap_or_default();

    let shipping_options = order
        .shipping()
        .map(|shipping| {
            vec![ShippingOption {
                shipping_rate_data: shipping_rate_data(shipping),
            }]
        })
        .unwrap_or_default();

    CheckoutSessionParams {
        payment_method_types: vec![PAYMENT_METHOD_CARD.to_string()],
        line_items,
        discounts,
        metadata: HashMap::from([("order_id".to_string(), order.id().to_string())]),
        mode: MODE_PAYMENT.to_string(),
        success_url: success_url.to_string(),
        cancel_url: cancel_url.to_string(),
        shipping_options,
    }
}

// =============================================================================
// Payment Intent
// =============================================================================

/// Request body for creating a payment intent (card-element flow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntentParams {
    /// Amount in minor currency units - the engine's `final_price`.
    pub amount: i64,

    pub currency: Currency,
    pub payment_method_types: Vec<String>,
    pub metadata: HashMap<String, String>,
}

/// Builds a payment intent for an order.
///
/// The amount is the pricing engine's `final_price` and the currency the
/// engine's order currency, so the intent can never disagree with what the
/// storefront displayed.
pub fn intent_params_for_order(order: &Order, default_currency: Currency) -> PaymentIntentParams {
    let breakdown = pricing::price_order(order, default_currency);
    PaymentIntentParams {
        amount: breakdown.final_price.minor(),
        currency: breakdown.currency,
        payment_method_types: vec![PAYMENT_METHOD_CARD.to_string()],
        metadata: HashMap::from([(
            "integration_check".to_string(),
            "accept_a_payment".to_string(),
        )]),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::types::Percent;
    use serde_json::json;

    fn mug() -> Item {
        Item::new("Mug", "A mug", 1500, Currency::Rub).unwrap()
    }

    fn ten_percent() -> Discount {
        Discount::new("Promo", Percent::from_whole(10).unwrap()).unwrap()
    }

    fn vat_exclusive() -> Tax {
        Tax::new(
            "VAT",
            "VAT 20%",
            Percent::from_whole(20).unwrap(),
            TaxBehavior::Exclusive,
            "txr_abc",
        )
        .unwrap()
    }

    fn courier() -> ShippingRate {
        ShippingRate::new(
            "Courier",
            150,
            Currency::Rub,
            TaxBehavior::Exclusive,
            "txcd_92010001",
        )
        .unwrap()
    }

    #[test]
    fn test_line_item_wire_shape() {
        let item = mug();
        let line = line_item(&item, &["txr_abc".to_string()]);
        assert_eq!(
            serde_json::to_value(&line).unwrap(),
            json!({
                "price_data": {
                    "currency": "rub",
                    "unit_amount": 1500,
                    "product_data": { "name": "Mug" }
                },
                "quantity": 1,
                "tax_rates": ["txr_abc"]
            })
        );
    }

    #[test]
    fn test_coupon_id_is_deterministic() {
        let discount = ten_percent();
        assert_eq!(coupon_id(&discount), format!("coupon_{}", discount.id));
        assert_eq!(coupon_id(&discount), coupon_id(&discount));
    }

    #[test]
    fn test_coupon_params() {
        let discount = ten_percent();
        let params = coupon_params(&discount);
        assert_eq!(params.id, coupon_id(&discount));
        assert_eq!(params.name, "Promo");
        assert_eq!(params.duration, "forever");
        assert!((params.percent_off - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_tax_rate_params_maps_behavior() {
        let params = tax_rate_params(&vat_exclusive());
        assert!(!params.inclusive);
        assert!((params.percentage - 20.0).abs() < 1e-9);

        let inclusive = Tax::new(
            "VAT",
            "",
            Percent::from_whole(20).unwrap(),
            TaxBehavior::Inclusive,
            "txr_inc",
        )
        .unwrap();
        assert!(tax_rate_params(&inclusive).inclusive);
    }

    #[test]
    fn test_shipping_rate_wire_shape() {
        assert_eq!(
            serde_json::to_value(shipping_rate_data(&courier())).unwrap(),
            json!({
                "display_name": "Courier",
                "fixed_amount": { "amount": 150, "currency": "rub" },
                "tax_behavior": "exclusive",
                "tax_code": "txcd_92010001",
                "type": "fixed_amount"
            })
        );
    }

    #[test]
    fn test_session_params_for_item() {
        let item = mug();
        let params = session_params_for_item(&item, "https://shop.test/ok", "https://shop.test/no");

        assert_eq!(params.payment_method_types, vec!["card"]);
        assert_eq!(params.mode, "payment");
        assert_eq!(params.line_items.len(), 1);
        assert!(params.line_items[0].tax_rates.is_empty());
        assert_eq!(params.metadata["product_id"], item.id);
        assert!(params.discounts.is_empty());
        assert!(params.shipping_options.is_empty());
    }

    #[test]
    fn test_session_params_for_full_order() {
        let mut order = Order::new();
        order.add_item(mug()).unwrap();
        order.add_item(mug()).unwrap();
        order.attach_discount(ten_percent());
        order.attach_tax(vat_exclusive());
        order.attach_shipping(courier()).unwrap();

        let params = session_params_for_order(&order, "https://shop.test/ok", "https://shop.test/no");

        // Every item becomes a quantity-1 line carrying the order's tax rate
        assert_eq!(params.line_items.len(), 2);
        for line in &params.line_items {
            assert_eq!(line.quantity, 1);
            assert_eq!(line.tax_rates, vec!["txr_abc".to_string()]);
        }

        assert_eq!(params.discounts.len(), 1);
        assert!(params.discounts[0].coupon.starts_with("coupon_"));
        assert_eq!(params.shipping_options.len(), 1);
        assert_eq!(params.metadata["order_id"], order.id());
    }

    #[test]
    fn test_session_params_bare_order_omits_optionals() {
        let mut order = Order::new();
        order.add_item(mug()).unwrap();

        let params = session_params_for_order(&order, "https://shop.test/ok", "https://shop.test/no");
        assert!(params.line_items[0].tax_rates.is_empty());
        assert!(params.discounts.is_empty());
        assert!(params.shipping_options.is_empty());

        // Empty optionals disappear from the wire entirely
        let value = serde_json::to_value(&params).unwrap();
        assert!(value.get("discounts").is_none());
        assert!(value.get("shipping_options").is_none());
    }

    #[test]
    fn test_intent_params_use_engine_totals() {
        // 2×1500 - 10% = 2700; +20% tax = +540; +150 shipping = 3390
        let mut order = Order::new();
        order.add_item(mug()).unwrap();
        order.add_item(mug()).unwrap();
        order.attach_discount(ten_percent());
        order.attach_tax(vat_exclusive());
        order.attach_shipping(courier()).unwrap();

        let params = intent_params_for_order(&order, Currency::default());
        assert_eq!(params.amount, 3390);
        assert_eq!(params.currency, Currency::Rub);
        assert_eq!(params.payment_method_types, vec!["card"]);
        assert_eq!(params.metadata["integration_check"], "accept_a_payment");
    }

    #[test]
    fn test_intent_params_empty_order_uses_default_currency() {
        let order = Order::new();
        let params = intent_params_for_order(&order, Currency::Usd);
        assert_eq!(params.amount, 0);
        assert_eq!(params.currency, Currency::Usd);
    }
}
