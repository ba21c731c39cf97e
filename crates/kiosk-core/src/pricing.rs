//! # Order Pricing Engine
//!
//! Deterministically computes every monetary component of an order: the raw
//! item total, the discount, the tax split, shipping, and the final amount
//! handed to the payment gateway.
//!
//! ## Computation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Pricing Pipeline                             │
//! │                                                                         │
//! │  items ──► order_price ──► - discount_amount ──► subtotal              │
//! │                                                     │                   │
//! │                     ┌───────────────────────────────┤                   │
//! │                     ▼                               ▼                   │
//! │          tax_amount_inclusive              tax_amount_exclusive         │
//! │          (inside subtotal,                 (added on top)               │
//! │           reported only)                            │                   │
//! │                                                     ▼                   │
//! │              final_price = subtotal + exclusive tax + shipping          │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │                               gateway payment intent / session          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules the Pipeline Must Never Drift From
//!
//! 1. **Truncating division only.** Every percentage step floors to whole
//!    minor units. Customers were quoted truncated amounts; rounding would
//!    change historical totals.
//! 2. **Inclusive tax is informational.** It is back-calculated out of the
//!    subtotal for display and reporting, and is NOT added to the final
//!    price - it is already in there. (`total_tax_amount` still sums both
//!    components for generality; only one can be non-zero because a tax has
//!    a single behavior. Whether inclusive tax belongs in a combined tax
//!    figure at all is a historically ambiguous business rule - keep the
//!    current behavior until the product owner rules otherwise.)
//! 3. **No re-validation.** The engine assumes the order mutation API
//!    upheld currency homogeneity and the [0, 100]% bounds. It is a
//!    read-only projection: no I/O, no mutation, same inputs in, same
//!    amounts out, bit for bit.
//!
//! ## Usage
//! ```rust
//! use kiosk_core::pricing::price_order;
//! use kiosk_core::order::Order;
//! use kiosk_core::types::{Currency, Item};
//!
//! let mut order = Order::new();
//! order.add_item(Item::new("Mug", "", 1000, Currency::Rub).unwrap()).unwrap();
//!
//! let pricing = price_order(&order, Currency::Rub);
//! assert_eq!(pricing.final_price.minor(), 1000);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::order::Order;
use crate::types::{Currency, Discount, Item, ShippingRate, Tax, TaxBehavior};

// =============================================================================
// Pricing Breakdown
// =============================================================================

/// The complete pricing breakdown for one order.
///
/// This is a derived, throwaway view: compute it when you need it, hand the
/// relevant fields to the UI or the gateway, and drop it. It is never
/// stored, so a changed order can never disagree with a stale total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderPricing {
    /// Sum of item prices before anything else.
    pub order_price: Money,

    /// Amount taken off by the discount (0 when no discount).
    pub discount_amount: Money,

    /// `order_price - discount_amount`.
    pub subtotal: Money,

    /// Tax portion already embedded in the subtotal (inclusive behavior).
    /// Reported, never added.
    pub tax_inclusive: Money,

    /// Tax added on top of the subtotal (exclusive behavior).
    pub tax_exclusive: Money,

    /// `tax_inclusive + tax_exclusive`; at most one is non-zero.
    pub total_tax: Money,

    /// Fixed shipping charge (0 when no shipping).
    pub shipping: Money,

    /// What the customer pays:
    /// `subtotal + tax_exclusive + shipping`.
    pub final_price: Money,

    /// Currency of every amount above.
    pub currency: Currency,
}

// =============================================================================
// Pricing Operations
// =============================================================================

/// Sum of item prices, each entry counting as quantity 1.
///
/// An empty item list prices to zero.
pub fn order_price(items: &[Item]) -> Money {
    items.iter().map(|item| item.price).sum()
}

/// Amount taken off by the discount: `order_price * percent_off`, floored.
///
/// No discount contributes zero. Because `percent_off <= 100%`, the result
/// never exceeds `order_price`.
pub fn discount_amount(order_price: Money, discount: Option<&Discount>) -> Money {
    match discount {
        Some(discount) => order_price.percent_of_floor(discount.percent_off),
        None => Money::zero(),
    }
}

/// Order price after discount. Never negative.
pub fn subtotal(order_price: Money, discount_amount: Money) -> Money {
    order_price - discount_amount
}

/// Tax portion already embedded in the subtotal.
///
/// Applies only to a present tax with inclusive behavior:
/// `subtotal * p / (100% + p)`, floored. This back-calculates what part of
/// the tax-inclusive subtotal is "already tax"; it is informational and is
/// never added to the total.
pub fn tax_amount_inclusive(subtotal: Money, tax: Option<&Tax>) -> Money {
    match tax {
        Some(tax) if tax.behavior == TaxBehavior::Inclusive => {
            subtotal.inclusive_tax_part(tax.percentage)
        }
        _ => Money::zero(),
    }
}

/// Tax added on top of the subtotal.
///
/// Applies only to a present tax with exclusive behavior:
/// `subtotal * p`, floored.
pub fn tax_amount_exclusive(subtotal: Money, tax: Option<&Tax>) -> Money {
    match tax {
        Some(tax) if tax.behavior == TaxBehavior::Exclusive => {
            subtotal.percent_of_floor(tax.percentage)
        }
        _ => Money::zero(),
    }
}

/// Combined tax figure regardless of behavior.
///
/// A tax record has a single behavior, so at most one component is non-zero;
/// both are summed for generality.
pub fn total_tax_amount(tax_inclusive: Money, tax_exclusive: Money) -> Money {
    tax_inclusive + tax_exclusive
}

/// The fixed shipping charge; absent shipping contributes zero.
pub fn shipping_amount(shipping: Option<&ShippingRate>) -> Money {
    match shipping {
        Some(rate) => rate.amount,
        None => Money::zero(),
    }
}

/// What the customer pays: `subtotal + exclusive tax + shipping`.
///
/// Inclusive tax is deliberately absent from this sum - it is already inside
/// the subtotal.
pub fn final_price(subtotal: Money, tax_exclusive: Money, shipping: Money) -> Money {
    subtotal + tax_exclusive + shipping
}

/// The order's currency: the first item's currency, or the configured
/// default for an order with no items.
///
/// Items are currency-homogeneous (enforced at mutation), so "first" is
/// just a representative - no ordering guarantee is needed or made.
pub fn order_currency(order: &Order, default: Currency) -> Currency {
    order
        .items()
        .first()
        .map(|item| item.currency)
        .unwrap_or(default)
}

/// Computes the full pricing breakdown for an order.
///
/// Pure and idempotent: same order, same default, same breakdown - every
/// time, bit for bit.
pub fn price_order(order: &Order, default_currency: Currency) -> OrderPricing {
    let order_price = order_price(order.items());
    let discount_amount = discount_amount(order_price, order.discount());
    let subtotal = subtotal(order_price, discount_amount);
    let tax_inclusive = tax_amount_inclusive(subtotal, order.tax());
    let tax_exclusive = tax_amount_exclusive(subtotal, order.tax());
    let shipping = shipping_amount(order.shipping());

    OrderPricing {
        order_price,
        discount_amount,
        subtotal,
        tax_inclusive,
        tax_exclusive,
        total_tax: total_tax_amount(tax_inclusive, tax_exclusive),
        shipping,
        final_price: final_price(subtotal, tax_exclusive, shipping),
        currency: order_currency(order, default_currency),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
