//! # Order Aggregate
//!
//! The order and its currency-safe mutation API.
//!
//! ## Currency Homogeneity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Mutation Operations                            │
//! │                                                                         │
//! │  Storefront Action          Order API              Precondition         │
//! │  ─────────────────          ─────────              ────────────         │
//! │                                                                         │
//! │  Add item ────────────────► add_item() ──────────► same currency        │
//! │                                                                         │
//! │  Add several items ───────► add_items() ─────────► whole batch agrees   │
//! │                                                     (all-or-nothing)    │
//! │                                                                         │
//! │  Pick shipping ───────────► attach_shipping() ───► rate currency ==     │
//! │                                                     order currency      │
//! │                                                                         │
//! │  Apply discount/tax ──────► attach_discount() ───► (always allowed)     │
//! │                             attach_tax()                                │
//! │                                                                         │
//! │  NOTE: every check runs BEFORE the order changes. A rejected mutation  │
//! │        leaves the order exactly as it was.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first item locks the order to its currency. Downstream, the pricing
//! engine relies on this invariant and does not re-check it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::{Currency, Discount, Item, ShippingRate, Tax};
use crate::MAX_ORDER_ITEMS;

// =============================================================================
// Order
// =============================================================================

/// A customer order: a bag of items plus optional discount, tax, and
/// shipping references.
///
/// ## Design Notes
/// - Fields are private so every mutation goes through the precondition
///   checks; serde still serializes them for transfer to the frontend.
/// - Item entries each count as quantity 1. The same catalog item may appear
///   more than once; duplicates are priced individually.
/// - The order stores no computed amounts. Pricing is a derived view
///   (see [`crate::pricing`]), recomputed on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Unique identifier (UUID v4).
    id: String,

    /// Items in the order, each with implicit quantity 1.
    items: Vec<Item>,

    /// Optional order-wide percentage discount.
    discount: Option<Discount>,

    /// Optional order-wide tax.
    tax: Option<Tax>,

    /// Optional fixed-amount shipping charge.
    shipping: Option<ShippingRate>,

    /// When the order was created.
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new, empty order.
    pub fn new() -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            items: Vec::new(),
            discount: None,
            tax: None,
            shipping: None,
            created_at: Utc::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The order's unique identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The items in the order.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The attached discount, if any.
    #[inline]
    pub fn discount(&self) -> Option<&Discount> {
        self.discount.as_ref()
    }

    /// The attached tax, if any.
    #[inline]
    pub fn tax(&self) -> Option<&Tax> {
        self.tax.as_ref()
    }

    /// The attached shipping rate, if any.
    #[inline]
    pub fn shipping(&self) -> Option<&ShippingRate> {
        self.shipping.as_ref()
    }

    /// When the order was created.
    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True when the order holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of item entries (duplicates counted individually).
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The currency the order is locked to, if anything has locked it yet.
    ///
    /// The first item fixes the currency. An attached shipping rate fixes it
    /// too, so an empty order with courier shipping in rubles will refuse
    /// dollar items later.
    pub fn locked_currency(&self) -> Option<Currency> {
        self.items
            .first()
            .map(|item| item.currency)
            .or_else(|| self.shipping.as_ref().map(|rate| rate.currency))
    }

    // -------------------------------------------------------------------------
    // Mutation (precondition-checked)
    // -------------------------------------------------------------------------

    /// Adds one item, rejecting it if its currency differs from the
    /// currency the order is locked to.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::order::Order;
    /// use kiosk_core::types::{Currency, Item};
    ///
    /// let mut order = Order::new();
    /// let mug = Item::new("Mug", "", 1500, Currency::Rub).unwrap();
    /// let cap = Item::new("Cap", "", 900, Currency::Usd).unwrap();
    ///
    /// order.add_item(mug).unwrap();
    /// assert!(order.add_item(cap).is_err()); // usd into a rub order
    /// assert_eq!(order.len(), 1);            // order unchanged
    /// ```
    pub fn add_item(&mut self, item: Item) -> CoreResult<()> {
        if self.items.len() >= MAX_ORDER_ITEMS {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_ITEMS,
            });
        }

        if let Some(expected) = self.locked_currency() {
            if item.currency != expected {
                return Err(CoreError::CurrencyMismatch {
                    expected,
                    found: item.currency,
                });
            }
        }

        self.items.push(item);
        Ok(())
    }

    /// Adds a batch of items atomically.
    ///
    /// The whole batch is validated first - existing currency plus every
    /// added item must agree on a single currency. On rejection, none of the
    /// batch is added.
    pub fn add_items(&mut self, items: Vec<Item>) -> CoreResult<()> {
        if self.items.len() + items.len() > MAX_ORDER_ITEMS {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_ITEMS,
            });
        }

        // Establish the expected currency from the order, or failing that
        // from the first of the batch, then require unanimity.
        let mut expected = self.locked_currency();
        for item in &items {
            match expected {
                None => expected = Some(item.currency),
                Some(currency) if item.currency != currency => {
                    return Err(CoreError::CurrencyMismatch {
                        expected: currency,
                        found: item.currency,
                    });
                }
                Some(_) => {}
            }
        }

        self.items.extend(items);
        Ok(())
    }

    /// Attaches (or replaces) the order-wide discount.
    pub fn attach_discount(&mut self, discount: Discount) {
        self.discount = Some(discount);
    }

    /// Removes the discount.
    pub fn clear_discount(&mut self) {
        self.discount = None;
    }

    /// Attaches (or replaces) the order-wide tax.
    pub fn attach_tax(&mut self, tax: Tax) {
        self.tax = Some(tax);
    }

    /// Removes the tax.
    pub fn clear_tax(&mut self) {
        self.tax = None;
    }

    /// Attaches (or replaces) the shipping rate.
    ///
    /// Shipping is charged in the order's currency: a rate denominated in a
    /// different currency than the order's items is rejected.
    pub fn attach_shipping(&mut self, rate: ShippingRate) -> CoreResult<()> {
        if let Some(order_currency) = self.items.first().map(|item| item.currency) {
            if rate.currency != order_currency {
                return Err(CoreError::ShippingCurrencyMismatch {
                    order: order_currency,
                    shipping: rate.currency,
                });
            }
        }

        self.shipping = Some(rate);
        Ok(())
    }

    /// Removes the shipping rate.
    pub fn clear_shipping(&mut self) {
        self.shipping = None;
    }
}

impl Default for Order {
    fn default() -> Self {
        Order::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Percent, TaxBehavior};

    fn rub_item(name: &str, price: i64) -> Item {
        Item::new(name, "", price, Currency::Rub).unwrap()
    }

    fn usd_item(name: &str, price: i64) -> Item {
        Item::new(name, "", price, Currency::Usd).unwrap()
    }

    #[test]
    fn test_new_order_is_empty() {
        let order = Order::new();
        assert!(order.is_empty());
        assert_eq!(order.len(), 0);
        assert_eq!(order.locked_currency(), None);
        assert!(order.discount().is_none());
        assert!(order.tax().is_none());
        assert!(order.shipping().is_none());
    }

    #[test]
    fn test_first_item_locks_currency() {
        let mut order = Order::new();
        order.add_item(usd_item("Cap", 900)).unwrap();
        assert_eq!(order.locked_currency(), Some(Currency::Usd));
    }

    #[test]
    fn test_add_item_rejects_foreign_currency() {
        let mut order = Order::new();
        order.add_item(rub_item("Mug", 1500)).unwrap();

        let err = order.add_item(usd_item("Cap", 900)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::CurrencyMismatch {
                expected: Currency::Rub,
                found: Currency::Usd,
            }
        ));
        // Rejected mutation leaves the order untouched
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn test_duplicates_are_allowed() {
        let mut order = Order::new();
        let mug = rub_item("Mug", 1500);
        order.add_item(mug.clone()).unwrap();
        order.add_item(mug).unwrap();
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn test_add_items_batch_is_atomic() {
        let mut order = Order::new();
        order.add_item(rub_item("Mug", 1500)).unwrap();

        // One bad item poisons the whole batch
        let batch = vec![rub_item("Tee", 2500), usd_item("Cap", 900)];
        assert!(order.add_items(batch).is_err());
        assert_eq!(order.len(), 1);

        let ok_batch = vec![rub_item("Tee", 2500), rub_item("Pin", 300)];
        order.add_items(ok_batch).unwrap();
        assert_eq!(order.len(), 3);
    }

    #[test]
    fn test_add_items_batch_must_agree_internally() {
        // Even into an empty order, a mixed batch is rejected
        let mut order = Order::new();
        let batch = vec![rub_item("Mug", 1500), usd_item("Cap", 900)];
        assert!(order.add_items(batch).is_err());
        assert!(order.is_empty());
    }

    #[test]
    fn test_add_items_empty_batch_is_noop() {
        let mut order = Order::new();
        order.add_items(Vec::new()).unwrap();
        assert!(order.is_empty());
    }

    #[test]
    fn test_max_order_items() {
        let mut order = Order::new();
        for i in 0..MAX_ORDER_ITEMS {
            order.add_item(rub_item(&format!("Item {i}"), 100)).unwrap();
        }
        let err = order.add_item(rub_item("One too many", 100)).unwrap_err();
        assert!(matches!(err, CoreError::OrderTooLarge { .. }));
    }

    #[test]
    fn test_attach_shipping_checks_currency() {
        let mut order = Order::new();
        order.add_item(rub_item("Mug", 1500)).unwrap();

        let usd_courier = ShippingRate::new(
            "Courier",
            500,
            Currency::Usd,
            TaxBehavior::Exclusive,
            "txcd_92010001",
        )
        .unwrap();
        let err = order.attach_shipping(usd_courier).unwrap_err();
        assert!(matches!(err, CoreError::ShippingCurrencyMismatch { .. }));
        assert!(order.shipping().is_none());

        let rub_courier = ShippingRate::new(
            "Courier",
            150,
            Currency::Rub,
            TaxBehavior::Exclusive,
            "txcd_92010001",
        )
        .unwrap();
        order.attach_shipping(rub_courier).unwrap();
        assert!(order.shipping().is_some());
    }

    #[test]
    fn test_shipping_on_empty_order_locks_currency() {
        let mut order = Order::new();
        let rub_courier = ShippingRate::new(
            "Courier",
            150,
            Currency::Rub,
            TaxBehavior::Exclusive,
            "txcd_92010001",
        )
        .unwrap();
        order.attach_shipping(rub_courier).unwrap();

        // The rate locked the order to rubles before any item arrived
        assert_eq!(order.locked_currency(), Some(Currency::Rub));
        assert!(order.add_item(usd_item("Cap", 900)).is_err());
        assert!(order.add_item(rub_item("Mug", 1500)).is_ok());
    }

    #[test]
    fn test_attach_and_clear_optional_references() {
        let mut order = Order::new();
        let ten = Percent::from_whole(10).unwrap();
        order.attach_discount(Discount::new("Promo", ten).unwrap());
        order.attach_tax(
            Tax::new("VAT", "", ten, TaxBehavior::Inclusive, "txr_1").unwrap(),
        );

        assert!(order.discount().is_some());
        assert!(order.tax().is_some());

        order.clear_discount();
        order.clear_tax();
        order.clear_shipping();
        assert!(order.discount().is_none());
        assert!(order.tax().is_none());
    }
}
