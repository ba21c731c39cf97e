//! # Domain Types
//!
//! Catalog and pricing domain types for the Kiosk storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │    Discount     │   │      Tax        │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  name           │   │  name           │       │
//! │  │  price (minor)  │   │  percent_off    │   │  percentage     │       │
//! │  │  currency       │   │                 │   │  behavior       │       │
//! │  └─────────────────┘   └─────────────────┘   │  gateway id     │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ShippingRate   │   │    Currency     │   │  TaxBehavior    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  amount (minor) │   │  Usd            │   │  Inclusive      │       │
//! │  │  currency       │   │  Rub            │   │  Exclusive      │       │
//! │  │  tax_code       │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Construction Discipline
//! Every record type has a fallible `new` that validates at the data-entry
//! boundary. Invalid records (negative price, 150% discount, empty name) are
//! unrepresentable, so the pricing engine downstream never re-validates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation;

// =============================================================================
// Currency
// =============================================================================

/// Currencies the storefront sells in.
///
/// A closed enum: unknown currency codes fail deserialization instead of
/// leaking into orders. Codes are lowercase ISO 4217, which is also the
/// exact form the payment gateway expects on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// US dollar (minor unit: cent).
    Usd,
    /// Russian ruble (minor unit: kopeck).
    Rub,
}

impl Currency {
    /// Lowercase ISO 4217 code, as sent to the gateway.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Rub => "rub",
        }
    }
}

/// The storefront's home currency.
impl Default for Currency {
    fn default() -> Self {
        Currency::Rub
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Tax Behavior
// =============================================================================

/// How a tax relates to the displayed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TaxBehavior {
    /// Tax is already embedded in the display price (EU/RU model).
    /// The engine back-calculates its portion for display; it is never
    /// added to the total again.
    Inclusive,
    /// Tax is added on top of the subtotal (USA model).
    Exclusive,
}

impl Default for TaxBehavior {
    fn default() -> Self {
        TaxBehavior::Exclusive
    }
}

// =============================================================================
// Percent
// =============================================================================

/// A percentage in the range [0%, 100%], stored as basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000. 825 bps = 8.25%.
///
/// Earlier revisions of the storefront stored percentages as integers, later
/// ones as decimals; basis points give fractional rates an exact integer
/// representation, so percentage math never touches floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(try_from = "u32", into = "u32")]
pub struct Percent(u32);

impl Percent {
    /// Creates a percentage from basis points.
    ///
    /// Rejects anything above 10 000 bps (100%): discounts and tax rates
    /// outside [0, 100]% are unrepresentable.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::types::Percent;
    ///
    /// assert_eq!(Percent::from_bps(825).unwrap().bps(), 825); // 8.25%
    /// assert!(Percent::from_bps(10_001).is_err());
    /// ```
    pub fn from_bps(bps: u32) -> Result<Self, ValidationError> {
        validation::validate_percent_bps(bps)?;
        Ok(Percent(bps))
    }

    /// Creates a percentage from whole percent (for convenience).
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::types::Percent;
    ///
    /// assert_eq!(Percent::from_whole(20).unwrap().bps(), 2000);
    /// ```
    pub fn from_whole(percent: u32) -> Result<Self, ValidationError> {
        Self::from_bps(percent.saturating_mul(100))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage number (for display and for the
    /// gateway's provisioning API only - never for money math).
    #[inline]
    pub fn as_percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

impl TryFrom<u32> for Percent {
    type Error = ValidationError;

    fn try_from(bps: u32) -> Result<Self, Self::Error> {
        Percent::from_bps(bps)
    }
}

impl From<Percent> for u32 {
    fn from(percent: Percent) -> u32 {
        percent.0
    }
}

// =============================================================================
// Item
// =============================================================================

/// A catalog item available for purchase.
///
/// Price is denominated in minor units of `currency`. Items referenced by
/// paid orders should be treated as immutable in practice, though nothing
/// here enforces that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the customer and on the gateway checkout page.
    pub name: String,

    /// Short description for the item card.
    pub description: String,

    /// Unit price in minor currency units (kopecks, cents).
    pub price: Money,

    /// Currency the price is denominated in.
    pub currency: Currency,

    /// When the item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates a catalog item, validating administrative input.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::types::{Currency, Item};
    ///
    /// let item = Item::new("Mug", "A mug", 1500, Currency::Rub).unwrap();
    /// assert_eq!(item.price.minor(), 1500);
    ///
    /// assert!(Item::new("", "No name", 1500, Currency::Rub).is_err());
    /// assert!(Item::new("Mug", "Negative", -1, Currency::Rub).is_err());
    /// ```
    pub fn new(
        name: &str,
        description: &str,
        price_minor: i64,
        currency: Currency,
    ) -> Result<Self, ValidationError> {
        validation::validate_name(name)?;
        validation::validate_description(description)?;
        validation::validate_amount_minor("price", price_minor)?;

        let now = Utc::now();
        Ok(Item {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            price: Money::from_minor(price_minor),
            currency,
            created_at: now,
            updated_at: now,
        })
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A percentage discount applied to a whole order.
///
/// Resolved at checkout time to a coupon previously provisioned in the
/// payment gateway (see kiosk-checkout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Discount {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name ("Black Friday", "Loyal customer", ...).
    pub name: String,

    /// Percentage off the order price, in [0%, 100%].
    pub percent_off: Percent,
}

impl Discount {
    /// Creates a discount, validating administrative input.
    pub fn new(name: &str, percent_off: Percent) -> Result<Self, ValidationError> {
        validation::validate_name(name)?;
        Ok(Discount {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            percent_off,
        })
    }
}

// =============================================================================
// Tax
// =============================================================================

/// A tax rate applied to a whole order.
///
/// `gateway_rate_id` is the opaque identifier of the matching tax-rate
/// resource previously provisioned in the payment gateway; line items carry
/// it so the gateway itemizes tax on the hosted checkout page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Tax {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name ("VAT", "Sales tax", ...).
    pub name: String,

    /// Short description shown on invoices.
    pub description: String,

    /// Tax rate in [0%, 100%].
    pub percentage: Percent,

    /// Whether the rate is embedded in prices or added on top.
    pub behavior: TaxBehavior,

    /// Identifier of the provisioned tax-rate resource in the gateway.
    pub gateway_rate_id: String,
}

impl Tax {
    /// Creates a tax record, validating administrative input.
    pub fn new(
        name: &str,
        description: &str,
        percentage: Percent,
        behavior: TaxBehavior,
        gateway_rate_id: &str,
    ) -> Result<Self, ValidationError> {
        validation::validate_name(name)?;
        validation::validate_description(description)?;
        validation::validate_gateway_id("gateway_rate_id", gateway_rate_id)?;
        Ok(Tax {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            percentage,
            behavior,
            gateway_rate_id: gateway_rate_id.trim().to_string(),
        })
    }
}

// =============================================================================
// Shipping Rate
// =============================================================================

/// A fixed-amount shipping charge.
///
/// `tax_code` is the gateway's product tax code for shipping (for example
/// `txcd_92010001`); the gateway uses it to tax the shipping line correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShippingRate {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown at checkout ("Courier", "Pickup point", ...).
    pub name: String,

    /// Fixed charge in minor currency units.
    pub amount: Money,

    /// Currency the charge is denominated in. Must match the order's item
    /// currency when attached (enforced by `Order::attach_shipping`).
    pub currency: Currency,

    /// Whether the charge is tax-inclusive or taxed on top.
    pub behavior: TaxBehavior,

    /// Gateway product tax code for the shipping line.
    pub tax_code: String,
}

impl ShippingRate {
    /// Creates a shipping rate, validating administrative input.
    pub fn new(
        name: &str,
        amount_minor: i64,
        currency: Currency,
        behavior: TaxBehavior,
        tax_code: &str,
    ) -> Result<Self, ValidationError> {
        validation::validate_name(name)?;
        validation::validate_amount_minor("amount", amount_minor)?;
        validation::validate_gateway_id("tax_code", tax_code)?;
        Ok(ShippingRate {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            amount: Money::from_minor(amount_minor),
            currency,
            behavior,
            tax_code: tax_code.trim().to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
