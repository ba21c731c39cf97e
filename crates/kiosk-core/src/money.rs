//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units (cents, kopecks, ...)                │
//! │    10.99 is stored as 1099                                              │
//! │    1000 * 10% = 100, exactly, every time                                │
//! │                                                                         │
//! │  Percentage math TRUNCATES (floor division). 999 * 10% = 99, not 100.  │
//! │  The sub-unit remainder is dropped deliberately, the same way the      │
//! │  storefront has always priced orders. Do not "fix" this to rounding:   │
//! │  customers have been quoted truncated amounts and the gateway was      │
//! │  charged truncated amounts.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kiosk_core::money::Money;
//!
//! // Create from minor units (preferred)
//! let price = Money::from_minor(1099); // 10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                      // 21.98
//! let total = price + Money::from_minor(500);   // 15.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Percent;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD, kopecks
/// for RUB).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate subtractions may dip negative even though
///   every stored amount is non-negative (enforced at the entry boundary)
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No currency inside**: the currency lives on the owning entity; mixing
///   currencies is prevented where items join an order, not here
///
/// ## Where Money Flows
/// ```text
/// Item.price ──► order_price ──► subtotal ──► final_price ──► gateway amount
///                     │
///                     └──► Displayed as "10.99" in the storefront UI
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// let price = Money::from_minor(1099); // Represents 10.99
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // 10.99
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (rubles, dollars, ...).
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(1099).major_part(), 10);
    /// ```
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Takes a percentage of this amount with **truncating** integer
    /// division.
    ///
    /// This is the single primitive behind discount amounts and exclusive
    /// tax amounts: `amount * bps / 10_000`, remainder dropped.
    ///
    /// ## Truncation Is Contractual
    /// ```text
    /// 999 at 10%:
    ///   999 * 1000 / 10_000 = 99.9 ──► 99   (NOT 100)
    /// ```
    /// The storefront has always quoted truncated amounts; switching to
    /// rounding would change totals customers already saw.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    /// use kiosk_core::types::Percent;
    ///
    /// let subtotal = Money::from_minor(900);
    /// let vat = Percent::from_whole(20).unwrap();
    /// assert_eq!(subtotal.percent_of_floor(vat).minor(), 180);
    /// ```
    pub fn percent_of_floor(&self, percent: Percent) -> Money {
        // i128 to prevent overflow on large amounts
        let part = (self.0 as i128 * percent.bps() as i128) / 10_000;
        Money::from_minor(part as i64)
    }

    /// Back-calculates the tax portion already embedded in a tax-inclusive
    /// amount: `amount * bps / (10_000 + bps)`, truncating.
    ///
    /// ## Why a Different Formula?
    /// ```text
    /// Inclusive pricing: shelf price = net + tax
    ///
    ///   shelf 1200, VAT 20%  ──►  net 1000 + tax 200
    ///
    ///   tax = 1200 * 2000 / (10_000 + 2000) = 200
    /// ```
    /// The result is informational: it is *inside* the amount, never added
    /// on top of it.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    /// use kiosk_core::types::Percent;
    ///
    /// let subtotal = Money::from_minor(1200);
    /// let vat = Percent::from_whole(20).unwrap();
    /// assert_eq!(subtotal.inclusive_tax_part(vat).minor(), 200);
    /// ```
    pub fn inclusive_tax_part(&self, percent: Percent) -> Money {
        let bps = percent.bps() as i128;
        let part = (self.0 as i128 * bps) / (10_000 + bps);
        Money::from_minor(part as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable `major.minor`
/// format.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle currency symbols and localization properly. This is
/// the ONLY place an amount is ever divided by 100.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major_part().abs(), self.minor_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation of Money values (for order totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(1099);
        assert_eq!(money.minor(), 1099);
        assert_eq!(money.major_part(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.minor(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.minor(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_minor(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_minor(500)), "5.00");
        assert_eq!(format!("{}", Money::from_minor(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_minor(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((a * 3).minor(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 399]
            .iter()
            .map(|&m| Money::from_minor(m))
            .sum();
        assert_eq!(total.minor(), 749);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert_eq!(empty, Money::zero());
    }

    #[test]
    fn test_percent_of_floor_exact() {
        // 10.00 at 10% = 1.00
        let amount = Money::from_minor(1000);
        let pct = Percent::from_whole(10).unwrap();
        assert_eq!(amount.percent_of_floor(pct).minor(), 100);
    }

    #[test]
    fn test_percent_of_floor_truncates() {
        // 9.99 at 10% = 0.999 ──► 0.99, never 1.00
        let amount = Money::from_minor(999);
        let pct = Percent::from_whole(10).unwrap();
        assert_eq!(amount.percent_of_floor(pct).minor(), 99);

        // Fractional rate: 10.00 at 8.25% = 0.825 ──► 0.82 (truncated)
        let amount = Money::from_minor(1000);
        let pct = Percent::from_bps(825).unwrap();
        assert_eq!(amount.percent_of_floor(pct).minor(), 82);
    }

    #[test]
    fn test_percent_of_floor_bounds() {
        let amount = Money::from_minor(12345);
        assert_eq!(amount.percent_of_floor(Percent::zero()).minor(), 0);
        let full = Percent::from_whole(100).unwrap();
        assert_eq!(amount.percent_of_floor(full), amount);
    }

    #[test]
    fn test_inclusive_tax_part() {
        // Shelf price 12.00 with 20% VAT inside ──► 2.00 of it is tax
        let amount = Money::from_minor(1200);
        let pct = Percent::from_whole(20).unwrap();
        assert_eq!(amount.inclusive_tax_part(pct).minor(), 200);
    }

    #[test]
    fn test_inclusive_tax_part_truncates() {
        // 10.00 with 20% inside: 1000 * 2000 / 12000 = 166.66 ──► 166
        let amount = Money::from_minor(1000);
        let pct = Percent::from_whole(20).unwrap();
        assert_eq!(amount.inclusive_tax_part(pct).minor(), 166);
    }

    #[test]
    fn test_inclusive_tax_part_is_strictly_inside() {
        // For any positive rate the embedded tax is strictly less than
        // the amount itself
        let amount = Money::from_minor(500);
        for bps in [1u32, 825, 2000, 10_000] {
            let pct = Percent::from_bps(bps).unwrap();
            assert!(amount.inclusive_tax_part(pct) < amount);
        }
    }

    #[test]
    fn test_percent_of_large_amount_no_overflow() {
        // Amounts near i64::MAX must not overflow the intermediate product
        let amount = Money::from_minor(i64::MAX / 2);
        let pct = Percent::from_whole(100).unwrap();
        assert_eq!(amount.percent_of_floor(pct), amount);
    }
}
