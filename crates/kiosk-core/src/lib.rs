//! # kiosk-core: Pure Business Logic for the Kiosk Storefront
//!
//! This crate is the **heart** of the storefront. It contains the catalog
//! domain model and the order pricing engine as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Kiosk Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront Frontend / Admin                     │   │
//! │  │    Catalog UI ──► Order UI ──► Checkout UI ──► Receipt UI      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kiosk-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │   Item    │  │   Money   │  │  engine   │  │   rules   │  │   │
//! │  │   │   Order   │  │  Percent  │  │  totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                kiosk-checkout (Gateway Handoff)                 │   │
//! │  │        Checkout sessions, payment intents, provisioning         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Discount, Tax, ShippingRate, ...)
//! - [`order`] - Order aggregate with currency-safe mutation
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - The order pricing engine (pure, deterministic)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every pricing function is deterministic - same
//!    input = same output, bit for bit
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are minor currency units (i64)
//!    to avoid float errors; division truncates and that is intentional
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kiosk_core::money::Money;
//! use kiosk_core::types::Percent;
//!
//! // Create money from minor units (never from floats!)
//! let price = Money::from_minor(1099); // 10.99
//!
//! // 10% off, expressed in basis points
//! let percent = Percent::from_whole(10).unwrap();
//! let discount = price.percent_of_floor(percent);
//!
//! // 10.99 at 10% off = 1.09 (truncated, never rounded)
//! assert_eq!(discount.minor(), 109);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kiosk_core::Money` instead of
// `use kiosk_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::Order;
pub use pricing::{price_order, OrderPricing};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum items allowed in a single order
///
/// ## Business Reason
/// Prevents runaway orders and keeps checkout-session payloads within the
/// gateway's line-item limits. Can be made configurable per-store later.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum length of entity names (items, discounts, taxes, shipping rates)
///
/// ## Business Reason
/// Names travel to the payment gateway as display strings; gateways cap
/// display names at 255 characters.
pub const MAX_NAME_LEN: usize = 255;

/// Maximum length of entity descriptions
pub const MAX_DESCRIPTION_LEN: usize = 255;
