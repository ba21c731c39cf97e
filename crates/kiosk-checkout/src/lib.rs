//! # kiosk-checkout: Payment Gateway Handoff
//!
//! Turns priced orders into the payloads the payment gateway consumes and
//! defines the trait boundary a concrete gateway client implements.
//!
//! ## Handoff Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Handoff Flow                              │
//! │                                                                         │
//! │  Order (kiosk-core)                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  params::session_params_for_order ── line items, coupon, shipping ──┐  │
//! │  params::intent_params_for_order ─── final_price + currency ────────┤  │
//! │                                                                      │  │
//! │       ┌──────────────────────────────────────────────────────────────┘  │
//! │       ▼                                                                 │
//! │  PaymentGateway trait (async)                                           │
//! │       │                                                                 │
//! │       ├──► real client (HTTP/SDK, outside this workspace)               │
//! │       └──► MockGateway (tests)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`params`] - Gateway request payloads and the builders that fill them
//! - [`gateway`] - The [`PaymentGateway`] trait, responses, and the
//!   [`CheckoutService`] orchestration layer
//! - [`mock`] - Recording [`MockGateway`] for tests
//! - [`error`] - Checkout error types

pub mod error;
pub mod gateway;
pub mod mock;
pub mod params;

pub use error::{CheckoutError, CheckoutResult};
pub use gateway::{CheckoutService, CheckoutSession, PaymentGateway, PaymentIntentHandle};
pub use mock::MockGateway;
