//! Checkout composition for the Crumbs shop.
//!
//! This crate sits where orders are created. It provides:
//! - [`DiscountBreakdown`] — the explicit promo + points discount pair and
//!   its clamped application to an order total
//! - [`CheckoutFlow`] — the order-creation sequence: price the cart,
//!   evaluate the promo, redeem points, charge payment, then credit earned
//!   points and send confirmations best-effort
//! - Narrow collaborator traits for email, SMS, and payment, with mock
//!   implementations that log and record instead of calling providers
//!
//! Collaborators are injected; nothing here reaches for process-wide
//! singletons, so the flow is testable with the in-memory stores and mocks
//! alone.

pub mod collaborators;
pub mod discount;
pub mod error;
pub mod flow;
pub mod order;

pub use collaborators::{
    ChargeReceipt, ChargeRequest, DispatchError, DispatchReceipt, EmailMessage, EmailSender,
    MockEmailSender, MockPaymentGateway, MockSmsSender, PaymentError, PaymentGateway, SmsMessage,
    SmsSender,
};
pub use discount::DiscountBreakdown;
pub use error::CheckoutError;
pub use flow::{CartLine, CheckoutConfig, CheckoutFlow, CheckoutRequest, PlacedOrder};
pub use order::{new_order_number, DeliveryMethod, Order};
