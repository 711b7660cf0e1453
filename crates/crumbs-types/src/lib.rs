//! Foundation types for the Crumbs loyalty and promotion core.
//!
//! This crate provides the identifier, ledger, and promotion types used
//! throughout the Crumbs system. Every other Crumbs crate depends on
//! `crumbs-types`.
//!
//! # Key Types
//!
//! - [`CustomerId`] / [`OrderId`] — Opaque string identifiers supplied by the
//!   surrounding shop application
//! - [`TransactionId`] — UUID v7 point-transaction identifier
//! - [`LoyaltyAccount`] — Per-customer running balance with lifetime counters
//! - [`PointTransaction`] — Immutable append-only ledger record
//! - [`PromoCode`] — Stored discount rule keyed by a unique code string
//! - [`Page`] / [`Pagination`] — List-endpoint pagination envelope

pub mod account;
pub mod ids;
pub mod money;
pub mod page;
pub mod promo;
pub mod transaction;

pub use account::LoyaltyAccount;
pub use ids::{CustomerId, OrderId, TransactionId};
pub use money::round_to_paise;
pub use page::{Page, Pagination};
pub use promo::{DiscountType, PromoCode};
pub use transaction::{PointTransaction, TransactionDraft, TransactionKind};
