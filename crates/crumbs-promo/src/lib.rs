//! Promo code rules.
//!
//! Two stateless halves:
//! - [`evaluate`] — checks a fetched [`PromoCode`](crumbs_types::PromoCode)
//!   against an order total and computes the discount. Fetching is the
//!   caller's job; rejections are ordinary results, not errors.
//! - [`admit`] — creation-time admission rules for new codes, including
//!   normalization to the stored uppercase form.

pub mod admission;
pub mod evaluate;

pub use admission::{admit, AdmissionError, NewPromoCode};
pub use evaluate::{evaluate, normalize, PromoQuote, PromoRejection};
