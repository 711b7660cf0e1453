//! The loyalty points ledger.
//!
//! This crate is the heart of the Crumbs core. It provides:
//! - [`LoyaltyLedger`] — earn / redeem / adjust operations over any
//!   [`LoyaltyStore`](crumbs_store::LoyaltyStore)
//! - Balance summaries and operation receipts
//! - Paged transaction history, newest first
//! - The error taxonomy separating validation failures (never retryable)
//!   from persistence failures (retryable)
//!
//! Every mutating operation validates before touching the store and then
//! delegates to the store's single atomic apply, so a balance change and
//! its transaction record always land together.

pub mod error;
pub mod ledger;
pub mod records;

pub use error::LedgerError;
pub use ledger::LoyaltyLedger;
pub use records::{BalanceSummary, EarnReceipt, RedeemReceipt};
