//! Persistence boundary for the Crumbs loyalty core.
//!
//! This crate defines the narrow store traits the ledger and checkout crates
//! depend on, plus in-memory implementations for tests, demos, and
//! embedding:
//!
//! - [`LoyaltyStore`] — accounts and their append-only transaction log,
//!   mutated only through one atomic apply
//! - [`PromoStore`] — read access to promo codes and the conditional
//!   used-count increment
//! - [`InMemoryLoyaltyStore`] / [`InMemoryPromoStore`] — `RwLock`-protected
//!   map state
//!
//! The single load-bearing contract is [`LoyaltyStore::apply`]: the balance
//! guard, counter updates, and transaction append happen inside one atomic
//! unit, so a partial write (balance moved without a log record, or the
//! reverse) is never observable.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryLoyaltyStore, InMemoryPromoStore};
pub use traits::{LoyaltyStore, PromoStore};
