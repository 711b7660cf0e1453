//! Pure loyalty point arithmetic.
//!
//! Everything in this crate is a stateless function over a [`PointsConfig`]:
//! no side effects, no I/O, no clock. The ledger and checkout crates call
//! into it for every conversion between rupees and points.

pub mod calculator;
pub mod config;

pub use calculator::RedemptionQuote;
pub use config::PointsConfig;
