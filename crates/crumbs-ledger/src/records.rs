//! Read models returned by ledger operations.

use serde::{Deserialize, Serialize};

/// A customer's loyalty standing, as shown on the account page.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub current_balance: i64,
    pub total_earned: i64,
    pub total_used: i64,
    /// What the full current balance is worth in rupees today.
    pub discount_value: f64,
    pub min_redeem_points: i64,
    pub can_redeem: bool,
}

/// Result of crediting points for a completed order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnReceipt {
    /// Zero when the order was too small to earn anything (no transaction
    /// is recorded in that case).
    pub points_earned: i64,
}

/// Result of redeeming points against an order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RedeemReceipt {
    /// Rupee discount granted for the redeemed points.
    pub discount: f64,
    pub points_redeemed: i64,
}
