//! Per-customer loyalty account state.

use serde::{Deserialize, Serialize};

use crate::ids::CustomerId;

/// Running loyalty balance for one customer.
///
/// Accounts are created lazily on the first earn/redeem/adjust and never
/// deleted. The lifetime counters only grow; at all times
/// `current_balance == total_earned - total_used` and every field is
/// non-negative. The counters are maintained exclusively by the store's
/// atomic apply, never mutated piecemeal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyAccount {
    pub customer_id: CustomerId,
    /// Points currently available to redeem.
    pub current_balance: i64,
    /// Lifetime points credited (earns and positive adjustments).
    pub total_earned: i64,
    /// Lifetime points debited (redemptions and negative adjustments).
    pub total_used: i64,
}

impl LoyaltyAccount {
    /// A fresh account with all counters at zero.
    pub fn new(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            current_balance: 0,
            total_earned: 0,
            total_used: 0,
        }
    }

    /// Check the ledger invariant: balance equals earned minus used and
    /// nothing has gone negative.
    pub fn is_consistent(&self) -> bool {
        self.current_balance >= 0
            && self.total_earned >= 0
            && self.total_used >= 0
            && self.current_balance == self.total_earned - self.total_used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_is_consistent() {
        let account = LoyaltyAccount::new("cust-1".into());
        assert!(account.is_consistent());
        assert_eq!(account.current_balance, 0);
    }

    #[test]
    fn drifted_counters_are_inconsistent() {
        let mut account = LoyaltyAccount::new("cust-1".into());
        account.current_balance = 10;
        assert!(!account.is_consistent());

        account.total_earned = 10;
        assert!(account.is_consistent());
    }
}
