//! Conversions between order amounts and loyalty points.
//!
//! All arithmetic keeps the program's published rounding rules: earned
//! points floor, redemption discounts floor to the nearest 10-point bucket,
//! and the redeemable-points cap ceils. The floor/ceil pair is deliberately
//! asymmetric: [`PointsConfig::max_redeemable_points`] can overshoot the
//! exact inverse of [`PointsConfig::discount_from_points`] by up to 9
//! points, and callers are expected to live with that rather than snap
//! requested redemptions to multiples of 10.

use serde::{Deserialize, Serialize};

use crate::config::PointsConfig;

impl PointsConfig {
    /// Points earned for an order amount: `floor(amount / 100 *
    /// points_per_100)`. Non-positive amounts earn nothing.
    pub fn points_to_earn(&self, order_amount: f64) -> i64 {
        if order_amount <= 0.0 {
            return 0;
        }
        (order_amount / 100.0 * self.points_per_100 as f64).floor() as i64
    }

    /// Rupee discount for redeeming `points`.
    ///
    /// Returns 0 below the redemption minimum; otherwise floors to the
    /// nearest 10-point bucket, so redeeming 15 points yields the same
    /// discount as redeeming 10.
    pub fn discount_from_points(&self, points: i64) -> f64 {
        if points < self.min_redeem_points {
            return 0.0;
        }
        (points / 10) as f64 * self.rupees_per_10_points
    }

    /// The most points worth redeeming against `order_total`: the point
    /// count whose discount would just cover the total, capped at the
    /// available balance.
    pub fn max_redeemable_points(&self, available_balance: i64, order_total: f64) -> i64 {
        if order_total <= 0.0 || available_balance <= 0 {
            return 0;
        }
        let points_for_order = (order_total / self.rupees_per_10_points * 10.0).ceil() as i64;
        available_balance.min(points_for_order)
    }

    /// Pre-checkout redemption preview.
    ///
    /// Clamps the requested redemption to what the order and balance allow;
    /// with no explicit request, quotes the maximum. The quote is advisory:
    /// the ledger re-validates when the redemption is actually applied.
    pub fn redemption_quote(
        &self,
        available_balance: i64,
        requested: Option<i64>,
        order_total: f64,
    ) -> RedemptionQuote {
        let max_redeemable = self.max_redeemable_points(available_balance, order_total);
        let points_to_redeem = requested.unwrap_or(max_redeemable).min(max_redeemable).max(0);
        RedemptionQuote {
            points_to_redeem,
            discount: self.discount_from_points(points_to_redeem),
            remaining_balance: available_balance - points_to_redeem,
            max_redeemable,
        }
    }
}

/// What a requested redemption would do, before it is committed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RedemptionQuote {
    pub points_to_redeem: i64,
    pub discount: f64,
    pub remaining_balance: i64,
    pub max_redeemable: i64,
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn config() -> PointsConfig {
        PointsConfig::default()
    }

    #[test]
    fn earn_rate_follows_the_published_program() {
        let cfg = config();
        assert_eq!(cfg.points_to_earn(1000.0), 100);
        assert_eq!(cfg.points_to_earn(250.0), 25);
        assert_eq!(cfg.points_to_earn(99.0), 9);
        assert_eq!(cfg.points_to_earn(0.0), 0);
        assert_eq!(cfg.points_to_earn(-50.0), 0);
    }

    #[test]
    fn discount_floors_to_ten_point_buckets() {
        let cfg = config();
        assert_eq!(cfg.discount_from_points(10), 5.0);
        assert_eq!(cfg.discount_from_points(15), 5.0);
        assert_eq!(cfg.discount_from_points(25), 10.0);
        assert_eq!(cfg.discount_from_points(9), 0.0);
    }

    #[test]
    fn max_redeemable_is_capped_by_balance() {
        let cfg = config();
        // ₹50 order needs 100 points to cover fully.
        assert_eq!(cfg.max_redeemable_points(300, 50.0), 100);
        assert_eq!(cfg.max_redeemable_points(60, 50.0), 60);
        assert_eq!(cfg.max_redeemable_points(0, 50.0), 0);
        assert_eq!(cfg.max_redeemable_points(300, 0.0), 0);
    }

    #[test]
    fn quote_defaults_to_the_maximum_and_clamps_requests() {
        let cfg = config();

        let defaulted = cfg.redemption_quote(60, None, 50.0);
        assert_eq!(defaulted.points_to_redeem, 60);
        assert_eq!(defaulted.discount, 30.0);
        assert_eq!(defaulted.remaining_balance, 0);

        let clamped = cfg.redemption_quote(300, Some(500), 50.0);
        assert_eq!(clamped.points_to_redeem, 100);
        assert_eq!(clamped.max_redeemable, 100);
        assert_eq!(clamped.remaining_balance, 200);

        let modest = cfg.redemption_quote(300, Some(20), 50.0);
        assert_eq!(modest.points_to_redeem, 20);
        assert_eq!(modest.discount, 10.0);
    }

    proptest! {
        #[test]
        fn earn_is_monotonic_in_order_amount(a in 0.0f64..1_000_000.0, b in 0.0f64..1_000_000.0) {
            let cfg = config();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(cfg.points_to_earn(lo) <= cfg.points_to_earn(hi));
        }

        #[test]
        fn discount_ignores_the_sub_bucket_remainder(points in 10i64..1_000_000) {
            let cfg = config();
            let bucketed = points - points % 10;
            prop_assert_eq!(
                cfg.discount_from_points(points),
                cfg.discount_from_points(bucketed.max(10))
            );
        }

        #[test]
        fn below_minimum_redemptions_are_worth_nothing(points in i64::MIN..10) {
            prop_assert_eq!(config().discount_from_points(points), 0.0);
        }

        #[test]
        fn max_redeemable_never_exceeds_balance(
            balance in 0i64..1_000_000,
            total in 0.0f64..1_000_000.0,
        ) {
            prop_assert!(config().max_redeemable_points(balance, total) <= balance);
        }
    }
}
