//! Order-level discount composition.

use crumbs_types::round_to_paise;
use serde::{Deserialize, Serialize};

/// The two independent discounts an order can carry.
///
/// Promo and loyalty discounts are additive; the only interaction rule is
/// the final clamp to a non-negative total. Both fields are written once at
/// order creation and copied immutably onto the order record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountBreakdown {
    pub promo_discount: f64,
    pub points_discount: f64,
}

impl DiscountBreakdown {
    /// No discounts at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Combined discount across both sources.
    pub fn total(&self) -> f64 {
        self.promo_discount + self.points_discount
    }

    /// The final total after both discounts, clamped to zero and rounded
    /// to the paise.
    pub fn apply(&self, order_total: f64) -> f64 {
        round_to_paise((order_total - self.total()).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discounts_are_additive() {
        let breakdown = DiscountBreakdown {
            promo_discount: 100.0,
            points_discount: 30.0,
        };
        assert_eq!(breakdown.total(), 130.0);
        assert_eq!(breakdown.apply(1000.0), 870.0);
    }

    #[test]
    fn final_total_never_goes_negative() {
        let breakdown = DiscountBreakdown {
            promo_discount: 90.0,
            points_discount: 30.0,
        };
        assert_eq!(breakdown.apply(100.0), 0.0);
    }

    #[test]
    fn either_discount_may_be_absent() {
        let promo_only = DiscountBreakdown {
            promo_discount: 50.0,
            points_discount: 0.0,
        };
        assert_eq!(promo_only.apply(200.0), 150.0);

        assert_eq!(DiscountBreakdown::none().apply(200.0), 200.0);
    }
}
