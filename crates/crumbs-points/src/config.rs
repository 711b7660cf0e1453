use serde::{Deserialize, Serialize};

/// Earn and redemption rates for the loyalty program.
///
/// The defaults are the shop's published program: every ₹100 spent earns 10
/// points, every 10 points redeem for ₹5, and redemptions below 10 points
/// are refused. Operators tune the rates here; the arithmetic in
/// [`calculator`](crate::calculator) never hardcodes them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointsConfig {
    /// Points earned per ₹100 of order value.
    pub points_per_100: i64,
    /// Rupee discount granted per 10 points redeemed.
    pub rupees_per_10_points: f64,
    /// Smallest redemption the program accepts.
    pub min_redeem_points: i64,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            points_per_100: 10,
            rupees_per_10_points: 5.0,
            min_redeem_points: 10,
        }
    }
}
