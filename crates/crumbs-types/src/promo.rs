//! Stored promo code discount rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a promo code's discount is computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// `discount_value` percent of the order total.
    Percentage,
    /// A flat `discount_value` off the order total.
    FixedAmount,
}

/// A stored discount rule keyed by a unique code string.
///
/// Codes are case-insensitive on input but stored uppercase; lookups are
/// exact-match on the stored form. Normalization happens at creation and
/// validation-input time, never inside the evaluator. When `usage_limit` is
/// set, `used_count <= usage_limit` holds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromoCode {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    /// Positive; at most 100 when `discount_type` is `Percentage`.
    pub discount_value: f64,
    /// Order totals below this are rejected.
    pub min_order_amount: Option<f64>,
    /// Cap on the computed discount; meaningful only for `Percentage`.
    pub max_discount: Option<f64>,
    /// Total number of successful redemptions allowed.
    pub usage_limit: Option<u32>,
    /// Incremented on each successful redemption.
    pub used_count: u32,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl PromoCode {
    /// Whether the code has expired as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expiry) if expiry < now)
    }

    /// Whether the usage limit has been reached.
    pub fn usage_exhausted(&self) -> bool {
        matches!(self.usage_limit, Some(limit) if self.used_count >= limit)
    }
}
