//! The order record produced by checkout.

use chrono::{DateTime, Utc};
use crumbs_types::CustomerId;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the order reaches the customer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMethod {
    Pickup,
    Delivery,
}

/// A placed order, as this core persists it.
///
/// The pricing and discount fields (`promo_discount`, `points_redeemed`,
/// `points_discount`, `total`) are written once at creation and never
/// change afterwards; refunds and status transitions belong to the wider
/// shop, not this core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_number: String,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_email: String,
    pub delivery_method: DeliveryMethod,
    pub subtotal: f64,
    pub tax: f64,
    pub delivery_fee: f64,
    /// Stored uppercase form of the applied promo code, if any.
    pub promo_code: Option<String>,
    pub promo_discount: f64,
    pub points_redeemed: i64,
    pub points_discount: f64,
    /// Amount actually charged.
    pub total: f64,
    pub payment_ref: String,
    pub placed_at: DateTime<Utc>,
}

/// Mint a human-readable order number: `ORD-<millis>-<9 random chars>`.
pub fn new_order_number() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect();
    format!("ORD-{}-{}", Utc::now().timestamp_millis(), suffix)
}
