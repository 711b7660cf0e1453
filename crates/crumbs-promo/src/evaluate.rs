//! Stateless promo code evaluation.

use chrono::{DateTime, Utc};
use crumbs_types::{round_to_paise, DiscountType, PromoCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a promo code was refused.
///
/// These are expected business outcomes, surfaced to the shopper verbatim;
/// they are not failures of the evaluator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PromoRejection {
    #[error("invalid promo code")]
    NotFound,

    #[error("this promo code is no longer active")]
    Inactive,

    #[error("this promo code has expired")]
    Expired,

    #[error("this promo code has reached its usage limit")]
    LimitReached,

    #[error("minimum order amount of ₹{minimum} required")]
    BelowMinimum { minimum: f64 },
}

/// A successful evaluation: the code and what it is worth on this order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromoQuote {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    /// The rupee discount actually granted: capped, clamped to the order
    /// total, rounded to the paise.
    pub discount: f64,
}

/// Normalize shopper input to the stored code form: trimmed, uppercase.
///
/// Applied at creation and validation-input time; [`evaluate`] itself never
/// alters case.
pub fn normalize(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Evaluate a fetched code against an order total.
///
/// Checks run in a fixed order and the first failure wins: existence,
/// active flag, expiry, usage limit, minimum order amount. `now` is passed
/// in rather than read from the system clock so expiry is testable.
pub fn evaluate(
    promo: Option<&PromoCode>,
    order_total: f64,
    now: DateTime<Utc>,
) -> Result<PromoQuote, PromoRejection> {
    let Some(promo) = promo else {
        return Err(PromoRejection::NotFound);
    };

    if !promo.is_active {
        return Err(PromoRejection::Inactive);
    }
    if promo.is_expired(now) {
        return Err(PromoRejection::Expired);
    }
    if promo.usage_exhausted() {
        return Err(PromoRejection::LimitReached);
    }
    if let Some(minimum) = promo.min_order_amount {
        if order_total < minimum {
            return Err(PromoRejection::BelowMinimum { minimum });
        }
    }

    let mut discount = match promo.discount_type {
        DiscountType::Percentage => {
            let raw = order_total * promo.discount_value / 100.0;
            match promo.max_discount {
                Some(cap) if raw > cap => cap,
                _ => raw,
            }
        }
        DiscountType::FixedAmount => promo.discount_value,
    };
    // A discount never exceeds the order it applies to.
    discount = discount.min(order_total);

    Ok(PromoQuote {
        code: promo.code.clone(),
        discount_type: promo.discount_type,
        discount_value: promo.discount_value,
        discount: round_to_paise(discount),
    })
}
