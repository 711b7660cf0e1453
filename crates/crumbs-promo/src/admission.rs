//! Creation-time admission rules for new promo codes.
//!
//! The admin surface collects a [`NewPromoCode`] form; [`admit`] normalizes
//! and validates it into a storable [`PromoCode`]. Evaluation-time rules
//! live in [`evaluate`](crate::evaluate) and are deliberately separate.

use chrono::{DateTime, Utc};
use crumbs_types::{DiscountType, PromoCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MIN_CODE_LEN: usize = 3;
const MAX_CODE_LEN: usize = 20;

/// A proposed promo code, as entered in the admin form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewPromoCode {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub min_order_amount: Option<f64>,
    pub max_discount: Option<f64>,
    pub usage_limit: Option<u32>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Why a proposed code was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdmissionError {
    #[error("code must be between 3 and 20 characters")]
    CodeLength,

    #[error("discount value must be positive")]
    NonPositiveDiscount,

    #[error("percentage discount cannot exceed 100")]
    PercentageOverFull,

    #[error("{field} must be positive when set")]
    NonPositiveField { field: &'static str },
}

/// Validate a proposed code and normalize it to its stored form.
///
/// The code is trimmed and uppercased before the length check, so
/// `" save20 "` and `"SAVE20"` admit to the same stored code.
pub fn admit(proposal: NewPromoCode) -> Result<PromoCode, AdmissionError> {
    let code = crate::evaluate::normalize(&proposal.code);
    // Characters, not bytes: multibyte codes count once per character.
    let code_chars = code.chars().count();
    if code_chars < MIN_CODE_LEN || code_chars > MAX_CODE_LEN {
        return Err(AdmissionError::CodeLength);
    }

    if proposal.discount_value <= 0.0 {
        return Err(AdmissionError::NonPositiveDiscount);
    }
    if proposal.discount_type == DiscountType::Percentage && proposal.discount_value > 100.0 {
        return Err(AdmissionError::PercentageOverFull);
    }

    if matches!(proposal.min_order_amount, Some(v) if v <= 0.0) {
        return Err(AdmissionError::NonPositiveField {
            field: "min_order_amount",
        });
    }
    if matches!(proposal.max_discount, Some(v) if v <= 0.0) {
        return Err(AdmissionError::NonPositiveField {
            field: "max_discount",
        });
    }
    if proposal.usage_limit == Some(0) {
        return Err(AdmissionError::NonPositiveField {
            field: "usage_limit",
        });
    }

    Ok(PromoCode {
        code,
        description: proposal.description,
        discount_type: proposal.discount_type,
        discount_value: proposal.discount_value,
        min_order_amount: proposal.min_order_amount,
        max_discount: proposal.max_discount,
        usage_limit: proposal.usage_limit,
        used_count: 0,
        is_active: proposal.is_active,
        expires_at: proposal.expires_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(code: &str) -> NewPromoCode {
        NewPromoCode {
            code: code.into(),
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: 20.0,
            min_order_amount: None,
            max_discount: None,
            usage_limit: None,
            is_active: true,
            expires_at: None,
        }
    }

    #[test]
    fn admitted_codes_are_stored_uppercase() {
        let promo = admit(proposal("  save20 ")).unwrap();
        assert_eq!(promo.code, "SAVE20");
        assert_eq!(promo.used_count, 0);
    }

    #[test]
    fn code_length_is_checked_after_normalization() {
        assert_eq!(admit(proposal(" ab ")).unwrap_err(), AdmissionError::CodeLength);
        assert_eq!(
            admit(proposal("THISCODEISMUCHTOOLONGTOSTORE")).unwrap_err(),
            AdmissionError::CodeLength
        );
        assert!(admit(proposal("ABC")).is_ok());
    }

    #[test]
    fn code_length_counts_characters_not_bytes() {
        // Two characters, four bytes: still too short.
        assert_eq!(admit(proposal("éä")).unwrap_err(), AdmissionError::CodeLength);
        // Three characters, six bytes: long enough.
        assert!(admit(proposal("éäö")).is_ok());
    }

    #[test]
    fn discount_value_must_be_positive() {
        let mut p = proposal("SAVE20");
        p.discount_value = 0.0;
        assert_eq!(admit(p).unwrap_err(), AdmissionError::NonPositiveDiscount);
    }

    #[test]
    fn percentages_above_full_price_are_refused() {
        let mut p = proposal("SAVE200");
        p.discount_value = 120.0;
        assert_eq!(admit(p.clone()).unwrap_err(), AdmissionError::PercentageOverFull);

        // A fixed amount over 100 is fine.
        p.discount_type = DiscountType::FixedAmount;
        assert!(admit(p).is_ok());
    }

    #[test]
    fn optional_bounds_must_be_positive_when_set() {
        let mut p = proposal("SAVE20");
        p.min_order_amount = Some(0.0);
        assert!(matches!(
            admit(p).unwrap_err(),
            AdmissionError::NonPositiveField {
                field: "min_order_amount"
            }
        ));

        let mut p = proposal("SAVE20");
        p.usage_limit = Some(0);
        assert!(matches!(
            admit(p).unwrap_err(),
            AdmissionError::NonPositiveField { field: "usage_limit" }
        ));
    }
}
