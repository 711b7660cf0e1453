//! Currency rounding.
//!
//! Order amounts and discounts are rupee values carried as `f64`; the only
//! normalization this core applies is rounding to the minor unit (paise)
//! wherever a discount crosses an API boundary.

/// Round to two decimal places, half away from zero.
///
/// For the non-negative amounts this core deals in, this is currency
/// half-up rounding.
pub fn round_to_paise(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
