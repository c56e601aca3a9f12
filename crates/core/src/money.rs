//! Monetary amount helpers
//!
//! Balances and amounts are INR values with two-decimal precision. Every
//! arithmetic step re-rounds so float drift never becomes observable.

use crate::error::{Error, Result};

/// Round to two decimal places (paise precision).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Validate a transaction amount before any lookup.
///
/// Accepts positive, finite values carrying at most two decimal places;
/// returns the normalized amount.
pub fn validate_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() {
        return Err(Error::AmountInvalid("amount must be a number".into()));
    }
    if amount <= 0.0 {
        return Err(Error::AmountInvalid(
            "amount must be greater than 0".into(),
        ));
    }
    let rounded = round2(amount);
    if (rounded - amount).abs() > f64::EPSILON * amount.abs() {
        return Err(Error::AmountInvalid(
            "amount cannot have more than two decimal places".into(),
        ));
    }
    Ok(rounded)
}
