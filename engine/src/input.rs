//! Amount input validation.
//!
//! Sanitizes the raw amount string an embedding surface hands us before
//! it ever reaches the conversion math. An empty field is a valid zero
//! (nothing to quote yet), not an error.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Largest accepted amount, in stablecoin units.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Smallest viable amount, in stablecoin units.
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Reasons an amount string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Please enter a valid number")]
    NotANumber,
    #[error("Amount cannot be negative")]
    Negative,
    #[error("Maximum: {max} per transfer")]
    TooLarge { max: Decimal },
}

/// Validate and sanitize a raw amount string. Accepted values are capped
/// at two decimal places (the smallest representable stablecoin unit).
pub fn validate_amount(raw: &str) -> Result<Decimal, AmountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let value: Decimal = trimmed.parse().map_err(|_| AmountError::NotANumber)?;

    if value < Decimal::ZERO {
        return Err(AmountError::Negative);
    }
    if value > MAX_AMOUNT {
        return Err(AmountError::TooLarge { max: MAX_AMOUNT });
    }

    Ok(value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(validate_amount(""), Ok(Decimal::ZERO));
        assert_eq!(validate_amount("   "), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(validate_amount("abc"), Err(AmountError::NotANumber));
        assert_eq!(validate_amount("1.2.3"), Err(AmountError::NotANumber));
    }

    #[test]
    fn test_rejects_negative() {
        assert_eq!(validate_amount("-5"), Err(AmountError::Negative));
    }

    #[test]
    fn test_rejects_over_cap() {
        assert_eq!(
            validate_amount("1000000.01"),
            Err(AmountError::TooLarge { max: dec!(1000000) })
        );
        assert_eq!(validate_amount("1000000"), Ok(dec!(1000000)));
    }

    #[test]
    fn test_rounds_to_stablecoin_cent() {
        assert_eq!(validate_amount("10.005"), Ok(dec!(10.01)));
        assert_eq!(validate_amount("10.004"), Ok(dec!(10.00)));
    }
}
