//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done on `Decimal`; values are converted to `f64`
//! (rounded to cents) only when written into records or responses.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Highest discount a mission may grant (whole percent)
pub const MAX_DISCOUNT_PERCENT: u8 = 99;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to cents
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// `subtotal × (100 − percent) / 100`, rounded to cents
///
/// `percent` above [`MAX_DISCOUNT_PERCENT`] is clamped so a total never
/// reaches zero through a discount.
pub fn apply_discount(subtotal: Decimal, percent: u8) -> Decimal {
    let percent = Decimal::from(percent.min(MAX_DISCOUNT_PERCENT));
    round_money(subtotal * (Decimal::ONE_HUNDRED - percent) / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_discount_to_the_cent() {
        assert_eq!(apply_discount(Decimal::from(484), 15), Decimal::new(41140, 2));
        assert_eq!(apply_discount(Decimal::from(484), 0), Decimal::from(484));
        assert_eq!(apply_discount(Decimal::new(1999, 2), 10), Decimal::new(1799, 2));
    }

    #[test]
    fn test_apply_discount_rounds_half_away_from_zero() {
        // 0.25 * 0.90 = 0.225 -> 0.23
        assert_eq!(apply_discount(Decimal::new(25, 2), 10), Decimal::new(23, 2));
    }

    #[test]
    fn test_apply_discount_clamps_percent() {
        assert_eq!(apply_discount(Decimal::from(100), 150), Decimal::from(1));
    }

    #[test]
    fn test_f64_roundtrip() {
        assert_eq!(to_f64(Decimal::new(41140, 2)), 411.40);
        assert_eq!(to_f64(to_decimal(0.1) + to_decimal(0.2)), 0.3);
    }
}
