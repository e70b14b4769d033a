//! Shared numeric helpers for cost calculations.
//!
//! Money and quantity values use [`Decimal`] throughout. Absent values are
//! modeled as `Option`; the input surface never produces NaN, and missing
//! operands are coerced to zero at the point of use.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding (away from zero at the midpoint).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paddy_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Maps an absent value to zero.
///
/// This is the permissive coercion rule of the input surface: blank or
/// unparseable numeric input becomes "no value", and no value counts as
/// zero in every formula.
pub fn coerce(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

/// Divides `amount` by an optional divisor, rounding to two decimal places.
///
/// Returns `None` when the divisor is absent. Callers pass divisors that
/// have already been filtered to positive values, so this is the single
/// place where an "unavailable" metric is produced.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paddy_core::calculations::common::per_unit;
///
/// assert_eq!(per_unit(dec!(500), Some(dec!(10))), Some(dec!(50.00)));
/// assert_eq!(per_unit(dec!(500), None), None);
/// ```
pub fn per_unit(
    amount: Decimal,
    divisor: Option<Decimal>,
) -> Option<Decimal> {
    divisor.map(|d| round_half_up(amount / d))
}
