//! Money rounding and effective rate formatting.
//!
//! All reported figures are rounded to cents on exact decimal values with
//! banker's rounding (half to even): `19.635` reports as `19.64` and
//! `190.365` as `190.36`. Gross, fees and net are each rounded on their own,
//! so `net + fees` may differ from `gross` by a cent.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

/// Number of decimal places reported for money and percentages.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Effective rate reported when gross is zero.
pub const ZERO_GROSS_EFFECTIVE_RATE: &str = "0.00%";

/// Rounds an amount to cents, half to even, always carrying two fractional
/// digits.
///
/// # Examples
///
/// ```
/// use fee_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("19.635").unwrap()).to_string(), "19.64");
/// assert_eq!(round_money(Decimal::from_str("190.365").unwrap()).to_string(), "190.36");
/// assert_eq!(round_money(Decimal::from(210)).to_string(), "210.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}

/// Formats `total_fee / gross` as a percentage with two decimals.
///
/// A zero gross has no defined rate; `"0.00%"` is returned instead of
/// dividing by zero.
///
/// # Examples
///
/// ```
/// use fee_engine::calculation::format_effective_rate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let fee = Decimal::from_str("19.635").unwrap();
/// assert_eq!(format_effective_rate(fee, Decimal::from(210)), "9.35%");
/// assert_eq!(format_effective_rate(Decimal::ZERO, Decimal::ZERO), "0.00%");
/// ```
pub fn format_effective_rate(total_fee: Decimal, gross: Decimal) -> String {
    if gross.is_zero() {
        debug!(total_fee = %total_fee, "Gross is zero, reporting effective rate as 0.00%");
        return ZERO_GROSS_EFFECTIVE_RATE.to_string();
    }

    let percent = round_money(total_fee / gross * Decimal::ONE_HUNDRED);
    format!("{}%", percent)
}
