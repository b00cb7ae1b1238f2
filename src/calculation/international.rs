//! International sale surcharge.

use rust_decimal::Decimal;

/// Surcharge on gross for cross-border sales: 1.65%.
pub const INTERNATIONAL_SURCHARGE: Decimal = Decimal::from_parts(165, 0, 0, false, 4);

/// Returns the international surcharge for a sale.
///
/// The surcharge is a flat share of gross, never tiered, and zero for
/// domestic sales.
///
/// # Examples
///
/// ```
/// use fee_engine::calculation::international_surcharge;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let fee = international_surcharge(Decimal::from(180), true);
/// assert_eq!(fee, Decimal::from_str("2.97").unwrap());
/// assert_eq!(international_surcharge(Decimal::from(180), false), Decimal::ZERO);
/// ```
pub fn international_surcharge(gross: Decimal, international: bool) -> Decimal {
    if international {
        gross * INTERNATIONAL_SURCHARGE
    } else {
        Decimal::ZERO
    }
}
