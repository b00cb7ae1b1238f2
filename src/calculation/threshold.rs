//! Whole-amount threshold fee evaluation.
//!
//! Some categories charge one rate on the entire sale, chosen by which
//! bracket the sale falls into, instead of marginal slabs. Athletic shoes
//! are the usual example: sales of $150 or more pay a lower rate on the
//! whole amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::ThresholdBand;

/// The result of applying a threshold schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdFee {
    /// `amount * rate` (unrounded).
    pub fee: Decimal,
    /// The lower bound of the selected bracket.
    pub threshold: Decimal,
    /// The rate of the selected bracket.
    pub rate: Decimal,
    /// False when no bracket matched and the lowest one was used.
    pub matched: bool,
}

/// Applies a threshold schedule to `amount`.
///
/// Brackets are considered from the highest threshold down; the first one
/// the amount meets or exceeds supplies the rate for the whole amount. An
/// amount exactly at a threshold gets that bracket's rate. If no bracket
/// matches (only possible for amounts below the catch-all), the
/// lowest-threshold bracket is used.
///
/// # Panics
///
/// Panics if `brackets` is empty.
///
/// # Examples
///
/// ```
/// use fee_engine::calculation::apply_threshold;
/// use fee_engine::config::ThresholdBand;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let brackets = [
///     ThresholdBand::new(Decimal::from(150), Decimal::from_str("0.08").unwrap()),
///     ThresholdBand::new(Decimal::ZERO, Decimal::from_str("0.136").unwrap()),
/// ];
/// let result = apply_threshold(Decimal::from(150), &brackets);
/// assert_eq!(result.rate, Decimal::from_str("0.08").unwrap());
/// assert_eq!(result.fee, Decimal::from(12));
/// ```
pub fn apply_threshold(amount: Decimal, brackets: &[ThresholdBand]) -> ThresholdFee {
    assert!(!brackets.is_empty(), "threshold schedule must define at least one bracket");

    let mut descending: Vec<&ThresholdBand> = brackets.iter().collect();
    descending.sort_by(|a, b| b.threshold.cmp(&a.threshold));

    let (bracket, matched) = match descending.iter().find(|b| amount >= b.threshold) {
        Some(bracket) => (*bracket, true),
        None => (descending[descending.len() - 1], false),
    };

    let fee = amount * bracket.rate;
    trace!(
        amount = %amount,
        threshold = %bracket.threshold,
        rate = %bracket.rate,
        matched,
        "Selected threshold bracket"
    );

    ThresholdFee {
        fee,
        threshold: bracket.threshold,
        rate: bracket.rate,
        matched,
    }
}
