//! Graduated (tiered) fee evaluation.
//!
//! A tiered schedule charges successive slices of the amount at successive
//! rates, like a marginal tax ladder. Each band's cap is the cumulative
//! upper bound of its slice, and the final band takes whatever remains.
//!
//! ## Example
//!
//! Watches, store seller, $6,020 gross:
//! - $0 – $1,000 at 12.5% = $125.00
//! - $1,000 – $5,000 at 4% = $160.00
//! - remaining $1,020 at 3% = $30.60

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::TierBand;

/// One non-empty slice of the amount and the fee charged on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slab {
    /// Where this slice starts within the amount.
    pub lower: Decimal,
    /// How much of the amount falls in this slice.
    pub width: Decimal,
    /// The rate charged on the slice.
    pub rate: Decimal,
    /// `width * rate`.
    pub fee: Decimal,
}

/// The result of applying a tiered schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredFee {
    /// The blended fee across all slabs (unrounded).
    pub fee: Decimal,
    /// The slices consumed, in tier order. Empty for a zero amount.
    pub slabs: Vec<Slab>,
}

impl TieredFee {
    /// Total amount consumed by the slabs.
    pub fn covered(&self) -> Decimal {
        self.slabs.iter().map(|s| s.width).sum()
    }
}

/// Applies a graduated schedule to `amount`.
///
/// Walks the bands in order, charging each slice `min(remaining, cap -
/// previous cap)` at the band's rate and the uncapped band the remainder,
/// stopping once nothing remains. A cap of zero never becomes the previous
/// cap. Non-positive amounts produce no slabs and a zero fee.
///
/// # Panics
///
/// Panics if `tiers` is empty or does not end with an uncapped band. Rule
/// tables reject such schedules at construction.
///
/// # Examples
///
/// ```
/// use fee_engine::calculation::apply_tiers;
/// use fee_engine::config::TierBand;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tiers = [
///     TierBand::capped(Decimal::from(2500), Decimal::from_str("0.0935").unwrap()),
///     TierBand::uncapped(Decimal::from_str("0.0235").unwrap()),
/// ];
/// let result = apply_tiers(Decimal::from(210), &tiers);
/// assert_eq!(result.fee, Decimal::from_str("19.635").unwrap());
/// assert_eq!(result.slabs.len(), 1);
/// ```
pub fn apply_tiers(amount: Decimal, tiers: &[TierBand]) -> TieredFee {
    assert!(
        tiers.last().is_some_and(|band| band.cap.is_none()),
        "tiered schedule must end with an uncapped tier"
    );

    let mut fee = Decimal::ZERO;
    let mut remaining = amount;
    let mut last_cap = Decimal::ZERO;
    let mut slabs = Vec::new();

    for band in tiers {
        let width = match band.cap {
            None => remaining,
            Some(cap) => remaining.min(cap - last_cap),
        };

        if width > Decimal::ZERO {
            let slab_fee = width * band.rate;
            trace!(width = %width, rate = %band.rate, fee = %slab_fee, "Applied tier slab");
            slabs.push(Slab {
                lower: amount - remaining,
                width,
                rate: band.rate,
                fee: slab_fee,
            });
            fee += slab_fee;
            remaining -= width;
        }

        // A zero cap must not become the base for the next slab.
        if let Some(cap) = band.cap.filter(|cap| !cap.is_zero()) {
            last_cap = cap;
        }

        if remaining <= Decimal::ZERO {
            break;
        }
    }

    TieredFee { fee, slabs }
}
