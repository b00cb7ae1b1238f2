//! Fee result models.
//!
//! This module contains the [`FeeResult`] type returned by every calculation
//! and its supporting structures: the per-component [`FeeBreakdown`], and
//! the compact [`FeeSummary`] the CLI prints one per line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ScheduleMode;

use super::AuditTrace;

/// The components that make up the total fee.
///
/// Amounts are rounded to cents for reporting; the total on [`FeeResult`]
/// is rounded from the unrounded sum, so the components may differ from it
/// by a cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Which evaluator produced the final value fee.
    pub mode: ScheduleMode,
    /// The marketplace commission from the category schedule.
    pub final_value_fee: Decimal,
    /// The cross-border surcharge (zero for domestic sales).
    pub international_fee: Decimal,
    /// True when the requested category was unknown and `"most"` was used.
    pub fell_back_to_default: bool,
}

/// The result of one fee calculation.
///
/// `gross`, `fees` and `net` are each rounded half to even to two decimal
/// places from the exact amounts, so `net + fees` can miss `gross` by a
/// cent.
///
/// # Example
///
/// ```
/// use fee_engine::calculation::calculate_fee_builtin;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_fee_builtin(
///     true,
///     "electronics",
///     Decimal::from(200),
///     Decimal::from(10),
///     false,
/// );
/// assert_eq!(result.gross, Decimal::from_str("210.00").unwrap());
/// assert_eq!(result.fees, Decimal::from_str("19.64").unwrap());
/// assert_eq!(result.net, Decimal::from_str("190.36").unwrap());
/// assert_eq!(result.effective_rate, "9.35%");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeResult {
    /// The category actually priced (after any fallback to `"most"`).
    pub category: String,
    /// Whether store rates were applied.
    pub is_store: bool,
    /// Price plus shipping.
    pub gross: Decimal,
    /// Total fee charged.
    pub fees: Decimal,
    /// What the seller keeps: gross minus fees.
    pub net: Decimal,
    /// Fees as a percentage of gross, e.g. `"9.35%"`.
    pub effective_rate: String,
    /// The components of the total fee.
    pub breakdown: FeeBreakdown,
    /// Decisions made during the calculation.
    pub audit_trace: AuditTrace,
}

impl FeeResult {
    /// Returns the headline figures without the breakdown or audit trail.
    pub fn summary(&self) -> FeeSummary {
        FeeSummary {
            category: self.category.clone(),
            is_store: self.is_store,
            gross: self.gross,
            fees: self.fees,
            net: self.net,
            effective_rate: self.effective_rate.clone(),
        }
    }
}

/// The headline figures of a [`FeeResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSummary {
    /// The category actually priced.
    pub category: String,
    /// Whether store rates were applied.
    pub is_store: bool,
    /// Price plus shipping.
    pub gross: Decimal,
    /// Total fee charged.
    pub fees: Decimal,
    /// Gross minus fees.
    pub net: Decimal,
    /// Fees as a percentage of gross.
    pub effective_rate: String,
}
