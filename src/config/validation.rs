//! Structural checks for fee schedules.
//!
//! A schedule that breaks these rules would price sales silently wrong, so
//! it is rejected when the rule table is built.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{FeeSchedule, ScheduleRules, ThresholdBand, TierBand};

/// Validates both the store and non-store rules of a schedule.
///
/// Tiered rules must be non-empty, end with exactly one uncapped band and
/// have positive, strictly increasing caps before it. Threshold rules must be
/// non-empty, have distinct thresholds and include a catch-all threshold of
/// zero or lower. Every rate must lie in `[0, 1]`.
pub fn validate_schedule(schedule: &FeeSchedule) -> EngineResult<()> {
    let malformed = |variant: &str, message: String| EngineError::MalformedSchedule {
        category: schedule.category.clone(),
        message: format!("{variant} rules: {message}"),
    };

    match &schedule.rules {
        ScheduleRules::Tiered { store, non_store } => {
            check_tiers(store).map_err(|m| malformed("store", m))?;
            check_tiers(non_store).map_err(|m| malformed("non_store", m))?;
        }
        ScheduleRules::Threshold { store, non_store } => {
            check_thresholds(store).map_err(|m| malformed("store", m))?;
            check_thresholds(non_store).map_err(|m| malformed("non_store", m))?;
        }
    }

    Ok(())
}

fn check_rate(rate: Decimal) -> Result<(), String> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(format!("rate {} is outside [0, 1]", rate));
    }
    Ok(())
}

fn check_tiers(tiers: &[TierBand]) -> Result<(), String> {
    let Some((last, capped)) = tiers.split_last() else {
        return Err("no tiers defined".to_string());
    };

    if last.cap.is_some() {
        return Err("last tier must be uncapped".to_string());
    }

    let mut previous: Option<Decimal> = None;
    for band in capped {
        let Some(cap) = band.cap else {
            return Err("only the last tier may be uncapped".to_string());
        };
        if cap <= Decimal::ZERO {
            return Err(format!("tier cap {} must be positive", cap));
        }
        if previous.is_some_and(|p| cap <= p) {
            return Err(format!("tier caps must strictly increase (cap {})", cap));
        }
        check_rate(band.rate)?;
        previous = Some(cap);
    }

    check_rate(last.rate)
}

fn check_thresholds(brackets: &[ThresholdBand]) -> Result<(), String> {
    if brackets.is_empty() {
        return Err("no thresholds defined".to_string());
    }

    for (i, bracket) in brackets.iter().enumerate() {
        check_rate(bracket.rate)?;
        if brackets[..i].iter().any(|b| b.threshold == bracket.threshold) {
            return Err(format!("threshold {} is defined more than once", bracket.threshold));
        }
    }

    if !brackets.iter().any(|b| b.threshold <= Decimal::ZERO) {
        return Err("a catch-all threshold of 0 or lower is required".to_string());
    }

    Ok(())
}
