//! Calculation logic for the fee engine.
//!
//! This module contains the graduated tier evaluator, the whole-amount
//! threshold evaluator, the international surcharge, money rounding, and
//! the calculator that combines them into a [`FeeResult`](crate::models::FeeResult).

mod fee;
mod international;
mod rounding;
mod threshold;
mod tiered;

pub use fee::{calculate_fee, calculate_fee_builtin};
pub use international::{INTERNATIONAL_SURCHARGE, international_surcharge};
pub use rounding::{MONEY_DECIMAL_PLACES, ZERO_GROSS_EFFECTIVE_RATE, format_effective_rate, round_money};
pub use threshold::{ThresholdFee, apply_threshold};
pub use tiered::{Slab, TieredFee, apply_tiers};
