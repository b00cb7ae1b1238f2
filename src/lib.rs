//! Marketplace Fee Engine
//!
//! This crate calculates marketplace final value fees for a sale: it looks
//! up the category's published fee schedule, applies either a graduated
//! (tiered) or a whole-amount threshold rate, adds the international
//! surcharge, and reports gross, fees, net and the effective rate.
//!
//! # Example
//!
//! ```
//! use fee_engine::calculation::calculate_fee;
//! use fee_engine::config::RuleTable;
//! use fee_engine::models::FeeRequest;
//! use rust_decimal::Decimal;
//!
//! let request = FeeRequest::new(true, "electronics", Decimal::from(200))
//!     .with_shipping(Decimal::from(10));
//! let result = calculate_fee(&request, RuleTable::builtin());
//! assert_eq!(result.effective_rate, "9.35%");
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
