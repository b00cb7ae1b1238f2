//! Fee rule tables for the fee engine.
//!
//! This module holds the category → schedule mapping the calculator reads:
//! the typed schedule model, the built-in marketplace table, the invariant
//! checks every table passes at construction, and a YAML loader for
//! alternative tables.
//!
//! # Example
//!
//! ```no_run
//! use fee_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/ebay_us").unwrap();
//! println!("Loaded table for: {}", loader.table().metadata().marketplace);
//! ```

mod builtin;
mod loader;
mod types;
mod validation;

pub use builtin::BUILTIN_SOURCE_URL;
pub use loader::{ConfigLoader, RULES_FILE_NAME};
pub use types::{
    DEFAULT_CATEGORY, FeeSchedule, FeeTableMetadata, RuleTable, ScheduleMode, ScheduleRules,
    ThresholdBand, TierBand,
};
pub use validation::validate_schedule;
