//! Rule table types for fee calculation.
//!
//! This module contains the strongly-typed fee schedule structures. They are
//! either built in code (see [`RuleTable::builtin`]) or deserialized from a
//! YAML rule file by the [`ConfigLoader`](super::ConfigLoader).

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::validation::validate_schedule;

/// The category used when a requested category is not in the table.
pub const DEFAULT_CATEGORY: &str = "most";

/// How a schedule turns an amount into a final value fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMode {
    /// Successive slices of the amount are charged at successive rates.
    Tiered,
    /// One rate, chosen by the bracket the whole amount falls into.
    Threshold,
}

impl fmt::Display for ScheduleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleMode::Tiered => write!(f, "tiered"),
            ScheduleMode::Threshold => write!(f, "threshold"),
        }
    }
}

/// One band of a graduated schedule.
///
/// `cap` is the cumulative upper bound of the slab, not its width. The
/// final band of every tiered schedule has no cap and takes whatever
/// amount remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBand {
    /// Cumulative upper bound of this slab, or `None` for the uncapped remainder.
    #[serde(default)]
    pub cap: Option<Decimal>,
    /// Fee rate applied to the slice, as a fraction (0.0935 = 9.35%).
    pub rate: Decimal,
}

impl TierBand {
    /// Creates a slab ending at the cumulative `cap`.
    pub fn capped(cap: Decimal, rate: Decimal) -> Self {
        Self {
            cap: Some(cap),
            rate,
        }
    }

    /// Creates the terminal slab that takes the remaining amount.
    pub fn uncapped(rate: Decimal) -> Self {
        Self { cap: None, rate }
    }
}

/// One bracket of a threshold schedule.
///
/// The bracket applies when the whole amount is greater than or equal to
/// `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdBand {
    /// Inclusive lower bound of the bracket.
    pub threshold: Decimal,
    /// Fee rate applied to the whole amount, as a fraction.
    pub rate: Decimal,
}

impl ThresholdBand {
    /// Creates a bracket starting at `threshold`.
    pub fn new(threshold: Decimal, rate: Decimal) -> Self {
        Self { threshold, rate }
    }
}

/// The store and non-store rules of a category, tagged by mode.
///
/// Deserializes from the `mode` field of a rule file entry:
///
/// ```
/// use fee_engine::config::{ScheduleMode, ScheduleRules};
///
/// let rules: ScheduleRules = serde_yaml::from_str(
///     r#"
/// mode: threshold
/// store: [{ threshold: "150", rate: "0.07" }, { threshold: "0", rate: "0.127" }]
/// non_store: [{ threshold: "150", rate: "0.08" }, { threshold: "0", rate: "0.136" }]
/// "#,
/// )
/// .unwrap();
/// assert_eq!(rules.mode(), ScheduleMode::Threshold);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScheduleRules {
    /// Graduated schedule.
    Tiered {
        /// Bands for store subscribers.
        store: Vec<TierBand>,
        /// Bands for sellers without a store.
        non_store: Vec<TierBand>,
    },
    /// Whole-amount threshold schedule.
    Threshold {
        /// Brackets for store subscribers.
        store: Vec<ThresholdBand>,
        /// Brackets for sellers without a store.
        non_store: Vec<ThresholdBand>,
    },
}

impl ScheduleRules {
    /// Returns the evaluator kind for these rules.
    pub fn mode(&self) -> ScheduleMode {
        match self {
            ScheduleRules::Tiered { .. } => ScheduleMode::Tiered,
            ScheduleRules::Threshold { .. } => ScheduleMode::Threshold,
        }
    }
}

/// A category's complete pricing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// The category key, unique within a rule table.
    pub category: String,
    /// The store and non-store rules.
    pub rules: ScheduleRules,
}

impl FeeSchedule {
    /// Creates a schedule for `category`.
    pub fn new(category: impl Into<String>, rules: ScheduleRules) -> Self {
        Self {
            category: category.into(),
            rules,
        }
    }

    /// Returns the evaluator kind for this schedule.
    pub fn mode(&self) -> ScheduleMode {
        self.rules.mode()
    }
}

/// Identifies the published fee schedule a table reproduces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTableMetadata {
    /// Marketplace identifier (e.g., "ebay_us").
    pub marketplace: String,
    /// The date the published fee schedule took effect.
    pub version: NaiveDate,
    /// URL of the marketplace's fee documentation.
    pub source_url: String,
}

/// On-disk shape of a rule file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RuleTableFile {
    pub marketplace: String,
    pub version: NaiveDate,
    pub source_url: String,
    pub categories: BTreeMap<String, ScheduleRules>,
}

impl RuleTableFile {
    pub(crate) fn into_table(self) -> EngineResult<RuleTable> {
        let metadata = FeeTableMetadata {
            marketplace: self.marketplace,
            version: self.version,
            source_url: self.source_url,
        };
        let schedules = self
            .categories
            .into_iter()
            .map(|(category, rules)| FeeSchedule::new(category, rules));
        RuleTable::new(metadata, schedules)
    }
}

/// An immutable, validated mapping from category key to fee schedule.
///
/// Every schedule is checked against the tier/threshold invariants when the
/// table is built, and the `"most"` fallback is guaranteed to be present.
/// A table is never mutated after construction and can be shared freely
/// between threads.
#[derive(Debug, Clone)]
pub struct RuleTable {
    metadata: FeeTableMetadata,
    schedules: BTreeMap<String, FeeSchedule>,
}

impl RuleTable {
    /// Builds a rule table, validating every schedule.
    ///
    /// # Returns
    ///
    /// Returns the table, or an error if:
    /// - Any schedule is malformed (`MalformedSchedule`)
    /// - Two schedules share a category key (`MalformedSchedule`)
    /// - No `"most"` schedule is present (`MissingDefaultSchedule`)
    pub fn new(
        metadata: FeeTableMetadata,
        schedules: impl IntoIterator<Item = FeeSchedule>,
    ) -> EngineResult<Self> {
        let mut by_category = BTreeMap::new();

        for schedule in schedules {
            validate_schedule(&schedule)?;
            if by_category.contains_key(&schedule.category) {
                return Err(EngineError::MalformedSchedule {
                    category: schedule.category,
                    message: "category is defined more than once".to_string(),
                });
            }
            by_category.insert(schedule.category.clone(), schedule);
        }

        if !by_category.contains_key(DEFAULT_CATEGORY) {
            return Err(EngineError::MissingDefaultSchedule);
        }

        Ok(Self {
            metadata,
            schedules: by_category,
        })
    }

    /// Returns the table metadata.
    pub fn metadata(&self) -> &FeeTableMetadata {
        &self.metadata
    }

    /// Looks up a category without falling back.
    pub fn get(&self, category: &str) -> Option<&FeeSchedule> {
        self.schedules.get(category)
    }

    /// Returns true if the table defines `category`.
    pub fn contains(&self, category: &str) -> bool {
        self.schedules.contains_key(category)
    }

    /// Returns the `"most"` fallback schedule.
    pub fn default_schedule(&self) -> &FeeSchedule {
        self.schedules
            .get(DEFAULT_CATEGORY)
            .expect("rule table always holds the default schedule")
    }

    /// Looks up a category, substituting the `"most"` schedule when it is
    /// unknown.
    ///
    /// The second element is `true` when the fallback was used.
    pub fn resolve(&self, category: &str) -> (&FeeSchedule, bool) {
        match self.schedules.get(category) {
            Some(schedule) => (schedule, false),
            None => (self.default_schedule(), true),
        }
    }

    /// Iterates over the category keys in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.schedules.keys().map(String::as_str)
    }

    /// Iterates over all schedules in category order.
    pub fn schedules(&self) -> impl Iterator<Item = &FeeSchedule> {
        self.schedules.values()
    }

    /// Returns the number of categories in the table.
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    /// Always false: a valid table holds at least the default schedule.
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}
