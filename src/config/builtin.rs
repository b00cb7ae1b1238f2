//! The built-in eBay US final value fee table.
//!
//! Rates are taken from the marketplace's published selling fees page and
//! cover the categories sellers most commonly list in; everything else is
//! priced with the `"most"` schedule. `config/ebay_us/fee_rules.yaml` holds
//! the same table as data.

use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{FeeSchedule, FeeTableMetadata, RuleTable, ScheduleRules, ThresholdBand, TierBand};

/// Fee documentation the built-in table reproduces.
pub const BUILTIN_SOURCE_URL: &str =
    "https://www.ebay.com/help/selling/fees-credits-invoices/selling-fees?id=4822";

static BUILTIN: LazyLock<RuleTable> = LazyLock::new(|| {
    builtin_table().unwrap_or_else(|err| panic!("built-in fee table is malformed: {err}"))
});

impl RuleTable {
    /// Returns the built-in fee table, constructing it on first use.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in table violates a schedule invariant.
    ///
    /// # Example
    ///
    /// ```
    /// use fee_engine::config::{RuleTable, ScheduleMode};
    ///
    /// let table = RuleTable::builtin();
    /// assert!(table.contains("most"));
    /// assert_eq!(table.get("athletic_shoes").unwrap().mode(), ScheduleMode::Threshold);
    /// ```
    pub fn builtin() -> &'static RuleTable {
        &BUILTIN
    }
}

fn rate(num: i64, scale: u32) -> Decimal {
    Decimal::new(num, scale)
}

fn capped(cap: i64, rate: Decimal) -> TierBand {
    TierBand::capped(Decimal::from(cap), rate)
}

fn at_least(threshold: i64, rate: Decimal) -> ThresholdBand {
    ThresholdBand::new(Decimal::from(threshold), rate)
}

fn tiered(category: &str, store: Vec<TierBand>, non_store: Vec<TierBand>) -> FeeSchedule {
    FeeSchedule::new(category, ScheduleRules::Tiered { store, non_store })
}

fn threshold(category: &str, store: Vec<ThresholdBand>, non_store: Vec<ThresholdBand>) -> FeeSchedule {
    FeeSchedule::new(category, ScheduleRules::Threshold { store, non_store })
}

/// Builds the standard two-slab schedule most categories use: a category
/// rate up to a cap, then 2.35% on the remainder.
fn standard(category: &str, store_rate: Decimal, non_store_rate: Decimal) -> FeeSchedule {
    let remainder = rate(235, 4);
    tiered(
        category,
        vec![capped(2500, store_rate), TierBand::uncapped(remainder)],
        vec![capped(7500, non_store_rate), TierBand::uncapped(remainder)],
    )
}

fn builtin_table() -> EngineResult<RuleTable> {
    let version = NaiveDate::from_ymd_opt(2025, 2, 14).ok_or_else(|| EngineError::ConfigParseError {
        path: "<builtin>".to_string(),
        message: "invalid fee table version".to_string(),
    })?;

    let metadata = FeeTableMetadata {
        marketplace: "ebay_us".to_string(),
        version,
        source_url: BUILTIN_SOURCE_URL.to_string(),
    };

    let schedules = vec![
        standard("most", rate(127, 3), rate(136, 3)),
        // Clothing, shoes & accessories
        standard("clothing", rate(127, 3), rate(136, 3)),
        tiered(
            "womens_bags",
            vec![capped(2000, rate(13, 2)), TierBand::uncapped(rate(7, 2))],
            vec![capped(2000, rate(15, 2)), TierBand::uncapped(rate(9, 2))],
        ),
        threshold(
            "athletic_shoes",
            vec![at_least(150, rate(7, 2)), at_least(0, rate(127, 3))],
            vec![at_least(150, rate(8, 2)), at_least(0, rate(136, 3))],
        ),
        // Media
        standard("books_movies_music", rate(153, 3), rate(153, 3)),
        // Electronics and games
        standard("electronics", rate(935, 4), rate(1255, 4)),
        standard("video_games", rate(935, 4), rate(1325, 4)),
        standard("video_game_consoles", rate(735, 4), rate(1325, 4)),
        // Collectibles
        standard("collectibles", rate(127, 3), rate(1325, 4)),
        standard("trading_cards", rate(1235, 4), rate(1325, 4)),
        // Jewelry and watches
        tiered(
            "jewelry",
            vec![capped(5000, rate(13, 2)), TierBand::uncapped(rate(7, 2))],
            vec![capped(5000, rate(15, 2)), TierBand::uncapped(rate(9, 2))],
        ),
        tiered(
            "watches",
            vec![
                capped(1000, rate(125, 3)),
                capped(5000, rate(4, 2)),
                TierBand::uncapped(rate(3, 2)),
            ],
            vec![
                capped(1000, rate(15, 2)),
                capped(7500, rate(65, 3)),
                TierBand::uncapped(rate(3, 2)),
            ],
        ),
    ];

    RuleTable::new(metadata, schedules)
}
