//! Integration tests for the fee engine.
//!
//! This test suite covers calculation scenarios end to end through the
//! public API:
//! - Tiered schedules (single slab, slab boundaries, three tiers)
//! - Threshold schedules at and around the bracket boundary
//! - Store vs non-store rates
//! - International surcharge
//! - Unknown category fallback
//! - Zero and negative amounts
//! - Pricing against a rule table loaded from YAML

use rust_decimal::Decimal;
use std::str::FromStr;

use fee_engine::calculation::{calculate_fee, calculate_fee_builtin};
use fee_engine::config::{ConfigLoader, RuleTable, ScheduleMode};
use fee_engine::error::EngineError;
use fee_engine::models::{FeeRequest, FeeResult};

// =============================================================================
// Test Helpers
// =============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn calc(store: bool, category: &str, price: &str, shipping: &str, international: bool) -> FeeResult {
    calculate_fee_builtin(store, category, dec(price), dec(shipping), international)
}

fn assert_figures(result: &FeeResult, gross: &str, fees: &str, net: &str, rate: &str) {
    assert_eq!(result.gross, dec(gross), "gross");
    assert_eq!(result.fees, dec(fees), "fees");
    assert_eq!(result.net, dec(net), "net");
    assert_eq!(result.effective_rate, rate, "effective_rate");
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn test_electronics_store_with_shipping() {
    let result = calc(true, "electronics", "200", "10", false);
    assert_eq!(result.category, "electronics");
    assert!(result.is_store);
    assert_figures(&result, "210.00", "19.64", "190.36", "9.35%");
}

#[test]
fn test_athletic_shoes_non_store_international() {
    let result = calc(false, "athletic_shoes", "180", "0", true);
    assert_eq!(result.breakdown.mode, ScheduleMode::Threshold);
    assert_eq!(result.breakdown.final_value_fee, dec("14.40"));
    assert_eq!(result.breakdown.international_fee, dec("2.97"));
    assert_figures(&result, "180.00", "17.37", "162.63", "9.65%");
}

#[test]
fn test_watches_store_over_all_tiers() {
    let result = calc(true, "watches", "6000", "20", false);
    assert_figures(&result, "6020.00", "315.60", "5704.40", "5.24%");
}

// =============================================================================
// Threshold boundaries
// =============================================================================

#[test]
fn test_athletic_shoes_exactly_at_threshold_gets_lower_rate() {
    let result = calc(false, "athletic_shoes", "150", "0", false);
    // 150 × 8%
    assert_figures(&result, "150.00", "12.00", "138.00", "8.00%");
}

#[test]
fn test_athletic_shoes_one_cent_below_threshold_gets_default_rate() {
    let result = calc(false, "athletic_shoes", "149.99", "0", false);
    // 149.99 × 13.6% = 20.39864
    assert_figures(&result, "149.99", "20.40", "129.59", "13.60%");
}

#[test]
fn test_threshold_uses_gross_including_shipping() {
    // 140 + 10 shipping reaches the $150 bracket
    let result = calc(true, "athletic_shoes", "140", "10", false);
    // 150 × 7%
    assert_figures(&result, "150.00", "10.50", "139.50", "7.00%");
}

// =============================================================================
// Tier boundaries
// =============================================================================

#[test]
fn test_most_store_at_and_over_cap() {
    let at_cap = calc(true, "most", "2500", "0", false);
    // 2500 × 12.7%
    assert_figures(&at_cap, "2500.00", "317.50", "2182.50", "12.70%");

    let over_cap = calc(true, "most", "3500", "0", false);
    // 317.50 + 1000 × 2.35%
    assert_figures(&over_cap, "3500.00", "341.00", "3159.00", "9.74%");
}

#[test]
fn test_store_and_non_store_caps_differ() {
    // Non-store stays in its first slab up to 7500
    let non_store = calc(false, "most", "5000", "0", false);
    assert_figures(&non_store, "5000.00", "680.00", "4320.00", "13.60%");

    let store = calc(true, "most", "5000", "0", false);
    // 2500 × 12.7% + 2500 × 2.35% = 317.50 + 58.75; 7.525% rounds to even
    assert_figures(&store, "5000.00", "376.25", "4623.75", "7.52%");
}

#[test]
fn test_jewelry_second_tier_rate() {
    let result = calc(false, "jewelry", "6000", "0", false);
    // 5000 × 15% + 1000 × 9%
    assert_figures(&result, "6000.00", "840.00", "5160.00", "14.00%");
}

#[test]
fn test_womens_bags_store() {
    let result = calc(true, "womens_bags", "2500", "0", false);
    // 2000 × 13% + 500 × 7%
    assert_figures(&result, "2500.00", "295.00", "2205.00", "11.80%");
}

// =============================================================================
// Fallback, zero and negative inputs
// =============================================================================

#[test]
fn test_unknown_category_matches_most() {
    let unknown = calc(true, "nonexistent_xyz", "100", "0", false);
    let most = calc(true, "most", "100", "0", false);

    assert_eq!(unknown.category, "most");
    assert_eq!(unknown.summary(), most.summary());
    assert!(unknown.breakdown.fell_back_to_default);
}

#[test]
fn test_zero_gross_reports_zero_rate_instead_of_failing() {
    let result = calc(false, "watches", "0", "0", true);
    assert_figures(&result, "0.00", "0.00", "0.00", "0.00%");
}

#[test]
fn test_negative_shipping_is_not_rejected_by_calculator() {
    let request = FeeRequest::new(true, "electronics", dec("100")).with_shipping(dec("-10"));
    assert!(request.validate().is_err());

    let result = calculate_fee(&request, RuleTable::builtin());
    // 90 × 9.35% = 8.415
    assert_figures(&result, "90.00", "8.42", "81.58", "9.35%");
}

#[test]
fn test_oversized_amounts_are_rejected_before_pricing() {
    let request = FeeRequest::new(true, "most", Decimal::MAX).with_shipping(Decimal::ONE);
    assert!(matches!(
        request.validate(),
        Err(EngineError::AmountOutOfRange { .. })
    ));
}

#[test]
fn test_large_validated_amount_prices_without_overflow() {
    let request = FeeRequest::new(false, "watches", dec("1000000000000000000000000"))
        .with_shipping(dec("20"))
        .with_international(true);
    request.validate().expect("amount has room for fees");

    let result = calculate_fee(&request, RuleTable::builtin());
    assert_eq!(result.gross, dec("1000000000000000000000020.00"));
    assert!(result.fees > Decimal::ZERO);
    assert!(result.fees < result.gross);
}

// =============================================================================
// International surcharge
// =============================================================================

#[test]
fn test_international_adds_flat_surcharge_on_top_of_tiers() {
    let domestic = calc(false, "video_games", "9000", "0", false);
    let international = calc(false, "video_games", "9000", "0", true);

    // 7500 × 13.25% + 1500 × 2.35% = 993.75 + 35.25
    assert_eq!(domestic.fees, dec("1029.00"));
    // + 9000 × 1.65%
    assert_eq!(international.fees, dec("1177.50"));
    assert_eq!(international.breakdown.international_fee, dec("148.50"));
}

// =============================================================================
// Rule table loaded from YAML
// =============================================================================

#[test]
fn test_shipped_yaml_prices_like_builtin_table() {
    let loader = ConfigLoader::load("./config/ebay_us").expect("Failed to load config");

    for category in RuleTable::builtin().categories() {
        for store in [true, false] {
            for price in ["0", "99.95", "150", "2500", "7500.01", "12000"] {
                let request = FeeRequest::new(store, category, dec(price))
                    .with_shipping(dec("7.50"))
                    .with_international(true);
                let from_yaml = calculate_fee(&request, loader.table());
                let builtin = calculate_fee(&request, RuleTable::builtin());
                assert_eq!(
                    from_yaml, builtin,
                    "category {} store {} price {}",
                    category, store, price
                );
            }
        }
    }
}

#[test]
fn test_custom_table_changes_rates() {
    let yaml = r#"
marketplace: test
version: 2025-06-01
source_url: https://example.com/fees
categories:
  most:
    mode: tiered
    store: [{ rate: "0.10" }]
    non_store: [{ rate: "0.12" }]
"#;
    let table = ConfigLoader::from_yaml_str(yaml).unwrap().into_table();

    let result = calculate_fee(&FeeRequest::new(true, "electronics", dec("50")), &table);
    assert_eq!(result.category, "most");
    assert_figures(&result, "50.00", "5.00", "45.00", "10.00%");
}

#[test]
fn test_result_serializes_for_reporting() {
    let result = calc(true, "electronics", "200", "10", false);
    let json = serde_json::to_value(result.summary()).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "category": "electronics",
            "is_store": true,
            "gross": "210.00",
            "fees": "19.64",
            "net": "190.36",
            "effective_rate": "9.35%"
        })
    );
}

#[test]
fn test_builtin_table_is_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                calculate_fee_builtin(i % 2 == 0, "watches", Decimal::from(6000), Decimal::from(20), false)
                    .summary()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0], results[2]);
    assert_eq!(results[1], results[3]);
}
