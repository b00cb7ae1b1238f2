//! Fee calculation for a single sale.
//!
//! This module ties the rule table and the evaluators together: it
//! resolves the category, picks the store or non-store rules, runs the
//! tiered or threshold evaluator, adds the international surcharge and
//! rounds the reported figures.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{FeeSchedule, RuleTable, ScheduleRules};
use crate::models::{AuditStep, AuditTrace, FeeBreakdown, FeeRequest, FeeResult};

use super::international::{INTERNATIONAL_SURCHARGE, international_surcharge};
use super::rounding::{format_effective_rate, round_money};
use super::threshold::apply_threshold;
use super::tiered::apply_tiers;

/// Calculates the fees for one sale against a rule table.
///
/// Unknown categories are priced with the `"most"` schedule without
/// raising an error; the result names the category actually used. Price
/// and shipping are not validated, so negative inputs flow through the
/// arithmetic unchanged (see [`FeeRequest::validate`]).
///
/// # Panics
///
/// Panics if price plus shipping, or the fees on it, overflow `Decimal`.
/// Requests that pass [`FeeRequest::validate`] never do.
///
/// # Examples
///
/// ```
/// use fee_engine::calculation::calculate_fee;
/// use fee_engine::config::RuleTable;
/// use fee_engine::models::FeeRequest;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let request = FeeRequest::new(false, "athletic_shoes", Decimal::from(180))
///     .with_international(true);
/// let result = calculate_fee(&request, RuleTable::builtin());
///
/// assert_eq!(result.fees, Decimal::from_str("17.37").unwrap());
/// assert_eq!(result.net, Decimal::from_str("162.63").unwrap());
/// ```
pub fn calculate_fee(request: &FeeRequest, table: &RuleTable) -> FeeResult {
    let mut trace = AuditTrace::default();
    let gross = request.gross();

    let (schedule, fell_back) = table.resolve(&request.category);
    if fell_back {
        debug!(
            requested = %request.category,
            category = %schedule.category,
            "Unknown category, using default schedule"
        );
    }
    trace.push(category_step(trace.next_step_number(), request, schedule, fell_back));

    let variant = if request.store { "store" } else { "non_store" };
    let final_value_fee = match &schedule.rules {
        ScheduleRules::Tiered { store, non_store } => {
            let tiers = if request.store { store } else { non_store };
            let tiered = apply_tiers(gross, tiers);
            trace.push(AuditStep {
                step_number: trace.next_step_number(),
                rule_id: "final_value_fee_tiered".to_string(),
                rule_name: "Final Value Fee (Tiered)".to_string(),
                input: serde_json::json!({
                    "amount": gross.to_string(),
                    "rules": variant,
                    "tiers": tiers,
                }),
                output: serde_json::json!({
                    "fee": tiered.fee.to_string(),
                    "slabs": tiered.slabs,
                }),
                reasoning: describe_slabs(&tiered.slabs, tiered.fee),
            });
            tiered.fee
        }
        ScheduleRules::Threshold { store, non_store } => {
            let brackets = if request.store { store } else { non_store };
            let selected = apply_threshold(gross, brackets);
            let reasoning = if selected.matched {
                format!(
                    "${} is at least ${}: whole amount at {}% = ${}",
                    gross,
                    selected.threshold,
                    percent(selected.rate),
                    selected.fee
                )
            } else {
                format!(
                    "${} is below every threshold: lowest bracket rate {}% = ${}",
                    gross,
                    percent(selected.rate),
                    selected.fee
                )
            };
            trace.push(AuditStep {
                step_number: trace.next_step_number(),
                rule_id: "final_value_fee_threshold".to_string(),
                rule_name: "Final Value Fee (Threshold)".to_string(),
                input: serde_json::json!({
                    "amount": gross.to_string(),
                    "rules": variant,
                    "brackets": brackets,
                }),
                output: serde_json::json!({
                    "fee": selected.fee.to_string(),
                    "threshold": selected.threshold.to_string(),
                    "rate": selected.rate.to_string(),
                    "matched": selected.matched,
                }),
                reasoning,
            });
            selected.fee
        }
    };

    let international_fee = international_surcharge(gross, request.international);
    if request.international {
        trace.push(AuditStep {
            step_number: trace.next_step_number(),
            rule_id: "international_surcharge".to_string(),
            rule_name: "International Surcharge".to_string(),
            input: serde_json::json!({
                "gross": gross.to_string(),
                "surcharge_rate": INTERNATIONAL_SURCHARGE.to_string(),
            }),
            output: serde_json::json!({ "fee": international_fee.to_string() }),
            reasoning: format!(
                "International sale: ${} × {}% = ${}",
                gross,
                percent(INTERNATIONAL_SURCHARGE),
                international_fee
            ),
        });
    }

    let total_fee = final_value_fee + international_fee;
    let effective_rate = format_effective_rate(total_fee, gross);

    let result_gross = round_money(gross);
    let result_fees = round_money(total_fee);
    let result_net = round_money(gross - total_fee);

    trace.push(AuditStep {
        step_number: trace.next_step_number(),
        rule_id: "fee_totals".to_string(),
        rule_name: "Fee Totals".to_string(),
        input: serde_json::json!({
            "final_value_fee": final_value_fee.to_string(),
            "international_fee": international_fee.to_string(),
        }),
        output: serde_json::json!({
            "gross": result_gross.to_string(),
            "fees": result_fees.to_string(),
            "net": result_net.to_string(),
            "effective_rate": effective_rate,
        }),
        reasoning: format!(
            "Total fee ${} on gross ${} leaves ${} ({} effective)",
            result_fees, result_gross, result_net, effective_rate
        ),
    });

    debug!(
        category = %schedule.category,
        store = request.store,
        gross = %result_gross,
        fees = %result_fees,
        "Fee calculated"
    );

    FeeResult {
        category: schedule.category.clone(),
        is_store: request.store,
        gross: result_gross,
        fees: result_fees,
        net: result_net,
        effective_rate,
        breakdown: FeeBreakdown {
            mode: schedule.mode(),
            final_value_fee: round_money(final_value_fee),
            international_fee: round_money(international_fee),
            fell_back_to_default: fell_back,
        },
        audit_trace: trace,
    }
}

/// Calculates fees against the built-in table.
///
/// Positional convenience over [`calculate_fee`]; pass `Decimal::ZERO` and
/// `false` for the usual no-shipping domestic sale.
///
/// # Examples
///
/// ```
/// use fee_engine::calculation::calculate_fee_builtin;
/// use rust_decimal::Decimal;
///
/// let unknown = calculate_fee_builtin(true, "nonexistent_xyz", Decimal::from(100), Decimal::ZERO, false);
/// let most = calculate_fee_builtin(true, "most", Decimal::from(100), Decimal::ZERO, false);
/// assert_eq!(unknown.summary(), most.summary());
/// ```
pub fn calculate_fee_builtin(
    store: bool,
    category: &str,
    price: Decimal,
    shipping: Decimal,
    international: bool,
) -> FeeResult {
    let request = FeeRequest::new(store, category, price)
        .with_shipping(shipping)
        .with_international(international);
    calculate_fee(&request, RuleTable::builtin())
}

fn category_step(
    step_number: u32,
    request: &FeeRequest,
    schedule: &FeeSchedule,
    fell_back: bool,
) -> AuditStep {
    let mode = schedule.mode();
    let reasoning = if fell_back {
        format!(
            "Category '{}' is not in the fee table; using '{}' ({} schedule)",
            request.category, schedule.category, mode
        )
    } else {
        format!("Category '{}' uses a {} schedule", schedule.category, mode)
    };

    AuditStep {
        step_number,
        rule_id: "category_resolution".to_string(),
        rule_name: "Category Resolution".to_string(),
        input: serde_json::json!({
            "requested_category": request.category,
            "store": request.store,
        }),
        output: serde_json::json!({
            "category": schedule.category,
            "mode": mode.to_string(),
            "fell_back_to_default": fell_back,
        }),
        reasoning,
    }
}

fn percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}

fn describe_slabs(slabs: &[super::Slab], fee: Decimal) -> String {
    if slabs.is_empty() {
        return "No positive amount to charge: fee is $0".to_string();
    }
    let parts: Vec<String> = slabs
        .iter()
        .map(|s| format!("${} at {}% = ${}", s.width, percent(s.rate), s.fee))
        .collect();
    format!("{}; total ${}", parts.join(", "), fee)
}
