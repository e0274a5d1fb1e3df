use crate::billing::{CallRecord, Client, Plan, QuotaThresholds, UsageResult};
use crate::utils::rounding::{round_money, round_percent};
use tracing::debug;

/// Sum of call durations in fractional minutes
pub fn total_minutes(calls: &[CallRecord]) -> f64 {
    let total_seconds: i64 = calls.iter().map(|c| c.call_duration_seconds).sum();
    total_seconds as f64 / 60.0
}

/// Calculate billable usage for a client with the default thresholds.
///
/// `calls` must already be restricted to the billing period; no date
/// filtering happens here.
pub fn compute_usage(client: &Client, plan: &Plan, calls: &[CallRecord]) -> UsageResult {
    compute_usage_with(client, plan, calls, &QuotaThresholds::default())
}

/// Calculate billable usage with explicit status thresholds
pub fn compute_usage_with(
    client: &Client,
    plan: &Plan,
    calls: &[CallRecord],
    thresholds: &QuotaThresholds,
) -> UsageResult {
    let minutes = total_minutes(calls);

    let rate = client.effective_rate(plan);
    let included_cost = client.effective_included_cost(plan);

    let used_cost = minutes * rate;

    // Markup only ever touches the excess
    let overage_cost_raw = (used_cost - included_cost).max(0.0);
    let overage_billable = overage_cost_raw * (1.0 + plan.overage_markup);

    let percentage_used = if included_cost > 0.0 {
        (used_cost / included_cost) * 100.0
    } else {
        0.0
    };

    // Classified before rounding: 69.96% stays normal
    let status = thresholds.classify(percentage_used);

    debug!(
        client_id = %client.id,
        calls = calls.len(),
        minutes,
        rate,
        used_cost,
        percentage_used,
        status = status.as_str(),
        "computed usage"
    );

    UsageResult {
        minutes: round_money(minutes),
        used_cost: round_money(used_cost),
        included_cost: round_money(included_cost),
        overage_cost_raw: round_money(overage_cost_raw),
        overage_billable: round_money(overage_billable),
        percentage_used: round_percent(percentage_used),
        status,
        rate,
    }
}

/// Format a duration in seconds as `42s` or `3m 5s`
pub fn format_duration(seconds: i64) -> String {
    if seconds < 60 {
        return format!("{}s", seconds);
    }

    let minutes = seconds / 60;
    let secs = seconds % 60;
    format!("{}m {}s", minutes, secs)
}
