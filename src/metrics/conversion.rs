use crate::billing::{CallOutcome, CallRecord, CallStatus};
use crate::utils::rounding::{round_money, round_percent};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub conversion_rate: f64,
    pub appointments: usize,
    pub qualified: usize,
    pub not_interested: usize,
}

/// One row of an outcome or status distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
    pub label: &'static str,
    pub count: usize,
    pub percentage: f64,
}

/// A call lands in the not-interested bucket through either signal.
fn is_not_interested(call: &CallRecord) -> bool {
    matches!(
        call.call_outcome,
        Some(CallOutcome::NotInterested) | Some(CallOutcome::Other)
    ) || call.call_status == CallStatus::Failed
}

pub fn count_appointments(calls: &[CallRecord]) -> usize {
    calls.iter().filter(|c| c.is_appointment()).count()
}

/// Share of calls that booked an appointment, plus the qualified and
/// not-interested counts
pub fn compute_conversion(calls: &[CallRecord]) -> ConversionResult {
    if calls.is_empty() {
        return ConversionResult {
            conversion_rate: 0.0,
            appointments: 0,
            qualified: 0,
            not_interested: 0,
        };
    }

    let appointments = count_appointments(calls);
    let qualified = calls
        .iter()
        .filter(|c| c.call_outcome == Some(CallOutcome::Qualified))
        .count();
    let not_interested = calls.iter().filter(|c| is_not_interested(c)).count();

    let conversion_rate = appointments as f64 / calls.len() as f64 * 100.0;

    ConversionResult {
        conversion_rate: round_percent(conversion_rate),
        appointments,
        qualified,
        not_interested,
    }
}

/// Every appointment is valued at the full average deal value
pub fn estimate_revenue(calls: &[CallRecord], avg_deal_value: f64) -> f64 {
    round_money(count_appointments(calls) as f64 * avg_deal_value)
}

fn share(count: usize, total: usize) -> f64 {
    if total > 0 {
        round_percent(count as f64 / total as f64 * 100.0)
    } else {
        0.0
    }
}

/// Count of each named outcome over all calls
pub fn outcome_distribution(calls: &[CallRecord]) -> Vec<DistributionEntry> {
    CallOutcome::NAMED
        .iter()
        .map(|outcome| {
            let count = calls
                .iter()
                .filter(|c| c.call_outcome == Some(*outcome))
                .count();
            DistributionEntry {
                label: outcome.as_str(),
                count,
                percentage: share(count, calls.len()),
            }
        })
        .collect()
}

/// Count of each named dialer status over all calls
pub fn status_distribution(calls: &[CallRecord]) -> Vec<DistributionEntry> {
    CallStatus::NAMED
        .iter()
        .map(|status| {
            let count = calls.iter().filter(|c| c.call_status == *status).count();
            DistributionEntry {
                label: status.as_str(),
                count,
                percentage: share(count, calls.len()),
            }
        })
        .collect()
}
