use crate::billing::CallRecord;
use crate::utils::rounding::round_percent;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Response-latency target and the stand-in for unknown latencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoldenWindowSettings {
    /// Calls answered within this many seconds are inside the window
    pub window_seconds: f64,
    /// Substituted for a missing `response_time_sec`
    pub missing_response_sentinel: f64,
}

impl Default for GoldenWindowSettings {
    fn default() -> Self {
        Self {
            window_seconds: 60.0,
            missing_response_sentinel: 9999.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoldenWindowResult {
    pub percentage: f64,
    pub within_window: usize,
    pub outside_window: usize,
    pub median_response_time: i64,
}

impl GoldenWindowResult {
    fn empty() -> Self {
        Self {
            percentage: 0.0,
            within_window: 0,
            outside_window: 0,
            median_response_time: 0,
        }
    }
}

/// Golden window compliance with the standard 60 second target
pub fn compute_golden_window(calls: &[CallRecord]) -> GoldenWindowResult {
    compute_golden_window_with(calls, &GoldenWindowSettings::default())
}

/// Golden window compliance with explicit settings.
///
/// Calls without a response time are never dropped: they take the
/// sentinel value, count as outside the window, and take part in the
/// median. Callers wanting the median of measured calls only must filter
/// beforehand.
pub fn compute_golden_window_with(
    calls: &[CallRecord],
    settings: &GoldenWindowSettings,
) -> GoldenWindowResult {
    if calls.is_empty() {
        return GoldenWindowResult::empty();
    }

    let mut response_times: Vec<f64> = calls
        .iter()
        .map(|c| {
            c.response_time_sec
                .unwrap_or(settings.missing_response_sentinel)
        })
        .collect();

    let within_window = response_times
        .iter()
        .filter(|&&rt| rt <= settings.window_seconds)
        .count();
    let outside_window = calls.len() - within_window;
    let percentage = within_window as f64 / calls.len() as f64 * 100.0;

    response_times.sort_by(|a, b| a.total_cmp(b));
    let median = median_of_sorted(&response_times);

    debug!(
        calls = calls.len(),
        within_window,
        median,
        "computed golden window"
    );

    GoldenWindowResult {
        percentage: round_percent(percentage),
        within_window,
        outside_window,
        median_response_time: median.round() as i64,
    }
}

/// Middle element, or the mean of the two middle elements
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
