use crate::billing::{CallRecord, CallStatus};
use crate::utils::rounding::round_money;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub calls: usize,
    pub successful: usize,
    pub failed: usize,
    pub minutes: f64,
}

impl DailyPoint {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            calls: 0,
            successful: 0,
            failed: 0,
            minutes: 0.0,
        }
    }
}

/// One point per calendar day in `from..=to`, days keyed on the UTC date
/// of `created_at`. Days without calls are present with zero counts.
pub fn daily_series(calls: &[CallRecord], from: NaiveDate, to: NaiveDate) -> Vec<DailyPoint> {
    let mut days: BTreeMap<NaiveDate, (DailyPoint, i64)> = from
        .iter_days()
        .take_while(|d| *d <= to)
        .map(|d| (d, (DailyPoint::empty(d), 0)))
        .collect();

    for call in calls {
        if let Some((point, seconds)) = days.get_mut(&call.created_at.date_naive()) {
            point.calls += 1;
            match call.call_status {
                CallStatus::Completed => point.successful += 1,
                CallStatus::Failed => point.failed += 1,
                _ => {}
            }
            *seconds += call.call_duration_seconds;
        }
    }

    days.into_values()
        .map(|(mut point, seconds)| {
            point.minutes = round_money(seconds as f64 / 60.0);
            point
        })
        .collect()
}
