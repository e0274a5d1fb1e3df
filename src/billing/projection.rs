use crate::billing::{Plan, Projection, UsageResult};
use crate::utils::rounding::{round_money, round_percent};
use chrono::{Datelike, NaiveDate};

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Extrapolate the month-to-date pace to the end of the month.
///
/// `usage` is the month-to-date usage and `month_call_count` the number of
/// calls placed since the first of the month. Days are counted from the
/// first through `today` inclusive.
pub fn project_month_end(
    usage: &UsageResult,
    plan: &Plan,
    month_call_count: usize,
    today: NaiveDate,
) -> Projection {
    let days_elapsed = today.day();
    let days_remaining = days_in_month(today) - today.day();

    let avg_calls_per_day = month_call_count as f64 / days_elapsed as f64;
    let avg_minutes_per_day = usage.minutes / days_elapsed as f64;

    let projected_minutes = usage.minutes + avg_minutes_per_day * days_remaining as f64;
    let projected_cost = projected_minutes * usage.rate;
    let projected_overage =
        ((projected_cost - usage.included_cost) * (1.0 + plan.overage_markup)).max(0.0);

    Projection {
        days_elapsed,
        days_remaining,
        avg_calls_per_day: round_percent(avg_calls_per_day),
        avg_minutes_per_day: round_percent(avg_minutes_per_day),
        projected_minutes: round_money(projected_minutes),
        projected_cost: round_money(projected_cost),
        projected_overage: round_money(projected_overage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::QuotaStatus;

    fn usage(minutes: f64, rate: f64, included: f64) -> UsageResult {
        UsageResult {
            minutes,
            used_cost: minutes * rate,
            included_cost: included,
            overage_cost_raw: 0.0,
            overage_billable: 0.0,
            percentage_used: 0.0,
            status: QuotaStatus::Normal,
            rate,
        }
    }

    fn plan(markup: f64) -> Plan {
        Plan {
            id: "pro".to_string(),
            name: "Pro".to_string(),
            included_cost_eur: 100.0,
            rate_eur_per_min: 0.10,
            overage_markup: markup,
            reset_day: 1,
        }
    }

    #[test]
    fn test_days_in_month() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(days_in_month(d(2024, 1, 15)), 31);
        assert_eq!(days_in_month(d(2024, 2, 1)), 29);
        assert_eq!(days_in_month(d(2023, 2, 28)), 28);
        assert_eq!(days_in_month(d(2024, 4, 30)), 30);
        assert_eq!(days_in_month(d(2024, 12, 31)), 31);
    }

    #[test]
    fn test_projection_under_allowance() {
        // 10 days in, 300 minutes so far, 30-day month
        let today = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        let p = project_month_end(&usage(300.0, 0.10, 100.0), &plan(0.2), 50, today);

        assert_eq!(p.days_elapsed, 10);
        assert_eq!(p.days_remaining, 20);
        assert_eq!(p.avg_calls_per_day, 5.0);
        assert_eq!(p.avg_minutes_per_day, 30.0);
        assert_eq!(p.projected_minutes, 900.0);
        assert_eq!(p.projected_cost, 90.0);
        assert_eq!(p.projected_overage, 0.0);
    }

    #[test]
    fn test_projection_with_overage() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let p = project_month_end(&usage(750.0, 0.10, 100.0), &plan(0.2), 30, today);

        // 750 + 50/day * 15 = 1500 minutes -> 150 EUR, 50 over, +20%
        assert_eq!(p.projected_minutes, 1500.0);
        assert_eq!(p.projected_cost, 150.0);
        assert_eq!(p.projected_overage, 60.0);
    }

    #[test]
    fn test_projection_last_day() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
        let p = project_month_end(&usage(120.0, 0.10, 100.0), &plan(0.2), 0, today);
        assert_eq!(p.days_remaining, 0);
        assert_eq!(p.projected_minutes, 120.0);
        assert_eq!(p.avg_calls_per_day, 0.0);
    }
}
