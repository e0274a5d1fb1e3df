use crate::billing::{AgentUsage, CallRecord, UsageResult};
use crate::utils::rounding::{round_money, round_percent};
use std::collections::BTreeMap;

const UNKNOWN_AGENT: &str = "Unknown";

#[derive(Default)]
struct AgentTotals<'a> {
    name: Option<&'a str>,
    calls: usize,
    seconds: i64,
}

/// Split the client's usage by agent, priced at the client's resolved rate.
///
/// Ordered by agent id so repeated runs render identically.
pub fn agent_breakdown(calls: &[CallRecord], usage: &UsageResult) -> Vec<AgentUsage> {
    let mut totals: BTreeMap<&str, AgentTotals> = BTreeMap::new();

    for call in calls {
        let entry = totals.entry(call.agent_id.as_str()).or_default();
        entry.calls += 1;
        entry.seconds += call.call_duration_seconds;
        if entry.name.is_none() {
            entry.name = call.agent_name.as_deref();
        }
    }

    totals
        .into_iter()
        .map(|(agent_id, t)| {
            let minutes = t.seconds as f64 / 60.0;
            let cost = minutes * usage.rate;
            let share_of_cost = if usage.used_cost > 0.0 {
                cost / usage.used_cost * 100.0
            } else {
                0.0
            };

            AgentUsage {
                agent_id: agent_id.to_string(),
                agent_name: t.name.unwrap_or(UNKNOWN_AGENT).to_string(),
                calls: t.calls,
                minutes: round_money(minutes),
                cost: round_money(cost),
                share_of_cost: round_percent(share_of_cost),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::{CallStatus, QuotaStatus};
    use chrono::{TimeZone, Utc};

    fn call(agent: &str, name: Option<&str>, seconds: i64) -> CallRecord {
        CallRecord {
            id: format!("{}-{}", agent, seconds),
            client_id: "client-1".to_string(),
            agent_id: agent.to_string(),
            agent_name: name.map(str::to_string),
            call_duration_seconds: seconds,
            call_status: CallStatus::Completed,
            call_outcome: None,
            response_time_sec: None,
            sentiment_score: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            lead_name: None,
            lead_phone: None,
            lead_email: None,
            call_type: None,
        }
    }

    fn usage(used_cost: f64, rate: f64) -> UsageResult {
        UsageResult {
            minutes: used_cost / rate,
            used_cost,
            included_cost: 100.0,
            overage_cost_raw: 0.0,
            overage_billable: 0.0,
            percentage_used: used_cost,
            status: QuotaStatus::Normal,
            rate,
        }
    }

    #[test]
    fn test_agent_breakdown() {
        let calls = vec![
            call("b", Some("Sophie"), 600),
            call("a", None, 1200),
            call("b", None, 1200),
        ];

        // 50 minutes total at 0.10
        let rows = agent_breakdown(&calls, &usage(5.0, 0.10));
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].agent_id, "a");
        assert_eq!(rows[0].agent_name, "Unknown");
        assert_eq!(rows[0].calls, 1);
        assert_eq!(rows[0].minutes, 20.0);
        assert_eq!(rows[0].cost, 2.0);
        assert_eq!(rows[0].share_of_cost, 40.0);

        assert_eq!(rows[1].agent_id, "b");
        assert_eq!(rows[1].agent_name, "Sophie");
        assert_eq!(rows[1].calls, 2);
        assert_eq!(rows[1].minutes, 30.0);
        assert_eq!(rows[1].share_of_cost, 60.0);
    }

    #[test]
    fn test_zero_cost_share() {
        let rows = agent_breakdown(&[call("a", None, 0)], &usage(0.0, 0.10));
        assert_eq!(rows[0].share_of_cost, 0.0);
    }

    #[test]
    fn test_empty() {
        assert!(agent_breakdown(&[], &usage(0.0, 0.10)).is_empty());
    }
}
