use crate::billing::calculator::total_minutes;
use crate::billing::{CallRecord, Client};
use crate::metrics::conversion::{compute_conversion, estimate_revenue};
use crate::metrics::golden_window::compute_golden_window;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentPerformance {
    pub agent_id: String,
    pub agent_name: Option<String>,
    pub total_calls: usize,
    pub appointments: usize,
    pub conversion_rate: f64,
    pub golden_window_percentage: f64,
    pub total_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRanking {
    pub client_id: String,
    pub company_name: String,
    pub total_calls: usize,
    pub appointments: usize,
    pub conversion_rate: f64,
    pub revenue: f64,
}

fn group_by<'a, F>(calls: &'a [CallRecord], key: F) -> BTreeMap<&'a str, Vec<CallRecord>>
where
    F: Fn(&'a CallRecord) -> &'a str,
{
    let mut groups: BTreeMap<&str, Vec<CallRecord>> = BTreeMap::new();
    for call in calls {
        groups.entry(key(call)).or_default().push(call.clone());
    }
    groups
}

/// Per-agent scorecard across every client, busiest agents first
pub fn agent_performance(calls: &[CallRecord]) -> Vec<AgentPerformance> {
    let mut rows: Vec<AgentPerformance> = group_by(calls, |c| c.agent_id.as_str())
        .into_iter()
        .map(|(agent_id, agent_calls)| {
            let conversion = compute_conversion(&agent_calls);
            let golden_window = compute_golden_window(&agent_calls);

            AgentPerformance {
                agent_id: agent_id.to_string(),
                agent_name: agent_calls.iter().find_map(|c| c.agent_name.clone()),
                total_calls: agent_calls.len(),
                appointments: conversion.appointments,
                conversion_rate: conversion.conversion_rate,
                golden_window_percentage: golden_window.percentage,
                total_minutes: total_minutes(&agent_calls).round(),
            }
        })
        .collect();

    // Stable sort keeps agent id order among ties
    rows.sort_by(|a, b| b.total_calls.cmp(&a.total_calls));
    rows
}

/// Clients ranked by estimated revenue, highest first
pub fn client_ranking(clients: &[Client], calls: &[CallRecord]) -> Vec<ClientRanking> {
    let by_client = group_by(calls, |c| c.client_id.as_str());

    let mut sorted_clients: Vec<&Client> = clients.iter().collect();
    sorted_clients.sort_by(|a, b| a.id.cmp(&b.id));

    let mut rows: Vec<ClientRanking> = sorted_clients
        .into_iter()
        .map(|client| {
            let client_calls = by_client
                .get(client.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let conversion = compute_conversion(client_calls);

            ClientRanking {
                client_id: client.id.clone(),
                company_name: client.company_name.clone(),
                total_calls: client_calls.len(),
                appointments: conversion.appointments,
                conversion_rate: conversion.conversion_rate,
                revenue: estimate_revenue(client_calls, client.avg_deal_value.unwrap_or(0.0)),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::{CallOutcome, CallStatus};
    use chrono::{TimeZone, Utc};

    fn call(client: &str, agent: &str, outcome: Option<CallOutcome>, rt: Option<f64>) -> CallRecord {
        CallRecord {
            id: format!("{}-{}", client, agent),
            client_id: client.to_string(),
            agent_id: agent.to_string(),
            agent_name: None,
            call_duration_seconds: 150,
            call_status: CallStatus::Completed,
            call_outcome: outcome,
            response_time_sec: rt,
            sentiment_score: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            lead_name: None,
            lead_phone: None,
            lead_email: None,
            call_type: None,
        }
    }

    fn client(id: &str, deal: Option<f64>) -> Client {
        Client {
            id: id.to_string(),
            company_name: format!("{} BV", id),
            plan_id: "pro".to_string(),
            custom_rate_eur_per_min: None,
            custom_included_cost_eur: None,
            total_minutes_used: 0.0,
            monthly_minute_limit: 0.0,
            avg_deal_value: deal,
        }
    }

    #[test]
    fn test_agent_performance() {
        let calls = vec![
            call("c1", "anna", Some(CallOutcome::Appointment), Some(20.0)),
            call("c1", "bram", None, None),
            call("c2", "bram", Some(CallOutcome::Appointment), Some(45.0)),
            call("c2", "bram", None, Some(300.0)),
        ];

        let rows = agent_performance(&calls);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].agent_id, "bram");
        assert_eq!(rows[0].total_calls, 3);
        assert_eq!(rows[0].appointments, 1);
        assert_eq!(rows[0].conversion_rate, 33.3);
        assert_eq!(rows[0].golden_window_percentage, 33.3);
        // 3 x 2.5 minutes
        assert_eq!(rows[0].total_minutes, 8.0);

        assert_eq!(rows[1].agent_id, "anna");
        assert_eq!(rows[1].conversion_rate, 100.0);
    }

    #[test]
    fn test_agent_ties_keep_id_order() {
        let calls = vec![call("c1", "zoe", None, None), call("c1", "aart", None, None)];
        let rows = agent_performance(&calls);
        assert_eq!(rows[0].agent_id, "aart");
        assert_eq!(rows[1].agent_id, "zoe");
    }

    #[test]
    fn test_client_ranking() {
        let clients = vec![
            client("c1", Some(500.0)),
            client("c2", Some(2500.0)),
            client("c3", None),
        ];
        let calls = vec![
            call("c1", "anna", Some(CallOutcome::Appointment), None),
            call("c1", "anna", Some(CallOutcome::Appointment), None),
            call("c2", "anna", Some(CallOutcome::Appointment), None),
            call("c3", "anna", Some(CallOutcome::Appointment), None),
        ];

        let rows = client_ranking(&clients, &calls);
        assert_eq!(rows[0].client_id, "c2");
        assert_eq!(rows[0].revenue, 2500.0);
        assert_eq!(rows[1].client_id, "c1");
        assert_eq!(rows[1].revenue, 1000.0);
        assert_eq!(rows[1].appointments, 2);
        assert_eq!(rows[2].client_id, "c3");
        assert_eq!(rows[2].revenue, 0.0);
    }

    #[test]
    fn test_client_without_calls() {
        let rows = client_ranking(&[client("idle", Some(100.0))], &[]);
        assert_eq!(rows[0].total_calls, 0);
        assert_eq!(rows[0].conversion_rate, 0.0);
    }
}
