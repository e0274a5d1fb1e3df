pub mod sections;

use crate::billing::breakdown::agent_breakdown;
use crate::billing::calculator::total_minutes;
use crate::billing::projection::project_month_end;
use crate::billing::{
    compute_usage_with, AgentUsage, CallRecord, Client, Plan, Projection, UsageResult,
};
use crate::config::Config;
use crate::filter::CallFilter;
use crate::metrics::{
    agent_performance, client_ranking, compute_conversion, compute_golden_window_with,
    compute_sentiment_distribution_with, daily_series, estimate_revenue, outcome_distribution,
    status_distribution, AgentPerformance, ClientRanking, ConversionResult, DailyPoint,
    DistributionEntry, GoldenWindowResult, SentimentResult,
};
use crate::utils::rounding::round_money;
use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use sections::{render_text, Section};

/// Month-to-date dashboard for one client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientReport {
    pub client_id: String,
    pub company_name: String,
    pub plan_name: String,
    pub overage_markup: f64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub calls: usize,
    pub usage: UsageResult,
    pub minute_quota_percentage: f64,
    pub projection: Projection,
    pub golden_window: GoldenWindowResult,
    pub golden_window_seconds: f64,
    pub conversion: ConversionResult,
    pub estimated_revenue: f64,
    pub sentiment: SentimentResult,
    pub agents: Vec<AgentUsage>,
    pub daily: Vec<DailyPoint>,
}

impl ClientReport {
    /// Build the report for the month containing `today`.
    ///
    /// Only calls owned by `client` and created between the first of the
    /// month and the end of `today` (UTC) are counted.
    pub fn build(
        client: &Client,
        plan: &Plan,
        calls: &[CallRecord],
        today: NaiveDate,
        config: &Config,
    ) -> ClientReport {
        let period_start = today.with_day(1).unwrap_or(today);
        let from = Utc.from_utc_datetime(&period_start.and_time(NaiveTime::default()));
        let to = today
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .map(|dt| Utc.from_utc_datetime(&dt))
            .unwrap_or(from);

        let month_calls = CallFilter::for_client(client.id.as_str())
            .between(from, to)
            .apply_cloned(calls);

        debug!(
            client_id = %client.id,
            total = calls.len(),
            in_period = month_calls.len(),
            "building client report"
        );

        let usage = compute_usage_with(client, plan, &month_calls, &config.quota);
        let projection = project_month_end(&usage, plan, month_calls.len(), today);
        let agents = agent_breakdown(&month_calls, &usage);

        ClientReport {
            client_id: client.id.clone(),
            company_name: client.company_name.clone(),
            plan_name: plan.name.clone(),
            overage_markup: plan.overage_markup,
            period_start,
            period_end: today,
            calls: month_calls.len(),
            minute_quota_percentage: client.minute_quota_percentage(),
            projection,
            golden_window: compute_golden_window_with(&month_calls, &config.golden_window),
            golden_window_seconds: config.golden_window.window_seconds,
            conversion: compute_conversion(&month_calls),
            estimated_revenue: estimate_revenue(
                &month_calls,
                client.avg_deal_value.unwrap_or(0.0),
            ),
            sentiment: compute_sentiment_distribution_with(&month_calls, &config.sentiment),
            agents,
            daily: daily_series(&month_calls, period_start, today),
            usage,
        }
    }
}

/// Input for the cross-client analytics view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsInput {
    pub clients: Vec<Client>,
    #[serde(default)]
    pub calls: Vec<CallRecord>,
}

/// Admin overview across every client and agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub total_calls: usize,
    pub total_minutes: f64,
    pub conversion: ConversionResult,
    pub golden_window: GoldenWindowResult,
    pub total_revenue: f64,
    pub outcomes: Vec<DistributionEntry>,
    pub statuses: Vec<DistributionEntry>,
    pub agents: Vec<AgentPerformance>,
    pub clients: Vec<ClientRanking>,
}

impl AnalyticsReport {
    pub fn build(clients: &[Client], calls: &[CallRecord], config: &Config) -> AnalyticsReport {
        let ranking = client_ranking(clients, calls);
        let total_revenue = round_money(ranking.iter().map(|c| c.revenue).sum::<f64>());

        AnalyticsReport {
            total_calls: calls.len(),
            total_minutes: total_minutes(calls).round(),
            conversion: compute_conversion(calls),
            golden_window: compute_golden_window_with(calls, &config.golden_window),
            total_revenue,
            outcomes: outcome_distribution(calls),
            statuses: status_distribution(calls),
            agents: agent_performance(calls),
            clients: ranking,
        }
    }
}
