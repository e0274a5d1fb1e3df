use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription tier a client is billed against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    /// Monetary allowance bundled into the subscription
    pub included_cost_eur: f64,
    pub rate_eur_per_min: f64,
    /// Fraction added on top of the excess, 0.2 = 20%
    pub overage_markup: f64,
    /// Day of month the counters reset. Informational only.
    #[serde(default = "default_reset_day")]
    pub reset_day: u32,
}

fn default_reset_day() -> u32 {
    1
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

/// Tenant of the calling service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub company_name: String,
    pub plan_id: String,
    #[serde(default)]
    pub custom_rate_eur_per_min: Option<f64>,
    #[serde(default)]
    pub custom_included_cost_eur: Option<f64>,
    // Maintained by the backend, never derived here
    #[serde(default)]
    pub total_minutes_used: f64,
    #[serde(default)]
    pub monthly_minute_limit: f64,
    #[serde(default)]
    pub avg_deal_value: Option<f64>,
}

impl Client {
    /// Effective per-minute rate: the client override wins outright
    pub fn effective_rate(&self, plan: &Plan) -> f64 {
        self.custom_rate_eur_per_min.unwrap_or(plan.rate_eur_per_min)
    }

    /// Effective included cost: the client override wins outright
    pub fn effective_included_cost(&self, plan: &Plan) -> f64 {
        self.custom_included_cost_eur
            .unwrap_or(plan.included_cost_eur)
    }

    /// Whole-number share of the externally tracked minute allowance
    pub fn minute_quota_percentage(&self) -> f64 {
        if self.monthly_minute_limit > 0.0 {
            (self.total_minutes_used / self.monthly_minute_limit * 100.0).round()
        } else {
            0.0
        }
    }
}

/// Telephony status of a call as reported by the dialer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    Completed,
    Failed,
    #[serde(alias = "no_answer")]
    NoAnswer,
    Busy,
    #[serde(other)]
    Unrecognized,
}

impl CallStatus {
    pub const NAMED: [CallStatus; 4] = [
        CallStatus::Completed,
        CallStatus::Failed,
        CallStatus::NoAnswer,
        CallStatus::Busy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
            CallStatus::NoAnswer => "no-answer",
            CallStatus::Busy => "busy",
            CallStatus::Unrecognized => "unrecognized",
        }
    }
}

/// Business outcome recorded after a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallOutcome {
    Appointment,
    Interested,
    // The backend has written both spellings over time
    #[serde(alias = "not_interested")]
    NotInterested,
    Qualified,
    Callback,
    #[serde(alias = "no_response")]
    NoResponse,
    Other,
    #[serde(other)]
    Unrecognized,
}

impl CallOutcome {
    pub const NAMED: [CallOutcome; 7] = [
        CallOutcome::Appointment,
        CallOutcome::Interested,
        CallOutcome::NotInterested,
        CallOutcome::Qualified,
        CallOutcome::Callback,
        CallOutcome::NoResponse,
        CallOutcome::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CallOutcome::Appointment => "appointment",
            CallOutcome::Interested => "interested",
            CallOutcome::NotInterested => "not-interested",
            CallOutcome::Qualified => "qualified",
            CallOutcome::Callback => "callback",
            CallOutcome::NoResponse => "no-response",
            CallOutcome::Other => "other",
            CallOutcome::Unrecognized => "unrecognized",
        }
    }
}

/// Single call row attributed to one client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: String,
    pub client_id: String,
    pub agent_id: String,
    #[serde(default)]
    pub agent_name: Option<String>,
    /// 0 when no connection was made, whether the key is missing or null.
    /// Negative values are passed through.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub call_duration_seconds: i64,
    pub call_status: CallStatus,
    #[serde(default)]
    pub call_outcome: Option<CallOutcome>,
    /// Seconds between lead signal and dial; None means unknown
    #[serde(default)]
    pub response_time_sec: Option<f64>,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub lead_name: Option<String>,
    #[serde(default)]
    pub lead_phone: Option<String>,
    #[serde(default)]
    pub lead_email: Option<String>,
    #[serde(default, rename = "type")]
    pub call_type: Option<String>,
}

impl CallRecord {
    pub fn is_appointment(&self) -> bool {
        self.call_outcome == Some(CallOutcome::Appointment)
    }
}

/// Four-level classification of allowance consumption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaStatus {
    Normal,
    Warning,
    Danger,
    Exceeded,
}

impl QuotaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotaStatus::Normal => "normal",
            QuotaStatus::Warning => "warning",
            QuotaStatus::Danger => "danger",
            QuotaStatus::Exceeded => "exceeded",
        }
    }
}

/// Percentage thresholds for [`QuotaStatus`], lower bounds inclusive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaThresholds {
    pub warning: f64,
    pub danger: f64,
    pub exceeded: f64,
}

impl Default for QuotaThresholds {
    fn default() -> Self {
        Self {
            warning: 70.0,
            danger: 90.0,
            exceeded: 100.0,
        }
    }
}

impl QuotaThresholds {
    /// Create thresholds from environment variables
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `VOXA_QUOTA_*` overrides on top of the current values
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(warning) = std::env::var("VOXA_QUOTA_WARNING") {
            if let Ok(value) = warning.parse::<f64>() {
                self.warning = value;
            }
        }

        if let Ok(danger) = std::env::var("VOXA_QUOTA_DANGER") {
            if let Ok(value) = danger.parse::<f64>() {
                self.danger = value;
            }
        }

        self
    }

    /// First match wins, checked from the top down
    pub fn classify(&self, percentage_used: f64) -> QuotaStatus {
        if percentage_used >= self.exceeded {
            QuotaStatus::Exceeded
        } else if percentage_used >= self.danger {
            QuotaStatus::Danger
        } else if percentage_used >= self.warning {
            QuotaStatus::Warning
        } else {
            QuotaStatus::Normal
        }
    }
}

/// Billable usage for one client over the calls handed in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageResult {
    pub minutes: f64,
    pub used_cost: f64,
    pub included_cost: f64,
    pub overage_cost_raw: f64,
    pub overage_billable: f64,
    pub percentage_used: f64,
    pub status: QuotaStatus,
    pub rate: f64,
}

/// Month-end extrapolation of the current usage pace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub days_elapsed: u32,
    pub days_remaining: u32,
    pub avg_calls_per_day: f64,
    pub avg_minutes_per_day: f64,
    pub projected_minutes: f64,
    pub projected_cost: f64,
    pub projected_overage: f64,
}

/// Usage attributed to one agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentUsage {
    pub agent_id: String,
    pub agent_name: String,
    pub calls: usize,
    pub minutes: f64,
    pub cost: f64,
    pub share_of_cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> Plan {
        Plan {
            id: "starter".to_string(),
            name: "Starter".to_string(),
            included_cost_eur: 100.0,
            rate_eur_per_min: 0.10,
            overage_markup: 0.2,
            reset_day: 1,
        }
    }

    fn client() -> Client {
        Client {
            id: "c1".to_string(),
            company_name: "Acme".to_string(),
            plan_id: "starter".to_string(),
            custom_rate_eur_per_min: None,
            custom_included_cost_eur: None,
            total_minutes_used: 0.0,
            monthly_minute_limit: 0.0,
            avg_deal_value: None,
        }
    }

    #[test]
    fn test_override_precedence() {
        let mut c = client();
        assert_eq!(c.effective_rate(&plan()), 0.10);
        assert_eq!(c.effective_included_cost(&plan()), 100.0);

        c.custom_rate_eur_per_min = Some(0.05);
        c.custom_included_cost_eur = Some(0.0);
        assert_eq!(c.effective_rate(&plan()), 0.05);
        // Zero is still an override, not a fallback signal
        assert_eq!(c.effective_included_cost(&plan()), 0.0);
    }

    #[test]
    fn test_minute_quota_percentage() {
        let mut c = client();
        assert_eq!(c.minute_quota_percentage(), 0.0);

        c.total_minutes_used = 333.0;
        c.monthly_minute_limit = 1000.0;
        assert_eq!(c.minute_quota_percentage(), 33.0);
    }

    #[test]
    fn test_threshold_boundaries_inclusive() {
        let t = QuotaThresholds::default();
        assert_eq!(t.classify(0.0), QuotaStatus::Normal);
        assert_eq!(t.classify(69.999), QuotaStatus::Normal);
        assert_eq!(t.classify(70.0), QuotaStatus::Warning);
        assert_eq!(t.classify(89.99), QuotaStatus::Warning);
        assert_eq!(t.classify(90.0), QuotaStatus::Danger);
        assert_eq!(t.classify(99.99), QuotaStatus::Danger);
        assert_eq!(t.classify(100.0), QuotaStatus::Exceeded);
        assert_eq!(t.classify(250.0), QuotaStatus::Exceeded);
    }

    #[test]
    fn test_outcome_spellings() {
        let hyphen: CallOutcome = serde_json::from_str("\"not-interested\"").unwrap();
        let underscore: CallOutcome = serde_json::from_str("\"not_interested\"").unwrap();
        assert_eq!(hyphen, CallOutcome::NotInterested);
        assert_eq!(underscore, CallOutcome::NotInterested);

        let unknown: CallOutcome = serde_json::from_str("\"voicemail\"").unwrap();
        assert_eq!(unknown, CallOutcome::Unrecognized);
    }

    #[test]
    fn test_status_decoding() {
        let s: CallStatus = serde_json::from_str("\"no-answer\"").unwrap();
        assert_eq!(s, CallStatus::NoAnswer);
        let s: CallStatus = serde_json::from_str("\"scheduled\"").unwrap();
        assert_eq!(s, CallStatus::Unrecognized);
    }

    #[test]
    fn test_call_record_defaults() {
        let json = r#"{
            "id": "call-1",
            "client_id": "c1",
            "agent_id": "a1",
            "call_status": "completed",
            "created_at": "2024-03-10T09:15:00Z"
        }"#;
        let call: CallRecord = serde_json::from_str(json).unwrap();
        assert_eq!(call.call_duration_seconds, 0);
        assert_eq!(call.call_outcome, None);
        assert_eq!(call.response_time_sec, None);
        assert!(!call.is_appointment());
    }

    #[test]
    fn test_null_duration_is_zero() {
        let json = r#"{
            "id": "call-2",
            "client_id": "c1",
            "agent_id": "a1",
            "call_duration_seconds": null,
            "call_status": "no-answer",
            "created_at": "2024-03-10T09:15:00Z"
        }"#;
        let call: CallRecord = serde_json::from_str(json).unwrap();
        assert_eq!(call.call_duration_seconds, 0);

        let call: CallRecord = sonic_rs::from_str(json).unwrap();
        assert_eq!(call.call_duration_seconds, 0);
        assert_eq!(call.call_status, CallStatus::NoAnswer);
    }
}
