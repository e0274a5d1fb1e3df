use crate::billing::{CallOutcome, CallRecord, CallStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Selection criteria for call lists. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallFilter {
    pub agent_id: Option<String>,
    pub client_id: Option<String>,
    pub status: Option<CallStatus>,
    pub outcome: Option<CallOutcome>,
    pub call_type: Option<String>,
    /// Inclusive lower bound on `created_at`
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`
    pub date_to: Option<DateTime<Utc>>,
    /// Case-insensitive substring of lead name, phone or email
    pub search: Option<String>,
}

impl CallFilter {
    pub fn for_client(client_id: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            ..Self::default()
        }
    }

    pub fn between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    pub fn matches(&self, call: &CallRecord) -> bool {
        if let Some(agent_id) = &self.agent_id {
            if &call.agent_id != agent_id {
                return false;
            }
        }
        if let Some(client_id) = &self.client_id {
            if &call.client_id != client_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if call.call_status != status {
                return false;
            }
        }
        if let Some(outcome) = self.outcome {
            if call.call_outcome != Some(outcome) {
                return false;
            }
        }
        if let Some(call_type) = &self.call_type {
            if call.call_type.as_ref() != Some(call_type) {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if call.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if call.created_at > to {
                return false;
            }
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            return [&call.lead_name, &call.lead_phone, &call.lead_email]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle));
        }

        true
    }

    pub fn apply<'a>(&self, calls: &'a [CallRecord]) -> Vec<&'a CallRecord> {
        calls.iter().filter(|c| self.matches(c)).collect()
    }

    /// Owned copy of the matching calls, for feeding the calculators
    pub fn apply_cloned(&self, calls: &[CallRecord]) -> Vec<CallRecord> {
        calls.iter().filter(|c| self.matches(c)).cloned().collect()
    }
}
