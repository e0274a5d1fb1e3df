pub mod breakdown;
pub mod calculator;
pub mod projection;
pub mod types;

pub use calculator::{compute_usage, compute_usage_with};
pub use types::{
    AgentUsage, CallOutcome, CallRecord, CallStatus, Client, Plan, Projection, QuotaStatus,
    QuotaThresholds, UsageResult,
};
