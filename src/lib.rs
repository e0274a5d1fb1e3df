pub mod billing;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod report;
pub mod utils;

pub use billing::{compute_usage, CallRecord, Client, Plan, UsageResult};
pub use error::{Result, VoxaError};
pub use filter::CallFilter;
pub use metrics::{
    compute_conversion, compute_golden_window, compute_sentiment_distribution, estimate_revenue,
};
