pub mod conversion;
pub mod golden_window;
pub mod leaderboard;
pub mod sentiment;
pub mod timeline;

pub use conversion::{
    compute_conversion, estimate_revenue, outcome_distribution, status_distribution,
    ConversionResult, DistributionEntry,
};
pub use golden_window::{
    compute_golden_window, compute_golden_window_with, GoldenWindowResult, GoldenWindowSettings,
};
pub use leaderboard::{agent_performance, client_ranking, AgentPerformance, ClientRanking};
pub use sentiment::{
    compute_sentiment_distribution, compute_sentiment_distribution_with, SentimentBounds,
    SentimentResult,
};
pub use timeline::{daily_series, DailyPoint};
