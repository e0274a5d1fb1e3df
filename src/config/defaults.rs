use super::types::{Config, OutputFormat, SectionsConfig};
use crate::billing::QuotaThresholds;
use crate::metrics::{GoldenWindowSettings, SentimentBounds};

pub const DEFAULT_SECTIONS: SectionsConfig = SectionsConfig {
    usage: true,
    projection: true,
    golden_window: true,
    conversion: true,
    sentiment: true,
    agents: true,
    timeline: false, // One line per day, opt in
};

impl Default for SectionsConfig {
    fn default() -> Self {
        DEFAULT_SECTIONS
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output: OutputFormat::Text,
            quota: QuotaThresholds::default(),
            golden_window: GoldenWindowSettings::default(),
            sentiment: SentimentBounds::default(),
            sections: SectionsConfig::default(),
        }
    }
}

impl Config {
    /// Defaults with `VOXA_QUOTA_*` environment overrides applied
    pub fn from_env() -> Self {
        Config {
            quota: QuotaThresholds::from_env(),
            ..Config::default()
        }
    }
}
