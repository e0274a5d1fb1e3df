use crate::billing::QuotaThresholds;
use crate::metrics::{GoldenWindowSettings, SentimentBounds};
use serde::{Deserialize, Serialize};

/// How `voxa` writes its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Report sections, each of which can be switched off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionsConfig {
    pub usage: bool,
    pub projection: bool,
    pub golden_window: bool,
    pub conversion: bool,
    pub sentiment: bool,
    pub agents: bool,
    pub timeline: bool,
}

impl SectionsConfig {
    pub fn any_enabled(&self) -> bool {
        self.usage
            || self.projection
            || self.golden_window
            || self.conversion
            || self.sentiment
            || self.agents
            || self.timeline
    }
}

/// Main config, stored as TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputFormat,
    pub quota: QuotaThresholds,
    pub golden_window: GoldenWindowSettings,
    pub sentiment: SentimentBounds,
    pub sections: SectionsConfig,
}
