use crate::billing::CallRecord;
use crate::utils::rounding::round_money;
use serde::{Deserialize, Serialize};

/// Lower bounds of the positive and neutral buckets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentBounds {
    pub positive: f64,
    pub neutral: f64,
}

impl Default for SentimentBounds {
    fn default() -> Self {
        Self {
            positive: 0.7,
            neutral: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub average: f64,
}

pub fn compute_sentiment_distribution(calls: &[CallRecord]) -> SentimentResult {
    compute_sentiment_distribution_with(calls, &SentimentBounds::default())
}

/// Bucket counts and mean score over the calls that carry a score
pub fn compute_sentiment_distribution_with(
    calls: &[CallRecord],
    bounds: &SentimentBounds,
) -> SentimentResult {
    let scores: Vec<f64> = calls.iter().filter_map(|c| c.sentiment_score).collect();

    if scores.is_empty() {
        return SentimentResult {
            positive: 0,
            neutral: 0,
            negative: 0,
            average: 0.0,
        };
    }

    let positive = scores.iter().filter(|&&s| s >= bounds.positive).count();
    let neutral = scores
        .iter()
        .filter(|&&s| s >= bounds.neutral && s < bounds.positive)
        .count();
    let negative = scores.iter().filter(|&&s| s < bounds.neutral).count();

    let average = scores.iter().sum::<f64>() / scores.len() as f64;

    SentimentResult {
        positive,
        neutral,
        negative,
        average: round_money(average),
    }
}
