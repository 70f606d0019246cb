use serde::Serialize;

use crate::error::SentimentError;

/// Classification of a single score against the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentCategory::Positive => write!(f, "positive"),
            SentimentCategory::Negative => write!(f, "negative"),
            SentimentCategory::Neutral => write!(f, "neutral"),
        }
    }
}

/// Classification thresholds for scores in `[0, 1]`.
///
/// Scores at or above `positive` are positive, at or below `negative` are
/// negative, and everything between is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentThresholds {
    pub positive: f64,
    pub negative: f64,
}

impl SentimentThresholds {
    /// Builds a threshold pair, rejecting configurations that would
    /// misclassify every score.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidThresholds`] unless
    /// `0 <= negative < positive <= 1`.
    pub fn new(positive: f64, negative: f64) -> Result<Self, SentimentError> {
        let pair = Self { positive, negative };
        pair.validate()?;
        Ok(pair)
    }

    pub(crate) fn validate(&self) -> Result<(), SentimentError> {
        if self.positive <= self.negative
            || !(0.0..=1.0).contains(&self.positive)
            || !(0.0..=1.0).contains(&self.negative)
        {
            return Err(SentimentError::InvalidThresholds {
                positive: self.positive,
                negative: self.negative,
            });
        }
        Ok(())
    }
}

impl Default for SentimentThresholds {
    fn default() -> Self {
        Self {
            positive: 0.7,
            negative: 0.3,
        }
    }
}

/// Category breakdown over a batch of scores.
///
/// Percentages lie in `[0, 100]`, rounded to two decimal places; `average`
/// is the untouched arithmetic mean. An empty batch is all zeros.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentDistribution {
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
    pub average: f64,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub total: usize,
}

impl SentimentDistribution {
    pub(crate) fn empty() -> Self {
        Self {
            positive_pct: 0.0,
            negative_pct: 0.0,
            neutral_pct: 0.0,
            average: 0.0,
            positive_count: 0,
            negative_count: 0,
            neutral_count: 0,
            total: 0,
        }
    }
}

/// Direction of a percentage relative to its historical average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    HighNegativeSentiment,
    VolumeSpike,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

/// A distribution reading that crossed an alerting threshold.
///
/// Consumed by the external alerting collaborator; `value` is the observed
/// reading and `threshold` the limit it crossed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    pub severity: Severity,
    pub value: f64,
    pub threshold: f64,
}
