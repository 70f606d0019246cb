//! Score classification, distribution, and spike/trend/anomaly detection.

use crate::error::SentimentError;
use crate::types::{
    Anomaly, AnomalyKind, SentimentCategory, SentimentDistribution, SentimentThresholds, Severity,
    Trend,
};

/// Negative share (percent) above which a distribution is anomalous.
const HIGH_NEGATIVE_PCT: f64 = 70.0;

/// Batch size above which post volume is anomalous.
const VOLUME_SPIKE_TOTAL: usize = 1000;

/// Percentage-point change beyond which a trend counts as moving.
const TREND_BAND: f64 = 5.0;

fn validate_score(score: f64) -> Result<(), SentimentError> {
    if (0.0..=1.0).contains(&score) {
        Ok(())
    } else {
        Err(SentimentError::ScoreOutOfRange(score))
    }
}

/// Classifies a score against the thresholds.
///
/// `score >= positive` is positive, `score <= negative` is negative,
/// anything between is neutral.
///
/// # Errors
///
/// Returns [`SentimentError::InvalidThresholds`] for a misordered pair and
/// [`SentimentError::ScoreOutOfRange`] for a score outside `[0, 1]` —
/// failing fast beats silently misclassifying.
pub fn categorize(
    score: f64,
    thresholds: &SentimentThresholds,
) -> Result<SentimentCategory, SentimentError> {
    thresholds.validate()?;
    validate_score(score)?;

    if score >= thresholds.positive {
        Ok(SentimentCategory::Positive)
    } else if score <= thresholds.negative {
        Ok(SentimentCategory::Negative)
    } else {
        Ok(SentimentCategory::Neutral)
    }
}

/// Computes the category breakdown and mean of a score batch.
///
/// Percentages are per-category counts over the batch size, rounded to two
/// decimal places. The empty batch yields the all-zero distribution rather
/// than a division failure.
///
/// # Errors
///
/// Returns [`SentimentError::InvalidThresholds`] or
/// [`SentimentError::ScoreOutOfRange`] on the first bad input.
pub fn calculate_distribution(
    scores: &[f64],
    thresholds: &SentimentThresholds,
) -> Result<SentimentDistribution, SentimentError> {
    thresholds.validate()?;

    if scores.is_empty() {
        return Ok(SentimentDistribution::empty());
    }

    let mut positive_count = 0usize;
    let mut negative_count = 0usize;
    let mut neutral_count = 0usize;
    let mut sum = 0.0f64;

    for &score in scores {
        match categorize(score, thresholds)? {
            SentimentCategory::Positive => positive_count += 1,
            SentimentCategory::Negative => negative_count += 1,
            SentimentCategory::Neutral => neutral_count += 1,
        }
        sum += score;
    }

    let total = scores.len();
    #[allow(clippy::cast_precision_loss)]
    let pct = |count: usize| round2(count as f64 / total as f64 * 100.0);
    #[allow(clippy::cast_precision_loss)]
    let average = sum / total as f64;

    Ok(SentimentDistribution {
        positive_pct: pct(positive_count),
        negative_pct: pct(negative_count),
        neutral_pct: pct(neutral_count),
        average,
        positive_count,
        negative_count,
        neutral_count,
        total,
    })
}

/// Flags `current` as a spike when it deviates from the mean of
/// `previous` by more than `threshold`.
///
/// An empty baseline never spikes: with nothing to deviate from, the answer
/// is `false`, not an error.
///
/// # Errors
///
/// Returns [`SentimentError::ScoreOutOfRange`] if `current` or any baseline
/// score lies outside `[0, 1]`.
pub fn detect_spike(
    current: f64,
    previous: &[f64],
    threshold: f64,
) -> Result<bool, SentimentError> {
    validate_score(current)?;
    for &score in previous {
        validate_score(score)?;
    }

    if previous.is_empty() {
        return Ok(false);
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = previous.iter().sum::<f64>() / previous.len() as f64;
    Ok((current - mean).abs() > threshold)
}

/// Direction of `current_pct` relative to the mean of `historical_pcts`.
///
/// A change of more than five percentage points in either direction counts
/// as movement; smaller changes, or an empty history, read as stable.
#[must_use]
pub fn trend(current_pct: f64, historical_pcts: &[f64]) -> Trend {
    if historical_pcts.is_empty() {
        return Trend::Stable;
    }

    #[allow(clippy::cast_precision_loss)]
    let historical_avg = historical_pcts.iter().sum::<f64>() / historical_pcts.len() as f64;
    let change = current_pct - historical_avg;

    if change > TREND_BAND {
        Trend::Increasing
    } else if change < -TREND_BAND {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Screens a distribution for alert-worthy readings.
///
/// Two checks: a negative share above 70% (high severity) and a batch volume
/// above 1000 posts (medium severity). The external alerting collaborator
/// turns the returned anomalies into notifications.
#[must_use]
pub fn detect_anomalies(distribution: &SentimentDistribution) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    if distribution.negative_pct > HIGH_NEGATIVE_PCT {
        anomalies.push(Anomaly {
            kind: AnomalyKind::HighNegativeSentiment,
            severity: Severity::High,
            value: distribution.negative_pct,
            threshold: HIGH_NEGATIVE_PCT,
        });
    }

    if distribution.total > VOLUME_SPIKE_TOTAL {
        #[allow(clippy::cast_precision_loss)]
        anomalies.push(Anomaly {
            kind: AnomalyKind::VolumeSpike,
            severity: Severity::Medium,
            value: distribution.total as f64,
            threshold: VOLUME_SPIKE_TOTAL as f64,
        });
    }

    anomalies
}

/// Rounds to two decimal places, matching how percentages are reported
/// downstream.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
