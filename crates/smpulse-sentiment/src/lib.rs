//! Sentiment aggregation for the smpulse pipeline.
//!
//! Pure, stateless functions that turn per-post scores produced by the
//! analysis handler into categories, distributions, spike flags, trends, and
//! anomalies. The alerting and reporting collaborators consume the results;
//! nothing here performs I/O or holds state.

pub mod aggregate;
pub mod error;
pub mod types;

pub use aggregate::{calculate_distribution, categorize, detect_anomalies, detect_spike, trend};
pub use error::SentimentError;
pub use types::{
    Anomaly, AnomalyKind, SentimentCategory, SentimentDistribution, SentimentThresholds, Severity,
    Trend,
};
