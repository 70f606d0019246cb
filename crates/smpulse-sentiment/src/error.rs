use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("invalid thresholds: positive ({positive}) must be greater than negative ({negative}) and both must lie in [0, 1]")]
    InvalidThresholds { positive: f64, negative: f64 },

    #[error("score {0} is outside [0, 1]")]
    ScoreOutOfRange(f64),
}
