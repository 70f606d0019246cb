//! Shared configuration for the smpulse pipeline.
//!
//! The surrounding system (ingestion job, sentiment job, API handlers) owns
//! all I/O; this crate only loads and validates the knobs those handlers feed
//! into the runtime utilities and the sentiment aggregator.

use thiserror::Error;

pub mod app_config;
pub mod config;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("invalid sentiment thresholds: positive ({positive}) must be greater than negative ({negative}) and both must lie in [0, 1]")]
    InvalidThresholds { positive: f64, negative: f64 },
}
