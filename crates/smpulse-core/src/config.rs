use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let posts_table = require("SMPULSE_POSTS_TABLE")?;
    let reports_bucket = require("SMPULSE_REPORTS_BUCKET")?;

    let env = parse_environment(&or_default("SMPULSE_ENV", "development"));
    let log_level = or_default("SMPULSE_LOG_LEVEL", "info");
    let model_id = or_default("SMPULSE_MODEL_ID", "sentiment-base-v1");
    let social_api_token = lookup("SMPULSE_SOCIAL_API_TOKEN").ok();

    let request_timeout_secs = parse_u64("SMPULSE_REQUEST_TIMEOUT_SECS", "30")?;
    let cache_ttl_secs = parse_u64("SMPULSE_CACHE_TTL_SECS", "300")?;
    let rate_limit_max_requests = parse_usize("SMPULSE_RATE_LIMIT_MAX_REQUESTS", "60")?;
    let rate_limit_window_secs = parse_u64("SMPULSE_RATE_LIMIT_WINDOW_SECS", "60")?;
    let max_retries = parse_u32("SMPULSE_MAX_RETRIES", "3")?;
    let retry_base_delay_ms = parse_u64("SMPULSE_RETRY_BASE_DELAY_MS", "500")?;

    let positive_threshold = parse_f64("SMPULSE_POSITIVE_THRESHOLD", "0.7")?;
    let negative_threshold = parse_f64("SMPULSE_NEGATIVE_THRESHOLD", "0.3")?;
    let spike_threshold = parse_f64("SMPULSE_SPIKE_THRESHOLD", "0.3")?;

    // A misordered threshold pair would silently misclassify every score, so
    // reject it at startup rather than at scoring time.
    if positive_threshold <= negative_threshold
        || !(0.0..=1.0).contains(&positive_threshold)
        || !(0.0..=1.0).contains(&negative_threshold)
    {
        return Err(ConfigError::InvalidThresholds {
            positive: positive_threshold,
            negative: negative_threshold,
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        posts_table,
        reports_bucket,
        model_id,
        social_api_token,
        request_timeout_secs,
        cache_ttl_secs,
        rate_limit_max_requests,
        rate_limit_window_secs,
        max_retries,
        retry_base_delay_ms,
        positive_threshold,
        negative_threshold,
        spike_threshold,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
