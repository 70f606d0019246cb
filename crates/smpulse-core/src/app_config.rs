#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide configuration for the pipeline's compute units.
///
/// The infrastructure layer provisions the tables, buckets, and model
/// endpoints; their names arrive here as opaque strings. The numeric knobs
/// parameterize the runtime utilities (cache TTL, rate-limit window, retry
/// policy) and the sentiment aggregator (classification thresholds).
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Name of the table holding extracted posts.
    pub posts_table: String,
    /// Name of the bucket receiving generated reports.
    pub reports_bucket: String,
    /// Identifier of the sentiment model invoked by the analysis handler.
    pub model_id: String,
    /// Bearer token for the social-media API, if configured.
    pub social_api_token: Option<String>,
    pub request_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    /// Scores at or above this are classified positive.
    pub positive_threshold: f64,
    /// Scores at or below this are classified negative.
    pub negative_threshold: f64,
    /// Absolute deviation from the rolling baseline that flags a spike.
    pub spike_threshold: f64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("posts_table", &self.posts_table)
            .field("reports_bucket", &self.reports_bucket)
            .field("model_id", &self.model_id)
            .field(
                "social_api_token",
                &self.social_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_base_delay_ms", &self.retry_base_delay_ms)
            .field("positive_threshold", &self.positive_threshold)
            .field("negative_threshold", &self.negative_threshold)
            .field("spike_threshold", &self.spike_threshold)
            .finish()
    }
}
