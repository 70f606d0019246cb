//! Exponential-backoff retry for fallible remote operations.
//!
//! Wraps social-media fetches and model invocations made by the surrounding
//! handlers. Every failure is retried up to the policy bound; callers that
//! want to fail fast on permanent errors return early from the operation
//! closure instead of relying on classification here.

use std::future::Future;
use std::time::Duration;

/// Retry bounds for one [`retry_with_backoff`] invocation.
///
/// Immutable per call; the delay before retry `i` (0-indexed) is
/// `base_delay * 2^i`.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    /// Additional attempts after the first. `0` means a single attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    pub base_delay: Duration,
}

impl BackoffPolicy {
    #[must_use]
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }
}

/// Executes `operation` with exponential backoff, up to `max_retries + 1`
/// attempts total.
///
/// On success the result is returned immediately with no further attempts.
/// After a failed attempt `i < max_retries`, the caller is suspended for
/// `base_delay * 2^i` and the operation is tried again. No sleep follows the
/// final attempt.
///
/// The operation may repeat its side effects on retry; it must be idempotent
/// or safe to repeat. That contract belongs to the call site, not here.
///
/// Cancellation: the returned future does nothing beyond awaiting `operation`
/// and `tokio::time::sleep`, so dropping it (task abort, `select!` branch)
/// aborts any pending retry without surfacing the wrapped error.
///
/// # Errors
///
/// If every attempt fails, returns the error from the *last* attempt
/// unchanged; earlier errors are discarded. Callers needing the full failure
/// history should record it inside the operation closure.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: BackoffPolicy,
    mut operation: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_retries {
                    return Err(err);
                }

                // Exponential backoff: base * 2^attempt.
                // Cap the shift to prevent overflow on extreme configs.
                let delay = policy.base_delay.saturating_mul(1u32 << attempt.min(31));
                tracing::warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "operation failed — retrying after backoff"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
