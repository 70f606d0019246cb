//! Per-key sliding-window admission control.
//!
//! Gates every quota-limited external call the handlers make. The window
//! slides with the current time rather than resetting at fixed boundaries,
//! so a burst at a boundary is smoothed instead of doubled. A `false`
//! admission is backpressure, not an error; callers typically wait or drop
//! the work.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Sliding-window rate limiter keyed by caller-chosen strings.
///
/// Each key holds the ordered timestamps of previously admitted requests;
/// timestamps older than the window are pruned before every decision.
/// Distinct keys are fully independent. Key growth is unbounded, so callers
/// should key by external endpoint, not by request.
#[derive(Debug, Default)]
pub struct SlidingWindowLimiter {
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl SlidingWindowLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Decides whether a request under `key` is admitted right now.
    ///
    /// Prunes timestamps older than `window`, then admits iff fewer than
    /// `max_requests` remain; an admitted request is recorded. The
    /// prune-then-append sequence runs under one lock hold, so concurrent
    /// callers for the same key serialize and exactly `max_requests` of them
    /// win. A rejected request leaves stored state untouched.
    pub async fn is_allowed(&self, key: &str, max_requests: usize, window: Duration) -> bool {
        self.is_allowed_at(key, max_requests, window, Instant::now())
            .await
    }

    /// Returns how many requests under `key` would still be admitted.
    ///
    /// Prunes like [`is_allowed`](Self::is_allowed) but never records, so
    /// repeated calls are idempotent.
    pub async fn remaining(&self, key: &str, max_requests: usize, window: Duration) -> usize {
        self.remaining_at(key, max_requests, window, Instant::now())
            .await
    }

    async fn is_allowed_at(
        &self,
        key: &str,
        max_requests: usize,
        window: Duration,
        now: Instant,
    ) -> bool {
        let mut windows = self.windows.lock().await;
        let timestamps = windows.entry(key.to_owned()).or_default();
        prune(timestamps, window, now);

        if timestamps.len() < max_requests {
            timestamps.push_back(now);
            true
        } else {
            tracing::debug!(key, max_requests, "rate limit reached — request rejected");
            false
        }
    }

    async fn remaining_at(
        &self,
        key: &str,
        max_requests: usize,
        window: Duration,
        now: Instant,
    ) -> usize {
        let mut windows = self.windows.lock().await;
        let Some(timestamps) = windows.get_mut(key) else {
            return max_requests;
        };
        prune(timestamps, window, now);
        max_requests.saturating_sub(timestamps.len())
    }
}

/// Drops admitted timestamps that have slid out of the window.
///
/// Timestamps are appended in order, so pruning from the front suffices.
fn prune(timestamps: &mut VecDeque<Instant>, window: Duration, now: Instant) {
    while let Some(&oldest) = timestamps.front() {
        if now.duration_since(oldest) > window {
            timestamps.pop_front();
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const WINDOW: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn admits_up_to_max_then_rejects() {
        let limiter = SlidingWindowLimiter::new();
        for _ in 0..3 {
            assert!(limiter.is_allowed("api:search", 3, WINDOW).await);
        }
        // The N+1-th call within the window is rejected.
        assert!(!limiter.is_allowed("api:search", 3, WINDOW).await);
    }

    #[tokio::test]
    async fn admits_again_after_window_slides_past_oldest() {
        let limiter = SlidingWindowLimiter::new();
        let start = Instant::now();
        let window = Duration::from_secs(10);

        for _ in 0..2 {
            assert!(limiter.is_allowed_at("api:search", 2, window, start).await);
        }
        assert!(!limiter.is_allowed_at("api:search", 2, window, start).await);

        // Past the window from the oldest admitted timestamp, a slot frees up.
        let later = start + Duration::from_secs(11);
        assert!(limiter.is_allowed_at("api:search", 2, window, later).await);
    }

    #[tokio::test]
    async fn rejection_does_not_consume_state() {
        let limiter = SlidingWindowLimiter::new();
        let start = Instant::now();
        let window = Duration::from_secs(10);

        assert!(limiter.is_allowed_at("api:search", 1, window, start).await);
        for _ in 0..5 {
            assert!(!limiter.is_allowed_at("api:search", 1, window, start).await);
        }
        // Only the single admitted timestamp ages out; the rejections left
        // nothing behind to extend the window.
        let later = start + Duration::from_secs(11);
        assert!(limiter.is_allowed_at("api:search", 1, window, later).await);
    }

    #[tokio::test]
    async fn remaining_counts_down_without_mutating() {
        let limiter = SlidingWindowLimiter::new();
        assert_eq!(limiter.remaining("api:search", 3, WINDOW).await, 3);

        assert!(limiter.is_allowed("api:search", 3, WINDOW).await);
        // remaining is read-only: ask as often as we like.
        for _ in 0..5 {
            assert_eq!(limiter.remaining("api:search", 3, WINDOW).await, 2);
        }

        assert!(limiter.is_allowed("api:search", 3, WINDOW).await);
        assert!(limiter.is_allowed("api:search", 3, WINDOW).await);
        assert_eq!(limiter.remaining("api:search", 3, WINDOW).await, 0);
    }

    #[tokio::test]
    async fn distinct_keys_are_independent() {
        let limiter = SlidingWindowLimiter::new();
        assert!(limiter.is_allowed("api:search", 1, WINDOW).await);
        assert!(!limiter.is_allowed("api:search", 1, WINDOW).await);
        // A different endpoint has its own budget.
        assert!(limiter.is_allowed("api:timeline", 1, WINDOW).await);
    }

    #[tokio::test]
    async fn concurrent_calls_admit_exactly_max_requests() {
        let limiter = Arc::new(SlidingWindowLimiter::new());
        let admitted = Arc::new(AtomicUsize::new(0));
        let max_requests = 8;

        let mut handles = Vec::new();
        for _ in 0..max_requests * 4 {
            let limiter = Arc::clone(&limiter);
            let admitted = Arc::clone(&admitted);
            handles.push(tokio::spawn(async move {
                if limiter.is_allowed("api:search", max_requests, WINDOW).await {
                    admitted.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Regardless of interleaving, exactly max_requests calls win.
        assert_eq!(admitted.load(Ordering::SeqCst), max_requests);
        assert_eq!(limiter.remaining("api:search", max_requests, WINDOW).await, 0);
    }
}
