//! Runtime utilities embedded by every smpulse compute unit.
//!
//! Three pieces that keep the pipeline well-behaved under load and failure:
//! bounded exponential-backoff retries around remote calls, a TTL cache to
//! short-circuit redundant fetches, and a per-key sliding-window rate limiter
//! protecting external API quotas. All three are in-process only; the
//! surrounding handlers own every network and persistence concern.

pub mod cache;
pub mod rate_limit;
pub mod retry;

pub use cache::{CacheStats, TtlCache};
pub use rate_limit::SlidingWindowLimiter;
pub use retry::{retry_with_backoff, BackoffPolicy};
