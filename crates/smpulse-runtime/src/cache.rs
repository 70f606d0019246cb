//! Process-wide TTL cache for remote-call results.
//!
//! Handlers key entries by a request fingerprint so repeated fetches within
//! the TTL are served locally instead of re-hitting the social-media API or
//! the model endpoint. Expiry is lazy: expired entries are dropped when read,
//! no background sweep runs. Construct one instance per process and share it
//! by reference; there is no global singleton.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    /// An entry is live strictly before its deadline, so a zero TTL
    /// (the stand-in for "zero or negative", which `Duration` cannot
    /// represent) is expired at insertion time.
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Size and key listing returned by [`TtlCache::stats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub keys: Vec<String>,
}

/// Key/value store with per-entry expiration.
///
/// All operations take the single internal lock, so each check-then-evict or
/// overwrite sequence is atomic with respect to concurrent callers. Key
/// growth is unbounded; callers are expected to use a bounded fingerprint
/// space (one key per endpoint/query shape, not per request).
#[derive(Debug, Default)]
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Stores `value` under `key`, overwriting any existing entry.
    ///
    /// The entry expires `ttl` from now. `Duration::ZERO` yields an entry
    /// that is already expired — every subsequent `get` misses.
    pub async fn insert(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.insert_at(key.into(), value, ttl, Instant::now()).await;
    }

    /// Returns the value for `key` if present and unexpired.
    ///
    /// An expired entry is removed on the way out and reported as a miss;
    /// absence is a normal result, never an error.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now()).await
    }

    /// Removes `key` unconditionally. Returns whether an entry existed,
    /// expired or not.
    pub async fn remove(&self, key: &str) -> bool {
        self.entries.lock().await.remove(key).is_some()
    }

    /// Drops all entries.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Reports the live entry count and keys.
    ///
    /// Expired entries are purged first so the numbers reflect what `get`
    /// would actually serve.
    pub async fn stats(&self) -> CacheStats {
        self.stats_at(Instant::now()).await
    }

    async fn insert_at(&self, key: String, value: V, ttl: Duration, now: Instant) {
        let entry = CacheEntry {
            value,
            expires_at: now + ttl,
        };
        self.entries.lock().await.insert(key, entry);
    }

    async fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Some(entry.value.clone()),
            Some(_) => {
                // Lazy eviction: drop the expired entry while we hold the lock.
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn stats_at(&self, now: Instant) -> CacheStats {
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| entry.is_live(now));
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort_unstable();
        CacheStats {
            size: entries.len(),
            keys,
        }
    }
}
