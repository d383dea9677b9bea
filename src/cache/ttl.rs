//! Time-bounded cache with stale fallback

use crate::cache::loader::Loader;
use crate::cache::observer::CacheEvent;
use crate::error::OstrivResult;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

/// Refresh policy over a [`Loader`]
///
/// Once a key has been fetched successfully, a later CMS outage never
/// surfaces to callers: the previous value is served as degraded until
/// `degraded_ttl` elapses, then the refresh is retried.
pub struct TtlCache<K, V> {
    loader: Loader<K, V>,
    degraded_ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Clone + Eq + Hash + Display + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Wrap `loader`; its TTL is the default lifetime of fresh entries
    pub fn new(loader: Loader<K, V>, degraded_ttl: Duration) -> Self {
        Self {
            loader,
            degraded_ttl,
        }
    }

    pub fn loader(&self) -> &Loader<K, V> {
        &self.loader
    }

    pub fn ttl(&self) -> Duration {
        self.loader.ttl()
    }

    pub fn degraded_ttl(&self) -> Duration {
        self.degraded_ttl
    }

    /// Get `key` with the default TTL
    pub async fn get(&self, key: &K) -> OstrivResult<Arc<V>> {
        self.get_or_refresh(key, self.loader.ttl()).await
    }

    /// Get `key`, refreshing it if expired and falling back to the previous value
    pub async fn get_or_refresh(&self, key: &K, ttl: Duration) -> OstrivResult<Arc<V>> {
        let err = match self.loader.get_with_ttl(key, ttl).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let Some(previous) = self.loader.peek_stale(key) else {
            return Err(err);
        };

        let served = self
            .loader
            .install_degraded(key, previous, self.degraded_ttl);
        self.loader.observer().on_event(&CacheEvent::ServedStale {
            key: key.to_string(),
            retry_in: self.degraded_ttl,
        });
        Ok(served)
    }

    /// Serve a caller-supplied fallback for `key` under the degraded TTL
    ///
    /// Used when nothing has ever been fetched for `key`. A servable entry
    /// that already exists wins over `value`.
    pub fn install_degraded(&self, key: &K, value: V) -> Arc<V> {
        let served = self
            .loader
            .install_degraded(key, Arc::new(value), self.degraded_ttl);
        self.loader.observer().on_event(&CacheEvent::ServedDefault {
            key: key.to_string(),
            retry_in: self.degraded_ttl,
        });
        served
    }

    /// Cached value for `key` if still servable; never fetches
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.loader.peek(key)
    }

    pub fn invalidate(&self, key: &K) {
        self.loader.invalidate(key);
    }
}
