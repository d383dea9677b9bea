//! Cached values with expiry

use std::sync::Arc;
use tokio::time::Instant;

/// A cached value and the instant it stops being served
#[derive(Debug)]
pub struct CacheEntry<V> {
    value: Arc<V>,
    expires_at: Instant,
    degraded: bool,
}

impl<V> CacheEntry<V> {
    /// Entry produced by a successful fetch
    pub fn fresh(value: Arc<V>, expires_at: Instant) -> Self {
        Self {
            value,
            expires_at,
            degraded: false,
        }
    }

    /// Fallback entry installed after a failed refresh
    pub fn degraded(value: Arc<V>, expires_at: Instant) -> Self {
        Self {
            value,
            expires_at,
            degraded: true,
        }
    }

    pub fn value(&self) -> Arc<V> {
        Arc::clone(&self.value)
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Whether the entry may still be served at `now`
    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }

    /// Whether the entry may still be served
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Instant::now())
    }
}

impl<V> Clone for CacheEntry<V> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            expires_at: self.expires_at,
            degraded: self.degraded,
        }
    }
}
