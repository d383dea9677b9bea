//! Structured cache events

use std::time::Duration;
use tracing::{debug, warn};

/// Something that happened inside the cache for a given key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// A network fetch was started
    FetchStarted { key: String },

    /// A fetch completed and its value was stored
    FetchSucceeded { key: String },

    /// A fetch failed; nothing was stored
    FetchFailed { key: String, error: String },

    /// A previous value is served after a failed refresh
    ServedStale { key: String, retry_in: Duration },

    /// A built-in default is served because nothing was ever fetched
    ServedDefault { key: String, retry_in: Duration },
}

impl CacheEvent {
    pub fn key(&self) -> &str {
        match self {
            Self::FetchStarted { key }
            | Self::FetchSucceeded { key }
            | Self::FetchFailed { key, .. }
            | Self::ServedStale { key, .. }
            | Self::ServedDefault { key, .. } => key,
        }
    }
}

/// Receives cache events
///
/// Implementations must not call back into the cache that reports to them.
pub trait CacheObserver: Send + Sync {
    fn on_event(&self, event: &CacheEvent);
}

/// Default observer: logs events with `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CacheObserver for TracingObserver {
    fn on_event(&self, event: &CacheEvent) {
        match event {
            CacheEvent::FetchStarted { key } => debug!("Fetching {}", key),
            CacheEvent::FetchSucceeded { key } => debug!("Cached {}", key),
            CacheEvent::FetchFailed { key, error } => {
                warn!(key = %key, error = %error, "CMS fetch failed");
            }
            CacheEvent::ServedStale { key, retry_in } => {
                warn!(key = %key, retry_in_secs = retry_in.as_secs(), "Serving stale data");
            }
            CacheEvent::ServedDefault { key, retry_in } => {
                warn!(key = %key, retry_in_secs = retry_in.as_secs(), "Serving built-in defaults");
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_key() {
        let event = CacheEvent::FetchFailed {
            key: "categories".to_string(),
            error: "refused".to_string(),
        };
        assert_eq!(event.key(), "categories");
    }

    #[test]
    fn tracing_observer_accepts_all_events() {
        let observer = TracingObserver;
        observer.on_event(&CacheEvent::FetchStarted {
            key: "k".to_string(),
        });
        observer.on_event(&CacheEvent::ServedStale {
            key: "k".to_string(),
            retry_in: Duration::from_secs(30),
        });
        // Should not panic
    }
}
