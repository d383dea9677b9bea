//! Single-flight memoizing loader
//!
//! At most one fetch per key is outstanding at any time. Callers arriving
//! while a fetch runs await the same shared future and receive the same
//! value or the same error. The in-flight marker is cleared by the fetch
//! itself before its result reaches any waiter, so a failure never blocks
//! the next attempt.

use crate::cache::entry::CacheEntry;
use crate::cache::observer::{CacheEvent, CacheObserver, TracingObserver};
use crate::error::{OstrivError, OstrivResult};
use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// Stand-in expiry for TTLs too large to represent as an instant
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Instant `ttl` from now, saturating at [`FAR_FUTURE`]
fn expiry_after(ttl: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(ttl.min(FAR_FUTURE)).unwrap_or(now)
}

type FlightResult<V> = Result<Arc<V>, Arc<OstrivError>>;
type Flight<V> = Shared<BoxFuture<'static, FlightResult<V>>>;

/// Source of values for a [`Loader`]
#[async_trait]
pub trait Fetcher<K, V>: Send + Sync {
    /// Fetch the value for `key` from the underlying source
    async fn fetch(&self, key: &K) -> OstrivResult<V>;
}

/// Adapter turning an async closure into a [`Fetcher`]
pub struct FnFetcher<F>(F);

/// Wrap an async closure `Fn(K) -> Future<Output = OstrivResult<V>>` as a fetcher
pub fn fetcher_fn<F>(f: F) -> Arc<FnFetcher<F>> {
    Arc::new(FnFetcher(f))
}

#[async_trait]
impl<K, V, F, Fut> Fetcher<K, V> for FnFetcher<F>
where
    K: Clone + Send + Sync + 'static,
    V: Send + 'static,
    F: Fn(K) -> Fut + Send + Sync,
    Fut: Future<Output = OstrivResult<V>> + Send + 'static,
{
    async fn fetch(&self, key: &K) -> OstrivResult<V> {
        (self.0)(key.clone()).await
    }
}

struct State<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    flights: HashMap<K, Flight<V>>,
}

impl<K: Eq + Hash, V> State<K, V> {
    /// Store a fetched value without moving the key's expiry backwards
    fn store_fresh(&mut self, key: K, value: Arc<V>, ttl: Duration) {
        let mut expires_at = expiry_after(ttl);
        if let Some(previous) = self.entries.get(&key) {
            if !previous.is_degraded() {
                expires_at = expires_at.max(previous.expires_at());
            }
        }
        self.entries.insert(key, CacheEntry::fresh(value, expires_at));
    }
}

fn lock<K, V>(state: &Mutex<State<K, V>>) -> MutexGuard<'_, State<K, V>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Memoizing loader with per-key request collapsing
pub struct Loader<K, V> {
    fetcher: Arc<dyn Fetcher<K, V>>,
    ttl: Duration,
    state: Arc<Mutex<State<K, V>>>,
    observer: Arc<dyn CacheObserver>,
}

impl<K, V> Loader<K, V>
where
    K: Clone + Eq + Hash + Display + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Create an empty loader whose fetched values live for `ttl`
    pub fn new(fetcher: Arc<dyn Fetcher<K, V>>, ttl: Duration) -> Self {
        Self {
            fetcher,
            ttl,
            state: Arc::new(Mutex::new(State {
                entries: HashMap::new(),
                flights: HashMap::new(),
            })),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Report events to `observer` instead of the log
    pub fn with_observer(mut self, observer: Arc<dyn CacheObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn observer(&self) -> &Arc<dyn CacheObserver> {
        &self.observer
    }

    /// Get the value for `key`, fetching it at most once across concurrent callers
    pub async fn get(&self, key: &K) -> OstrivResult<Arc<V>> {
        self.get_with_ttl(key, self.ttl).await
    }

    /// Like [`Loader::get`], storing a newly fetched value for `ttl`
    pub async fn get_with_ttl(&self, key: &K, ttl: Duration) -> OstrivResult<Arc<V>> {
        let (flight, started) = {
            let mut state = lock(&self.state);

            if let Some(entry) = state.entries.get(key) {
                if entry.is_valid() {
                    return Ok(entry.value());
                }
            }

            let running = state.flights.get(key).cloned();
            match running {
                Some(flight) => (flight, false),
                None => {
                    let flight = self.flight(key.clone(), ttl);
                    state.flights.insert(key.clone(), flight.clone());
                    (flight, true)
                }
            }
        };

        if started {
            self.observer.on_event(&CacheEvent::FetchStarted {
                key: key.to_string(),
            });
        } else {
            trace!("Joining in-flight fetch for {}", key);
        }

        flight.await.map_err(OstrivError::Shared)
    }

    fn flight(&self, key: K, ttl: Duration) -> Flight<V> {
        let fetcher = Arc::clone(&self.fetcher);
        let state = Arc::clone(&self.state);
        let observer = Arc::clone(&self.observer);

        async move {
            let result = fetcher.fetch(&key).await;

            let outcome = {
                let mut state = lock(&state);
                state.flights.remove(&key);
                match result {
                    Ok(value) => {
                        let value = Arc::new(value);
                        state.store_fresh(key.clone(), Arc::clone(&value), ttl);
                        Ok(value)
                    }
                    Err(err) => Err(Arc::new(err)),
                }
            };

            let event = match &outcome {
                Ok(_) => CacheEvent::FetchSucceeded {
                    key: key.to_string(),
                },
                Err(err) => CacheEvent::FetchFailed {
                    key: key.to_string(),
                    error: err.to_string(),
                },
            };
            observer.on_event(&event);

            outcome
        }
        .boxed()
        .shared()
    }

    /// Cached value for `key` if it has not expired; never fetches
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        lock(&self.state)
            .entries
            .get(key)
            .filter(|entry| entry.is_valid())
            .map(CacheEntry::value)
    }

    /// Last stored value for `key`, expired or not
    pub fn peek_stale(&self, key: &K) -> Option<Arc<V>> {
        lock(&self.state).entries.get(key).map(CacheEntry::value)
    }

    /// Snapshot of the entry stored for `key`
    pub fn entry(&self, key: &K) -> Option<CacheEntry<V>> {
        lock(&self.state).entries.get(key).cloned()
    }

    pub fn is_in_flight(&self, key: &K) -> bool {
        lock(&self.state).flights.contains_key(key)
    }

    /// Drop the cached value for `key`
    ///
    /// A fetch already running for `key` still stores its result.
    pub fn invalidate(&self, key: &K) {
        lock(&self.state).entries.remove(key);
    }

    /// Drop every cached value
    pub fn invalidate_all(&self) {
        lock(&self.state).entries.clear();
    }

    /// Serve `value` for `ttl` unless a servable entry already exists
    ///
    /// Returns whichever value ends up cached.
    pub(crate) fn install_degraded(&self, key: &K, value: Arc<V>, ttl: Duration) -> Arc<V> {
        let mut state = lock(&self.state);
        if let Some(entry) = state.entries.get(key) {
            if entry.is_valid() {
                return entry.value();
            }
        }
        state.entries.insert(
            key.clone(),
            CacheEntry::degraded(Arc::clone(&value), expiry_after(ttl)),
        );
        value
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Fetcher that counts calls and can be switched into failure mode
    pub struct CountingFetcher {
        pub calls: AtomicUsize,
        pub fail: AtomicBool,
        pub delay: Duration,
    }

    impl CountingFetcher {
        pub fn new(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
                delay,
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl Fetcher<String, String> for CountingFetcher {
        async fn fetch(&self, key: &String) -> OstrivResult<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(self.delay).await;
            if self.fail.load(Ordering::SeqCst) {
                return Err(OstrivError::unreachable("http://cms.test", "connection refused"));
            }
            Ok(format!("{key}#{n}"))
        }
    }
}
