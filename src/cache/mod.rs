//! In-memory catalog cache
//!
//! Two layers over an arbitrary async [`Fetcher`]:
//!
//! - [`Loader`] memoizes results per key and collapses concurrent requests
//!   for the same key into a single fetch (single-flight).
//! - [`TtlCache`] adds the refresh policy: expired entries are refetched,
//!   and a failed refresh serves the last good value under a shorter,
//!   degraded lifetime so the next access retries sooner.
//!
//! # Entry States
//!
//! | State | Served | Description |
//! |-------|--------|-------------|
//! | Fresh | yes | Fetched successfully, within `ttl` |
//! | Degraded | yes | Fallback after a failed refresh, within `degraded_ttl` |
//! | Expired | no | Refetched on next access, kept for fallback |
//!
//! Failures are reported to a [`CacheObserver`]; the default
//! [`TracingObserver`] logs them.

pub mod entry;
pub mod loader;
pub mod observer;
pub mod ttl;

pub use entry::CacheEntry;
pub use loader::{fetcher_fn, FnFetcher, Fetcher, Loader};
pub use observer::{CacheEvent, CacheObserver, TracingObserver};
pub use ttl::TtlCache;
