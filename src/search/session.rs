//! Incremental product search behind a search box
//!
//! ```text
//!            non-empty input             quiet period            lookup done
//!   Idle ─────────────────────▶ Pending ─────────────▶ Loading ─────────────▶ Resolved
//!    ▲                            │  ▲                                           │
//!    │        empty input,        │  └──────────── different input ──────────────┘
//!    └──── submit, select, close ─┘
//! ```
//!
//! Every change of query bumps a generation counter. A lookup remembers the
//! generation it was started for and its result is dropped if the counter
//! has moved on, so only the latest query ever reaches the view.

use crate::cache::{Loader, TtlCache};
use crate::catalog::types::{Product, ProductQuery};
use crate::config::schema::SearchConfig;
use crate::error::OstrivResult;
use crate::navigation::{Destination, Navigator};
use crate::search::debounce::Debouncer;
use crate::search::filter::suggest;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::watch;
use tracing::debug;

/// Where the products being searched come from
#[async_trait]
pub trait SearchCorpus: Send + Sync {
    async fn products(&self) -> OstrivResult<Arc<Vec<Product>>>;

    /// Whether `products` would answer without a fetch
    fn is_cached(&self) -> bool;
}

#[async_trait]
impl SearchCorpus for Loader<ProductQuery, Vec<Product>> {
    async fn products(&self) -> OstrivResult<Arc<Vec<Product>>> {
        self.get(&ProductQuery::All).await
    }

    fn is_cached(&self) -> bool {
        self.peek(&ProductQuery::All).is_some()
    }
}

#[async_trait]
impl SearchCorpus for TtlCache<ProductQuery, Vec<Product>> {
    async fn products(&self) -> OstrivResult<Arc<Vec<Product>>> {
        self.get(&ProductQuery::All).await
    }

    fn is_cached(&self) -> bool {
        self.peek(&ProductQuery::All).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Nothing to look up
    Idle,
    /// Waiting for typing to pause
    Pending,
    /// Lookup running
    Loading,
    /// Suggestions are up to date
    Resolved,
}

/// What the search box shows
#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub query: String,
    pub phase: SearchPhase,
    /// Suggestion list visible
    pub open: bool,
    /// Loading indicator visible
    pub loading: bool,
    pub suggestions: Vec<Product>,
}

impl SearchView {
    fn idle(query: String) -> Self {
        Self {
            query,
            phase: SearchPhase::Idle,
            open: false,
            loading: false,
            suggestions: Vec::new(),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.phase, SearchPhase::Idle | SearchPhase::Resolved)
    }
}

struct State {
    query: String,
    generation: u64,
    debouncer: Debouncer,
    closed: bool,
}

struct Shared {
    corpus: Arc<dyn SearchCorpus>,
    navigator: Arc<dyn Navigator>,
    max_suggestions: usize,
    state: Mutex<State>,
    view: watch::Sender<SearchView>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn phase(&self) -> SearchPhase {
        self.view.borrow().phase
    }

    /// Supersede everything in progress and show nothing
    fn hide(&self, state: &mut State) {
        state.generation += 1;
        state.debouncer.cancel();
        self.view.send_replace(SearchView::idle(state.query.clone()));
    }

    fn quiet_period_elapsed(shared: Weak<Shared>, generation: u64) {
        let Some(shared) = shared.upgrade() else {
            return;
        };

        {
            let state = shared.lock();
            if state.closed || state.generation != generation {
                return;
            }
            shared.view.send_modify(|view| view.phase = SearchPhase::Loading);
        }

        let corpus = Arc::clone(&shared.corpus);
        let weak = Arc::downgrade(&shared);
        tokio::spawn(async move {
            let result = corpus.products().await;
            if let Some(shared) = weak.upgrade() {
                shared.finish_lookup(generation, result);
            }
        });
    }

    fn finish_lookup(&self, generation: u64, result: OstrivResult<Arc<Vec<Product>>>) {
        let state = self.lock();
        if state.closed || state.generation != generation {
            debug!("Dropping superseded search results for generation {}", generation);
            return;
        }

        let suggestions = match result {
            Ok(products) => suggest(&products, &state.query, self.max_suggestions),
            Err(err) => {
                debug!("Search lookup failed: {}", err);
                Vec::new()
            }
        };

        self.view.send_modify(|view| {
            view.phase = SearchPhase::Resolved;
            view.loading = false;
            view.suggestions = suggestions;
        });
    }
}

/// State of one search box
///
/// Methods that schedule work must be called within a tokio runtime.
/// Dropping the session closes it.
pub struct SearchSession {
    shared: Arc<Shared>,
}

impl SearchSession {
    pub fn new(
        corpus: Arc<dyn SearchCorpus>,
        navigator: Arc<dyn Navigator>,
        config: &SearchConfig,
    ) -> Self {
        let (view, _) = watch::channel(SearchView::idle(String::new()));
        let shared = Arc::new(Shared {
            corpus,
            navigator,
            max_suggestions: config.max_suggestions,
            state: Mutex::new(State {
                query: String::new(),
                generation: 0,
                debouncer: Debouncer::new(config.quiet_period()),
                closed: false,
            }),
            view,
        });
        Self { shared }
    }

    /// Handle the search box's new text
    pub fn input(&self, text: &str) {
        let term = text.trim();
        let shared = &self.shared;
        let mut state = shared.lock();
        if state.closed {
            return;
        }

        if term.is_empty() {
            state.query.clear();
            shared.hide(&mut state);
            return;
        }

        if term == state.query && shared.phase() != SearchPhase::Idle {
            return;
        }

        state.query = term.to_string();
        state.generation += 1;
        let generation = state.generation;

        shared.view.send_replace(SearchView {
            query: state.query.clone(),
            phase: SearchPhase::Pending,
            open: true,
            loading: !shared.corpus.is_cached(),
            suggestions: Vec::new(),
        });

        let weak = Arc::downgrade(shared);
        state
            .debouncer
            .schedule(move || Shared::quiet_period_elapsed(weak, generation));
    }

    /// Search the catalog for the current query
    ///
    /// Returns where it navigated, or `None` when the query is empty.
    /// Suggestions are closed either way.
    pub fn submit(&self) -> Option<Destination> {
        let term = {
            let mut state = self.shared.lock();
            self.shared.hide(&mut state);
            state.query.clone()
        };

        if term.is_empty() {
            return None;
        }
        let destination = Destination::search(term);
        self.shared.navigator.navigate(&destination);
        Some(destination)
    }

    /// Take a suggestion: its name becomes the query and is searched
    pub fn select(&self, product: &Product) -> Option<Destination> {
        let term = product.name.trim();
        if term.is_empty() {
            return None;
        }

        {
            let mut state = self.shared.lock();
            state.query = term.to_string();
            self.shared.hide(&mut state);
        }

        let destination = Destination::search(term);
        self.shared.navigator.navigate(&destination);
        Some(destination)
    }

    /// Tear down: no timer fires and no lookup result lands afterwards
    pub fn close(&self) {
        let mut state = self.shared.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        self.shared.hide(&mut state);
    }

    pub fn view(&self) -> SearchView {
        self.shared.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.shared.view.subscribe()
    }

    /// Wait until the session is idle or its suggestions are resolved
    pub async fn settled(&self) -> SearchView {
        let mut rx = self.subscribe();
        let settled = rx.wait_for(SearchView::is_settled).await.map(|view| view.clone());
        settled.unwrap_or_else(|_| self.view())
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.close();
    }
}
