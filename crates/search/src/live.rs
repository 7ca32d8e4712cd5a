//! Live filtering and searching driven by debounced input

use crate::item::{FilterCriteria, FilterField, Item, LocalIndex};
use crate::Result;
use async_trait::async_trait;
use dispatch::{DebouncedDispatcher, DispatcherConfig, DispatcherSet, Scheduler, TokioScheduler};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Result of one settled filter change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub criteria: FilterCriteria,
    pub matched: Vec<Item>,
    /// Size of the whole index
    pub total: usize,
}

/// Filter inputs over a local index, one dispatcher per input
///
/// Inputs hold their raw value as soon as it is typed. Whenever one input
/// settles, the filter runs against the current value of every input.
pub struct LiveFilter<S = TokioScheduler>
where
    S: Scheduler + Clone,
{
    inputs: DispatcherSet<FilterField, (), S>,
    criteria: Arc<Mutex<FilterCriteria>>,
}

impl<S> LiveFilter<S>
where
    S: Scheduler + Clone,
{
    /// `on_settled` runs with the full criteria each time an input settles
    pub fn new<F>(
        config: DispatcherConfig,
        scheduler: S,
        index: Arc<LocalIndex>,
        initial: FilterCriteria,
        on_settled: F,
    ) -> Self
    where
        F: Fn(FilterOutcome) + Send + Sync + 'static,
    {
        let criteria = Arc::new(Mutex::new(initial));

        let current = Arc::clone(&criteria);
        let inputs = DispatcherSet::new(config, scheduler, move |field: &FilterField, ()| {
            let snapshot = current.lock().clone();

            let matched: Vec<Item> = index.filter(&snapshot).into_iter().cloned().collect();
            debug!(
                "Filter settled on {:?}: {} of {} items",
                field,
                matched.len(),
                index.len()
            );

            on_settled(FilterOutcome {
                criteria: snapshot,
                matched,
                total: index.len(),
            });
        });

        Self { inputs, criteria }
    }

    /// A keystroke (or selection) in one filter input
    pub fn input(&self, field: FilterField, value: impl Into<String>) {
        self.criteria.lock().apply(field, value.into());
        self.inputs.trigger(field, ());
    }

    /// Current value of every input, settled or not
    pub fn criteria(&self) -> FilterCriteria {
        self.criteria.lock().clone()
    }

    /// Settle every pending input now; returns how many ran
    pub fn flush_all(&self) -> usize {
        [FilterField::Term, FilterField::Kind, FilterField::Status]
            .iter()
            .filter(|field| self.inputs.flush(field))
            .count()
    }

    /// Drop every pending filter run; input values are kept
    pub fn cancel_all(&self) -> usize {
        self.inputs.cancel_all()
    }

    pub fn is_pending(&self, field: FilterField) -> bool {
        self.inputs.is_pending(&field)
    }
}

/// Query facility standing in for the remote search API
#[async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    async fn search(&self, query: &str) -> Result<Vec<Item>>;
}

#[async_trait]
impl SearchBackend for LocalIndex {
    async fn search(&self, query: &str) -> Result<Vec<Item>> {
        let criteria = FilterCriteria::term(query);
        Ok(self.filter(&criteria).into_iter().cloned().collect())
    }
}

/// Results delivered for one settled query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub query: String,
    /// Empty means "no results"
    pub items: Vec<Item>,
}

/// Search-as-you-type over a [`SearchBackend`]
///
/// Queries run as tokio tasks. A response that arrives after the response
/// to a newer query is discarded, so results never go backwards.
pub struct LiveSearch {
    dispatcher: DebouncedDispatcher<String>,
}

impl LiveSearch {
    /// Must be called inside a tokio runtime.
    pub fn new<B>(
        config: DispatcherConfig,
        min_query_len: usize,
        backend: Arc<B>,
        results: mpsc::UnboundedSender<SearchResults>,
    ) -> Self
    where
        B: SearchBackend,
    {
        let issued = Arc::new(AtomicU64::new(0));
        let delivered = Arc::new(Mutex::new(0u64));
        let runtime = tokio::runtime::Handle::current();

        let action = move |query: String| {
            if query.chars().count() < min_query_len {
                debug!("Query '{}' below minimum length {}, not sent", query, min_query_len);
                return;
            }

            let seq = issued.fetch_add(1, Ordering::SeqCst) + 1;
            let backend = Arc::clone(&backend);
            let delivered = Arc::clone(&delivered);
            let results = results.clone();

            runtime.spawn(async move {
                match backend.search(&query).await {
                    Ok(items) => {
                        let mut latest = delivered.lock();
                        if seq < *latest {
                            debug!("Dropping stale results for '{}'", query);
                            return;
                        }
                        *latest = seq;
                        if results.send(SearchResults { query, items }).is_err() {
                            debug!("Results receiver closed");
                        }
                    }
                    Err(e) => warn!("Search for '{}' failed: {:#}", query, e),
                }
            });
        };

        Self {
            dispatcher: DebouncedDispatcher::new(config, TokioScheduler::current(), action),
        }
    }

    /// The full current text of the search box
    pub fn input(&self, text: impl Into<String>) {
        self.dispatcher.trigger(text.into());
    }

    /// Send the pending query now
    pub fn flush(&self) -> bool {
        self.dispatcher.flush()
    }

    /// Drop the pending query
    pub fn cancel(&self) -> bool {
        self.dispatcher.cancel()
    }

    pub fn dispatcher(&self) -> &DebouncedDispatcher<String> {
        &self.dispatcher
    }
}
