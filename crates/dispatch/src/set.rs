//! Per-input dispatchers
//!
//! Each logical input (a search box, a filter field) gets its own
//! dispatcher, created on first use and kept under that input's key, so
//! inputs never cancel each other's pending work.

use crate::debounce::DebouncedDispatcher;
use crate::scheduler::{Scheduler, TokioScheduler};
use dashmap::DashMap;
use quell_core::DispatcherConfig;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

type KeyedAction<K, A> = Arc<dyn Fn(&K, A) + Send + Sync>;

/// Dispatchers keyed by input identity, sharing one action and window
pub struct DispatcherSet<K, A, S = TokioScheduler>
where
    K: Eq + Hash,
    S: Scheduler,
{
    config: DispatcherConfig,
    scheduler: S,
    action: KeyedAction<K, A>,
    dispatchers: DashMap<K, DebouncedDispatcher<A, S>>,
}

impl<K, A, S> DispatcherSet<K, A, S>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    A: Send + 'static,
    S: Scheduler + Clone,
{
    /// `action` receives the key of the input that settled
    pub fn new<F>(config: DispatcherConfig, scheduler: S, action: F) -> Self
    where
        F: Fn(&K, A) + Send + Sync + 'static,
    {
        Self {
            config,
            scheduler,
            action: Arc::new(action),
            dispatchers: DashMap::new(),
        }
    }

    /// Trigger the dispatcher of `key`, creating it on first use
    pub fn trigger(&self, key: K, args: A) {
        self.dispatcher(key).trigger(args);
    }

    /// The dispatcher of `key`, creating it on first use
    pub fn dispatcher(&self, key: K) -> DebouncedDispatcher<A, S> {
        // Clone out of the map: the shard lock must not be held while the
        // dispatcher runs an action that may come back to this set.
        self.dispatchers
            .entry(key.clone())
            .or_insert_with(|| {
                debug!("Creating dispatcher for new input");
                let action = Arc::clone(&self.action);
                DebouncedDispatcher::new(self.config, self.scheduler.clone(), move |args| {
                    action(&key, args)
                })
            })
            .value()
            .clone()
    }

    /// The dispatcher of `key`, if it exists
    pub fn get(&self, key: &K) -> Option<DebouncedDispatcher<A, S>> {
        self.dispatchers.get(key).map(|entry| entry.value().clone())
    }

    /// Cancel the pending invocation of `key`
    pub fn cancel(&self, key: &K) -> bool {
        self.get(key).is_some_and(|dispatcher| dispatcher.cancel())
    }

    /// Run the pending invocation of `key` now
    pub fn flush(&self, key: &K) -> bool {
        self.get(key).is_some_and(|dispatcher| dispatcher.flush())
    }

    /// Whether `key` has a pending invocation
    pub fn is_pending(&self, key: &K) -> bool {
        self.get(key).is_some_and(|dispatcher| dispatcher.is_pending())
    }

    /// Cancel every pending invocation, returning how many were cancelled
    pub fn cancel_all(&self) -> usize {
        self.all()
            .into_iter()
            .filter(|dispatcher| dispatcher.cancel())
            .count()
    }

    /// Forget `key`; its pending invocation is cancelled
    pub fn remove(&self, key: &K) -> bool {
        match self.dispatchers.remove(key) {
            Some((_, dispatcher)) => {
                dispatcher.cancel();
                true
            }
            None => false,
        }
    }

    /// Number of inputs seen
    pub fn len(&self) -> usize {
        self.dispatchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dispatchers.is_empty()
    }

    fn all(&self) -> Vec<DebouncedDispatcher<A, S>> {
        self.dispatchers
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}
