//! Debounced dispatch
//!
//! A [`DebouncedDispatcher`] collapses a burst of triggers into a single
//! delayed call of its action, made with the arguments of the last trigger.
//!
//! ```text
//!            trigger                    trigger (cancel + reschedule)
//!   IDLE ─────────────▶ PENDING ◀──────────────────┐
//!     ▲                    │  └─────────────────────┘
//!     └────────────────────┘
//!       timer fires / flush() / cancel()
//! ```

use crate::scheduler::{Scheduler, TimerHandle, TokioScheduler};
use parking_lot::Mutex;
use quell_core::DispatcherConfig;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Dispatcher state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// No invocation scheduled
    Idle,
    /// Exactly one invocation scheduled
    Pending,
}

/// Lifetime counters of one dispatcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Calls to `trigger`
    pub triggered: u64,
    /// Pending invocations replaced by a newer trigger
    pub superseded: u64,
    /// Action invocations (timer or flush)
    pub fired: u64,
    /// Pending invocations dropped by `cancel`
    pub cancelled: u64,
}

/// The single outstanding scheduled call of a dispatcher
pub(crate) struct PendingInvocation<A, H> {
    /// Distinguishes this invocation from superseded ones whose timers
    /// may already have expired
    seq: u64,
    args: A,
    created_at: Instant,
    delay: Duration,
    timer: H,
}

impl<A, H> PendingInvocation<A, H> {
    fn remaining(&self, now: Instant) -> Duration {
        self.delay
            .saturating_sub(now.saturating_duration_since(self.created_at))
    }
}

struct Slot<A, H> {
    pending: Option<PendingInvocation<A, H>>,
    next_seq: u64,
    stats: DispatchStats,
}

type Action<A> = Box<dyn Fn(A) + Send + Sync>;

struct Inner<A, S: Scheduler> {
    config: DispatcherConfig,
    scheduler: S,
    action: Action<A>,
    slot: Mutex<Slot<A, S::Handle>>,
}

impl<A, S> Inner<A, S>
where
    A: Send + 'static,
    S: Scheduler,
{
    /// Timer callback for invocation `seq`
    fn fire(&self, seq: u64) {
        let args = {
            let mut slot = self.slot.lock();

            let current = slot.pending.as_ref().map(|pending| pending.seq);
            if current != Some(seq) {
                trace!("Ignoring stale timer for invocation {}", seq);
                return;
            }

            let Some(pending) = slot.pending.take() else {
                return;
            };
            slot.stats.fired += 1;
            pending.args
        };

        // Slot is already idle: a panicking action cannot wedge the dispatcher.
        debug!("Firing invocation {}", seq);
        (self.action)(args);
    }
}

impl<A, S: Scheduler> Drop for Inner<A, S> {
    fn drop(&mut self) {
        if let Some(pending) = self.slot.get_mut().pending.take() {
            pending.timer.cancel();
        }
    }
}

/// Coalesces rapid triggers into one delayed action call
///
/// Clones share the same pending slot. When the last clone is dropped, a
/// pending invocation is cancelled and never runs.
pub struct DebouncedDispatcher<A, S: Scheduler = TokioScheduler> {
    inner: Arc<Inner<A, S>>,
}

impl<A, S: Scheduler> Clone for DebouncedDispatcher<A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, S> DebouncedDispatcher<A, S>
where
    A: Send + 'static,
    S: Scheduler,
{
    /// Wrap `action` so it runs once per debounce window
    pub fn new<F>(config: DispatcherConfig, scheduler: S, action: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                config,
                scheduler,
                action: Box::new(action),
                slot: Mutex::new(Slot {
                    pending: None,
                    next_seq: 0,
                    stats: DispatchStats::default(),
                }),
            }),
        }
    }

    /// Request an eventual call of the action with `args`
    ///
    /// Any pending invocation is cancelled and will never run; a new one is
    /// scheduled `delay` from now. Never blocks and never runs the action
    /// itself, not even with a zero delay.
    pub fn trigger(&self, args: A) {
        let inner = &self.inner;
        let delay = inner.config.delay();
        let mut slot = inner.slot.lock();

        slot.stats.triggered += 1;
        if let Some(previous) = slot.pending.take() {
            slot.stats.superseded += 1;
            trace!("Superseding invocation {}", previous.seq);
            previous.timer.cancel();
        }

        let seq = slot.next_seq;
        slot.next_seq += 1;

        let weak: Weak<Inner<A, S>> = Arc::downgrade(inner);
        let timer = inner.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.fire(seq);
                }
            }),
        );

        slot.pending = Some(PendingInvocation {
            seq,
            args,
            created_at: inner.scheduler.now(),
            delay,
            timer,
        });
        debug!("Scheduled invocation {} in {:?}", seq, delay);
    }

    /// Drop the pending invocation without running it
    ///
    /// Returns false (and does nothing) when idle.
    pub fn cancel(&self) -> bool {
        let mut slot = self.inner.slot.lock();
        match slot.pending.take() {
            Some(pending) => {
                slot.stats.cancelled += 1;
                debug!("Cancelled invocation {}", pending.seq);
                pending.timer.cancel();
                true
            }
            None => false,
        }
    }

    /// Run the pending invocation now instead of waiting for its timer
    ///
    /// Returns false (and does nothing) when idle.
    pub fn flush(&self) -> bool {
        let pending = {
            let mut slot = self.inner.slot.lock();
            let Some(pending) = slot.pending.take() else {
                return false;
            };
            slot.stats.fired += 1;
            pending
        };

        debug!("Flushing invocation {}", pending.seq);
        pending.timer.cancel();
        (self.inner.action)(pending.args);
        true
    }

    /// Current state
    pub fn state(&self) -> DispatchState {
        if self.is_pending() {
            DispatchState::Pending
        } else {
            DispatchState::Idle
        }
    }

    /// Whether an invocation is scheduled
    pub fn is_pending(&self) -> bool {
        self.inner.slot.lock().pending.is_some()
    }

    /// Time left before the pending invocation fires
    pub fn pending_remaining(&self) -> Option<Duration> {
        let now = self.inner.scheduler.now();
        self.inner
            .slot
            .lock()
            .pending
            .as_ref()
            .map(|pending| pending.remaining(now))
    }

    /// Lifetime counters
    pub fn stats(&self) -> DispatchStats {
        self.inner.slot.lock().stats
    }

    /// Configured debounce window
    pub fn config(&self) -> DispatcherConfig {
        self.inner.config
    }

    /// Plain callable form, for handing to event sources
    pub fn trigger_fn(&self) -> impl Fn(A) + Clone + Send + Sync + 'static {
        let dispatcher = self.clone();
        move |args| dispatcher.trigger(args)
    }
}

impl<A, S: Scheduler> std::fmt::Debug for DebouncedDispatcher<A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.inner.slot.lock();
        f.debug_struct("DebouncedDispatcher")
            .field("delay", &self.inner.config.delay())
            .field("pending", &slot.pending.is_some())
            .field("stats", &slot.stats)
            .finish()
    }
}

/// Debounce `action` by `delay` on the current tokio runtime
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
pub fn debounce<A, F>(delay: Duration, action: F) -> DebouncedDispatcher<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    DebouncedDispatcher::new(
        DispatcherConfig::new(delay),
        TokioScheduler::current(),
        action,
    )
}
