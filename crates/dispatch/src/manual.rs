//! Virtual-clock scheduler
//!
//! Time only moves when [`ManualScheduler::advance`] is called, which makes
//! debounce timing fully deterministic for tests and trigger replays.

use crate::scheduler::{Job, Scheduler, TimerHandle};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

/// Jobs are ordered by deadline, then by scheduling order
type JobKey = (Duration, u64);

struct ManualState {
    elapsed: Duration,
    next_id: u64,
    queue: BTreeMap<JobKey, Job>,
}

/// Scheduler driven by an explicitly advanced virtual clock
#[derive(Clone)]
pub struct ManualScheduler {
    origin: Instant,
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            state: Arc::new(Mutex::new(ManualState {
                elapsed: Duration::ZERO,
                next_id: 0,
                queue: BTreeMap::new(),
            })),
        }
    }

    /// Virtual time since this scheduler was created
    pub fn elapsed(&self) -> Duration {
        self.state.lock().elapsed
    }

    /// Number of jobs waiting to run
    pub fn pending_jobs(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Run every job that is due right now, without moving the clock
    ///
    /// This is the "next scheduling turn" for zero-delay jobs.
    pub fn run_ready(&self) -> usize {
        self.advance(Duration::ZERO)
    }

    /// Move the clock forward by `by`, running due jobs in order
    ///
    /// The clock steps to each job's deadline before running it, so a job
    /// observing [`Scheduler::now`] sees its own deadline. Jobs scheduled by
    /// running jobs also run if they fall due before the target time.
    /// Returns the number of jobs run.
    ///
    /// A panicking job propagates out of this call; the clock stays at that
    /// job's deadline.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.elapsed() + by;
        self.advance_to(target)
    }

    /// Move the clock forward to `target` (no-op if already past it)
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut ran = 0;

        loop {
            let job = {
                let mut state = self.state.lock();
                let due = state
                    .queue
                    .first_key_value()
                    .map(|(key, _)| *key)
                    .filter(|(deadline, _)| *deadline <= target);

                match due {
                    Some(key) => {
                        state.elapsed = state.elapsed.max(key.0);
                        state.queue.remove(&key)
                    }
                    None => {
                        state.elapsed = state.elapsed.max(target);
                        None
                    }
                }
            };

            // Never run a job while holding the lock: jobs may schedule more.
            match job {
                Some(job) => {
                    job();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ManualScheduler")
            .field("elapsed", &state.elapsed)
            .field("pending_jobs", &state.queue.len())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn schedule(&self, delay: Duration, job: Job) -> ManualTimer {
        let mut state = self.state.lock();
        let key = (state.elapsed + delay, state.next_id);
        state.next_id += 1;
        state.queue.insert(key, job);

        ManualTimer {
            key,
            state: Arc::downgrade(&self.state),
        }
    }
}

/// Handle to a job scheduled on a [`ManualScheduler`]
pub struct ManualTimer {
    key: JobKey,
    state: Weak<Mutex<ManualState>>,
}

impl TimerHandle for ManualTimer {
    fn cancel(self) {
        if let Some(state) = self.state.upgrade() {
            state.lock().queue.remove(&self.key);
        }
    }
}
