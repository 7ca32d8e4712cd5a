//! Host timer primitives: schedule-after-delay and cancel-scheduled
//!
//! Dispatchers never sleep themselves. They hand a job to a [`Scheduler`]
//! and keep the returned [`TimerHandle`] so the job can be cancelled when
//! it is superseded.

use std::future::Future;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Unit of deferred work
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a scheduled job
///
/// Dropping a handle must NOT cancel the job; only [`TimerHandle::cancel`]
/// does. A dispatcher drops the handle of the job that is currently firing.
pub trait TimerHandle: Send + 'static {
    /// Cancel the job. No effect if it already ran.
    fn cancel(self);
}

/// Timer source supplied by the host environment
pub trait Scheduler: Send + Sync + 'static {
    type Handle: TimerHandle;

    /// Current time on this scheduler's clock
    fn now(&self) -> Instant;

    /// Run `job` once `delay` has elapsed.
    ///
    /// Implementations must never run the job before returning, even for a
    /// zero delay.
    fn schedule(&self, delay: Duration, job: Job) -> Self::Handle;
}

/// Scheduler backed by tokio timers
///
/// Each job is a spawned task sleeping until its deadline. The clock is
/// `tokio::time::Instant`, so paused test time is honored.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Scheduler on the runtime of the calling context
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, like `tokio::spawn`.
    pub fn current() -> Self {
        Self {
            handle: Handle::current(),
        }
    }

    /// Scheduler on the runtime of the calling context, if there is one
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::from_handle)
    }

    /// Scheduler on an explicit runtime
    pub fn from_handle(handle: Handle) -> Self {
        Self { handle }
    }

    fn spawn<F>(&self, future: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handle.spawn(future)
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioTimer;

    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    fn schedule(&self, delay: Duration, job: Job) -> TokioTimer {
        // Deadline is fixed now, not when the task is first polled.
        let deadline = tokio::time::Instant::now() + delay;

        let task = self.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            job();
        });

        TokioTimer { task }
    }
}

/// Handle to a job scheduled on a [`TokioScheduler`]
#[derive(Debug)]
pub struct TokioTimer {
    task: JoinHandle<()>,
}

impl TimerHandle for TokioTimer {
    fn cancel(self) {
        self.task.abort();
    }
}
