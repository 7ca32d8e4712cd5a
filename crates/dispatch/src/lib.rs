//! Debounced dispatch for Quell
//!
//! This crate provides:
//! - `DebouncedDispatcher` (one pending invocation, last arguments win)
//! - The `Scheduler` seam over host timers (tokio, or a manual clock)
//! - `DispatcherSet` (one dispatcher per logical input)

pub mod debounce;
pub mod manual;
pub mod scheduler;
pub mod set;

// Re-exports
pub use debounce::{debounce, DebouncedDispatcher, DispatchState, DispatchStats};
pub use manual::{ManualScheduler, ManualTimer};
pub use quell_core::DispatcherConfig;
pub use scheduler::{Job, Scheduler, TimerHandle, TokioScheduler, TokioTimer};
pub use set::DispatcherSet;
