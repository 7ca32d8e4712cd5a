//! Deterministic replay of timed trigger scripts
//!
//! A script lists triggers, cancels and flushes at virtual timestamps:
//!
//! ```toml
//! delay_ms = 300
//!
//! [[event]]
//! at_ms = 0
//! kind = "trigger"
//! value = "a"
//!
//! [[event]]
//! at_ms = 150
//! kind = "cancel"
//! ```
//!
//! Events run on a manual clock. Events sharing a timestamp form one
//! synchronous turn; timers due at that timestamp fire before the turn.

use anyhow::{Context, Result};
use dispatch::{DebouncedDispatcher, DispatchStats, DispatcherConfig, ManualScheduler};
use parking_lot::Mutex;
use quell_core::config::MAX_DELAY_MS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Parsed replay script
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplayScript {
    /// Debounce window; falls back to the configured default
    #[serde(default)]
    pub delay_ms: Option<u64>,
    #[serde(default, rename = "event")]
    pub events: Vec<ReplayEvent>,
}

/// One scripted event
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayEvent {
    pub at_ms: u64,
    pub kind: EventKind,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Trigger,
    Cancel,
    Flush,
}

/// One action invocation observed during replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fired {
    pub at_ms: u64,
    pub value: String,
}

/// Replay outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub delay_ms: u64,
    pub fired: Vec<Fired>,
    pub triggered: u64,
    pub superseded: u64,
    pub cancelled: u64,
}

impl ReplayReport {
    fn new(delay_ms: u64, fired: Vec<Fired>, stats: DispatchStats) -> Self {
        Self {
            delay_ms,
            fired,
            triggered: stats.triggered,
            superseded: stats.superseded,
            cancelled: stats.cancelled,
        }
    }
}

impl ReplayScript {
    /// Parse a script from TOML text
    pub fn parse(text: &str) -> Result<Self> {
        let script: ReplayScript = toml::from_str(text).context("Invalid replay script")?;
        script.validate()?;
        Ok(script)
    }

    /// Load a script file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to load {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        for (i, event) in self.events.iter().enumerate() {
            if event.kind == EventKind::Trigger && event.value.is_none() {
                anyhow::bail!("Event {} (at {}ms) is a trigger without a value", i, event.at_ms);
            }
        }
        Ok(())
    }

    /// Run the script
    ///
    /// `delay_override` wins over the script's own `delay_ms`, which wins
    /// over `default_delay_ms`.
    pub fn run(&self, delay_override: Option<u64>, default_delay_ms: u64) -> Result<ReplayReport> {
        let delay_ms = delay_override.or(self.delay_ms).unwrap_or(default_delay_ms);
        if delay_ms > MAX_DELAY_MS {
            anyhow::bail!("delay_ms {} exceeds the maximum of {}", delay_ms, MAX_DELAY_MS);
        }

        let scheduler = ManualScheduler::new();
        let fired = Arc::new(Mutex::new(Vec::new()));

        let clock = scheduler.clone();
        let sink = Arc::clone(&fired);
        let dispatcher = DebouncedDispatcher::new(
            DispatcherConfig::from_millis(delay_ms),
            scheduler.clone(),
            move |value: String| {
                sink.lock().push(Fired {
                    at_ms: clock.elapsed().as_millis() as u64,
                    value,
                });
            },
        );

        let mut events = self.events.clone();
        events.sort_by_key(|event| event.at_ms);

        let mut turn = None;
        for event in &events {
            if turn != Some(event.at_ms) {
                scheduler.advance_to(Duration::from_millis(event.at_ms));
                turn = Some(event.at_ms);
            }
            match event.kind {
                EventKind::Trigger => {
                    if let Some(value) = &event.value {
                        dispatcher.trigger(value.clone());
                    }
                }
                EventKind::Cancel => {
                    dispatcher.cancel();
                }
                EventKind::Flush => {
                    dispatcher.flush();
                }
            }
        }

        // Let the last window elapse.
        scheduler.advance(Duration::from_millis(delay_ms));

        let stats = dispatcher.stats();
        let fired = std::mem::take(&mut *fired.lock());
        Ok(ReplayReport::new(delay_ms, fired, stats))
    }
}
