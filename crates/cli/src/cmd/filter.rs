//! Live filtering of an item list driven by stdin

use crate::util;
use anyhow::Result;
use cli_lib::input::parse_filter_line;
use dispatch::{DispatcherConfig, TokioScheduler};
use search::{FilterCriteria, LiveFilter, LocalIndex};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn run(
    items: &Path,
    delay_ms: Option<u64>,
    kind: Option<String>,
    status: Option<String>,
    json: bool,
) -> Result<()> {
    let config = util::load_config()?;
    let dispatcher_config = match delay_ms {
        Some(ms) => DispatcherConfig::from_millis(util::check_delay_flag(ms)?),
        None => config.filter_dispatcher(),
    };

    let index = Arc::new(LocalIndex::load(items)?);
    tracing::info!("Loaded {} items from {}", index.len(), items.display());

    let initial = FilterCriteria {
        term: String::new(),
        kind: kind.filter(|k| !k.is_empty()),
        status: status.filter(|s| !s.is_empty()),
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let filter = LiveFilter::new(
        dispatcher_config,
        TokioScheduler::current(),
        index,
        initial,
        move |outcome| {
            // Receiver outlives the filter
            let _ = tx.send(outcome);
        },
    );

    let mut lines = util::stdin_lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    let (field, value) = parse_filter_line(&line);
                    filter.input(field, value);
                }
                None => break,
            },
            Some(outcome) = rx.recv() => print(&outcome, json)?,
        }
    }

    // End of input: settle whatever is still pending.
    filter.flush_all();
    drop(filter);

    while let Ok(outcome) = rx.try_recv() {
        print(&outcome, json)?;
    }

    Ok(())
}

fn print(outcome: &search::FilterOutcome, json: bool) -> Result<()> {
    if json {
        util::print_json_line(outcome)
    } else {
        util::print_filter_outcome(outcome);
        Ok(())
    }
}
