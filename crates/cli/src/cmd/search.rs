//! Search-as-you-type over an item list driven by stdin

use crate::util;
use anyhow::Result;
use dispatch::DispatcherConfig;
use search::{LiveSearch, LocalIndex, SearchResults};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn run(
    items: &Path,
    delay_ms: Option<u64>,
    min_len: Option<usize>,
    json: bool,
) -> Result<()> {
    let config = util::load_config()?;
    let dispatcher_config = match delay_ms {
        Some(ms) => DispatcherConfig::from_millis(util::check_delay_flag(ms)?),
        None => config.search_dispatcher(),
    };
    let min_query_len = min_len.unwrap_or(config.search.min_query_len);

    let index = Arc::new(LocalIndex::load(items)?);
    tracing::info!("Loaded {} items from {}", index.len(), items.display());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let search = LiveSearch::new(dispatcher_config, min_query_len, index, tx);

    let mut lines = util::stdin_lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => search.input(line),
                None => break,
            },
            Some(results) = rx.recv() => print(&results, json)?,
        }
    }

    // End of input: send the pending query, then wait for in-flight results.
    search.flush();
    drop(search);

    while let Some(results) = rx.recv().await {
        print(&results, json)?;
    }

    Ok(())
}

fn print(results: &SearchResults, json: bool) -> Result<()> {
    if json {
        util::print_json_line(results)
    } else {
        util::print_search_results(results);
        Ok(())
    }
}
