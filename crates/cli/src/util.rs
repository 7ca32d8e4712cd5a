//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use quell_core::{config, QuellConfig};
use search::{FilterOutcome, Item, SearchResults};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Load the user config with CLI-friendly errors
pub fn load_config() -> Result<QuellConfig> {
    config::load().context("Failed to load configuration")
}

/// Check a `--delay-ms` flag against the configured range
pub fn check_delay_flag(delay_ms: u64) -> Result<u64> {
    if delay_ms > config::MAX_DELAY_MS {
        anyhow::bail!(
            "--delay-ms {} is out of range (0-{})",
            delay_ms,
            config::MAX_DELAY_MS
        );
    }
    Ok(delay_ms)
}

/// Stdin as a stream of lines
pub fn stdin_lines() -> Lines<BufReader<Stdin>> {
    BufReader::new(tokio::io::stdin()).lines()
}

/// Print one value as a JSON line
pub fn print_json_line<T: Serialize>(value: &T) -> Result<()> {
    let line = serde_json::to_string(value).context("Failed to serialize output")?;
    println!("{}", line);
    Ok(())
}

pub fn print_filter_outcome(outcome: &FilterOutcome) {
    let mut header = format!("\"{}\"", outcome.criteria.term);
    if let Some(kind) = &outcome.criteria.kind {
        header.push_str(&format!(" type={}", kind));
    }
    if let Some(status) = &outcome.criteria.status {
        header.push_str(&format!(" status={}", status));
    }

    println!(
        "{} {} {}",
        "filter".yellow(),
        header.cyan(),
        format!("({} of {})", outcome.matched.len(), outcome.total).dimmed()
    );
    print_items(&outcome.matched);
}

pub fn print_search_results(results: &SearchResults) {
    println!(
        "{} {} {}",
        "search".yellow(),
        format!("\"{}\"", results.query).cyan(),
        format!("({} results)", results.items.len()).dimmed()
    );
    if results.items.is_empty() {
        println!("  {}", "No results found".dimmed());
    }
    print_items(&results.items);
}

fn print_items(items: &[Item]) {
    for item in items {
        let mut tags = Vec::new();
        if let Some(kind) = &item.kind {
            tags.push(kind.as_str());
        }
        if let Some(status) = &item.status {
            tags.push(status.as_str());
        }

        if tags.is_empty() {
            println!("  • {}", item.title.bold());
        } else {
            let tags = format!("[{}]", tags.join(", "));
            println!("  • {} {}", item.title.bold(), tags.dimmed());
        }
        if let Some(url) = &item.url {
            println!("    {}", url.blue().underline());
        }
    }
}
