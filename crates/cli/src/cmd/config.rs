//! Configuration management command
//!
//! Provides CLI interface to view and edit the user configuration.

use crate::util;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use quell_core::config;

/// List all configuration values
pub async fn run_list() -> Result<()> {
    let config = util::load_config()?;
    let config_path = config::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", "Quell Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!("{}", "[dispatch]".yellow());
    println!(
        "  {} = {} {}",
        "default_delay_ms".cyan(),
        config.dispatch.default_delay_ms,
        "(replay)".dimmed()
    );

    println!("\n{}", "[search]".yellow());
    println!("  {} = {}", "delay_ms".cyan(), config.search.delay_ms);
    println!(
        "  {} = {} {}",
        "min_query_len".cyan(),
        config.search.min_query_len,
        if config.search.min_query_len == 0 {
            "(send every query)".dimmed().to_string()
        } else {
            "(shorter queries are not sent)".dimmed().to_string()
        }
    );

    println!("\n{}", "[filter]".yellow());
    println!("  {} = {}", "delay_ms".cyan(), config.filter.delay_ms);

    println!("\n{}", "Valid Ranges:".bold());
    println!("  *_delay_ms / delay_ms: 0-{}", config::MAX_DELAY_MS);
    println!("  min_query_len: 0-{}", config::MAX_MIN_QUERY_LEN);

    Ok(())
}

/// Get a single configuration value
pub async fn run_get(key: &str) -> Result<()> {
    let config = util::load_config()?;

    let value = config.get(key).with_context(|| {
        format!("Unknown config key: {}. Use 'quell config list' to see available keys.", key)
    })?;

    println!("{}", value);
    Ok(())
}

/// Set a configuration value
pub async fn run_set(key: &str, value: &str) -> Result<()> {
    let mut config = util::load_config()?;

    config.set(key, value)
        .context("Invalid configuration value")?;

    config::save(&config)
        .context("Failed to save configuration")?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(create: bool) -> Result<()> {
    let config_path = config::config_file_path()
        .context("Could not determine config file path")?;

    if create && config::init_if_missing()? {
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else {
        println!("{}", config_path.display());
        if !config_path.exists() {
            println!("{}", "File does not exist. Use --create to create it.".yellow());
        }
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}
