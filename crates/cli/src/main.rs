//! Quell CLI - quell command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;
mod util;

/// Quell - debounced input dispatch
#[derive(Parser)]
#[command(name = "quell")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a timed trigger script on a virtual clock
    Replay {
        /// Script file (TOML with [[event]] entries)
        script: PathBuf,
        /// Debounce window, overriding the script and config
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Filter an item list as filter lines arrive on stdin
    Filter {
        /// JSON array of items
        items: PathBuf,
        /// Debounce window (default: [filter].delay_ms)
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Initial kind filter
        #[arg(long)]
        kind: Option<String>,
        /// Initial status filter
        #[arg(long)]
        status: Option<String>,
        /// Print each outcome as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Search an item list as queries arrive on stdin
    Search {
        /// JSON array of items
        items: PathBuf,
        /// Debounce window (default: [search].delay_ms)
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Shortest query that is sent (default: [search].min_query_len)
        #[arg(long)]
        min_len: Option<usize>,
        /// Print each result set as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// View or edit configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all configuration values
    List,
    /// Print one value
    Get {
        /// Dotted key, e.g. search.delay_ms
        key: String,
    },
    /// Set one value
    Set {
        /// Dotted key, e.g. search.delay_ms
        key: String,
        value: String,
    },
    /// Show the config file path
    Path {
        /// Create the file with defaults if missing
        #[arg(long)]
        create: bool,
    },
    /// Print an annotated example config
    Example,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { script, delay_ms, json } => {
            cmd::replay::run(&script, delay_ms, json).await
        }
        Commands::Filter { items, delay_ms, kind, status, json } => {
            cmd::filter::run(&items, delay_ms, kind, status, json).await
        }
        Commands::Search { items, delay_ms, min_len, json } => {
            cmd::search::run(&items, delay_ms, min_len, json).await
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List => cmd::config::run_list().await,
            ConfigCommands::Get { key } => cmd::config::run_get(&key).await,
            ConfigCommands::Set { key, value } => cmd::config::run_set(&key, &value).await,
            ConfigCommands::Path { create } => cmd::config::run_path(create).await,
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}
