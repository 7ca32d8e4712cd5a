//! Configuration for dispatchers and the live search/filter glue
//!
//! The user configuration lives at `<config_dir>/quell/config.toml`
//! (overridable with `QUELL_CONFIG`). A missing file means defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "QUELL_CONFIG";

/// Upper bound for any configured debounce window
pub const MAX_DELAY_MS: u64 = 60_000;

/// Upper bound for the minimum query length
pub const MAX_MIN_QUERY_LEN: u64 = 64;

/// Immutable debounce window of a single dispatcher
///
/// A zero delay is valid: the action is still deferred to the next
/// scheduling opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatcherConfig {
    delay: Duration,
}

impl DispatcherConfig {
    /// Create a config with the given debounce window
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Create a config from a window in milliseconds
    pub const fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    /// Debounce window
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Debounce window in whole milliseconds
    pub fn delay_ms(&self) -> u64 {
        self.delay.as_millis() as u64
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::from_millis(DispatchSection::default().default_delay_ms)
    }
}

/// User configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuellConfig {
    pub dispatch: DispatchSection,
    pub search: SearchSection,
    pub filter: FilterSection,
}

/// `[dispatch]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchSection {
    /// Window used when no call-site specific delay applies (replay)
    pub default_delay_ms: u64,
}

impl Default for DispatchSection {
    fn default() -> Self {
        Self {
            default_delay_ms: 300,
        }
    }
}

/// `[search]` - remote-style query as you type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    pub delay_ms: u64,
    /// Queries shorter than this, in characters, are never sent
    pub min_query_len: usize,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            delay_ms: 500,
            min_query_len: 2,
        }
    }
}

/// `[filter]` - local filtering of already loaded items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSection {
    pub delay_ms: u64,
}

impl Default for FilterSection {
    fn default() -> Self {
        Self { delay_ms: 300 }
    }
}

/// Every key accepted by [`QuellConfig::get`] and [`QuellConfig::set`]
pub const KEYS: &[&str] = &[
    "dispatch.default_delay_ms",
    "search.delay_ms",
    "search.min_query_len",
    "filter.delay_ms",
];

impl QuellConfig {
    /// Dispatcher config for replayed trigger scripts
    pub fn replay_dispatcher(&self) -> DispatcherConfig {
        DispatcherConfig::from_millis(self.dispatch.default_delay_ms)
    }

    /// Dispatcher config for the search box
    pub fn search_dispatcher(&self) -> DispatcherConfig {
        DispatcherConfig::from_millis(self.search.delay_ms)
    }

    /// Dispatcher config for filter inputs
    pub fn filter_dispatcher(&self) -> DispatcherConfig {
        DispatcherConfig::from_millis(self.filter.delay_ms)
    }

    /// Check every value against its valid range
    pub fn validate(&self) -> Result<()> {
        check_delay("dispatch.default_delay_ms", self.dispatch.default_delay_ms)?;
        check_delay("search.delay_ms", self.search.delay_ms)?;
        check_delay("filter.delay_ms", self.filter.delay_ms)?;

        let min_len = self.search.min_query_len as u64;
        if min_len > MAX_MIN_QUERY_LEN {
            return Err(Error::OutOfRange {
                key: "search.min_query_len",
                value: min_len,
                range: "0-64",
            });
        }

        Ok(())
    }

    /// Read a single value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "dispatch.default_delay_ms" => self.dispatch.default_delay_ms.to_string(),
            "search.delay_ms" => self.search.delay_ms.to_string(),
            "search.min_query_len" => self.search.min_query_len.to_string(),
            "filter.delay_ms" => self.filter.delay_ms.to_string(),
            _ => return Err(Error::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// Set a single value by dotted key, then validate
    ///
    /// On error the config is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();

        match key {
            "dispatch.default_delay_ms" => {
                updated.dispatch.default_delay_ms = parse_u64(key, value)?
            }
            "search.delay_ms" => updated.search.delay_ms = parse_u64(key, value)?,
            "search.min_query_len" => {
                updated.search.min_query_len = parse_u64(key, value)? as usize
            }
            "filter.delay_ms" => updated.filter.delay_ms = parse_u64(key, value)?,
            _ => return Err(Error::UnknownKey(key.to_string())),
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn check_delay(key: &'static str, value: u64) -> Result<()> {
    if value > MAX_DELAY_MS {
        return Err(Error::OutOfRange {
            key,
            value,
            range: "0-60000",
        });
    }
    Ok(())
}

fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| Error::InvalidValue {
        key: key.to_string(),
        reason: format!("'{}' is not a non-negative integer", value),
    })
}

/// Resolve the config file path
///
/// `QUELL_CONFIG` wins over the platform config directory.
pub fn config_file_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|dir| dir.join("quell").join("config.toml"))
        .ok_or(Error::NoConfigDir)
}

/// Load the user config (defaults if the file does not exist)
pub fn load() -> Result<QuellConfig> {
    load_from(&config_file_path()?)
}

/// Load config from an explicit path (defaults if it does not exist)
pub fn load_from(path: &Path) -> Result<QuellConfig> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(QuellConfig::default());
    }

    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let config: QuellConfig = toml::from_str(&text).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    config.validate()?;
    Ok(config)
}

/// Save the user config
pub fn save(config: &QuellConfig) -> Result<()> {
    save_to(&config_file_path()?, config)
}

/// Save config to an explicit path, creating parent directories
pub fn save_to(path: &Path, config: &QuellConfig) -> Result<()> {
    config.validate()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let text = toml::to_string_pretty(config)?;
    std::fs::write(path, text).map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Write the default config if no file exists yet
///
/// Returns true if a file was created.
pub fn init_if_missing() -> Result<bool> {
    let path = config_file_path()?;
    if path.exists() {
        return Ok(false);
    }
    save_to(&path, &QuellConfig::default())?;
    Ok(true)
}

/// Annotated example configuration
pub fn example_config() -> String {
    r#"# Quell configuration

[dispatch]
# Debounce window for replayed trigger scripts (0-60000 ms)
default_delay_ms = 300

[search]
# Wait this long after the last keystroke before querying (0-60000 ms)
delay_ms = 500
# Shorter queries are not sent (0-64)
min_query_len = 2

[filter]
# Wait this long after the last keystroke before re-filtering (0-60000 ms)
delay_ms = 300
"#
    .to_string()
}
