//! Error types shared by the library crates

use std::path::PathBuf;
use thiserror::Error;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, Error>;

/// Library error
///
/// Dispatching itself never fails; these cover configuration and I/O
/// around it. Failures raised by a wrapped action are not represented here.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is outside its valid range
    #[error("invalid value for {key}: {value} (valid range: {range})")]
    OutOfRange {
        key: &'static str,
        value: u64,
        range: &'static str,
    },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// A configuration value could not be parsed
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// No platform config directory could be determined
    #[error("could not determine config directory")]
    NoConfigDir,

    /// Failed to read or write a file
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a TOML file
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Failed to serialize configuration
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
