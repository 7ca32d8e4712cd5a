//! Shared configuration and error types for Quell
//!
//! This crate provides:
//! - `DispatcherConfig` (the immutable debounce window of one dispatcher)
//! - `QuellConfig` (user configuration file, TOML)
//! - The library error taxonomy

pub mod config;
pub mod error;

// Re-exports
pub use config::{DispatcherConfig, QuellConfig};
pub use error::{Error, Result};
