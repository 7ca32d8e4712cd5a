//! Live search and filtering for Quell
//!
//! This crate provides:
//! - Items, filter criteria and an in-memory index
//! - `LiveFilter` (per-input debounced filtering)
//! - `LiveSearch` (debounced search-as-you-type over a `SearchBackend`)

pub mod item;
pub mod live;

// Re-exports
pub use item::{FilterCriteria, FilterField, Item, LocalIndex};
pub use live::{FilterOutcome, LiveFilter, LiveSearch, SearchBackend, SearchResults};

/// Result type for search operations
pub type Result<T> = anyhow::Result<T>;
