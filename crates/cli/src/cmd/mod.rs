//! CLI command implementations

pub mod config;
pub mod filter;
pub mod replay;
pub mod search;
