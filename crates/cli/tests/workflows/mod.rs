//! Workflow integration tests
//!
//! Each module drives the `quell` binary end to end.

pub mod filter_flow;
pub mod replay_flow;
pub mod search_flow;
