//! Library half of the `quell` CLI, shared with integration tests

pub mod input;
pub mod replay;
