//! CLI command implementations.

pub mod batch;
pub mod check;
pub mod common;
pub mod evaluate;
pub mod sample;
pub mod version;
