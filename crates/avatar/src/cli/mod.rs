//! CLI command implementations.

pub mod config;
pub mod generate;
pub mod serve;
