//! CLI command definitions.

pub mod config;
pub mod serve;
pub mod tools;
