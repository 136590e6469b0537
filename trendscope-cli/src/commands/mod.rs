//! CLI command implementations.

pub mod autocomplete;
pub mod config;
pub mod trending;
