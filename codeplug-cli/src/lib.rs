//! Library exports for codeplug-cli.
//!
//! This module exports the CLI structure so shell completions and
//! documentation can be generated from it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod fetch;
pub mod utils;

pub use cli::Cli;
