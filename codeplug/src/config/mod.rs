//! Configuration system for codeplug generation.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project `codeplug.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`CODEPLUG_*`)
//! 3. An explicit file (via `ConfigBuilder::with_file`)
//! 4. Project config (`codeplug.yaml`)
//! 5. User config (`~/.codeplug/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use codeplug::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//! println!("Bands: {:?}", config.bands());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use codeplug::config::{Config, ConfigBuilder, ZoneConfig};
//!
//! let custom = Config {
//!     locator: Some("IO91".to_string()),
//!     zones: Some(ZoneConfig {
//!         max_channels: Some(64),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.zone_assigner().max_channels(), 64);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{ChannelConfig, Config, SourceConfig, TalkgroupConfig, ZoneConfig};
pub use validator::ConfigValidator;
