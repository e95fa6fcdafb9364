#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # codeplug
//!
//! A library for turning amateur-radio repeater directory data and DMR
//! talkgroup lists into a codeplug for a handheld radio.
//!
//! The pipeline filters repeaters, converts them into analog and DMR
//! channels, groups the channels into capacity-bounded zones and curates a
//! talkgroup list. The result is written as the three CSV tables the
//! radio's programming software imports, and can be rendered into a text
//! configuration for the `dmrconfig` flashing tool.
//!
//! ## Core Types
//!
//! - [`Repeater`], [`Channel`], [`Zone`], [`TalkGroup`]: the data model
//! - [`RepeaterFilter`], [`ChannelTransformer`], [`ZoneAssigner`],
//!   [`TalkgroupCurator`]: the pipeline stages
//! - [`Codeplug`]: the assembled result
//! - [`ConfigRenderer`]: the `dmrconfig` text serializer
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use codeplug::{RegionResolver, Repeater, RepeaterFilter};
//!
//! let resolver = RegionResolver::new();
//! assert_eq!(resolver.resolve("IO91WM"), "LONDON");
//!
//! let beacon = Repeater {
//!     status: "OPERATIONAL".to_string(),
//!     kind: "BN".to_string(),
//!     mode_codes: vec!["A".to_string()],
//!     ..Default::default()
//! };
//! assert!(RepeaterFilter::new(None).filter(vec![beacon]).is_empty());
//! ```

pub mod codeplug;
pub mod config;
pub mod error;
pub mod filter;
pub mod flash;
pub mod identity;
pub mod logging;
pub mod model;
pub mod region;
pub mod render;
pub mod simplex;
pub mod table;
pub mod talkgroups;
pub mod transform;
pub mod zones;

// Re-export key types at crate root for convenience
pub use codeplug::{Codeplug, TablePaths};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use filter::RepeaterFilter;
pub use flash::FlashCommand;
pub use identity::lookup_radio_user;
pub use logging::{init_logger, LogLevel, Logger};
pub use model::{CallType, Channel, PowerLevel, RadioUser, Repeater, TalkGroup, Zone};
pub use region::RegionResolver;
pub use render::{write_config, ConfigInputs, ConfigRenderer, RenderOptions};
pub use talkgroups::{TalkgroupCurator, TalkgroupFilter};
pub use transform::{ChannelPolicy, ChannelTransformer, DmrSlots};
pub use zones::{ZoneAssigner, ZoneGrouping};
