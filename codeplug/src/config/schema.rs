//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered; the
//! accessor methods on [`Config`] resolve the defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::filter::RepeaterFilter;
use crate::model::{PowerLevel, MAX_ZONE_CHANNELS};
use crate::render::DEFAULT_RADIO_MODEL;
use crate::talkgroups::{TalkgroupCurator, TalkgroupFilter};
use crate::transform::{ChannelPolicy, DmrSlots};
use crate::zones::{ZoneAssigner, ZoneGrouping};

/// Bands fetched when none are configured.
pub const DEFAULT_BANDS: &[&str] = &["2m", "70cm"];

/// Directory the tables and config are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Base URL of the repeater directory API.
pub const DEFAULT_REPEATER_API: &str = "https://api-beta.rsgb.online";

/// Base URL of the BrandMeister API.
pub const DEFAULT_BRANDMEISTER_API: &str = "https://api.brandmeister.network/v2";

/// Location of the RadioID users table.
pub const DEFAULT_RADIOID_USERS: &str = "https://www.radioid.net/static/user.csv";

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use codeplug::config::{ChannelConfig, Config};
/// use codeplug::DmrSlots;
///
/// let config = Config {
///     locator: Some("IO91".to_string()),
///     channels: Some(ChannelConfig {
///         dmr_slots: Some(DmrSlots::Single),
///         include_town: None,
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.channel_policy().dmr_slots, DmrSlots::Single);
/// assert!(!config.channel_policy().include_town);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Keep only repeaters whose locator starts with this prefix.
    pub locator: Option<String>,

    /// Bands to fetch, e.g. `2m`, `70cm`.
    pub bands: Option<Vec<String>>,

    /// Transmit power for generated channels.
    pub power: Option<PowerLevel>,

    /// Channel generation policy.
    pub channels: Option<ChannelConfig>,

    /// Zone layout.
    pub zones: Option<ZoneConfig>,

    /// Talkgroup curation.
    pub talkgroups: Option<TalkgroupConfig>,

    /// Radio model written to the flash config.
    pub radio_model: Option<String>,

    /// Output directory for tables and configs.
    pub output_dir: Option<PathBuf>,

    /// Remote data sources.
    pub sources: Option<SourceConfig>,
}

/// Channel generation settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    /// One merged DMR channel or one per timeslot.
    pub dmr_slots: Option<DmrSlots>,

    /// Insert the town into channel names when it fits.
    pub include_town: Option<bool>,
}

/// Zone layout settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ZoneConfig {
    /// Grouping key.
    pub grouping: Option<ZoneGrouping>,

    /// Maximum channels per zone.
    pub max_channels: Option<usize>,

    /// Append the static simplex and utility zones.
    pub include_simplex: Option<bool>,
}

/// Talkgroup curation settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TalkgroupConfig {
    /// Which talkgroups to keep.
    pub filter: Option<TalkgroupFilter>,

    /// ID prefixes for the prefix filter.
    pub prefixes: Option<Vec<String>>,
}

/// Remote data source locations.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Repeater directory API base URL.
    pub repeater_api: Option<String>,

    /// BrandMeister API base URL.
    pub brandmeister_api: Option<String>,

    /// RadioID users CSV URL.
    pub radioid_users: Option<String>,
}

impl Config {
    /// Configured bands, or [`DEFAULT_BANDS`].
    #[must_use]
    pub fn bands(&self) -> Vec<String> {
        match &self.bands {
            Some(bands) if !bands.is_empty() => bands.clone(),
            _ => DEFAULT_BANDS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Configured transmit power.
    #[must_use]
    pub fn power(&self) -> PowerLevel {
        self.power.unwrap_or_default()
    }

    /// Channel transformer policy.
    #[must_use]
    pub fn channel_policy(&self) -> ChannelPolicy {
        let channels = self.channels.clone().unwrap_or_default();
        ChannelPolicy {
            dmr_slots: channels.dmr_slots.unwrap_or_default(),
            include_town: channels.include_town.unwrap_or(false),
            power: self.power(),
        }
    }

    /// Zone assigner with the configured grouping and cap.
    #[must_use]
    pub fn zone_assigner(&self) -> ZoneAssigner {
        let zones = self.zones.clone().unwrap_or_default();
        ZoneAssigner::new(
            zones.grouping.unwrap_or_default(),
            zones.max_channels.unwrap_or(MAX_ZONE_CHANNELS),
        )
    }

    /// Whether the static zones are appended.
    #[must_use]
    pub fn include_simplex(&self) -> bool {
        self.zones
            .as_ref()
            .and_then(|z| z.include_simplex)
            .unwrap_or(true)
    }

    /// Talkgroup curator with the configured filter.
    #[must_use]
    pub fn talkgroup_curator(&self) -> TalkgroupCurator {
        let talkgroups = self.talkgroups.clone().unwrap_or_default();
        TalkgroupCurator::new(
            talkgroups.filter.unwrap_or_default(),
            &talkgroups.prefixes.unwrap_or_default(),
        )
    }

    /// Repeater filter for the configured locator prefix.
    #[must_use]
    pub fn repeater_filter(&self) -> RepeaterFilter {
        RepeaterFilter::new(self.locator.as_deref())
    }

    /// Radio model for the flash config.
    #[must_use]
    pub fn radio_model(&self) -> String {
        self.radio_model
            .clone()
            .unwrap_or_else(|| DEFAULT_RADIO_MODEL.to_string())
    }

    /// Output directory.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    fn source(&self, pick: impl Fn(&SourceConfig) -> Option<&String>, default: &str) -> String {
        self.sources
            .as_ref()
            .and_then(pick)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Repeater directory API base URL.
    #[must_use]
    pub fn repeater_api(&self) -> String {
        self.source(|s| s.repeater_api.as_ref(), DEFAULT_REPEATER_API)
    }

    /// BrandMeister API base URL.
    #[must_use]
    pub fn brandmeister_api(&self) -> String {
        self.source(|s| s.brandmeister_api.as_ref(), DEFAULT_BRANDMEISTER_API)
    }

    /// RadioID users CSV URL.
    #[must_use]
    pub fn radioid_users(&self) -> String {
        self.source(|s| s.radioid_users.as_ref(), DEFAULT_RADIOID_USERS)
    }
}
