//! Configuration merging and precedence handling.
//!
//! Higher-precedence sources overwrite lower ones field by field, nested
//! sections included.

use crate::config::loader::ConfigSource;
use crate::config::schema::{ChannelConfig, Config, SourceConfig, TalkgroupConfig, ZoneConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use codeplug::config::{Config, ConfigMerger};
///
/// let low = Config { locator: Some("IO".to_string()), ..Default::default() };
/// let high = Config { locator: Some("IO91".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.locator, Some("IO91".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            log::debug!("Merging configuration from {}", source.path.display());
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Lists (`bands`, `talkgroups.prefixes`): complete replacement
    /// - Nested configs: field-by-field merge
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.locator.is_some() {
            target.locator.clone_from(&source.locator);
        }

        if source.bands.is_some() {
            target.bands.clone_from(&source.bands);
        }

        if source.power.is_some() {
            target.power = source.power;
        }

        if source.radio_model.is_some() {
            target.radio_model.clone_from(&source.radio_model);
        }

        if source.output_dir.is_some() {
            target.output_dir.clone_from(&source.output_dir);
        }

        if let Some(ref source_channels) = source.channels {
            target.channels = Some(match &target.channels {
                Some(target_channels) => Self::merge_channels(target_channels, source_channels),
                None => source_channels.clone(),
            });
        }

        if let Some(ref source_zones) = source.zones {
            target.zones = Some(match &target.zones {
                Some(target_zones) => Self::merge_zones(target_zones, source_zones),
                None => source_zones.clone(),
            });
        }

        if let Some(ref source_talkgroups) = source.talkgroups {
            target.talkgroups = Some(match &target.talkgroups {
                Some(target_talkgroups) => {
                    Self::merge_talkgroups(target_talkgroups, source_talkgroups)
                }
                None => source_talkgroups.clone(),
            });
        }

        if let Some(ref source_sources) = source.sources {
            target.sources = Some(match &target.sources {
                Some(target_sources) => Self::merge_sources(target_sources, source_sources),
                None => source_sources.clone(),
            });
        }
    }

    fn merge_channels(target: &ChannelConfig, source: &ChannelConfig) -> ChannelConfig {
        ChannelConfig {
            dmr_slots: source.dmr_slots.or(target.dmr_slots),
            include_town: source.include_town.or(target.include_town),
        }
    }

    fn merge_zones(target: &ZoneConfig, source: &ZoneConfig) -> ZoneConfig {
        ZoneConfig {
            grouping: source.grouping.or(target.grouping),
            max_channels: source.max_channels.or(target.max_channels),
            include_simplex: source.include_simplex.or(target.include_simplex),
        }
    }

    fn merge_talkgroups(target: &TalkgroupConfig, source: &TalkgroupConfig) -> TalkgroupConfig {
        TalkgroupConfig {
            filter: source.filter.or(target.filter),
            prefixes: source.prefixes.clone().or_else(|| target.prefixes.clone()),
        }
    }

    fn merge_sources(target: &SourceConfig, source: &SourceConfig) -> SourceConfig {
        SourceConfig {
            repeater_api: source
                .repeater_api
                .clone()
                .or_else(|| target.repeater_api.clone()),
            brandmeister_api: source
                .brandmeister_api
                .clone()
                .or_else(|| target.brandmeister_api.clone()),
            radioid_users: source
                .radioid_users
                .clone()
                .or_else(|| target.radioid_users.clone()),
        }
    }
}
