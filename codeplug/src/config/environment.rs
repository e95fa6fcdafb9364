//! Environment variable handling for configuration overrides.
//!
//! `CODEPLUG_*` variables override values from configuration files.

use std::env;
use std::path::PathBuf;

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::model::PowerLevel;
use crate::talkgroups::TalkgroupFilter;
use crate::transform::DmrSlots;
use crate::zones::ZoneGrouping;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use codeplug::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds a value that does not parse
    /// (an unknown power level, a non-numeric cap, an invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(locator) = env::var("CODEPLUG_LOCATOR") {
            config.locator = Some(locator);
        }

        if let Ok(power) = env::var("CODEPLUG_POWER") {
            config.power = Some(PowerLevel::parse(&power).map_err(|message| Error::Validation {
                field: "CODEPLUG_POWER".into(),
                message,
            })?);
        }

        if let Ok(bands) = env::var("CODEPLUG_BANDS") {
            config.bands = Some(Self::parse_list(&bands));
        }

        if let Ok(val) = env::var("CODEPLUG_RADIO_MODEL") {
            config.radio_model = Some(val);
        }

        if let Ok(val) = env::var("CODEPLUG_OUTPUT_DIR") {
            config.output_dir = Some(PathBuf::from(val));
        }

        Self::apply_channel_overrides(config)?;
        Self::apply_zone_overrides(config)?;

        if let Ok(val) = env::var("CODEPLUG_TALKGROUP_FILTER") {
            let filter = Self::parse_enum::<TalkgroupFilter>("CODEPLUG_TALKGROUP_FILTER", &val)?;
            config
                .talkgroups
                .get_or_insert_with(Default::default)
                .filter = Some(filter);
        }

        Ok(())
    }

    fn apply_channel_overrides(config: &mut Config) -> Result<()> {
        let mut channels = config.channels.clone().unwrap_or_default();
        let mut modified = false;

        if let Ok(val) = env::var("CODEPLUG_DMR_SLOTS") {
            channels.dmr_slots = Some(Self::parse_enum::<DmrSlots>("CODEPLUG_DMR_SLOTS", &val)?);
            modified = true;
        }

        if let Ok(val) = env::var("CODEPLUG_INCLUDE_TOWN") {
            channels.include_town = Some(Self::parse_bool("CODEPLUG_INCLUDE_TOWN", &val)?);
            modified = true;
        }

        if modified {
            config.channels = Some(channels);
        }
        Ok(())
    }

    fn apply_zone_overrides(config: &mut Config) -> Result<()> {
        let mut zones = config.zones.clone().unwrap_or_default();
        let mut modified = false;

        if let Ok(val) = env::var("CODEPLUG_ZONE_GROUPING") {
            zones.grouping = Some(Self::parse_enum::<ZoneGrouping>("CODEPLUG_ZONE_GROUPING", &val)?);
            modified = true;
        }

        if let Ok(val) = env::var("CODEPLUG_MAX_ZONE_CHANNELS") {
            zones.max_channels = Some(val.trim().parse().map_err(|_| Error::Validation {
                field: "CODEPLUG_MAX_ZONE_CHANNELS".into(),
                message: "Must be a positive integer".into(),
            })?);
            modified = true;
        }

        if modified {
            config.zones = Some(zones);
        }
        Ok(())
    }

    /// Split a comma-separated list, dropping empty items.
    fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// Parse a value by its command-line name, e.g. `band-mode`.
    fn parse_enum<T: clap::ValueEnum>(field: &str, s: &str) -> Result<T> {
        T::from_str(s.trim(), true).map_err(|message| Error::Validation {
            field: field.into(),
            message,
        })
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "CODEPLUG_LOCATOR",
        "CODEPLUG_POWER",
        "CODEPLUG_BANDS",
        "CODEPLUG_DMR_SLOTS",
        "CODEPLUG_INCLUDE_TOWN",
        "CODEPLUG_ZONE_GROUPING",
        "CODEPLUG_MAX_ZONE_CHANNELS",
        "CODEPLUG_TALKGROUP_FILTER",
        "CODEPLUG_RADIO_MODEL",
        "CODEPLUG_OUTPUT_DIR",
    ];

    fn clear() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_no_variables_leaves_config_alone() {
        clear();
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_overrides_applied() {
        clear();
        env::set_var("CODEPLUG_LOCATOR", "IO94");
        env::set_var("CODEPLUG_POWER", "Mid");
        env::set_var("CODEPLUG_BANDS", "70cm, ,2m");
        env::set_var("CODEPLUG_DMR_SLOTS", "single");
        env::set_var("CODEPLUG_INCLUDE_TOWN", "yes");
        env::set_var("CODEPLUG_ZONE_GROUPING", "band-mode");
        env::set_var("CODEPLUG_MAX_ZONE_CHANNELS", "64");
        env::set_var("CODEPLUG_TALKGROUP_FILTER", "prefix");

        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear();
        result.unwrap();

        assert_eq!(config.locator.as_deref(), Some("IO94"));
        assert_eq!(config.power, Some(PowerLevel::Mid));
        assert_eq!(config.bands(), vec!["70cm", "2m"]);
        let policy = config.channel_policy();
        assert_eq!(policy.dmr_slots, DmrSlots::Single);
        assert!(policy.include_town);
        assert_eq!(config.zone_assigner().max_channels(), 64);
        assert_eq!(config.talkgroup_curator().filter(), TalkgroupFilter::Prefix);
    }

    #[test]
    #[serial]
    fn test_invalid_values_rejected() {
        for (var, value) in [
            ("CODEPLUG_POWER", "max"),
            ("CODEPLUG_INCLUDE_TOWN", "maybe"),
            ("CODEPLUG_MAX_ZONE_CHANNELS", "lots"),
            ("CODEPLUG_ZONE_GROUPING", "alphabetical"),
        ] {
            clear();
            env::set_var(var, value);
            let mut config = Config::default();
            let result = EnvironmentConfig::apply_overrides(&mut config);
            clear();
            assert!(
                matches!(result, Err(Error::Validation { ref field, .. }) if field == var),
                "{var}={value} should be rejected"
            );
        }
    }

    #[test]
    #[serial]
    fn test_env_keeps_file_values_it_does_not_set() {
        clear();
        env::set_var("CODEPLUG_INCLUDE_TOWN", "true");
        let mut config: Config = serde_yaml::from_str("channels:\n  dmr_slots: single\n").unwrap();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear();
        result.unwrap();

        let policy = config.channel_policy();
        assert_eq!(policy.dmr_slots, DmrSlots::Single);
        assert!(policy.include_town);
    }
}
