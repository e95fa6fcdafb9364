//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{ChannelConfig, Config, ZoneConfig};
use super::validator::ConfigValidator;
use crate::model::PowerLevel;
use crate::transform::DmrSlots;
use crate::zones::ZoneGrouping;
use proptest::prelude::*;

fn power_strategy() -> impl Strategy<Value = PowerLevel> {
    prop_oneof![
        Just(PowerLevel::Turbo),
        Just(PowerLevel::High),
        Just(PowerLevel::Mid),
        Just(PowerLevel::Low),
    ]
}

fn channel_config_strategy() -> impl Strategy<Value = ChannelConfig> {
    (
        prop::option::of(prop_oneof![Just(DmrSlots::Single), Just(DmrSlots::Dual)]),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(dmr_slots, include_town)| ChannelConfig {
            dmr_slots,
            include_town,
        })
}

fn zone_config_strategy() -> impl Strategy<Value = ZoneConfig> {
    (
        prop::option::of(prop_oneof![
            Just(ZoneGrouping::BandMode),
            Just(ZoneGrouping::RegionModeType)
        ]),
        prop::option::of(1usize..=250),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(grouping, max_channels, include_simplex)| ZoneConfig {
            grouping,
            max_channels,
            include_simplex,
        })
}

fn radio_model_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 -]{0,19}"
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("[A-R]{2}[0-9]{2}"),
        prop::option::of(power_strategy()),
        prop::option::of(channel_config_strategy()),
        prop::option::of(zone_config_strategy()),
        prop::option::of(radio_model_strategy()),
    )
        .prop_map(|(locator, power, channels, zones, radio_model)| Config {
            locator,
            power,
            channels,
            zones,
            radio_model,
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Values present in the higher layer always win; absent ones fall through
    #[test]
    fn merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(&result.locator, if high.locator.is_some() { &high.locator } else { &low.locator });
        prop_assert_eq!(result.power, high.power.or(low.power));
        prop_assert_eq!(
            &result.radio_model,
            if high.radio_model.is_some() { &high.radio_model } else { &low.radio_model }
        );

        let low_slots = low.channels.as_ref().and_then(|c| c.dmr_slots);
        let high_slots = high.channels.as_ref().and_then(|c| c.dmr_slots);
        let result_slots = result.channels.as_ref().and_then(|c| c.dmr_slots);
        prop_assert_eq!(result_slots, high_slots.or(low_slots));

        let low_cap = low.zones.as_ref().and_then(|z| z.max_channels);
        let high_cap = high.zones.as_ref().and_then(|z| z.max_channels);
        let result_cap = result.zones.as_ref().and_then(|z| z.max_channels);
        prop_assert_eq!(result_cap, high_cap.or(low_cap));
    }

    // Merging a config into itself changes nothing
    #[test]
    fn merge_is_idempotent(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &config);
        prop_assert_eq!(result, config);
    }

    // Merging an empty config changes nothing
    #[test]
    fn merge_empty_is_identity(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &Config::default());
        prop_assert_eq!(result, config);
    }

    // Everything the strategy produces is a valid configuration
    #[test]
    fn generated_configs_validate(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }

    // The resolved zone cap always honours the configured value
    #[test]
    fn zone_cap_resolves(zones in zone_config_strategy()) {
        let expected = zones.max_channels.unwrap_or(250);
        let config = Config { zones: Some(zones), ..Default::default() };
        prop_assert_eq!(config.zone_assigner().max_channels(), expected);
    }

    // Radio models always carry a visible first character
    #[test]
    fn generated_radio_models_validate(model in radio_model_strategy()) {
        prop_assert!(!model.trim().is_empty());
        let config = Config { radio_model: Some(model), ..Default::default() };
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }
}

#[test]
fn whitespace_radio_model_rejected() {
    for model in [" ", "   ", "\t"] {
        let config = Config {
            radio_model: Some(model.to_string()),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_err(), "{model:?} accepted");
    }
}
