//! Conversion of repeater records into radio channels.
//!
//! A repeater yields zero to three channels: one analog channel when it
//! advertises FM, and one or two DMR channels depending on the configured
//! [`DmrSlots`] policy. Frequencies are swapped so the radio receives what
//! the repeater transmits.

use serde::{Deserialize, Serialize};

use crate::model::{
    truncate_name, Bandwidth, Channel, PowerLevel, Repeater, StationKind, Tone, MAX_NAME_LENGTH,
};
use crate::region::RegionResolver;

/// Repeater types that are internet gateways rather than repeaters.
pub const GATEWAY_TYPES: &[&str] = &["AG", "DG"];

/// How many channels a DMR repeater produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DmrSlots {
    /// A single channel on timeslot 1, suffixed `DMR`.
    Single,
    /// One channel per timeslot, suffixed `TS1` and `TS2`.
    #[default]
    Dual,
}

/// Naming and emission policy for the channel transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelPolicy {
    /// DMR channel emission.
    pub dmr_slots: DmrSlots,
    /// Insert as much of the town name as fits between callsign and suffix.
    pub include_town: bool,
    /// Transmit power for every generated channel.
    pub power: PowerLevel,
}

/// Strip a trailing link suffix (`-` plus one uppercase letter).
///
/// # Examples
///
/// ```
/// use codeplug::transform::clean_callsign;
///
/// assert_eq!(clean_callsign("GB3CD-L"), "GB3CD");
/// assert_eq!(clean_callsign("GB7AA"), "GB7AA");
/// ```
#[must_use]
pub fn clean_callsign(callsign: &str) -> &str {
    let bytes = callsign.as_bytes();
    match bytes {
        [.., b'-', last] if last.is_ascii_uppercase() => &callsign[..callsign.len() - 2],
        _ => callsign,
    }
}

/// Normalize a band label, e.g. `70 CM` to `70cm`.
#[must_use]
pub fn band_label(band: &str) -> String {
    band.to_lowercase().replace(' ', "")
}

/// Converts repeaters into channels under a [`ChannelPolicy`].
#[derive(Debug, Clone, Default)]
pub struct ChannelTransformer {
    policy: ChannelPolicy,
    regions: RegionResolver,
}

impl ChannelTransformer {
    /// Create a transformer with the given policy.
    #[must_use]
    pub fn new(policy: ChannelPolicy) -> Self {
        Self {
            policy,
            regions: RegionResolver::new(),
        }
    }

    /// The policy this transformer applies.
    #[must_use]
    pub fn policy(&self) -> ChannelPolicy {
        self.policy
    }

    /// Build a channel name within the radio's length limit.
    ///
    /// The name is `"{callsign} {suffix}"`, or `"{callsign} {town} {suffix}"`
    /// when the policy includes towns and there is room for at least one
    /// character of the town.
    #[must_use]
    pub fn channel_name(&self, callsign: &str, town: &str, suffix: &str) -> String {
        let clean = clean_callsign(callsign);
        let town = town.trim();
        if self.policy.include_town && !town.is_empty() {
            let reserved = clean.chars().count() + suffix.chars().count() + 2;
            let room = MAX_NAME_LENGTH.saturating_sub(reserved);
            if room > 0 {
                let town: String = town.chars().take(room).collect();
                return truncate_name(&format!("{clean} {} {suffix}", town.trim_end()));
            }
        }
        truncate_name(&format!("{clean} {suffix}"))
    }

    /// Convert a single repeater into its channels.
    #[must_use]
    pub fn channels_for(&self, repeater: &Repeater) -> Vec<Channel> {
        let band = band_label(&repeater.band);
        let region = self.regions.resolve(&repeater.locator).to_string();
        let station = if GATEWAY_TYPES.contains(&repeater.kind.as_str()) {
            StationKind::Gateway
        } else {
            StationKind::Repeater
        };

        let tag = |mut channel: Channel| {
            channel.power = self.policy.power;
            channel.band.clone_from(&band);
            channel.region.clone_from(&region);
            channel.station = station;
            channel
        };

        let mut channels = Vec::new();
        if repeater.has_analog() {
            let tone = Tone::from_hz(repeater.ctcss);
            let name = self.channel_name(&repeater.callsign, &repeater.town, "FM");
            channels.push(tag(Channel::analog(&name, repeater.tx, repeater.rx)
                .with_bandwidth(Bandwidth::from_khz(repeater.txbw))
                .with_tones(tone, tone)));
        }

        if repeater.has_dmr() {
            let color_code = repeater.color_code();
            let slots: &[(u8, &str)] = match self.policy.dmr_slots {
                DmrSlots::Single => &[(1, "DMR")],
                DmrSlots::Dual => &[(1, "TS1"), (2, "TS2")],
            };
            for (slot, suffix) in slots {
                let name = self.channel_name(&repeater.callsign, &repeater.town, suffix);
                channels.push(tag(Channel::digital(
                    &name,
                    repeater.tx,
                    repeater.rx,
                    color_code,
                    *slot,
                )));
            }
        }

        channels
    }

    /// Convert filtered repeaters into channels, preserving order.
    #[must_use]
    pub fn transform(&self, repeaters: &[Repeater]) -> Vec<Channel> {
        let channels: Vec<Channel> = repeaters
            .iter()
            .flat_map(|repeater| self.channels_for(repeater))
            .collect();
        log::info!("Generated {} channels", channels.len());
        channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChannelKind, ChannelMode};

    fn repeater(callsign: &str, codes: &[&str], locator: &str) -> Repeater {
        Repeater {
            callsign: callsign.to_string(),
            tx: 145_687_500,
            rx: 145_087_500,
            band: "2M".to_string(),
            mode_codes: codes.iter().map(ToString::to_string).collect(),
            ctcss: 118.8,
            town: "CROOK".to_string(),
            status: "OPERATIONAL".to_string(),
            kind: "AV".to_string(),
            locator: locator.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_callsign() {
        assert_eq!(clean_callsign("GB3CD-L"), "GB3CD");
        assert_eq!(clean_callsign("GB3WR-R"), "GB3WR");
        assert_eq!(clean_callsign("GB3WR-r"), "GB3WR-r");
        assert_eq!(clean_callsign("GB3WR-RR"), "GB3WR-RR");
        assert_eq!(clean_callsign("-L"), "");
    }

    #[test]
    fn test_frequency_swap() {
        let channels = ChannelTransformer::default().transform(&[repeater("GB3CD-L", &["A"], "IO94DR")]);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].rx_freq, "145.68750");
        assert_eq!(channels[0].tx_freq, "145.08750");
        assert_eq!(channels[0].name, "GB3CD FM");
    }

    #[test]
    fn test_analog_tones_and_bandwidth() {
        let mut wide = repeater("GB3BS", &["A"], "IO81QL");
        wide.txbw = 25.0;
        wide.ctcss = 0.0;
        let channels = ChannelTransformer::default().channels_for(&wide);
        assert_eq!(channels[0].bandwidth, Bandwidth::Wide);
        assert_eq!(channels[0].ctcss_encode, None);

        let channels = ChannelTransformer::default().channels_for(&repeater("GB3CD", &["A"], "IO94DR"));
        assert_eq!(Tone::label(channels[0].ctcss_encode), "118.8");
        assert_eq!(Tone::label(channels[0].ctcss_decode), "118.8");
        assert_eq!(channels[0].bandwidth, Bandwidth::Narrow);
    }

    #[test]
    fn test_multimode_dual_slots() {
        let channels =
            ChannelTransformer::default().channels_for(&repeater("GB3RD", &["A", "M:2"], "IO91LM"));
        let names: Vec<&str> = channels.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["GB3RD FM", "GB3RD TS1", "GB3RD TS2"]);
        assert_eq!(channels[1].kind, ChannelKind::Digital);
        assert_eq!(channels[1].color_code, 2);
        assert_eq!(channels[2].slot, 2);
        assert_eq!(channels[2].bandwidth, Bandwidth::Narrow);
        assert_eq!(channels[2].contact, "Local");
    }

    #[test]
    fn test_single_slot_policy() {
        let transformer = ChannelTransformer::new(ChannelPolicy {
            dmr_slots: DmrSlots::Single,
            ..Default::default()
        });
        let channels = transformer.channels_for(&repeater("GB3RD", &["A", "M:2"], "IO91LM"));
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[1].name, "GB3RD DMR");
        assert_eq!(channels[1].slot, 1);
    }

    #[test]
    fn test_town_naming() {
        let transformer = ChannelTransformer::new(ChannelPolicy {
            include_town: true,
            ..Default::default()
        });
        assert_eq!(transformer.channel_name("GB3CD-L", "CROOK", "FM"), "GB3CD CROOK FM");
        let long = transformer.channel_name("GB7AA", "WOLVERHAMPTON", "DMR");
        assert_eq!(long, "GB7AA WOLVER DMR");
        assert_eq!(long.chars().count(), MAX_NAME_LENGTH);
        assert_eq!(transformer.channel_name("GB7AA", "  ", "TS1"), "GB7AA TS1");
    }

    #[test]
    fn test_town_omitted_without_room() {
        let transformer = ChannelTransformer::new(ChannelPolicy {
            include_town: true,
            ..Default::default()
        });
        let name = transformer.channel_name("MB7IABCDEFGH", "LEEDS", "TS2");
        assert_eq!(name, "MB7IABCDEFGH TS2");
    }

    #[test]
    fn test_names_always_truncated() {
        let name = ChannelTransformer::default().channel_name("GB3ABCDEFGHIJKLMN", "", "FM");
        assert_eq!(name.chars().count(), MAX_NAME_LENGTH);
    }

    #[test]
    fn test_region_and_station_tags() {
        let mut gateway = repeater("GB3GW", &["A"], "IO81RJ");
        gateway.kind = "AG".to_string();
        let channels = ChannelTransformer::default().channels_for(&gateway);
        assert_eq!(channels[0].station, StationKind::Gateway);
        assert_eq!(channels[0].region, "SW");
        assert_eq!(channels[0].band, "2m");
        assert_eq!(channels[0].mode, ChannelMode::Analog);

        let channels = ChannelTransformer::default().channels_for(&repeater("GB7AA", &["M:1"], "IO91WM"));
        assert_eq!(channels[0].station, StationKind::Repeater);
        assert_eq!(channels[0].region, "LONDON");
    }

    #[test]
    fn test_power_applied() {
        let transformer = ChannelTransformer::new(ChannelPolicy {
            power: PowerLevel::Low,
            ..Default::default()
        });
        let channels = transformer.channels_for(&repeater("GB3RD", &["A", "M"], "IO91LM"));
        assert!(channels.iter().all(|c| c.power == PowerLevel::Low));
    }

    #[test]
    fn test_no_modes_no_channels() {
        let channels = ChannelTransformer::default().channels_for(&repeater("GB7MC", &["D"], "IO83AA"));
        assert!(channels.is_empty());
    }
}
