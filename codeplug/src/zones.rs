//! Zone assignment with a per-zone channel cap.
//!
//! Channels are grouped by a composite key, groups are emitted in
//! lexicographic key order, and any group larger than the cap is split into
//! consecutive chunks named `"<key> <part>"`. Splitting never reorders
//! channels.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::model::{Channel, Zone, MAX_ZONE_CHANNELS};

/// Composite key used to group channels into zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneGrouping {
    /// `"<band> <mode>"`, e.g. `2m ANL`.
    BandMode,
    /// `"<region> <mode> <station>"`, e.g. `NE ANL RPT`.
    #[default]
    RegionModeType,
}

impl ZoneGrouping {
    /// Grouping key for a channel.
    #[must_use]
    pub fn key(self, channel: &Channel) -> String {
        match self {
            Self::BandMode => format!("{} {}", channel.band, channel.mode),
            Self::RegionModeType => {
                format!("{} {} {}", channel.region, channel.mode, channel.station)
            }
        }
    }
}

/// Partitions channels into capacity-bounded zones.
///
/// # Examples
///
/// ```
/// use codeplug::{Channel, ZoneAssigner, ZoneGrouping};
///
/// let channels: Vec<Channel> = (0..5)
///     .map(|i| Channel::analog(&format!("CH{i}"), 145_000_000, 145_600_000))
///     .collect();
///
/// let zones = ZoneAssigner::new(ZoneGrouping::BandMode, 2).assign(channels);
/// assert_eq!(zones.len(), 3);
/// assert_eq!(zones[2].channels.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ZoneAssigner {
    grouping: ZoneGrouping,
    max_channels: usize,
}

impl Default for ZoneAssigner {
    fn default() -> Self {
        Self::new(ZoneGrouping::default(), MAX_ZONE_CHANNELS)
    }
}

impl ZoneAssigner {
    /// Create an assigner; a cap of zero is treated as one.
    #[must_use]
    pub fn new(grouping: ZoneGrouping, max_channels: usize) -> Self {
        Self {
            grouping,
            max_channels: max_channels.max(1),
        }
    }

    /// The per-zone channel cap.
    #[must_use]
    pub fn max_channels(&self) -> usize {
        self.max_channels
    }

    /// Group channels into zones.
    #[must_use]
    pub fn assign(&self, channels: Vec<Channel>) -> Vec<Zone> {
        let mut groups: BTreeMap<String, Vec<Rc<Channel>>> = BTreeMap::new();
        for channel in channels {
            groups
                .entry(self.grouping.key(&channel))
                .or_default()
                .push(Rc::new(channel));
        }

        let mut zones = Vec::new();
        for (key, members) in groups {
            if members.len() <= self.max_channels {
                zones.push(Zone::new(&key, members));
                continue;
            }
            for (index, chunk) in members.chunks(self.max_channels).enumerate() {
                zones.push(Zone::new(&format!("{key} {}", index + 1), chunk.to_vec()));
            }
        }

        log::info!("Created {} zones", zones.len());
        zones
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StationKind, MAX_NAME_LENGTH};

    fn channel(name: &str, band: &str, digital: bool, region: &str, station: StationKind) -> Channel {
        let mut channel = if digital {
            Channel::digital(name, 439_000_000, 430_000_000, 1, 1)
        } else {
            Channel::analog(name, 145_000_000, 145_600_000)
        };
        channel.band = band.to_string();
        channel.region = region.to_string();
        channel.station = station;
        channel
    }

    fn names(zones: &[Zone]) -> Vec<&str> {
        zones.iter().map(|z| z.name.as_str()).collect()
    }

    #[test]
    fn test_groups_by_region_mode_type() {
        let channels = vec![
            channel("CH1 FM", "2m", false, "NE", StationKind::Repeater),
            channel("CH2 FM", "70cm", false, "SW", StationKind::Repeater),
            channel("CH3 DMR", "70cm", true, "SW", StationKind::Repeater),
            channel("CH4 FM", "2m", false, "NE", StationKind::Gateway),
        ];
        let zones = ZoneAssigner::default().assign(channels);
        assert_eq!(
            names(&zones),
            vec!["NE ANL GW", "NE ANL RPT", "SW ANL RPT", "SW DMR RPT"]
        );
    }

    #[test]
    fn test_groups_by_band_mode() {
        let channels = vec![
            channel("A", "70cm", true, "NE", StationKind::Repeater),
            channel("B", "2m", false, "SW", StationKind::Repeater),
            channel("C", "2m", false, "NE", StationKind::Gateway),
        ];
        let zones = ZoneAssigner::new(ZoneGrouping::BandMode, 250).assign(channels);
        assert_eq!(names(&zones), vec!["2m ANL", "70cm DMR"]);
        let members: Vec<&str> = zones[0].channels.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(members, vec!["B", "C"]);
    }

    #[test]
    fn test_splits_large_zones() {
        let channels: Vec<Channel> = (0..300)
            .map(|i| channel(&format!("CH{i:03} FM"), "2m", false, "LONDON", StationKind::Repeater))
            .collect();
        let zones = ZoneAssigner::default().assign(channels);
        assert_eq!(names(&zones), vec!["LONDON ANL RPT 1", "LONDON ANL RPT 2"]);
        assert_eq!(zones[0].channels.len(), 250);
        assert_eq!(zones[1].channels.len(), 50);
        assert_eq!(zones[1].channels[0].name, "CH250 FM");
    }

    #[test]
    fn test_exact_multiple_of_cap() {
        let channels: Vec<Channel> = (0..6)
            .map(|i| channel(&format!("CH{i}"), "2m", false, "SE", StationKind::Repeater))
            .collect();
        let zones = ZoneAssigner::new(ZoneGrouping::RegionModeType, 3).assign(channels);
        assert_eq!(names(&zones), vec!["SE ANL RPT 1", "SE ANL RPT 2"]);
        assert!(zones.iter().all(|z| z.channels.len() == 3));
    }

    #[test]
    fn test_zone_names_truncated() {
        let channels: Vec<Channel> = (0..3)
            .map(|i| channel(&format!("CH{i}"), "2m", false, "N.IRELAND", StationKind::Gateway))
            .collect();
        let zones = ZoneAssigner::new(ZoneGrouping::RegionModeType, 2).assign(channels);
        assert!(zones.iter().all(|z| z.name.chars().count() <= MAX_NAME_LENGTH));
    }

    #[test]
    fn test_zero_cap_treated_as_one() {
        let assigner = ZoneAssigner::new(ZoneGrouping::BandMode, 0);
        assert_eq!(assigner.max_channels(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(ZoneAssigner::default().assign(Vec::new()).is_empty());
    }
}
