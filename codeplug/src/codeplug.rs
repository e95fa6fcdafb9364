//! Assembly of a complete codeplug from repeater and talkgroup data.
//!
//! [`Codeplug::build`] runs the pipeline end to end: filter, transform,
//! zone assignment and talkgroup curation. The channel list is derived from
//! the final zone order, so channel numbers written to the tables line up
//! with zone membership.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::Config;
use crate::error::Result;
use crate::model::{Channel, RadioUser, Repeater, TalkGroup, Zone};
use crate::render::{ConfigRenderer, RenderOptions};
use crate::simplex::static_zones;
use crate::table::{
    self, ChannelRecord, TalkGroupRecord, ZoneRecord, CHANNEL_FILE, TALKGROUP_FILE, ZONE_FILE,
};
use crate::transform::ChannelTransformer;

/// Channels, zones and talkgroups ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Codeplug {
    /// Channels in zone order.
    pub channels: Vec<Rc<Channel>>,
    /// Zones in display order.
    pub zones: Vec<Zone>,
    /// Talkgroups sorted by ID.
    pub talkgroups: Vec<TalkGroup>,
    /// Repeaters that passed the filter.
    pub repeaters: usize,
}

/// Paths of the three tables written by [`Codeplug::write_tables`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePaths {
    /// Channel table.
    pub channels: PathBuf,
    /// Zone table.
    pub zones: PathBuf,
    /// Talkgroup table.
    pub talkgroups: PathBuf,
}

impl Codeplug {
    /// Build a codeplug.
    ///
    /// `talkgroups` is the raw ID-to-name mapping from the talkgroup source;
    /// `None` selects the built-in defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use codeplug::config::{Config, ZoneConfig};
    /// use codeplug::{Codeplug, Repeater};
    ///
    /// let repeater = Repeater {
    ///     callsign: "GB3HE".to_string(),
    ///     tx: 145_687_500,
    ///     rx: 145_087_500,
    ///     mode_codes: vec!["A".to_string()],
    ///     status: "OPERATIONAL".to_string(),
    ///     kind: "AV".to_string(),
    ///     locator: "IO91WM".to_string(),
    ///     ..Default::default()
    /// };
    /// let config = Config {
    ///     zones: Some(ZoneConfig { include_simplex: Some(false), ..Default::default() }),
    ///     ..Default::default()
    /// };
    ///
    /// let codeplug = Codeplug::build(vec![repeater], None, &config);
    /// assert_eq!(codeplug.channels.len(), 1);
    /// assert_eq!(codeplug.zones[0].name, "LONDON ANL RPT");
    /// assert_eq!(codeplug.talkgroups.len(), 4);
    /// ```
    #[must_use]
    pub fn build(
        repeaters: Vec<Repeater>,
        talkgroups: Option<&BTreeMap<String, String>>,
        config: &Config,
    ) -> Self {
        let kept = config.repeater_filter().filter(repeaters);
        let channels = ChannelTransformer::new(config.channel_policy()).transform(&kept);
        let mut zones = config.zone_assigner().assign(channels);

        if config.include_simplex() {
            zones.extend(static_zones());
        }

        let talkgroups = match talkgroups {
            Some(source) => config.talkgroup_curator().curate(source),
            None => {
                log::info!("No talkgroup source, using defaults");
                TalkGroup::defaults()
            }
        };

        Self {
            repeaters: kept.len(),
            ..Self::from_zones(zones, talkgroups)
        }
    }

    /// Assemble a codeplug from zones that are already laid out.
    #[must_use]
    pub fn from_zones(zones: Vec<Zone>, talkgroups: Vec<TalkGroup>) -> Self {
        let channels = zones
            .iter()
            .flat_map(|zone| zone.channels.iter().cloned())
            .collect();
        Self {
            channels,
            zones,
            talkgroups,
            repeaters: 0,
        }
    }

    /// Channel table records, numbered from 1.
    #[must_use]
    pub fn channel_records(&self) -> Vec<ChannelRecord> {
        self.channels
            .iter()
            .enumerate()
            .map(|(index, channel)| ChannelRecord::from_channel(index + 1, channel))
            .collect()
    }

    /// Zone table records, numbered from 1.
    #[must_use]
    pub fn zone_records(&self) -> Vec<ZoneRecord> {
        self.zones
            .iter()
            .enumerate()
            .map(|(index, zone)| ZoneRecord::from_zone(index + 1, zone))
            .collect()
    }

    /// Talkgroup table records, numbered from 1.
    #[must_use]
    pub fn talkgroup_records(&self) -> Vec<TalkGroupRecord> {
        self.talkgroups
            .iter()
            .enumerate()
            .map(|(index, talkgroup)| TalkGroupRecord::from_talkgroup(index + 1, talkgroup))
            .collect()
    }

    /// Write the three tables into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or any file cannot be written.
    pub fn write_tables(&self, dir: &Path) -> Result<TablePaths> {
        fs::create_dir_all(dir)?;
        let paths = TablePaths {
            channels: dir.join(CHANNEL_FILE),
            zones: dir.join(ZONE_FILE),
            talkgroups: dir.join(TALKGROUP_FILE),
        };

        table::write_channels(
            BufWriter::new(File::create(&paths.channels)?),
            self.channels.iter().map(Rc::as_ref),
        )?;
        table::write_zones(BufWriter::new(File::create(&paths.zones)?), &self.zones)?;
        table::write_talkgroups(
            BufWriter::new(File::create(&paths.talkgroups)?),
            &self.talkgroups,
        )?;

        log::info!(
            "Wrote {} channels, {} zones and {} talkgroups to {}",
            self.channels.len(),
            self.zones.len(),
            self.talkgroups.len(),
            dir.display()
        );
        Ok(paths)
    }

    /// Render the config text directly, without a round trip through CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if the codeplug has no channels.
    pub fn render(&self, user: &RadioUser, options: RenderOptions) -> Result<String> {
        ConfigRenderer::new(options).render(
            user,
            &self.channel_records(),
            &self.zone_records(),
            &self.talkgroup_records(),
        )
    }
}
