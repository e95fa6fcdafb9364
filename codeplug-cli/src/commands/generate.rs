//! Command to generate the codeplug CSV tables.

use crate::error::CliError;
use crate::fetch::ApiClient;
use crate::utils::{load_configuration, shorten_path, GlobalOptions};
use clap::Args;
use codeplug::config::{ChannelConfig, ZoneConfig};
use codeplug::model::parse_repeaters;
use codeplug::talkgroups::parse_source;
use codeplug::{Codeplug, Config, DmrSlots, PowerLevel};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Generate Channel.CSV, Zone.CSV and TalkGroups.CSV.
#[derive(Args)]
pub struct GenerateCommand {
    /// Directory for the generated tables
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Bands to include (comma-separated)
    #[arg(short, long, value_delimiter = ',', value_name = "BAND")]
    pub bands: Option<Vec<String>>,

    /// Keep only repeaters whose locator starts with this prefix (e.g. IO91)
    #[arg(long)]
    pub locator: Option<String>,

    /// Transmit power level
    #[arg(long, value_enum)]
    pub power: Option<PowerLevel>,

    /// Channels emitted per DMR repeater
    #[arg(long, value_enum)]
    pub dmr_slots: Option<DmrSlots>,

    /// Append the town to repeater channel names
    #[arg(long)]
    pub include_town: bool,

    /// Read repeaters from a JSON file instead of the repeater API
    #[arg(long, value_name = "JSON")]
    pub repeaters: Option<PathBuf>,

    /// Read talkgroups from a JSON file instead of BrandMeister
    #[arg(long, value_name = "JSON", conflicts_with = "default_talkgroups")]
    pub talkgroups: Option<PathBuf>,

    /// Use the built-in talkgroups without fetching
    #[arg(long)]
    pub default_talkgroups: bool,

    /// Leave out the simplex and utility zones
    #[arg(long)]
    pub no_simplex: bool,
}

impl GenerateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global, self.overrides())?;
        let output_dir = config.output_dir();

        // The client is only built when something has to be fetched
        let needs_network =
            self.repeaters.is_none() || (self.talkgroups.is_none() && !self.default_talkgroups);
        let client = if needs_network {
            Some(ApiClient::new()?)
        } else {
            None
        };

        let repeaters = match (&self.repeaters, &client) {
            (Some(path), _) => parse_repeaters(&read_input(path)?)?,
            (None, Some(client)) => client.fetch_repeaters(&config.repeater_api(), &config.bands())?,
            (None, None) => Vec::new(),
        };

        let talkgroups = self.load_talkgroups(&config, client.as_ref())?;

        let codeplug = Codeplug::build(repeaters, talkgroups.as_ref(), &config);
        if codeplug.channels.is_empty() {
            return Err(CliError::SemanticFailure(
                "No repeaters matched the filters".to_string(),
            ));
        }
        if codeplug.repeaters == 0 {
            log::warn!("No repeaters matched the filters");
        }

        codeplug.write_tables(&output_dir)?;

        if !global.quiet {
            println!(
                "Generated {} channels in {} zones with {} talkgroups",
                codeplug.channels.len(),
                codeplug.zones.len(),
                codeplug.talkgroups.len()
            );
            println!("Output: {}", shorten_path(&absolute(&output_dir)));
        }

        Ok(())
    }

    /// Command-line flags as the highest-precedence config layer.
    fn overrides(&self) -> Config {
        let channels = (self.dmr_slots.is_some() || self.include_town).then(|| ChannelConfig {
            dmr_slots: self.dmr_slots,
            include_town: self.include_town.then_some(true),
        });
        let zones = self.no_simplex.then(|| ZoneConfig {
            include_simplex: Some(false),
            ..Default::default()
        });

        Config {
            locator: self.locator.clone(),
            bands: self.bands.clone(),
            power: self.power,
            channels,
            zones,
            output_dir: self.output_dir.clone(),
            ..Default::default()
        }
    }

    fn load_talkgroups(
        &self,
        config: &Config,
        client: Option<&ApiClient>,
    ) -> Result<Option<BTreeMap<String, String>>, CliError> {
        if let Some(ref path) = self.talkgroups {
            return Ok(Some(parse_source(&read_input(path)?)?));
        }
        if self.default_talkgroups {
            return Ok(None);
        }
        let Some(client) = client else {
            return Ok(None);
        };

        match client.fetch_talkgroups(&config.brandmeister_api()) {
            Ok(source) => Ok(Some(source)),
            Err(e) => {
                log::warn!("Failed to fetch talkgroups, using defaults: {e}");
                Ok(None)
            }
        }
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if !path.exists() {
        return Err(CliError::InvalidArguments(format!(
            "File not found: {}",
            path.display()
        )));
    }
    Ok(fs::read_to_string(path)?)
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
