//! Flat CSV tables consumed by the radio's programming software.
//!
//! Three tables are written: `Channel.CSV`, `Zone.CSV` and
//! `TalkGroups.CSV`. Every field is quoted. The readers deserialize only the
//! columns the config renderer needs and fill missing columns with the same
//! defaults the programming software assumes.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::Result;
use crate::model::{Channel, ChannelKind, TalkGroup, Tone, Zone};

/// File name of the channel table.
pub const CHANNEL_FILE: &str = "Channel.CSV";
/// File name of the zone table.
pub const ZONE_FILE: &str = "Zone.CSV";
/// File name of the talkgroup table.
pub const TALKGROUP_FILE: &str = "TalkGroups.CSV";

/// Channel table columns, in file order.
pub const CHANNEL_COLUMNS: [&str; 44] = [
    "No.",
    "Channel Name",
    "Receive Frequency",
    "Transmit Frequency",
    "Channel Type",
    "Transmit Power",
    "Band Width",
    "CTCSS/DCS Decode",
    "CTCSS/DCS Encode",
    "Contact",
    "Contact Call Type",
    "Radio ID",
    "Busy Lock/TX Permit",
    "Squelch Mode",
    "Optional Signal",
    "DTMF ID",
    "2Tone ID",
    "5Tone ID",
    "PTT ID",
    "Color Code",
    "Slot",
    "Scan List",
    "Receive Group List",
    "TX Prohibit",
    "Reverse",
    "Simplex TDMA",
    "TDMA Adaptive",
    "Encryption Type",
    "Digital Encryption",
    "Call Confirmation",
    "Talk Around",
    "Work Alone",
    "Custom CTCSS",
    "2TONE Decode",
    "Ranging",
    "Through Mode",
    "Digi APRS RX",
    "Analog APRS PTT Mode",
    "Digital APRS PTT Mode",
    "APRS Report Type",
    "Digital APRS Report Channel",
    "Correct Frequency[Hz]",
    "SMS Confirmation",
    "Exclude channel from roaming",
];

/// Zone table columns, in file order.
pub const ZONE_COLUMNS: [&str; 5] = ["No.", "Zone Name", "Zone Channel Member", "A Channel", "B Channel"];

/// Talkgroup table columns, in file order.
pub const TALKGROUP_COLUMNS: [&str; 5] = ["No.", "Radio ID", "Name", "Call Type", "Call Alert"];

fn on_off(flag: bool) -> &'static str {
    if flag {
        "On"
    } else {
        "Off"
    }
}

/// Build the full 44-column row for a channel.
#[must_use]
pub fn channel_row(number: usize, channel: &Channel) -> Vec<String> {
    let digital = channel.kind == ChannelKind::Digital;
    let busy_lock = if digital { "Always" } else { "Off" };

    let mapped = [
        number.to_string(),
        channel.name.clone(),
        channel.rx_freq.clone(),
        channel.tx_freq.clone(),
        channel.kind.to_string(),
        channel.power.to_string(),
        channel.bandwidth.to_string(),
        Tone::label(channel.ctcss_decode),
        Tone::label(channel.ctcss_encode),
        channel.contact.clone(),
        channel.call_type.to_string(),
    ];
    let fixed = [
        "",
        busy_lock,
        "Carrier",
        "Off",
        "1",
        "1",
        "1",
        "Off",
    ];
    let dmr = [channel.color_code.to_string(), channel.slot.to_string()];
    let routing = ["None", "None", on_off(channel.tx_prohibit)];
    let trailing = [
        "Off",
        "Off",
        "Off",
        "Normal Encryption",
        "Off",
        "Off",
        "Off",
        "Off",
        "251.1",
        "0",
        "Off",
        "Off",
        "Off",
        "Off",
        "Off",
        "Off",
        "1",
        "0",
        "Off",
        "0",
    ];

    mapped
        .into_iter()
        .chain(fixed.iter().map(ToString::to_string))
        .chain(dmr)
        .chain(routing.iter().map(ToString::to_string))
        .chain(trailing.iter().map(ToString::to_string))
        .collect()
}

fn quoted_writer<W: io::Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer)
}

/// Write the channel table, numbering channels from 1.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_channels<'a, W: io::Write>(
    writer: W,
    channels: impl IntoIterator<Item = &'a Channel>,
) -> Result<()> {
    let mut writer = quoted_writer(writer);
    writer.write_record(CHANNEL_COLUMNS)?;
    for (index, channel) in channels.into_iter().enumerate() {
        writer.write_record(channel_row(index + 1, channel))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the zone table. Members are pipe-delimited and the first member
/// doubles as the A and B channel.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_zones<W: io::Write>(writer: W, zones: &[Zone]) -> Result<()> {
    let mut writer = quoted_writer(writer);
    writer.write_record(ZONE_COLUMNS)?;
    for (index, zone) in zones.iter().enumerate() {
        let members: Vec<&str> = zone.channels.iter().map(|c| c.name.as_str()).collect();
        let first = members.first().copied().unwrap_or_default();
        writer.write_record([
            (index + 1).to_string().as_str(),
            zone.name.as_str(),
            members.join("|").as_str(),
            first,
            first,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the talkgroup table.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_talkgroups<W: io::Write>(writer: W, talkgroups: &[TalkGroup]) -> Result<()> {
    let mut writer = quoted_writer(writer);
    writer.write_record(TALKGROUP_COLUMNS)?;
    for (index, talkgroup) in talkgroups.iter().enumerate() {
        writer.write_record([
            (index + 1).to_string(),
            talkgroup.id.to_string(),
            talkgroup.name.clone(),
            talkgroup.call_type.to_string(),
            talkgroup.call_alert.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// The channel columns the renderer reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChannelRecord {
    /// `No.`
    #[serde(rename = "No.")]
    pub number: String,
    /// `Channel Name`
    #[serde(rename = "Channel Name")]
    pub name: String,
    /// `Receive Frequency`
    #[serde(rename = "Receive Frequency")]
    pub rx_freq: String,
    /// `Transmit Frequency`
    #[serde(rename = "Transmit Frequency")]
    pub tx_freq: String,
    /// `Channel Type`
    #[serde(rename = "Channel Type")]
    pub kind: String,
    /// `Transmit Power`
    #[serde(rename = "Transmit Power")]
    pub power: String,
    /// `Band Width`
    #[serde(rename = "Band Width")]
    pub bandwidth: String,
    /// `CTCSS/DCS Decode`
    #[serde(rename = "CTCSS/DCS Decode")]
    pub ctcss_decode: String,
    /// `CTCSS/DCS Encode`
    #[serde(rename = "CTCSS/DCS Encode")]
    pub ctcss_encode: String,
    /// `Contact`
    #[serde(rename = "Contact")]
    pub contact: String,
    /// `Color Code`
    #[serde(rename = "Color Code")]
    pub color_code: String,
    /// `Slot`
    #[serde(rename = "Slot")]
    pub slot: String,
    /// `TX Prohibit`
    #[serde(rename = "TX Prohibit")]
    pub tx_prohibit: String,
}

impl Default for ChannelRecord {
    fn default() -> Self {
        Self {
            number: String::new(),
            name: String::new(),
            rx_freq: String::new(),
            tx_freq: String::new(),
            kind: "A-Analog".to_string(),
            power: "High".to_string(),
            bandwidth: "12.5K".to_string(),
            ctcss_decode: "Off".to_string(),
            ctcss_encode: "Off".to_string(),
            contact: String::new(),
            color_code: "1".to_string(),
            slot: "1".to_string(),
            tx_prohibit: "Off".to_string(),
        }
    }
}

impl ChannelRecord {
    /// The record a channel produces when written at `number`.
    #[must_use]
    pub fn from_channel(number: usize, channel: &Channel) -> Self {
        Self {
            number: number.to_string(),
            name: channel.name.clone(),
            rx_freq: channel.rx_freq.clone(),
            tx_freq: channel.tx_freq.clone(),
            kind: channel.kind.to_string(),
            power: channel.power.to_string(),
            bandwidth: channel.bandwidth.to_string(),
            ctcss_decode: Tone::label(channel.ctcss_decode),
            ctcss_encode: Tone::label(channel.ctcss_encode),
            contact: channel.contact.clone(),
            color_code: channel.color_code.to_string(),
            slot: channel.slot.to_string(),
            tx_prohibit: on_off(channel.tx_prohibit).to_string(),
        }
    }

    /// Returns `true` for `D-` channel types.
    #[must_use]
    pub fn is_digital(&self) -> bool {
        self.kind.trim().to_lowercase().starts_with("d-")
    }
}

/// The zone columns the renderer reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ZoneRecord {
    /// `No.`
    #[serde(rename = "No.")]
    pub number: String,
    /// `Zone Name`
    #[serde(rename = "Zone Name")]
    pub name: String,
    /// `Zone Channel Member`, pipe-delimited.
    #[serde(rename = "Zone Channel Member")]
    pub members: String,
}

impl ZoneRecord {
    /// The record a zone produces when written at `number`.
    #[must_use]
    pub fn from_zone(number: usize, zone: &Zone) -> Self {
        let members: Vec<&str> = zone.channels.iter().map(|c| c.name.as_str()).collect();
        Self {
            number: number.to_string(),
            name: zone.name.clone(),
            members: members.join("|"),
        }
    }
}

/// The talkgroup columns the renderer reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TalkGroupRecord {
    /// `No.`
    #[serde(rename = "No.")]
    pub number: String,
    /// `Radio ID`
    #[serde(rename = "Radio ID")]
    pub radio_id: String,
    /// `Name`
    #[serde(rename = "Name")]
    pub name: String,
    /// `Call Type`
    #[serde(rename = "Call Type")]
    pub call_type: String,
}

impl Default for TalkGroupRecord {
    fn default() -> Self {
        Self {
            number: String::new(),
            radio_id: String::new(),
            name: String::new(),
            call_type: "Group Call".to_string(),
        }
    }
}

impl TalkGroupRecord {
    /// The record a talkgroup produces when written at `number`.
    #[must_use]
    pub fn from_talkgroup(number: usize, talkgroup: &TalkGroup) -> Self {
        Self {
            number: number.to_string(),
            radio_id: talkgroup.id.to_string(),
            name: talkgroup.name.clone(),
            call_type: talkgroup.call_type.to_string(),
        }
    }
}

/// Deserialize every record of a table.
///
/// # Errors
///
/// Returns an error if the data is not valid CSV.
pub fn read_records<T: DeserializeOwned, R: io::Read>(reader: R) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let records = reader.deserialize().collect::<std::result::Result<Vec<T>, _>>()?;
    Ok(records)
}

/// Deserialize every record of a table file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not valid CSV.
pub fn read_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    read_records(File::open(path)?)
}
