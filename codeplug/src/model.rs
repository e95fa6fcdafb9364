//! Core data types shared by every pipeline stage.
//!
//! This module defines the raw [`Repeater`] record as fetched from the
//! repeater directory, the [`Channel`], [`Zone`] and [`TalkGroup`] records
//! that make up a codeplug, and the small label enums whose `Display`
//! output is exactly what the radio's programming software expects.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Maximum length of a channel, zone or talkgroup name on the radio.
pub const MAX_NAME_LENGTH: usize = 16;

/// Maximum number of channels a single zone may hold.
pub const MAX_ZONE_CHANNELS: usize = 250;

/// Truncate a name to [`MAX_NAME_LENGTH`] characters.
///
/// # Examples
///
/// ```
/// use codeplug::model::truncate_name;
///
/// assert_eq!(truncate_name("WOLVERHAMPTON CITY"), "WOLVERHAMPTON CI");
/// assert_eq!(truncate_name("GB3CD FM"), "GB3CD FM");
/// ```
#[must_use]
pub fn truncate_name(name: &str) -> String {
    name.chars().take(MAX_NAME_LENGTH).collect()
}

/// Format a frequency in Hz as MHz with exactly five fractional digits.
///
/// The conversion is done in integer arithmetic, rounding to the nearest
/// 10 Hz, so it never picks up floating point noise.
///
/// # Examples
///
/// ```
/// use codeplug::model::format_mhz;
///
/// assert_eq!(format_mhz(145_687_500), "145.68750");
/// assert_eq!(format_mhz(446_006_250), "446.00625");
/// ```
#[must_use]
pub fn format_mhz(hz: u64) -> String {
    let tens = (hz + 5) / 10;
    format!("{}.{:05}", tens / 100_000, tens % 100_000)
}

/// A raw repeater record from the repeater directory API.
///
/// Records are immutable once fetched. Missing or `null` JSON fields fall
/// back to empty values, with a reported bandwidth of 12.5 kHz.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawRepeater")]
pub struct Repeater {
    /// Callsign, possibly carrying a link suffix such as `GB3CD-L`.
    pub callsign: String,
    /// Repeater transmit frequency in Hz.
    pub tx: u64,
    /// Repeater receive frequency in Hz.
    pub rx: u64,
    /// Band label as reported, e.g. `2M` or `70CM`.
    pub band: String,
    /// Mode codes such as `A`, `M`, `M:3` or `D`.
    pub mode_codes: Vec<String>,
    /// CTCSS access tone in Hz, zero when none.
    pub ctcss: f64,
    /// Transmit bandwidth in kHz.
    pub txbw: f64,
    /// Town the repeater serves.
    pub town: String,
    /// Operational status, e.g. `OPERATIONAL`.
    pub status: String,
    /// Repeater type code, e.g. `AV`, `DM`, `BN`.
    pub kind: String,
    /// Maidenhead locator.
    pub locator: String,
}

impl Default for Repeater {
    fn default() -> Self {
        Self {
            callsign: String::new(),
            tx: 0,
            rx: 0,
            band: String::new(),
            mode_codes: Vec::new(),
            ctcss: 0.0,
            txbw: 12.5,
            town: String::new(),
            status: String::new(),
            kind: String::new(),
            locator: String::new(),
        }
    }
}

impl Repeater {
    /// Returns `true` if the repeater advertises analog FM.
    #[must_use]
    pub fn has_analog(&self) -> bool {
        self.mode_codes.iter().any(|code| code == "A")
    }

    /// Returns `true` if the repeater advertises DMR, with or without a
    /// color code suffix.
    #[must_use]
    pub fn has_dmr(&self) -> bool {
        self.mode_codes
            .iter()
            .any(|code| code == "M" || code.starts_with("M:"))
    }

    /// DMR color code taken from the first well-formed `M:<n>` mode code.
    ///
    /// Falls back to 1 when no code carries a valid color code (1-15).
    ///
    /// # Examples
    ///
    /// ```
    /// use codeplug::Repeater;
    ///
    /// let repeater = Repeater {
    ///     mode_codes: vec!["A".to_string(), "M:3".to_string()],
    ///     ..Default::default()
    /// };
    /// assert_eq!(repeater.color_code(), 3);
    /// ```
    #[must_use]
    pub fn color_code(&self) -> u8 {
        for code in &self.mode_codes {
            let Some(suffix) = code.strip_prefix("M:") else {
                continue;
            };
            match suffix.parse::<u8>() {
                Ok(cc) if (1..=15).contains(&cc) => return cc,
                _ => log::debug!(
                    "{}: ignoring malformed color code {code:?}",
                    self.callsign
                ),
            }
        }
        1
    }
}

/// Wire shape of a repeater record, tolerant of `null` fields.
#[derive(Deserialize)]
struct RawRepeater {
    repeater: Option<String>,
    tx: Option<u64>,
    rx: Option<u64>,
    band: Option<String>,
    #[serde(rename = "modeCodes")]
    mode_codes: Option<Vec<String>>,
    ctcss: Option<f64>,
    txbw: Option<f64>,
    town: Option<String>,
    status: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    locator: Option<String>,
}

impl From<RawRepeater> for Repeater {
    fn from(raw: RawRepeater) -> Self {
        Self {
            callsign: raw.repeater.unwrap_or_default(),
            tx: raw.tx.unwrap_or_default(),
            rx: raw.rx.unwrap_or_default(),
            band: raw.band.unwrap_or_default(),
            mode_codes: raw.mode_codes.unwrap_or_default(),
            ctcss: raw.ctcss.unwrap_or_default(),
            txbw: raw.txbw.filter(|bw| *bw > 0.0).unwrap_or(12.5),
            town: raw.town.unwrap_or_default(),
            status: raw.status.unwrap_or_default(),
            kind: raw.kind.unwrap_or_default(),
            locator: raw.locator.unwrap_or_default(),
        }
    }
}

/// Repeater directory response body: `{"data": [...]}` or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum RepeaterList {
    Wrapped {
        #[serde(default)]
        data: Vec<Repeater>,
    },
    Bare(Vec<Repeater>),
}

/// Parse a repeater directory response.
///
/// # Errors
///
/// Returns an error if the text is neither a `{"data": [...]}` object nor
/// an array of repeater records.
///
/// # Examples
///
/// ```
/// use codeplug::model::parse_repeaters;
///
/// let json = r#"{"data": [{"repeater": "GB3WR", "txbw": null}]}"#;
/// let repeaters = parse_repeaters(json).unwrap();
/// assert_eq!(repeaters[0].callsign, "GB3WR");
/// assert!((repeaters[0].txbw - 12.5).abs() < f64::EPSILON);
/// ```
pub fn parse_repeaters(json: &str) -> crate::error::Result<Vec<Repeater>> {
    let repeaters = match serde_json::from_str(json)? {
        RepeaterList::Wrapped { data } | RepeaterList::Bare(data) => data,
    };
    log::info!("Parsed {} repeaters", repeaters.len());
    Ok(repeaters)
}

/// Transmit power level setting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PowerLevel {
    /// Maximum power.
    Turbo,
    /// High power.
    #[default]
    High,
    /// Medium power.
    Mid,
    /// Low power.
    Low,
}

impl PowerLevel {
    /// Parses a power level name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not recognized.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "turbo" => Ok(Self::Turbo),
            "high" => Ok(Self::High),
            "mid" => Ok(Self::Mid),
            "low" => Ok(Self::Low),
            _ => Err(format!("invalid power level: {s}")),
        }
    }
}

impl fmt::Display for PowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Turbo => write!(f, "Turbo"),
            Self::High => write!(f, "High"),
            Self::Mid => write!(f, "Mid"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Analog or digital channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Analog FM.
    Analog,
    /// DMR digital.
    Digital,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analog => write!(f, "A-Analog"),
            Self::Digital => write!(f, "D-Digital"),
        }
    }
}

/// Channel bandwidth class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bandwidth {
    /// 12.5 kHz.
    #[default]
    Narrow,
    /// 25 kHz.
    Wide,
}

impl Bandwidth {
    /// Classify a reported bandwidth in kHz.
    #[must_use]
    pub fn from_khz(khz: f64) -> Self {
        if khz >= 25.0 {
            Self::Wide
        } else {
            Self::Narrow
        }
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Narrow => write!(f, "12.5K"),
            Self::Wide => write!(f, "25K"),
        }
    }
}

/// Mode label used for zone grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// Analog FM.
    Analog,
    /// DMR.
    Dmr,
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analog => write!(f, "ANL"),
            Self::Dmr => write!(f, "DMR"),
        }
    }
}

/// Whether a station is a repeater or an internet gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StationKind {
    /// Conventional repeater.
    #[default]
    Repeater,
    /// Analog or digital gateway.
    Gateway,
}

impl fmt::Display for StationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repeater => write!(f, "RPT"),
            Self::Gateway => write!(f, "GW"),
        }
    }
}

/// DMR call type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallType {
    /// Group call.
    #[default]
    Group,
    /// Private call.
    Private,
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group => write!(f, "Group Call"),
            Self::Private => write!(f, "Private Call"),
        }
    }
}

/// A CTCSS tone, stored in tenths of a hertz.
///
/// # Examples
///
/// ```
/// use codeplug::model::Tone;
///
/// assert_eq!(Tone::from_hz(118.8).unwrap().to_string(), "118.8");
/// assert_eq!(Tone::from_hz(77.0).unwrap().to_string(), "77.0");
/// assert!(Tone::from_hz(0.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone(u16);

impl Tone {
    /// Build a tone from a frequency in Hz, `None` when the value is not
    /// a positive tone.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_hz(hz: f64) -> Option<Self> {
        if hz.is_finite() && hz > 0.0 && hz < 6_000.0 {
            Some(Self((hz * 10.0).round() as u16))
        } else {
            None
        }
    }

    /// Label for an optional tone: the tone value or `Off`.
    #[must_use]
    pub fn label(tone: Option<Self>) -> String {
        tone.map_or_else(|| "Off".to_string(), |t| t.to_string())
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// A single channel of the codeplug.
///
/// Channels are never mutated after creation. Channel numbers are not
/// stored: they follow from the channel's position in the final zone order.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// Display name, at most [`MAX_NAME_LENGTH`] characters.
    pub name: String,
    /// Frequency the radio receives on, in MHz with five decimals.
    pub rx_freq: String,
    /// Frequency the radio transmits on, in MHz with five decimals.
    pub tx_freq: String,
    /// Analog or digital.
    pub kind: ChannelKind,
    /// Bandwidth class.
    pub bandwidth: Bandwidth,
    /// Transmitted CTCSS tone.
    pub ctcss_encode: Option<Tone>,
    /// Required receive CTCSS tone.
    pub ctcss_decode: Option<Tone>,
    /// Transmit power.
    pub power: PowerLevel,
    /// DMR color code (1-15).
    pub color_code: u8,
    /// DMR timeslot (1 or 2).
    pub slot: u8,
    /// Name of the transmit contact for digital channels.
    pub contact: String,
    /// Call type of the transmit contact.
    pub call_type: CallType,
    /// Receive-only channel.
    pub tx_prohibit: bool,
    /// Normalized band label, e.g. `2m`.
    pub band: String,
    /// Mode label used for zone grouping.
    pub mode: ChannelMode,
    /// Region tag derived from the source locator.
    pub region: String,
    /// Repeater or gateway.
    pub station: StationKind,
}

impl Channel {
    /// Create an analog channel with default settings.
    #[must_use]
    pub fn analog(name: &str, rx_hz: u64, tx_hz: u64) -> Self {
        Self {
            name: truncate_name(name),
            rx_freq: format_mhz(rx_hz),
            tx_freq: format_mhz(tx_hz),
            kind: ChannelKind::Analog,
            bandwidth: Bandwidth::Narrow,
            ctcss_encode: None,
            ctcss_decode: None,
            power: PowerLevel::High,
            color_code: 1,
            slot: 1,
            contact: String::new(),
            call_type: CallType::Group,
            tx_prohibit: false,
            band: String::new(),
            mode: ChannelMode::Analog,
            region: String::new(),
            station: StationKind::Repeater,
        }
    }

    /// Create a digital channel talking to the `Local` contact.
    #[must_use]
    pub fn digital(name: &str, rx_hz: u64, tx_hz: u64, color_code: u8, slot: u8) -> Self {
        Self {
            kind: ChannelKind::Digital,
            color_code,
            slot,
            contact: "Local".to_string(),
            mode: ChannelMode::Dmr,
            ..Self::analog(name, rx_hz, tx_hz)
        }
    }

    /// Set the bandwidth class.
    #[must_use]
    pub fn with_bandwidth(mut self, bandwidth: Bandwidth) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    /// Set the encode and decode tones.
    #[must_use]
    pub fn with_tones(mut self, encode: Option<Tone>, decode: Option<Tone>) -> Self {
        self.ctcss_encode = encode;
        self.ctcss_decode = decode;
        self
    }

    /// Mark the channel receive-only.
    #[must_use]
    pub fn receive_only(mut self) -> Self {
        self.tx_prohibit = true;
        self
    }
}

/// A named group of channels presented together on the radio.
///
/// Zones share their channels rather than owning them; the channel list
/// written to the radio is derived from the zone order.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    /// Zone name, at most [`MAX_NAME_LENGTH`] characters.
    pub name: String,
    /// Member channels in display order.
    pub channels: Vec<Rc<Channel>>,
}

impl Zone {
    /// Create a zone, truncating the name to the radio's limit.
    #[must_use]
    pub fn new(name: &str, channels: Vec<Rc<Channel>>) -> Self {
        Self {
            name: truncate_name(name),
            channels,
        }
    }

    /// Create a zone from owned channels.
    #[must_use]
    pub fn from_channels(name: &str, channels: Vec<Channel>) -> Self {
        Self::new(name, channels.into_iter().map(Rc::new).collect())
    }
}

/// A DMR talkgroup or private-call destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalkGroup {
    /// Display name, at most [`MAX_NAME_LENGTH`] characters.
    pub name: String,
    /// Numeric talkgroup or radio ID.
    pub id: u32,
    /// Group or private call.
    pub call_type: CallType,
    /// Call alert policy.
    pub call_alert: String,
}

impl TalkGroup {
    /// Create a talkgroup with no call alert.
    #[must_use]
    pub fn new(name: &str, id: u32, call_type: CallType) -> Self {
        Self {
            name: truncate_name(name),
            id,
            call_type,
            call_alert: "None".to_string(),
        }
    }

    /// The built-in talkgroups used when no talkgroup source is available.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Local", 9, CallType::Group),
            Self::new("UK Wide", 235, CallType::Group),
            Self::new("Regional", 8, CallType::Group),
            Self::new("BM Parrot", 9990, CallType::Private),
        ]
    }
}

/// A registered DMR user, as listed in the RadioID users table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioUser {
    /// DMR radio ID.
    pub radio_id: u32,
    /// Callsign.
    pub callsign: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// City.
    pub city: String,
    /// State or county.
    pub state: String,
    /// Country.
    pub country: String,
}
