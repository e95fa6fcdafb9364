//! Rendering of codeplug tables into a `dmrconfig` text configuration.
//!
//! The renderer works on table records rather than on the in-memory model so
//! that it can be driven either from a freshly built [`crate::Codeplug`] or
//! from CSV files exported earlier (and possibly edited by hand). Names in
//! the config must be tokens, so every channel, zone and contact name is
//! sanitized; references may use either the raw or the sanitized form.
//!
//! # Examples
//!
//! ```
//! use codeplug::model::{Channel, RadioUser};
//! use codeplug::render::{ConfigRenderer, RenderOptions};
//! use codeplug::table::ChannelRecord;
//!
//! let user = RadioUser {
//!     radio_id: 2_345_678,
//!     callsign: "M0ABC".to_string(),
//!     first_name: String::new(),
//!     last_name: String::new(),
//!     city: String::new(),
//!     state: String::new(),
//!     country: String::new(),
//! };
//! let channel = Channel::analog("V40 CALL", 145_500_000, 145_500_000);
//! let channels = vec![ChannelRecord::from_channel(1, &channel)];
//!
//! let text = ConfigRenderer::new(RenderOptions::default())
//!     .render(&user, &channels, &[], &[])
//!     .unwrap();
//! assert!(text.contains("ID: 2345678"));
//! assert!(text.contains("V40_CALL"));
//! ```

mod names;

#[cfg(test)]
mod proptests;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

pub use names::{
    analog_width, compress_ranges, format_frequency, normalize, power_symbol,
    receive_only_symbol, sanitize_name, tone_value,
};

use crate::error::{Error, Result};
use crate::identity::lookup_radio_user;
use crate::model::RadioUser;
use crate::table::{self, ChannelRecord, TalkGroupRecord, ZoneRecord};

/// Radio model written when none is configured.
pub const DEFAULT_RADIO_MODEL: &str = "Anytone AT-D878UV";

/// Contact that digital channels fall back to.
const LOCAL_CONTACT: &str = "Local";

/// Options that do not come from the tables themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Value of the `Radio:` header line.
    pub radio_model: String,
    /// Timestamp for the generation comment; omitted when `None` so output
    /// is byte-stable.
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            radio_model: DEFAULT_RADIO_MODEL.to_string(),
            generated_at: None,
        }
    }
}

/// A contact row of the rendered config.
#[derive(Debug)]
struct Contact {
    index: usize,
    name: String,
    kind: &'static str,
    id: String,
}

/// Parse a `No.` column; blank counts as zero.
fn parse_index(field: &str, value: &str) -> Result<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| Error::invalid_number(field, value))
}

fn positive_index(value: i64) -> Option<usize> {
    usize::try_from(value).ok().filter(|n| *n > 0)
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed
    }
}

/// Contact table with lookups by raw and sanitized name.
#[derive(Debug, Default)]
struct Contacts {
    rows: Vec<Contact>,
    by_name: BTreeMap<String, usize>,
}

impl Contacts {
    fn build(talkgroups: &[TalkGroupRecord]) -> Result<Self> {
        let mut contacts = Self::default();
        for row in talkgroups {
            let Some(index) = positive_index(parse_index("No.", &row.number)?) else {
                continue;
            };
            let name = sanitize_name(&row.name, &format!("TG{index}"));
            let kind = if row.call_type.to_lowercase().contains("private") {
                "Private"
            } else {
                "Group"
            };
            contacts.by_name.insert(normalize(&row.name), index);
            contacts.by_name.insert(normalize(&name), index);
            contacts.rows.push(Contact {
                index,
                name,
                kind,
                id: row.radio_id.trim().to_string(),
            });
        }
        Ok(contacts)
    }

    fn default_index(&self) -> usize {
        self.by_name
            .get(&normalize(LOCAL_CONTACT))
            .copied()
            .unwrap_or(1)
    }

    fn resolve(&self, name: &str) -> Option<usize> {
        self.by_name.get(&normalize(name)).copied()
    }
}

/// Channel number lookups for zone membership.
///
/// The raw-name table is consulted first; the sanitized table catches
/// members written in token form.
#[derive(Debug, Default)]
struct ChannelIndex {
    raw: BTreeMap<String, usize>,
    sanitized: BTreeMap<String, usize>,
}

impl ChannelIndex {
    fn resolve(&self, member: &str) -> Option<usize> {
        self.raw
            .get(member)
            .or_else(|| self.sanitized.get(&sanitize_name(member, "UNKNOWN")))
            .copied()
    }
}

/// Renders codeplug tables as a `dmrconfig` configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigRenderer {
    options: RenderOptions,
}

impl ConfigRenderer {
    /// Create a renderer.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render the config text.
    ///
    /// Channels are numbered by position. Zones and contacts keep the number
    /// from their `No.` column and rows numbered zero or below are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoChannels`] when `channels` is empty and
    /// [`Error::InvalidNumber`] when a `No.` or frequency column does not
    /// parse.
    pub fn render(
        &self,
        user: &RadioUser,
        channels: &[ChannelRecord],
        zones: &[ZoneRecord],
        talkgroups: &[TalkGroupRecord],
    ) -> Result<String> {
        if channels.is_empty() {
            return Err(Error::NoChannels);
        }

        let contacts = Contacts::build(talkgroups)?;
        let default_contact = contacts.default_index();

        let mut index = ChannelIndex::default();
        let mut analog = Vec::new();
        let mut digital = Vec::new();

        for (position, row) in channels.iter().enumerate() {
            let number = position + 1;
            let name = sanitize_name(&row.name, &format!("CH{number}"));
            index.raw.insert(row.name.trim().to_string(), number);
            index.sanitized.insert(name.clone(), number);

            let rx = format_frequency(&row.rx_freq)
                .ok_or_else(|| Error::invalid_number("Receive Frequency", &row.rx_freq))?;
            let tx = format_frequency(&row.tx_freq)
                .ok_or_else(|| Error::invalid_number("Transmit Frequency", &row.tx_freq))?;
            let power = power_symbol(&row.power);
            let ro = receive_only_symbol(&row.tx_prohibit);

            if row.is_digital() {
                let (rx_group_list, tx_contact) = if contacts.rows.is_empty() {
                    ("-", "-".to_string())
                } else {
                    let contact = contacts.resolve(&row.contact).unwrap_or(default_contact);
                    ("1", contact.to_string())
                };
                let color = or_default(&row.color_code, "1");
                let slot = or_default(&row.slot, "1");
                digital.push(format!(
                    " {number:>4} {name:<16} {rx:<10} {tx:<10} {power} - 1 {ro} Color {color} {slot} {rx_group_list} {tx_contact}"
                ));
            } else {
                let rx_tone = tone_value(&row.ctcss_decode);
                let tx_tone = tone_value(&row.ctcss_encode);
                let admit = if rx_tone == "-" && tx_tone == "-" { "-" } else { "Tone" };
                let width = analog_width(&row.bandwidth);
                analog.push(format!(
                    " {number:>4} {name:<16} {rx:<10} {tx:<10} {power} - 1 {ro} {admit} Normal {rx_tone} {tx_tone} {width}"
                ));
            }
        }

        let mut zone_lines = Vec::new();
        for row in zones {
            let Some(number) = positive_index(parse_index("No.", &row.number)?) else {
                continue;
            };
            let name = sanitize_name(&row.name, &format!("ZONE{number}"));
            let mut members = Vec::new();
            for member in row.members.split('|').map(str::trim).filter(|m| !m.is_empty()) {
                match index.resolve(member) {
                    Some(channel) => members.push(channel),
                    None => log::warn!("Zone {name}: no channel named {member:?}"),
                }
            }
            zone_lines.push(format!(" {number:>4} {name:<16} {}", compress_ranges(&members)));
        }

        let callsign = sanitize_name(&user.callsign, "NOCALL");
        let mut lines = vec!["# Autogenerated by codeplug".to_string()];
        if let Some(at) = self.options.generated_at {
            lines.push(format!("# Generated UTC: {}", at.format("%Y-%m-%d %H:%M:%S")));
        }
        lines.push(String::new());
        lines.push(format!("Radio: {}", self.options.radio_model));
        lines.push(format!("ID: {}", user.radio_id));
        lines.push(format!("Name: {callsign}"));
        lines.push(format!("Intro Line 1: {callsign}"));
        lines.push("Intro Line 2: codeplug".to_string());
        lines.push(String::new());

        if !contacts.rows.is_empty() {
            lines.push("# Talkgroups".to_string());
            lines.push("Contact Name Type ID RxTone".to_string());
            for contact in &contacts.rows {
                lines.push(format!(
                    " {:>4} {:<16} {:<7} {} -",
                    contact.index, contact.name, contact.kind, contact.id
                ));
            }
            lines.push(String::new());

            let indices: Vec<usize> = contacts.rows.iter().map(|c| c.index).collect();
            lines.push("# Receive group list".to_string());
            lines.push("Grouplist Name Contacts".to_string());
            lines.push(format!("    1 All_TGs {}", compress_ranges(&indices)));
            lines.push(String::new());
        }

        if !analog.is_empty() {
            lines.push("# Analog channels".to_string());
            lines.push(
                "Analog Name Receive Transmit Power Scan TOT RO Admit Squelch RxTone TxTone Width"
                    .to_string(),
            );
            lines.append(&mut analog);
            lines.push(String::new());
        }

        if !digital.is_empty() {
            lines.push("# Digital channels".to_string());
            lines.push(
                "Digital Name Receive Transmit Power Scan TOT RO Admit Color Slot RxGL TxContact"
                    .to_string(),
            );
            lines.append(&mut digital);
            lines.push(String::new());
        }

        lines.push("# Zones".to_string());
        lines.push("Zone Name Channels".to_string());
        lines.append(&mut zone_lines);
        lines.push(String::new());

        Ok(lines.join("\n"))
    }
}

/// The files a config is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigInputs {
    /// RadioID users table.
    pub users_csv: PathBuf,
    /// Channel table.
    pub channel_csv: PathBuf,
    /// Zone table.
    pub zone_csv: PathBuf,
    /// Talkgroup table.
    pub talkgroup_csv: PathBuf,
}

impl ConfigInputs {
    /// Inputs using the standard table file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path, users_csv: &Path) -> Self {
        Self {
            users_csv: users_csv.to_path_buf(),
            channel_csv: dir.join(table::CHANNEL_FILE),
            zone_csv: dir.join(table::ZONE_FILE),
            talkgroup_csv: dir.join(table::TALKGROUP_FILE),
        }
    }
}

/// Look up the user, render the tables and write the config file.
///
/// The parent directory of `output` is created if needed.
///
/// # Errors
///
/// Returns an error if the user is not found, a table cannot be read, the
/// render fails or the file cannot be written.
pub fn write_config(
    inputs: &ConfigInputs,
    radio_id: u32,
    output: &Path,
    options: RenderOptions,
) -> Result<RadioUser> {
    let user = lookup_radio_user(&inputs.users_csv, radio_id)?;
    let channels: Vec<ChannelRecord> = table::read_file(&inputs.channel_csv)?;
    let zones: Vec<ZoneRecord> = table::read_file(&inputs.zone_csv)?;
    let talkgroups: Vec<TalkGroupRecord> = table::read_file(&inputs.talkgroup_csv)?;

    let text = ConfigRenderer::new(options).render(&user, &channels, &zones, &talkgroups)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, text)?;
    log::info!("Wrote {} channels to {}", channels.len(), output.display());
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user(callsign: &str) -> RadioUser {
        RadioUser {
            radio_id: 2_351_234,
            callsign: callsign.to_string(),
            first_name: "Alex".to_string(),
            last_name: "Smith".to_string(),
            city: "London".to_string(),
            state: String::new(),
            country: "United Kingdom".to_string(),
        }
    }

    fn channel(name: &str, kind: &str, contact: &str) -> ChannelRecord {
        ChannelRecord {
            name: name.to_string(),
            rx_freq: "439.45000".to_string(),
            tx_freq: "430.45000".to_string(),
            kind: kind.to_string(),
            contact: contact.to_string(),
            ..Default::default()
        }
    }

    fn talkgroup(number: &str, id: &str, name: &str, call_type: &str) -> TalkGroupRecord {
        TalkGroupRecord {
            number: number.to_string(),
            radio_id: id.to_string(),
            name: name.to_string(),
            call_type: call_type.to_string(),
        }
    }

    fn zone(number: &str, name: &str, members: &str) -> ZoneRecord {
        ZoneRecord {
            number: number.to_string(),
            name: name.to_string(),
            members: members.to_string(),
        }
    }

    fn render(
        channels: &[ChannelRecord],
        zones: &[ZoneRecord],
        talkgroups: &[TalkGroupRecord],
    ) -> String {
        ConfigRenderer::default()
            .render(&user("M0ABC"), channels, zones, talkgroups)
            .unwrap()
    }

    #[test]
    fn test_no_channels_is_error() {
        let err = ConfigRenderer::default()
            .render(&user("M0ABC"), &[], &[], &[])
            .unwrap_err();
        assert!(matches!(err, Error::NoChannels));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_header() {
        let text = render(&[channel("A", "A-Analog", "")], &[], &[]);
        let head: Vec<&str> = text.lines().take(7).collect();
        assert_eq!(
            head,
            vec![
                "# Autogenerated by codeplug",
                "",
                "Radio: Anytone AT-D878UV",
                "ID: 2351234",
                "Name: M0ABC",
                "Intro Line 1: M0ABC",
                "Intro Line 2: codeplug",
            ]
        );
    }

    #[test]
    fn test_timestamp_and_model() {
        let options = RenderOptions {
            radio_model: "Anytone AT-D868UV".to_string(),
            generated_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()),
        };
        let text = ConfigRenderer::new(options)
            .render(&user(""), &[channel("A", "A-Analog", "")], &[], &[])
            .unwrap();
        assert!(text.contains("# Generated UTC: 2024-05-01 12:30:00\n"));
        assert!(text.contains("Radio: Anytone AT-D868UV\n"));
        assert!(text.contains("Name: NOCALL\n"));
    }

    #[test]
    fn test_analog_line() {
        let mut row = channel("GB3CD FM", "A-Analog", "");
        row.rx_freq = "145.68750".to_string();
        row.tx_freq = "145.08750".to_string();
        row.ctcss_encode = "118.8".to_string();
        row.ctcss_decode = "118.8".to_string();
        let text = render(&[row], &[], &[]);
        assert!(text.contains(
            "\n    1 GB3CD_FM         145.6875   145.0875   + - 1 - Tone Normal 118.8 118.8 12.5\n"
        ));
        assert!(!text.contains("# Digital channels"));
        assert!(!text.contains("# Talkgroups"));
    }

    #[test]
    fn test_analog_without_tones() {
        let mut row = channel("PMR 1", "A-Analog", "");
        row.rx_freq = "446.00625".to_string();
        row.tx_freq = "446.00625".to_string();
        row.tx_prohibit = "On".to_string();
        row.power = "Low".to_string();
        let text = render(&[row], &[], &[]);
        assert!(text.contains(" - - 1 + - Normal - - 12.5\n"));
    }

    #[test]
    fn test_digital_contacts() {
        let talkgroups = vec![
            talkgroup("1", "8", "Regional", "Group Call"),
            talkgroup("2", "9", "Local", "Group Call"),
            talkgroup("3", "235", "UK Wide", "Group Call"),
            talkgroup("4", "9990", "BM Parrot", "Private Call"),
        ];
        let mut ts2 = channel("GB7AA TS2", "D-Digital", "uk  wide");
        ts2.slot = "2".to_string();
        ts2.color_code = "3".to_string();
        let channels = vec![
            channel("GB7AA TS1", "D-Digital", "Local"),
            ts2,
            channel("GB7BB TS1", "D-Digital", "Nowhere"),
            channel("GB7CC TS1", "D-Digital", "UK_Wide"),
        ];
        let text = render(&channels, &[], &talkgroups);

        assert!(text.contains("\n    1 GB7AA_TS1        439.45     430.45     + - 1 - Color 1 1 1 2\n"));
        assert!(text.contains("\n    2 GB7AA_TS2        439.45     430.45     + - 1 - Color 3 2 1 3\n"));
        assert!(text.contains(" Color 1 1 1 2\n    4"), "unknown contact uses Local");
        assert!(text.contains("\n    4 GB7CC_TS1        439.45     430.45     + - 1 - Color 1 1 1 3\n"));

        assert!(text.contains("\n    4 BM_Parrot        Private 9990 -\n"));
        assert!(text.contains("\n    3 UK_Wide          Group   235 -\n"));
        assert!(text.contains("\n    1 All_TGs 1-4\n"));
    }

    #[test]
    fn test_default_contact_without_local() {
        let talkgroups = vec![
            talkgroup("5", "91", "World-wide", "Group Call"),
            talkgroup("6", "92", "Europe", "Group Call"),
        ];
        let text = render(&[channel("X TS1", "D-Digital", "")], &[], &talkgroups);
        assert!(text.contains(" Color 1 1 1 1\n"));
        assert!(text.contains("    1 All_TGs 5-6\n"));
    }

    #[test]
    fn test_digital_without_contacts() {
        let text = render(&[channel("X TS1", "D-Digital", "Local")], &[], &[]);
        assert!(text.contains(" Color 1 1 - -\n"));
        assert!(!text.contains("Grouplist"));
    }

    #[test]
    fn test_skips_non_positive_rows() {
        let talkgroups = vec![
            talkgroup("0", "1", "Zero", "Group Call"),
            talkgroup("", "2", "Blank", "Group Call"),
            talkgroup("-3", "3", "Negative", "Group Call"),
            talkgroup("2", "9", "Local", "Group Call"),
        ];
        let zones = vec![zone("0", "Hidden", "A"), zone("1", "Shown", "A")];
        let text = render(&[channel("A", "A-Analog", "")], &zones, &talkgroups);
        assert!(!text.contains("Zero"));
        assert!(!text.contains("Blank"));
        assert!(!text.contains("Negative"));
        assert!(!text.contains("Hidden"));
        assert!(text.contains("    1 Shown            1\n"));
        assert!(text.contains("    1 All_TGs 2\n"));
    }

    #[test]
    fn test_invalid_numbers() {
        let result = ConfigRenderer::default().render(
            &user("M0ABC"),
            &[channel("A", "A-Analog", "")],
            &[zone("one", "Z", "A")],
            &[],
        );
        assert!(matches!(result, Err(Error::InvalidNumber { .. })));

        let mut bad = channel("A", "A-Analog", "");
        bad.rx_freq = "fast".to_string();
        let result = ConfigRenderer::default().render(&user("M0ABC"), &[bad], &[], &[]);
        assert!(matches!(result, Err(Error::InvalidNumber { ref field, .. }) if field == "Receive Frequency"));
    }

    #[test]
    fn test_zone_member_resolution() {
        let channels = vec![
            channel("GB3AA FM", "A-Analog", ""),
            channel("GB3BB FM", "A-Analog", ""),
            channel("GB3CC FM", "A-Analog", ""),
            channel("GB3DD FM", "A-Analog", ""),
            channel("GB3EE FM", "A-Analog", ""),
        ];
        let zones = vec![
            zone("1", "LONDON ANL RPT", "GB3AA FM|GB3BB_FM| GB3CC FM |GB3ZZ FM|GB3EE FM"),
            zone("2", "EMPTY", "MISSING||"),
        ];
        let text = render(&channels, &zones, &[]);
        assert!(text.contains("\n    1 LONDON_ANL_RPT   1-3,5\n"));
        assert!(text.contains("\n    2 EMPTY            -\n"));
    }

    #[test]
    fn test_zone_section_always_present() {
        let text = render(&[channel("A", "A-Analog", "")], &[], &[]);
        assert!(text.ends_with("# Zones\nZone Name Channels\n"));
    }

    #[test]
    fn test_fallback_channel_names() {
        let text = render(&[channel("A", "A-Analog", ""), channel("??", "A-Analog", "")], &[], &[]);
        assert!(text.contains("\n    2 CH2              "));
    }
}
