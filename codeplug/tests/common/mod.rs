//! Common test utilities for integration tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use codeplug::model::parse_repeaters;
use codeplug::talkgroups::parse_source;
use codeplug::Repeater;

/// Path of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Repeaters from the fixture directory response.
#[allow(dead_code)]
pub fn fixture_repeaters() -> Vec<Repeater> {
    let json = fs::read_to_string(fixture_path("repeaters.json")).unwrap();
    parse_repeaters(&json).unwrap()
}

/// Talkgroup mapping from the fixture BrandMeister response.
#[allow(dead_code)]
pub fn fixture_talkgroups() -> BTreeMap<String, String> {
    let json = fs::read_to_string(fixture_path("talkgroups.json")).unwrap();
    parse_source(&json).unwrap()
}

/// Builder for repeater records with sensible defaults.
///
/// Defaults to an operational analog repeater on 2m in IO91WM.
#[allow(dead_code)]
pub struct RepeaterFixture {
    repeater: Repeater,
}

#[allow(dead_code)]
impl RepeaterFixture {
    pub fn new(callsign: &str) -> Self {
        Self {
            repeater: Repeater {
                callsign: callsign.to_string(),
                tx: 145_600_000,
                rx: 145_000_000,
                band: "2M".to_string(),
                mode_codes: vec!["A".to_string()],
                status: "OPERATIONAL".to_string(),
                kind: "AV".to_string(),
                locator: "IO91WM".to_string(),
                ..Default::default()
            },
        }
    }

    pub fn with_modes(mut self, modes: &[&str]) -> Self {
        self.repeater.mode_codes = modes.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_locator(mut self, locator: &str) -> Self {
        self.repeater.locator = locator.to_string();
        self
    }

    pub fn with_frequencies(mut self, tx: u64, rx: u64) -> Self {
        self.repeater.tx = tx;
        self.repeater.rx = rx;
        self
    }

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.repeater.kind = kind.to_string();
        self
    }

    pub fn build(self) -> Repeater {
        self.repeater
    }
}
