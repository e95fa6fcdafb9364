//! Selection of operationally relevant repeaters.

use crate::model::Repeater;

/// Repeater types that never become channels: beacons, TV relays, packet
/// beacons and digipeater beacons.
pub const EXCLUDED_TYPES: &[&str] = &["BN", "TV", "PB", "DB"];

/// Status string of a repeater that is on the air.
const OPERATIONAL: &str = "OPERATIONAL";

/// Keeps operational analog and DMR repeaters, optionally restricted to a
/// locator prefix.
///
/// # Examples
///
/// ```
/// use codeplug::{Repeater, RepeaterFilter};
///
/// let repeater = Repeater {
///     callsign: "GB3WR".to_string(),
///     mode_codes: vec!["A".to_string()],
///     status: "OPERATIONAL".to_string(),
///     kind: "AV".to_string(),
///     locator: "IO81WI".to_string(),
///     ..Default::default()
/// };
///
/// let kept = RepeaterFilter::new(Some("io81")).filter(vec![repeater]);
/// assert_eq!(kept.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RepeaterFilter {
    locator_prefix: Option<String>,
}

impl RepeaterFilter {
    /// Create a filter; an empty prefix disables locator filtering.
    #[must_use]
    pub fn new(locator_prefix: Option<&str>) -> Self {
        Self {
            locator_prefix: locator_prefix
                .map(str::trim)
                .filter(|prefix| !prefix.is_empty())
                .map(str::to_uppercase),
        }
    }

    /// Returns `true` if the repeater should become one or more channels.
    #[must_use]
    pub fn accepts(&self, repeater: &Repeater) -> bool {
        if repeater.status != OPERATIONAL {
            return false;
        }
        if EXCLUDED_TYPES.contains(&repeater.kind.as_str()) {
            return false;
        }
        if !(repeater.has_analog() || repeater.has_dmr()) {
            return false;
        }
        match &self.locator_prefix {
            Some(prefix) => repeater.locator.to_uppercase().starts_with(prefix.as_str()),
            None => true,
        }
    }

    /// Filter repeaters, preserving input order.
    pub fn filter(&self, repeaters: impl IntoIterator<Item = Repeater>) -> Vec<Repeater> {
        let kept: Vec<Repeater> = repeaters
            .into_iter()
            .filter(|repeater| self.accepts(repeater))
            .collect();
        log::info!("Filtered to {} repeaters", kept.len());
        kept
    }
}
