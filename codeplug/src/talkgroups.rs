//! Talkgroup curation against a fixed allow-list.
//!
//! The talkgroup source is a mapping from ID string to display name, as
//! served by the BrandMeister talkgroup endpoint. The curator keeps the IDs
//! selected by its [`TalkgroupFilter`], guarantees canonical names for a few
//! well-known IDs and synthesizes any curated ID the source does not carry.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{CallType, TalkGroup};

/// Curated talkgroup IDs for UK operation.
pub const CURATED_IDS: &[u32] = &[
    8, 9, 91, 92, 93, 98, 235, 901, 902, 903, 2350, 2351, 2352, 2353, 2354, 2355, 2356, 2357,
    2358, 2359, 4000, 9990, 234_997,
];

/// Non-regional IDs kept alongside prefix matches.
pub const SUPPLEMENTARY_IDS: &[u32] = &[8, 9, 91, 92, 93, 98, 901, 902, 903, 4000, 9990, 234_997];

/// IDs that are private-call destinations.
pub const PRIVATE_CALL_IDS: &[u32] = &[9990, 234_997];

/// Canonical names that replace whatever the source calls these IDs.
///
/// `9` must stay `Local`: digital channels reference it as their contact.
pub const NAME_OVERRIDES: &[(u32, &str)] = &[(9, "Local"), (9990, "BM Parrot"), (234_997, "UK Parrot")];

/// Default numeric prefix for the prefix filter.
pub const DEFAULT_PREFIX: &str = "235";

/// Which talkgroups survive curation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TalkgroupFilter {
    /// Keep exactly [`CURATED_IDS`].
    #[default]
    Curated,
    /// Keep IDs starting with a configured prefix, plus [`SUPPLEMENTARY_IDS`].
    Prefix,
}

/// Parse a talkgroup source document into an ID to name mapping.
///
/// Entries whose value is not a string are dropped.
///
/// # Errors
///
/// Returns an error if the document is not a JSON object.
pub fn parse_source(json: &str) -> Result<BTreeMap<String, String>> {
    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(name) => Some((key, name)),
            other => {
                log::debug!("Skipping talkgroup {key:?} with non-string name {other}");
                None
            }
        })
        .collect())
}

/// Filters and backfills a talkgroup source.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use codeplug::TalkgroupCurator;
///
/// let mut source = BTreeMap::new();
/// source.insert("9".to_string(), "Local 9".to_string());
/// source.insert("91".to_string(), "World-wide".to_string());
/// source.insert("12345".to_string(), "Elsewhere".to_string());
///
/// let talkgroups = TalkgroupCurator::curated().curate(&source);
/// assert_eq!(talkgroups[0].name, "8");
/// assert_eq!(talkgroups[1].name, "Local");
/// assert!(talkgroups.iter().all(|tg| tg.id != 12345));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalkgroupCurator {
    filter: TalkgroupFilter,
    prefixes: Vec<String>,
}

impl Default for TalkgroupCurator {
    fn default() -> Self {
        Self::curated()
    }
}

impl TalkgroupCurator {
    /// Create a curator; the prefix filter falls back to [`DEFAULT_PREFIX`]
    /// when no non-empty prefix is supplied.
    #[must_use]
    pub fn new(filter: TalkgroupFilter, prefixes: &[String]) -> Self {
        let mut prefixes: Vec<String> = prefixes
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if prefixes.is_empty() {
            prefixes.push(DEFAULT_PREFIX.to_string());
        }
        Self { filter, prefixes }
    }

    /// Curator keeping the fixed curated set.
    #[must_use]
    pub fn curated() -> Self {
        Self::new(TalkgroupFilter::Curated, &[])
    }

    /// Curator keeping prefix matches plus the supplementary set.
    #[must_use]
    pub fn prefixed(prefixes: &[String]) -> Self {
        Self::new(TalkgroupFilter::Prefix, prefixes)
    }

    /// The active filter.
    #[must_use]
    pub fn filter(&self) -> TalkgroupFilter {
        self.filter
    }

    fn required_ids(&self) -> &'static [u32] {
        match self.filter {
            TalkgroupFilter::Curated => CURATED_IDS,
            TalkgroupFilter::Prefix => SUPPLEMENTARY_IDS,
        }
    }

    fn keeps(&self, key: &str, id: u32) -> bool {
        match self.filter {
            TalkgroupFilter::Curated => CURATED_IDS.contains(&id),
            TalkgroupFilter::Prefix => {
                self.prefixes.iter().any(|p| key.starts_with(p.as_str()))
                    || SUPPLEMENTARY_IDS.contains(&id)
            }
        }
    }

    fn build(id: u32, name: &str) -> TalkGroup {
        let name = NAME_OVERRIDES
            .iter()
            .find(|(known, _)| *known == id)
            .map_or(name, |(_, canonical)| *canonical);
        let call_type = if PRIVATE_CALL_IDS.contains(&id) {
            CallType::Private
        } else {
            CallType::Group
        };
        TalkGroup::new(name, id, call_type)
    }

    /// Curate a talkgroup source, sorted ascending by ID.
    #[must_use]
    pub fn curate(&self, source: &BTreeMap<String, String>) -> Vec<TalkGroup> {
        if source.is_empty() {
            log::warn!("Empty talkgroup source");
            return Vec::new();
        }

        let mut kept: BTreeMap<u32, TalkGroup> = BTreeMap::new();
        for (key, name) in source {
            let key = key.trim();
            let Ok(id) = key.parse::<u32>() else {
                log::debug!("Skipping malformed talkgroup key {key:?}");
                continue;
            };
            if self.keeps(key, id) {
                kept.entry(id).or_insert_with(|| Self::build(id, name));
            }
        }

        let present: BTreeSet<u32> = kept.keys().copied().collect();
        for id in self.required_ids() {
            if present.contains(id) {
                continue;
            }
            let talkgroup = Self::build(*id, &id.to_string());
            log::info!(
                "Talkgroup {id} not in source, added as {:?}",
                talkgroup.name
            );
            kept.insert(*id, talkgroup);
        }

        kept.into_values().collect()
    }
}
