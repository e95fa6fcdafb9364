//! Configuration validation.
//!
//! Checks values a YAML schema cannot express: band names, the zone size
//! range, locator shape and talkgroup prefixes.

use crate::config::schema::{Config, SourceConfig, TalkgroupConfig, ZoneConfig};
use crate::error::{Error, Result};
use crate::model::MAX_ZONE_CHANNELS;
use crate::talkgroups::TalkgroupFilter;

/// Bands the repeater directory can be queried for.
pub const SUPPORTED_BANDS: &[&str] = &["2m", "70cm"];

/// Longest locator prefix accepted (a six-character Maidenhead square).
pub const MAX_LOCATOR_LENGTH: usize = 6;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use codeplug::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
///
/// let bad = Config { bands: Some(vec!["6m".to_string()]), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref locator) = config.locator {
            Self::validate_locator(locator)?;
        }

        if let Some(ref bands) = config.bands {
            Self::validate_bands(bands)?;
        }

        if let Some(ref zones) = config.zones {
            Self::validate_zones(zones)?;
        }

        if let Some(ref talkgroups) = config.talkgroups {
            Self::validate_talkgroups(talkgroups)?;
        }

        if let Some(ref model) = config.radio_model {
            if model.trim().is_empty() {
                return Err(Error::Validation {
                    field: "radio_model".into(),
                    message: "Cannot be empty or only whitespace".into(),
                });
            }
        }

        if let Some(ref sources) = config.sources {
            Self::validate_sources(sources)?;
        }

        Ok(())
    }

    /// A locator prefix is up to six ASCII letters and digits.
    fn validate_locator(locator: &str) -> Result<()> {
        let trimmed = locator.trim();

        if trimmed.is_empty() {
            return Err(Error::Validation {
                field: "locator".into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }

        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::Validation {
                field: "locator".into(),
                message: format!("Locator prefix must be letters and digits: '{locator}'"),
            });
        }

        if trimmed.len() > MAX_LOCATOR_LENGTH {
            return Err(Error::Validation {
                field: "locator".into(),
                message: format!("Cannot exceed {MAX_LOCATOR_LENGTH} characters"),
            });
        }

        Ok(())
    }

    fn validate_bands(bands: &[String]) -> Result<()> {
        if bands.is_empty() {
            return Err(Error::Validation {
                field: "bands".into(),
                message: "At least one band is required".into(),
            });
        }

        for band in bands {
            if !SUPPORTED_BANDS.contains(&band.as_str()) {
                return Err(Error::Validation {
                    field: "bands".into(),
                    message: format!(
                        "Unsupported band '{band}' (expected one of: {})",
                        SUPPORTED_BANDS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    fn validate_zones(zones: &ZoneConfig) -> Result<()> {
        if let Some(max) = zones.max_channels {
            if max == 0 || max > MAX_ZONE_CHANNELS {
                return Err(Error::Validation {
                    field: "zones.max_channels".into(),
                    message: format!("Must be between 1 and {MAX_ZONE_CHANNELS}, got {max}"),
                });
            }
        }
        Ok(())
    }

    fn validate_talkgroups(talkgroups: &TalkgroupConfig) -> Result<()> {
        if let Some(ref prefixes) = talkgroups.prefixes {
            for prefix in prefixes {
                if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
                    return Err(Error::Validation {
                        field: "talkgroups.prefixes".into(),
                        message: format!("Prefix must be digits: '{prefix}'"),
                    });
                }
            }
        }

        // An explicitly empty list leaves the prefix filter nothing to match.
        if talkgroups.filter == Some(TalkgroupFilter::Prefix)
            && talkgroups.prefixes.as_ref().is_some_and(Vec::is_empty)
        {
            return Err(Error::Validation {
                field: "talkgroups.prefixes".into(),
                message: "The prefix filter requires at least one prefix".into(),
            });
        }

        Ok(())
    }

    fn validate_sources(sources: &SourceConfig) -> Result<()> {
        for (field, value) in [
            ("sources.repeater_api", &sources.repeater_api),
            ("sources.brandmeister_api", &sources.brandmeister_api),
            ("sources.radioid_users", &sources.radioid_users),
        ] {
            if let Some(url) = value {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(Error::Validation {
                        field: field.into(),
                        message: format!("Must be an http(s) URL: '{url}'"),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(Error::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_config() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_locator() {
        for good in ["IO", "IO91", "io91wm"] {
            let config = Config {
                locator: Some(good.to_string()),
                ..Default::default()
            };
            assert!(ConfigValidator::validate(&config).is_ok(), "{good}");
        }
        for bad in ["", "  ", "IO-91", "IO91WM12"] {
            let config = Config {
                locator: Some(bad.to_string()),
                ..Default::default()
            };
            assert_eq!(field_of(ConfigValidator::validate(&config)), "locator", "{bad}");
        }
    }

    #[test]
    fn test_validate_bands() {
        let config = Config {
            bands: Some(vec!["70cm".to_string(), "2m".to_string()]),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_ok());

        let config = Config {
            bands: Some(vec!["23cm".to_string()]),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "bands");

        let config = Config {
            bands: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "bands");
    }

    #[test]
    fn test_validate_zone_cap() {
        for (max, ok) in [(0, false), (1, true), (250, true), (251, false)] {
            let config = Config {
                zones: Some(ZoneConfig {
                    max_channels: Some(max),
                    ..Default::default()
                }),
                ..Default::default()
            };
            assert_eq!(ConfigValidator::validate(&config).is_ok(), ok, "{max}");
        }
    }

    #[test]
    fn test_validate_prefixes() {
        let config = Config {
            talkgroups: Some(TalkgroupConfig {
                filter: Some(TalkgroupFilter::Prefix),
                prefixes: Some(vec!["23x".to_string()]),
            }),
            ..Default::default()
        };
        assert_eq!(
            field_of(ConfigValidator::validate(&config)),
            "talkgroups.prefixes"
        );

        let config = Config {
            talkgroups: Some(TalkgroupConfig {
                filter: Some(TalkgroupFilter::Prefix),
                prefixes: Some(Vec::new()),
            }),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_err());

        let config = Config {
            talkgroups: Some(TalkgroupConfig {
                filter: Some(TalkgroupFilter::Prefix),
                prefixes: None,
            }),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_sources_and_model() {
        let config = Config {
            sources: Some(SourceConfig {
                repeater_api: Some("ftp://example".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            field_of(ConfigValidator::validate(&config)),
            "sources.repeater_api"
        );

        let config = Config {
            radio_model: Some(" ".to_string()),
            ..Default::default()
        };
        assert_eq!(field_of(ConfigValidator::validate(&config)), "radio_model");
    }
}
