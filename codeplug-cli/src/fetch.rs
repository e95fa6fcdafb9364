//! HTTP retrieval of repeater, talkgroup and user data.

use crate::error::CliError;
use codeplug::model::parse_repeaters;
use codeplug::talkgroups::parse_source;
use codeplug::Repeater;
use reqwest::blocking::Client;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

const REQUEST_TIMEOUT_SECONDS: u64 = 30;
const USER_AGENT: &str = concat!("codeplug/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the repeater directory, BrandMeister and RadioID.
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Build a client with the standard timeout and user agent.
    pub fn new() -> Result<Self, CliError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    fn get_text(&self, url: &str) -> Result<String, CliError> {
        log::info!("Fetching {url}");
        let body = self.client.get(url).send()?.error_for_status()?.text()?;
        log::debug!("Received {} bytes from {url}", body.len());
        Ok(body)
    }

    /// Fetch every repeater on each band, in band order.
    pub fn fetch_repeaters(&self, base: &str, bands: &[String]) -> Result<Vec<Repeater>, CliError> {
        let mut repeaters = Vec::new();
        for band in bands {
            let body = self.get_text(&endpoint(base, &format!("band/{band}")))?;
            let batch = parse_repeaters(&body)?;
            log::info!("Got {} repeaters for {band}", batch.len());
            repeaters.extend(batch);
        }
        Ok(repeaters)
    }

    /// Fetch the full BrandMeister talkgroup mapping.
    pub fn fetch_talkgroups(&self, base: &str) -> Result<BTreeMap<String, String>, CliError> {
        let body = self.get_text(&endpoint(base, "talkgroup/"))?;
        Ok(parse_source(&body)?)
    }

    /// Stream the users table to `path`, returning the number of bytes written.
    ///
    /// The download lands in a sibling `.part` file and is renamed into
    /// place only once complete.
    pub fn download_users(&self, url: &str, path: &Path) -> Result<u64, CliError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        log::info!("Downloading {url}");
        let mut response = self.client.get(url).send()?.error_for_status()?;

        write_via_partial(path, |writer| Ok(response.copy_to(writer)?))
    }
}

/// Run `fill` against a sibling `.part` file and rename it onto `path`.
///
/// The partial file is removed if filling, flushing or renaming fails.
fn write_via_partial<F>(path: &Path, fill: F) -> Result<u64, CliError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<u64, CliError>,
{
    let partial = path.with_extension("part");
    let result = File::create(&partial)
        .map_err(CliError::from)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            let written = fill(&mut writer)?;
            writer.flush()?;
            drop(writer);
            fs::rename(&partial, path)?;
            Ok(written)
        });

    if result.is_err() && partial.exists() {
        if let Err(e) = fs::remove_file(&partial) {
            log::warn!("Could not remove {}: {e}", partial.display());
        }
    }
    result
}

/// Join an API base URL and a relative path with exactly one slash.
pub fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
