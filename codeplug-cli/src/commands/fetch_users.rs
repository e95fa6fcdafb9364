//! Command to download the RadioID users table.

use crate::error::CliError;
use crate::fetch::ApiClient;
use crate::utils::{load_configuration, shorten_path, GlobalOptions};
use clap::Args;
use codeplug::config::SourceConfig;
use codeplug::Config;
use std::path::PathBuf;

/// Download the RadioID `user.csv` used to look up radio identities.
#[derive(Args)]
pub struct FetchUsersCommand {
    /// Where to write the users table (default: <output-dir>/user.csv)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Download from this URL instead of the configured source
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}

impl FetchUsersCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let overrides = Config {
            sources: self.url.map(|url| SourceConfig {
                radioid_users: Some(url),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = load_configuration(global, overrides)?;
        let path = self
            .path
            .unwrap_or_else(|| config.output_dir().join("user.csv"));

        let written = ApiClient::new()?.download_users(&config.radioid_users(), &path)?;

        if !global.quiet {
            println!("Downloaded {written} bytes to {}", shorten_path(&path));
        }
        Ok(())
    }
}
