//! Command to render a `dmrconfig` file and optionally flash the radio.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use chrono::Utc;
use clap::Args;
use codeplug::flash::DEFAULT_BINARY;
use codeplug::{write_config, Config, ConfigInputs, RenderOptions};
use std::path::{Path, PathBuf};
use std::process;

/// Build a dmrconfig codeplug from the generated tables and optionally
/// write it to the radio.
#[derive(Args)]
pub struct FlashCommand {
    /// DMR radio ID to apply (looked up in the users table)
    #[arg(long, value_name = "ID")]
    pub radio_id: u32,

    /// RadioID users table (default: <output-dir>/user.csv)
    #[arg(long, value_name = "PATH")]
    pub users_csv: Option<PathBuf>,

    /// Directory containing Channel.CSV, Zone.CSV and TalkGroups.CSV
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Where to write the .conf file (default: <output-dir>/codeplug-<id>.conf)
    #[arg(long, value_name = "PATH")]
    pub output_conf: Option<PathBuf>,

    /// dmrconfig radio model
    #[arg(long, value_name = "MODEL")]
    pub radio_model: Option<String>,

    /// Executable used for flashing
    #[arg(long, value_name = "BIN", default_value = DEFAULT_BINARY)]
    pub dmrconfig_bin: String,

    /// Pass -t to dmrconfig for serial trace logging
    #[arg(long)]
    pub trace: bool,

    /// Write to the radio now; without this only the .conf is generated
    #[arg(long)]
    pub write: bool,

    /// Record the generation time in the .conf header
    #[arg(long)]
    pub timestamp: bool,
}

impl FlashCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let overrides = Config {
            output_dir: self.output_dir.clone(),
            radio_model: self.radio_model.clone(),
            ..Default::default()
        };
        let config = load_configuration(global, overrides)?;

        let output_dir = config.output_dir();
        let users_csv = self
            .users_csv
            .clone()
            .unwrap_or_else(|| output_dir.join("user.csv"));
        let output_conf = self
            .output_conf
            .clone()
            .unwrap_or_else(|| output_dir.join(format!("codeplug-{}.conf", self.radio_id)));

        let inputs = ConfigInputs::in_dir(&output_dir, &users_csv);
        check_inputs(&inputs)?;

        let options = RenderOptions {
            radio_model: config.radio_model(),
            generated_at: self.timestamp.then(Utc::now),
        };
        let user = write_config(&inputs, self.radio_id, &output_conf, options)?;

        let full_name = format!("{} {}", user.first_name, user.last_name);
        println!(
            "Matched Radio ID {} -> {} {}",
            user.radio_id,
            user.callsign,
            full_name.trim()
        );
        println!("Generated dmrconfig file: {}", output_conf.display());

        let command = codeplug::FlashCommand::new(&output_conf)
            .with_binary(&self.dmrconfig_bin)
            .with_trace(self.trace);
        println!("Flash command: {}", shell_join(&command.argv()));

        if !self.write {
            println!("Dry run complete. Re-run with --write to flash the radio.");
            return Ok(());
        }

        let command = command.resolve()?;
        log::info!("Running {}", shell_join(&command.argv()));
        let status = process::Command::new(&command.binary)
            .args(command.args())
            .status()?;

        if !status.success() {
            return Err(CliError::FlashFailed {
                code: status.code(),
            });
        }

        println!("Flash complete.");
        Ok(())
    }
}

/// Fail with the full list of missing input files.
fn check_inputs(inputs: &ConfigInputs) -> Result<(), CliError> {
    let missing: Vec<&Path> = [
        &inputs.channel_csv,
        &inputs.zone_csv,
        &inputs.talkgroup_csv,
        &inputs.users_csv,
    ]
    .into_iter()
    .map(PathBuf::as_path)
    .filter(|path| !path.exists())
    .collect();

    if missing.is_empty() {
        return Ok(());
    }

    eprintln!("Missing required files:");
    for path in &missing {
        eprintln!("  - {}", path.display());
    }
    eprintln!("Run 'codeplug generate' and 'codeplug fetch-users' first.");
    Err(CliError::SemanticFailure(format!(
        "{} required file(s) missing",
        missing.len()
    )))
}

/// Join arguments for display, single-quoting any that need it.
fn shell_join(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            let plain = !arg.is_empty()
                && arg
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "-_./=:@%+,".contains(c));
            if plain {
                arg.clone()
            } else {
                format!("'{}'", arg.replace('\'', r"'\''"))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
