//! Build script for codeplug-cli.
//!
//! Generates the `codeplug.1` man page into OUT_DIR using clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! tree is described here by hand.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this in step with src/cli.rs and src/commands/.
fn build_cli() -> Command {
    Command::new("codeplug")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate and flash DMR radio codeplugs")
        .long_about(
            "Turn repeater directory data and DMR talkgroup lists into CSV tables for the \
             radio's programming software, and render them into a dmrconfig file",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Extra configuration file layered over the user and project files")
                .value_name("FILE")
                .global(true)
                .env("CODEPLUG_CONFIG"),
        )
        .subcommands(vec![
            Command::new("generate")
                .about("Generate the channel, zone and talkgroup CSV tables")
                .long_about(
                    "Fetch or read repeater and talkgroup data, then write Channel.CSV, \
                     Zone.CSV and TalkGroups.CSV",
                ),
            Command::new("fetch-users")
                .about("Download the RadioID users table")
                .long_about("Download user.csv used to look up the radio's identity"),
            Command::new("flash")
                .about("Render a dmrconfig file and optionally flash it")
                .long_about(
                    "Render the generated tables into a dmrconfig file for a radio ID and, \
                     with --write, run dmrconfig to program the radio",
                ),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("codeplug.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
