//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, FetchUsersCommand, FlashCommand, GenerateCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate and flash DMR radio codeplugs from repeater directory data.
#[derive(Parser)]
#[command(name = "codeplug")]
#[command(version, about = "Generate and flash DMR radio codeplugs", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Extra configuration file layered over the user and project files
    #[arg(long, value_name = "FILE", global = true, env = "CODEPLUG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate the channel, zone and talkgroup CSV tables
    Generate(GenerateCommand),

    /// Download the RadioID users table
    FetchUsers(FetchUsersCommand),

    /// Render a dmrconfig file from the tables and optionally flash it
    Flash(FlashCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
