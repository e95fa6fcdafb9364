//! Main entry point for the codeplug CLI.
//!
//! - `generate`: Build the CSV tables from repeater and talkgroup data
//! - `fetch-users`: Download the RadioID users table
//! - `flash`: Render a dmrconfig file and optionally write it to the radio
//! - `completions`: Generate shell completion scripts

mod cli;
mod commands;
mod error;
mod fetch;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // Route library log records to stderr at the requested verbosity
    let logger = codeplug::init_logger(cli.verbose, cli.quiet);
    if let Err(e) = logger.install() {
        eprintln!("Warning: could not install logger: {e}");
    }

    let global = GlobalOptions {
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        cli::Command::Generate(cmd) => cmd.execute(&global),
        cli::Command::FetchUsers(cmd) => cmd.execute(&global),
        cli::Command::Flash(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
