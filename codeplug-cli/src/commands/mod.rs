//! CLI command implementations.
//!
//! - `generate`: Build the channel, zone and talkgroup tables
//! - `fetch_users`: Download the RadioID users table
//! - `flash`: Render a dmrconfig file and optionally write it to the radio
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod fetch_users;
pub mod flash;
pub mod generate;

pub use completions::CompletionsCommand;
pub use fetch_users::FetchUsersCommand;
pub use flash::FlashCommand;
pub use generate::GenerateCommand;
