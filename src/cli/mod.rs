//! CLI command handling module
//!
//! Handles all CLI subcommands other than starting the server.

mod commands;
mod logging;
mod version;

pub use commands::{credential_report, handle_config_command, write_ads_yaml, ConfigSubcommand};
pub use logging::*;
pub use version::display_version;
