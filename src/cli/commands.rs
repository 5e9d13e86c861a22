//! CLI command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fmt::Write as _;
use std::path::Path;

use crate::ads::GoogleAdsYaml;
use crate::config::{Config, ConfigLoader};
use crate::credentials::{CredentialField, CredentialSet};

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the effective configuration (secrets masked)
    Show,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "server.port", "data.allowMockData")
        key: String,
    },
}

/// Handle configuration subcommands
pub async fn handle_config_command(
    cmd: ConfigSubcommand,
    config_path: Option<&Path>,
) -> Result<()> {
    match cmd {
        ConfigSubcommand::Show => {
            let config = ConfigLoader::load(config_path).context("Failed to load configuration")?;
            let yaml = serde_yaml::to_string(&config.redacted())
                .context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            let path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(ConfigLoader::default_path);
            println!("{}", path.display());
        }
        ConfigSubcommand::Validate => {
            let config = ConfigLoader::load(config_path).context("Failed to load configuration")?;
            match ConfigLoader::validate(&config) {
                Ok(()) => println!("Configuration is valid"),
                Err(e) => {
                    eprintln!("Configuration validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        ConfigSubcommand::Get { key } => {
            let config = ConfigLoader::load(config_path).context("Failed to load configuration")?;
            let value = crate::config::get_config_value(&config, &key)?;
            println!("{}", value);
        }
    }

    Ok(())
}

/// Human-readable credential status: one masked line per field, then the verdict
pub fn credential_report(credentials: &CredentialSet) -> String {
    let mut out = String::new();
    for field in CredentialField::ALL {
        let line = if credentials.is_present(field) {
            format!("{:<17} {}", field.label(), credentials.display_value(field))
        } else {
            format!("{:<17} MISSING ({})", field.label(), field.env_var())
        };
        let _ = writeln!(out, "{}", line.trim_end());
    }

    if credentials.is_present(CredentialField::LoginCustomerId)
        && !credentials.customer_id_is_well_formed()
    {
        let _ = writeln!(
            out,
            "warning: customer id should be 10 digits (with or without dashes)"
        );
    }

    if credentials.is_complete() {
        let _ = writeln!(out, "All Google Ads credentials present: real API data will be used");
    } else {
        let _ = writeln!(
            out,
            "{} credential(s) missing: mock data will be served",
            credentials.missing().len()
        );
    }
    out
}

/// Generate `google-ads.yaml` from the effective configuration
pub fn write_ads_yaml(config: &Config, output: &Path) -> Result<()> {
    let credentials = &config.google_ads.credentials;
    if !credentials.is_complete() {
        let missing: Vec<&str> = credentials
            .missing()
            .into_iter()
            .map(CredentialField::env_var)
            .collect();
        tracing::warn!(
            "Writing {} with missing credentials: {}",
            output.display(),
            missing.join(", ")
        );
    }

    GoogleAdsYaml::from_config(&config.google_ads).write_to(output)
}
