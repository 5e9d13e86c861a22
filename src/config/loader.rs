//! Configuration loading and layering logic
//!
//! Handles loading configuration from the optional YAML file and the process
//! environment, applied on top of built-in defaults.

use super::{parse_duration, paths, schema::Config};
use crate::credentials::{CredentialField, CredentialSet};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variables read by the loader, besides the credential fields
pub const ENV_ALWAYS_USE_REAL_CLIENT: &str = "GOOGLE_ADS_ALWAYS_USE_REAL_CLIENT";
pub const ENV_ALLOW_MOCK_DATA: &str = "ALLOW_MOCK_DATA";
pub const ENV_API_VERSION: &str = "GOOGLE_ADS_API_VERSION";
pub const ENV_USE_PROTO_PLUS: &str = "GOOGLE_ADS_USE_PROTO_PLUS";
pub const ENV_ENVIRONMENT: &str = "DASHBOARD_ENV";
pub const ENV_ENVIRONMENT_LEGACY: &str = "FLASK_ENV";
pub const ENV_PORT: &str = "PORT";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers applied
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file (`path`, or the default location when present)
    /// 3. Built-in defaults
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config = match path {
            Some(path) => Self::load_file(path)?,
            None => {
                let root = paths::root_config_path();
                if root.exists() {
                    Self::load_file(&root)?
                } else {
                    Self::load_defaults()
                }
            }
        };

        Ok(Self::apply_env_overrides(config, |name| std::env::var(name).ok()))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!("Loaded configuration file: {}", path.display());

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        Config::default()
    }

    /// Apply environment overrides read through `lookup`
    ///
    /// Empty values are ignored so that an unset-but-exported variable does not
    /// wipe a value coming from the config file.
    pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let from_env = CredentialSet::from_lookup(&lookup);
        for field in CredentialField::ALL {
            if from_env.is_present(field) {
                config
                    .google_ads
                    .credentials
                    .set(field, from_env.get(field).to_string());
            }
        }

        if let Some(value) = lookup(ENV_ALWAYS_USE_REAL_CLIENT) {
            apply_bool(&mut config.data.always_use_real_client, ENV_ALWAYS_USE_REAL_CLIENT, &value);
        }

        if let Some(value) = lookup(ENV_ALLOW_MOCK_DATA) {
            apply_bool(&mut config.data.allow_mock_data, ENV_ALLOW_MOCK_DATA, &value);
        }

        if let Some(value) = lookup(ENV_USE_PROTO_PLUS) {
            apply_bool(&mut config.google_ads.use_proto_plus, ENV_USE_PROTO_PLUS, &value);
        }

        if let Some(version) = lookup(ENV_API_VERSION) {
            config.google_ads.api_version = version;
        }

        if let Some(environment) =
            lookup(ENV_ENVIRONMENT).or_else(|| lookup(ENV_ENVIRONMENT_LEGACY))
        {
            config.environment = environment;
        }

        if let Some(port) = lookup(ENV_PORT) {
            match port.trim().parse::<u16>() {
                Ok(port) => config.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid {} value: {}", ENV_PORT, port),
            }
        }

        config
    }

    /// Validate a configuration
    ///
    /// Fails on:
    /// - Unparseable request timeout
    /// - Invalid API or token URLs
    /// - A port of 0
    pub fn validate(config: &Config) -> Result<()> {
        parse_duration(&config.server.request_timeout).with_context(|| {
            format!(
                "server.requestTimeout is invalid: {}",
                config.server.request_timeout
            )
        })?;

        url::Url::parse(&config.google_ads.api_base_url).with_context(|| {
            format!(
                "googleAds.apiBaseUrl is not a valid URL: {}",
                config.google_ads.api_base_url
            )
        })?;

        url::Url::parse(&config.google_ads.token_url).with_context(|| {
            format!(
                "googleAds.tokenUrl is not a valid URL: {}",
                config.google_ads.token_url
            )
        })?;

        if config.server.port == 0 {
            anyhow::bail!("server.port must be greater than 0");
        }

        if !config.google_ads.api_version.starts_with('v') {
            anyhow::bail!(
                "googleAds.apiVersion should look like 'v17', got '{}'",
                config.google_ads.api_version
            );
        }

        Ok(())
    }

    /// Path of the default config file
    pub fn default_path() -> PathBuf {
        paths::root_config_path()
    }
}

/// Parse a boolean flag value, accepting the usual spellings
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn apply_bool(target: &mut bool, name: &str, value: &str) {
    match parse_bool(value) {
        Some(parsed) => *target = parsed,
        None => tracing::warn!("Ignoring invalid boolean for {}: {}", name, value),
    }
}
