//! Configuration system for the dashboard
//!
//! Configuration is read once at process start (built-in defaults, an optional
//! YAML file, then environment variables) and shared read-only afterwards.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::{parse_bool, ConfigLoader};
pub use schema::{Config, DataSourceConfig, GoogleAdsConfig, ServerConfig};

use crate::credentials::CredentialField;
use anyhow::{Context, Result};
use std::time::Duration;

/// Get a configuration value by key (dot notation)
///
/// Credential secrets are returned masked.
pub fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let credentials = &config.google_ads.credentials;
    let credential =
        |field: CredentialField| -> Result<String> { Ok(credentials.display_value(field)) };

    match key {
        "environment" => Ok(config.environment.clone()),
        "server.bindAddress" => Ok(config.server.bind_address.clone()),
        "server.port" => Ok(config.server.port.to_string()),
        "server.requestTimeout" => Ok(config.server.request_timeout.clone()),
        "googleAds.apiVersion" => Ok(config.google_ads.api_version.clone()),
        "googleAds.useProtoPlus" => Ok(config.google_ads.use_proto_plus.to_string()),
        "googleAds.apiBaseUrl" => Ok(config.google_ads.api_base_url.clone()),
        "googleAds.tokenUrl" => Ok(config.google_ads.token_url.clone()),
        "googleAds.credentials.clientId" => credential(CredentialField::ClientId),
        "googleAds.credentials.clientSecret" => credential(CredentialField::ClientSecret),
        "googleAds.credentials.developerToken" => credential(CredentialField::DeveloperToken),
        "googleAds.credentials.loginCustomerId" => credential(CredentialField::LoginCustomerId),
        "googleAds.credentials.refreshToken" => credential(CredentialField::RefreshToken),
        "data.alwaysUseRealClient" => Ok(config.data.always_use_real_client.to_string()),
        "data.allowMockData" => Ok(config.data.allow_mock_data.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Parse duration string (e.g., "30s", "1m", "500ms")
pub fn parse_duration(s: &str) -> Result<Duration> {
    if let Some(ms) = s.strip_suffix("ms") {
        let ms: u64 = ms.parse().context("Invalid milliseconds in duration")?;
        Ok(Duration::from_millis(ms))
    } else if let Some(secs) = s.strip_suffix('s') {
        let secs: u64 = secs.parse().context("Invalid seconds in duration")?;
        Ok(Duration::from_secs(secs))
    } else if let Some(mins) = s.strip_suffix('m') {
        let mins: u64 = mins.parse().context("Invalid minutes in duration")?;
        Ok(Duration::from_secs(mins * 60))
    } else if let Some(hours) = s.strip_suffix('h') {
        let hours: u64 = hours.parse().context("Invalid hours in duration")?;
        Ok(Duration::from_secs(hours * 3600))
    } else {
        anyhow::bail!("Invalid duration format: {}", s)
    }
}
