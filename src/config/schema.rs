//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde for serialization.

use crate::credentials::CredentialSet;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Deployment environment name reported by the health endpoint
    #[serde(default = "default_environment")]
    pub environment: String,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Google Ads API configuration
    #[serde(default)]
    pub google_ads: GoogleAdsConfig,

    /// Data source selection flags
    #[serde(default)]
    pub data: DataSourceConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Address to bind the listener to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Timeout applied to incoming requests and outbound API calls (e.g. "30s")
    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,
}

/// Google Ads API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAdsConfig {
    /// API credentials (normally supplied through environment variables)
    #[serde(default)]
    pub credentials: CredentialSet,

    /// API version path segment
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Written to google-ads.yaml for the official client libraries
    #[serde(default = "default_true")]
    pub use_proto_plus: bool,

    /// Base URL of the Google Ads REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// OAuth token endpoint used to exchange the refresh token
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

/// Data source selection flags
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceConfig {
    /// Attempt the real API even when credentials are incomplete
    #[serde(default = "default_false")]
    pub always_use_real_client: bool,

    /// Answer with mock data when a real API call fails
    #[serde(default = "default_false")]
    pub allow_mock_data: bool,
}

impl Config {
    /// Copy safe to print: credential secrets are masked
    pub fn redacted(&self) -> Config {
        let mut copy = self.clone();
        copy.google_ads.credentials = self.google_ads.credentials.redacted();
        copy
    }
}

// Default value functions
fn default_environment() -> String {
    "production".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> String {
    "30s".to_string()
}

fn default_api_version() -> String {
    "v17".to_string()
}

fn default_api_base_url() -> String {
    "https://googleads.googleapis.com".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            server: ServerConfig::default(),
            google_ads: GoogleAdsConfig::default(),
            data: DataSourceConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for GoogleAdsConfig {
    fn default() -> Self {
        Self {
            credentials: CredentialSet::default(),
            api_version: default_api_version(),
            use_proto_plus: default_true(),
            api_base_url: default_api_base_url(),
            token_url: default_token_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.environment, "production");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.google_ads.api_version, "v17");
        assert!(config.google_ads.use_proto_plus);
        assert!(!config.data.always_use_real_client);
        assert!(!config.data.allow_mock_data);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("googleAds"));
        assert!(yaml.contains("allowMockData"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
environment: staging
server:
  port: 9000
data:
  allowMockData: true
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.environment, "staging");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert!(config.data.allow_mock_data);
        assert!(!config.data.always_use_real_client);
        assert_eq!(config.google_ads.api_version, "v17");
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let mut config = Config::default();
        config.google_ads.credentials.client_secret = "super-secret-value".to_string();
        let yaml = serde_yaml::to_string(&config.redacted()).unwrap();
        assert!(!yaml.contains("super-secret-value"));
    }
}
