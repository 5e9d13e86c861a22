//! `google-ads.yaml` rendering
//!
//! The official Google Ads client libraries load their configuration from this
//! file; deployments generate it from the same environment variables the
//! dashboard reads.

use crate::config::GoogleAdsConfig;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Default output file name
pub const DEFAULT_FILE_NAME: &str = "google-ads.yaml";

/// Contents of a `google-ads.yaml` file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoogleAdsYaml {
    pub client_id: String,
    pub client_secret: String,
    pub developer_token: String,
    /// Dashes stripped
    pub login_customer_id: String,
    pub refresh_token: String,
    pub token_uri: String,
    pub use_proto_plus: bool,
    pub api_version: String,
}

impl GoogleAdsYaml {
    pub fn from_config(config: &GoogleAdsConfig) -> Self {
        let credentials = &config.credentials;
        Self {
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            developer_token: credentials.developer_token.clone(),
            login_customer_id: credentials.customer_id(),
            refresh_token: credentials.refresh_token.clone(),
            token_uri: config.token_url.clone(),
            use_proto_plus: config.use_proto_plus,
            api_version: config.api_version.clone(),
        }
    }

    pub fn render(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize google-ads.yaml")
    }

    /// Write the file, replacing any existing one
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let yaml = self.render()?;
        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!("Wrote Google Ads client configuration to {}", path.display());
        Ok(())
    }
}
