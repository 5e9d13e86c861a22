//! Shared handler state

use crate::config::Config;
use crate::source::DataSourceSelector;
use anyhow::Result;
use std::sync::Arc;

/// Immutable state shared by all requests
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub selector: Arc<DataSourceSelector>,
}

impl AppState {
    pub fn new(config: Config, selector: DataSourceSelector) -> Self {
        Self {
            config: Arc::new(config),
            selector: Arc::new(selector),
        }
    }

    /// Build state with the Google Ads REST client behind the selector
    pub fn from_config(config: Config) -> Result<Self> {
        let selector = DataSourceSelector::from_config(&config)?;
        Ok(Self::new(config, selector))
    }
}
