//! Google Ads data access
//!
//! Provides:
//! - The [`AdsApi`] trait and its REST implementation
//! - Dashboard payload types and the metric arithmetic
//! - The static mock dataset used as fallback
//! - `google-ads.yaml` rendering

pub mod client;
pub mod dates;
pub mod metrics;
pub mod mock;
pub mod rest;
pub mod yaml;

pub use client::AdsApi;
pub use dates::{DateRange, DateRangeError};
pub use metrics::{CampaignRow, MetricDisplay, MetricValue, PerformanceReport};
pub use rest::GoogleAdsRestClient;
pub use yaml::GoogleAdsYaml;

#[cfg(test)]
pub use client::MockAdsApi;

/// Google Ads API errors
#[derive(Debug, thiserror::Error)]
pub enum AdsError {
    #[error("Google Ads credentials incomplete, missing: {0}")]
    IncompleteCredentials(String),

    #[error("OAuth token refresh failed: {0}")]
    TokenRefresh(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Google Ads API returned {status}: {message}")]
    Api { status: u16, message: String },
}
