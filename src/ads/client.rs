//! Google Ads API client trait

use super::{AdsError, CampaignRow, DateRange, PerformanceReport};
use async_trait::async_trait;

/// Source of real Google Ads data
///
/// Implementations perform network I/O; callers decide what to do on failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdsApi: Send + Sync {
    /// Account performance for `range`, compared with the period before it
    async fn performance(&self, range: &DateRange) -> Result<PerformanceReport, AdsError>;

    /// Per-campaign performance for `range`, highest cost first
    async fn campaigns(&self, range: &DateRange) -> Result<Vec<CampaignRow>, AdsError>;

    /// Client type name (for logging)
    fn client_type(&self) -> &'static str;
}
