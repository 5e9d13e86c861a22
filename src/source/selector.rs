//! Credential-gated data source selection
//!
//! Decides per request whether to call the Google Ads API or answer from the
//! mock dataset:
//! - Credentials incomplete and real calls not forced: mock, no network call
//! - Otherwise the API is called; a failure becomes mock data only when
//!   fallback is allowed, and is returned to the caller when it is not

use super::envelope::{DataSourceKind, Envelope};
use crate::ads::{
    mock, AdsApi, AdsError, CampaignRow, DateRange, GoogleAdsRestClient, PerformanceReport,
};
use crate::config::{parse_duration, Config};
use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;

/// Errors surfaced to callers of the selector
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Google Ads API request failed: {0}")]
    Upstream(#[from] AdsError),
}

/// Why a request was answered with mock data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReason {
    /// The real API was never attempted
    MissingCredentials,
    /// The real API failed and fallback is allowed
    Fallback(String),
    /// The real API answered with no campaigns
    NoCampaigns,
}

impl MockReason {
    /// Note attached to every item of the mock payload
    pub fn note(&self) -> String {
        match self {
            MockReason::MissingCredentials => mock::NO_CREDENTIALS_NOTE.to_string(),
            MockReason::Fallback(message) => mock::error_note(message),
            MockReason::NoCampaigns => mock::NO_CAMPAIGNS_NOTE.to_string(),
        }
    }
}

/// Inputs of the selection decision, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionPolicy {
    pub credentials_complete: bool,
    pub always_use_real_client: bool,
    pub allow_mock_data: bool,
}

impl SelectionPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            credentials_complete: config.google_ads.credentials.is_complete(),
            always_use_real_client: config.data.always_use_real_client,
            allow_mock_data: config.data.allow_mock_data,
        }
    }

    /// Whether a request goes to the real API at all
    pub fn attempts_real(&self) -> bool {
        self.credentials_complete || self.always_use_real_client
    }
}

/// Apply the selection policy to one request
///
/// `real` is only invoked when the policy attempts the API; `mock` builds the
/// fallback payload for the given reason.
pub async fn select<T, R, Fut, M>(
    policy: &SelectionPolicy,
    real: R,
    mock: M,
) -> Result<Envelope<T>, SourceError>
where
    R: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, AdsError>>,
    M: FnOnce(MockReason) -> T,
{
    if !policy.attempts_real() {
        tracing::debug!("Credentials incomplete, answering with mock data");
        return Ok(Envelope::Mock(mock(MockReason::MissingCredentials)));
    }

    match real().await {
        Ok(payload) => {
            tracing::debug!("Answered from the Google Ads API");
            Ok(Envelope::Real(payload))
        }
        Err(e) if policy.allow_mock_data => {
            tracing::warn!("Google Ads API call failed, falling back to mock data: {}", e);
            Ok(Envelope::Mock(mock(MockReason::Fallback(e.to_string()))))
        }
        Err(e) => {
            tracing::error!("Google Ads API call failed: {}", e);
            Err(SourceError::Upstream(e))
        }
    }
}

/// Data source selector shared by the HTTP handlers
pub struct DataSourceSelector {
    api: Arc<dyn AdsApi>,
    policy: SelectionPolicy,
}

impl DataSourceSelector {
    pub fn new(api: Arc<dyn AdsApi>, policy: SelectionPolicy) -> Self {
        Self { api, policy }
    }

    /// Build a selector backed by the Google Ads REST client
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = parse_duration(&config.server.request_timeout)
            .context("Invalid server.requestTimeout")?;
        let client = GoogleAdsRestClient::new(&config.google_ads, timeout)
            .context("Failed to create Google Ads client")?;

        let policy = SelectionPolicy::from_config(config);
        if policy.credentials_complete {
            tracing::info!("Google Ads API credentials found");
        } else {
            let missing: Vec<&str> = config
                .google_ads
                .credentials
                .missing()
                .iter()
                .map(|f| f.env_var())
                .collect();
            tracing::warn!(
                "Missing Google Ads API credentials ({}), using mock data",
                missing.join(", ")
            );
        }

        Ok(Self::new(Arc::new(client), policy))
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Source a request starts from: real when the API would be attempted
    pub fn active_source(&self) -> DataSourceKind {
        if self.policy.attempts_real() {
            DataSourceKind::Real
        } else {
            DataSourceKind::Mock
        }
    }

    pub fn client_type(&self) -> &'static str {
        self.api.client_type()
    }

    /// Account performance for `range`
    pub async fn performance(
        &self,
        range: &DateRange,
    ) -> Result<Envelope<PerformanceReport>, SourceError> {
        select(
            &self.policy,
            || self.api.performance(range),
            |reason| mock::performance(&reason.note()),
        )
        .await
    }

    /// Campaign table for `range`
    ///
    /// An empty real result is replaced by the mock table when fallback is allowed.
    pub async fn campaigns(
        &self,
        range: &DateRange,
    ) -> Result<Envelope<Vec<CampaignRow>>, SourceError> {
        let envelope = select(
            &self.policy,
            || self.api.campaigns(range),
            |reason| mock::campaigns(&reason.note()),
        )
        .await?;

        match envelope {
            Envelope::Real(rows) if rows.is_empty() && self.policy.allow_mock_data => {
                tracing::warn!("No campaign data found for {}, using mock data", range);
                Ok(Envelope::Mock(mock::campaigns(&MockReason::NoCampaigns.note())))
            }
            other => Ok(other),
        }
    }
}
