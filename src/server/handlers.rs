//! Route handlers

use super::error::ApiError;
use super::page::DASHBOARD_HTML;
use super::state::AppState;
use crate::ads::{DateRange, DateRangeError};
use crate::credentials::CredentialField;
use crate::source::{DataSourceKind, Envelope};
use axum::{
    extract::{Query, State},
    http::{HeaderName, HeaderValue},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Response header carrying the payload source ("real" or "mock")
pub const DATA_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-data-source");

pub const SERVICE_NAME: &str = "Allervie Analytics API";

/// Optional reporting window, `YYYY-MM-DD`
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateQuery {
    fn resolve(&self) -> Result<DateRange, DateRangeError> {
        DateRange::from_params(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            chrono::Local::now().date_naive(),
        )
    }
}

/// GET / and /ads-dashboard - Serves the dashboard page
pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// GET /api/google-ads/performance - Account performance summary
pub async fn performance(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Response, ApiError> {
    let range = query.resolve()?;
    let envelope = state.selector.performance(&range).await?;
    tracing::info!("Served performance data ({}) for {}", envelope.source(), range);
    Ok(envelope_response(envelope))
}

/// GET /api/google-ads/campaigns - Campaign table
pub async fn campaigns(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Response, ApiError> {
    let range = query.resolve()?;
    let envelope = state.selector.campaigns(&range).await?;
    tracing::info!("Served campaign data ({}) for {}", envelope.source(), range);
    Ok(envelope_response(envelope))
}

/// GET /api/health - Service status and active data source
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport::from_state(&state))
}

fn envelope_response<T: Serialize>(envelope: Envelope<T>) -> Response {
    let source = envelope.source();
    let mut response = Json(envelope.into_inner()).into_response();
    response
        .headers_mut()
        .insert(DATA_SOURCE_HEADER, HeaderValue::from_static(source.as_str()));
    response
}

/// Health check payload
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
    pub environment: String,
    pub version: &'static str,
    pub data_source: DataSourceKind,
    pub has_google_ads_credentials: bool,
    pub missing_credentials: Vec<&'static str>,
    pub allow_mock_data: bool,
    pub always_use_real_client: bool,
    pub google_ads_client_id: Option<String>,
    pub google_ads_customer_id: Option<String>,
}

impl HealthReport {
    pub fn from_state(state: &AppState) -> Self {
        let credentials = &state.config.google_ads.credentials;
        let policy = state.selector.policy();

        Self {
            status: "ok",
            timestamp: chrono::Utc::now().to_rfc3339(),
            service: SERVICE_NAME,
            environment: state.config.environment.clone(),
            version: env!("CARGO_PKG_VERSION"),
            data_source: state.selector.active_source(),
            has_google_ads_credentials: policy.credentials_complete,
            missing_credentials: credentials
                .missing()
                .into_iter()
                .map(CredentialField::env_var)
                .collect(),
            allow_mock_data: policy.allow_mock_data,
            always_use_real_client: policy.always_use_real_client,
            google_ads_client_id: credentials.client_id_hint(),
            google_ads_customer_id: credentials
                .is_present(CredentialField::LoginCustomerId)
                .then(|| credentials.login_customer_id.clone()),
        }
    }
}
