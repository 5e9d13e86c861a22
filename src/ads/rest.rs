//! Google Ads REST API client
//!
//! Exchanges the refresh token for an access token, then runs GAQL queries
//! against the `googleAds:search` endpoint. Row values are decoded leniently:
//! the API omits zero-valued fields and encodes int64 values as strings.

use super::client::AdsApi;
use super::metrics::{
    build_campaign_rows, build_performance_report, CampaignMetrics, CampaignRow, MetricTotals,
    PerformanceReport, MICROS_PER_UNIT,
};
use super::{AdsError, DateRange};
use crate::config::GoogleAdsConfig;
use crate::credentials::CredentialSet;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Upper bound on result pages fetched for one query
const MAX_PAGES: usize = 100;

const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Google Ads REST client
pub struct GoogleAdsRestClient {
    http: reqwest::Client,
    credentials: CredentialSet,
    api_version: String,
    api_base_url: String,
    token_url: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchPage {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl GoogleAdsRestClient {
    /// Create a new client
    ///
    /// Construction never touches the network, so it succeeds with incomplete
    /// credentials; calls then fail with [`AdsError::IncompleteCredentials`].
    pub fn new(config: &GoogleAdsConfig, timeout: Duration) -> Result<Self, AdsError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        tracing::debug!(
            "Created Google Ads REST client: {} (api {})",
            config.api_base_url,
            config.api_version
        );

        Ok(Self {
            http,
            credentials: config.credentials.clone(),
            api_version: config.api_version.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token_url: config.token_url.clone(),
        })
    }

    fn ensure_credentials(&self) -> Result<(), AdsError> {
        let missing = self.credentials.missing();
        if missing.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = missing.iter().map(|f| f.env_var()).collect();
        Err(AdsError::IncompleteCredentials(names.join(", ")))
    }

    fn search_url(&self) -> String {
        format!(
            "{}/{}/customers/{}/googleAds:search",
            self.api_base_url,
            self.api_version,
            self.credentials.customer_id()
        )
    }

    /// Exchange the refresh token for a short-lived access token
    async fn access_token(&self) -> Result<String, AdsError> {
        tracing::debug!("Refreshing Google Ads access token");

        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", self.credentials.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let resp = self.http.post(&self.token_url).form(&params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AdsError::TokenRefresh(format!(
                "{} {}",
                status,
                truncate(body.trim())
            )));
        }

        let token: TokenResponse = resp.json().await?;
        Ok(token.access_token)
    }

    /// Run a GAQL query, following result pages
    async fn search(&self, access_token: &str, query: &str) -> Result<Vec<Value>, AdsError> {
        let url = self.search_url();
        let customer_id = self.credentials.customer_id();
        let mut rows = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let mut body = json!({ "query": query });
            if let Some(token) = &page_token {
                body["pageToken"] = json!(token);
            }

            tracing::debug!("Querying Google Ads: {}", url);

            let resp = self
                .http
                .post(&url)
                .bearer_auth(access_token)
                .header("developer-token", &self.credentials.developer_token)
                .header("login-customer-id", &customer_id)
                .json(&body)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(AdsError::Api {
                    status: status.as_u16(),
                    message: api_error_message(&body),
                });
            }

            let page: SearchPage = resp.json().await?;
            rows.extend(page.results);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => return Ok(rows),
            }
        }

        tracing::warn!("Stopped after {} result pages for query", MAX_PAGES);
        Ok(rows)
    }

    async fn period_totals(
        &self,
        access_token: &str,
        range: &DateRange,
    ) -> Result<MetricTotals, AdsError> {
        let rows = self.search(access_token, &performance_query(range)).await?;
        let decoded: Vec<MetricTotals> = rows.iter().map(decode_totals).collect();
        Ok(decoded.iter().collect())
    }
}

#[async_trait]
impl AdsApi for GoogleAdsRestClient {
    async fn performance(&self, range: &DateRange) -> Result<PerformanceReport, AdsError> {
        self.ensure_credentials()?;
        let token = self.access_token().await?;

        let current = self.period_totals(&token, range).await?;
        let previous = match range.previous_period() {
            Some(previous) => self.period_totals(&token, &previous).await?,
            None => MetricTotals::default(),
        };

        tracing::debug!(
            "Fetched performance for {}: {} impressions, {} clicks",
            range,
            current.impressions,
            current.clicks
        );

        Ok(build_performance_report(&current, &previous))
    }

    async fn campaigns(&self, range: &DateRange) -> Result<Vec<CampaignRow>, AdsError> {
        self.ensure_credentials()?;
        let token = self.access_token().await?;

        let rows = self.search(&token, &campaign_query(range)).await?;
        let campaigns: Vec<CampaignMetrics> = rows.iter().filter_map(decode_campaign).collect();

        tracing::debug!("Fetched {} campaign row(s) for {}", campaigns.len(), range);

        Ok(build_campaign_rows(campaigns))
    }

    fn client_type(&self) -> &'static str {
        "google_ads_rest"
    }
}

fn performance_query(range: &DateRange) -> String {
    format!(
        "SELECT metrics.impressions, metrics.clicks, metrics.cost_micros, metrics.conversions \
         FROM customer WHERE {}",
        range.gaql_filter()
    )
}

fn campaign_query(range: &DateRange) -> String {
    format!(
        "SELECT campaign.id, campaign.name, campaign.status, campaign_budget.amount_micros, \
         metrics.impressions, metrics.clicks, metrics.cost_micros, metrics.conversions, \
         metrics.ctr, metrics.conversions_from_interactions_rate, metrics.cost_per_conversion \
         FROM campaign WHERE {} ORDER BY metrics.cost_micros DESC",
        range.gaql_filter()
    )
}

fn decode_totals(row: &Value) -> MetricTotals {
    let metrics = &row["metrics"];
    MetricTotals {
        impressions: int64(&metrics["impressions"]),
        clicks: int64(&metrics["clicks"]),
        cost_micros: int64(&metrics["costMicros"]),
        conversions: double(&metrics["conversions"]),
    }
}

/// Decode a campaign row; rows without a campaign id are skipped
fn decode_campaign(row: &Value) -> Option<CampaignMetrics> {
    let campaign = &row["campaign"];
    let id = match &campaign["id"] {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };

    let totals = decode_totals(row);
    let metrics = &row["metrics"];

    Some(CampaignMetrics {
        id,
        name: campaign["name"].as_str().unwrap_or_default().to_string(),
        status: campaign["status"].as_str().unwrap_or("UNKNOWN").to_string(),
        budget_micros: int64(&row["campaignBudget"]["amountMicros"]),
        impressions: totals.impressions,
        clicks: totals.clicks,
        cost_micros: totals.cost_micros,
        conversions: totals.conversions,
        // The API reports rates as fractions and cost per conversion in micros
        ctr: double(&metrics["ctr"]) * 100.0,
        conversion_rate: double(&metrics["conversionsFromInteractionsRate"]) * 100.0,
        cost_per_conversion: double(&metrics["costPerConversion"]) / MICROS_PER_UNIT,
    })
}

fn int64(value: &Value) -> u64 {
    match value {
        Value::String(s) => s.parse().unwrap_or(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0),
        _ => 0,
    }
}

fn double(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Pull `error.message` out of a Google API error body, falling back to the raw text
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| truncate(body.trim()))
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_ERROR_MESSAGE_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap()
    }

    fn config() -> GoogleAdsConfig {
        let mut config = GoogleAdsConfig::default();
        config.credentials = CredentialSet {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            developer_token: "dev".to_string(),
            login_customer_id: "123-456-7890".to_string(),
            refresh_token: "refresh".to_string(),
        };
        config.api_base_url = "https://ads.example.test/".to_string();
        config
    }

    #[test]
    fn test_search_url() {
        let client = GoogleAdsRestClient::new(&config(), Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.search_url(),
            "https://ads.example.test/v17/customers/1234567890/googleAds:search"
        );
    }

    #[test]
    fn test_queries_include_date_filter() {
        assert!(performance_query(&range()).contains("BETWEEN '2024-01-01' AND '2024-01-31'"));
        let campaigns = campaign_query(&range());
        assert!(campaigns.contains("FROM campaign"));
        assert!(campaigns.ends_with("ORDER BY metrics.cost_micros DESC"));
    }

    #[test]
    fn test_decode_totals_handles_string_int64_and_missing_fields() {
        let row = json!({
            "metrics": {
                "impressions": "1200",
                "clicks": "30",
                "conversions": 2.5
            }
        });
        let totals = decode_totals(&row);
        assert_eq!(totals.impressions, 1200);
        assert_eq!(totals.clicks, 30);
        assert_eq!(totals.cost_micros, 0);
        assert_eq!(totals.conversions, 2.5);
    }

    #[test]
    fn test_decode_campaign() {
        let row = json!({
            "campaign": { "id": "42", "name": "Spring", "status": "PAUSED" },
            "campaignBudget": { "amountMicros": "1500000000" },
            "metrics": {
                "impressions": "1000",
                "clicks": "50",
                "costMicros": "25000000",
                "conversions": 5.0,
                "ctr": 0.05,
                "conversionsFromInteractionsRate": 0.1,
                "costPerConversion": 5000000.0
            }
        });

        let campaign = decode_campaign(&row).unwrap();
        assert_eq!(campaign.id, "42");
        assert_eq!(campaign.status, "PAUSED");
        assert_eq!(campaign.budget_micros, 1_500_000_000);
        assert_eq!(campaign.ctr, 5.0);
        assert_eq!(campaign.cost_per_conversion, 5.0);

        assert!(decode_campaign(&json!({ "metrics": {} })).is_none());
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error": {"code": 401, "message": "Request had invalid authentication credentials."}}"#;
        assert_eq!(
            api_error_message(body),
            "Request had invalid authentication credentials."
        );
        assert_eq!(api_error_message("  gateway timeout "), "gateway timeout");
    }

    #[tokio::test]
    async fn test_incomplete_credentials_fail_without_request() {
        let mut config = config();
        config.credentials.refresh_token.clear();
        // Unroutable endpoints: any request attempt would surface as AdsError::Http
        config.token_url = "http://127.0.0.1:9/token".to_string();

        let client = GoogleAdsRestClient::new(&config, Duration::from_secs(1)).unwrap();
        let err = client.performance(&range()).await.unwrap_err();

        match err {
            AdsError::IncompleteCredentials(missing) => {
                assert_eq!(missing, "GOOGLE_ADS_REFRESH_TOKEN")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
