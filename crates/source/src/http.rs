use async_trait::async_trait;
use phishreport_traits::{MetricsSource, SourceError};
use phishreport_types::CampaignId;
use phishreport_types::wire::{CampaignClicksPayload, CampaignPayload, DashboardPayload};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Rows requested per `/campaigns` page; the backend's own default limit.
pub const CAMPAIGN_PAGE_SIZE: usize = 100;

/// Stops paging a backend that ignores `skip` and keeps returning full pages.
const MAX_CAMPAIGN_PAGES: usize = 1000;

/// A [`MetricsSource`] backed by the platform's REST API.
#[derive(Debug, Clone)]
pub struct HttpMetricsSource {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpMetricsSource {
    /// Creates a source with its own HTTP client.
    ///
    /// `timeout` bounds every request; it is the only cancellation an export has.
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Config(e.to_string()))?;
        Ok(Self::with_client(client, base_url, token))
    }

    /// Creates a source around an existing client (shared connection pool).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL, dropping any trailing slash the backend would redirect.
    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        let path = path.strip_suffix('/').unwrap_or(path);
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = self.url(path);
        log::debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| SourceError::Transport {
            endpoint: path.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        log::debug!("{} -> {}", url, status);
        if !status.is_success() {
            return Err(SourceError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| SourceError::Transport {
            endpoint: path.to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_slice(&body).map_err(|e| SourceError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsSource {
    async fn dashboard(&self) -> Result<DashboardPayload, SourceError> {
        self.get_json("/metrics/dashboard").await
    }

    /// Pages through `/campaigns` until a short page comes back.
    async fn campaigns(&self) -> Result<Vec<CampaignPayload>, SourceError> {
        let mut campaigns = Vec::new();
        for page in 0..MAX_CAMPAIGN_PAGES {
            let skip = page * CAMPAIGN_PAGE_SIZE;
            let batch: Vec<CampaignPayload> = self
                .get_json(&format!(
                    "/campaigns?skip={}&limit={}",
                    skip, CAMPAIGN_PAGE_SIZE
                ))
                .await?;
            let len = batch.len();
            campaigns.extend(batch);
            if len < CAMPAIGN_PAGE_SIZE {
                return Ok(campaigns);
            }
        }
        log::warn!(
            "Campaign list still full after {} pages, keeping the first {} campaigns",
            MAX_CAMPAIGN_PAGES,
            campaigns.len()
        );
        Ok(campaigns)
    }

    async fn campaign_clicks(&self, id: CampaignId) -> Result<CampaignClicksPayload, SourceError> {
        self.get_json(&format!("/metrics/campaigns/{}/clicks", id)).await
    }

    fn name(&self) -> &'static str {
        "HttpMetricsSource"
    }
}
