use async_trait::async_trait;
use phishreport_traits::{MetricsSource, SourceError};
use phishreport_types::CampaignId;
use phishreport_types::wire::{CampaignClicksPayload, CampaignPayload, DashboardPayload};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A [`MetricsSource`] serving canned payloads.
///
/// Every endpoint counts its calls so tests can assert how many requests an
/// export issued. Endpoints without a payload fail with HTTP 503.
#[derive(Debug, Default)]
pub struct InMemoryMetricsSource {
    dashboard: Option<DashboardPayload>,
    campaigns: Option<Vec<CampaignPayload>>,
    clicks: HashMap<CampaignId, CampaignClicksPayload>,
    dashboard_calls: AtomicUsize,
    campaign_calls: AtomicUsize,
    click_calls: AtomicUsize,
}

impl InMemoryMetricsSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dashboard(mut self, dashboard: DashboardPayload) -> Self {
        self.dashboard = Some(dashboard);
        self
    }

    pub fn with_campaigns(mut self, campaigns: Vec<CampaignPayload>) -> Self {
        self.campaigns = Some(campaigns);
        self
    }

    pub fn with_clicks(mut self, detail: CampaignClicksPayload) -> Self {
        self.clicks.insert(CampaignId::new(detail.campaign_id), detail);
        self
    }

    pub fn dashboard_calls(&self) -> usize {
        self.dashboard_calls.load(Ordering::SeqCst)
    }

    pub fn campaign_calls(&self) -> usize {
        self.campaign_calls.load(Ordering::SeqCst)
    }

    /// Number of `campaign_clicks` requests served so far, including failed ones.
    pub fn click_calls(&self) -> usize {
        self.click_calls.load(Ordering::SeqCst)
    }

    fn unavailable(endpoint: String) -> SourceError {
        SourceError::Status {
            endpoint,
            status: 503,
        }
    }
}

#[async_trait]
impl MetricsSource for InMemoryMetricsSource {
    async fn dashboard(&self) -> Result<DashboardPayload, SourceError> {
        self.dashboard_calls.fetch_add(1, Ordering::SeqCst);
        self.dashboard
            .clone()
            .ok_or_else(|| Self::unavailable("/metrics/dashboard".to_string()))
    }

    async fn campaigns(&self) -> Result<Vec<CampaignPayload>, SourceError> {
        self.campaign_calls.fetch_add(1, Ordering::SeqCst);
        self.campaigns
            .clone()
            .ok_or_else(|| Self::unavailable("/campaigns".to_string()))
    }

    async fn campaign_clicks(&self, id: CampaignId) -> Result<CampaignClicksPayload, SourceError> {
        self.click_calls.fetch_add(1, Ordering::SeqCst);
        self.clicks
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::unavailable(format!("/metrics/campaigns/{}/clicks", id)))
    }

    fn name(&self) -> &'static str {
        "InMemoryMetricsSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_payloads_fail_and_are_counted() {
        let source = InMemoryMetricsSource::new();
        assert!(source.dashboard().await.is_err());
        assert!(source.campaign_clicks(CampaignId::new(1)).await.is_err());
        assert_eq!(source.dashboard_calls(), 1);
        assert_eq!(source.click_calls(), 1);
        assert_eq!(source.campaign_calls(), 0);
    }

    #[tokio::test]
    async fn test_serves_registered_clicks() {
        let source = InMemoryMetricsSource::new().with_clicks(CampaignClicksPayload {
            campaign_id: 4,
            campaign_name: Some("Gift card".into()),
            ..Default::default()
        });
        let detail = source.campaign_clicks(CampaignId::new(4)).await.unwrap();
        assert_eq!(detail.campaign_name.as_deref(), Some("Gift card"));
    }
}
