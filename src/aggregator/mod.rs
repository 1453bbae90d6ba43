//! Fetching and normalizing report data.

pub mod normalize;

use crate::error::ExportError;
use futures::stream::{self, StreamExt};
use phishreport_traits::MetricsSource;
use phishreport_types::{CampaignClickDetail, CampaignRef, ReportKind, ReportSnapshot};

/// Builds a [`ReportSnapshot`] from a [`MetricsSource`].
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    source: &'a dyn MetricsSource,
    kind: ReportKind,
}

impl<'a> Aggregator<'a> {
    pub fn new(source: &'a dyn MetricsSource, kind: ReportKind) -> Self {
        Self { source, kind }
    }

    /// Fetches the dashboard and the campaign list and normalizes them.
    ///
    /// Only a failed dashboard fetch is an error; a failed campaign list is
    /// logged and replaced by the dashboard's recent campaigns.
    pub async fn aggregate(&self) -> Result<ReportSnapshot, ExportError> {
        log::info!(
            "Aggregating {} report data from {}",
            self.kind,
            self.source.name()
        );
        let (dashboard, campaigns) =
            futures::join!(self.source.dashboard(), self.source.campaigns());

        let dashboard = dashboard.map_err(|e| {
            log::error!("Dashboard metrics unavailable: {}", e);
            ExportError::DataUnavailable(e)
        })?;

        let campaigns = match campaigns {
            Ok(list) => Some(list),
            Err(e) => {
                log::warn!(
                    "Campaign list unavailable ({}), using recent campaigns instead: {}",
                    if e.is_transient() { "transient" } else { "permanent" },
                    e
                );
                None
            }
        };

        let snapshot = normalize::snapshot(self.kind, dashboard, campaigns);
        log::debug!(
            "Snapshot: {} departments, {} recent campaigns, {} collaborators, {} campaigns",
            snapshot.department_stats.len(),
            snapshot.recent_campaigns.len(),
            snapshot.collaborators.len(),
            snapshot.campaigns.len()
        );
        Ok(snapshot)
    }
}

/// Fetches click details for `campaigns`, at most `max_concurrent` at a time.
///
/// Results keep the order of `campaigns`. A campaign whose fetch fails is
/// logged and left out.
pub async fn fetch_click_details(
    source: &dyn MetricsSource,
    campaigns: &[&CampaignRef],
    max_concurrent: usize,
) -> Vec<CampaignClickDetail> {
    if campaigns.is_empty() {
        return Vec::new();
    }
    log::debug!(
        "Fetching click details for {} campaign(s), {} at a time",
        campaigns.len(),
        max_concurrent.max(1)
    );

    stream::iter(campaigns.iter().copied())
        .map(|campaign| async move { (campaign, source.campaign_clicks(campaign.id).await) })
        .buffered(max_concurrent.max(1))
        .filter_map(|(campaign, result)| async move {
            match result {
                Ok(payload) => Some(normalize::click_detail(campaign, payload)),
                Err(e) => {
                    log::warn!(
                        "Skipping click details for campaign {} ('{}'): {}",
                        campaign.id,
                        campaign.name,
                        e
                    );
                    None
                }
            }
        })
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishreport_source::InMemoryMetricsSource;
    use phishreport_types::CampaignStatus;
    use phishreport_types::wire::{
        CampaignClicksPayload, CampaignPayload, DashboardPayload, DepartmentStatPayload,
    };

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn campaign(id: i64) -> CampaignRef {
        CampaignRef {
            id: id.into(),
            name: format!("Campaign {}", id),
            status: CampaignStatus::Active,
            start_date: None,
        }
    }

    #[tokio::test]
    async fn test_dashboard_failure_is_data_unavailable() {
        init_logger();
        let source = InMemoryMetricsSource::new();
        let err = Aggregator::new(&source, ReportKind::Executive)
            .aggregate()
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::DataUnavailable(_)));
        assert_eq!(err.to_string().split(':').next(), Some("failed to load data"));
    }

    #[tokio::test]
    async fn test_campaign_list_failure_is_tolerated() {
        init_logger();
        let source = InMemoryMetricsSource::new().with_dashboard(DashboardPayload {
            department_stats: Some(vec![DepartmentStatPayload {
                department: Some("TI".into()),
                sends: Some(10),
                clicks: Some(1),
                rate: None,
            }]),
            ..Default::default()
        });
        let snapshot = Aggregator::new(&source, ReportKind::Executive)
            .aggregate()
            .await
            .unwrap();
        assert_eq!(snapshot.department_stats.len(), 1);
        assert_eq!(source.campaign_calls(), 1);
    }

    #[tokio::test]
    async fn test_campaign_list_is_used_when_available() {
        let source = InMemoryMetricsSource::new()
            .with_dashboard(DashboardPayload::default())
            .with_campaigns(vec![CampaignPayload {
                id: 4,
                name: Some("Password reset".into()),
                status: Some("active".into()),
                start_date: None,
            }]);
        let snapshot = Aggregator::new(&source, ReportKind::Detailed)
            .aggregate()
            .await
            .unwrap();
        assert_eq!(snapshot.active_campaigns().len(), 1);
    }

    #[tokio::test]
    async fn test_click_details_keep_order_and_skip_failures() {
        init_logger();
        let source = InMemoryMetricsSource::new()
            .with_clicks(CampaignClicksPayload {
                campaign_id: 1,
                ..Default::default()
            })
            .with_clicks(CampaignClicksPayload {
                campaign_id: 3,
                ..Default::default()
            });
        let campaigns = [campaign(1), campaign(2), campaign(3)];
        let refs: Vec<&CampaignRef> = campaigns.iter().collect();

        let details = fetch_click_details(&source, &refs, 2).await;
        let ids: Vec<i64> = details.iter().map(|d| d.campaign_id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(source.click_calls(), 3);
    }

    #[tokio::test]
    async fn test_no_campaigns_means_no_fetches() {
        let source = InMemoryMetricsSource::new();
        assert!(fetch_click_details(&source, &[], 4).await.is_empty());
        assert_eq!(source.click_calls(), 0);
    }
}
