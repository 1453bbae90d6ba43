//! MetricsSource trait for abstracting the reporting backend.
//!
//! Implementations return the raw wire payloads; normalization into the
//! report model happens once, in the aggregator.

use async_trait::async_trait;
use phishreport_types::CampaignId;
use phishreport_types::wire::{CampaignClicksPayload, CampaignPayload, DashboardPayload};
use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("Request to '{endpoint}' failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("'{endpoint}' responded with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Could not decode response from '{endpoint}': {message}")]
    Decode { endpoint: String, message: String },

    #[error("Invalid backend configuration: {0}")]
    Config(String),
}

impl SourceError {
    /// True when retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Transport { .. } => true,
            SourceError::Status { status, .. } => *status >= 500 || *status == 429,
            SourceError::Decode { .. } | SourceError::Config(_) => false,
        }
    }
}

/// The backend endpoints a report is assembled from.
#[async_trait]
pub trait MetricsSource: Send + Sync + Debug {
    /// `GET /metrics/dashboard`
    async fn dashboard(&self) -> Result<DashboardPayload, SourceError>;

    /// `GET /campaigns`
    async fn campaigns(&self) -> Result<Vec<CampaignPayload>, SourceError>;

    /// `GET /metrics/campaigns/{id}/clicks`
    async fn campaign_clicks(&self, id: CampaignId) -> Result<CampaignClicksPayload, SourceError>;

    /// Returns a human-readable name for this source (for logging/debugging).
    fn name(&self) -> &'static str;
}
