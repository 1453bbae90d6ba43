//! Raw backend payloads.
//!
//! Different backend revisions expose different field sets, so every field
//! here is optional and dates are parsed leniently. Nothing outside the
//! aggregator's normalization step should consume these types.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// `GET /metrics/dashboard`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardPayload {
    #[serde(default)]
    pub summary: Option<SummaryPayload>,
    #[serde(default)]
    pub department_stats: Option<Vec<DepartmentStatPayload>>,
    #[serde(default)]
    pub recent_campaigns: Option<Vec<RecentCampaignPayload>>,
    #[serde(default)]
    pub collaborators: Option<Vec<CollaboratorPayload>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryPayload {
    pub total_campaigns: Option<u64>,
    pub active_campaigns: Option<u64>,
    pub total_users: Option<u64>,
    pub total_departments: Option<u64>,
    pub emails_received: Option<u64>,
    pub emails_clicked: Option<u64>,
    pub click_rate: Option<f64>,
    pub report_rate: Option<f64>,
    /// Only sent by backends that compute the department-wide rate themselves.
    pub department_click_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentStatPayload {
    #[serde(alias = "name")]
    pub department: Option<String>,
    pub sends: Option<u64>,
    pub clicks: Option<u64>,
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentCampaignPayload {
    pub id: i64,
    pub name: Option<String>,
    pub status: Option<String>,
    #[serde(alias = "target_user_count")]
    pub users: Option<u64>,
    #[serde(alias = "click_count")]
    pub clicks: Option<u64>,
    pub reports: Option<u64>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub start_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollaboratorPayload {
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "sends_count")]
    pub sends: Option<u64>,
    #[serde(alias = "clicks_count")]
    pub clicks: Option<u64>,
    #[serde(default, alias = "campaign_names")]
    pub campaigns: Vec<String>,
}

/// An element of `GET /campaigns`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignPayload {
    pub id: i64,
    pub name: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub start_date: Option<NaiveDateTime>,
}

/// `GET /metrics/campaigns/{id}/clicks`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignClicksPayload {
    pub campaign_id: i64,
    pub campaign_name: Option<String>,
    pub total_sends: Option<u64>,
    pub total_clicks: Option<u64>,
    #[serde(default)]
    pub clicks: Vec<ClickPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClickPayload {
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub clicked_at: Option<NaiveDateTime>,
    pub ip_address: Option<String>,
}

/// Parses the timestamp spellings seen across backend revisions.
///
/// Offsets are dropped after converting to the wall time they were written in.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let parsed = parse_timestamp(&s);
        if parsed.is_none() {
            log::warn!("Ignoring unparseable timestamp '{}'", s);
        }
        parsed
    }))
}
