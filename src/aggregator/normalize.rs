//! Coerces raw backend payloads into the canonical report model.
//!
//! This is the only place that knows the backend may omit fields, rename
//! them, or disagree with itself about rates.

use phishreport_types::wire::{
    CampaignClicksPayload, CampaignPayload, CollaboratorPayload, DashboardPayload,
    DepartmentStatPayload, RecentCampaignPayload, SummaryPayload,
};
use phishreport_types::{
    CampaignClickDetail, CampaignId, CampaignRef, CampaignStatus, ClickRecord, Collaborator,
    DepartmentStat, RecentCampaign, ReportKind, ReportSnapshot, ReportSummary, click_rate,
};

pub const NO_DEPARTMENT: &str = "No department";
pub const UNKNOWN: &str = "Unknown";

/// Backend rates further than this from the recomputed value are logged.
const RATE_TOLERANCE: f64 = 0.05;

fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn name_or(value: Option<String>, fallback: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn status(value: Option<String>) -> CampaignStatus {
    CampaignStatus::parse(value.as_deref().unwrap_or(""))
}

pub fn department(payload: DepartmentStatPayload) -> DepartmentStat {
    let stat = DepartmentStat::new(
        name_or(payload.department, NO_DEPARTMENT),
        payload.sends.unwrap_or(0),
        payload.clicks.unwrap_or(0),
    );
    if let Some(reported) = payload.rate
        && (reported - stat.rate).abs() > RATE_TOLERANCE
    {
        log::warn!(
            "Department '{}': backend rate {:.2} disagrees with {}/{} ({:.2}); using recomputed value",
            stat.department,
            reported,
            stat.clicks,
            stat.sends,
            stat.rate
        );
    }
    stat
}

/// The organisation-wide click rate.
///
/// Preference order: the backend's department click rate, its overall click
/// rate, the department totals, the personal email counters, then zero.
pub fn overall_click_rate(summary: &SummaryPayload, departments: &[DepartmentStat]) -> f64 {
    if let Some(rate) = summary
        .department_click_rate
        .or(summary.click_rate)
        .filter(|r| r.is_finite())
    {
        return clamp_percent(rate);
    }

    let sends: u64 = departments.iter().map(|d| d.sends).sum();
    if sends > 0 {
        let clicks: u64 = departments.iter().map(|d| d.clicks).sum();
        return click_rate(clicks, sends);
    }

    match (summary.emails_clicked, summary.emails_received) {
        (Some(clicked), Some(received)) if received > 0 => click_rate(clicked, received),
        _ => 0.0,
    }
}

fn summary(
    payload: SummaryPayload,
    departments: &[DepartmentStat],
    campaigns: &[CampaignRef],
) -> ReportSummary {
    let click_rate = overall_click_rate(&payload, departments);
    ReportSummary {
        total_campaigns: payload.total_campaigns.unwrap_or(campaigns.len() as u64),
        active_campaigns: payload
            .active_campaigns
            .unwrap_or_else(|| campaigns.iter().filter(|c| c.status.is_active()).count() as u64),
        total_users: payload.total_users.unwrap_or(0),
        total_departments: payload
            .total_departments
            .unwrap_or(departments.len() as u64),
        emails_received: payload
            .emails_received
            .unwrap_or_else(|| departments.iter().map(|d| d.sends).sum()),
        emails_clicked: payload
            .emails_clicked
            .unwrap_or_else(|| departments.iter().map(|d| d.clicks).sum()),
        click_rate,
        report_rate: clamp_percent(payload.report_rate.unwrap_or(0.0)),
    }
}

pub fn recent_campaign(payload: RecentCampaignPayload) -> RecentCampaign {
    RecentCampaign {
        id: CampaignId::new(payload.id),
        name: name_or(payload.name, UNKNOWN),
        status: status(payload.status),
        target_user_count: payload.users.unwrap_or(0),
        click_count: payload.clicks.unwrap_or(0),
        start_date: payload.start_date,
    }
}

pub fn collaborator(payload: CollaboratorPayload) -> Collaborator {
    Collaborator {
        full_name: name_or(payload.full_name, UNKNOWN),
        email: payload.email.unwrap_or_default().trim().to_string(),
        sends_count: payload.sends.unwrap_or(0),
        clicks_count: payload.clicks.unwrap_or(0),
        campaign_names: payload
            .campaigns
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect(),
    }
}

pub fn campaign(payload: CampaignPayload) -> CampaignRef {
    CampaignRef {
        id: CampaignId::new(payload.id),
        name: name_or(payload.name, UNKNOWN),
        status: status(payload.status),
        start_date: payload.start_date,
    }
}

fn campaign_from_recent(recent: &RecentCampaign) -> CampaignRef {
    CampaignRef {
        id: recent.id,
        name: recent.name.clone(),
        status: recent.status.clone(),
        start_date: recent.start_date,
    }
}

/// Builds the snapshot for `kind`.
///
/// `campaigns` is the campaign list when it could be fetched; otherwise the
/// recent campaigns stand in for it.
pub fn snapshot(
    kind: ReportKind,
    dashboard: DashboardPayload,
    campaigns: Option<Vec<CampaignPayload>>,
) -> ReportSnapshot {
    let department_stats: Vec<DepartmentStat> = dashboard
        .department_stats
        .unwrap_or_default()
        .into_iter()
        .map(department)
        .collect();
    let recent_campaigns: Vec<RecentCampaign> = dashboard
        .recent_campaigns
        .unwrap_or_default()
        .into_iter()
        .map(recent_campaign)
        .collect();
    let collaborators = if kind.includes_collaborators() {
        dashboard
            .collaborators
            .unwrap_or_default()
            .into_iter()
            .map(collaborator)
            .collect()
    } else {
        Vec::new()
    };

    let campaigns: Vec<CampaignRef> = match campaigns {
        Some(list) => list.into_iter().map(campaign).collect(),
        None => recent_campaigns.iter().map(campaign_from_recent).collect(),
    };

    let summary = summary(
        dashboard.summary.unwrap_or_default(),
        &department_stats,
        &campaigns,
    );

    ReportSnapshot {
        kind,
        summary,
        department_stats,
        recent_campaigns,
        collaborators,
        campaigns,
    }
}

/// Click details for `campaign`, filling gaps from the campaign itself.
pub fn click_detail(campaign: &CampaignRef, payload: CampaignClicksPayload) -> CampaignClickDetail {
    let clicks: Vec<ClickRecord> = payload
        .clicks
        .into_iter()
        .map(|c| ClickRecord {
            full_name: name_or(c.full_name, UNKNOWN),
            email: c.email.unwrap_or_default().trim().to_string(),
            clicked_at: c.clicked_at,
            ip_address: c.ip_address.filter(|ip| !ip.trim().is_empty()),
        })
        .collect();

    CampaignClickDetail {
        campaign_id: campaign.id,
        campaign_name: payload
            .campaign_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| campaign.name.clone()),
        total_sends: payload.total_sends.unwrap_or(0),
        total_clicks: payload.total_clicks.unwrap_or(clicks.len() as u64),
        clicks,
    }
}
