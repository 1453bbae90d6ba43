//! Turns snapshot data into card and table descriptions.

use phishreport_render_core::format::{format_count, format_date, format_datetime, format_percent, or_dash};
use phishreport_render_core::{CardSpec, ColumnSpec, SectionSpec};
use phishreport_types::{
    CampaignClickDetail, Collaborator, Color, DepartmentStat, RecentCampaign, ReportKind,
    ReportSummary,
};

pub fn summary_cards(kind: ReportKind, summary: &ReportSummary) -> Vec<CardSpec> {
    match kind {
        ReportKind::Personal => vec![
            CardSpec::new("Emails received", format_count(summary.emails_received), Color::NAVY),
            CardSpec::new("Emails clicked", format_count(summary.emails_clicked), Color::AMBER),
            CardSpec::new("Click rate", format_percent(summary.click_rate), Color::RED),
            CardSpec::new("Security score", format_percent(summary.security_rate()), Color::GREEN),
        ],
        ReportKind::Executive | ReportKind::Detailed => vec![
            CardSpec::new("Total campaigns", format_count(summary.total_campaigns), Color::NAVY),
            CardSpec::new("Active campaigns", format_count(summary.active_campaigns), Color::GREEN),
            CardSpec::new("Total users", format_count(summary.total_users), Color::BLUE),
            CardSpec::new("Click rate", format_percent(summary.click_rate), Color::RED),
            CardSpec::new("Security rate", format_percent(summary.security_rate()), Color::GREEN),
            CardSpec::new("Report rate", format_percent(summary.report_rate), Color::BLUE),
        ],
    }
}

pub fn departments(stats: &[DepartmentStat]) -> SectionSpec {
    SectionSpec::new(
        "Click rate by department",
        vec![
            ColumnSpec::text("Department", 3.0),
            ColumnSpec::numeric("Emails sent", 1.2),
            ColumnSpec::numeric("Clicks", 1.0),
            ColumnSpec::numeric("Click rate", 1.2),
        ],
    )
    .with_rows(
        stats
            .iter()
            .map(|d| {
                vec![
                    d.department.clone(),
                    format_count(d.sends),
                    format_count(d.clicks),
                    format_percent(d.rate),
                ]
            })
            .collect(),
    )
}

pub fn recent_campaigns(campaigns: &[RecentCampaign]) -> SectionSpec {
    SectionSpec::new(
        "Recent campaigns",
        vec![
            ColumnSpec::text("Campaign", 3.0),
            ColumnSpec::status("Status", 1.3),
            ColumnSpec::centered("Start date", 1.3),
            ColumnSpec::numeric("Targets", 1.0),
            ColumnSpec::numeric("Clicks", 1.0),
        ],
    )
    .with_status_column(1)
    .with_rows(
        campaigns
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.status.label().to_string(),
                    format_date(c.start_date),
                    format_count(c.target_user_count),
                    format_count(c.click_count),
                ]
            })
            .collect(),
    )
}

pub fn collaborators(collaborators: &[Collaborator]) -> SectionSpec {
    SectionSpec::new(
        "Collaborators",
        vec![
            ColumnSpec::text("Name", 2.2),
            ColumnSpec::text("Email", 2.8),
            ColumnSpec::numeric("Received", 1.0),
            ColumnSpec::numeric("Clicks", 0.9),
            ColumnSpec::text("Campaigns", 2.4),
        ],
    )
    .with_rows(
        collaborators
            .iter()
            .map(|c| {
                vec![
                    c.full_name.clone(),
                    or_dash(&c.email),
                    format_count(c.sends_count),
                    format_count(c.clicks_count),
                    or_dash(&c.campaign_names.join(", ")),
                ]
            })
            .collect(),
    )
}

pub fn click_detail(detail: &CampaignClickDetail) -> SectionSpec {
    SectionSpec::new(
        format!(
            "Clicks: {} ({} of {}, {})",
            detail.campaign_name,
            format_count(detail.total_clicks),
            format_count(detail.total_sends),
            format_percent(detail.click_rate())
        ),
        vec![
            ColumnSpec::text("Name", 2.2),
            ColumnSpec::text("Email", 2.8),
            ColumnSpec::centered("Clicked at", 1.8),
            ColumnSpec::text("IP address", 1.6),
        ],
    )
    .with_empty_message("No clicks recorded")
    .with_rows(
        detail
            .clicks
            .iter()
            .map(|c| {
                vec![
                    c.full_name.clone(),
                    or_dash(&c.email),
                    format_datetime(c.clicked_at),
                    or_dash(c.ip_address.as_deref().unwrap_or("")),
                ]
            })
            .collect(),
    )
}
