//! The canonical, normalized report model.
//!
//! Everything in here has already been coerced from whatever shape the
//! backend returned; rendering code can rely on the invariants documented
//! on each type.

use crate::ids::CampaignId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Percentage of `clicks` over `sends`, clamped to `[0, 100]`; `0` when nothing was sent.
pub fn click_rate(clicks: u64, sends: u64) -> f64 {
    if sends == 0 {
        return 0.0;
    }
    (clicks as f64 / sends as f64 * 100.0).clamp(0.0, 100.0)
}

/// Lifecycle state of a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CampaignStatus {
    Draft,
    Active,
    Completed,
    Paused,
    Scheduled,
    Canceled,
    /// A value outside the known vocabulary, kept verbatim.
    Other(String),
}

impl CampaignStatus {
    pub const KNOWN: [CampaignStatus; 6] = [
        CampaignStatus::Draft,
        CampaignStatus::Active,
        CampaignStatus::Completed,
        CampaignStatus::Paused,
        CampaignStatus::Scheduled,
        CampaignStatus::Canceled,
    ];

    /// Case-insensitive parse. Unknown values become [`CampaignStatus::Other`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" => Self::Draft,
            "active" => Self::Active,
            "completed" => Self::Completed,
            "paused" => Self::Paused,
            "scheduled" => Self::Scheduled,
            "canceled" | "cancelled" => Self::Canceled,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    /// The wire spelling.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Scheduled => "scheduled",
            Self::Canceled => "canceled",
            Self::Other(raw) => raw,
        }
    }

    /// Human-readable label printed in report tables.
    pub fn label(&self) -> &str {
        match self {
            Self::Draft => "Draft",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Paused => "Paused",
            Self::Scheduled => "Scheduled",
            Self::Canceled => "Canceled",
            Self::Other(raw) if raw.is_empty() => "-",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<String> for CampaignStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<CampaignStatus> for String {
    fn from(status: CampaignStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which sections a report contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReportKind {
    /// Organisation-wide overview: cards, departments, recent campaigns.
    #[default]
    Executive,
    /// Executive plus collaborators and per-campaign click details.
    Detailed,
    /// A single collaborator's own results.
    Personal,
}

impl ReportKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Executive => "Phishing Simulation Report",
            Self::Detailed => "Phishing Simulation Report - Detailed",
            Self::Personal => "My Security Report",
        }
    }

    pub fn includes_departments(self) -> bool {
        !matches!(self, Self::Personal)
    }

    pub fn includes_collaborators(self) -> bool {
        matches!(self, Self::Detailed)
    }

    pub fn includes_click_details(self) -> bool {
        matches!(self, Self::Detailed)
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "executive" => Ok(Self::Executive),
            "detailed" => Ok(Self::Detailed),
            "personal" => Ok(Self::Personal),
            other => Err(format!(
                "unknown report kind '{}': expected executive, detailed or personal",
                other
            )),
        }
    }
}

impl TryFrom<String> for ReportKind {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<ReportKind> for String {
    fn from(kind: ReportKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Executive => "executive",
            Self::Detailed => "detailed",
            Self::Personal => "personal",
        })
    }
}

/// Headline counts and rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_campaigns: u64,
    pub active_campaigns: u64,
    pub total_users: u64,
    pub total_departments: u64,
    pub emails_received: u64,
    pub emails_clicked: u64,
    /// Percent of sends that were clicked, in `[0, 100]`.
    pub click_rate: f64,
    /// Percent of sends that were reported, in `[0, 100]`.
    pub report_rate: f64,
}

impl ReportSummary {
    /// Share of recipients that did not click, in `[0, 100]`.
    pub fn security_rate(&self) -> f64 {
        (100.0 - self.click_rate).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentStat {
    pub department: String,
    pub sends: u64,
    pub clicks: u64,
    /// Always `click_rate(clicks, sends)`.
    pub rate: f64,
}

impl DepartmentStat {
    pub fn new(department: impl Into<String>, sends: u64, clicks: u64) -> Self {
        Self {
            department: department.into(),
            sends,
            clicks,
            rate: click_rate(clicks, sends),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentCampaign {
    pub id: CampaignId,
    pub name: String,
    pub status: CampaignStatus,
    pub target_user_count: u64,
    pub click_count: u64,
    pub start_date: Option<NaiveDateTime>,
}

/// An entry of the campaign list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRef {
    pub id: CampaignId,
    pub name: String,
    pub status: CampaignStatus,
    pub start_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    pub full_name: String,
    pub email: String,
    pub sends_count: u64,
    pub clicks_count: u64,
    pub campaign_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickRecord {
    pub full_name: String,
    pub email: String,
    pub clicked_at: Option<NaiveDateTime>,
    pub ip_address: Option<String>,
}

/// Who clicked in one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignClickDetail {
    pub campaign_id: CampaignId,
    pub campaign_name: String,
    pub total_sends: u64,
    pub total_clicks: u64,
    pub clicks: Vec<ClickRecord>,
}

impl CampaignClickDetail {
    pub fn click_rate(&self) -> f64 {
        click_rate(self.total_clicks, self.total_sends)
    }
}

/// Everything one export renders. Built fresh per export and then dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub kind: ReportKind,
    pub summary: ReportSummary,
    pub department_stats: Vec<DepartmentStat>,
    pub recent_campaigns: Vec<RecentCampaign>,
    pub collaborators: Vec<Collaborator>,
    pub campaigns: Vec<CampaignRef>,
}

impl ReportSnapshot {
    /// Active campaigns in ascending id order, without duplicates.
    pub fn active_campaigns(&self) -> Vec<&CampaignRef> {
        let mut active: Vec<&CampaignRef> =
            self.campaigns.iter().filter(|c| c.status.is_active()).collect();
        active.sort_by_key(|c| c.id);
        active.dedup_by_key(|c| c.id);
        active
    }
}

/// A decoded logo ready to be embedded.
#[derive(Clone, PartialEq)]
pub struct LogoAsset {
    /// `data:<mime>;base64,<payload>` of the original bytes.
    pub data_url: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// 8-bit RGB samples, row-major, `pixel_width * pixel_height * 3` bytes.
    pub rgb: Vec<u8>,
    /// 8-bit alpha samples when the source had transparency.
    pub alpha: Option<Vec<u8>>,
}

impl LogoAsset {
    pub fn pixel_count(&self) -> usize {
        self.pixel_width as usize * self.pixel_height as usize
    }

    /// Non-empty, with an RGB buffer matching the declared size.
    ///
    /// Only drawable logos may reach the header; anything else renders the
    /// header without an image.
    pub fn is_drawable(&self) -> bool {
        let pixels = self.pixel_count();
        pixels > 0 && self.rgb.len() == pixels * 3
    }
}

impl fmt::Debug for LogoAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogoAsset")
            .field("pixel_width", &self.pixel_width)
            .field("pixel_height", &self.pixel_height)
            .field("data_url_len", &self.data_url.len())
            .field("has_alpha", &self.alpha.is_some())
            .finish()
    }
}
