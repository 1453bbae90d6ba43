pub mod color;
pub mod geometry;
pub mod ids;
pub mod report;
pub mod wire;

pub use color::Color;
pub use geometry::{Rect, Size};
pub use ids::CampaignId;
pub use report::{
    CampaignClickDetail, CampaignRef, CampaignStatus, ClickRecord, Collaborator,
    DepartmentStat, LogoAsset, RecentCampaign, ReportKind, ReportSnapshot, ReportSummary,
    click_rate,
};
