#![allow(dead_code)]

pub mod pdf_assertions;

use chrono::{NaiveDate, NaiveDateTime};
use lopdf::Document as LopdfDocument;
use phishreport::{DocumentComposer, ReportKind, ReportSnapshot};
use phishreport_source::InMemoryMetricsSource;
use phishreport_types::wire::{
    CampaignClicksPayload, CampaignPayload, ClickPayload, CollaboratorPayload, DashboardPayload,
    DepartmentStatPayload, RecentCampaignPayload, SummaryPayload,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Every string shown on any page.
    pub fn strings(&self) -> Vec<String> {
        pdf_assertions::all_page_strings(&self.doc)
            .into_iter()
            .flatten()
            .collect()
    }

    pub fn page_strings(&self, page: u32) -> Vec<String> {
        pdf_assertions::page_strings(&self.doc, page)
    }

    pub fn page_operators(&self, page: u32) -> Vec<String> {
        pdf_assertions::page_operators(&self.doc, page)
    }

    pub fn image_count(&self) -> usize {
        pdf_assertions::image_count(&self.doc)
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

pub fn timestamp(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

// ============================================================================
// Payload fixtures
// ============================================================================

pub fn department(name: &str, sends: u64, clicks: u64) -> DepartmentStatPayload {
    DepartmentStatPayload {
        department: Some(name.to_string()),
        sends: Some(sends),
        clicks: Some(clicks),
        rate: None,
    }
}

pub fn recent(id: i64, name: &str, status: &str) -> RecentCampaignPayload {
    RecentCampaignPayload {
        id,
        name: Some(name.to_string()),
        status: Some(status.to_string()),
        users: Some(50),
        clicks: Some(5),
        reports: None,
        start_date: NaiveDate::from_ymd_opt(2024, 2, 1).and_then(|d| d.and_hms_opt(9, 0, 0)),
    }
}

pub fn campaign(id: i64, name: &str, status: &str) -> CampaignPayload {
    CampaignPayload {
        id,
        name: Some(name.to_string()),
        status: Some(status.to_string()),
        start_date: None,
    }
}

pub fn clicks(campaign_id: i64, people: &[&str]) -> CampaignClicksPayload {
    CampaignClicksPayload {
        campaign_id,
        campaign_name: None,
        total_sends: Some(40),
        total_clicks: Some(people.len() as u64),
        clicks: people
            .iter()
            .map(|name| ClickPayload {
                full_name: Some(name.to_string()),
                email: Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
                clicked_at: None,
                ip_address: Some("10.0.0.7".to_string()),
            })
            .collect(),
    }
}

/// One department: 100 sends, 20 clicks.
pub fn single_department_dashboard() -> DashboardPayload {
    DashboardPayload {
        summary: Some(SummaryPayload {
            total_campaigns: Some(1),
            total_users: Some(100),
            ..Default::default()
        }),
        department_stats: Some(vec![department("TI", 100, 20)]),
        recent_campaigns: Some(vec![recent(1, "Invoice lure", "completed")]),
        collaborators: None,
    }
}

pub fn dashboard_with_departments(count: usize) -> DashboardPayload {
    DashboardPayload {
        department_stats: Some(
            (0..count)
                .map(|i| department(&format!("Department {:03}", i), 40, (i % 7) as u64))
                .collect(),
        ),
        ..single_department_dashboard()
    }
}

pub fn detailed_dashboard() -> DashboardPayload {
    DashboardPayload {
        collaborators: Some(vec![CollaboratorPayload {
            full_name: Some("Ana Souza".into()),
            email: Some("ana@example.com".into()),
            sends: Some(3),
            clicks: Some(1),
            campaigns: vec!["Invoice lure".into(), "Gift card".into()],
        }]),
        ..single_department_dashboard()
    }
}

/// Aggregates `source` and composes the result with a fixed timestamp.
pub async fn compose(
    source: &InMemoryMetricsSource,
    kind: ReportKind,
    generated_at: NaiveDateTime,
) -> Result<(ReportSnapshot, GeneratedPdf), Box<dyn std::error::Error>> {
    let snapshot = phishreport::Aggregator::new(source, kind).aggregate().await?;
    let bytes = DocumentComposer::new(source)
        .with_timestamp(generated_at)
        .compose(&snapshot, None)
        .await?;
    Ok((snapshot, GeneratedPdf::from_bytes(bytes)?))
}

/// A small PNG logo, RGBA when `with_alpha` is set.
pub fn png_logo(with_alpha: bool) -> Vec<u8> {
    let image = if with_alpha {
        image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            8,
            4,
            image::Rgba([30, 58, 138, 128]),
        ))
    } else {
        image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(8, 4, image::Rgb([30, 58, 138])))
    };
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap_or_default();
    bytes
}
