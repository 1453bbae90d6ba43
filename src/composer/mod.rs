//! Lays out a [`ReportSnapshot`] as a paginated PDF.
//!
//! Composition runs in two phases. [`DocumentComposer::compose_content`]
//! flows every section down a [`PageSet`], breaking pages as needed; once
//! the page count is final, [`DocumentComposer::compose`] writes the
//! document and stamps a "Page N of M" footer on each page.

pub mod sections;

use crate::aggregator::fetch_click_details;
use crate::error::ExportError;
use chrono::{Local, NaiveDateTime};
use phishreport_pdf_composer::{ComposerError, stamp_footers};
use phishreport_render_core::format::format_datetime;
use phishreport_render_core::{DocumentCursor, FontFace, PageGeometry, RenderError, SectionStyle, text_width};
use phishreport_render_lopdf::{
    DocumentInfo, HeaderSpec, PageCanvas, PageSet, render_cards, render_header, render_section,
    save_document, write_document,
};
use phishreport_traits::MetricsSource;
use phishreport_types::{CampaignClickDetail, CampaignRef, Color, LogoAsset, ReportSnapshot, Size};

pub const PRODUCER: &str = "phishreport";
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;

const FOOTER_FONT_SIZE: f32 = 8.0;

/// Turns snapshots into finished PDF bytes.
#[derive(Debug, Clone)]
pub struct DocumentComposer<'a> {
    source: &'a dyn MetricsSource,
    geometry: PageGeometry,
    style: SectionStyle,
    accent: Color,
    max_concurrent_fetches: usize,
    generated_at: Option<NaiveDateTime>,
}

impl<'a> DocumentComposer<'a> {
    /// `source` is only used for the per-campaign click details of detailed
    /// reports.
    pub fn new(source: &'a dyn MetricsSource) -> Self {
        Self {
            source,
            geometry: PageGeometry::A4,
            style: SectionStyle::default(),
            accent: Color::NAVY,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            generated_at: None,
        }
    }

    /// Fixes the "generated on" timestamp instead of reading the clock.
    ///
    /// Two compositions of the same snapshot with the same timestamp produce
    /// identical bytes.
    pub fn with_timestamp(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Composes the full report: click details (detailed reports only),
    /// content pages, footers.
    pub async fn compose(
        &self,
        snapshot: &ReportSnapshot,
        logo: Option<&LogoAsset>,
    ) -> Result<Vec<u8>, ExportError> {
        let logo = drawable(logo);
        let generated_at = self
            .generated_at
            .unwrap_or_else(|| Local::now().naive_local());

        let details = if snapshot.kind.includes_click_details() {
            let active: Vec<&CampaignRef> = snapshot.active_campaigns();
            fetch_click_details(self.source, &active, self.max_concurrent_fetches).await
        } else {
            Vec::new()
        };

        let pages = self.compose_content(snapshot, logo, &details, generated_at)?;
        let page_count = pages.len();

        let info = DocumentInfo {
            title: snapshot.kind.title().to_string(),
            producer: PRODUCER.to_string(),
            creation_date: Some(generated_at.format("D:%Y%m%d%H%M%S").to_string()),
        };
        let (mut doc, page_ids) =
            write_document(pages.into_pages(), self.geometry, logo, &info)?;

        stamp_footers(&mut doc, &page_ids, |page, total| {
            footer_content(self.geometry, page, total)
                .map_err(|e| ComposerError::Other(e.to_string()))
        })?;

        let bytes = save_document(&mut doc)?;
        log::info!(
            "Composed {} report: {} page(s), {} bytes",
            snapshot.kind,
            page_count,
            bytes.len()
        );
        Ok(bytes)
    }

    /// Draws every section for the snapshot's kind, without footers.
    ///
    /// Order: header band, summary cards, departments, recent campaigns,
    /// collaborators, then one click-detail table per entry of `details`.
    pub fn compose_content(
        &self,
        snapshot: &ReportSnapshot,
        logo: Option<&LogoAsset>,
        details: &[CampaignClickDetail],
        generated_at: NaiveDateTime,
    ) -> Result<PageSet, RenderError> {
        let kind = snapshot.kind;
        let mut pages = PageSet::new(self.geometry);
        let mut cursor = DocumentCursor::new(self.geometry);

        let header = HeaderSpec {
            title: kind.title().to_string(),
            subtitle: format!("Generated on {}", format_datetime(Some(generated_at))),
            accent: self.accent,
        };
        let logo_size =
            drawable(logo).map(|l| Size::new(l.pixel_width as f32, l.pixel_height as f32));
        cursor = render_header(&mut pages, cursor, &self.style, &header, logo_size);

        let cards = sections::summary_cards(kind, &snapshot.summary);
        cursor = render_cards(&mut pages, cursor, &self.style, &cards);

        if kind.includes_departments() {
            let section = sections::departments(&snapshot.department_stats);
            cursor = render_section(&mut pages, cursor, &self.style, &section)?;
        }

        let section = sections::recent_campaigns(&snapshot.recent_campaigns);
        cursor = render_section(&mut pages, cursor, &self.style, &section)?;

        if kind.includes_collaborators() {
            let section = sections::collaborators(&snapshot.collaborators);
            cursor = render_section(&mut pages, cursor, &self.style, &section)?;
        }

        for detail in details {
            let section = sections::click_detail(detail);
            cursor = render_section(&mut pages, cursor, &self.style, &section)?;
        }

        log::debug!(
            "Content laid out on {} page(s), cursor at page {} offset {:.1}",
            pages.len(),
            cursor.page_index + 1,
            cursor.vertical_offset
        );
        Ok(pages)
    }
}

/// Header and writer must agree on the logo, or the page would draw an
/// image the document never defines.
fn drawable(logo: Option<&LogoAsset>) -> Option<&LogoAsset> {
    logo.filter(|l| {
        let ok = l.is_drawable();
        if !ok {
            log::warn!("Logo {:?} has a malformed sample buffer, header drawn without it", l);
        }
        ok
    })
}

/// The footer stream for one page: "Page N of M", centred in the bottom margin.
pub fn footer_content(
    geometry: PageGeometry,
    page: usize,
    total: usize,
) -> Result<Vec<u8>, RenderError> {
    let text = format!("Page {} of {}", page, total);
    let width = text_width(&text, FontFace::Regular, FOOTER_FONT_SIZE);
    let mut canvas = PageCanvas::new(geometry.height);
    canvas.text(
        (geometry.width - width) / 2.0,
        geometry.footer_baseline(),
        FontFace::Regular,
        FOOTER_FONT_SIZE,
        Color::MUTED,
        &text,
    );
    canvas.encode()
}
