//! The "Export PDF" action: aggregate, load the logo, compose, save.

use crate::aggregator::Aggregator;
use crate::composer::{DEFAULT_MAX_CONCURRENT_FETCHES, DocumentComposer};
use crate::config::Settings;
use crate::error::ExportError;
use chrono::{Local, NaiveDate, NaiveDateTime};
use phishreport_resource::{FilesystemResourceProvider, HttpResourceProvider, load_image};
use phishreport_source::HttpMetricsSource;
use phishreport_traits::{MetricsSource, ResourceProvider};
use phishreport_types::{Color, ReportKind, ReportSnapshot};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub const FILE_PREFIX: &str = "phishing-report";

/// `phishing-report-YYYY-MM-DD.pdf`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("{}-{}.pdf", FILE_PREFIX, date.format("%Y-%m-%d"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub kind: ReportKind,
    pub logo_path: String,
    pub output_dir: PathBuf,
    pub max_concurrent_fetches: usize,
    pub accent: Color,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            kind: ReportKind::Executive,
            logo_path: "logo.png".to_string(),
            output_dir: PathBuf::from("."),
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            accent: Color::NAVY,
        }
    }
}

impl From<&Settings> for ExportSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            kind: settings.report.kind,
            logo_path: settings.report.logo_path.clone(),
            output_dir: settings.report.output_dir.clone(),
            max_concurrent_fetches: settings.report.max_concurrent_fetches,
            accent: settings.report.accent_color.unwrap_or(Color::NAVY),
        }
    }
}

/// Resets the in-progress flag when an export ends, however it ends.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs report exports, one at a time.
#[derive(Debug)]
pub struct ReportExporter {
    source: Arc<dyn MetricsSource>,
    resources: Arc<dyn ResourceProvider>,
    settings: ExportSettings,
    in_progress: AtomicBool,
}

impl ReportExporter {
    pub fn new(
        source: Arc<dyn MetricsSource>,
        resources: Arc<dyn ResourceProvider>,
        settings: ExportSettings,
    ) -> Self {
        Self {
            source,
            resources,
            settings,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Wires the HTTP metrics source and a logo provider from `settings`.
    ///
    /// The logo comes from `report.logo_dir` when set, otherwise from the API
    /// host.
    pub fn from_settings(settings: &Settings) -> Result<Self, ExportError> {
        let source = HttpMetricsSource::new(
            settings.api.base_url.clone(),
            settings.api.token.clone(),
            settings.timeout(),
        )
        .map_err(|e| ExportError::Config(e.to_string()))?;

        let resources: Arc<dyn ResourceProvider> = match &settings.report.logo_dir {
            Some(dir) => Arc::new(FilesystemResourceProvider::new(dir)),
            None => Arc::new(
                HttpResourceProvider::new(settings.api.base_url.clone(), settings.timeout())
                    .map_err(|e| ExportError::Config(e.to_string()))?,
            ),
        };

        Ok(Self::new(
            Arc::new(source),
            resources,
            ExportSettings::from(settings),
        ))
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Aggregates the report data without rendering it.
    pub async fn snapshot(&self) -> Result<ReportSnapshot, ExportError> {
        Aggregator::new(self.source.as_ref(), self.settings.kind)
            .aggregate()
            .await
    }

    /// Produces the PDF bytes. The logo is optional: a failed load is logged
    /// and the header is drawn without it.
    pub async fn render(&self, generated_at: NaiveDateTime) -> Result<Vec<u8>, ExportError> {
        let (snapshot, logo) = futures::join!(
            self.snapshot(),
            load_image(self.resources.as_ref(), &self.settings.logo_path)
        );
        let snapshot = snapshot?;

        DocumentComposer::new(self.source.as_ref())
            .with_timestamp(generated_at)
            .with_accent(self.settings.accent)
            .with_max_concurrent_fetches(self.settings.max_concurrent_fetches)
            .compose(&snapshot, logo.as_ref())
            .await
    }

    /// Renders the report and writes it to the output directory.
    ///
    /// Fails with [`ExportError::AlreadyRunning`] while another export on the
    /// same exporter is in progress; nothing is written on failure.
    pub async fn export(&self) -> Result<PathBuf, ExportError> {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("Export requested while another is running");
            return Err(ExportError::AlreadyRunning);
        }
        let _guard = RunGuard(&self.in_progress);

        let result = self.export_inner().await;
        if let Err(e) = &result {
            log::error!("Report export failed: {}", e);
        }
        result
    }

    async fn export_inner(&self) -> Result<PathBuf, ExportError> {
        let now = Local::now().naive_local();
        let bytes = self.render(now).await?;

        tokio::fs::create_dir_all(&self.settings.output_dir).await?;
        let path = self
            .settings
            .output_dir
            .join(report_file_name(now.date()));
        tokio::fs::write(&path, &bytes).await?;
        log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}
