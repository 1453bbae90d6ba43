//! PDF reports for a phishing-simulation platform.
//!
//! The pipeline has four stages:
//! - [`aggregator`]: fetches dashboard metrics and campaigns from a
//!   `MetricsSource` and normalizes them into a `ReportSnapshot`
//! - logo loading (`phishreport_resource::load_image`), which never fails an export
//! - section rendering (`phishreport_render_lopdf`): cards and paginated tables
//! - [`composer`]: lays out every section for the snapshot's `ReportKind`,
//!   fetches per-campaign click details and stamps "Page N of M" footers
//!
//! [`ReportExporter`] ties them together and writes
//! `phishing-report-<YYYY-MM-DD>.pdf`.
//!
//! ## Example
//!
//! ```ignore
//! use phishreport::{ReportExporter, config::Settings};
//!
//! let settings = Settings::load(None)?;
//! let exporter = ReportExporter::from_settings(&settings)?;
//! let path = exporter.export().await?;
//! ```

pub mod aggregator;
pub mod composer;
pub mod config;
mod error;
pub mod export;

pub use aggregator::Aggregator;
pub use composer::DocumentComposer;
pub use error::ExportError;
pub use export::{ExportSettings, ReportExporter, report_file_name};

pub use phishreport_types::{LogoAsset, ReportKind, ReportSnapshot};
