use phishreport_pdf_composer::ComposerError;
use phishreport_render_core::RenderError;
use phishreport_traits::SourceError;
use thiserror::Error;

/// Everything that can stop an export.
///
/// Sub-fetches other than the dashboard, and the logo, never surface here:
/// they are logged and the report is drawn without them.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to load data: {0}")]
    DataUnavailable(#[source] SourceError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("PDF composition failed: {0}")]
    Composer(#[from] ComposerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("an export is already in progress")]
    AlreadyRunning,
}

impl From<config::ConfigError> for ExportError {
    fn from(e: config::ConfigError) -> Self {
        ExportError::Config(e.to_string())
    }
}
