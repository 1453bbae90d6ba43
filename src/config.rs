use crate::error::ExportError;
use phishreport_types::{Color, ReportKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Looked up in the working directory when no file is given.
pub const DEFAULT_CONFIG_FILE: &str = "phishreport.toml";
pub const ENV_PREFIX: &str = "PHISHREPORT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    /// Sent as a bearer token when set.
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub kind: ReportKind,
    /// Relative to `logo_dir` when set, otherwise to `api.base_url`.
    pub logo_path: String,
    pub logo_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub max_concurrent_fetches: usize,
    /// Header band colour, as `#rrggbb` or `#rgb`.
    pub accent_color: Option<Color>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            kind: ReportKind::Executive,
            logo_path: "logo.png".to_string(),
            logo_dir: None,
            output_dir: PathBuf::from("."),
            max_concurrent_fetches: 4,
            accent_color: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path` (or `phishreport.toml` if present), with
    /// `PHISHREPORT__SECTION__KEY` environment variables layered on top.
    pub fn load(path: Option<&Path>) -> Result<Self, ExportError> {
        let mut builder = config::Config::builder();
        builder = match path {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                builder.add_source(config::File::from(path))
            }
            None => builder.add_source(
                config::File::new(DEFAULT_CONFIG_FILE, config::FileFormat::Toml).required(false),
            ),
        };
        builder = builder.add_source(Self::environment());
        Self::from_builder(builder)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ExportError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validated()
    }

    fn validated(mut self) -> Result<Self, ExportError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ExportError::Config("api.base_url must not be empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ExportError::Config(
                "api.timeout_secs must be at least 1".into(),
            ));
        }
        if self.report.max_concurrent_fetches == 0 {
            log::warn!("report.max_concurrent_fetches is 0; using 1");
            self.report.max_concurrent_fetches = 1;
        }
        self.api.token = self.api.token.filter(|t| !t.trim().is_empty());
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}
