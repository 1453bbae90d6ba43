use async_trait::async_trait;
use phishreport_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::sync::Arc;
use std::time::Duration;

/// Fetches static assets relative to a base URL (e.g. the dashboard's `/logo.png`).
#[derive(Debug, Clone)]
pub struct HttpResourceProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResourceProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ResourceError> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ResourceError::LoadFailed {
                path: base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ResourceProvider for HttpResourceProvider {
    async fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let url = self.url(path);
        log::debug!("Fetching resource {}", url);

        let failed = |message: String| ResourceError::LoadFailed {
            path: path.to_string(),
            message,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        match response.status() {
            reqwest::StatusCode::NOT_FOUND => Err(ResourceError::NotFound(path.to_string())),
            status if !status.is_success() => Err(failed(format!("HTTP {}", status.as_u16()))),
            _ => {
                let bytes = response.bytes().await.map_err(|e| failed(e.to_string()))?;
                Ok(Arc::new(bytes.to_vec()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "HttpResourceProvider"
    }
}
