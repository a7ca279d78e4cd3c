//! HTTP client for the variant API.
//!
//! One GET per call, no retry, no auth headers. The client is cheap to
//! clone: the underlying connection pool is shared.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::api::protocol::{HealthResponse, RequestStatus, VariantsResponse};
use crate::config::BrowserConfig;
use crate::{MutationBrowserError, Result};

/// Client for the variant API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `http://localhost:8000`).
    ///
    /// # Errors
    /// Returns `Config` if the base URL is not an absolute http(s) URL or
    /// the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, None)
    }

    /// Create a client from the loaded configuration.
    pub fn from_config(config: &BrowserConfig) -> Result<Self> {
        Self::build(
            &config.api_base_url,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    fn build(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            MutationBrowserError::Config(format!("Invalid API base URL '{}': {}", base_url, e))
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(MutationBrowserError::Config(format!(
                "Unsupported scheme: {} (only http/https allowed)",
                parsed.scheme()
            )));
        }

        let mut builder = Client::builder()
            .user_agent(concat!("mutation-browser/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            MutationBrowserError::Config(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for a variant lookup, with the gene percent-encoded.
    pub fn variants_url(&self, gene: &str) -> Result<Url> {
        Url::parse_with_params(&format!("{}/variants", self.base_url), &[("gene", gene)])
            .map_err(|e| MutationBrowserError::Config(format!("Invalid variants URL: {}", e)))
    }

    /// Look up all variants recorded for a gene.
    ///
    /// # Errors
    /// - `Transport` if the server cannot be reached or the body cannot be read
    /// - `HttpStatus` for any non-success status
    /// - `Decode` if the body is not a usable JSON object
    pub async fn fetch_variants(&self, gene: &str) -> Result<VariantsResponse> {
        let url = self.variants_url(gene)?;
        tracing::debug!(%url, "GET variants");

        let body = self.get_bytes(url).await?;
        VariantsResponse::from_slice(&body)
    }

    /// Check the service health endpoint.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.endpoint(&["health"])?;
        let body = self.get_bytes(url).await?;
        serde_json::from_slice(&body)
            .map_err(|e| MutationBrowserError::Decode(format!("Invalid health body: {}", e)))
    }

    /// Fetch the logged query event for a request id.
    ///
    /// Unknown ids come back from the service as `HttpStatus(404)`.
    pub async fn request_status(&self, request_id: &str) -> Result<RequestStatus> {
        let url = self.endpoint(&["status", request_id])?;
        let body = self.get_bytes(url).await?;
        serde_json::from_slice(&body)
            .map_err(|e| MutationBrowserError::Decode(format!("Invalid status body: {}", e)))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| MutationBrowserError::Config(format!("Invalid API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                MutationBrowserError::Config(format!(
                    "API base URL cannot hold a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| MutationBrowserError::Transport(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MutationBrowserError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            MutationBrowserError::Transport(format!("Failed to read body from {}: {}", url, e))
        })?;
        Ok(body.to_vec())
    }
}
