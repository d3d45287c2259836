//! Bounded-timeout page retrieval.
//!
//! One GET per prediction, redirects followed, certificate validation
//! disabled: the inputs under analysis are exactly the hosts whose
//! certificates cannot be trusted, and a TLS rejection would blind the
//! content extractor without improving the verdict. No retries. Every
//! failure is categorized and recovered by the caller into "no content".

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::debug;

use crate::config::FetcherConfig;

/// Why a fetch produced no body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The URL could not be turned into a request at all.
    InvalidUrl,
    /// The request exceeded the configured deadline.
    Timeout,
    /// TCP/TLS connection establishment failed.
    Connect,
    /// The server answered with a non-success status.
    Status(u16),
    /// The response body could not be read or decoded.
    Body,
    /// Anything the categories above do not cover.
    Other(String),
}

impl FetchError {
    /// Stable label used in logs and metrics.
    pub fn category(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl => "invalid_url",
            FetchError::Timeout => "timeout",
            FetchError::Connect => "connect",
            FetchError::Status(_) => "status",
            FetchError::Body => "body",
            FetchError::Other(_) => "other",
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidUrl => write!(f, "invalid URL"),
            FetchError::Timeout => write!(f, "request timed out"),
            FetchError::Connect => write!(f, "connection failed"),
            FetchError::Status(code) => write!(f, "non-success status {code}"),
            FetchError::Body => write!(f, "failed to read response body"),
            FetchError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connect
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else if err.is_builder() || err.is_request() {
            FetchError::InvalidUrl
        } else if err.is_body() || err.is_decode() {
            FetchError::Body
        } else {
            FetchError::Other(err.to_string())
        }
    }
}

/// Shared HTTP client for page retrieval. Cheap to clone; each request gets
/// its own timeout clock.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// Retrieve the page body for `url`. A single attempt; any failure mode
    /// collapses into a categorized [`FetchError`].
    pub async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        debug!(url = %url, bytes = body.len(), "Page fetched");
        Ok(body)
    }
}
