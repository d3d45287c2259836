//! Configuration management for the phishing detection service

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Model artifact locations. Both files are produced by the offline training
/// pipeline and must be present at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// Path to the ONNX classifier export
    #[serde(default = "default_classifier_path")]
    pub classifier_path: String,
    /// Path to the exported scaler parameters (JSON)
    #[serde(default = "default_scaler_path")]
    pub scaler_path: String,
    /// Number of threads for ONNX inference (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

/// Page fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum redirects to follow
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// Accept invalid TLS certificates. Defaults to true: suspicious hosts
    /// routinely carry broken certificates and the page content is still
    /// wanted for feature extraction.
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
    /// User-Agent header for outgoing requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_classifier_path() -> String {
    "models/phishing_detector.onnx".to_string()
}

fn default_scaler_path() -> String {
    "models/scaler.json".to_string()
}

fn default_onnx_threads() -> usize {
    1
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_max_redirects() -> usize {
    10
}

fn default_accept_invalid_certs() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("phishing-detector/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            classifier_path: default_classifier_path(),
            scaler_path: default_scaler_path(),
            onnx_threads: default_onnx_threads(),
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            accept_invalid_certs: default_accept_invalid_certs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactsConfig::default(),
            fetcher: FetcherConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file, falling back to defaults
    /// when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let config = Config::builder()
            .add_source(File::from(path))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
