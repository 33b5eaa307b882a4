pub mod build;
pub use build::BuildInfo;

use anyhow::{bail, Context, Result};
use koyeb_api::{ClientOptions, BASE_URL, DEFAULT_PAGE_SIZE};
use serde::Deserialize;
use std::time::Duration;

use crate::probe::DEFAULT_CHANNEL_CAPACITY;

/// Paths the exporter serves besides the metrics path.
pub const RESERVED_PATHS: &[&str] = &["/", "/healthz", "/varz", "/robots.txt"];

/// Complete exporter configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExporterConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub liveness: LivenessConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address of the exporter's HTTP server
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Path on which Prometheus metrics are served
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

fn default_endpoint() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            metrics_path: default_metrics_path(),
        }
    }
}

/// Koyeb API client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Records requested per page on list calls
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_base_url() -> String {
    BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
        }
    }
}

impl ApiConfig {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
            page_size: self.page_size,
        }
    }
}

/// Liveness channel configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LivenessConfig {
    /// Signals buffered between collectors and the probe updater
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl ExporterConfig {
    /// Reject configurations the server cannot honour.
    pub fn validate(&self) -> Result<()> {
        let path = &self.server.metrics_path;
        if !path.starts_with('/') {
            bail!("metrics path must start with '/': {}", path);
        }
        if RESERVED_PATHS.contains(&path.as_str()) {
            bail!("metrics path collides with a built-in route: {}", path);
        }
        if self.api.page_size == 0 {
            bail!("api.page_size must be at least 1");
        }
        if self.api.timeout_seconds == 0 {
            bail!("api.timeout_seconds must be at least 1");
        }
        if self.liveness.channel_capacity == 0 {
            bail!("liveness.channel_capacity must be at least 1");
        }
        Ok(())
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<ExporterConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    let config: ExporterConfig =
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file {}", path))?;
    Ok(config)
}
