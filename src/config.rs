//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::request::{ServiceHost, DEFAULT_BASE_URL};

/// Environment variable overriding the service base URL.
pub const BASE_URL_ENV: &str = "CATSAYS_BASE_URL";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Image service settings.
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Image service settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the captioned-image service.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout_secs: 30 }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// The service host, preferring the environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is invalid.
    pub fn service_host(&self) -> Result<ServiceHost, String> {
        let raw = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| self.service.base_url.clone());
        ServiceHost::parse(&raw)
    }

    /// Per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero.
    pub fn timeout(&self) -> Result<Duration, String> {
        match self.service.timeout_secs {
            0 => Err("timeout_secs must be greater than zero".to_string()),
            secs => Ok(Duration::from_secs(secs)),
        }
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `CATSAYS_CONFIG` environment variable
/// 3. `~/.config/catsays/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("CATSAYS_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/catsays/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/catsays/config.toml")
    } else {
        PathBuf::from("catsays.toml")
    }
}
