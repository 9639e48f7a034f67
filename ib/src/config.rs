//! IntentBridge configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::clarity::ClarityConfig;

/// Environment variable that overrides `api.base-url`
pub const API_BASE_ENV: &str = "INTENTBRIDGE_API_BASE";

/// Project-local config file name
const LOCAL_CONFIG_FILE: &str = ".intentbridge.yml";

/// Main IntentBridge configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Synthesis service connection
    pub api: ApiConfig,

    /// Clarity score constants
    pub clarity: ClarityConfig,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(eyre::eyre!("api.base-url is empty. Set it in the config or via {}.", API_BASE_ENV));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(eyre::eyre!(
                "api.base-url must start with http:// or https:// (got '{}')",
                base_url
            ));
        }
        if self.clarity.cap > 100 || self.clarity.plan_score > 100 || self.clarity.processing_score > 100 {
            return Err(eyre::eyre!("clarity scores must be between 0 and 100"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file_chain(config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load just the log level from config, ignoring every other error
    ///
    /// Called before logging is initialized, so it must not log.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load_file_chain(config_path).ok().and_then(|c| c.log_level)
    }

    fn load_file_chain(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .intentbridge.yml
        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/intentbridge/intentbridge.yml
        if let Some(user_config) = user_config_path()
            && user_config.exists()
        {
            match Self::load_from_file(&user_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply `INTENTBRIDGE_API_BASE` if set and non-empty
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var(API_BASE_ENV)
            && !base_url.trim().is_empty()
        {
            debug!(%base_url, "apply_env_overrides: overriding api.base-url");
            self.api.base_url = base_url;
        }
    }
}

/// Path of the per-user config file
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("intentbridge").join("intentbridge.yml"))
}

/// Synthesis service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; requests go to `<base-url>/process`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            timeout_ms: 120_000,
        }
    }
}
