//! Configuration loading and resolution
//!
//! Values resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or unparseable config file is never fatal: it is logged and the
//! compiled defaults are used.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable overriding the backend origin
pub const ENV_API_URL: &str = "READWISE_API_URL";
/// Environment variable naming an explicit config file
pub const ENV_CONFIG_PATH: &str = "READWISE_CONFIG";
/// Environment variable supplying a session credential
pub const ENV_SESSION_TOKEN: &str = "READWISE_SESSION_TOKEN";

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_FEED_PAGE_SIZE: u32 = 15;
const DEFAULT_DISCOVER_PAGE_SIZE: u32 = 12;
const DEFAULT_SEARCH_PAGE_SIZE: u32 = 12;
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Logging section of the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://127.0.0.1:5000`
    pub api_base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Page size for the home recommendation feed
    pub feed_page_size: u32,
    /// Page size for the discovery feed
    pub discover_page_size: u32,
    /// Page size for book search
    pub search_page_size: u32,
    /// Quiet period before a search-as-you-type lookup fires
    pub search_debounce_ms: u64,
    /// Bearer credential attached to every request when present
    pub session_token: Option<String>,
    pub logging: LoggingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            feed_page_size: DEFAULT_FEED_PAGE_SIZE,
            discover_page_size: DEFAULT_DISCOVER_PAGE_SIZE,
            search_page_size: DEFAULT_SEARCH_PAGE_SIZE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            session_token: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Parse a TOML config file
    pub fn load_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
    }

    /// Resolve configuration from CLI overrides, environment, TOML and defaults
    ///
    /// `cli_config` names an explicit config file; `cli_api_url` overrides the
    /// backend origin. The result is validated before it is returned.
    pub fn resolve(cli_config: Option<&Path>, cli_api_url: Option<&str>) -> Result<Self> {
        let config_path = cli_config
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from))
            .or_else(default_config_path);

        let mut config = match config_path {
            Some(path) if path.exists() => match Self::load_toml(&path) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config file");
                    config
                }
                Err(e) => {
                    warn!("Ignoring config file, using defaults: {}", e);
                    Self::default()
                }
            },
            Some(path) => {
                if cli_config.is_some() {
                    warn!(path = %path.display(), "Config file not found, using defaults");
                }
                Self::default()
            }
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                config.api_base_url = url;
            }
        }
        if let Ok(token) = std::env::var(ENV_SESSION_TOKEN) {
            if !token.trim().is_empty() {
                config.session_token = Some(token);
            }
        }
        if let Some(url) = cli_api_url {
            config.api_base_url = url.to_string();
        }

        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    /// Reject values the client cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(Error::Config(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }
        if self.feed_page_size == 0 || self.discover_page_size == 0 || self.search_page_size == 0 {
            return Err(Error::Config("page sizes must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Platform config file location (`<config_dir>/readwise/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("readwise").join("config.toml"))
}

/// Write config as TOML, creating parent directories
pub fn write_toml_config(config: &ClientConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}
