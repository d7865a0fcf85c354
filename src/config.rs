//! Configuration management for the leaderboard proxy
//!
//! Loads configuration from YAML files and environment variables.
//! Environment variables override YAML values.

use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

/// Spreadsheet holding one tab per event
pub const DEFAULT_SPREADSHEET_ID: &str = "1RZFbBMWwNdGXWf7d2gmnBzJLbVt4UM7ZpSHI_kGvBm0";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Google Sheets backend
    #[serde(default)]
    pub sheets: SheetsConfig,
    /// Event cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Google Sheets values API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    /// API root, overridable for local stand-ins
    #[serde(default = "default_sheets_base_url")]
    pub base_url: String,
    #[serde(default = "default_spreadsheet_id")]
    pub spreadsheet_id: String,
    /// API key (GOOGLE_API_KEY). Requests go out without one if unset and
    /// the upstream rejects them.
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_sheets_timeout")]
    pub timeout_ms: u64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            base_url: default_sheets_base_url(),
            spreadsheet_id: default_spreadsheet_id(),
            api_key: None,
            timeout_ms: default_sheets_timeout(),
        }
    }
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_spreadsheet_id() -> String {
    DEFAULT_SPREADSHEET_ID.to_string()
}

fn default_sheets_timeout() -> u64 {
    10000
}

/// Event cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of a cached event in seconds (5 hours)
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: i64,
    /// How often expired events are swept out
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_cache_ttl() -> i64 {
    5 * 60 * 60
}

fn default_sweep_interval() -> u64 {
    600
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Priority (highest to lowest):
    /// 1. `PORT` and `GOOGLE_API_KEY`
    /// 2. Environment variables (LEADERBOARD_*)
    /// 3. config/config.yaml (if exists)
    /// 4. config.yaml (if exists)
    /// 5. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("sheets.base_url", default_sheets_base_url())?
            .set_default("sheets.spreadsheet_id", DEFAULT_SPREADSHEET_ID)?
            .set_default("sheets.timeout_ms", default_sheets_timeout() as i64)?
            .set_default("cache.ttl_secs", default_cache_ttl())?
            .set_default("cache.sweep_interval_secs", default_sweep_interval() as i64)?
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config/config").required(false))
            // LEADERBOARD_SERVER__PORT=4000 -> server.port = 4000
            .add_source(
                Environment::with_prefix("LEADERBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("sheets.api_key", std::env::var("GOOGLE_API_KEY").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sheets.spreadsheet_id.trim().is_empty() {
            return Err(ConfigError::Message(
                "Spreadsheet id must be set".to_string(),
            ));
        }

        if self.sheets.base_url.trim().is_empty() {
            return Err(ConfigError::Message(
                "Sheets base URL must be set".to_string(),
            ));
        }

        if self.cache.ttl_secs <= 0 {
            return Err(ConfigError::Message(
                "Cache TTL must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
