use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use crate::constants::{self, env_vars};
use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// URL of the remote schedule dataset (JSON array of game records).
    #[serde(default = "default_schedule_url")]
    pub schedule_url: String,
    /// Path to the local fallback copy of the dataset.
    #[serde(default = "default_fallback_file")]
    pub fallback_file: String,
    /// Verification endpoint of the credential backend. When unset, every
    /// non-development key fails backend lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_service_url: Option<String>,
    /// Snapshot freshness window in seconds. Defaults to one hour.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    /// HTTP timeout in seconds for dataset and credential backend requests.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Production mode disables the development key table, the public-access
    /// fallback, and the degrade-to-dev-customer path on backend errors.
    #[serde(default)]
    pub is_production: bool,
    /// Allow unauthenticated requests as a synthetic "Public" free-plan
    /// customer. Only honored outside production.
    #[serde(default)]
    pub allow_public_access: bool,
    /// Path to the log file. If not specified, logs go to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

fn default_schedule_url() -> String {
    constants::DEFAULT_SCHEDULE_URL.to_string()
}

fn default_fallback_file() -> String {
    constants::DEFAULT_FALLBACK_FILE.to_string()
}

fn default_cache_ttl() -> u64 {
    constants::cache_ttl::SNAPSHOT_SECONDS
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schedule_url: default_schedule_url(),
            fallback_file: default_fallback_file(),
            key_service_url: None,
            cache_ttl_seconds: default_cache_ttl(),
            http_timeout_seconds: default_http_timeout(),
            is_production: false,
            allow_public_access: false,
            log_file_path: None,
        }
    }
}

fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
}

impl Config {
    /// Loads configuration from the default config file location, falling
    /// back to built-in defaults when no file exists. Environment variables
    /// override config file values.
    ///
    /// # Environment Variables
    /// - `NHL_API_SCHEDULE_URL` - Override dataset URL
    /// - `NHL_API_FALLBACK_FILE` - Override local fallback path
    /// - `NHL_API_KEY_SERVICE_URL` - Override credential backend endpoint
    /// - `NHL_API_LOG_FILE` - Override log file path
    /// - `NHL_API_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    /// - `NHL_API_CACHE_TTL` - Override snapshot TTL in seconds
    /// - `NHL_API_PRODUCTION` - "1"/"true" enables production policy
    /// - `NHL_API_ALLOW_PUBLIC` - "1"/"true" allows keyless public access
    pub async fn load() -> Result<Self, AppError> {
        Self::load_from(&get_config_path()).await
    }

    /// Loads configuration from an explicit file path, applying the same
    /// env overrides and validation as [`Config::load`].
    pub async fn load_from(config_path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(config_path).exists() {
            let content = fs::read_to_string(config_path).await?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        if let Ok(url) = std::env::var(env_vars::SCHEDULE_URL) {
            config.schedule_url = url;
        }

        if let Ok(path) = std::env::var(env_vars::FALLBACK_FILE) {
            config.fallback_file = path;
        }

        if let Ok(url) = std::env::var(env_vars::KEY_SERVICE_URL) {
            config.key_service_url = Some(url);
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            config.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }

        if let Some(ttl) = std::env::var(env_vars::CACHE_TTL)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.cache_ttl_seconds = ttl;
        }

        if let Some(production) = env_bool(env_vars::PRODUCTION) {
            config.is_production = production;
        }

        if let Some(allow_public) = env_bool(env_vars::ALLOW_PUBLIC) {
            config.allow_public_access = allow_public;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.schedule_url,
            &self.key_service_url,
            self.cache_ttl_seconds,
            self.http_timeout_seconds,
            &self.log_file_path,
        )
    }

    /// Saves the configuration to the default config file location,
    /// creating the directory if needed.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        if let Some(parent) = Path::new(&config_path).parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(&config_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Returns the platform-specific log directory path
    pub fn get_log_dir_path() -> String {
        get_log_dir_path()
    }
}
