//! Configuration loading and validation for anews.
//!
//! Loads configuration from `~/.anews/config.toml`, then applies environment
//! variable overrides, then command-line overrides. Validates all settings
//! before a client is built.

use anews_core::{Credentials, Endpoint, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_API_KEY: &str = "APPLE_NEWS_API_KEY";
pub const ENV_API_SECRET: &str = "APPLE_NEWS_API_SECRET";
pub const ENV_CHANNEL_ID: &str = "CHANNEL_ID";
pub const ENV_BASE_URL: &str = "BASE_URL";

/// The root configuration structure.
///
/// Maps directly to `~/.anews/config.toml`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base64-encoded shared secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,

    /// Channel that articles are published to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://news-api.apple.com".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("channel_id", &self.channel_id)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Values given on the command line. Set fields win over file and env.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub channel_id: Option<String>,
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.anews/config.toml) and
    /// apply environment overrides:
    /// - `APPLE_NEWS_API_KEY`
    /// - `APPLE_NEWS_API_SECRET`
    /// - `CHANNEL_ID`
    /// - `BASE_URL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        Self::load_with_env(&config_path)
    }

    /// Load a specific file and apply environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env_with(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup. Empty values are ignored.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(secret) = get(ENV_API_SECRET) {
            self.api_secret = Some(secret);
        }
        if let Some(channel) = get(ENV_CHANNEL_ID) {
            self.channel_id = Some(channel);
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url;
        }
    }

    /// Apply command-line overrides.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if overrides.api_key.is_some() {
            self.api_key = overrides.api_key;
        }
        if overrides.api_secret.is_some() {
            self.api_secret = overrides.api_secret;
        }
        if overrides.channel_id.is_some() {
            self.channel_id = overrides.channel_id;
        }
        if let Some(url) = overrides.base_url {
            self.base_url = url;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".anews")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "base_url must start with http:// or https:// (got '{}')",
                self.base_url
            )));
        }

        Ok(())
    }

    /// Decode the configured key and secret.
    pub fn credentials(&self) -> anews_core::Result<Credentials> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            Error::config(format!("API key is not set (config api_key, {ENV_API_KEY} or --api-key)"))
        })?;
        let secret = self.api_secret.as_deref().ok_or_else(|| {
            Error::config(format!(
                "API secret is not set (config api_secret, {ENV_API_SECRET} or --api-secret)"
            ))
        })?;
        Credentials::new(key, secret)
    }

    pub fn endpoint(&self) -> anews_core::Result<Endpoint> {
        let channel = self.channel_id.as_deref().ok_or_else(|| {
            Error::config(format!(
                "Channel id is not set (config channel_id, {ENV_CHANNEL_ID} or --channel-id)"
            ))
        })?;
        Ok(Endpoint::new(&self.base_url, channel))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            channel_id: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::config(e.to_string())
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
