//! Module for application configuration settings.
//!
//! Settings come from a TOML file, then environment variables override them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use analytics_engine::{ClientConfig, Credentials, DEFAULT_SERVICE_URL, service_url_for_region};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const ENV_SERVICE_URL: &str = "ANALYTICS_ENGINE_URL";
const ENV_BEARER_TOKEN: &str = "ANALYTICS_ENGINE_BEARER_TOKEN";
const ENV_INSTANCE_ID: &str = "ANALYTICS_ENGINE_INSTANCE_ID";

fn default_timeout_secs() -> u64 {
    60
}

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Base URL of the service. Takes precedence over `region`.
    pub service_url: Option<String>,

    /// Region whose public endpoint to use when `service-url` is not set.
    pub region: Option<String>,

    /// Bearer token sent with every request.
    #[serde(default, serialize_with = "serialize_token")]
    pub bearer_token: Option<SecretString>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Instance used when a command does not name one.
    pub instance_id: Option<String>,
}

fn serialize_token<S>(token: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match token {
        Some(_) => serializer.serialize_some("****"),
        None => serializer.serialize_none(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: None,
            region: None,
            bearer_token: None,
            timeout_secs: default_timeout_secs(),
            instance_id: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation errors: {0:?}")]
    ValidationErrors(Vec<String>),

    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Config {
    /// Validate the correctness of the configuration.
    ///
    /// Returns every problem found rather than stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(url) = &self.service_url
            && !(url.starts_with("https://") || url.starts_with("http://"))
        {
            errors.push(format!("Service URL '{url}' must start with http:// or https://."));
        }

        if self.service_url.is_none()
            && let Some(region) = &self.region
            && let Err(e) = service_url_for_region(region)
        {
            errors.push(e.to_string());
        }

        if self.timeout_secs == 0 {
            errors.push("Timeout must be at least one second.".to_owned());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Returns config file paths in descending priority order.
    /// On macOS, skips `dirs::config_dir()` (resolves to ~/Library/Application Support/).
    fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        #[cfg(not(target_os = "macos"))]
        if let Some(xdg) = dirs::config_dir() {
            paths.push(xdg.join("analytics-engine").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(
                home.join(".config")
                    .join("analytics-engine")
                    .join("config.toml"),
            );
        }

        paths.push(PathBuf::from("/etc/analytics-engine/config.toml"));

        paths
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::config_search_paths().into_iter().find(|p| p.exists())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = ?path, "Loading configuration file.");
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from `external_config_path`, else the first config file found,
    /// else defaults, then apply environment overrides and validate.
    pub fn load(external_config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = external_config_path
            .map(Path::to_path_buf)
            .or_else(Self::find_config_file);
        let config = match path {
            Some(path) => Self::load_from_file(&path)?,
            None => {
                debug!("No configuration file found, using defaults.");
                Self::default()
            }
        };

        let config = config.with_env_overrides(|key| std::env::var(key).ok());
        config.validate().map_err(ConfigError::ValidationErrors)?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`, so tests need not touch the process env.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_SERVICE_URL) {
            self.service_url = Some(url);
        }
        if let Some(token) = lookup(ENV_BEARER_TOKEN) {
            self.bearer_token = Some(SecretString::from(token));
        }
        if let Some(instance_id) = lookup(ENV_INSTANCE_ID) {
            self.instance_id = Some(instance_id);
        }
        self
    }

    /// The service URL this configuration resolves to.
    pub fn resolved_service_url(&self) -> String {
        if let Some(url) = &self.service_url {
            return url.clone();
        }
        self.region
            .as_deref()
            .and_then(|r| service_url_for_region(r).ok())
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_owned())
    }

    /// Build the SDK client configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            service_url: self.resolved_service_url(),
            credentials: self
                .bearer_token
                .clone()
                .map_or(Credentials::None, Credentials::Bearer),
            timeout: Duration::from_secs(self.timeout_secs),
            ..ClientConfig::default()
        }
    }
}
