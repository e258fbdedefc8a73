//! Client configuration
//!
//! Read from `config.toml` in the platform config directory, then overridden
//! by `PROJECT_HUB_*` environment variables. A missing file is not an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::retry::RetryPolicy;
use crate::session::Session;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

pub const ENV_URL: &str = "PROJECT_HUB_URL";
pub const ENV_TOKEN: &str = "PROJECT_HUB_TOKEN";
pub const ENV_USER: &str = "PROJECT_HUB_USER";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub session: Session,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts for `GET /projects/all`
    pub load_attempts: u32,
    /// Attempts for `POST /projects/create`
    pub create_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            session: Session::anonymous(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            load_attempts: 3,
            // POST is not idempotent
            create_attempts: 1,
            initial_delay_ms: 100,
            max_delay_ms: 30_000,
        }
    }
}

impl RetryConfig {
    pub fn load_policy(&self) -> RetryPolicy {
        self.policy(self.load_attempts)
    }

    pub fn create_policy(&self) -> RetryPolicy {
        self.policy(self.create_attempts)
    }

    fn policy(&self, attempts: u32) -> RetryPolicy {
        RetryPolicy::new(
            attempts,
            Duration::from_millis(self.initial_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )
    }
}

impl Config {
    /// Default location: `<config dir>/project-hub/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "project-hub", "project-hub")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the default location and apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None, |key| std::env::var(key).ok())
    }

    /// Load from `path` (or the default location) and apply overrides read
    /// through `lookup`
    pub fn load_with(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load_from(&path)?,
            None => {
                tracing::debug!("No config directory available, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(lookup);
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Config file {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `PROJECT_HUB_*` overrides; blank values are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = value(ENV_URL) {
            self.server.base_url = url;
        }
        if let Some(token) = value(ENV_TOKEN) {
            self.session.token = Some(token);
        }
        if let Some(user) = value(ENV_USER) {
            self.session.user = Some(user);
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs)
    }
}
