//! TOML configuration for the `booking` binary.
//!
//! Every section is optional; missing values fall back to the defaults
//! below. Command-line flags are applied on top with
//! [`AppConfig::apply_overrides`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use booking_core::models::AvailabilityCalendar;
use booking_core::notifications::NotificationCounts;
use booking_core::storage::StorageConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "booking.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub submission: SubmissionConfig,
    pub logging: LoggingConfig,
    /// Vendor calendar checked when a date is chosen. Without one, only
    /// past dates are refused.
    pub availability: Option<AvailabilityCalendar>,
    /// Unread counts shown by `show`, one entry per poll.
    pub notifications: Vec<NotificationCounts>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                backend: "sqlite".to_string(),
                connection_string: "sqlite:booking.db?mode=rwc".to_string(),
            },
            submission: SubmissionConfig::default(),
            logging: LoggingConfig::default(),
            availability: None,
            notifications: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Simulated round-trip time of a submission, in milliseconds.
    pub delay_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self { delay_ms: 2000 }
    }
}

impl SubmissionConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins over it.
    pub level: String,
    /// Append log records here as well as to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

/// Flag values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend: Option<String>,
    pub db: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn from_toml(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or [`DEFAULT_CONFIG_FILE`] if it exists, or the defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    debug!("no config file; using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml(&text, &path)
    }

    pub fn apply_overrides(
        &mut self,
        overrides: Overrides,
    ) {
        if let Some(backend) = overrides.backend {
            self.storage.backend = backend;
        }
        if let Some(db) = overrides.db {
            self.storage.connection_string = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }
}
