//! Collector configuration.
//!
//! Configuration comes from a YAML file with four optional keys:
//!
//! ```yaml
//! coin: BTC
//! base_url: https://api.hyperliquid.xyz/info
//! db_path: ./data/hl_1s_kline.db
//! interval_pull_ms: 300
//! ```
//!
//! Loading never fails startup. A missing or unparsable file yields the
//! defaults, and a key with a wrong type or an invalid value falls back to
//! its own default.

use hlbars_fetch::request::DEFAULT_BASE_URL;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Default instrument symbol.
pub const DEFAULT_COIN: &str = "BTC";

/// Default database location.
pub const DEFAULT_DB_PATH: &str = "./data/hl_1s_kline.db";

/// Default poll cadence in milliseconds.
pub const DEFAULT_INTERVAL_PULL_MS: u64 = 300;

/// Fixed delay after a failed iteration.
pub const RECOVERY_DELAY: Duration = Duration::from_secs(1);

/// Errors that can occur while reading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        /// Path to the config file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid YAML.
    #[error("Failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml_bw::Error),
}

/// Collector settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectorConfig {
    /// Instrument symbol to poll.
    pub coin: String,
    /// Info endpoint URL.
    pub base_url: String,
    /// SQLite database location.
    pub db_path: PathBuf,
    /// Poll cadence in milliseconds.
    pub interval_pull_ms: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            coin: DEFAULT_COIN.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            interval_pull_ms: DEFAULT_INTERVAL_PULL_MS,
        }
    }
}

impl CollectorConfig {
    /// Loads the configuration at `path`, falling back to defaults.
    ///
    /// Every fallback is logged; this never fails.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                info!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(error = %e, "unusable config file, using defaults");
                Self::default()
            }
        }
    }

    /// Reads and parses the configuration at `path`.
    ///
    /// Invalid individual keys still fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if `yaml` is not a valid YAML mapping.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig = serde_yaml_bw::from_str(yaml)?;
        Ok(raw.resolve())
    }

    /// Returns the poll cadence.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.interval_pull_ms)
    }

    /// Returns the loop timings derived from this configuration.
    #[must_use]
    pub const fn poll_settings(&self) -> PollSettings {
        PollSettings {
            poll_interval: self.poll_interval(),
            recovery_delay: RECOVERY_DELAY,
        }
    }
}

/// Sleep durations used by the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Delay after a successful iteration.
    pub poll_interval: Duration,
    /// Delay after a failed iteration.
    pub recovery_delay: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        CollectorConfig::default().poll_settings()
    }
}

/// A config value that either has the expected type or is kept as-is for
/// the warning message.
#[derive(Debug)]
enum Field<T> {
    Valid(T),
    Invalid(serde_json::Value),
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match serde_json::from_value(value.clone()) {
            Ok(v) => Self::Valid(v),
            Err(_) => Self::Invalid(value),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    coin: Option<Field<String>>,
    #[serde(default)]
    base_url: Option<Field<String>>,
    #[serde(default)]
    db_path: Option<Field<String>>,
    #[serde(default)]
    interval_pull_ms: Option<Field<u64>>,
}

impl RawConfig {
    fn resolve(self) -> CollectorConfig {
        let defaults = CollectorConfig::default();
        let non_empty = |s: &String| !s.trim().is_empty();

        CollectorConfig {
            coin: pick("coin", self.coin, non_empty)
                .map_or(defaults.coin, |c| c.trim().to_string()),
            base_url: pick("base_url", self.base_url, non_empty)
                .map_or(defaults.base_url, |u| u.trim().to_string()),
            db_path: pick("db_path", self.db_path, non_empty)
                .map_or(defaults.db_path, PathBuf::from),
            interval_pull_ms: pick("interval_pull_ms", self.interval_pull_ms, |ms| *ms > 0)
                .unwrap_or(defaults.interval_pull_ms),
        }
    }
}

/// Returns the value of a key if present and valid, warning otherwise.
fn pick<T: std::fmt::Debug>(
    key: &str,
    field: Option<Field<T>>,
    valid: impl Fn(&T) -> bool,
) -> Option<T> {
    match field? {
        Field::Valid(v) if valid(&v) => Some(v),
        Field::Valid(v) => {
            warn!(key, value = ?v, "invalid config value, using default");
            None
        }
        Field::Invalid(raw) => {
            warn!(key, value = %raw, "config value has the wrong type, using default");
            None
        }
    }
}
