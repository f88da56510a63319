// Configuration loading and validation

use crate::constants::{MAX_EXPIRY_THRESHOLD_DAYS, MIN_EXPIRY_THRESHOLD_DAYS};
use crate::error::ConfigError;
use chrono::Duration;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration as StdDuration;
use url::Url;

/// Validated runtime configuration.
///
/// Raw string fields from the config file never leak past loading; consumers
/// only see the typed, range-checked values.
#[derive(Debug, Clone)]
pub struct Config {
    /// Domains to monitor, in configured order
    pub domains: Vec<String>,
    /// Remaining certificate lifetime at or below which a domain is alerted on
    pub before_expired: Duration,
    /// Chat webhook endpoint for alert dispatch
    pub notify_url: Url,
}

/// On-disk configuration shape.
#[derive(Debug, Deserialize)]
struct RawConfig {
    domains: Vec<String>,
    alert: RawAlert,
}

#[derive(Debug, Deserialize)]
struct RawAlert {
    notify_url: String,
    before_expired: String,
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().display().to_string(),
            source,
        })?;

        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(contents)?;
        raw.validate()
    }
}

impl RawConfig {
    fn validate(self) -> Result<Config, ConfigError> {
        if self.domains.is_empty() {
            return Err(ConfigError::NoDomains);
        }

        let threshold = humantime::parse_duration(&self.alert.before_expired).map_err(
            |source| ConfigError::InvalidThreshold {
                value: self.alert.before_expired.clone(),
                details: source.to_string(),
            },
        )?;

        let min = StdDuration::from_secs(MIN_EXPIRY_THRESHOLD_DAYS * 24 * 60 * 60);
        let max = StdDuration::from_secs(MAX_EXPIRY_THRESHOLD_DAYS * 24 * 60 * 60);
        if threshold < min || threshold > max {
            return Err(ConfigError::ThresholdOutOfRange {
                value: self.alert.before_expired,
            });
        }

        let notify_url =
            Url::parse(&self.alert.notify_url).map_err(|source| ConfigError::InvalidNotifyUrl {
                value: self.alert.notify_url.clone(),
                source,
            })?;

        // Range check above keeps the value well inside chrono's bounds
        let before_expired = Duration::from_std(threshold).map_err(|_| {
            ConfigError::ThresholdOutOfRange {
                value: humantime::format_duration(threshold).to_string(),
            }
        })?;

        Ok(Config {
            domains: self.domains,
            before_expired,
            notify_url,
        })
    }
}
