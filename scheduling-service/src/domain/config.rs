use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::Deserialize;
use shared::types::ObjectiveWeights;
use thiserror::Error;

use crate::domain::circuit_breaker::CircuitBreakerConfig;
use crate::infrastructure::health_check::HealthCheckSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),
}

/// On-disk shape of `scheduling.toml`: serde-friendly, string-based timezone.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSchedulingConfig {
    min_rest_days_per_week: i32,
    /// Reserved, stored but never consulted by H3-H5 — spec.md §9 Open
    /// Question 3.
    allow_overtime: bool,
    timeout_seconds: u32,
    timezone: String,
    weights: ObjectiveWeights,
    circuit_breaker: CircuitBreakerConfig,
    health_check: HealthCheckSettings,
}

impl Default for RawSchedulingConfig {
    fn default() -> Self {
        Self {
            min_rest_days_per_week: 1,
            allow_overtime: false,
            timeout_seconds: 60,
            timezone: "UTC".to_string(),
            weights: ObjectiveWeights::default(),
            circuit_breaker: CircuitBreakerConfig::default(),
            health_check: HealthCheckSettings::default(),
        }
    }
}

/// Resolved scheduling configuration: the algorithm's tunables (spec.md §6
/// `constraints`/`weights`/`timeoutSeconds`) plus the ambient stack's
/// circuit-breaker and health-check settings, loaded once at startup.
#[derive(Debug, Clone)]
pub struct SchedulingConfig {
    pub min_rest_days_per_week: i32,
    pub allow_overtime: bool,
    pub timeout_seconds: u32,
    timezone: Tz,
    pub weights: ObjectiveWeights,
    pub circuit_breaker: CircuitBreakerConfig,
    pub health_check: HealthCheckSettings,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        let raw = RawSchedulingConfig::default();
        Self {
            min_rest_days_per_week: raw.min_rest_days_per_week,
            allow_overtime: raw.allow_overtime,
            timeout_seconds: raw.timeout_seconds,
            timezone: Tz::UTC,
            weights: raw.weights,
            circuit_breaker: raw.circuit_breaker,
            health_check: raw.health_check,
        }
    }
}

impl SchedulingConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw_toml = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let raw: RawSchedulingConfig =
            toml::from_str(&raw_toml).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        let timezone = Tz::from_str(&raw.timezone)
            .map_err(|_| ConfigError::UnknownTimezone(raw.timezone.clone()))?;

        Ok(Self {
            min_rest_days_per_week: raw.min_rest_days_per_week,
            allow_overtime: raw.allow_overtime,
            timeout_seconds: raw.timeout_seconds,
            timezone,
            weights: raw.weights,
            circuit_breaker: raw.circuit_breaker,
            health_check: raw.health_check,
        })
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_spec_default_weights() {
        let config = SchedulingConfig::default();
        assert_eq!(config.min_rest_days_per_week, 1);
        assert!(!config.allow_overtime);
        assert_eq!(config.weights.equity_guards, 10.0);
        assert_eq!(config.weights.equity_hours, 8.0);
        assert_eq!(config.weights.preferences, 5.0);
    }
}
