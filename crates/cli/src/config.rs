use chrono::NaiveDate;
use regform_validation::clock::parse_date;
use regform_validation::{FixedClock, SharedClock, SystemClock};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

pub const ENV_LOG: &str = "REGFORM_LOG";
pub const ENV_LOG_FORMAT: &str = "REGFORM_LOG_FORMAT";
pub const ENV_TODAY: &str = "REGFORM_TODAY";

/// Configuration error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
}

impl ConfigError {
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::invalid_value(ENV_LOG_FORMAT, s, "text or json")),
        }
    }
}

/// Settings for one CLI run. Environment first, flags on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub log_level: String,
    pub log_format: LogFormat,
    /// Fixed "today" for the age rule; the system date when unset
    pub today: Option<NaiveDate>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
            today: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            config.log_level = level.trim().to_string();
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            config.log_format = format.parse()?;
        }
        if let Some(today) = lookup(ENV_TODAY) {
            config.today = Some(parse_today(ENV_TODAY, &today)?);
        }

        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        log_level: Option<&str>,
        log_json: bool,
        today: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(level) = log_level {
            self.log_level = level.to_string();
        }
        if log_json {
            self.log_format = LogFormat::Json;
        }
        if let Some(today) = today {
            self.today = Some(parse_today("--today", today)?);
        }
        Ok(self)
    }

    /// Clock for the age rule
    pub fn clock(&self) -> SharedClock {
        match self.today {
            Some(date) => Arc::new(FixedClock::new(date)),
            None => Arc::new(SystemClock),
        }
    }
}

fn parse_today(field: &str, value: &str) -> Result<NaiveDate, ConfigError> {
    parse_date(value.trim())
        .map_err(|_| ConfigError::invalid_value(field, value, "a date as YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_environment_values() {
        let config = CliConfig::from_lookup(lookup(&[
            (ENV_LOG, "debug"),
            (ENV_LOG_FORMAT, "JSON"),
            (ENV_TODAY, "2024-06-15"),
        ]))
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 6, 15));
        assert_eq!(config.clock().today(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }

    #[test]
    fn test_invalid_environment_values() {
        let err = CliConfig::from_lookup(lookup(&[(ENV_LOG_FORMAT, "xml")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == ENV_LOG_FORMAT
        ));

        let err = CliConfig::from_lookup(lookup(&[(ENV_TODAY, "15.06.2024")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for REGFORM_TODAY: '15.06.2024'. Expected: a date as YYYY-MM-DD"
        );
    }

    #[test]
    fn test_flags_override_environment() {
        let config = CliConfig::from_lookup(lookup(&[(ENV_LOG, "info"), (ENV_TODAY, "2020-01-01")]))
            .unwrap()
            .with_overrides(Some("trace"), true, Some("2024-06-15"))
            .unwrap();

        assert_eq!(config.log_level, "trace");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 6, 15));

        assert!(CliConfig::default()
            .with_overrides(None, false, Some("tomorrow"))
            .is_err());
    }
}
