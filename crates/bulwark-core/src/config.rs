//! Service configuration.
//!
//! Set once at construction and never changed afterwards.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RetryPolicy;
use crate::domain::policy::{DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// ```toml
/// max_retries = 3
/// base_delay_ms = 1000
/// log_errors = true
/// emit_events = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResilienceConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub log_errors: bool,
    pub emit_events: bool,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: DEFAULT_BASE_DELAY.as_millis() as u64,
            log_errors: true,
            emit_events: true,
        }
    }
}

impl ResilienceConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: ResilienceConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "loaded resilience config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries == 0 {
            return Err(ConfigError::Invalid("max_retries must be at least 1".into()));
        }
        if self.base_delay_ms == 0 {
            return Err(ConfigError::Invalid("base_delay_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.base_delay())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_take_defaults() {
        let config = ResilienceConfig::from_toml_str("max_retries = 5").unwrap();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.base_delay_ms, 1000);
        assert!(config.log_errors);
        assert!(config.emit_events);
    }

    #[test]
    fn zero_values_are_rejected() {
        assert!(matches!(
            ResilienceConfig::from_toml_str("max_retries = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ResilienceConfig::from_toml_str("base_delay_ms = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn parse_errors_surface() {
        assert!(matches!(
            ResilienceConfig::from_toml_str("max_retries = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_delay_ms = 250\nemit_events = false").unwrap();

        let config = ResilienceConfig::load(file.path()).unwrap();
        assert_eq!(config.base_delay(), Duration::from_millis(250));
        assert!(!config.emit_events);
        assert_eq!(config.retry_policy().max_retries, 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            ResilienceConfig::load("/definitely/not/here.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
