//! Configuration management for the weathergate service
//!
//! Loads settings from an optional TOML file plus `WEATHERGATE_*`
//! environment overrides and validates them before the server starts.

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::classify::{DEFAULT_COLD_THRESHOLD_F, DEFAULT_HOT_THRESHOLD_F, TemperatureThresholds};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeathergateConfig {
    /// Inbound HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream weather API settings
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Temperature classification thresholds
    #[serde(default)]
    pub temperature: TemperatureConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Inbound HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origin; "*" allows any
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
    /// Maximum accepted request body size in bytes
    #[serde(default = "default_body_limit")]
    pub request_body_limit_bytes: usize,
}

/// Upstream weather API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Identifier sent as the User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Additional attempts after the first failed one, per stage
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Per-attempt request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Temperature classification thresholds in degrees Fahrenheit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureConfig {
    #[serde(default = "default_cold_threshold")]
    pub cold_threshold_f: f64,
    #[serde(default = "default_hot_threshold")]
    pub hot_threshold_f: f64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_port() -> u16 {
    3000
}

fn default_cors_origin() -> String {
    "*".to_string()
}

fn default_body_limit() -> usize {
    1024 * 1024
}

fn default_weather_base_url() -> String {
    "https://api.weather.gov".to_string()
}

fn default_user_agent() -> String {
    "WeatherService/1.0".to_string()
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_cold_threshold() -> f64 {
    DEFAULT_COLD_THRESHOLD_F
}

fn default_hot_threshold() -> f64 {
    DEFAULT_HOT_THRESHOLD_F
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_origin: default_cors_origin(),
            request_body_limit_bytes: default_body_limit(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            user_agent: default_user_agent(),
            retry_attempts: default_retry_attempts(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            cold_threshold_f: default_cold_threshold(),
            hot_threshold_f: default_hot_threshold(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TemperatureConfig {
    /// Thresholds value consumed by the classifier
    #[must_use]
    pub fn thresholds(&self) -> TemperatureThresholds {
        TemperatureThresholds {
            cold_max_f: self.cold_threshold_f,
            hot_min_f: self.hot_threshold_f,
        }
    }
}

impl WeathergateConfig {
    /// Load configuration from `config.toml` (if present) and environment
    /// variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("WEATHERGATE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: WeathergateConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port must be non-zero");
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            bail!("Weather API base URL must be a valid HTTP or HTTPS URL");
        }

        if self.weather.retry_attempts > 10 {
            bail!("Weather API retry attempts cannot exceed 10");
        }

        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            bail!("Weather API timeout must be between 1 and 300 seconds");
        }

        if self.temperature.cold_threshold_f >= self.temperature.hot_threshold_f {
            bail!("Cold temperature threshold must be below the hot threshold");
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            );
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WeathergateConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.cors_origin, "*");
        assert_eq!(config.server.request_body_limit_bytes, 1024 * 1024);
        assert_eq!(config.weather.base_url, "https://api.weather.gov");
        assert_eq!(config.weather.user_agent, "WeatherService/1.0");
        assert_eq!(config.weather.retry_attempts, 3);
        assert_eq!(config.weather.timeout_seconds, 10);
        assert_eq!(config.temperature.cold_threshold_f, 50.0);
        assert_eq!(config.temperature.hot_threshold_f, 80.0);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_base_url() {
        let mut config = WeathergateConfig::default();
        config.weather.base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base URL"));
    }

    #[test]
    fn test_validation_rejects_excessive_retries() {
        let mut config = WeathergateConfig::default();
        config.weather.retry_attempts = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_inverted_thresholds() {
        let mut config = WeathergateConfig::default();
        config.temperature.cold_threshold_f = 90.0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("threshold"));
    }

    #[test]
    fn test_validation_rejects_unknown_log_level() {
        let mut config = WeathergateConfig::default();
        config.logging.level = "verbose".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = WeathergateConfig::load_from_path(Some(PathBuf::from(
            "definitely-not-a-real-config.toml",
        )))
        .unwrap();
        assert_eq!(config.weather.base_url, "https://api.weather.gov");
        assert_eq!(config.weather.retry_attempts, 3);
    }

    #[test]
    fn test_thresholds_conversion() {
        let thresholds = TemperatureConfig::default().thresholds();
        assert_eq!(thresholds.cold_max_f, 50.0);
        assert_eq!(thresholds.hot_min_f, 80.0);
    }
}
