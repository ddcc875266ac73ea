//! Weathergate - thin HTTP proxy for National Weather Service forecasts
//!
//! Accepts geographic coordinates, resolves the matching forecast through
//! a two-step dependent upstream lookup with bounded per-stage retries,
//! classifies the temperature into a coarse bucket, and returns a
//! normalized payload.

pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod retry;
pub mod validator;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use classify::{TemperatureCategory, TemperatureThresholds, classify};
pub use config::WeathergateConfig;
pub use error::{AppError, FieldError};
pub use models::{Coordinates, ForecastPeriod, ForecastResult};
pub use weather::{ForecastProvider, WeatherService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
