//! Data model for the weathergate service

use serde::{Deserialize, Serialize};

use crate::classify::TemperatureCategory;

/// A validated latitude/longitude pair.
///
/// Fields are private on purpose: the only way to obtain one is through
/// [`crate::validator::validate`], so out-of-range values never reach the
/// lookup pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Invariant: callers have already range-checked both values.
    pub(crate) fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub fn latitude(self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// One forecast period as delivered by the upstream forecast endpoint.
/// Only the first (current) period is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPeriod {
    pub name: String,
    #[serde(rename = "shortForecast")]
    pub short_forecast: String,
    /// Temperature in degrees Fahrenheit
    pub temperature: i64,
}

/// Normalized forecast payload returned to the client
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    pub location: Coordinates,
    pub name: String,
    #[serde(rename = "shortForecast")]
    pub short_forecast: String,
    pub temperature: TemperatureCategory,
}

/// Envelope for every successful response
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body of the unconditional health endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}
