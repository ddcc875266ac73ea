//! Coarse temperature classification

use serde::Serialize;

/// Temperatures at or below this are "cold" (degrees Fahrenheit)
pub const DEFAULT_COLD_THRESHOLD_F: f64 = 50.0;

/// Temperatures at or above this are "hot" (degrees Fahrenheit)
pub const DEFAULT_HOT_THRESHOLD_F: f64 = 80.0;

/// Coarse temperature bucket exposed in the forecast payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureCategory {
    Cold,
    Moderate,
    Hot,
}

/// Classification boundaries, in degrees Fahrenheit.
///
/// Both boundaries are inclusive toward their extreme: a reading equal to
/// `cold_max_f` is cold, one equal to `hot_min_f` is hot.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureThresholds {
    pub cold_max_f: f64,
    pub hot_min_f: f64,
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self {
            cold_max_f: DEFAULT_COLD_THRESHOLD_F,
            hot_min_f: DEFAULT_HOT_THRESHOLD_F,
        }
    }
}

/// Map a temperature to its category. Pure and total.
#[must_use]
pub fn classify(temp_f: f64, thresholds: TemperatureThresholds) -> TemperatureCategory {
    if temp_f <= thresholds.cold_max_f {
        TemperatureCategory::Cold
    } else if temp_f >= thresholds.hot_min_f {
        TemperatureCategory::Hot
    } else {
        TemperatureCategory::Moderate
    }
}
