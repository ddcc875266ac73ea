//! Upstream lookup pipeline for the National Weather Service API
//!
//! Fetching a forecast is a two-step dependent lookup: resolve the
//! forecast URL for a coordinate pair via the points endpoint, then fetch
//! the forecast periods from that URL. Each stage runs under its own
//! fresh retry budget; a 404 from either endpoint aborts retrying
//! outright. All attempts are logged under a per-request trace id.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use rand::RngExt;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::classify::{TemperatureThresholds, classify};
use crate::config::WeathergateConfig;
use crate::error::AppError;
use crate::models::{Coordinates, ForecastPeriod, ForecastResult};
use crate::retry::{FetchFailure, fetch_with_retry};

/// Provider of normalized forecast payloads. The HTTP layer depends on
/// this trait so tests can swap in a stub.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn get_forecast(&self, coordinates: Coordinates) -> crate::Result<ForecastResult>;
}

/// Wire shape of the points endpoint; only the forecast URL is consumed.
#[derive(Debug, Deserialize)]
struct PointResponse {
    #[serde(default)]
    properties: PointProperties,
}

#[derive(Debug, Default, Deserialize)]
struct PointProperties {
    #[serde(default)]
    forecast: Option<String>,
}

/// Wire shape of the forecast endpoint; only the periods are consumed.
#[derive(Debug, Deserialize)]
struct GridForecastResponse {
    #[serde(default)]
    properties: ForecastProperties,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Vec<ForecastPeriod>,
}

/// Client for the two-stage forecast lookup
pub struct WeatherService {
    client: Client,
    base_url: String,
    retry_attempts: u32,
    thresholds: TemperatureThresholds,
}

impl WeatherService {
    /// Build a service from configuration.
    ///
    /// The per-attempt timeout lives on the HTTP client, so a hung
    /// upstream consumes exactly one attempt of the retry budget.
    pub fn new(config: &WeathergateConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.weather.timeout_seconds.into()))
            .user_agent(config.weather.user_agent.clone())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.weather.base_url.trim_end_matches('/').to_string(),
            retry_attempts: config.weather.retry_attempts,
            thresholds: config.temperature.thresholds(),
        })
    }

    async fn lookup(&self, trace_id: &str, coordinates: Coordinates) -> crate::Result<ForecastResult> {
        let forecast_url = self.resolve_forecast_url(trace_id, coordinates).await?;
        let periods = self.fetch_periods(trace_id, &forecast_url).await?;
        self.assemble(coordinates, periods)
    }

    /// Stage 1: resolve the forecast URL for a coordinate pair
    async fn resolve_forecast_url(
        &self,
        trace_id: &str,
        coordinates: Coordinates,
    ) -> crate::Result<String> {
        let url = format!("{}/points/{}", self.base_url, coordinates);
        fetch_with_retry(
            || self.resolve_once(trace_id, &url),
            self.retry_attempts,
            |attempt, error, retries_left| {
                warn!(
                    trace_id,
                    stage = "resolve",
                    attempt,
                    retries_left,
                    error = %error,
                    "Forecast URL attempt failed"
                );
            },
        )
        .await
    }

    async fn resolve_once(&self, trace_id: &str, url: &str) -> Result<String, FetchFailure> {
        debug!(trace_id, url, "Fetching forecast URL");
        let point: PointResponse = self.get_json(url).await?;
        match point.properties.forecast {
            Some(forecast_url) if !forecast_url.trim().is_empty() => Ok(forecast_url),
            _ => Err(FetchFailure::Transient(AppError::service_unavailable(
                "Invalid response from weather service",
            ))),
        }
    }

    /// Stage 2: fetch the forecast periods from the resolved URL
    async fn fetch_periods(
        &self,
        trace_id: &str,
        url: &str,
    ) -> crate::Result<Vec<ForecastPeriod>> {
        fetch_with_retry(
            || self.periods_once(trace_id, url),
            self.retry_attempts,
            |attempt, error, retries_left| {
                warn!(
                    trace_id,
                    stage = "forecast",
                    attempt,
                    retries_left,
                    error = %error,
                    "Forecast data attempt failed"
                );
            },
        )
        .await
    }

    async fn periods_once(
        &self,
        trace_id: &str,
        url: &str,
    ) -> Result<Vec<ForecastPeriod>, FetchFailure> {
        debug!(trace_id, url, "Fetching forecast data");
        let forecast: GridForecastResponse = self.get_json(url).await?;
        if forecast.properties.periods.is_empty() {
            return Err(FetchFailure::Transient(AppError::service_unavailable(
                "No forecast periods available",
            )));
        }
        Ok(forecast.properties.periods)
    }

    /// One GET against the upstream, with the failure tagged for the
    /// retry wrapper at the point it is detected.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchFailure> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/geo+json")
            .send()
            .await
            .map_err(|error| {
                FetchFailure::Transient(AppError::service_unavailable(format!(
                    "Weather service request failed: {error}"
                )))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchFailure::Abort(AppError::not_found(
                "Location not found. Coordinates may be in an unsupported area.",
            )));
        }

        if !response.status().is_success() {
            return Err(FetchFailure::Transient(AppError::service_unavailable(
                format!(
                    "Weather service returned status {}",
                    response.status().as_u16()
                ),
            )));
        }

        response.json().await.map_err(|error| {
            FetchFailure::Transient(AppError::service_unavailable(format!(
                "Invalid response from weather service: {error}"
            )))
        })
    }

    /// Final assembly: first period + category. Not wrapped in the retry
    /// fetcher; stage 2 already guarantees a non-empty list, so an empty
    /// one here signals a defect rather than a transient condition.
    fn assemble(
        &self,
        coordinates: Coordinates,
        periods: Vec<ForecastPeriod>,
    ) -> crate::Result<ForecastResult> {
        let today = periods.into_iter().next().ok_or_else(|| {
            AppError::service_unavailable("No today forecast period available")
        })?;

        #[allow(clippy::cast_precision_loss)]
        let temperature = classify(today.temperature as f64, self.thresholds);

        Ok(ForecastResult {
            location: coordinates,
            name: today.name,
            short_forecast: today.short_forecast,
            temperature,
        })
    }
}

#[async_trait]
impl ForecastProvider for WeatherService {
    async fn get_forecast(&self, coordinates: Coordinates) -> crate::Result<ForecastResult> {
        let trace_id = generate_trace_id();
        info!(
            trace_id,
            latitude = coordinates.latitude(),
            longitude = coordinates.longitude(),
            "Fetching weather forecast"
        );

        let result = self.lookup(&trace_id, coordinates).await;
        match &result {
            Ok(forecast) => info!(
                trace_id,
                name = %forecast.name,
                category = ?forecast.temperature,
                "Weather forecast retrieved"
            ),
            Err(err) => error!(trace_id, error = %err, "Failed to fetch weather forecast"),
        }
        result
    }
}

/// Opaque per-request identifier: unix millis plus a random hex suffix,
/// threaded through both lookup stages for correlated diagnostics.
fn generate_trace_id() -> String {
    let suffix: u32 = rand::rng().random_range(0..0x1000_0000);
    format!("{}-{:07x}", Utc::now().timestamp_millis(), suffix)
}
