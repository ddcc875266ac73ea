//! HTTP surface: forecast and health endpoints

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};
use chrono::Utc;

use crate::error::AppError;
use crate::models::{ForecastResult, HealthResponse, SuccessResponse};
use crate::validator;
use crate::weather::ForecastProvider;

/// Shared state for the HTTP handlers; the provider is injected so
/// tests can substitute a stub.
#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn ForecastProvider>,
}

impl AppState {
    #[must_use]
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self { provider }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/forecast/{coordinates}", get(get_forecast))
        .route("/health", get(health))
        .with_state(state)
}

/// `GET /v1/forecast/{lat},{lon}`
async fn get_forecast(
    State(state): State<AppState>,
    Path(coordinates): Path<String>,
) -> Result<Json<SuccessResponse<ForecastResult>>, AppError> {
    let coordinates = validator::validate(&coordinates)?;
    let forecast = state.provider.get_forecast(coordinates).await?;
    Ok(Json(SuccessResponse::new(forecast)))
}

/// `GET /health` — unconditional liveness probe
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TemperatureCategory;
    use crate::models::Coordinates;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tower::ServiceExt;

    struct StubProvider {
        calls: AtomicU32,
        response: fn(Coordinates) -> crate::Result<ForecastResult>,
    }

    #[async_trait::async_trait]
    impl ForecastProvider for StubProvider {
        async fn get_forecast(&self, coordinates: Coordinates) -> crate::Result<ForecastResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.response)(coordinates)
        }
    }

    fn make_app(response: fn(Coordinates) -> crate::Result<ForecastResult>) -> (Router, Arc<StubProvider>) {
        let provider = Arc::new(StubProvider {
            calls: AtomicU32::new(0),
            response,
        });
        (router(AppState::new(provider.clone())), provider)
    }

    async fn send(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn cold_forecast(coordinates: Coordinates) -> crate::Result<ForecastResult> {
        Ok(ForecastResult {
            location: coordinates,
            name: "This Afternoon".to_string(),
            short_forecast: "Partly Cloudy".to_string(),
            temperature: TemperatureCategory::Cold,
        })
    }

    #[tokio::test]
    async fn test_forecast_success_envelope() {
        let (app, provider) = make_app(cold_forecast);
        let (status, body) = send(app, "/v1/forecast/39.7456,-97.0892").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["name"], "This Afternoon");
        assert_eq!(body["data"]["temperature"], "cold");
        assert_eq!(body["data"]["location"]["latitude"], 39.7456);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_coordinates_never_reach_provider() {
        let (app, provider) = make_app(cold_forecast);
        let (status, body) = send(app, "/v1/forecast/999,-97.0892").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "ValidationError");
        assert_eq!(body["details"][0]["field"], "latitude");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_separator_is_format_error() {
        let (app, provider) = make_app(cold_forecast);
        let (status, body) = send(app, "/v1/forecast/39.7456").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ValidationError");
        assert_eq!(
            body["message"],
            "Invalid coordinates format. Expected: {latitude},{longitude}"
        );
        assert!(body.get("details").is_none());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_errors_map_to_status() {
        let (app, _) = make_app(|_| Err(AppError::not_found("Location not found")));
        let (status, body) = send(app, "/v1/forecast/39.7456,-97.0892").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NotFoundError");

        let (app, _) = make_app(|_| Err(AppError::service_unavailable("upstream down")));
        let (status, body) = send(app, "/v1/forecast/39.7456,-97.0892").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "ServiceUnavailableError");

        let (app, _) = make_app(|_| Err(AppError::internal("boom")));
        let (status, body) = send(app, "/v1/forecast/39.7456,-97.0892").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "InternalServerError");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _) = make_app(cold_forecast);
        let (status, body) = send(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }
}
