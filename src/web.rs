//! Server bootstrap: CORS, body limits, listen

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::{self, AppState};
use crate::config::ServerConfig;

pub async fn run(config: &ServerConfig, state: AppState) -> Result<()> {
    let cors = cors_layer(&config.cors_origin)?;

    let app = api::router(state)
        .layer(RequestBodyLimitLayer::new(config.request_body_limit_bytes))
        .layer(cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Weathergate listening at http://localhost:{}", config.port);
    axum::serve(listener, app)
        .await
        .with_context(|| "Server error")?;
    Ok(())
}

fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        Ok(layer.allow_origin(Any))
    } else {
        let origin: HeaderValue = origin
            .parse()
            .with_context(|| format!("Invalid CORS origin: {origin}"))?;
        Ok(layer.allow_origin(origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_wildcard_and_origin() {
        assert!(cors_layer("*").is_ok());
        assert!(cors_layer("https://example.com").is_ok());
        assert!(cors_layer("not an origin\u{7f}").is_err());
    }
}
