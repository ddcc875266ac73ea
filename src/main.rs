use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use weathergate::api::AppState;
use weathergate::config::{LoggingConfig, WeathergateConfig};
use weathergate::weather::WeatherService;

#[tokio::main]
async fn main() -> Result<()> {
    let config = WeathergateConfig::load()?;
    init_tracing(&config.logging);

    let service = WeatherService::new(&config)?;
    let state = AppState::new(Arc::new(service));

    weathergate::web::run(&config.server, state).await
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));

    if logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
