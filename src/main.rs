use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use soundside::api::AppState;
use soundside::config::AppConfig;
use soundside::{cache, web};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let availability = config.availability();
    info!(
        places = availability.places,
        geocoding = availability.geocoding,
        weather = availability.weather,
        directory = availability.directory,
        "provider availability snapshot"
    );

    // The cache is an optimization; a failed init just disables it
    if let Err(err) = cache::init(&config.cache_dir) {
        warn!(error = %err, "cache unavailable, continuing without it");
    }

    let port = config.port;
    let state = Arc::new(AppState::new(&config));
    web::run(port, state).await
}
