use anyhow::Result;
use tracing::info;

use travelguide::{TravelGuideConfig, api::AppState, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = TravelGuideConfig::load()?;
    let _telemetry = telemetry::init(&config.logging)?;

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("A rustls crypto provider was already installed");
    }

    if config.weather.api_key.is_none() {
        info!("No weather API key configured, serving synthesized conditions");
    }

    let state = AppState::from_config(&config)?;
    info!(
        "Serving {} destinations (TravelGuide {})",
        state.catalog.len(),
        travelguide::VERSION
    );

    web::run(&config.server, state).await
}
