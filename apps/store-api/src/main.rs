//! Store API - REST server for users and products

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");

    // The database may still be starting; retry with backoff
    let retry = RetryConfig::new()
        .with_max_retries(5)
        .with_initial_delay(500);
    let db = database::postgres::connect_from_config_with_retry(&config.database, retry).await?;

    info!("Successfully connected to PostgreSQL");

    let state = AppState {
        config: config.clone(),
        db,
    };

    // Build REST router
    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::health::ready_router(state.clone()));

    info!("Starting Store API on port {}", config.server.port);

    // Run server with graceful shutdown
    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing PostgreSQL pool");
        state.db.close().await;
        info!("PostgreSQL pool closed");
    })
    .await?;

    info!("Store API shutdown complete");
    Ok(())
}
