use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{LazyClient, MongoError, verify_with_retry};
use tracing::{error, info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    // A missing .env file is fine; the process environment still applies.
    match dotenvy::dotenv() {
        Err(e) if !e.not_found() => return Err(e.into()),
        _ => {}
    }

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(
        "Using MongoDB at {} (database: {})",
        config.mongodb.redacted_url(),
        config.mongodb.database()
    );

    // Only a malformed URL stops startup; anything else leaves the catalog routes failing
    // until the client can be built.
    let mongo = LazyClient::new(config.mongodb.clone());
    match mongo.get().await {
        Ok(client) => match verify_with_retry(&client, &config.mongodb).await {
            Ok(()) => info!("Successfully connected to MongoDB"),
            Err(e) => degraded(&e),
        },
        Err(e) if e.is_malformed_uri() => return Err(e.into()),
        Err(e) => degraded(&e),
    }

    let state = AppState { config, mongo };

    let api_routes = api::routes(&state).merge(health_router(state.config.app));
    let app = create_router::<openapi::ApiDoc>(api_routes, &state.config.cors)?;

    info!(
        "Starting {} v{} (shutdown timeout {:?})",
        state.config.app.name, state.config.app.version, state.config.shutdown_timeout
    );

    let mongo = state.mongo.clone();
    create_production_app(
        app,
        &state.config.server,
        state.config.shutdown_timeout,
        async move {
            if let Some(client) = mongo.built() {
                info!("Shutting down: closing MongoDB connections");
                client.shutdown().await;
                info!("MongoDB connections closed");
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}

fn degraded(err: &MongoError) {
    error!("MongoDB is unreachable: {}", err);
    warn!("Serving in degraded mode; catalog routes fail until MongoDB is reachable");
}
