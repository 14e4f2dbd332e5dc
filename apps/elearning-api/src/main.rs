use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, Environment};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Initialize tracing before configuration so degraded-start warnings
    // are visible
    let environment = Environment::from_env();
    init_tracing(&environment);

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Connect to MongoDB with retry. A missing or unreachable store leaves
    // the service running in degraded mode: data operations fail with a
    // server error and /test reports the details.
    let (mongo_client, db) = match config.mongodb {
        Some(ref mongo_config) => {
            info!("Connecting to MongoDB at {}", mongo_config.url());
            match database::mongodb::connect_from_config_with_retry(mongo_config, None).await {
                Ok(client) => {
                    let db = client.database(mongo_config.database());
                    info!(
                        "Successfully connected to MongoDB database: {}",
                        mongo_config.database()
                    );
                    (Some(client), Some(db))
                }
                Err(e) => {
                    warn!("MongoDB unreachable, starting degraded: {}", e);
                    (None, None)
                }
            }
        }
        None => {
            warn!("MongoDB configuration absent, starting degraded");
            (None, None)
        }
    };

    // Initialize the application state
    let state = AppState {
        config,
        mongo_client,
        db,
    };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge root-level liveness/diagnostics and health endpoints
    let app = router
        .merge(api::diagnostics::router(state.clone()))
        .merge(health_router(state.config.app));

    info!("Starting e-learning API with production-ready shutdown (30s timeout)");

    // Production-ready server with graceful shutdown
    let client_for_cleanup = state.mongo_client.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            // MongoDB client closes automatically on drop
            drop(client_for_cleanup);
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("E-learning API shutdown complete");
    Ok(())
}
