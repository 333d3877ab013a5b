mod domain;
mod clients;

mod api;
mod app_system;
mod ui;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod product_actor;

use tracing::info;

use crate::api::{create_router, AppState};
use crate::app_system::{setup_tracing, AppError, InventorySystem, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ServerConfig::default();
    info!(addr = %config.bind_addr, "Starting inventory demo");

    // The schema holds its own client clone; the actor lives until both are dropped.
    let system = InventorySystem::new(&config);
    let app = create_router(AppState::new(system.product_client.clone(), &config));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| AppError::Bind { addr: config.bind_addr, source })?;
    info!(
        "Serving UI at http://{0}/ and GraphQL at http://{0}/graphql",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .map_err(AppError::Serve)?;

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
