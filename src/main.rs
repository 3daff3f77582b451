//! kona - A lightweight, read-only SQLite-to-API server for daily climate observations
//!
//! This is the main entry point for the kona application.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use kona::db::ClimateStore;
use kona::logging::{create_http_trace_layer, init_tracing, log_dataset_stats};
use kona::{handlers, AppState, Config, KonaError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration; clap reports CLI errors on its own
    let (config, database_path) = Config::load()?;

    init_tracing(&config.log_level);

    info!("Starting kona v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!("Opening climate database: {:?}", database_path);

    // Open the read-only pool
    let store = ClimateStore::connect(&database_path, config.database.max_connections)
        .await
        .map_err(|e| {
            error!("Failed to open climate database: {}", e);
            e
        })?;

    // The fixed queries rely on the declared schema; refuse to serve without it
    store.verify_schema().await.map_err(|e| {
        error!("Schema verification failed: {}", e);
        e
    })?;

    let summary = store.dataset_summary().await?;
    log_dataset_stats(&database_path.display().to_string(), &summary);

    // Wrap in Arc for sharing
    let state = Arc::new(AppState::new(config.clone(), store));

    // Build the router
    let app = handlers::api_router(state)
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive());

    // Create the server address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| KonaError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| KonaError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    // Set up graceful shutdown
    let shutdown_future = shutdown_signal();

    info!("Server is ready to accept connections");

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_future)
        .await
        .map_err(|e| KonaError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
