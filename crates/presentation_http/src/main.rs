//! Freightgate HTTP Server
//!
//! Main entry point for the carrier verification and load lookup API.

use std::{sync::Arc, time::Duration};

use application::{
    CarrierVerificationService, LoadService,
    ports::{DatabaseHealthPort, LoadStore},
};
use infrastructure::{
    AppConfig, Database, FmcsaCarrierRegistry, SqliteDatabaseHealth, SqliteLoadStore, init_tracing,
};
use presentation_http::{ApiKeyAuthLayer, RequestIdLayer, routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    init_tracing(
        &config.server.log_format,
        "freightgate_server=debug,presentation_http=debug,tower_http=debug,info",
    )?;

    info!("Freightgate v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        pool_size = config.database.pool_size,
        max_overflow = config.database.max_overflow,
        "Configuration loaded"
    );

    if !config.security.has_api_key() {
        warn!("API_KEY is not set, every protected request will be refused");
    }
    if config.fmcsa.web_key.is_none() {
        warn!("FMCSA_API_KEY is not set, carrier verification will fail");
    }

    // Persistence
    let db = Database::connect(&config.database).await?;
    let load_store = SqliteLoadStore::new(db.clone());
    if config.database.run_migrations {
        load_store.ensure_schema().await?;
    }
    let db_health: Arc<dyn DatabaseHealthPort> = Arc::new(SqliteDatabaseHealth::new(db.clone()));

    // Carrier registry
    let registry = FmcsaCarrierRegistry::with_config(config.fmcsa.to_fmcsa_config())?;

    let state = AppState {
        carrier_service: Arc::new(CarrierVerificationService::new(Arc::new(registry))),
        load_service: Arc::new(LoadService::new(Arc::new(load_store))),
        db_health,
    };

    let auth_layer = ApiKeyAuthLayer::new(config.security.api_key.clone());
    let app = routes::create_router(state, auth_layer);

    let cors_layer = routes::cors_layer(&config.server);

    // Last added is outermost; the request id span parents the trace span
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(RequestIdLayer::new());

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
