//! Route definitions

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header::CONTENT_TYPE},
    routing::get,
};
use infrastructure::ServerConfig;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::{handlers, middleware::ApiKeyAuthLayer, state::AppState};

/// Prefix of the authenticated API
pub const API_PREFIX: &str = "/api/v1";

/// Create the main router with all routes
///
/// Only the `/api/v1` routes sit behind the API key gate; `/` and `/health`
/// stay open.
pub fn create_router(state: AppState, auth: ApiKeyAuthLayer) -> Router {
    let protected = Router::new()
        // Carrier verification
        .route(
            "/verify_carrier/{mc_number}",
            get(handlers::carriers::verify_carrier_by_path),
        )
        .route(
            "/verify_carrier/",
            get(handlers::carriers::verify_carrier_by_query),
        )
        .route(
            "/verify_carrier",
            get(handlers::carriers::verify_carrier_by_query),
        )
        // Load lookup
        .route(
            "/loads/{reference_number}",
            get(handlers::loads::get_load_by_path),
        )
        .route("/loads/", get(handlers::loads::get_load_by_query))
        .route("/loads", get(handlers::loads::get_load_by_query))
        .route_layer(auth);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .nest(API_PREFIX, protected)
        .with_state(state)
}

/// Build the CORS layer for the configured origins
///
/// An empty or `*` origin list allows any origin without credentials. An
/// explicit list allows credentials, so the allowed headers are listed too.
#[must_use]
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|o| {
            o.parse()
                .inspect_err(|_| warn!(origin = %o, "Ignoring unparsable CORS origin"))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static("x-api-key"),
            HeaderName::from_static("x-request-id"),
        ])
        .allow_credentials(true)
}
