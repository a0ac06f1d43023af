//! Welcome and health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::state::AppState;

/// Welcome response for `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

impl HealthResponse {
    fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            database: "connected".to_string(),
        }
    }

    fn unhealthy() -> Self {
        Self {
            status: "unhealthy".to_string(),
            database: "disconnected".to_string(),
        }
    }
}

/// Unauthenticated welcome ping
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Freightgate carrier API".to_string(),
    })
}

/// Run a trivial store query and report connectivity
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.db_health.check_health().await {
        Ok(_) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(e) => {
            error!(error = %e, "Database health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse::unhealthy()),
            )
        },
    }
}
