//! API error handling
//!
//! Maps application errors onto HTTP responses. Internal failures are
//! reported with a generic message; their detail only goes to the log.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Message returned for every internal failure
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A dependency failed; the cause is shown to the caller
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Anything else; the cause is logged but never shown
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl ApiError {
    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::Upstream(_) => "upstream_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();

        let message = match self {
            Self::BadRequest(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Upstream(msg) => msg,
            Self::Internal(msg) => {
                error!(error = %msg, "Request failed with internal error");
                INTERNAL_MESSAGE.to_string()
            },
        };

        let body = ErrorResponse {
            error: message,
            code,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidInput(msg) => Self::BadRequest(msg),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::ExternalService(msg) | ApplicationError::Configuration(msg) => {
                Self::Upstream(msg)
            },
            ApplicationError::ResourceExhausted(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use domain::DomainError;

    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn domain_error_converts_to_bad_request() {
        let source = ApplicationError::Domain(DomainError::MissingIdentifier("MC number"));
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::BadRequest(msg) if msg == "MC number is required"));
    }

    #[test]
    fn invalid_input_converts_to_bad_request() {
        let result: ApiError = ApplicationError::InvalidInput("bad".into()).into();
        assert_eq!(result.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_keeps_message() {
        let result: ApiError =
            ApplicationError::NotFound("Load with reference number X1 not found".into()).into();
        assert!(matches!(result, ApiError::NotFound(msg) if msg.contains("X1")));
    }

    #[test]
    fn upstream_failures_convert_to_upstream() {
        let external: ApiError = ApplicationError::ExternalService("HTTP 502: bad".into()).into();
        let config: ApiError =
            ApplicationError::Configuration("FMCSA API key not configured".into()).into();

        assert!(matches!(external, ApiError::Upstream(_)));
        assert!(matches!(config, ApiError::Upstream(_)));
    }

    #[test]
    fn pool_exhaustion_converts_to_internal() {
        let result: ApiError = ApplicationError::ResourceExhausted("pool".into()).into();
        assert!(matches!(result, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn upstream_response_carries_cause() {
        let (status, body) = body_of(ApiError::Upstream("FMCSA API key not configured".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "FMCSA API key not configured");
        assert_eq!(body.code, "upstream_error");
    }

    #[tokio::test]
    async fn internal_response_hides_cause() {
        let (status, body) =
            body_of(ApiError::Internal("no such table: loads".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "An internal error occurred");
        assert_eq!(body.code, "internal_error");
    }

    #[tokio::test]
    async fn forbidden_response() {
        let (status, body) = body_of(ApiError::Forbidden("Invalid API key".into())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.error, "Invalid API key");
    }
}
