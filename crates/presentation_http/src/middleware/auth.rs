//! API key authentication middleware
//!
//! Validates the `X-API-Key` header against the single configured key using
//! constant-time comparison. When no key is configured every request to a
//! protected route is refused.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::error::ApiError;

/// Header carrying the caller's API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Outcome of checking a presented key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyCheck {
    Accepted,
    Missing,
    Invalid,
}

impl KeyCheck {
    /// Message returned to the caller, `None` when the key was accepted
    const fn rejection(self) -> Option<&'static str> {
        match self {
            Self::Accepted => None,
            Self::Missing => Some("Missing API key"),
            Self::Invalid => Some("Invalid API key"),
        }
    }
}

/// Holds the configured API key
#[derive(Clone, Default)]
pub struct ApiKeyGate {
    expected: Option<SecretString>,
}

impl std::fmt::Debug for ApiKeyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl ApiKeyGate {
    /// Create a gate for the given key; `None` or an empty key refuses everything
    #[must_use]
    pub fn new(expected: Option<SecretString>) -> Self {
        let expected = expected.filter(|key| !key.expose_secret().is_empty());
        Self { expected }
    }

    /// Whether a key has been configured
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.expected.is_some()
    }

    fn check(&self, presented: Option<&[u8]>) -> KeyCheck {
        let Some(presented) = presented else {
            return KeyCheck::Missing;
        };

        let Some(expected) = &self.expected else {
            return KeyCheck::Invalid;
        };

        if bool::from(expected.expose_secret().as_bytes().ct_eq(presented)) {
            KeyCheck::Accepted
        } else {
            KeyCheck::Invalid
        }
    }
}

/// Layer that applies API key authentication
#[derive(Clone, Debug)]
pub struct ApiKeyAuthLayer {
    gate: Arc<ApiKeyGate>,
}

impl ApiKeyAuthLayer {
    /// Create a new API key auth layer
    #[must_use]
    pub fn new(expected: Option<SecretString>) -> Self {
        Self {
            gate: Arc::new(ApiKeyGate::new(expected)),
        }
    }

    /// Whether a key has been configured
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.gate.is_configured()
    }
}

impl<S> Layer<S> for ApiKeyAuthLayer {
    type Service = ApiKeyAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiKeyAuth {
            inner,
            gate: Arc::clone(&self.gate),
        }
    }
}

/// Middleware service for API key authentication
#[derive(Clone, Debug)]
pub struct ApiKeyAuth<S> {
    inner: S,
    gate: Arc<ApiKeyGate>,
}

impl<S> Service<Request> for ApiKeyAuth<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let presented = req.headers().get(API_KEY_HEADER).map(|v| v.as_bytes());
        let Some(message) = self.gate.check(presented).rejection() else {
            debug!("API key accepted");
            let mut inner = self.inner.clone();
            return Box::pin(async move { inner.call(req).await });
        };

        let path = req.uri().path().to_string();
        warn!(path = %path, reason = message, "Rejected request");

        Box::pin(async move { Ok(ApiError::Forbidden(message.to_string()).into_response()) })
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, routing::get};
    use tower::ServiceExt;

    use super::*;

    async fn test_handler() -> &'static str {
        "ok"
    }

    fn create_test_router(key: Option<&str>) -> Router {
        Router::new()
            .route("/test", get(test_handler))
            .layer(ApiKeyAuthLayer::new(
                key.map(|k| SecretString::from(k.to_string())),
            ))
    }

    fn request(key: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/test");
        if let Some(key) = key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn error_message(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn matching_key_passes() {
        let response = create_test_router(Some("secret"))
            .oneshot(request(Some("secret")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_header_is_forbidden() {
        let response = create_test_router(Some("secret"))
            .oneshot(request(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_message(response).await, "Missing API key");
    }

    #[tokio::test]
    async fn wrong_key_is_forbidden() {
        let response = create_test_router(Some("secret"))
            .oneshot(request(Some("secreT")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_message(response).await, "Invalid API key");
    }

    #[tokio::test]
    async fn prefix_of_key_is_forbidden() {
        let response = create_test_router(Some("secret"))
            .oneshot(request(Some("sec")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unconfigured_key_refuses_everything() {
        let response = create_test_router(None)
            .oneshot(request(Some("anything")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_message(response).await, "Invalid API key");
    }

    #[tokio::test]
    async fn empty_configured_key_accepts_nothing() {
        let response = create_test_router(Some(""))
            .oneshot(request(Some("")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn debug_does_not_reveal_key() {
        let layer = ApiKeyAuthLayer::new(Some(SecretString::from("hunter2".to_string())));
        let debug = format!("{layer:?}");
        assert!(!debug.contains("hunter2"));
        assert!(layer.is_configured());
    }

    #[test]
    fn only_rejections_carry_a_message() {
        assert_eq!(KeyCheck::Accepted.rejection(), None);
        assert_eq!(KeyCheck::Missing.rejection(), Some("Missing API key"));
        assert_eq!(KeyCheck::Invalid.rejection(), Some("Invalid API key"));
    }
}
