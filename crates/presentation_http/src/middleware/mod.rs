//! HTTP middleware components
//!
//! API key authentication for the protected routes and request ID
//! correlation for every route.

pub mod auth;
pub mod request_id;

pub use auth::{API_KEY_HEADER, ApiKeyAuth, ApiKeyAuthLayer, ApiKeyGate};
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdLayer, RequestIdService};
