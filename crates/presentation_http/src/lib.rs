//! Freightgate HTTP presentation layer
//!
//! Routes, handlers, API key gate and error mapping for the carrier
//! verification and load lookup API.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use middleware::{ApiKeyAuthLayer, RequestIdLayer};
pub use routes::{API_PREFIX, create_router};
pub use state::AppState;
