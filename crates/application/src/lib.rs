//! Application layer - Use cases and orchestration
//!
//! Contains the carrier verification, load lookup and batch ingest use
//! cases together with the port definitions they depend on.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
