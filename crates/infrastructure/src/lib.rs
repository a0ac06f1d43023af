//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the SQLite load
//! store and health probe, the FMCSA registry adapter, configuration
//! loading and logging bootstrap.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::FmcsaCarrierRegistry;
pub use config::{AppConfig, DatabaseConfig, FmcsaAppConfig, SecurityConfig, ServerConfig};
pub use persistence::{Database, DatabaseError, SqliteDatabaseHealth, SqliteLoadStore};
pub use telemetry::{LogFormat, TelemetryError, init_tracing};
