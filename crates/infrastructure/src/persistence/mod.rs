//! Persistence module
//!
//! sqlx-based SQLite storage for freight loads, plus the pool that backs it.

pub mod connection;
pub mod database_health;
pub mod error;
pub mod load_store;

pub use connection::{Database, DatabaseError, Session};
pub use database_health::SqliteDatabaseHealth;
pub use error::map_sqlx_error;
pub use load_store::SqliteLoadStore;
