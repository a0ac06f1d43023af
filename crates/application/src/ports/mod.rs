//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod carrier_registry_port;
mod database_health_port;
mod load_store;

#[cfg(test)]
pub use carrier_registry_port::MockCarrierRegistryPort;
pub use carrier_registry_port::CarrierRegistryPort;
#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
pub use database_health_port::{DatabaseHealth, DatabaseHealthPort};
#[cfg(test)]
pub use load_store::MockLoadStore;
pub use load_store::LoadStore;
