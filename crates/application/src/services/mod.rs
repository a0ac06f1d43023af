//! Application services - Use case implementations

mod carrier_service;
mod ingest_service;
mod load_service;

pub use carrier_service::CarrierVerificationService;
pub use ingest_service::{CSV_COLUMNS, IngestReport, IngestService};
pub use load_service::LoadService;
