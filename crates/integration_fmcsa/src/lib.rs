//! FMCSA carrier registry integration
//!
//! Client for the FMCSA QCMobile API
//! (<https://mobile.fmcsa.dot.gov/QCDevsite/docs/qcApi>).
//! Looks up carriers by MC docket number using a web key.

pub mod client;
mod models;

pub use client::{CarrierLookup, FmcsaClient, FmcsaConfig, FmcsaError};
pub use models::Carrier;
