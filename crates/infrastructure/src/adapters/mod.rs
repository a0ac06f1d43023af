//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod fmcsa_adapter;

pub use fmcsa_adapter::FmcsaCarrierRegistry;
