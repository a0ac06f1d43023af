//! Value Objects - Immutable, identity-less domain primitives

mod mc_number;
mod reference_number;

pub use mc_number::McNumber;
pub use reference_number::ReferenceNumber;
