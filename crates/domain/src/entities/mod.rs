//! Domain entities - Objects with identity and lifecycle

mod carrier_verification;
mod load;

pub use carrier_verification::{
    CarrierAddress, CarrierDetails, CarrierSnapshot, CarrierVerification,
};
pub use load::Load;
