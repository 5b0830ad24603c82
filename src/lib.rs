pub mod curve;
pub mod ecdsa;
pub mod error;
pub mod format;
pub mod group;
pub mod message;
pub mod nonce;
pub mod point;
pub mod private_key;
pub mod utils;

pub use curve::{CurveParams, GeneratorParams};
pub use ecdsa::{Ecdsa, Signature};
pub use error::{EcdsaError, Result};
pub use group::FiniteCyclicGroup;
pub use point::{Coordinates, CurvePoint};
