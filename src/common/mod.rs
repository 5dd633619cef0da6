pub mod error;
pub mod rounding;

pub use error::*;
pub use rounding::*;
