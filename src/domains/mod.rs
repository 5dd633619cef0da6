pub mod fleet;
pub mod logger;

pub use fleet::*;
pub use logger::*;
