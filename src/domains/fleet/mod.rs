pub mod fare;
pub mod movement;
pub mod plate;
pub mod ports;
pub mod trip;
pub mod vehicle;

pub use fare::*;
pub use movement::*;
pub use plate::*;
pub use ports::*;
pub use trip::*;
pub use vehicle::*;
