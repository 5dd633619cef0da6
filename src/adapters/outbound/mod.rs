pub mod logging;
pub mod memory_store;
pub mod postgres;

pub use logging::*;
pub use memory_store::*;
pub use postgres::*;
