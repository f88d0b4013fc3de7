//! Destination registry and logging macros

mod logger;
mod macros;

pub use logger::Logger;
