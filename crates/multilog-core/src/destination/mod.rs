//! Log destinations
//!
//! Every destination embeds a [`DestinationCore`] for its identifier, level
//! and default properties, and implements [`Destination::log`].

mod console;
mod crash;
mod file;
mod memory;
mod noop;
mod state;
mod traits;

pub use console::ConsoleDestination;
pub use crash::{CrashReport, CrashReporter, CrashReporterDestination, MemoryCrashReporter};
pub use file::FileDestination;
pub use memory::{MemoryDestination, RecordedEvent};
pub use noop::NoOpDestination;
pub use state::DestinationCore;
pub use traits::{Destination, DestinationError, DestinationResult, SharedDestination};
