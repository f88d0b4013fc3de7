//! Multilog Core
//!
//! Multi-destination event logging.
//! Callers emit leveled events (debug/info/warning/uiEvent/error) with names,
//! messages and key-value properties; a [`Logger`] fans each event out to the
//! destinations whose level accepts it.
//!
//! ## Destinations
//!
//! The `destination` module provides the [`Destination`] trait and the
//! built-in sinks:
//! - `ConsoleDestination` for stdout/stderr
//! - `FileDestination` over the rotating on-disk store in `file_store`
//! - `CrashReporterDestination` over a host-provided `CrashReporter`
//! - `MemoryDestination` and `NoOpDestination` for tests and placeholders
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use multilog_core::destination::{ConsoleDestination, FileDestination};
//! use multilog_core::file_store::FileStoreConfig;
//! use multilog_core::{log_info, Logger, LogLevel};
//!
//! let file = FileDestination::new(
//!     "com.example.file",
//!     LogLevel::ALL,
//!     FileStoreConfig::new().with_max_files(5),
//! )?;
//! let logger = Logger::new(vec![
//!     Arc::new(ConsoleDestination::new("com.example.console", LogLevel::INFO)),
//!     Arc::new(file),
//! ]);
//!
//! log_info!(logger, "launch", "cold start in {} ms", 420);
//! # Ok::<(), multilog_core::file_store::FileStoreError>(())
//! ```

pub mod types;
pub mod destination;
pub mod file_store;
pub mod registry;

// Re-export commonly used types
pub use types::{
    LogLevel, Properties, Location, EventError,
    compose_attributes, properties_from,
};

pub use destination::{
    Destination, DestinationCore, DestinationError, DestinationResult, SharedDestination,
    ConsoleDestination, FileDestination, CrashReporterDestination, CrashReporter, CrashReport,
    MemoryDestination, NoOpDestination,
};

pub use file_store::{FileStoreConfig, FileStoreError, FileStoreResult, RotatingFileStore};

pub use registry::Logger;
