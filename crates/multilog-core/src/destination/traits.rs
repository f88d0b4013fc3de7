//! Destination trait definition

use std::sync::Arc;

use thiserror::Error;

use crate::file_store::FileStoreError;
use crate::types::{EventError, Location, LogLevel, Properties};
use super::state::DestinationCore;

/// Errors returned by the optional destination capabilities
#[derive(Error, Debug)]
pub enum DestinationError {
    #[error("Destination {identifier} does not support purging logs")]
    PurgeNotSupported { identifier: String },

    #[error("Log storage error: {0}")]
    Store(#[from] FileStoreError),
}

pub type DestinationResult<T> = Result<T, DestinationError>;

/// A named sink that receives fanned-out log events
///
/// Implementations:
/// - `ConsoleDestination`: stdout/stderr
/// - `FileDestination`: rotating log files
/// - `CrashReporterDestination`: structured reports for a crash reporting backend
/// - `MemoryDestination`: records events in memory, for tests
/// - `NoOpDestination`: discards everything
///
/// Identifier, level and default properties live in a [`DestinationCore`]
/// that every implementation embeds; only [`log`](Destination::log) must be
/// written by hand. Error logging and purging have defaults that concrete
/// destinations override when they can do better.
pub trait Destination: Send + Sync {
    /// Shared identifier/level/default-properties state
    fn core(&self) -> &DestinationCore;

    /// Deliver one event
    ///
    /// `properties` is whatever the caller handed to the registry, or this
    /// destination's default properties when the caller passed none.
    fn log(
        &self,
        level: LogLevel,
        event_name: &str,
        message: Option<&str>,
        properties: Option<&Properties>,
        location: &Location<'_>,
    );

    /// Unique identifier, e.g. `"com.example.console"`
    fn identifier(&self) -> &str {
        self.core().identifier()
    }

    fn level(&self) -> LogLevel {
        self.core().level()
    }

    fn set_level(&self, level: LogLevel) {
        self.core().set_level(level);
    }

    fn default_properties(&self) -> Properties {
        self.core().default_properties()
    }

    /// Merge `properties` into the defaults, overwriting same-named keys
    fn add_default_properties(&self, properties: &Properties) {
        self.core().add_default_properties(properties);
    }

    fn remove_default_property(&self, key: &str) {
        self.core().remove_default_property(key);
    }

    /// Log a structured error
    ///
    /// The default logs an `error` event named `"<domain>, <code>"` with the
    /// error description as message and the user info as properties.
    fn log_error(&self, error: &EventError, location: &Location<'_>) {
        self.log(
            LogLevel::ERROR,
            &error.event_name(),
            Some(&error.description()),
            Some(&error.user_info),
            location,
        );
    }

    /// Whether [`purge_logs`](Destination::purge_logs) does anything
    fn can_purge(&self) -> bool {
        false
    }

    /// Delete stored logs
    fn purge_logs(&self) -> DestinationResult<()> {
        Err(DestinationError::PurgeNotSupported {
            identifier: self.identifier().to_string(),
        })
    }
}

/// Type alias for an Arc-wrapped destination
pub type SharedDestination = Arc<dyn Destination>;
