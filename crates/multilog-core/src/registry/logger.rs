//! Destination registry and fan-out

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::destination::{Destination, DestinationResult, SharedDestination};
use crate::types::{EventError, Location, LogLevel, Properties};

/// Thread-safe home for named destinations
///
/// Every log call takes a snapshot of the registered destinations under a
/// read lock and delivers to each accepting destination after the lock is
/// released, so destination churn never blocks on slow destinations. A
/// destination that panics is reported through `tracing` and skipped; its
/// siblings still receive the event.
///
/// The registry is an ordinary value: construct one at startup and pass it
/// (usually as an `Arc<Logger>`) to the code that logs.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use multilog_core::destination::MemoryDestination;
/// use multilog_core::{location, Logger, LogLevel};
///
/// let memory = Arc::new(MemoryDestination::new("memory", LogLevel::INFO));
/// let logger = Logger::new(vec![memory.clone()]);
///
/// logger.info("launch", None, None, &location!());
/// logger.debug("ignored", None, None, &location!());
/// assert_eq!(memory.len(), 1);
/// ```
pub struct Logger {
    destinations: RwLock<HashMap<String, SharedDestination>>,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            destinations: RwLock::new(HashMap::new()),
        }
    }
}

impl Logger {
    /// Create a registry holding `destinations`
    ///
    /// When two destinations share an identifier the first one is kept.
    pub fn new(destinations: Vec<SharedDestination>) -> Self {
        let logger = Self::default();
        for destination in destinations {
            logger.add_destination(destination);
        }
        logger
    }

    /// Register `destination` unless its identifier is taken
    ///
    /// Returns `false` and leaves the existing destination in place when the
    /// identifier is already registered.
    pub fn add_destination(&self, destination: SharedDestination) -> bool {
        let mut destinations = self.destinations.write();
        match destinations.entry(destination.identifier().to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(destination);
                true
            }
        }
    }

    /// Unregister a destination, returning it if it was present
    pub fn remove_destination(&self, identifier: &str) -> Option<SharedDestination> {
        self.destinations.write().remove(identifier)
    }

    /// Snapshot of the registered destinations, sorted by identifier
    pub fn destinations(&self) -> Vec<SharedDestination> {
        let mut snapshot = self.snapshot();
        snapshot.sort_by(|a, b| a.identifier().cmp(b.identifier()));
        snapshot
    }

    pub fn destination(&self, identifier: &str) -> Option<SharedDestination> {
        self.destinations.read().get(identifier).cloned()
    }

    pub fn len(&self) -> usize {
        self.destinations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.read().is_empty()
    }

    /// Deliver an event to every destination whose level accepts it
    ///
    /// Destinations receive `properties` as given; when it is `None` they
    /// receive their own default properties instead.
    pub fn log(
        &self,
        level: LogLevel,
        event_name: &str,
        message: Option<&str>,
        properties: Option<&Properties>,
        location: &Location<'_>,
    ) {
        for destination in self.snapshot() {
            if !destination.level().accepts(level) {
                continue;
            }
            isolate(destination.as_ref(), "log", || {
                let defaults;
                let properties = match properties {
                    Some(properties) => properties,
                    None => {
                        defaults = destination.default_properties();
                        &defaults
                    }
                };
                destination.log(level, event_name, message, Some(properties), location);
            });
        }
    }

    /// Deliver a structured error to every destination accepting `error`
    pub fn log_error(&self, error: &EventError, location: &Location<'_>) {
        for destination in self.snapshot() {
            if !destination.level().accepts(LogLevel::ERROR) {
                continue;
            }
            isolate(destination.as_ref(), "log_error", || {
                destination.log_error(error, location);
            });
        }
    }

    pub fn debug(
        &self,
        event_name: &str,
        message: Option<&str>,
        properties: Option<&Properties>,
        location: &Location<'_>,
    ) {
        self.log(LogLevel::DEBUG, event_name, message, properties, location);
    }

    pub fn info(
        &self,
        event_name: &str,
        message: Option<&str>,
        properties: Option<&Properties>,
        location: &Location<'_>,
    ) {
        self.log(LogLevel::INFO, event_name, message, properties, location);
    }

    pub fn warning(
        &self,
        event_name: &str,
        message: Option<&str>,
        properties: Option<&Properties>,
        location: &Location<'_>,
    ) {
        self.log(LogLevel::WARNING, event_name, message, properties, location);
    }

    pub fn ui_event(
        &self,
        event_name: &str,
        message: Option<&str>,
        properties: Option<&Properties>,
        location: &Location<'_>,
    ) {
        self.log(LogLevel::UI_EVENT, event_name, message, properties, location);
    }

    pub fn error(
        &self,
        event_name: &str,
        message: Option<&str>,
        properties: Option<&Properties>,
        location: &Location<'_>,
    ) {
        self.log(LogLevel::ERROR, event_name, message, properties, location);
    }

    /// Set the level of each listed destination; unknown identifiers are ignored
    pub fn set_log_level(&self, level: LogLevel, identifiers: &[&str]) {
        let destinations = self.destinations.read();
        for identifier in identifiers {
            if let Some(destination) = destinations.get(*identifier) {
                destination.set_level(level);
            }
        }
    }

    /// Merge `properties` into the defaults of the listed destinations, or
    /// of every destination when `identifiers` is `None`
    pub fn add_default_properties(&self, properties: &Properties, identifiers: Option<&[&str]>) {
        for destination in self.matching(identifiers) {
            destination.add_default_properties(properties);
        }
    }

    /// Remove `key` from the defaults of the listed destinations, or of every
    /// destination when `identifiers` is `None`
    pub fn remove_default_properties(&self, key: &str, identifiers: Option<&[&str]>) {
        for destination in self.matching(identifiers) {
            destination.remove_default_property(key);
        }
    }

    /// Purge every destination that supports it
    ///
    /// Returns one result per purged destination, sorted by identifier.
    pub fn purge_logs(&self) -> Vec<(String, DestinationResult<()>)> {
        let mut results: Vec<_> = self
            .snapshot()
            .into_iter()
            .filter(|destination| destination.can_purge())
            .map(|destination| {
                let result = destination.purge_logs();
                if let Err(e) = &result {
                    tracing::warn!(
                        destination = destination.identifier(),
                        error = %e,
                        "purge failed"
                    );
                }
                (destination.identifier().to_string(), result)
            })
            .collect();
        results.sort_by(|a, b| a.0.cmp(&b.0));
        results
    }

    fn snapshot(&self) -> Vec<SharedDestination> {
        self.destinations.read().values().cloned().collect()
    }

    fn matching(&self, identifiers: Option<&[&str]>) -> Vec<SharedDestination> {
        let destinations = self.destinations.read();
        match identifiers {
            Some(identifiers) => identifiers
                .iter()
                .filter_map(|identifier| destinations.get(*identifier).cloned())
                .collect(),
            None => destinations.values().cloned().collect(),
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut identifiers: Vec<String> = self.destinations.read().keys().cloned().collect();
        identifiers.sort();
        f.debug_struct("Logger")
            .field("destinations", &identifiers)
            .finish()
    }
}

/// Run one destination call, containing any panic it raises
fn isolate<F: FnOnce()>(destination: &dyn Destination, operation: &str, call: F) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(call)) {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::error!(
            destination = destination.identifier(),
            operation,
            reason = %reason,
            "destination panicked"
        );
    }
}
