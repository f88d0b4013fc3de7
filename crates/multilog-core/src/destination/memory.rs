//! In-memory destination implementation

use parking_lot::RwLock;

use super::state::DestinationCore;
use super::traits::{Destination, DestinationResult};
use crate::types::{EventError, Location, LogLevel, Properties};

/// An event captured by a [`MemoryDestination`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub level: LogLevel,
    pub event_name: String,
    pub message: Option<String>,
    pub properties: Option<Properties>,
    pub file: String,
    pub line: u32,
    pub function: String,
}

/// Destination that records every event it receives
///
/// Intended for tests and for hosts that want to inspect recent activity.
/// Purging clears the recorded events.
///
/// # Example
///
/// ```
/// use multilog_core::destination::{Destination, MemoryDestination};
/// use multilog_core::{location, LogLevel};
///
/// let memory = MemoryDestination::new("memory", LogLevel::ALL);
/// memory.log(LogLevel::INFO, "launch", None, None, &location!());
/// assert_eq!(memory.events()[0].event_name, "launch");
/// ```
#[derive(Debug)]
pub struct MemoryDestination {
    core: DestinationCore,
    events: RwLock<Vec<RecordedEvent>>,
    errors: RwLock<Vec<EventError>>,
}

impl MemoryDestination {
    pub fn new(identifier: impl Into<String>, level: LogLevel) -> Self {
        Self {
            core: DestinationCore::new(identifier, level, None),
            events: RwLock::new(Vec::new()),
            errors: RwLock::new(Vec::new()),
        }
    }

    pub fn with_default_properties(self, properties: Properties) -> Self {
        self.core.set_default_properties(properties);
        self
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.read().clone()
    }

    /// Errors delivered through [`Destination::log_error`]
    pub fn errors(&self) -> Vec<EventError> {
        self.errors.read().clone()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    pub fn clear(&self) {
        self.events.write().clear();
        self.errors.write().clear();
    }
}

impl Destination for MemoryDestination {
    fn core(&self) -> &DestinationCore {
        &self.core
    }

    fn log(
        &self,
        level: LogLevel,
        event_name: &str,
        message: Option<&str>,
        properties: Option<&Properties>,
        location: &Location<'_>,
    ) {
        self.events.write().push(RecordedEvent {
            level,
            event_name: event_name.to_string(),
            message: message.map(str::to_string),
            properties: properties.cloned(),
            file: location.file.to_string(),
            line: location.line,
            function: location.function.to_string(),
        });
    }

    fn log_error(&self, error: &EventError, _location: &Location<'_>) {
        self.errors.write().push(error.clone());
    }

    fn can_purge(&self) -> bool {
        true
    }

    fn purge_logs(&self) -> DestinationResult<()> {
        self.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::properties_from;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_records_events() {
        let memory = MemoryDestination::new("memory", LogLevel::ALL);
        assert!(memory.is_empty());

        let props = properties_from([("k", "v")]);
        memory.log(
            LogLevel::WARNING,
            "event",
            Some("message"),
            Some(&props),
            &Location::new("lib.rs", 9, "lib::f"),
        );

        let events = memory.events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            RecordedEvent {
                level: LogLevel::WARNING,
                event_name: "event".to_string(),
                message: Some("message".to_string()),
                properties: Some(props),
                file: "lib.rs".to_string(),
                line: 9,
                function: "lib::f".to_string(),
            }
        );
    }

    #[test]
    fn test_errors_and_purge() {
        let memory = MemoryDestination::new("memory", LogLevel::ALL);
        let location = Location::new("lib.rs", 1, "f");
        memory.log(LogLevel::DEBUG, "event", None, None, &location);
        memory.log_error(&EventError::new("domain", 7), &location);

        assert_eq!(memory.len(), 1);
        assert_eq!(memory.errors()[0].code, 7);

        assert!(memory.can_purge());
        memory.purge_logs().unwrap();
        assert!(memory.is_empty());
        assert!(memory.errors().is_empty());
    }

    #[test]
    fn test_thread_safety() {
        let memory = Arc::new(MemoryDestination::new("memory", LogLevel::ALL));
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let memory = Arc::clone(&memory);
                thread::spawn(move || {
                    let name = format!("event-{}", i);
                    memory.log(LogLevel::INFO, &name, None, None, &Location::new("t.rs", 1, "t"));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(memory.len(), 10);
    }
}
