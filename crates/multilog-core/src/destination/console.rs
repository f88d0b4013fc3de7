//! Console destination implementation

use super::state::DestinationCore;
use super::traits::Destination;
use crate::types::{Location, LogLevel, Properties};

/// A destination that writes rendered events to the console
///
/// `info` and `uiEvent` go to stdout; `debug`, `warning` and `error` go to
/// stderr.
#[derive(Debug)]
pub struct ConsoleDestination {
    core: DestinationCore,
    prefix: String,
}

impl ConsoleDestination {
    /// Create a console destination with the default `[multilog]` prefix
    pub fn new(identifier: impl Into<String>, level: LogLevel) -> Self {
        Self::with_prefix(identifier, level, "[multilog]")
    }

    /// Create a console destination with a custom prefix
    pub fn with_prefix(
        identifier: impl Into<String>,
        level: LogLevel,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            core: DestinationCore::new(identifier, level, None),
            prefix: prefix.into(),
        }
    }

    pub fn with_default_properties(self, properties: Properties) -> Self {
        self.core.set_default_properties(properties);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The exact text printed for an event, without the trailing newline
    pub fn format_event(
        &self,
        level: LogLevel,
        event_name: &str,
        message: Option<&str>,
        location: &Location<'_>,
    ) -> String {
        format!(
            "{} {}: {}",
            self.prefix,
            level.name().unwrap_or("log").to_uppercase(),
            self.core.render_line(level, event_name, message, location)
        )
    }

    fn writes_to_stdout(level: LogLevel) -> bool {
        level == LogLevel::INFO || level == LogLevel::UI_EVENT
    }
}

impl Destination for ConsoleDestination {
    fn core(&self) -> &DestinationCore {
        &self.core
    }

    fn log(
        &self,
        level: LogLevel,
        event_name: &str,
        message: Option<&str>,
        _properties: Option<&Properties>,
        location: &Location<'_>,
    ) {
        let line = self.format_event(level, event_name, message, location);
        if Self::writes_to_stdout(level) {
            println!("{}", line);
        } else {
            eprintln!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{properties_from, EventError};

    #[test]
    fn test_console_destination_creation() {
        let console = ConsoleDestination::new("console", LogLevel::ALL);
        assert_eq!(console.prefix(), "[multilog]");
        assert_eq!(console.identifier(), "console");
        assert_eq!(console.level(), LogLevel::ALL);
        assert!(!console.can_purge());

        let custom = ConsoleDestination::with_prefix("console", LogLevel::ERROR, "[MyApp]");
        assert_eq!(custom.prefix(), "[MyApp]");
    }

    #[test]
    fn test_format_event() {
        let console = ConsoleDestination::with_prefix("console", LogLevel::ALL, "[MyApp]")
            .with_default_properties(properties_from([("build", "42")]));
        let line = console.format_event(
            LogLevel::WARNING,
            "low disk",
            Some("12 MB left"),
            &Location::new("src/storage.rs", 7, "storage::check"),
        );
        assert_eq!(
            line,
            r#"[MyApp] WARNING: {⚠️ "low disk": {"message": "12 MB left", "defaultProperties": "build: 42", "location": "storage.rs:storage::check:7"}}"#
        );
    }

    #[test]
    fn test_stream_selection() {
        assert!(ConsoleDestination::writes_to_stdout(LogLevel::INFO));
        assert!(ConsoleDestination::writes_to_stdout(LogLevel::UI_EVENT));
        assert!(!ConsoleDestination::writes_to_stdout(LogLevel::DEBUG));
        assert!(!ConsoleDestination::writes_to_stdout(LogLevel::WARNING));
        assert!(!ConsoleDestination::writes_to_stdout(LogLevel::ERROR));
    }

    #[test]
    fn test_console_destination_logs() {
        // Only verifies that nothing panics
        let console = ConsoleDestination::new("console", LogLevel::ALL);
        let location = Location::new(file!(), line!(), "tests");
        console.log(LogLevel::DEBUG, "debug", None, None, &location);
        console.log(LogLevel::INFO, "info", Some("message"), None, &location);
        console.log(LogLevel::WARNING, "warning", None, None, &location);
        console.log_error(&EventError::new("net", -1), &location);
        assert!(console.purge_logs().is_err());
    }
}
