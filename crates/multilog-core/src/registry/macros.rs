//! Convenience macros that capture the call site
//!
//! Each macro takes a registry, an event name and an optional format string
//! for the message:
//!
//! ```
//! use multilog_core::destination::MemoryDestination;
//! use multilog_core::{log_info, Logger, LogLevel};
//! use std::sync::Arc;
//!
//! let memory = Arc::new(MemoryDestination::new("memory", LogLevel::ALL));
//! let logger = Logger::new(vec![memory.clone()]);
//!
//! log_info!(logger, "sync");
//! log_info!(logger, "sync", "{} items in {} ms", 12, 340);
//!
//! let events = memory.events();
//! assert_eq!(events[1].message.as_deref(), Some("12 items in 340 ms"));
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __multilog_event {
    ($logger:expr, $level:expr, $event:expr) => {
        $logger.log($level, $event, None, None, &$crate::location!())
    };
    ($logger:expr, $level:expr, $event:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            $event,
            Some(format!($($arg)+).as_str()),
            None,
            &$crate::location!(),
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__multilog_event!($logger, $crate::LogLevel::DEBUG, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__multilog_event!($logger, $crate::LogLevel::INFO, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__multilog_event!($logger, $crate::LogLevel::WARNING, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_ui_event {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__multilog_event!($logger, $crate::LogLevel::UI_EVENT, $($rest)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::__multilog_event!($logger, $crate::LogLevel::ERROR, $($rest)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::destination::MemoryDestination;
    use crate::{Logger, LogLevel};
    use std::sync::Arc;

    #[test]
    fn test_macros_capture_location_and_message() {
        let memory = Arc::new(MemoryDestination::new("memory", LogLevel::ALL));
        let logger = Logger::new(vec![memory.clone()]);

        log_debug!(logger, "debug");
        log_info!(logger, "info", "count={}", 3);
        log_warning!(logger, "warning", "plain message");
        log_ui_event!(logger, "tap");
        log_error!(&logger, "error", "{}", "boom");

        let events = memory.events();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0].level, LogLevel::DEBUG);
        assert_eq!(events[0].message, None);
        assert_eq!(events[1].message.as_deref(), Some("count=3"));
        assert_eq!(events[2].message.as_deref(), Some("plain message"));
        assert_eq!(events[3].level, LogLevel::UI_EVENT);
        assert_eq!(events[4].message.as_deref(), Some("boom"));

        assert!(events[0].file.ends_with("macros.rs"));
        assert_eq!(events[0].function, module_path!());
        assert!(events[1].line > events[0].line);
    }
}
