//! Crash reporter destination
//!
//! Forwards warnings and errors to a crash reporting backend as structured
//! non-fatal reports and keeps every event as a breadcrumb line.

use std::sync::Arc;

use parking_lot::Mutex;

use super::state::DestinationCore;
use super::traits::Destination;
use crate::types::{compose_attributes, EventError, Location, LogLevel, Properties};

/// A non-fatal report handed to a [`CrashReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashReport {
    pub domain: String,
    pub code: i64,
    pub attributes: Properties,
}

/// Backend a [`CrashReporterDestination`] delivers to
///
/// Implemented by the host application over its crash reporting SDK.
pub trait CrashReporter: Send + Sync {
    /// Record a non-fatal error report
    fn record(&self, report: CrashReport);

    /// Append a line to the breadcrumb log attached to future reports
    fn log(&self, line: &str);
}

/// Crash reporter that keeps everything in memory
#[derive(Debug, Default)]
pub struct MemoryCrashReporter {
    reports: Mutex<Vec<CrashReport>>,
    breadcrumbs: Mutex<Vec<String>>,
}

impl MemoryCrashReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<CrashReport> {
        self.reports.lock().clone()
    }

    pub fn breadcrumbs(&self) -> Vec<String> {
        self.breadcrumbs.lock().clone()
    }
}

impl CrashReporter for MemoryCrashReporter {
    fn record(&self, report: CrashReport) {
        self.reports.lock().push(report);
    }

    fn log(&self, line: &str) {
        self.breadcrumbs.lock().push(line.to_string());
    }
}

/// Destination that reports warnings and errors to a crash reporter
///
/// Report attributes are composed from the fixed event fields, this
/// destination's default properties and the event properties, in increasing
/// order of precedence.
pub struct CrashReporterDestination {
    core: DestinationCore,
    reporter: Arc<dyn CrashReporter>,
}

impl CrashReporterDestination {
    pub fn new(
        identifier: impl Into<String>,
        level: LogLevel,
        reporter: Arc<dyn CrashReporter>,
    ) -> Self {
        Self {
            core: DestinationCore::new(identifier, level, None),
            reporter,
        }
    }

    pub fn with_default_properties(self, properties: Properties) -> Self {
        self.core.set_default_properties(properties);
        self
    }

    /// `<identifier>.<event name lowercased, spaces replaced by dashes>`
    fn domain_for(&self, event_name: &str) -> String {
        format!(
            "{}.{}",
            self.core.identifier(),
            event_name.to_lowercase().replace(' ', "-")
        )
    }
}

impl Destination for CrashReporterDestination {
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
        if level == LogLevel::WARNING || level == LogLevel::ERROR {
            let defaults = self.core.default_properties();
            let attributes = compose_attributes(
                level,
                event_name,
                message,
                properties,
                Some(&defaults),
                location,
            );
            self.reporter.record(CrashReport {
                domain: self.domain_for(event_name),
                code: 0,
                attributes,
            });
        }

        let line = self.core.render_line(level, event_name, message, location);
        self.reporter.log(&line);
    }

    fn log_error(&self, error: &EventError, location: &Location<'_>) {
        let mut attributes = error.user_info.clone();
        attributes.insert("file".to_string(), location.file.to_string());
        attributes.insert("line".to_string(), location.line.to_string());
        attributes.insert("funcName".to_string(), location.function.to_string());
        self.reporter.record(CrashReport {
            domain: error.domain.clone(),
            code: error.code,
            attributes,
        });
    }
}

impl std::fmt::Debug for CrashReporterDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrashReporterDestination")
            .field("core", &self.core)
            .finish()
    }
}
