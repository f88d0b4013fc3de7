//! Source locations and structured errors carried by log calls

use std::fmt;

use super::properties::Properties;

/// Call site of a log event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub file: &'a str,
    pub line: u32,
    pub function: &'a str,
}

impl<'a> Location<'a> {
    pub fn new(file: &'a str, line: u32, function: &'a str) -> Self {
        Self { file, line, function }
    }

    /// Last path component of `file`
    pub fn file_name(&self) -> &'a str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file)
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_name(), self.function, self.line)
    }
}

/// Capture the current call site as a [`Location`]
///
/// Rust has no stable function-name macro, so the module path stands in for
/// the function.
#[macro_export]
macro_rules! location {
    () => {
        $crate::types::Location::new(file!(), line!(), module_path!())
    };
}

/// A structured error delivered through the error-log capability
///
/// Mirrors the usual domain/code/user-info triple that crash reporters
/// expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventError {
    pub domain: String,
    pub code: i64,
    pub user_info: Properties,
    description: Option<String>,
}

impl EventError {
    pub fn new(domain: impl Into<String>, code: i64) -> Self {
        Self {
            domain: domain.into(),
            code,
            user_info: Properties::new(),
            description: None,
        }
    }

    pub fn with_user_info(mut self, user_info: Properties) -> Self {
        self.user_info = user_info;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Human readable description, falling back to a generic sentence
    pub fn description(&self) -> String {
        match &self.description {
            Some(description) => description.clone(),
            None => format!(
                "The operation couldn't be completed. ({} error {}.)",
                self.domain, self.code
            ),
        }
    }

    /// Event name used when the error is logged as a plain event
    pub fn event_name(&self) -> String {
        format!("{}, {}", self.domain, self.code)
    }
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

impl std::error::Error for EventError {}
