//! Identifier, level and default-property state shared by all destinations

use parking_lot::RwLock;

use crate::types::{describe, merge_into, Location, LogLevel, Properties};

struct CoreState {
    level: LogLevel,
    default_properties: Properties,
    /// Cached `describe(default_properties)`, rebuilt on every mutation
    description: String,
}

/// State every destination embeds
///
/// Level and default properties are guarded by a lock owned by the
/// destination itself, so they can be changed from any thread without going
/// through a registry.
pub struct DestinationCore {
    identifier: String,
    state: RwLock<CoreState>,
}

impl DestinationCore {
    pub fn new(
        identifier: impl Into<String>,
        level: LogLevel,
        default_properties: Option<Properties>,
    ) -> Self {
        let default_properties = default_properties.unwrap_or_default();
        let description = describe(&default_properties);
        Self {
            identifier: identifier.into(),
            state: RwLock::new(CoreState {
                level,
                default_properties,
                description,
            }),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn level(&self) -> LogLevel {
        self.state.read().level
    }

    pub fn set_level(&self, level: LogLevel) {
        self.state.write().level = level;
    }

    pub fn default_properties(&self) -> Properties {
        self.state.read().default_properties.clone()
    }

    /// Replace the default properties wholesale
    pub fn set_default_properties(&self, properties: Properties) {
        let mut state = self.state.write();
        state.description = describe(&properties);
        state.default_properties = properties;
    }

    pub fn add_default_properties(&self, properties: &Properties) {
        let mut state = self.state.write();
        merge_into(&mut state.default_properties, properties);
        state.description = describe(&state.default_properties);
    }

    pub fn remove_default_property(&self, key: &str) {
        let mut state = self.state.write();
        if state.default_properties.remove(key).is_some() {
            state.description = describe(&state.default_properties);
        }
    }

    /// `k1: v1; k2: v2` rendering of the default properties
    pub fn default_properties_description(&self) -> String {
        self.state.read().description.clone()
    }

    /// Render an event as a single structured line
    ///
    /// ```
    /// use multilog_core::destination::DestinationCore;
    /// use multilog_core::{Location, LogLevel};
    ///
    /// let core = DestinationCore::new("console", LogLevel::ALL, None);
    /// let line = core.render_line(
    ///     LogLevel::INFO,
    ///     "launch",
    ///     Some("cold start"),
    ///     &Location::new("src/app.rs", 10, "app::start"),
    /// );
    /// assert_eq!(
    ///     line,
    ///     r#"{✅ "launch": {"message": "cold start", "defaultProperties": "", "location": "app.rs:app::start:10"}}"#
    /// );
    /// ```
    pub fn render_line(
        &self,
        level: LogLevel,
        event_name: &str,
        message: Option<&str>,
        location: &Location<'_>,
    ) -> String {
        let description = self.state.read().description.clone();
        format!(
            "{{{} \"{}\": {{\"message\": \"{}\", \"defaultProperties\": \"{}\", \"location\": \"{}\"}}}}",
            level.icon(),
            event_name,
            message.unwrap_or(""),
            description,
            location,
        )
    }
}

impl std::fmt::Debug for DestinationCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("DestinationCore")
            .field("identifier", &self.identifier)
            .field("level", &state.level)
            .field("default_properties", &state.default_properties)
            .finish()
    }
}
