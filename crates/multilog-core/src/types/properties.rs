//! Key-value event properties and their composition rules

use std::collections::BTreeMap;

use super::level::LogLevel;
use super::event::Location;

/// Event and destination properties
///
/// A `BTreeMap` keeps iteration (and therefore rendering) deterministic.
pub type Properties = BTreeMap<String, String>;

/// Placeholder used for a missing message in composed attributes
pub const MISSING_MESSAGE: &str = "-";

/// Overlay `overlay` onto `base`; keys present in both take the overlay value
pub fn merge_into(base: &mut Properties, overlay: &Properties) {
    for (key, value) in overlay {
        base.insert(key.clone(), value.clone());
    }
}

/// Render properties as `k1: v1; k2: v2`, sorted by key
pub fn describe(properties: &Properties) -> String {
    properties
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Build the attribute map attached to structured reports
///
/// Precedence is fixed event fields < `default_properties` < `properties`:
/// destination defaults may overwrite fixed fields such as `message`, and
/// explicit event properties overwrite both.
pub fn compose_attributes(
    level: LogLevel,
    event_name: &str,
    message: Option<&str>,
    properties: Option<&Properties>,
    default_properties: Option<&Properties>,
    location: &Location<'_>,
) -> Properties {
    let mut attributes = Properties::new();
    attributes.insert("level".to_string(), level.icon().to_string());
    attributes.insert("eventName".to_string(), event_name.to_string());
    attributes.insert(
        "message".to_string(),
        message.unwrap_or(MISSING_MESSAGE).to_string(),
    );
    attributes.insert("file".to_string(), location.file.to_string());
    attributes.insert("line".to_string(), location.line.to_string());
    attributes.insert("function".to_string(), location.function.to_string());

    if let Some(defaults) = default_properties {
        merge_into(&mut attributes, defaults);
    }
    if let Some(explicit) = properties {
        merge_into(&mut attributes, explicit);
    }
    attributes
}

/// Build `Properties` from string pairs
///
/// ```
/// use multilog_core::types::properties_from;
///
/// let props = properties_from([("build", "42")]);
/// assert_eq!(props["build"], "42");
/// ```
pub fn properties_from<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Properties
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}
