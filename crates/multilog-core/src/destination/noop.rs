//! No-op destination implementation

use super::state::DestinationCore;
use super::traits::Destination;
use crate::types::{Location, LogLevel, Properties};

/// A destination that does nothing
///
/// Useful as a placeholder when a destination slot must be filled but its
/// output is not wanted.
#[derive(Debug)]
pub struct NoOpDestination {
    core: DestinationCore,
}

impl NoOpDestination {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            core: DestinationCore::new(identifier, LogLevel::OFF, None),
        }
    }
}

impl Destination for NoOpDestination {
    fn core(&self) -> &DestinationCore {
        &self.core
    }

    fn log(
        &self,
        _level: LogLevel,
        _event_name: &str,
        _message: Option<&str>,
        _properties: Option<&Properties>,
        _location: &Location<'_>,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::DestinationError;

    #[test]
    fn test_noop_destination() {
        let noop = NoOpDestination::new("noop");
        assert_eq!(noop.identifier(), "noop");
        assert!(noop.level().is_off());

        noop.log(LogLevel::ERROR, "event", None, None, &Location::new("a.rs", 1, "a"));

        assert!(!noop.can_purge());
        assert!(matches!(
            noop.purge_logs(),
            Err(DestinationError::PurgeNotSupported { identifier }) if identifier == "noop"
        ));
    }
}
