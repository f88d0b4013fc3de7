//! Cumulative severity mask

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Log level set used for destination filtering
///
/// Each named level is the union of its own bit and the bits of every more
/// severe level, so a destination configured at `INFO` also carries the
/// `WARNING`, `UI_EVENT` and `ERROR` bits. An event at level `L` is accepted
/// by a destination at level `D` when `D & L == L`.
///
/// # Example
///
/// ```
/// use multilog_core::LogLevel;
///
/// assert!(LogLevel::INFO.accepts(LogLevel::ERROR));
/// assert!(!LogLevel::ERROR.accepts(LogLevel::INFO));
/// assert!(!LogLevel::OFF.accepts(LogLevel::ERROR));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LogLevel(u32);

const DEBUG_BIT: u32 = 1 << 0;
const INFO_BIT: u32 = 1 << 1;
const WARNING_BIT: u32 = 1 << 2;
const UI_EVENT_BIT: u32 = 1 << 3;
const ERROR_BIT: u32 = 1 << 4;

impl LogLevel {
    pub const OFF: LogLevel = LogLevel(0);
    pub const ERROR: LogLevel = LogLevel(ERROR_BIT);
    pub const UI_EVENT: LogLevel = LogLevel(UI_EVENT_BIT | ERROR_BIT);
    pub const WARNING: LogLevel = LogLevel(WARNING_BIT | UI_EVENT_BIT | ERROR_BIT);
    pub const INFO: LogLevel = LogLevel(INFO_BIT | WARNING_BIT | UI_EVENT_BIT | ERROR_BIT);
    pub const DEBUG: LogLevel =
        LogLevel(DEBUG_BIT | INFO_BIT | WARNING_BIT | UI_EVENT_BIT | ERROR_BIT);
    pub const ALL: LogLevel = LogLevel(
        Self::DEBUG.0 | Self::INFO.0 | Self::WARNING.0 | Self::UI_EVENT.0 | Self::ERROR.0,
    );

    /// Build a level from raw bits, dropping bits outside the known layout
    pub const fn from_bits_truncate(bits: u32) -> Self {
        LogLevel(bits & Self::ALL.0)
    }

    /// Raw bit representation
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check whether every bit of `other` is set in `self`
    pub const fn contains(self, other: LogLevel) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether a destination at this level accepts an event at `event_level`
    pub const fn accepts(self, event_level: LogLevel) -> bool {
        self.contains(event_level)
    }

    pub const fn is_off(self) -> bool {
        self.0 == 0
    }

    /// Icon prefixed to rendered event lines
    pub fn icon(self) -> &'static str {
        match self {
            LogLevel::DEBUG | LogLevel::INFO | LogLevel::UI_EVENT => "✅",
            LogLevel::WARNING => "⚠️",
            LogLevel::ERROR => "🛑",
            _ => "",
        }
    }

    /// Canonical name for the exact named levels
    pub fn name(self) -> Option<&'static str> {
        match self {
            LogLevel::OFF => Some("off"),
            LogLevel::DEBUG => Some("debug"),
            LogLevel::INFO => Some("info"),
            LogLevel::WARNING => Some("warning"),
            LogLevel::UI_EVENT => Some("uiEvent"),
            LogLevel::ERROR => Some("error"),
            _ => None,
        }
    }
}

impl BitOr for LogLevel {
    type Output = LogLevel;

    fn bitor(self, rhs: LogLevel) -> LogLevel {
        LogLevel(self.0 | rhs.0)
    }
}

impl BitOrAssign for LogLevel {
    fn bitor_assign(&mut self, rhs: LogLevel) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LogLevel {
    type Output = LogLevel;

    fn bitand(self, rhs: LogLevel) -> LogLevel {
        LogLevel(self.0 & rhs.0)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:#07b}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDERED: [LogLevel; 6] = [
        LogLevel::DEBUG,
        LogLevel::INFO,
        LogLevel::WARNING,
        LogLevel::UI_EVENT,
        LogLevel::ERROR,
        LogLevel::OFF,
    ];

    #[test]
    fn test_levels_are_cumulative() {
        // Every level accepts itself and every more severe level
        for (i, dest) in ORDERED.iter().enumerate() {
            for (j, event) in ORDERED.iter().enumerate() {
                assert_eq!(dest.accepts(*event), j >= i, "{} accepts {}", dest, event);
            }
        }
    }

    #[test]
    fn test_all_is_union_of_named_levels() {
        let union = LogLevel::DEBUG
            | LogLevel::INFO
            | LogLevel::WARNING
            | LogLevel::UI_EVENT
            | LogLevel::ERROR;
        assert_eq!(LogLevel::ALL, union);
        assert_eq!(LogLevel::ALL, LogLevel::DEBUG);
    }

    #[test]
    fn test_off_accepts_nothing() {
        assert!(!LogLevel::OFF.accepts(LogLevel::ERROR));
        assert!(!LogLevel::OFF.accepts(LogLevel::DEBUG));
        assert!(LogLevel::OFF.is_off());
    }

    #[test]
    fn test_from_bits_truncate() {
        assert_eq!(LogLevel::from_bits_truncate(0xFFFF_FFFF), LogLevel::ALL);
        assert_eq!(LogLevel::from_bits_truncate(1 << 4), LogLevel::ERROR);
    }

    #[test]
    fn test_icons_and_names() {
        assert_eq!(LogLevel::ERROR.icon(), "🛑");
        assert_eq!(LogLevel::WARNING.icon(), "⚠️");
        assert_eq!(LogLevel::INFO.icon(), "✅");
        assert_eq!(LogLevel::OFF.icon(), "");
        assert_eq!(LogLevel::UI_EVENT.to_string(), "uiEvent");
        assert_eq!(LogLevel::from_bits_truncate(0b1).name(), None);
    }
}
