use std::fmt;
use std::str::FromStr;

use crate::error::LoggerError;

/// Severity of a log message, ordered from silent to most verbose.
///
/// The ordering doubles as the threshold comparison: a message is emitted
/// when the process-wide threshold is at least its level.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogLevel {
    /// Threshold-only value; suppresses all output and is never emitted.
    Quiet = 0,
    Error = 1,
    Print = 2,
    Debug = 3,
}

/// Tag characters for the prefix, indexed by ordinal. Index 0 stays blank
/// because `Quiet` never reaches the output.
const TAGS: [char; 4] = [' ', 'E', 'P', 'D'];

impl LogLevel {
    pub const MAX: LogLevel = LogLevel::Debug;

    /// Converts a raw ordinal into a level, clamping anything above
    /// [`LogLevel::MAX`] to `Debug`.
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => LogLevel::Quiet,
            1 => LogLevel::Error,
            2 => LogLevel::Print,
            _ => LogLevel::Debug,
        }
    }

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Single-character tag used inside the `[L]` field of the prefix.
    pub(crate) const fn tag(self) -> char {
        TAGS[self as usize]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::Quiet => "QUIET",
            LogLevel::Error => "ERROR",
            LogLevel::Print => "PRINT",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    /// Accepts level names in any case (`"debug"`, `"Error"`) as well as raw
    /// ordinals (`"3"`); numeric values above the maximum clamp to `Debug`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("quiet") {
            Ok(LogLevel::Quiet)
        } else if token.eq_ignore_ascii_case("error") {
            Ok(LogLevel::Error)
        } else if token.eq_ignore_ascii_case("print") {
            Ok(LogLevel::Print)
        } else if token.eq_ignore_ascii_case("debug") {
            Ok(LogLevel::Debug)
        } else if let Ok(raw) = token.parse::<u8>() {
            Ok(LogLevel::from_raw(raw))
        } else {
            Err(LoggerError::InvalidLevel(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [LogLevel; 4] = [
        LogLevel::Quiet,
        LogLevel::Error,
        LogLevel::Print,
        LogLevel::Debug,
    ];

    #[test]
    fn levels_order_from_silent_to_verbose() {
        assert!(LogLevel::Quiet < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Print);
        assert!(LogLevel::Print < LogLevel::Debug);
        assert_eq!(LogLevel::MAX, LogLevel::Debug);
    }

    #[test]
    fn from_raw_round_trips_defined_ordinals() {
        for level in ALL {
            assert_eq!(LogLevel::from_raw(level.ordinal()), level);
        }
    }

    #[test]
    fn from_raw_clamps_past_the_maximum() {
        assert_eq!(LogLevel::from_raw(4), LogLevel::Debug);
        assert_eq!(LogLevel::from_raw(9), LogLevel::Debug);
        assert_eq!(LogLevel::from_raw(u8::MAX), LogLevel::Debug);
    }

    #[test]
    fn tags_match_the_fixed_table() {
        assert_eq!(LogLevel::Quiet.tag(), ' ');
        assert_eq!(LogLevel::Error.tag(), 'E');
        assert_eq!(LogLevel::Print.tag(), 'P');
        assert_eq!(LogLevel::Debug.tag(), 'D');
    }

    #[test]
    fn clamped_levels_use_the_debug_tag() {
        assert_eq!(LogLevel::from_raw(9).tag(), 'D');
    }

    #[test]
    fn parses_names_in_any_case() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("ERROR".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert_eq!("Print".parse::<LogLevel>().unwrap(), LogLevel::Print);
        assert_eq!(" quiet ".parse::<LogLevel>().unwrap(), LogLevel::Quiet);
    }

    #[test]
    fn parses_numeric_ordinals_with_clamping() {
        assert_eq!("0".parse::<LogLevel>().unwrap(), LogLevel::Quiet);
        assert_eq!("2".parse::<LogLevel>().unwrap(), LogLevel::Print);
        assert_eq!("9".parse::<LogLevel>().unwrap(), LogLevel::Debug);
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert!(matches!(
            "verbose".parse::<LogLevel>(),
            Err(LoggerError::InvalidLevel(token)) if token == "verbose"
        ));
        assert!(matches!(
            "".parse::<LogLevel>(),
            Err(LoggerError::InvalidLevel(_))
        ));
        assert!(matches!(
            "-1".parse::<LogLevel>(),
            Err(LoggerError::InvalidLevel(_))
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for level in ALL {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trips_variant_names() {
        let json = serde_json::to_string(&LogLevel::Print).unwrap();
        assert_eq!(json, "\"Print\"");
        let back: LogLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LogLevel::Print);
    }
}
