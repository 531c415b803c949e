//! Log levels.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Severity of a log line, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogLevel {
    /// Very fine-grained diagnostics.
    Trace = 0,
    /// Debugging information.
    Debug = 1,
    /// Normal operational messages.
    Info = 2,
    /// Something unexpected that does not stop the program.
    Warn = 3,
    /// An operation failed.
    Error = 4,
    /// The program cannot continue.
    Fatal = 5,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl LogLevel {
    /// All levels, least severe first.
    pub const ALL: [Self; 6] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// Returns the upper-case level name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Returns the level name padded to five columns, as it appears in a line.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO ",
            Self::Warn => "WARN ",
            other => other.as_str(),
        }
    }

    /// Returns the ANSI escape sequence used when color output is enabled.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Trace => "\x1b[35m",
            Self::Debug => "\x1b[36m",
            Self::Info => "\x1b[32m",
            Self::Warn => "\x1b[33m",
            Self::Error => "\x1b[31m",
            Self::Fatal => "\x1b[4m\x1b[31m",
        }
    }

    pub(crate) const fn from_repr(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Trace),
            1 => Some(Self::Debug),
            2 => Some(Self::Info),
            3 => Some(Self::Warn),
            4 => Some(Self::Error),
            5 => Some(Self::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a log level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown log level: {input}")]
pub struct ParseLevelError {
    /// The rejected input, as given.
    pub input: String,
}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    /// Parses a level name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            "FATAL" => Ok(Self::Fatal),
            _ => Err(ParseLevelError {
                input: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn test_parse_ignores_case_and_whitespace() {
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("  Warn ".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("fatal\n".parse::<LogLevel>(), Ok(LogLevel::Fatal));
    }

    #[test]
    fn test_parse_unknown_level() {
        let err = "bogus".parse::<LogLevel>().unwrap_err();
        assert_eq!(err.input, "bogus");
        assert_eq!(err.to_string(), "Unknown log level: bogus");
    }

    #[test]
    fn test_labels_are_fixed_width() {
        for level in LogLevel::ALL {
            assert_eq!(level.label().len(), 5);
        }
        assert_eq!(LogLevel::Info.label(), "INFO ");
        assert_eq!(LogLevel::Error.label(), "ERROR");
    }

    #[test]
    fn test_repr_round_trip() {
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::from_repr(level as u8), Some(level));
        }
        assert_eq!(LogLevel::from_repr(6), None);
    }

    #[test]
    fn test_level_serde() {
        let json = serde_json::to_string(&LogLevel::Debug).unwrap();
        assert_eq!(json, r#""debug""#);

        let level: LogLevel = serde_json::from_str(r#"" ERROR ""#).unwrap();
        assert_eq!(level, LogLevel::Error);

        assert!(serde_json::from_str::<LogLevel>(r#""loud""#).is_err());
    }
}
