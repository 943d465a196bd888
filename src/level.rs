//! Event severity levels
//!
//! Levels use the conventional event-tracing numbering where a smaller
//! value is more severe: `LogAlways` (0) is emitted unconditionally and
//! `Verbose` (5) is the chattiest.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Severity level carried by an event descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "LevelRepr")]
pub enum EventLevel {
    /// Always written, regardless of the listener's level
    LogAlways = 0,
    /// Unrecoverable failure
    Critical = 1,
    /// Failure the caller can observe
    Error = 2,
    /// Suspicious but tolerated condition
    Warning = 3,
    /// Normal operational events
    #[default]
    Informational = 4,
    /// Diagnostic detail
    Verbose = 5,
}

/// Error returned when a level name or number is not recognized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown event level '{0}' (expected log-always, critical, error, warning, informational, verbose or 0-5)")]
pub struct ParseLevelError(String);

impl EventLevel {
    /// All levels, most severe first
    pub const ALL: [EventLevel; 6] = [
        EventLevel::LogAlways,
        EventLevel::Critical,
        EventLevel::Error,
        EventLevel::Warning,
        EventLevel::Informational,
        EventLevel::Verbose,
    ];

    /// Numeric value of the level
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Level for a numeric value, if it is in range
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Canonical (kebab-case) name
    pub fn name(self) -> &'static str {
        match self {
            EventLevel::LogAlways => "log-always",
            EventLevel::Critical => "critical",
            EventLevel::Error => "error",
            EventLevel::Warning => "warning",
            EventLevel::Informational => "informational",
            EventLevel::Verbose => "verbose",
        }
    }
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventLevel {
    type Err = ParseLevelError;

    /// Accepts the canonical name in any case, with `-`, `_` or no
    /// separator, or the numeric value `0`-`5`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u8>() {
            return Self::from_u8(n).ok_or_else(|| ParseLevelError(s.to_string()));
        }

        let normalized: String = trimmed
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "logalways" => Ok(EventLevel::LogAlways),
            "critical" => Ok(EventLevel::Critical),
            "error" => Ok(EventLevel::Error),
            "warning" | "warn" => Ok(EventLevel::Warning),
            "informational" | "info" => Ok(EventLevel::Informational),
            "verbose" => Ok(EventLevel::Verbose),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Serialized form accepted for a level: a name or a number
#[derive(Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Number(i64),
    Name(String),
}

impl TryFrom<LevelRepr> for EventLevel {
    type Error = ParseLevelError;

    fn try_from(value: LevelRepr) -> Result<Self, ParseLevelError> {
        match value {
            LevelRepr::Number(n) => u8::try_from(n)
                .ok()
                .and_then(Self::from_u8)
                .ok_or_else(|| ParseLevelError(n.to_string())),
            LevelRepr::Name(name) => name.parse(),
        }
    }
}
