//! Resolved event metadata
//!
//! An [`EventDescriptor`] is the output of resolution: everything a
//! trace sink needs to emit one event besides the captured payload.
//! The message template's `{n}` placeholders are filled positionally by
//! the sink with call arguments, the return value, or the exception.

use crate::level::EventLevel;
use serde::{Deserialize, Serialize};

/// Tracing metadata for one event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EventDescriptor {
    /// Event identifier
    pub id: u32,

    /// Severity level
    #[serde(default)]
    pub level: EventLevel,

    /// Message template with positional placeholders (`{0} {1}`)
    #[serde(default)]
    pub message: String,

    /// Keyword bitmask used by listeners to filter event groups
    #[serde(default)]
    pub keywords: u64,

    /// Operation code (start, stop, info, ...)
    #[serde(default)]
    pub opcode: u8,

    /// Task identifier grouping related events
    #[serde(default)]
    pub task: u16,

    /// Event schema version
    #[serde(default)]
    pub version: u8,
}

impl EventDescriptor {
    /// Create a descriptor with zeroed correlation fields
    pub fn new(id: u32, level: EventLevel, message: impl Into<String>) -> Self {
        Self {
            id,
            level,
            message: message.into(),
            keywords: 0,
            opcode: 0,
            task: 0,
            version: 0,
        }
    }

    pub fn with_keywords(mut self, keywords: u64) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_opcode(mut self, opcode: u8) -> Self {
        self.opcode = opcode;
        self
    }

    pub fn with_task(mut self, task: u16) -> Self {
        self.task = task;
        self
    }

    pub fn with_version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Number of distinct `{n}` placeholders in the message template
    ///
    /// Only well-formed `{digits}` groups count; `{{` escapes and stray
    /// braces are ignored.
    pub fn placeholder_count(&self) -> usize {
        let mut seen = std::collections::BTreeSet::new();
        let mut rest = self.message.as_str();

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            if let Some(stripped) = after.strip_prefix('{') {
                rest = stripped;
                continue;
            }
            match after.find('}') {
                Some(close) => {
                    if let Ok(index) = after[..close].parse::<usize>() {
                        seen.insert(index);
                    }
                    rest = &after[close + 1..];
                }
                None => break,
            }
        }

        seen.len()
    }

    /// Whether this descriptor shares the correlation fields of `other`
    pub fn correlates_with(&self, other: &EventDescriptor) -> bool {
        self.keywords == other.keywords
            && self.opcode == other.opcode
            && self.task == other.task
            && self.version == other.version
    }
}
