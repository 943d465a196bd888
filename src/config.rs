//! Resolver configuration (eventpolicy.toml)
//!
//! # Example eventpolicy.toml
//!
//! ```toml
//! [levels]
//! default = "informational"
//! exception = "error"
//!
//! [ids]
//! first_event_id = 1
//! ```
//!
//! Every section and key is optional.

use crate::event_set::EventIdAllocator;
use crate::level::EventLevel;
use crate::resolver::EventAttributeResolver;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default levels applied when no override exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelDefaults {
    /// Level for call and completion events
    #[serde(default = "default_level")]
    pub default: EventLevel,

    /// Level for fault events
    #[serde(default = "default_exception_level")]
    pub exception: EventLevel,
}

fn default_level() -> EventLevel {
    EventLevel::Informational
}

fn default_exception_level() -> EventLevel {
    EventLevel::Error
}

impl Default for LevelDefaults {
    fn default() -> Self {
        Self {
            default: default_level(),
            exception: default_exception_level(),
        }
    }
}

/// Event id allocation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdSettings {
    /// First id handed to generated events
    #[serde(default = "default_first_event_id")]
    pub first_event_id: u32,
}

fn default_first_event_id() -> u32 {
    1
}

impl Default for IdSettings {
    fn default() -> Self {
        Self {
            first_event_id: default_first_event_id(),
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    #[serde(default)]
    pub levels: LevelDefaults,

    #[serde(default)]
    pub ids: IdSettings,
}

impl ResolverConfig {
    /// Load configuration from a TOML file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use eventpolicy::config::ResolverConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = ResolverConfig::from_file("eventpolicy.toml")?;
    /// let resolver = config.resolver();
    /// println!("fault level: {}", resolver.exception_level());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Resolver using the configured levels
    pub fn resolver(&self) -> EventAttributeResolver {
        EventAttributeResolver::from(self)
    }

    /// Id allocator starting at the configured first id
    pub fn id_allocator(&self) -> EventIdAllocator {
        EventIdAllocator::new(self.ids.first_event_id)
    }
}

impl From<&ResolverConfig> for EventAttributeResolver {
    fn from(config: &ResolverConfig) -> Self {
        EventAttributeResolver::new(config.levels.default, config.levels.exception)
    }
}
