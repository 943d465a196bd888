//! Method catalog files
//!
//! A catalog lists traceable types and methods together with the
//! override values attached to them, so event sets can be resolved
//! without a live interception layer.
//!
//! # Example catalog
//!
//! ```toml
//! [[type]]
//! name = "Orders"
//! default_level = "warning"
//! exception_level = "critical"
//!
//! [[type.method]]
//! name = "place"
//! returns = "OrderId"
//! parameters = ["customer", "sku", "quantity"]
//!
//! [[type.method]]
//! name = "cancel"
//! parameters = ["order"]
//! exception_level = "error"
//!
//! [type.method.event]
//! id = 500
//! level = "verbose"
//! message = "cancel {0}"
//! keywords = 4
//! ```

use crate::descriptor::EventDescriptor;
use crate::event_set::{resolve_method_events, EventIdAllocator, MethodEvents};
use crate::level::EventLevel;
use crate::method_info::{MethodInfo, TypeInfo};
use crate::resolver::EventAttributeResolver;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default, rename = "type")]
    types: Vec<TypeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeEntry {
    name: String,
    default_level: Option<EventLevel>,
    exception_level: Option<EventLevel>,
    #[serde(default, rename = "method")]
    methods: Vec<MethodEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MethodEntry {
    name: String,
    returns: Option<String>,
    #[serde(default)]
    parameters: Vec<String>,
    exception_level: Option<EventLevel>,
    event: Option<EventDescriptor>,
}

/// Methods loaded from a catalog, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodCatalog {
    methods: Vec<MethodInfo>,
}

impl MethodCatalog {
    /// Load a catalog from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid catalog {}", path.display()))
    }

    /// Load a catalog from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawCatalog = toml::from_str(content).context("Failed to parse TOML")?;

        let mut seen = HashSet::new();
        let mut methods = Vec::new();

        for entry in raw.types {
            if entry.name.trim().is_empty() {
                bail!("Type with empty name in catalog");
            }

            let declaring_type = TypeInfo {
                name: entry.name,
                default_level: entry.default_level,
                exception_level: entry.exception_level,
            };

            for m in entry.methods {
                let info = MethodInfo {
                    name: m.name,
                    declaring_type: declaring_type.clone(),
                    return_type: m.returns,
                    parameters: m.parameters,
                    event: m.event,
                    exception_level: m.exception_level,
                };

                if info.name.trim().is_empty() {
                    bail!("Method with empty name in type {}", declaring_type.name);
                }
                if !seen.insert(info.qualified_name()) {
                    bail!("Duplicate method {} in catalog", info.qualified_name());
                }

                methods.push(info);
            }
        }

        let catalog = Self { methods };
        catalog.warn_on_shared_override_ids();
        Ok(catalog)
    }

    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Look up a method by `Type::method`
    pub fn find(&self, qualified_name: &str) -> Option<&MethodInfo> {
        let (type_name, method_name) = qualified_name.rsplit_once("::")?;
        self.methods
            .iter()
            .find(|m| m.declaring_type.name == type_name && m.name == method_name)
    }

    /// Ids claimed by explicit event overrides
    pub fn reserved_ids(&self) -> BTreeSet<u32> {
        self.methods
            .iter()
            .filter_map(|m| m.event.as_ref().map(|e| e.id))
            .collect()
    }

    /// Resolve the event set of every method, in declaration order
    ///
    /// Override ids are reserved in `ids` first so generated ids never
    /// collide with them.
    pub fn resolve_events(
        &self,
        resolver: &EventAttributeResolver,
        ids: &mut EventIdAllocator,
    ) -> Result<Vec<MethodEvents>> {
        ids.reserve(self.reserved_ids());
        self.methods
            .iter()
            .map(|m| {
                resolve_method_events(resolver, m, &m.parameter_mapping(), ids)
                    .with_context(|| format!("Failed to resolve {}", m.qualified_name()))
            })
            .collect()
    }

    fn warn_on_shared_override_ids(&self) {
        let mut owners: HashMap<u32, String> = HashMap::new();
        for m in &self.methods {
            let Some(event) = &m.event else { continue };
            if let Some(previous) = owners.insert(event.id, m.qualified_name()) {
                tracing::warn!(
                    id = event.id,
                    first = %previous,
                    second = %m.qualified_name(),
                    "event id used by more than one override"
                );
            }
        }
    }
}
