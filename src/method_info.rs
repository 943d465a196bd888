//! Owned method and type metadata
//!
//! [`MethodInfo`] is the ready-made [`MethodMetadata`] implementation:
//! a snapshot of one method's shape and the override values attached to
//! it and to its declaring type. Interception layers with their own
//! metadata model can implement the trait directly instead.

use crate::descriptor::EventDescriptor;
use crate::invocation::{MethodMetadata, ParameterMapping};
use crate::level::EventLevel;

/// Type-level overrides shared by every method of a type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: String,

    /// Level for all generated events of the type (not used for faults)
    pub default_level: Option<EventLevel>,

    /// Level for fault events when the method sets none
    pub exception_level: Option<EventLevel>,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_default_level(mut self, level: EventLevel) -> Self {
        self.default_level = Some(level);
        self
    }

    pub fn with_exception_level(mut self, level: EventLevel) -> Self {
        self.exception_level = Some(level);
        self
    }
}

/// Static metadata of one traceable method
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodInfo {
    pub name: String,

    pub declaring_type: TypeInfo,

    /// Declared return type; `None` for void methods
    pub return_type: Option<String>,

    /// Parameter names in declaration order
    pub parameters: Vec<String>,

    /// Explicit descriptor for the call event
    pub event: Option<EventDescriptor>,

    /// Fault level set on the method itself
    pub exception_level: Option<EventLevel>,
}

impl MethodInfo {
    pub fn new(declaring_type: TypeInfo, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring_type,
            ..Self::default()
        }
    }

    /// Mark the method as returning `return_type`
    pub fn returning(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_event(mut self, event: EventDescriptor) -> Self {
        self.event = Some(event);
        self
    }

    pub fn with_exception_level(mut self, level: EventLevel) -> Self {
        self.exception_level = Some(level);
        self
    }

    /// `Type::method`
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.declaring_type.name, self.name)
    }

    /// Parameter mapping capturing every declared parameter
    pub fn parameter_mapping(&self) -> ParameterMapping {
        self.parameters.iter().cloned().collect()
    }
}

impl MethodMetadata for MethodInfo {
    fn method_name(&self) -> &str {
        &self.name
    }

    fn declaring_type_name(&self) -> &str {
        &self.declaring_type.name
    }

    fn returns_void(&self) -> bool {
        match self.return_type.as_deref() {
            None => true,
            Some(ty) => matches!(ty.trim(), "" | "()" | "void"),
        }
    }

    fn event_override(&self) -> Option<&EventDescriptor> {
        self.event.as_ref()
    }

    fn method_exception_level(&self) -> Option<EventLevel> {
        self.exception_level
    }

    fn type_exception_level(&self) -> Option<EventLevel> {
        self.declaring_type.exception_level
    }

    fn type_default_level(&self) -> Option<EventLevel> {
        self.declaring_type.default_level
    }
}
