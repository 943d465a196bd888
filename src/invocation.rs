//! Invocation context supplied by the call-interception layer
//!
//! The resolver never inspects a method directly. Everything it needs
//! (return shape, declarative overrides) is read through the
//! [`MethodMetadata`] capability trait, so any runtime that can answer
//! those queries can drive resolution.

use crate::descriptor::EventDescriptor;
use crate::level::EventLevel;
use std::fmt;

/// Phase a traced call is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvocationContextType {
    /// Method entry
    MethodCall,
    /// Normal return
    MethodCompletion,
    /// Exception exit
    MethodFaulted,
    /// Phase code this version does not know about
    Unrecognized(u8),
}

impl InvocationContextType {
    /// Decode a raw phase code (0 = call, 1 = completion, 2 = faulted)
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => InvocationContextType::MethodCall,
            1 => InvocationContextType::MethodCompletion,
            2 => InvocationContextType::MethodFaulted,
            other => InvocationContextType::Unrecognized(other),
        }
    }

    /// Raw phase code
    pub fn code(self) -> u8 {
        match self {
            InvocationContextType::MethodCall => 0,
            InvocationContextType::MethodCompletion => 1,
            InvocationContextType::MethodFaulted => 2,
            InvocationContextType::Unrecognized(code) => code,
        }
    }

    pub fn is_faulted(self) -> bool {
        matches!(self, InvocationContextType::MethodFaulted)
    }
}

impl From<u8> for InvocationContextType {
    fn from(code: u8) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for InvocationContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationContextType::MethodCall => write!(f, "call"),
            InvocationContextType::MethodCompletion => write!(f, "completion"),
            InvocationContextType::MethodFaulted => write!(f, "faulted"),
            InvocationContextType::Unrecognized(code) => write!(f, "unrecognized({})", code),
        }
    }
}

/// Read-only query surface over a method's static metadata
///
/// Override queries return `None` when nothing is configured at that
/// layer; the resolver then falls through to the next one.
pub trait MethodMetadata: Send + Sync {
    /// Method name, used for diagnostics
    fn method_name(&self) -> &str;

    /// Name of the type declaring the method, used for diagnostics
    fn declaring_type_name(&self) -> &str;

    /// `true` when the method returns nothing
    fn returns_void(&self) -> bool;

    /// Explicit full descriptor for the method's call event
    fn event_override(&self) -> Option<&EventDescriptor> {
        None
    }

    /// Exception level configured on the method itself
    fn method_exception_level(&self) -> Option<EventLevel> {
        None
    }

    /// Exception level configured on the declaring type
    fn type_exception_level(&self) -> Option<EventLevel> {
        None
    }

    /// Default level for every generated event of the declaring type
    fn type_default_level(&self) -> Option<EventLevel> {
        None
    }
}

/// One traced call: its phase and the target method's metadata
#[derive(Clone, Copy)]
pub struct InvocationContext<'a> {
    phase: InvocationContextType,
    method: &'a dyn MethodMetadata,
}

impl<'a> InvocationContext<'a> {
    pub fn new(phase: InvocationContextType, method: &'a dyn MethodMetadata) -> Self {
        Self { phase, method }
    }

    pub fn call(method: &'a dyn MethodMetadata) -> Self {
        Self::new(InvocationContextType::MethodCall, method)
    }

    pub fn completion(method: &'a dyn MethodMetadata) -> Self {
        Self::new(InvocationContextType::MethodCompletion, method)
    }

    pub fn faulted(method: &'a dyn MethodMetadata) -> Self {
        Self::new(InvocationContextType::MethodFaulted, method)
    }

    pub fn phase(&self) -> InvocationContextType {
        self.phase
    }

    pub fn method(&self) -> &'a dyn MethodMetadata {
        self.method
    }

    /// Same method, different phase
    pub fn with_phase(&self, phase: InvocationContextType) -> Self {
        Self::new(phase, self.method)
    }
}

impl fmt::Debug for InvocationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("phase", &self.phase)
            .field("type", &self.method.declaring_type_name())
            .field("method", &self.method.method_name())
            .finish()
    }
}

/// Ordered parameters captured for a `MethodCall` event
///
/// Only the number of entries affects resolution; names are kept for
/// reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMapping {
    names: Vec<String>,
}

impl ParameterMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl<S: Into<String>> FromIterator<S> for ParameterMapping {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
