//! eventpolicy - Trace event metadata resolution for intercepted method calls
//!
//! This library decides the tracing metadata that accompanies each event
//! of an intercepted call (entry, normal return, fault): the event id,
//! severity level, positional message template, and correlation fields.
//! Per-method and per-type overrides compose with resolver-wide defaults
//! through explicit precedence chains.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod event_set;
pub mod invocation;
pub mod level;
pub mod method_info;
pub mod precedence;
pub mod report;
pub mod resolver;
pub mod template;

pub use descriptor::EventDescriptor;
pub use error::ResolveError;
pub use event_set::{resolve_method_events, EventIdAllocator, MethodEvents};
pub use invocation::{InvocationContext, InvocationContextType, MethodMetadata, ParameterMapping};
pub use level::EventLevel;
pub use method_info::{MethodInfo, TypeInfo};
pub use precedence::LevelOrigin;
pub use resolver::EventAttributeResolver;
