//! Event attribute resolver
//!
//! Decides the [`EventDescriptor`] for each phase of a traced call.
//!
//! The resolver holds two levels fixed at construction (one for call and
//! completion events, one for fault events) and is otherwise stateless:
//! every operation is a pure function of its inputs, so one resolver can
//! be shared freely across threads.
//!
//! # Example
//!
//! ```
//! use eventpolicy::{
//!     EventAttributeResolver, EventLevel, InvocationContext, MethodInfo, TypeInfo,
//! };
//!
//! # fn main() -> Result<(), eventpolicy::ResolveError> {
//! let resolver = EventAttributeResolver::new(EventLevel::Informational, EventLevel::Error);
//! let method = MethodInfo::new(TypeInfo::new("Orders"), "place")
//!     .with_parameters(["customer", "sku", "quantity"])
//!     .returning("OrderId");
//! let mapping = method.parameter_mapping();
//!
//! let call = resolver.resolve_for_call(Some(&InvocationContext::call(&method)), 1, Some(&mapping))?;
//! assert_eq!(call.message, "{0} {1} {2}");
//!
//! let done = resolver.derive_from_base(Some(&call), Some(&InvocationContext::completion(&method)), 2)?;
//! assert_eq!((done.id, done.message.as_str()), (2, "{0}"));
//!
//! let fault = resolver.derive_from_base(Some(&call), Some(&InvocationContext::faulted(&method)), 3)?;
//! assert_eq!(fault.level, EventLevel::Error);
//! # Ok(())
//! # }
//! ```

use crate::descriptor::EventDescriptor;
use crate::error::{ResolveError, Result};
use crate::invocation::{InvocationContext, ParameterMapping};
use crate::level::EventLevel;
use crate::precedence::{self, LevelOrigin};
use crate::template;

/// Resolves tracing metadata for intercepted calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventAttributeResolver {
    default_level: EventLevel,
    exception_level: EventLevel,
}

impl Default for EventAttributeResolver {
    fn default() -> Self {
        Self::new(EventLevel::Informational, EventLevel::Error)
    }
}

impl EventAttributeResolver {
    /// Create a resolver
    ///
    /// # Arguments
    /// * `default_level` - Level for call and completion events with no override
    /// * `exception_level` - Level for fault events with no override
    pub fn new(default_level: EventLevel, exception_level: EventLevel) -> Self {
        Self {
            default_level,
            exception_level,
        }
    }

    pub fn default_level(&self) -> EventLevel {
        self.default_level
    }

    pub fn exception_level(&self) -> EventLevel {
        self.exception_level
    }

    /// Resolve the descriptor for a call event
    ///
    /// An explicit event override on the method is returned as-is, and
    /// `next_event_id` and `parameters` are then ignored. Otherwise a
    /// descriptor is built with `next_event_id`, the precedence-chain
    /// level, and a template with one placeholder per parameter.
    ///
    /// # Errors
    /// `InvalidArgument` when `context` is `None`, or when the context is
    /// a `MethodCall` and `parameters` is `None`.
    pub fn resolve_for_call(
        &self,
        context: Option<&InvocationContext<'_>>,
        next_event_id: u32,
        parameters: Option<&ParameterMapping>,
    ) -> Result<EventDescriptor> {
        let context = context.ok_or_else(|| ResolveError::missing("context"))?;
        let method = context.method();

        if let Some(explicit) = method.event_override() {
            tracing::trace!(
                method = method.method_name(),
                type_name = method.declaring_type_name(),
                id = explicit.id,
                "using explicit event override"
            );
            return Ok(explicit.clone());
        }

        let message = template::synthesize(context, parameters)?;
        let (level, _) = self.resolve_level(context, None);

        Ok(EventDescriptor::new(next_event_id, level, message))
    }

    /// Derive the completion or fault descriptor paired with `base`
    ///
    /// Correlation fields (keywords, opcode, task, version) are copied
    /// from `base`; the id is `next_event_id`; the level goes through the
    /// precedence chain with `base` as a fallback layer; the template
    /// never lists call parameters.
    ///
    /// # Errors
    /// `InvalidArgument` when `base` or `context` is `None`.
    pub fn derive_from_base(
        &self,
        base: Option<&EventDescriptor>,
        context: Option<&InvocationContext<'_>>,
        next_event_id: u32,
    ) -> Result<EventDescriptor> {
        let base = base.ok_or_else(|| ResolveError::missing("base_descriptor"))?;
        let context = context.ok_or_else(|| ResolveError::missing("context"))?;

        let message = template::synthesize(context, None)?;
        let (level, _) = self.resolve_level(context, Some(base));

        Ok(EventDescriptor {
            id: next_event_id,
            level,
            message,
            keywords: base.keywords,
            opcode: base.opcode,
            task: base.task,
            version: base.version,
        })
    }

    /// Level for `context`, and the layer that supplied it
    pub fn resolve_level(
        &self,
        context: &InvocationContext<'_>,
        base: Option<&EventDescriptor>,
    ) -> (EventLevel, LevelOrigin) {
        let phase = context.phase();
        let fallback = if phase.is_faulted() {
            (self.exception_level, LevelOrigin::ConfiguredException)
        } else {
            (self.default_level, LevelOrigin::ConfiguredDefault)
        };

        let method = context.method();
        let (level, origin) =
            precedence::evaluate(precedence::chain_for(phase), method, base, fallback);

        tracing::debug!(
            method = method.method_name(),
            type_name = method.declaring_type_name(),
            %phase,
            %level,
            %origin,
            "resolved event level"
        );

        (level, origin)
    }
}
