//! Resolving the full event set of a method
//!
//! Each traced method yields three events: the call, its completion, and
//! its fault. The completion and fault events are derived from the call
//! descriptor so all three share correlation fields.

use crate::descriptor::EventDescriptor;
use crate::invocation::{InvocationContext, MethodMetadata, ParameterMapping};
use crate::resolver::EventAttributeResolver;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::collections::BTreeSet;

/// Sequential event id source
///
/// Ids claimed by explicit overrides can be reserved so generated ids
/// never collide with them. Ids are never reused: once `u32::MAX` has
/// been handed out (or reserved) the allocator is exhausted.
#[derive(Debug, Clone)]
pub struct EventIdAllocator {
    next: Option<u32>,
    reserved: BTreeSet<u32>,
}

impl Default for EventIdAllocator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl EventIdAllocator {
    /// Allocator whose first id is `first`
    pub fn new(first: u32) -> Self {
        Self {
            next: Some(first),
            reserved: BTreeSet::new(),
        }
    }

    /// Never hand out any of `ids`
    pub fn reserve<I: IntoIterator<Item = u32>>(&mut self, ids: I) {
        self.reserved.extend(ids);
    }

    /// Next free id without consuming it, `None` once exhausted
    pub fn peek(&self) -> Option<u32> {
        let mut id = self.next?;
        while self.reserved.contains(&id) {
            id = id.checked_add(1)?;
        }
        Some(id)
    }

    /// Consume and return the next free id
    pub fn allocate(&mut self) -> Result<u32> {
        let id = self
            .peek()
            .ok_or_else(|| anyhow!("event id space exhausted (no free id up to {})", u32::MAX))?;
        self.next = id.checked_add(1);
        Ok(id)
    }
}

/// Descriptors for the three phases of one method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodEvents {
    #[serde(rename = "type")]
    pub type_name: String,
    pub method: String,
    pub call: EventDescriptor,
    pub completion: EventDescriptor,
    pub faulted: EventDescriptor,
}

impl MethodEvents {
    /// Descriptors in phase order: call, completion, faulted
    pub fn descriptors(&self) -> [&EventDescriptor; 3] {
        [&self.call, &self.completion, &self.faulted]
    }
}

/// Resolve call, completion and fault descriptors for `method`
///
/// A fresh id is consumed for the call event only when the method has
/// no explicit override. Fails when the allocator runs out of ids.
pub fn resolve_method_events(
    resolver: &EventAttributeResolver,
    method: &dyn MethodMetadata,
    parameters: &ParameterMapping,
    ids: &mut EventIdAllocator,
) -> Result<MethodEvents> {
    let call_id = match method.event_override() {
        Some(explicit) => explicit.id,
        None => ids.allocate()?,
    };

    let call = resolver.resolve_for_call(
        Some(&InvocationContext::call(method)),
        call_id,
        Some(parameters),
    )?;
    let completion = resolver.derive_from_base(
        Some(&call),
        Some(&InvocationContext::completion(method)),
        ids.allocate()?,
    )?;
    let faulted = resolver.derive_from_base(
        Some(&call),
        Some(&InvocationContext::faulted(method)),
        ids.allocate()?,
    )?;

    tracing::debug!(
        method = method.method_name(),
        type_name = method.declaring_type_name(),
        call = call.id,
        completion = completion.id,
        faulted = faulted.id,
        "resolved method events"
    );

    Ok(MethodEvents {
        type_name: method.declaring_type_name().to_string(),
        method: method.method_name().to_string(),
        call,
        completion,
        faulted,
    })
}
