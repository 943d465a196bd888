//! Message template synthesis
//!
//! Templates are positional: the sink substitutes `{n}` with the n-th
//! captured value. Call events list one placeholder per captured
//! parameter, completion events carry the return value when there is
//! one, and fault events always carry the exception.

use crate::error::{ResolveError, Result};
use crate::invocation::{InvocationContext, InvocationContextType, ParameterMapping};

/// `"{0} {1} ... {n-1}"`, or `""` when `count` is zero
pub fn positional_placeholders(count: usize) -> String {
    (0..count)
        .map(|index| format!("{{{}}}", index))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the message template for `context`
///
/// `parameters` is required for `MethodCall` and ignored otherwise.
pub fn synthesize(
    context: &InvocationContext<'_>,
    parameters: Option<&ParameterMapping>,
) -> Result<String> {
    match context.phase() {
        InvocationContextType::MethodCall => {
            let parameters = parameters.ok_or_else(|| ResolveError::missing("parameter_mapping"))?;
            Ok(positional_placeholders(parameters.len()))
        }
        InvocationContextType::MethodFaulted => Ok(positional_placeholders(1)),
        InvocationContextType::MethodCompletion => {
            if context.method().returns_void() {
                Ok(String::new())
            } else {
                Ok(positional_placeholders(1))
            }
        }
        InvocationContextType::Unrecognized(code) => {
            tracing::debug!(
                code,
                method = context.method().method_name(),
                "unrecognized invocation phase, using empty message template"
            );
            Ok(String::new())
        }
    }
}
