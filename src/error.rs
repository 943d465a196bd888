//! Error types for event metadata resolution
//!
//! Resolution has exactly one failure mode: a required input was not
//! supplied. These failures are programming errors in the interception
//! layer, so they are never retried and never yield a partial descriptor.

use thiserror::Error;

/// Errors for resolver operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A required argument was absent
    ///
    /// Raised for a missing invocation context, a missing base descriptor
    /// during derivation, or a missing parameter mapping for a `MethodCall`.
    #[error("invalid argument: `{name}` is required")]
    InvalidArgument { name: &'static str },
}

impl ResolveError {
    /// Shorthand for [`ResolveError::InvalidArgument`]
    pub(crate) fn missing(name: &'static str) -> Self {
        Self::InvalidArgument { name }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
