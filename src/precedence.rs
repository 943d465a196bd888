//! Level precedence chains
//!
//! Level resolution is an ordered list of lookups evaluated
//! short-circuit: the first layer that has a value wins, and the
//! resolver's configured default answers when none do.
//!
//! | Phase | Chain (highest first) | Fallback |
//! |---|---|---|
//! | faulted | method exception level, type exception level | configured exception level |
//! | call / completion | type default level, base descriptor level | configured default level |
//!
//! Faulted events never consult the ordinary defaults, and ordinary
//! events never consult exception levels.

use crate::descriptor::EventDescriptor;
use crate::invocation::{InvocationContextType, MethodMetadata};
use crate::level::EventLevel;
use serde::Serialize;
use std::fmt;

/// Layer that supplied a resolved level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LevelOrigin {
    /// Exception level on the method
    MethodException,
    /// Exception level on the declaring type
    TypeException,
    /// Resolver's configured exception level
    ConfiguredException,
    /// Default level on the declaring type
    TypeDefault,
    /// Level of the base descriptor being derived from
    BaseDescriptor,
    /// Resolver's configured default level
    ConfiguredDefault,
}

impl fmt::Display for LevelOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LevelOrigin::MethodException => "method-exception",
            LevelOrigin::TypeException => "type-exception",
            LevelOrigin::ConfiguredException => "configured-exception",
            LevelOrigin::TypeDefault => "type-default",
            LevelOrigin::BaseDescriptor => "base-descriptor",
            LevelOrigin::ConfiguredDefault => "configured-default",
        };
        f.write_str(name)
    }
}

type LookupFn = fn(&dyn MethodMetadata, Option<&EventDescriptor>) -> Option<EventLevel>;

/// One layer of a precedence chain
#[derive(Clone, Copy)]
pub struct LevelLookup {
    origin: LevelOrigin,
    lookup: LookupFn,
}

impl LevelLookup {
    pub fn origin(&self) -> LevelOrigin {
        self.origin
    }

    /// Query this layer alone
    pub fn query(
        &self,
        method: &dyn MethodMetadata,
        base: Option<&EventDescriptor>,
    ) -> Option<EventLevel> {
        (self.lookup)(method, base)
    }
}

impl fmt::Debug for LevelLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LevelLookup").field(&self.origin).finish()
    }
}

fn method_exception_level(
    method: &dyn MethodMetadata,
    _base: Option<&EventDescriptor>,
) -> Option<EventLevel> {
    method.method_exception_level()
}

fn type_exception_level(
    method: &dyn MethodMetadata,
    _base: Option<&EventDescriptor>,
) -> Option<EventLevel> {
    method.type_exception_level()
}

fn type_default_level(
    method: &dyn MethodMetadata,
    _base: Option<&EventDescriptor>,
) -> Option<EventLevel> {
    method.type_default_level()
}

fn base_descriptor_level(
    _method: &dyn MethodMetadata,
    base: Option<&EventDescriptor>,
) -> Option<EventLevel> {
    base.map(|b| b.level)
}

/// Chain for `MethodFaulted` events
pub const FAULTED_CHAIN: &[LevelLookup] = &[
    LevelLookup {
        origin: LevelOrigin::MethodException,
        lookup: method_exception_level,
    },
    LevelLookup {
        origin: LevelOrigin::TypeException,
        lookup: type_exception_level,
    },
];

/// Chain for every other phase
pub const ORDINARY_CHAIN: &[LevelLookup] = &[
    LevelLookup {
        origin: LevelOrigin::TypeDefault,
        lookup: type_default_level,
    },
    LevelLookup {
        origin: LevelOrigin::BaseDescriptor,
        lookup: base_descriptor_level,
    },
];

/// Chain that applies to `phase`
pub fn chain_for(phase: InvocationContextType) -> &'static [LevelLookup] {
    if phase.is_faulted() {
        FAULTED_CHAIN
    } else {
        ORDINARY_CHAIN
    }
}

/// Walk `chain` and return the first level found, or `fallback`
pub fn evaluate(
    chain: &[LevelLookup],
    method: &dyn MethodMetadata,
    base: Option<&EventDescriptor>,
    fallback: (EventLevel, LevelOrigin),
) -> (EventLevel, LevelOrigin) {
    chain
        .iter()
        .find_map(|layer| layer.query(method, base).map(|level| (level, layer.origin)))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method_info::{MethodInfo, TypeInfo};

    const FALLBACK: (EventLevel, LevelOrigin) =
        (EventLevel::LogAlways, LevelOrigin::ConfiguredDefault);

    #[test]
    fn test_chain_order() {
        let faulted: Vec<_> = FAULTED_CHAIN.iter().map(|l| l.origin()).collect();
        assert_eq!(
            faulted,
            vec![LevelOrigin::MethodException, LevelOrigin::TypeException]
        );

        let ordinary: Vec<_> = ORDINARY_CHAIN.iter().map(|l| l.origin()).collect();
        assert_eq!(
            ordinary,
            vec![LevelOrigin::TypeDefault, LevelOrigin::BaseDescriptor]
        );
    }

    #[test]
    fn test_chain_for_phase() {
        assert_eq!(
            chain_for(InvocationContextType::MethodFaulted).len(),
            FAULTED_CHAIN.len()
        );
        assert_eq!(
            chain_for(InvocationContextType::MethodCall)[0].origin(),
            LevelOrigin::TypeDefault
        );
        assert_eq!(
            chain_for(InvocationContextType::Unrecognized(7))[0].origin(),
            LevelOrigin::TypeDefault
        );
    }

    #[test]
    fn test_empty_chain_uses_fallback() {
        let m = MethodInfo::new(TypeInfo::new("T"), "m");
        assert_eq!(evaluate(&[], &m, None, FALLBACK), FALLBACK);
    }

    #[test]
    fn test_first_layer_with_value_wins() {
        let m = MethodInfo::new(TypeInfo::new("T").with_exception_level(EventLevel::Warning), "m")
            .with_exception_level(EventLevel::Critical);
        assert_eq!(
            evaluate(FAULTED_CHAIN, &m, None, FALLBACK),
            (EventLevel::Critical, LevelOrigin::MethodException)
        );

        let m = MethodInfo::new(TypeInfo::new("T").with_exception_level(EventLevel::Warning), "m");
        assert_eq!(
            evaluate(FAULTED_CHAIN, &m, None, FALLBACK),
            (EventLevel::Warning, LevelOrigin::TypeException)
        );
    }

    #[test]
    fn test_base_layer_only_answers_with_base() {
        let m = MethodInfo::new(TypeInfo::new("T"), "m");
        let base = EventDescriptor::new(1, EventLevel::Verbose, "");
        assert_eq!(
            evaluate(ORDINARY_CHAIN, &m, Some(&base), FALLBACK),
            (EventLevel::Verbose, LevelOrigin::BaseDescriptor)
        );
        assert_eq!(evaluate(ORDINARY_CHAIN, &m, None, FALLBACK), FALLBACK);
    }

    #[test]
    fn test_single_layer_query() {
        let m = MethodInfo::new(TypeInfo::new("T").with_default_level(EventLevel::Error), "m");
        assert_eq!(ORDINARY_CHAIN[0].query(&m, None), Some(EventLevel::Error));
        assert_eq!(FAULTED_CHAIN[1].query(&m, None), None);
    }

    #[test]
    fn test_origin_display_matches_serde() {
        let json = serde_json::to_string(&LevelOrigin::BaseDescriptor).unwrap();
        assert_eq!(json, format!("\"{}\"", LevelOrigin::BaseDescriptor));
    }
}
