//! Resolver integration tests: phase behaviour and level precedence
//!
//! These drive the resolver through a hand-written `MethodMetadata`
//! implementation, the way an interception layer with its own metadata
//! model would.

use eventpolicy::{
    EventAttributeResolver, EventDescriptor, EventLevel, InvocationContext, InvocationContextType,
    LevelOrigin, MethodMetadata, ParameterMapping, ResolveError,
};

/// Metadata with every override layer individually switchable
#[derive(Default)]
struct Target {
    returns_value: bool,
    event: Option<EventDescriptor>,
    method_exception: Option<EventLevel>,
    type_exception: Option<EventLevel>,
    type_default: Option<EventLevel>,
}

impl MethodMetadata for Target {
    fn method_name(&self) -> &str {
        "transfer"
    }

    fn declaring_type_name(&self) -> &str {
        "Ledger"
    }

    fn returns_void(&self) -> bool {
        !self.returns_value
    }

    fn event_override(&self) -> Option<&EventDescriptor> {
        self.event.as_ref()
    }

    fn method_exception_level(&self) -> Option<EventLevel> {
        self.method_exception
    }

    fn type_exception_level(&self) -> Option<EventLevel> {
        self.type_exception
    }

    fn type_default_level(&self) -> Option<EventLevel> {
        self.type_default
    }
}

fn resolver() -> EventAttributeResolver {
    EventAttributeResolver::new(EventLevel::Informational, EventLevel::Error)
}

fn mapping(n: usize) -> ParameterMapping {
    (0..n).map(|i| format!("p{}", i)).collect()
}

#[test]
fn test_call_with_four_parameters() {
    let t = Target::default();
    let d = resolver()
        .resolve_for_call(Some(&InvocationContext::call(&t)), 1, Some(&mapping(4)))
        .unwrap();
    assert_eq!(d.message, "{0} {1} {2} {3}");
    assert_eq!(d.id, 1);
}

#[test]
fn test_call_with_no_parameters() {
    let t = Target::default();
    let d = resolver()
        .resolve_for_call(Some(&InvocationContext::call(&t)), 1, Some(&mapping(0)))
        .unwrap();
    assert_eq!(d.message, "");
}

#[test]
fn test_override_returned_regardless_of_inputs() {
    let explicit = EventDescriptor::new(77, EventLevel::Critical, "moved {1} from {0}")
        .with_keywords(0x8000_0000_0000_0001)
        .with_opcode(9)
        .with_task(300)
        .with_version(4);
    let t = Target {
        event: Some(explicit.clone()),
        type_default: Some(EventLevel::Verbose),
        ..Target::default()
    };

    for (id, params) in [(1, 0), (2, 3), (u32::MAX, 12)] {
        let d = resolver()
            .resolve_for_call(Some(&InvocationContext::call(&t)), id, Some(&mapping(params)))
            .unwrap();
        assert_eq!(d, explicit);
    }
}

#[test]
fn test_faulted_message_ignores_base_message() {
    let t = Target {
        returns_value: true,
        ..Target::default()
    };
    for message in ["", "{0} {1} {2}", "free text"] {
        let base = EventDescriptor::new(1, EventLevel::Informational, message);
        let d = resolver()
            .derive_from_base(Some(&base), Some(&InvocationContext::faulted(&t)), 2)
            .unwrap();
        assert_eq!(d.message, "{0}");
    }
}

#[test]
fn test_completion_message_follows_return_type() {
    let base = EventDescriptor::new(1, EventLevel::Informational, "{0}");

    let valued = Target {
        returns_value: true,
        ..Target::default()
    };
    let d = resolver()
        .derive_from_base(Some(&base), Some(&InvocationContext::completion(&valued)), 2)
        .unwrap();
    assert_eq!(d.message, "{0}");

    let void = Target::default();
    let d = resolver()
        .derive_from_base(Some(&base), Some(&InvocationContext::completion(&void)), 2)
        .unwrap();
    assert_eq!(d.message, "");
}

#[test]
fn test_faulted_precedence() {
    let r = resolver();
    let base = EventDescriptor::new(1, EventLevel::Verbose, "");

    // method exception level beats type exception level
    let t = Target {
        method_exception: Some(EventLevel::Critical),
        type_exception: Some(EventLevel::Warning),
        type_default: Some(EventLevel::Verbose),
        ..Target::default()
    };
    let ctx = InvocationContext::faulted(&t);
    assert_eq!(
        r.resolve_level(&ctx, Some(&base)),
        (EventLevel::Critical, LevelOrigin::MethodException)
    );

    // type exception level beats the configured exception level
    let t = Target {
        type_exception: Some(EventLevel::Warning),
        type_default: Some(EventLevel::Verbose),
        ..Target::default()
    };
    let ctx = InvocationContext::faulted(&t);
    assert_eq!(
        r.resolve_level(&ctx, Some(&base)),
        (EventLevel::Warning, LevelOrigin::TypeException)
    );

    // ordinary layers are never consulted for faults
    let t = Target {
        type_default: Some(EventLevel::Verbose),
        ..Target::default()
    };
    let ctx = InvocationContext::faulted(&t);
    assert_eq!(
        r.resolve_level(&ctx, Some(&base)),
        (EventLevel::Error, LevelOrigin::ConfiguredException)
    );
}

#[test]
fn test_ordinary_precedence() {
    let r = resolver();
    let base = EventDescriptor::new(1, EventLevel::Verbose, "");

    // type default beats the base level
    let t = Target {
        type_default: Some(EventLevel::Warning),
        method_exception: Some(EventLevel::Critical),
        ..Target::default()
    };
    let ctx = InvocationContext::completion(&t);
    assert_eq!(
        r.resolve_level(&ctx, Some(&base)),
        (EventLevel::Warning, LevelOrigin::TypeDefault)
    );

    // base level beats the configured default
    let t = Target {
        method_exception: Some(EventLevel::Critical),
        ..Target::default()
    };
    let ctx = InvocationContext::completion(&t);
    assert_eq!(
        r.resolve_level(&ctx, Some(&base)),
        (EventLevel::Verbose, LevelOrigin::BaseDescriptor)
    );

    // nothing configured: resolver default
    let ctx = InvocationContext::call(&t);
    assert_eq!(
        r.resolve_level(&ctx, None),
        (EventLevel::Informational, LevelOrigin::ConfiguredDefault)
    );
}

#[test]
fn test_derivation_keeps_correlation_and_takes_fresh_id() {
    let t = Target {
        returns_value: true,
        ..Target::default()
    };
    let base = EventDescriptor::new(10, EventLevel::Warning, "{0} {1}")
        .with_keywords(0x30)
        .with_opcode(1)
        .with_task(42)
        .with_version(2);

    let r = resolver();
    let done = r
        .derive_from_base(Some(&base), Some(&InvocationContext::completion(&t)), 11)
        .unwrap();
    let fault = r
        .derive_from_base(Some(&base), Some(&InvocationContext::faulted(&t)), 12)
        .unwrap();

    assert_eq!(done.id, 11);
    assert_eq!(fault.id, 12);
    assert!(done.correlates_with(&base));
    assert!(fault.correlates_with(&base));
    assert_eq!(done.level, EventLevel::Warning);
    assert_eq!(fault.level, EventLevel::Error);
}

#[test]
fn test_invalid_arguments() {
    let r = resolver();
    let t = Target::default();
    let base = EventDescriptor::new(1, EventLevel::Informational, "");

    assert!(matches!(
        r.resolve_for_call(None, 1, Some(&mapping(1))),
        Err(ResolveError::InvalidArgument { .. })
    ));
    assert!(matches!(
        r.derive_from_base(Some(&base), None, 1),
        Err(ResolveError::InvalidArgument { .. })
    ));
    assert!(matches!(
        r.derive_from_base(None, Some(&InvocationContext::faulted(&t)), 1),
        Err(ResolveError::InvalidArgument { .. })
    ));
    assert!(matches!(
        r.resolve_for_call(Some(&InvocationContext::call(&t)), 1, None),
        Err(ResolveError::InvalidArgument { .. })
    ));
}

#[test]
fn test_missing_mapping_only_matters_for_calls() {
    let t = Target {
        returns_value: true,
        ..Target::default()
    };
    let r = resolver();
    let d = r
        .resolve_for_call(Some(&InvocationContext::completion(&t)), 5, None)
        .unwrap();
    assert_eq!(d.message, "{0}");

    let d = r
        .resolve_for_call(Some(&InvocationContext::faulted(&t)), 6, None)
        .unwrap();
    assert_eq!((d.message.as_str(), d.level), ("{0}", EventLevel::Error));
}

#[test]
fn test_unrecognized_phase_falls_back_to_empty_message() {
    let t = Target {
        returns_value: true,
        ..Target::default()
    };
    let ctx = InvocationContext::new(InvocationContextType::from_code(200), &t);
    let base = EventDescriptor::new(1, EventLevel::Warning, "{0}");

    let d = resolver().derive_from_base(Some(&base), Some(&ctx), 2).unwrap();
    assert_eq!(d.message, "");
    assert_eq!(d.level, EventLevel::Warning);
}

#[test]
fn test_resolver_shared_across_threads() {
    let r = resolver();
    let handles: Vec<_> = (0..4u32)
        .map(|i| {
            std::thread::spawn(move || {
                let t = Target {
                    type_default: Some(EventLevel::Warning),
                    ..Target::default()
                };
                r.resolve_for_call(Some(&InvocationContext::call(&t)), i, Some(&mapping(2)))
                    .unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let d = handle.join().unwrap();
        assert_eq!(d.id, i as u32);
        assert_eq!(d.level, EventLevel::Warning);
        assert_eq!(d.message, "{0} {1}");
    }
}
