use super::*;
use crate::errors::EvalErrorKind;
use pretty_assertions::assert_eq;

fn call(registry: &CapabilityRegistry, name: &str, args: Vec<Value>) -> EvalResult<Option<Value>> {
    match registry.get(name) {
        Some(Capability::Function { thunk, .. }) => thunk(args),
        other => panic!("{name} is not a function: {other:?}"),
    }
}

#[test]
fn test_math_module_is_registered() {
    let registry = CapabilityRegistry::new().with_math();
    assert!(registry.contains("math.pi"));
    assert!(registry.contains("math.sqrt"));
    assert!(!registry.contains("math.nope"));
    assert!(matches!(
        registry.get("math.sqrt"),
        Some(Capability::Function {
            arity: Arity::Exact(1),
            ..
        })
    ));
}

#[test]
fn test_math_functions() {
    let registry = CapabilityRegistry::new().with_math();
    let sqrt = call(&registry, "math.sqrt", vec![Value::Int(16)]);
    assert_eq!(sqrt.ok().flatten(), Some(Value::Float(4.0)));
    let pow = call(&registry, "math.pow", vec![Value::Int(2), Value::Int(10)]);
    assert_eq!(pow.ok().flatten(), Some(Value::Float(1024.0)));
}

#[test]
fn test_math_rejects_text() {
    let registry = CapabilityRegistry::new().with_math();
    let err = call(&registry, "math.floor", vec![Value::text("x")]).err();
    assert!(matches!(
        err.map(|e| e.kind),
        Some(EvalErrorKind::TypeMismatch { .. })
    ));
}

#[test]
fn test_register_custom_function() {
    let mut registry = CapabilityRegistry::new();
    registry.register_fn("host.count", Arity::Variadic, |args| {
        Ok(Some(Value::Int(i64::try_from(args.len()).unwrap_or(i64::MAX))))
    });
    registry.register_constant("host.answer", Value::Int(42));
    assert_eq!(registry.names(), vec!["host.answer", "host.count"]);
    let n = call(&registry, "host.count", vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(n.ok().flatten(), Some(Value::Int(2)));
}
