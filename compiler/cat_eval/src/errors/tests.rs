use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_factory_message_matches_kind() {
    let err = undefined_word("frob", "std");
    assert_eq!(err.message, err.kind.to_string());
    assert_eq!(err.message, "undefined word 'frob' (searched from 'std')");
}

#[test]
fn test_user_raised_prefix() {
    assert_eq!(user_raised("boom").to_string(), "cat exception: boom");
}

#[test]
fn test_stack_error_converts() {
    let err: EvalError = StackError::Underflow {
        needed: 2,
        available: 1,
    }
    .into();
    assert_eq!(
        err.kind,
        EvalErrorKind::StackUnderflow {
            needed: 2,
            available: 1
        }
    );
}

#[test]
fn test_aux_underflow_keeps_its_message() {
    let err: EvalError = StackError::AuxUnderflow {
        needed: 1,
        available: 0,
    }
    .into();
    assert!(err.message.starts_with("aux stack underflow"));
    assert!(matches!(err.kind, EvalErrorKind::StackUnderflow { .. }));
}

#[test]
fn test_namespace_error_converts() {
    let err: EvalError = NamespaceError::Protected {
        name: "std".to_string(),
    }
    .into();
    assert!(matches!(err.kind, EvalErrorKind::Namespace(_)));
    assert_eq!(err.message, "namespace 'std' is protected");
}

#[test]
fn test_halt_is_not_catchable() {
    assert!(!halt(0).is_catchable());
    assert!(user_raised("x").is_catchable());
}

#[test]
fn test_backtrace_display() {
    let bt = EvalBacktrace::new(vec!["inner".to_string(), "outer".to_string()]);
    assert_eq!(bt.to_string(), "word backtrace:\n  0: inner\n  1: outer\n");
    assert!(EvalBacktrace::default().to_string().is_empty());
}
