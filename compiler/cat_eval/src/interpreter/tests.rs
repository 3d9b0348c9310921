use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::capability::HostObject;
use crate::errors::{no_such_member, EvalErrorKind};
use crate::print_handler::{buffer_handler, silent_handler};
use pretty_assertions::assert_eq;

fn interp() -> Interpreter {
    InterpreterBuilder::new()
        .print_handler(silent_handler())
        .build()
}

fn kind_of(result: EvalResult) -> Option<EvalErrorKind> {
    result.err().map(|e| e.kind)
}

// === Atom dispatch ===

#[test]
fn test_literals_are_pushed() {
    let mut interp = interp();
    assert!(interp.eval(r#"1 2.5 "two words" 'w"#).is_ok());
    assert_eq!(
        interp.values(),
        &[
            Value::Int(1),
            Value::Float(2.5),
            Value::text("two words"),
            Value::text("w"),
        ]
    );
}

#[test]
fn test_quotation_is_pushed_unevaluated() {
    let mut interp = interp();
    assert!(interp.eval("[1 2 +]").is_ok());
    assert!(matches!(
        interp.values(),
        [Value::Callable(Callable::Quotation(_))]
    ));
}

#[test]
fn test_unresolved_word_is_pushed_as_text() {
    let mut interp = interp();
    assert!(interp.eval("hello nope:word foo.bar").is_ok());
    assert_eq!(
        interp.values(),
        &[
            Value::text("hello"),
            Value::text("nope:word"),
            Value::text("foo.bar"),
        ]
    );
}

#[test]
fn test_variable_shadows_word() {
    let mut interp = interp();
    assert!(interp.eval("5 'dup ! dup").is_ok());
    assert_eq!(interp.values(), &[Value::Int(5)]);
}

#[test]
fn test_eval_stops_at_failing_atom() {
    let mut interp = interp();
    assert!(interp.eval("1 pop pop 2").is_err());
    assert!(interp.values().is_empty());
}

#[test]
fn test_run_word_requires_a_word() {
    let mut interp = interp();
    assert_eq!(
        kind_of(interp.run_word("nosuch")),
        Some(EvalErrorKind::UndefinedWord {
            name: "nosuch".to_string(),
            namespace: "std".to_string(),
        })
    );
}

#[test]
fn test_cyclic_links_terminate() {
    let mut interp = interp();
    for ns in ["a", "b"] {
        assert!(interp.namespaces.create(ns).is_ok());
    }
    assert!(interp.namespaces.add_link("a", "b").is_ok());
    assert!(interp.namespaces.add_link("b", "a").is_ok());
    assert!(matches!(
        kind_of(interp.run_word("a:zzz")),
        Some(EvalErrorKind::UndefinedWord { .. })
    ));
}

#[test]
fn test_deeply_nested_quotation_evaluates() {
    let depth = 50_000;
    let src = format!("{}1{} apply", "[".repeat(depth), "]".repeat(depth));
    let mut interp = interp();
    assert!(interp.eval(&src).is_ok());
    match interp.values() {
        [Value::Callable(Callable::Quotation(q))] => assert_eq!(q.len(), 1),
        other => panic!("expected one quotation, got {} values", other.len()),
    }
}

// === Calling values ===

#[test]
fn test_call_list_runs_text_as_words() {
    let mut interp = interp();
    let program = Value::List(vec![Value::Int(3), Value::text("dup"), Value::text("*")]);
    assert!(interp.call(&program).is_ok());
    assert_eq!(interp.values(), &[Value::Int(9)]);
}

#[test]
fn test_call_text_evaluates_source() {
    let mut interp = interp();
    assert!(interp.call(&Value::text("2 3 +")).is_ok());
    assert_eq!(interp.values(), &[Value::Int(5)]);
}

#[test]
fn test_call_word_reference() {
    let mut interp = interp();
    interp.stack.push(Value::Int(4));
    assert!(interp
        .call_callable(&Callable::Word("dup".to_string()))
        .is_ok());
    assert_eq!(interp.values(), &[Value::Int(4), Value::Int(4)]);
}

// === Scoped evaluation ===

#[test]
fn test_fresh_stack_restores_outer_stack() {
    let mut interp = interp();
    interp.stack.push(Value::Int(1));
    let inner = {
        let mut scoped = interp.fresh_stack();
        assert!(scoped.eval("7 8").is_ok());
        scoped.collect()
    };
    assert_eq!(inner, vec![Value::Int(7), Value::Int(8)]);
    assert_eq!(interp.values(), &[Value::Int(1)]);
}

#[test]
fn test_fresh_stack_restores_on_error() {
    let mut interp = interp();
    interp.stack.push(Value::Int(1));
    {
        let mut scoped = interp.fresh_stack();
        assert!(scoped.eval("9 pop pop").is_err());
    }
    assert_eq!(interp.values(), &[Value::Int(1)]);
}

#[test]
fn test_qualified_call_switches_user_namespace() {
    let mut interp = interp();
    assert!(interp.eval("'lib createNS").is_ok());
    assert!(interp.eval("define lib:who { getUserNS }").is_ok());
    assert!(interp.eval("lib:who getUserNS").is_ok());
    assert_eq!(interp.values(), &[Value::text("lib"), Value::text("user")]);
}

#[test]
fn test_qualified_call_restores_namespace_on_error() {
    let mut interp = interp();
    assert!(interp.eval("'lib createNS").is_ok());
    assert!(interp.eval("define lib:bad { pop }").is_ok());
    assert!(interp.eval("lib:bad").is_err());
    assert_eq!(interp.namespaces.current_user(), "user");
}

#[test]
fn test_in_user_namespace_rejects_reserved() {
    let mut interp = interp();
    assert!(interp.in_user_namespace("cat_stack").is_err());
    assert!(interp.in_user_namespace("missing").is_err());
}

// === Recursion and backtraces ===

#[test]
fn test_recursion_limit() {
    let config = EvalConfig {
        max_depth: Some(50),
        ..EvalConfig::default()
    };
    let mut interp = InterpreterBuilder::new()
        .config(config)
        .print_handler(silent_handler())
        .build();
    assert!(interp.eval("define forever { forever }").is_ok());
    assert_eq!(
        kind_of(interp.eval("forever")),
        Some(EvalErrorKind::RecursionLimit { limit: 50 })
    );
    assert_eq!(interp.call_depth(), 0);
}

#[test]
fn test_deep_recursion_within_limit() {
    let mut interp = interp();
    assert!(interp
        .eval("define countdown { dup 0 > [1 - countdown] [] if }")
        .is_ok());
    assert!(interp.eval("2000 countdown").is_ok());
    assert_eq!(interp.values(), &[Value::Int(0)]);
}

#[test]
fn test_backtrace_lists_active_words() {
    let mut interp = interp();
    assert!(interp.eval("define inner { pop }").is_ok());
    assert!(interp.eval("define outer { inner }").is_ok());
    let err = interp.eval("outer").err();
    let frames = err
        .and_then(|e| e.backtrace)
        .map(|bt| bt.frames().to_vec());
    assert_eq!(
        frames,
        Some(vec!["inner".to_string(), "outer".to_string()])
    );
}

// === Tracing ===

#[test]
fn test_trace_writes_atoms_and_stack() {
    let handler = buffer_handler();
    let config = EvalConfig {
        trace: true,
        ..EvalConfig::default()
    };
    let mut interp = InterpreterBuilder::new()
        .config(config)
        .print_handler(handler.clone())
        .build();
    assert!(interp.eval("1 2").is_ok());
    assert_eq!(handler.get_output(), "1\t[]\n2\t[1]\n");
}

// === Host objects and capabilities ===

#[derive(Debug, Default)]
struct Counter {
    count: Cell<i64>,
}

impl HostObject for Counter {
    fn type_name(&self) -> &str {
        "Counter"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        (name == "count").then(|| Value::Int(self.count.get()))
    }

    fn has_method(&self, name: &str) -> bool {
        name == "bump"
    }

    fn call_method(&self, name: &str, args: Vec<Value>) -> EvalResult<Option<Value>> {
        if name != "bump" {
            return Err(no_such_member(name, "Counter"));
        }
        let by: i64 = args
            .iter()
            .map(|a| match a {
                Value::Int(n) => *n,
                _ => 0,
            })
            .sum();
        self.count.set(self.count.get() + by.max(1));
        Ok(Some(Value::Int(self.count.get())))
    }
}

fn with_counter() -> Interpreter {
    let mut interp = interp();
    let counter: Rc<dyn HostObject> = Rc::new(Counter::default());
    assert!(interp
        .namespaces
        .add_instance("user", "c", Value::Instance(counter))
        .is_ok());
    interp
}

#[test]
fn test_instance_method_without_args() {
    let mut interp = with_counter();
    assert!(interp.eval("c.bump c.count").is_ok());
    assert_eq!(interp.values(), &[Value::Int(1), Value::Int(1)]);
}

#[test]
fn test_instance_method_spreads_list_args() {
    let mut interp = with_counter();
    assert!(interp.eval("[5 6] c.bump c.count").is_ok());
    assert_eq!(interp.values(), &[Value::Int(11), Value::Int(11)]);
}

#[test]
fn test_instance_unknown_member() {
    let mut interp = with_counter();
    assert_eq!(
        kind_of(interp.eval("c.missing")),
        Some(EvalErrorKind::NoSuchMember {
            member: "missing".to_string(),
            type_name: "Counter".to_string(),
        })
    );
}

#[test]
fn test_qualified_instance_access() {
    let mut interp = with_counter();
    assert!(interp.eval("user:c.bump user:c.count").is_ok());
    assert_eq!(interp.values(), &[Value::Int(1), Value::Int(1)]);
}

#[test]
fn test_qualified_missing_instance_is_an_error() {
    let mut interp = with_counter();
    assert_eq!(
        kind_of(interp.eval("user:nobody.count")),
        Some(EvalErrorKind::UndefinedInstance {
            name: "nobody".to_string(),
            namespace: "user".to_string(),
        })
    );
}

#[test]
fn test_unknown_qualifier_on_member_path_is_text() {
    let mut interp = with_counter();
    assert!(interp.eval("ghost:c.count").is_ok());
    assert_eq!(interp.values(), &[Value::text("ghost:c.count")]);
}

#[test]
fn test_math_capabilities() {
    let mut interp = interp();
    assert!(interp.eval("16 math.sqrt 2 10 math.pow math.pi").is_ok());
    assert_eq!(
        interp.values(),
        &[
            Value::Float(4.0),
            Value::Float(1024.0),
            Value::Float(std::f64::consts::PI),
        ]
    );
}

#[test]
fn test_registered_capability_gets_arguments_bottom_first() {
    let mut interp = InterpreterBuilder::new()
        .print_handler(silent_handler())
        .register_fn("host.sub", Arity::Exact(2), |args| match args.as_slice() {
            [Value::Int(a), Value::Int(b)] => Ok(Some(Value::Int(a - b))),
            _ => Ok(None),
        })
        .register_constant("host.answer", Value::Int(42))
        .build();
    assert!(interp.eval("10 3 host.sub host.answer").is_ok());
    assert_eq!(interp.values(), &[Value::Int(7), Value::Int(42)]);
}

#[test]
fn test_capability_underflow() {
    let mut interp = interp();
    assert!(matches!(
        kind_of(interp.eval("2 math.pow")),
        Some(EvalErrorKind::StackUnderflow { .. })
    ));
}
