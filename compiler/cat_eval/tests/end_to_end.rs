//! End-to-end programs run through the public interpreter API.

use cat_eval::{silent_handler, EvalErrorKind, Interpreter, InterpreterBuilder, Value};
use pretty_assertions::assert_eq;

fn interp() -> Interpreter {
    InterpreterBuilder::new()
        .print_handler(silent_handler())
        .build()
}

/// Evaluate each statement in order and return the final stack.
fn run(statements: &[&str]) -> Vec<Value> {
    let mut interp = interp();
    for statement in statements {
        if let Err(err) = interp.eval(statement) {
            panic!("`{statement}` failed: {err}");
        }
    }
    interp.values().to_vec()
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

#[test]
fn arithmetic_and_shuffles() {
    assert_eq!(run(&["3 5 +"]), ints(&[8]));
    assert_eq!(run(&["10 9 -"]), ints(&[1]));
    assert_eq!(run(&["1 2 swap"]), ints(&[2, 1]));
}

#[test]
fn defined_word() {
    assert_eq!(run(&["define inc { 1 + }", "41 inc"]), ints(&[42]));
}

#[test]
fn list_words() {
    assert_eq!(
        run(&["[1 2 3] 4 cons"]),
        vec![Value::List(ints(&[1, 2, 3, 4]))]
    );
    assert_eq!(
        run(&["'a 'b pair"]),
        vec![Value::List(vec![Value::text("a"), Value::text("b")])]
    );
}

#[test]
fn documented_definition_with_effect() {
    assert_eq!(
        run(&[
            "define square : (n -- n*n) {{ multiply by itself }} { dup * }",
            "6 square",
        ]),
        ints(&[36])
    );
}

#[test]
fn recursive_definition() {
    assert_eq!(
        run(&[
            "define fact { dup 1 <= [pop 1] [dup 1 - fact *] if }",
            "10 fact",
        ]),
        ints(&[3_628_800])
    );
}

#[test]
fn try_catch_recovers_from_error() {
    assert_eq!(run(&["1 [0 /] [pop 99] try_catch"]), ints(&[1, 99]));
}

#[test]
fn mutually_linked_namespaces_report_missing_word() {
    let mut interp = interp();
    for statement in [
        "'a createNS",
        "'b createNS",
        "'a focusNS 'b linkToNS",
        "'b focusNS 'a linkToNS",
    ] {
        assert!(interp.eval(statement).is_ok(), "{statement}");
    }
    let err = interp.run_word("a:absent").err().map(|e| e.kind);
    assert!(matches!(err, Some(EvalErrorKind::UndefinedWord { .. })));
}

#[test]
fn reload_is_idempotent_unless_forced() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let file = dir.path().join("seven.cat");
    std::fs::write(&file, "// pushes a seven\ndefine seven { 7 }\nseven\n")?;
    let path = file.to_string_lossy().to_string();

    let mut interp = interp();
    assert!(interp.load_file(&path, None, false)?);
    assert!(!interp.load_file(&path, None, false)?);
    assert_eq!(interp.values(), ints(&[7]).as_slice());

    assert!(interp.load_file(&path, None, true)?);
    assert_eq!(interp.values(), ints(&[7, 7]).as_slice());
    Ok(())
}
