//! Comparisons and boolean logic.

use std::cmp::Ordering;

use super::helpers::{as_float, compare};
use super::BuiltinWord;
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub(super) const WORDS: &[BuiltinWord] = &[
    BuiltinWord { names: &["=", "eq", "=="], effect: "a b -- bool", run: eq },
    BuiltinWord { names: &["!=", "neq"], effect: "a b -- bool", run: neq },
    BuiltinWord { names: &["<", "lt"], effect: "a b -- a<b", run: lt },
    BuiltinWord { names: &[">", "gt"], effect: "a b -- a>b", run: gt },
    BuiltinWord { names: &["<=", "lteq"], effect: "a b -- a<=b", run: lteq },
    BuiltinWord { names: &[">=", "gteq"], effect: "a b -- a>=b", run: gteq },
    BuiltinWord { names: &["true"], effect: "-- true", run: push_true },
    BuiltinWord { names: &["false"], effect: "-- false", run: push_false },
    BuiltinWord { names: &["not"], effect: "a -- !a", run: not },
    BuiltinWord { names: &["and"], effect: "a b -- a&&b", run: and },
    BuiltinWord { names: &["or"], effect: "a b -- a||b", run: or },
    BuiltinWord { names: &["eqz"], effect: "n -- n==0", run: eqz },
    BuiltinWord { names: &["nez"], effect: "n -- n!=0", run: nez },
    BuiltinWord { names: &["gtz"], effect: "n -- n>0", run: gtz },
    BuiltinWord { names: &["gez"], effect: "n -- n>=0", run: gez },
    BuiltinWord { names: &["ltz"], effect: "n -- n<0", run: ltz },
    BuiltinWord { names: &["lez"], effect: "n -- n<=0", run: lez },
];

fn eq(interp: &mut Interpreter) -> EvalResult {
    let (b, a) = interp.stack.pop2()?;
    interp.stack.push(Value::Bool(a == b));
    Ok(())
}

fn neq(interp: &mut Interpreter) -> EvalResult {
    let (b, a) = interp.stack.pop2()?;
    interp.stack.push(Value::Bool(a != b));
    Ok(())
}

/// Compare `a b` and push whether the ordering is one of `accept`.
fn ordered(interp: &mut Interpreter, word: &str, accept: &[Ordering]) -> EvalResult {
    let (b, a) = interp.stack.pop2()?;
    let ord = compare(word, &a, &b)?;
    interp.stack.push(Value::Bool(accept.contains(&ord)));
    Ok(())
}

fn lt(interp: &mut Interpreter) -> EvalResult {
    ordered(interp, "<", &[Ordering::Less])
}

fn gt(interp: &mut Interpreter) -> EvalResult {
    ordered(interp, ">", &[Ordering::Greater])
}

fn lteq(interp: &mut Interpreter) -> EvalResult {
    ordered(interp, "<=", &[Ordering::Less, Ordering::Equal])
}

fn gteq(interp: &mut Interpreter) -> EvalResult {
    ordered(interp, ">=", &[Ordering::Greater, Ordering::Equal])
}

fn push_true(interp: &mut Interpreter) -> EvalResult {
    interp.stack.push(Value::Bool(true));
    Ok(())
}

fn push_false(interp: &mut Interpreter) -> EvalResult {
    interp.stack.push(Value::Bool(false));
    Ok(())
}

fn not(interp: &mut Interpreter) -> EvalResult {
    let top = interp.stack.pop()?;
    interp.stack.push(Value::Bool(!top.is_truthy()));
    Ok(())
}

fn and(interp: &mut Interpreter) -> EvalResult {
    let (b, a) = interp.stack.pop2()?;
    interp.stack.push(Value::Bool(a.is_truthy() && b.is_truthy()));
    Ok(())
}

fn or(interp: &mut Interpreter) -> EvalResult {
    let (b, a) = interp.stack.pop2()?;
    interp.stack.push(Value::Bool(a.is_truthy() || b.is_truthy()));
    Ok(())
}

/// Compare a number against zero.
fn sign_test(interp: &mut Interpreter, word: &str, test: fn(f64) -> bool) -> EvalResult {
    let n = interp.stack.pop()?;
    let x = as_float(word, &n)?;
    interp.stack.push(Value::Bool(test(x)));
    Ok(())
}

fn eqz(interp: &mut Interpreter) -> EvalResult {
    sign_test(interp, "eqz", |x| x == 0.0)
}

fn nez(interp: &mut Interpreter) -> EvalResult {
    sign_test(interp, "nez", |x| x != 0.0)
}

fn gtz(interp: &mut Interpreter) -> EvalResult {
    sign_test(interp, "gtz", |x| x > 0.0)
}

fn gez(interp: &mut Interpreter) -> EvalResult {
    sign_test(interp, "gez", |x| x >= 0.0)
}

fn ltz(interp: &mut Interpreter) -> EvalResult {
    sign_test(interp, "ltz", |x| x < 0.0)
}

fn lez(interp: &mut Interpreter) -> EvalResult {
    sign_test(interp, "lez", |x| x <= 0.0)
}
