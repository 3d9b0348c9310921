//! Argument extraction and shared conversions for native words.

use std::cmp::Ordering;

use crate::errors::{integer_overflow, type_mismatch, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Largest float magnitude that converts to `i64` without saturating.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Convert an integral float to `i64`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "range and integrality are checked first"
)]
pub(super) fn float_to_int(word: &str, x: f64) -> EvalResult<i64> {
    let x = x.trunc();
    if x.is_finite() && (-I64_BOUND..I64_BOUND).contains(&x) {
        Ok(x as i64)
    } else {
        Err(integer_overflow(word))
    }
}

/// Read an integer argument. Bools count as 0/1 and integral floats are
/// accepted.
pub(super) fn as_int(word: &str, value: &Value) -> EvalResult<i64> {
    match value {
        Value::Int(n) => Ok(*n),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Float(x) if x.fract() == 0.0 => float_to_int(word, *x),
        other => Err(type_mismatch(word, "int", other.type_name())),
    }
}

/// Read a numeric argument as `f64`.
pub(super) fn as_float(word: &str, value: &Value) -> EvalResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| type_mismatch(word, "number", value.type_name()))
}

/// Require a number, returning it unchanged.
pub(super) fn require_number(word: &str, value: Value) -> EvalResult<Value> {
    match value {
        Value::Int(_) | Value::Float(_) => Ok(value),
        other => Err(type_mismatch(word, "number", other.type_name())),
    }
}

#[inline]
pub(super) fn pop_int(interp: &mut Interpreter, word: &str) -> EvalResult<i64> {
    let value = interp.stack.pop()?;
    as_int(word, &value)
}

#[inline]
pub(super) fn pop_number(interp: &mut Interpreter, word: &str) -> EvalResult<Value> {
    let value = interp.stack.pop()?;
    require_number(word, value)
}

/// Pop a list, or a quotation viewed as a list.
pub(super) fn pop_list(interp: &mut Interpreter, word: &str) -> EvalResult<Vec<Value>> {
    let value = interp.stack.pop()?;
    let got = value.type_name();
    value
        .into_list()
        .ok_or_else(|| type_mismatch(word, "list", got))
}

pub(super) fn pop_text(interp: &mut Interpreter, word: &str) -> EvalResult<String> {
    match interp.stack.pop()? {
        Value::Text(s) => Ok(s),
        other => Err(type_mismatch(word, "string", other.type_name())),
    }
}

/// Pop one or more names: `'a,b,c` or a list of strings.
pub(super) fn pop_names(interp: &mut Interpreter, word: &str) -> EvalResult<Vec<String>> {
    let value = interp.stack.pop()?;
    match value {
        Value::Text(s) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()),
        other if other.is_list_like() => other
            .into_list()
            .unwrap_or_default()
            .into_iter()
            .map(|item| match item {
                Value::Text(s) => Ok(s),
                other => Err(type_mismatch(word, "string", other.type_name())),
            })
            .collect(),
        other => Err(type_mismatch(word, "string or list of strings", other.type_name())),
    }
}

/// A collection length as a value.
pub(super) fn len_value(len: usize) -> EvalResult<Value> {
    i64::try_from(len)
        .map(Value::Int)
        .map_err(|_| integer_overflow("len"))
}

/// Python-style index into a sequence of `len` items; negative counts from
/// the end.
pub(super) fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len_i = i64::try_from(len).ok()?;
    let idx = if index < 0 { index + len_i } else { index };
    usize::try_from(idx).ok().filter(|&i| i < len)
}

/// Order two values: numbers across int and float, strings, bools, and
/// lists element by element.
pub(super) fn compare(word: &str, a: &Value, b: &Value) -> EvalResult<Ordering> {
    let incomparable = || type_mismatch(word, a.type_name(), b.type_name());
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .ok_or_else(incomparable),
        (Value::Text(x), Value::Text(y)) => Ok(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Ok(x.cmp(y)),
        (Value::List(xs), Value::List(ys)) => {
            for (x, y) in xs.iter().zip(ys) {
                let ord = compare(word, x, y)?;
                if ord != Ordering::Equal {
                    return Ok(ord);
                }
            }
            Ok(xs.len().cmp(&ys.len()))
        }
        _ => Err(incomparable()),
    }
}

/// Key used for a value in a hash.
pub(super) fn map_key(value: &Value) -> String {
    value.to_string()
}
