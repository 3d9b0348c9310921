//! Numeric words.
//!
//! Two ints give an int (overflow is an error); any float operand promotes
//! both to float. Integer `/` floors and `%` takes the sign of the divisor.

use std::cmp::Ordering;

use cat_ir::Number;
use cat_lexer::intern_number;

use super::helpers::{
    as_float, compare, float_to_int, len_value, pop_int, pop_number, require_number,
};
use super::BuiltinWord;
use crate::errors::{division_by_zero, integer_overflow, type_mismatch, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::Value;

pub(super) const WORDS: &[BuiltinWord] = &[
    BuiltinWord { names: &["+", "add"], effect: "a b -- a+b", run: add },
    BuiltinWord { names: &["-", "sub"], effect: "a b -- a-b", run: sub },
    BuiltinWord { names: &["*", "mul"], effect: "a b -- a*b", run: mul },
    BuiltinWord { names: &["/", "div"], effect: "a b -- a/b", run: div },
    BuiltinWord { names: &["%", "mod"], effect: "a b -- a%b", run: modulo },
    BuiltinWord { names: &["/%", "divmod"], effect: "a b -- q r", run: divmod },
    BuiltinWord { names: &["++", "inc"], effect: "n -- n+1", run: inc },
    BuiltinWord { names: &["--", "dec"], effect: "n -- n-1", run: dec },
    BuiltinWord { names: &["**", "pwr"], effect: "base expt -- base**expt", run: pwr },
    BuiltinWord { names: &["abs"], effect: "n|list -- |n|", run: abs },
    BuiltinWord { names: &["neg"], effect: "n|bool -- -n|!bool", run: neg },
    BuiltinWord { names: &["min"], effect: "a b -- min | list -- min", run: min },
    BuiltinWord { names: &["max"], effect: "a b -- max | list -- max", run: max },
    BuiltinWord { names: &["int"], effect: "x -- int", run: to_int },
    BuiltinWord { names: &["float"], effect: "x -- float", run: to_float },
    BuiltinWord { names: &["<<"], effect: "n bits -- n<<bits", run: shift_left },
    BuiltinWord { names: &[">>"], effect: "n bits -- n>>bits", run: shift_right },
    BuiltinWord { names: &["round"], effect: "x places -- rounded", run: round },
];

/// Apply a binary numeric operation with int/float promotion.
fn numeric(
    word: &str,
    lhs: &Value,
    rhs: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult<Value> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => int_op(*a, *b)
            .map(Value::Int)
            .ok_or_else(|| integer_overflow(word)),
        _ => Ok(Value::Float(float_op(
            as_float(word, lhs)?,
            as_float(word, rhs)?,
        ))),
    }
}

/// Pop `lhs rhs`, returning them in source order.
fn pop_operands(interp: &mut Interpreter) -> EvalResult<(Value, Value)> {
    let (rhs, lhs) = interp.stack.pop2()?;
    Ok((lhs, rhs))
}

/// `+` also concatenates strings and lists.
fn add(interp: &mut Interpreter) -> EvalResult {
    let result = match pop_operands(interp)? {
        (Value::Text(mut a), Value::Text(b)) => {
            a.push_str(&b);
            Value::Text(a)
        }
        (lhs, rhs) if lhs.is_list_like() && rhs.is_list_like() => {
            let mut items = lhs.into_list().unwrap_or_default();
            items.extend(rhs.into_list().unwrap_or_default());
            Value::List(items)
        }
        (lhs, rhs) => numeric("+", &lhs, &rhs, i64::checked_add, |a, b| a + b)?,
    };
    interp.stack.push(result);
    Ok(())
}

fn sub(interp: &mut Interpreter) -> EvalResult {
    let (lhs, rhs) = pop_operands(interp)?;
    let result = numeric("-", &lhs, &rhs, i64::checked_sub, |a, b| a - b)?;
    interp.stack.push(result);
    Ok(())
}

fn mul(interp: &mut Interpreter) -> EvalResult {
    let (lhs, rhs) = pop_operands(interp)?;
    let result = numeric("*", &lhs, &rhs, i64::checked_mul, |a, b| a * b)?;
    interp.stack.push(result);
    Ok(())
}

fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b).unwrap_or(0);
    if r != 0 && ((r < 0) != (b < 0)) {
        r.checked_add(b)
    } else {
        Some(r)
    }
}

fn float_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && ((r < 0.0) != (b < 0.0)) {
        r + b
    } else {
        r
    }
}

fn is_zero(value: &Value) -> bool {
    matches!(value, Value::Int(0)) || matches!(value, Value::Float(x) if *x == 0.0)
}

fn div_operands(interp: &mut Interpreter, word: &str) -> EvalResult<(Value, Value)> {
    let (lhs, rhs) = pop_operands(interp)?;
    let rhs = require_number(word, rhs)?;
    let lhs = require_number(word, lhs)?;
    if is_zero(&rhs) {
        return Err(division_by_zero());
    }
    Ok((lhs, rhs))
}

fn div(interp: &mut Interpreter) -> EvalResult {
    let (lhs, rhs) = div_operands(interp, "/")?;
    let result = numeric("/", &lhs, &rhs, floor_div, |a, b| a / b)?;
    interp.stack.push(result);
    Ok(())
}

fn modulo(interp: &mut Interpreter) -> EvalResult {
    let (lhs, rhs) = div_operands(interp, "%")?;
    let result = numeric("%", &lhs, &rhs, floor_mod, float_mod)?;
    interp.stack.push(result);
    Ok(())
}

fn divmod(interp: &mut Interpreter) -> EvalResult {
    let (lhs, rhs) = div_operands(interp, "/%")?;
    let q = numeric("/%", &lhs, &rhs, floor_div, |a, b| (a / b).floor())?;
    let r = numeric("/%", &lhs, &rhs, floor_mod, float_mod)?;
    interp.stack.push_multi([q, r]);
    Ok(())
}

fn step(interp: &mut Interpreter, word: &str, by: i64) -> EvalResult {
    let n = pop_number(interp, word)?;
    let result = numeric(word, &n, &Value::Int(by), i64::checked_add, |a, b| a + b)?;
    interp.stack.push(result);
    Ok(())
}

fn inc(interp: &mut Interpreter) -> EvalResult {
    step(interp, "++", 1)
}

fn dec(interp: &mut Interpreter) -> EvalResult {
    step(interp, "--", -1)
}

fn pwr(interp: &mut Interpreter) -> EvalResult {
    let (base, expt) = pop_operands(interp)?;
    let result = match (&base, &expt) {
        (Value::Int(b), Value::Int(e)) if *e >= 0 => {
            let e = u32::try_from(*e).map_err(|_| integer_overflow("**"))?;
            Value::Int(b.checked_pow(e).ok_or_else(|| integer_overflow("**"))?)
        }
        _ => Value::Float(as_float("**", &base)?.powf(as_float("**", &expt)?)),
    };
    interp.stack.push(result);
    Ok(())
}

fn abs_value(value: Value) -> EvalResult<Value> {
    match value {
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("abs")),
        Value::Float(x) => Ok(Value::Float(x.abs())),
        other => Err(type_mismatch("abs", "number", other.type_name())),
    }
}

/// `abs` of a number, or of each number in a list.
fn abs(interp: &mut Interpreter) -> EvalResult {
    let result = match interp.stack.pop()? {
        list if list.is_list_like() => Value::List(
            list.into_list()
                .unwrap_or_default()
                .into_iter()
                .map(abs_value)
                .collect::<EvalResult<Vec<_>>>()?,
        ),
        other => abs_value(other)?,
    };
    interp.stack.push(result);
    Ok(())
}

fn neg(interp: &mut Interpreter) -> EvalResult {
    let result = match interp.stack.pop()? {
        Value::Int(n) => Value::Int(n.checked_neg().ok_or_else(|| integer_overflow("neg"))?),
        Value::Float(x) => Value::Float(-x),
        Value::Bool(b) => Value::Bool(!b),
        other => return Err(type_mismatch("neg", "number or bool", other.type_name())),
    };
    interp.stack.push(result);
    Ok(())
}

/// Pick the extreme of a list on top, or of the top two values.
fn extreme(interp: &mut Interpreter, word: &str, keep: Ordering) -> EvalResult {
    let top = interp.stack.pop()?;
    let candidates = if top.is_list_like() {
        top.into_list().unwrap_or_default()
    } else {
        vec![interp.stack.pop()?, top]
    };
    let mut iter = candidates.into_iter();
    let Some(mut best) = iter.next() else {
        return Err(type_mismatch(word, "non-empty list", "empty list"));
    };
    for item in iter {
        if compare(word, &item, &best)? == keep {
            best = item;
        }
    }
    interp.stack.push(best);
    Ok(())
}

fn min(interp: &mut Interpreter) -> EvalResult {
    extreme(interp, "min", Ordering::Less)
}

fn max(interp: &mut Interpreter) -> EvalResult {
    extreme(interp, "max", Ordering::Greater)
}

/// `int` truncates floats, parses numeric text and gives a list's length.
fn to_int(interp: &mut Interpreter) -> EvalResult {
    let result = match interp.stack.pop()? {
        Value::Int(n) => Value::Int(n),
        Value::Float(x) => Value::Int(float_to_int("int", x)?),
        Value::Bool(b) => Value::Int(i64::from(b)),
        list if list.is_list_like() => len_value(list.into_list().unwrap_or_default().len())?,
        Value::Text(s) => match intern_number(s.trim()) {
            Some(Number::Int(n)) => Value::Int(n),
            Some(Number::Float(x)) => Value::Int(float_to_int("int", x)?),
            None => return Err(type_mismatch("int", "numeric string", "string")),
        },
        other => return Err(type_mismatch("int", "number", other.type_name())),
    };
    interp.stack.push(result);
    Ok(())
}

fn to_float(interp: &mut Interpreter) -> EvalResult {
    let result = match interp.stack.pop()? {
        Value::Bool(b) => f64::from(u8::from(b)),
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| type_mismatch("float", "numeric string", "string"))?,
        other => as_float("float", &other)?,
    };
    interp.stack.push(Value::Float(result));
    Ok(())
}

fn shift_amount(word: &str, bits: i64) -> EvalResult<u32> {
    u32::try_from(bits)
        .ok()
        .filter(|&b| b < 64)
        .ok_or_else(|| integer_overflow(word))
}

fn shift_left(interp: &mut Interpreter) -> EvalResult {
    let bits = pop_int(interp, "<<")?;
    let n = pop_int(interp, "<<")?;
    let bits = shift_amount("<<", bits)?;
    let shifted = n << bits;
    if shifted >> bits != n {
        return Err(integer_overflow("<<"));
    }
    interp.stack.push(Value::Int(shifted));
    Ok(())
}

fn shift_right(interp: &mut Interpreter) -> EvalResult {
    let bits = pop_int(interp, ">>")?;
    let n = pop_int(interp, ">>")?;
    let shifted = match u32::try_from(bits) {
        Ok(b) if b < 64 => n >> b,
        Ok(_) => {
            if n < 0 {
                -1
            } else {
                0
            }
        }
        Err(_) => return Err(integer_overflow(">>")),
    };
    interp.stack.push(Value::Int(shifted));
    Ok(())
}

/// Round to `places` decimal places; the result is always a float.
fn round(interp: &mut Interpreter) -> EvalResult {
    let places = pop_int(interp, "round")?;
    let x = as_float("round", &interp.stack.pop()?)?;
    let places = i32::try_from(places).map_err(|_| integer_overflow("round"))?;
    let scale = 10f64.powi(places);
    interp.stack.push(Value::Float((x * scale).round() / scale));
    Ok(())
}
