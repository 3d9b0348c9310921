//! Text words.

use super::helpers::{len_value, pop_text};
use super::BuiltinWord;
use crate::errors::{type_mismatch, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::Value;

pub(super) const WORDS: &[BuiltinWord] = &[
    BuiltinWord { names: &["strlen"], effect: "s -- s n", run: strlen },
    BuiltinWord { names: &["split"], effect: "s sep -- list", run: split },
    BuiltinWord { names: &["join"], effect: "list sep -- s", run: join },
    BuiltinWord { names: &["to_str", "as_string"], effect: "x -- s", run: to_str },
    BuiltinWord { names: &["upper"], effect: "s -- S", run: upper },
    BuiltinWord { names: &["lower"], effect: "S -- s", run: lower },
];

fn strlen(interp: &mut Interpreter) -> EvalResult {
    let n = match interp.stack.peek()? {
        Value::Text(s) => len_value(s.chars().count())?,
        other => return Err(type_mismatch("strlen", "string", other.type_name())),
    };
    interp.stack.push(n);
    Ok(())
}

/// Split on a separator; the empty separator splits into characters.
fn split(interp: &mut Interpreter) -> EvalResult {
    let sep = pop_text(interp, "split")?;
    let target = pop_text(interp, "split")?;
    let parts: Vec<Value> = if sep.is_empty() {
        target.chars().map(|c| Value::Text(c.to_string())).collect()
    } else {
        target.split(sep.as_str()).map(Value::from).collect()
    };
    interp.stack.push(Value::List(parts));
    Ok(())
}

fn join(interp: &mut Interpreter) -> EvalResult {
    let sep = interp.stack.pop()?.to_string();
    let items = match interp.stack.pop()? {
        other if other.is_list_like() => other.into_list().unwrap_or_default(),
        other => vec![other],
    };
    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(&sep);
    interp.stack.push(Value::Text(joined));
    Ok(())
}

fn to_str(interp: &mut Interpreter) -> EvalResult {
    let top = interp.stack.pop()?;
    interp.stack.push(Value::Text(top.to_string()));
    Ok(())
}

fn upper(interp: &mut Interpreter) -> EvalResult {
    let s = pop_text(interp, "upper")?;
    interp.stack.push(Value::Text(s.to_uppercase()));
    Ok(())
}

fn lower(interp: &mut Interpreter) -> EvalResult {
    let s = pop_text(interp, "lower")?;
    interp.stack.push(Value::Text(s.to_lowercase()));
    Ok(())
}
