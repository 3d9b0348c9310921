//! Lists, hashes and list combinators.
//!
//! `map`, `filter`, `fold`, `bin_op` and `list` run their function on a
//! fresh stack, so the function only ever sees its own arguments.

use std::collections::BTreeMap;

use super::helpers::{len_value, map_key, pop_int, pop_list, resolve_index};
use super::BuiltinWord;
use crate::errors::{index_out_of_bounds, type_mismatch, EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::Value;

pub(super) const WORDS: &[BuiltinWord] = &[
    BuiltinWord { names: &["nil"], effect: "-- []", run: nil },
    BuiltinWord { names: &["unit"], effect: "a -- [a]", run: unit },
    BuiltinWord { names: &["pair"], effect: "a b -- [a b]", run: pair },
    BuiltinWord { names: &["triplet"], effect: "a b c -- [a b c]", run: triplet },
    BuiltinWord { names: &["list"], effect: "[f] -- list", run: list },
    BuiltinWord { names: &["cons"], effect: "list x -- list'", run: cons },
    BuiltinWord { names: &["uncons"], effect: "list -- list' last", run: uncons },
    BuiltinWord { names: &["concat"], effect: "a b -- a++b", run: concat },
    BuiltinWord { names: &["len"], effect: "list -- list n", run: len },
    BuiltinWord { names: &["first"], effect: "seq -- seq x", run: first },
    BuiltinWord { names: &["head"], effect: "list -- x", run: head },
    BuiltinWord { names: &["rest", "tail"], effect: "list -- list'", run: rest },
    BuiltinWord { names: &["rev"], effect: "list|string -- reversed", run: rev },
    BuiltinWord { names: &["get_at"], effect: "seq i -- seq x", run: get_at },
    BuiltinWord { names: &["set_at"], effect: "list x i -- list'", run: set_at },
    BuiltinWord { names: &["empty"], effect: "list -- list bool", run: empty },
    BuiltinWord { names: &["map"], effect: "list [f] -- list'", run: map },
    BuiltinWord { names: &["filter"], effect: "list [pred] -- list'", run: filter },
    BuiltinWord { names: &["fold", "reduce"], effect: "list init [f] -- acc", run: fold },
    BuiltinWord { names: &["bin_op"], effect: "list list [f] -- list", run: bin_op },
    BuiltinWord { names: &["range"], effect: "n -- [0 .. n-1]", run: range },
    BuiltinWord { names: &["all"], effect: "list -- bool", run: all },
    BuiltinWord { names: &["any"], effect: "list -- bool", run: any },
    BuiltinWord { names: &["in_list"], effect: "list x -- bool", run: in_list },
    BuiltinWord { names: &["hash_list", "dict"], effect: "-- hash", run: hash_list },
    BuiltinWord { names: &["hash_get", "dict_get"], effect: "hash key -- hash value", run: hash_get },
    BuiltinWord { names: &["hash_set", "dict_set"], effect: "hash value key -- hash'", run: hash_set },
];

fn nil(interp: &mut Interpreter) -> EvalResult {
    interp.stack.push(Value::List(Vec::new()));
    Ok(())
}

fn unit(interp: &mut Interpreter) -> EvalResult {
    let top = interp.stack.pop()?;
    interp.stack.push(Value::List(vec![top]));
    Ok(())
}

fn pair(interp: &mut Interpreter) -> EvalResult {
    let (top, next) = interp.stack.pop2()?;
    interp.stack.push(Value::List(vec![next, top]));
    Ok(())
}

fn triplet(interp: &mut Interpreter) -> EvalResult {
    let (top, middle, bottom) = interp.stack.pop3()?;
    interp.stack.push(Value::List(vec![bottom, middle, top]));
    Ok(())
}

/// Collect everything `f` leaves on a fresh stack.
fn list(interp: &mut Interpreter) -> EvalResult {
    let f = interp.stack.pop()?;
    let items = {
        let mut scoped = interp.fresh_stack();
        scoped.call(&f)?;
        scoped.collect()
    };
    interp.stack.push(Value::List(items));
    Ok(())
}

/// Append to a list, or pair up two non-list values.
fn cons(interp: &mut Interpreter) -> EvalResult {
    let (x, target) = interp.stack.pop2()?;
    let result = if target.is_list_like() {
        let mut items = target.into_list().unwrap_or_default();
        items.push(x);
        items
    } else {
        vec![target, x]
    };
    interp.stack.push(Value::List(result));
    Ok(())
}

fn uncons(interp: &mut Interpreter) -> EvalResult {
    let mut items = pop_list(interp, "uncons")?;
    let Some(last) = items.pop() else {
        return Err(index_out_of_bounds(-1, 0));
    };
    interp.stack.push_multi([Value::List(items), last]);
    Ok(())
}

fn into_items(value: Value) -> Vec<Value> {
    if value.is_list_like() {
        value.into_list().unwrap_or_default()
    } else {
        vec![value]
    }
}

fn concat(interp: &mut Interpreter) -> EvalResult {
    let (rhs, lhs) = interp.stack.pop2()?;
    let mut items = into_items(lhs);
    items.extend(into_items(rhs));
    interp.stack.push(Value::List(items));
    Ok(())
}

/// Number of elements (characters for text, entries for hashes).
fn length_of(value: &Value) -> EvalResult<Value> {
    match value {
        Value::List(items) => len_value(items.len()),
        Value::Text(s) => len_value(s.chars().count()),
        Value::Map(map) => len_value(map.len()),
        Value::Callable(crate::value::Callable::Quotation(q)) => len_value(q.len()),
        other => Err(type_mismatch("len", "list", other.type_name())),
    }
}

fn len(interp: &mut Interpreter) -> EvalResult {
    let n = length_of(interp.stack.peek()?)?;
    interp.stack.push(n);
    Ok(())
}

/// Look at the list on top without consuming it.
fn peek_list(interp: &Interpreter, word: &str) -> EvalResult<Vec<Value>> {
    let top = interp.stack.peek()?;
    top.clone()
        .into_list()
        .ok_or_else(|| type_mismatch(word, "list", top.type_name()))
}

fn nth(items: &[Value], index: i64) -> EvalResult<Value> {
    resolve_index(index, items.len())
        .and_then(|i| items.get(i).cloned())
        .ok_or_else(|| index_out_of_bounds(index, items.len()))
}

/// Element `index` of the list or string on top, left in place. A string
/// yields its `index`th character.
fn peek_nth(interp: &Interpreter, word: &str, index: i64) -> EvalResult<Value> {
    if let Value::Text(s) = interp.stack.peek()? {
        let len = s.chars().count();
        return resolve_index(index, len)
            .and_then(|i| s.chars().nth(i))
            .map(|c| Value::Text(c.to_string()))
            .ok_or_else(|| index_out_of_bounds(index, len));
    }
    nth(&peek_list(interp, word)?, index)
}

fn first(interp: &mut Interpreter) -> EvalResult {
    let item = peek_nth(interp, "first", 0)?;
    interp.stack.push(item);
    Ok(())
}

fn head(interp: &mut Interpreter) -> EvalResult {
    let item = nth(&pop_list(interp, "head")?, 0)?;
    interp.stack.push(item);
    Ok(())
}

fn rest(interp: &mut Interpreter) -> EvalResult {
    let items = pop_list(interp, "rest")?;
    let rest = items.into_iter().skip(1).collect();
    interp.stack.push(Value::List(rest));
    Ok(())
}

fn rev(interp: &mut Interpreter) -> EvalResult {
    let result = match interp.stack.pop()? {
        Value::Text(s) => Value::Text(s.chars().rev().collect()),
        other if other.is_list_like() => {
            let mut items = other.into_list().unwrap_or_default();
            items.reverse();
            Value::List(items)
        }
        other => return Err(type_mismatch("rev", "list or string", other.type_name())),
    };
    interp.stack.push(result);
    Ok(())
}

fn get_at(interp: &mut Interpreter) -> EvalResult {
    let index = pop_int(interp, "get_at")?;
    let item = peek_nth(interp, "get_at", index)?;
    interp.stack.push(item);
    Ok(())
}

fn set_at(interp: &mut Interpreter) -> EvalResult {
    let index = pop_int(interp, "set_at")?;
    let value = interp.stack.pop()?;
    let mut items = pop_list(interp, "set_at")?;
    let len = items.len();
    let slot = resolve_index(index, len)
        .and_then(|i| items.get_mut(i))
        .ok_or_else(|| index_out_of_bounds(index, len))?;
    *slot = value;
    interp.stack.push(Value::List(items));
    Ok(())
}

fn empty(interp: &mut Interpreter) -> EvalResult {
    let is_empty = matches!(length_of(interp.stack.peek()?)?, Value::Int(0));
    interp.stack.push(Value::Bool(is_empty));
    Ok(())
}

fn map(interp: &mut Interpreter) -> EvalResult {
    let f = interp.stack.pop()?;
    let items = pop_list(interp, "map")?;
    let mut results = Vec::with_capacity(items.len());
    {
        let mut scoped = interp.fresh_stack();
        for item in items {
            scoped.stack.push(item);
            scoped.call(&f)?;
            results.push(scoped.stack.pop()?);
        }
    }
    interp.stack.push(Value::List(results));
    Ok(())
}

fn filter(interp: &mut Interpreter) -> EvalResult {
    let pred = interp.stack.pop()?;
    let items = pop_list(interp, "filter")?;
    let mut kept = Vec::new();
    {
        let mut scoped = interp.fresh_stack();
        for item in items {
            scoped.stack.push(item.clone());
            scoped.call(&pred)?;
            if scoped.stack.pop()?.is_truthy() {
                kept.push(item);
            }
        }
    }
    interp.stack.push(Value::List(kept));
    Ok(())
}

fn fold(interp: &mut Interpreter) -> EvalResult {
    let (f, init, items) = interp.stack.pop3()?;
    let got = items.type_name();
    let items = items
        .into_list()
        .ok_or_else(|| type_mismatch("fold", "list", got))?;
    let mut acc = init;
    {
        let mut scoped = interp.fresh_stack();
        for item in items {
            scoped.stack.push_multi([acc, item]);
            scoped.call(&f)?;
            acc = scoped.stack.pop()?;
        }
    }
    interp.stack.push(acc);
    Ok(())
}

/// Apply `f` pairwise to two lists of equal length.
fn bin_op(interp: &mut Interpreter) -> EvalResult {
    let f = interp.stack.pop()?;
    let rhs = pop_list(interp, "bin_op")?;
    let lhs = pop_list(interp, "bin_op")?;
    if lhs.len() != rhs.len() {
        return Err(type_mismatch(
            "bin_op",
            "lists of equal length",
            &format!("lengths {} and {}", lhs.len(), rhs.len()),
        ));
    }
    let mut results = Vec::with_capacity(lhs.len());
    {
        let mut scoped = interp.fresh_stack();
        for (l, r) in lhs.into_iter().zip(rhs) {
            scoped.stack.push_multi([l, r]);
            scoped.call(&f)?;
            results.push(scoped.stack.pop()?);
            scoped.stack.clear();
        }
    }
    interp.stack.push(Value::List(results));
    Ok(())
}

fn range(interp: &mut Interpreter) -> EvalResult {
    let n = pop_int(interp, "range")?;
    interp
        .stack
        .push(Value::List((0..n.max(0)).map(Value::Int).collect()));
    Ok(())
}

fn all(interp: &mut Interpreter) -> EvalResult {
    let items = pop_list(interp, "all")?;
    interp.stack.push(Value::Bool(items.iter().all(Value::is_truthy)));
    Ok(())
}

fn any(interp: &mut Interpreter) -> EvalResult {
    let items = pop_list(interp, "any")?;
    interp.stack.push(Value::Bool(items.iter().any(Value::is_truthy)));
    Ok(())
}

/// Membership in a list, or substring in a string.
fn in_list(interp: &mut Interpreter) -> EvalResult {
    let (needle, haystack) = interp.stack.pop2()?;
    let found = match (&haystack, &needle) {
        (Value::Text(hay), Value::Text(n)) => hay.contains(n.as_str()),
        (Value::Map(map), key) => map.contains_key(&map_key(key)),
        _ if haystack.is_list_like() => haystack
            .clone()
            .into_list()
            .unwrap_or_default()
            .contains(&needle),
        _ => {
            return Err(type_mismatch(
                "in_list",
                "list or string",
                haystack.type_name(),
            ))
        }
    };
    interp.stack.push(Value::Bool(found));
    Ok(())
}

fn hash_list(interp: &mut Interpreter) -> EvalResult {
    interp.stack.push(Value::Map(BTreeMap::new()));
    Ok(())
}

fn hash_get(interp: &mut Interpreter) -> EvalResult {
    let key = map_key(&interp.stack.pop()?);
    let value = match interp.stack.peek()? {
        Value::Map(map) => map.get(&key).cloned(),
        other => return Err(type_mismatch("hash_get", "hash", other.type_name())),
    };
    let value =
        value.ok_or_else(|| EvalError::new(format!("hash_get: no entry for key '{key}'")))?;
    interp.stack.push(value);
    Ok(())
}

fn hash_set(interp: &mut Interpreter) -> EvalResult {
    let (key, value) = interp.stack.pop2()?;
    match interp.stack.pop()? {
        Value::Map(mut map) => {
            map.insert(map_key(&key), value);
            interp.stack.push(Value::Map(map));
            Ok(())
        }
        other => Err(type_mismatch("hash_set", "hash", other.type_name())),
    }
}
