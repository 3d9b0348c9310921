//! Stack shuffling and the auxiliary stack.

use super::helpers::{len_value, pop_int};
use super::BuiltinWord;
use crate::errors::{type_mismatch, EvalResult};
use crate::interpreter::Interpreter;

pub(super) const WORDS: &[BuiltinWord] = &[
    BuiltinWord { names: &["clear"], effect: "... --", run: clear },
    BuiltinWord { names: &["pop", "drop"], effect: "a --", run: pop },
    BuiltinWord { names: &["popd", "under"], effect: "a b -- b", run: popd },
    BuiltinWord { names: &["dup"], effect: "a -- a a", run: dup },
    BuiltinWord { names: &["swap"], effect: "a b -- b a", run: swap },
    BuiltinWord { names: &["flip"], effect: "a b c -- c b a", run: flip },
    BuiltinWord { names: &["swapd"], effect: "a b c -- b a c", run: swapd },
    BuiltinWord { names: &["dupd"], effect: "a b -- a a b", run: dupd },
    BuiltinWord { names: &["size", "depth"], effect: "-- n", run: size },
    BuiltinWord { names: &["+rot", "rot_up"], effect: "a b c -- c a b", run: rot_up },
    BuiltinWord { names: &["-rot", "rot_down"], effect: "a b c -- b c a", run: rot_down },
    BuiltinWord { names: &["->aux"], effect: "a --", run: to_aux },
    BuiltinWord { names: &["aux->", "<-aux"], effect: "-- a", run: from_aux },
    BuiltinWord { names: &["n->aux"], effect: "a1 .. an n --", run: n_to_aux },
    BuiltinWord { names: &["aux->n"], effect: "n -- a1 .. an", run: n_from_aux },
    BuiltinWord { names: &["rev_stack"], effect: "a .. z -- z .. a", run: rev_stack },
    BuiltinWord { names: &["clear_to"], effect: "... n --", run: clear_to },
];

fn clear(interp: &mut Interpreter) -> EvalResult {
    interp.stack.clear();
    Ok(())
}

fn pop(interp: &mut Interpreter) -> EvalResult {
    interp.stack.pop()?;
    Ok(())
}

fn popd(interp: &mut Interpreter) -> EvalResult {
    let (top, _) = interp.stack.pop2()?;
    interp.stack.push(top);
    Ok(())
}

fn dup(interp: &mut Interpreter) -> EvalResult {
    let top = interp.stack.peek()?.clone();
    interp.stack.push(top);
    Ok(())
}

fn swap(interp: &mut Interpreter) -> EvalResult {
    let (top, next) = interp.stack.pop2()?;
    interp.stack.push_multi([top, next]);
    Ok(())
}

fn flip(interp: &mut Interpreter) -> EvalResult {
    let (top, middle, bottom) = interp.stack.pop3()?;
    interp.stack.push_multi([top, middle, bottom]);
    Ok(())
}

fn swapd(interp: &mut Interpreter) -> EvalResult {
    let (top, middle, bottom) = interp.stack.pop3()?;
    interp.stack.push_multi([middle, bottom, top]);
    Ok(())
}

fn dupd(interp: &mut Interpreter) -> EvalResult {
    let (top, next) = interp.stack.pop2()?;
    interp.stack.push_multi([next.clone(), next, top]);
    Ok(())
}

fn size(interp: &mut Interpreter) -> EvalResult {
    let n = len_value(interp.stack.len())?;
    interp.stack.push(n);
    Ok(())
}

fn rot_up(interp: &mut Interpreter) -> EvalResult {
    let (top, middle, bottom) = interp.stack.pop3()?;
    interp.stack.push_multi([top, bottom, middle]);
    Ok(())
}

fn rot_down(interp: &mut Interpreter) -> EvalResult {
    let (top, middle, bottom) = interp.stack.pop3()?;
    interp.stack.push_multi([middle, top, bottom]);
    Ok(())
}

fn to_aux(interp: &mut Interpreter) -> EvalResult {
    let top = interp.stack.pop()?;
    interp.stack.push_aux(top);
    Ok(())
}

fn from_aux(interp: &mut Interpreter) -> EvalResult {
    let top = interp.stack.pop_aux()?;
    interp.stack.push(top);
    Ok(())
}

fn count(word: &str, n: i64) -> EvalResult<usize> {
    usize::try_from(n).map_err(|_| type_mismatch(word, "non-negative count", "negative int"))
}

/// Moves the top `n` items; `aux->n` brings them back in the same order.
fn n_to_aux(interp: &mut Interpreter) -> EvalResult {
    let n = count("n->aux", pop_int(interp, "n->aux")?)?;
    let items = interp.stack.pop_n(n)?;
    for item in items {
        interp.stack.push_aux(item);
    }
    Ok(())
}

fn n_from_aux(interp: &mut Interpreter) -> EvalResult {
    let n = count("aux->n", pop_int(interp, "aux->n")?)?;
    let items = interp.stack.pop_aux_n(n)?;
    interp.stack.push_multi(items);
    Ok(())
}

fn rev_stack(interp: &mut Interpreter) -> EvalResult {
    interp.stack.reverse();
    Ok(())
}

/// Keep only the bottom `n` items.
fn clear_to(interp: &mut Interpreter) -> EvalResult {
    let n = count("clear_to", pop_int(interp, "clear_to")?)?;
    interp.stack.clear_to(n);
    Ok(())
}
