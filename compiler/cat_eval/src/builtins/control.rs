//! Control flow and higher-order words.

use std::rc::Rc;

use super::helpers::{pop_int, pop_list};
use super::BuiltinWord;
use crate::errors::{halt as halt_error, integer_overflow, user_raised, EvalResult};
use crate::interpreter::Interpreter;
use crate::value::{Callable, Value};

pub(super) const WORDS: &[BuiltinWord] = &[
    BuiltinWord { names: &["if"], effect: "cond [then] [else] --", run: if_word },
    BuiltinWord { names: &["while"], effect: "[body] [test] --", run: while_word },
    BuiltinWord { names: &["repeat"], effect: "[body] n --", run: repeat },
    BuiltinWord { names: &["foreach", "for_each", "for"], effect: "list [f] --", run: foreach },
    BuiltinWord { names: &["eval", "apply"], effect: "[f] -- ...", run: apply },
    BuiltinWord { names: &["dip"], effect: "x [f] -- ... x", run: dip },
    BuiltinWord { names: &["quote"], effect: "x -- [x]", run: quote },
    BuiltinWord { names: &["compose"], effect: "[f] [g] -- [f g]", run: compose },
    BuiltinWord { names: &["papply"], effect: "x [f] -- [x f]", run: papply },
    BuiltinWord { names: &["try_catch"], effect: "[try] [catch] --", run: try_catch },
    BuiltinWord { names: &["raise", "throw"], effect: "msg --", run: raise },
    BuiltinWord { names: &["pass"], effect: "--", run: pass },
    BuiltinWord { names: &["halt"], effect: "code --", run: halt },
];

fn if_word(interp: &mut Interpreter) -> EvalResult {
    let (otherwise, then, cond) = interp.stack.pop3()?;
    let branch = if cond.is_truthy() { then } else { otherwise };
    interp.call(&branch)
}

/// Run `test`; while it leaves a true value, run `body` and test again.
fn while_word(interp: &mut Interpreter) -> EvalResult {
    let (test, body) = interp.stack.pop2()?;
    loop {
        interp.call(&test)?;
        if !interp.stack.pop()?.is_truthy() {
            return Ok(());
        }
        interp.call(&body)?;
    }
}

fn repeat(interp: &mut Interpreter) -> EvalResult {
    let n = pop_int(interp, "repeat")?;
    let body = interp.stack.pop()?;
    for _ in 0..n.unsigned_abs() {
        interp.call(&body)?;
    }
    Ok(())
}

fn foreach(interp: &mut Interpreter) -> EvalResult {
    let f = interp.stack.pop()?;
    for item in pop_list(interp, "foreach")? {
        interp.stack.push(item);
        interp.call(&f)?;
    }
    Ok(())
}

fn apply(interp: &mut Interpreter) -> EvalResult {
    let f = interp.stack.pop()?;
    interp.call(&f)
}

fn dip(interp: &mut Interpreter) -> EvalResult {
    let (f, x) = interp.stack.pop2()?;
    interp.call(&f)?;
    interp.stack.push(x);
    Ok(())
}

fn constant(value: Value) -> Value {
    Value::Callable(Callable::Constant(Rc::new(value)))
}

fn quote(interp: &mut Interpreter) -> EvalResult {
    let top = interp.stack.pop()?;
    interp.stack.push(constant(top));
    Ok(())
}

fn compose(interp: &mut Interpreter) -> EvalResult {
    let (second, first) = interp.stack.pop2()?;
    interp
        .stack
        .push(Value::Callable(Callable::Compose(Rc::new((first, second)))));
    Ok(())
}

/// Bind `x` as the first input of `f`.
fn papply(interp: &mut Interpreter) -> EvalResult {
    let (f, x) = interp.stack.pop2()?;
    interp
        .stack
        .push(Value::Callable(Callable::Compose(Rc::new((constant(x), f)))));
    Ok(())
}

/// Run `try`; on a catchable error put the stack back as it was before
/// `try`, report the error, push its message and run `catch`.
fn try_catch(interp: &mut Interpreter) -> EvalResult {
    let (catch, attempt) = interp.stack.pop2()?;
    let snapshot = interp.stack.snapshot();
    match interp.call(&attempt) {
        Ok(()) => Ok(()),
        Err(err) if err.is_catchable() => {
            tracing::debug!(error = %err, "caught");
            interp.stack.restore(snapshot);
            interp.output_error(&err.message);
            interp.stack.push(Value::Text(err.message));
            interp.call(&catch)
        }
        Err(err) => Err(err),
    }
}

fn raise(interp: &mut Interpreter) -> EvalResult {
    let msg = interp.stack.pop()?;
    Err(user_raised(msg.to_string()))
}

fn pass(_interp: &mut Interpreter) -> EvalResult {
    Ok(())
}

fn halt(interp: &mut Interpreter) -> EvalResult {
    let code = pop_int(interp, "halt")?;
    let code = i32::try_from(code).map_err(|_| integer_overflow("halt"))?;
    Err(halt_error(code))
}
