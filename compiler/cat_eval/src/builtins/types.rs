//! Type inspection. Types are represented by their names.

use super::BuiltinWord;
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub(super) const WORDS: &[BuiltinWord] = &[
    BuiltinWord { names: &["typeof"], effect: "x -- x type", run: type_of },
    BuiltinWord { names: &["int_type"], effect: "-- type", run: int_type },
    BuiltinWord { names: &["float_type"], effect: "-- type", run: float_type },
    BuiltinWord { names: &["string_type"], effect: "-- type", run: string_type },
    BuiltinWord { names: &["bool_type"], effect: "-- type", run: bool_type },
    BuiltinWord { names: &["list_type"], effect: "-- type", run: list_type },
    BuiltinWord { names: &["function_type"], effect: "-- type", run: function_type },
];

fn type_of(interp: &mut Interpreter) -> EvalResult {
    let name = interp.stack.peek()?.type_name();
    interp.stack.push(Value::text(name));
    Ok(())
}

fn push_type(interp: &mut Interpreter, sample: &Value) -> EvalResult {
    interp.stack.push(Value::text(sample.type_name()));
    Ok(())
}

fn int_type(interp: &mut Interpreter) -> EvalResult {
    push_type(interp, &Value::Int(0))
}

fn float_type(interp: &mut Interpreter) -> EvalResult {
    push_type(interp, &Value::Float(0.0))
}

fn string_type(interp: &mut Interpreter) -> EvalResult {
    push_type(interp, &Value::Text(String::new()))
}

fn bool_type(interp: &mut Interpreter) -> EvalResult {
    push_type(interp, &Value::Bool(false))
}

fn list_type(interp: &mut Interpreter) -> EvalResult {
    push_type(interp, &Value::List(Vec::new()))
}

fn function_type(interp: &mut Interpreter) -> EvalResult {
    push_type(interp, &Value::Callable(crate::value::Callable::Word(String::new())))
}
