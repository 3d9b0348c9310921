//! Variables.
//!
//! A name may be qualified: `ns:x` addresses namespace `ns` and
//! `global:x` the built-in scope's own table. Unqualified names are set in
//! the current user namespace and read through the normal lookup.

use cat_ir::name::QualifiedName;

use super::helpers::pop_text;
use super::BuiltinWord;
use crate::errors::{undefined_variable, EvalResult};
use crate::interpreter::Interpreter;
use crate::namespace::STD;

pub(super) const WORDS: &[BuiltinWord] = &[
    BuiltinWord { names: &["!", "save_var"], effect: "value name --", run: save_var },
    BuiltinWord { names: &["@", "get_var"], effect: "name -- value", run: get_var },
    BuiltinWord { names: &["del_var"], effect: "name --", run: del_var },
];

/// Namespace a variable name is written to, and the bare name.
fn target<'a>(interp: &Interpreter, name: &'a str) -> (String, &'a str) {
    let q = QualifiedName::parse(name);
    let ns = if q.is_global() {
        STD.to_string()
    } else {
        q.namespace
            .map_or_else(|| interp.namespaces.current_user().to_string(), str::to_string)
    };
    (ns, q.name)
}

fn save_var(interp: &mut Interpreter) -> EvalResult {
    let name = pop_text(interp, "!")?;
    let value = interp.stack.pop()?;
    let (ns, name) = target(interp, &name);
    tracing::trace!(ns = %ns, var = name, "set variable");
    interp.namespaces.set_var(&ns, name, value)?;
    Ok(())
}

fn get_var(interp: &mut Interpreter) -> EvalResult {
    let name = pop_text(interp, "@")?;
    match interp.lookup_variable(&name)? {
        Some(value) => {
            interp.stack.push(value);
            Ok(())
        }
        None => {
            let (ns, bare) = target(interp, &name);
            Err(undefined_variable(bare, &ns))
        }
    }
}

fn del_var(interp: &mut Interpreter) -> EvalResult {
    let name = pop_text(interp, "del_var")?;
    let (ns, bare) = target(interp, &name);
    if interp.namespaces.remove_var(&ns, bare)? {
        Ok(())
    } else {
        Err(undefined_variable(bare, &ns))
    }
}
