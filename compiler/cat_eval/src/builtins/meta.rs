//! Loading, fetching, documentation and interpreter introspection.

use cat_ir::name::QualifiedName;

use super::helpers::{pop_names, pop_text};
use super::BuiltinWord;
use crate::capability::{Arity, Capability};
use crate::errors::{arity_mismatch, type_mismatch, undefined_word, EvalResult};
use crate::interpreter::Interpreter;
use crate::namespace::STD;
use crate::value::Value;

pub(super) const WORDS: &[BuiltinWord] = &[
    BuiltinWord { names: &["load"], effect: "files --", run: load },
    BuiltinWord { names: &["reload"], effect: "files --", run: reload },
    BuiltinWord { names: &["fetch"], effect: "words --", run: fetch },
    BuiltinWord { names: &["doc"], effect: "name --", run: doc },
    BuiltinWord { names: &["words"], effect: "--", run: words },
    BuiltinWord { names: &["instance"], effect: "args 'module.Ctor name --", run: instance },
    BuiltinWord { names: &["#trace"], effect: "--", run: toggle_trace },
    BuiltinWord { names: &["#dump"], effect: "--", run: dump },
    BuiltinWord { names: &["stack_to_list"], effect: "-- list", run: stack_to_list },
];

/// `ns:file` loads into `ns`; a bare file loads into the current user
/// namespace.
fn load_each(interp: &mut Interpreter, word: &str, force: bool) -> EvalResult {
    for entry in pop_names(interp, word)? {
        let q = QualifiedName::parse(&entry);
        interp.load_file(q.name, q.namespace, force)?;
    }
    Ok(())
}

fn load(interp: &mut Interpreter) -> EvalResult {
    load_each(interp, "load", false)
}

fn reload(interp: &mut Interpreter) -> EvalResult {
    load_each(interp, "reload", true)
}

fn fetch(interp: &mut Interpreter) -> EvalResult {
    let target = interp.namespaces.current_user().to_string();
    for word in pop_names(interp, "fetch")? {
        interp.fetch(&word, &target)?;
    }
    Ok(())
}

fn doc(interp: &mut Interpreter) -> EvalResult {
    let name = pop_text(interp, "doc")?;
    let q = QualifiedName::parse(&name);
    let start = q.namespace.unwrap_or(STD);
    let text = if interp.namespaces.contains(start) {
        interp
            .namespaces
            .resolve_word(q.name, start)?
            .map(|(def, _)| def.doc.clone())
    } else {
        None
    };
    match text {
        Some(text) if text.is_empty() => interp.output_info(&format!("  {name} : (no description)")),
        Some(text) => interp.output_info(&text),
        None => return Err(undefined_word(q.name, start)),
    }
    Ok(())
}

fn words(interp: &mut Interpreter) -> EvalResult {
    let builtins = interp.namespaces.builtin_words().join(" ");
    let user = interp.namespaces.user_words().join(" ");
    interp.output_info(&format!("Built-in words:\n  {builtins}"));
    interp.output_info(&format!("User words:\n  {user}"));
    Ok(())
}

/// Construct a host object through a registered capability and store it
/// as a named instance.
///
/// A list (or quotation) argument is spread into the constructor's
/// arguments; anything else is passed as the single argument.
fn instance(interp: &mut Interpreter) -> EvalResult {
    let name = pop_text(interp, "instance")?;
    let ctor = pop_text(interp, "instance")?;
    let raw = interp.stack.pop()?;
    let args = if raw.is_list_like() {
        raw.into_list().unwrap_or_default()
    } else {
        vec![raw]
    };

    let Some(Capability::Function { arity, thunk }) = interp.capabilities.get(&ctor).cloned() else {
        return Err(undefined_word(&ctor, STD));
    };
    if let Arity::Exact(n) = arity {
        if args.len() != n {
            return Err(arity_mismatch(&ctor, n, args.len()));
        }
    }
    let object = match thunk(args)? {
        Some(object @ Value::Instance(_)) => object,
        Some(other) => return Err(type_mismatch("instance", "host object", other.type_name())),
        None => return Err(type_mismatch("instance", "host object", "nothing")),
    };

    let q = QualifiedName::parse(&name);
    let ns = q
        .namespace
        .map_or_else(|| interp.namespaces.current_user().to_string(), str::to_string);
    tracing::debug!(instance = q.name, ns = %ns, ctor = %ctor, "instance created");
    interp.namespaces.add_instance(&ns, q.name, object)?;
    Ok(())
}

fn toggle_trace(interp: &mut Interpreter) -> EvalResult {
    interp.config.trace = !interp.config.trace;
    Ok(())
}

fn dump(interp: &mut Interpreter) -> EvalResult {
    interp.output_info(&interp.stack.to_string());
    Ok(())
}

/// Push a copy of the whole stack as a list.
fn stack_to_list(interp: &mut Interpreter) -> EvalResult {
    let snapshot = interp.stack.snapshot();
    interp.stack.push(Value::List(snapshot));
    Ok(())
}
