//! Namespace management words.
//!
//! Words taking names accept one name, a comma separated list (`'a,b`) or
//! a list of strings.

use cat_ir::name::QualifiedName;

use super::helpers::{pop_names, pop_text};
use super::BuiltinWord;
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;
use crate::namespace::STD;
use crate::value::Value;

pub(super) const WORDS: &[BuiltinWord] = &[
    BuiltinWord { names: &["createNS"], effect: "names --", run: create_ns },
    BuiltinWord { names: &["delNS", "rm"], effect: "names --", run: del_ns },
    BuiltinWord { names: &["renameNS", "mv"], effect: "old new --", run: rename_ns },
    BuiltinWord { names: &["copyNS"], effect: "src dest --", run: copy_ns },
    BuiltinWord { names: &["appendNS"], effect: "src dest --", run: append_ns },
    BuiltinWord { names: &["focusNS", "cd"], effect: "name --", run: focus_ns },
    BuiltinWord { names: &["getUserNS"], effect: "-- name", run: get_user_ns },
    BuiltinWord { names: &["linkToNS", "ln"], effect: "names --", run: link_to_ns },
    BuiltinWord { names: &["unlinkNS"], effect: "names --", run: unlink_ns },
    BuiltinWord { names: &["linksInNS"], effect: "names --", run: links_in_ns },
    BuiltinWord { names: &["dedupLinksNS"], effect: "names --", run: dedup_links_ns },
    BuiltinWord { names: &["getAllNS"], effect: "-- list", run: get_all_ns },
    BuiltinWord { names: &["wordsInNS"], effect: "names --", run: words_in_ns },
    BuiltinWord { names: &["removeWordNS"], effect: "words ns --", run: remove_word_ns },
];

/// Creating `std` or the current user namespace is a no-op.
fn create_ns(interp: &mut Interpreter) -> EvalResult {
    for name in pop_names(interp, "createNS")? {
        if name == STD || name == interp.namespaces.current_user() {
            continue;
        }
        interp.namespaces.create(&name)?;
    }
    Ok(())
}

/// Missing namespaces are ignored.
fn del_ns(interp: &mut Interpreter) -> EvalResult {
    for name in pop_names(interp, "delNS")? {
        if interp.namespaces.contains(&name) {
            interp.namespaces.delete(&name)?;
        }
    }
    Ok(())
}

fn rename_ns(interp: &mut Interpreter) -> EvalResult {
    let new = pop_text(interp, "renameNS")?;
    let old = pop_text(interp, "renameNS")?;
    interp.namespaces.rename(&old, &new)?;
    Ok(())
}

fn copy_ns(interp: &mut Interpreter) -> EvalResult {
    let dest = pop_text(interp, "copyNS")?;
    let src = pop_text(interp, "copyNS")?;
    if dest != src {
        interp.namespaces.copy(&src, &dest)?;
    }
    Ok(())
}

/// The destination is created if it does not exist.
fn append_ns(interp: &mut Interpreter) -> EvalResult {
    let dest = pop_text(interp, "appendNS")?;
    let src = pop_text(interp, "appendNS")?;
    if dest == src {
        return Ok(());
    }
    if !interp.namespaces.contains(&dest) {
        interp.namespaces.create(&dest)?;
    }
    interp.namespaces.append(&src, &dest)?;
    Ok(())
}

fn focus_ns(interp: &mut Interpreter) -> EvalResult {
    let name = pop_text(interp, "focusNS")?;
    interp.namespaces.change_current_user(&name)?;
    Ok(())
}

fn get_user_ns(interp: &mut Interpreter) -> EvalResult {
    let name = interp.namespaces.current_user().to_string();
    interp.stack.push(Value::Text(name));
    Ok(())
}

/// Link the current user namespace to each name. Links to itself and to
/// the built-in namespaces are skipped.
fn link_to_ns(interp: &mut Interpreter) -> EvalResult {
    let user = interp.namespaces.current_user().to_string();
    for name in pop_names(interp, "linkToNS")? {
        if name == user || interp.namespaces.is_reserved(&name) {
            continue;
        }
        interp.namespaces.add_link(&user, &name)?;
    }
    Ok(())
}

/// `ns:target` removes the link from `ns`; a bare name removes it from the
/// current user namespace.
fn unlink_ns(interp: &mut Interpreter) -> EvalResult {
    let user = interp.namespaces.current_user().to_string();
    for name in pop_names(interp, "unlinkNS")? {
        let q = QualifiedName::parse(&name);
        let from = q.namespace.unwrap_or(&user);
        interp.namespaces.remove_link(from, q.name)?;
    }
    Ok(())
}

fn links_in_ns(interp: &mut Interpreter) -> EvalResult {
    for name in pop_names(interp, "linksInNS")? {
        let links = interp.namespaces.links(&name)?;
        interp.output_info(&format!("For namespace {name}:\n  {}", links.join(" ")));
    }
    Ok(())
}

fn dedup_links_ns(interp: &mut Interpreter) -> EvalResult {
    for name in pop_names(interp, "dedupLinksNS")? {
        interp.namespaces.dedup_links(&name)?;
    }
    Ok(())
}

/// Names of every user-editable namespace, sorted.
fn get_all_ns(interp: &mut Interpreter) -> EvalResult {
    let store = &interp.namespaces;
    let names: Vec<Value> = store
        .names()
        .into_iter()
        .filter(|name| !store.is_reserved(name))
        .map(Value::from)
        .collect();
    interp.stack.push(Value::List(names));
    Ok(())
}

fn words_in_ns(interp: &mut Interpreter) -> EvalResult {
    for name in pop_names(interp, "wordsInNS")? {
        let words = interp.namespaces.words_in(&name)?.join(" ");
        interp.output_info(&format!("For namespace {name}:\n  {words}"));
    }
    Ok(())
}

/// `ns:word` entries override the namespace argument.
fn remove_word_ns(interp: &mut Interpreter) -> EvalResult {
    let ns = pop_text(interp, "removeWordNS")?;
    for word in pop_names(interp, "removeWordNS")? {
        let q = QualifiedName::parse(&word);
        interp
            .namespaces
            .remove_word(q.namespace.unwrap_or(&ns), q.name)?;
    }
    Ok(())
}
