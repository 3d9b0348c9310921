//! Native words.
//!
//! Each category is a table of [`BuiltinWord`]s installed into its own
//! protected namespace, linked from `std` in table order. Every word is a
//! plain function of the interpreter that pops its arguments, validates
//! them and pushes its results. Arguments are popped before they are
//! validated, so a failing word leaves them consumed.

mod arithmetic;
mod conditionals;
mod control;
mod helpers;
mod lists;
mod meta;
mod ns_words;
mod stack_words;
mod strings;
mod types;
mod vars;

use crate::namespace::{NamespaceStore, NativeFn, WordDef};

/// A native word and its aliases.
pub struct BuiltinWord {
    pub names: &'static [&'static str],
    /// Stack effect shown by `doc`.
    pub effect: &'static str,
    pub run: NativeFn,
}

impl BuiltinWord {
    fn doc(&self) -> String {
        format!("  {} : ({})", self.names.join(", "), self.effect)
    }
}

/// Category namespaces and their words, in search order.
pub const CATEGORIES: &[(&str, &[BuiltinWord])] = &[
    ("cat_stack", stack_words::WORDS),
    ("cat_arithmetic", arithmetic::WORDS),
    ("cat_conditionals", conditionals::WORDS),
    ("cat_control", control::WORDS),
    ("cat_lists", lists::WORDS),
    ("cat_strings", strings::WORDS),
    ("cat_types", types::WORDS),
    ("cat_vars", vars::WORDS),
    ("cat_nsWords", ns_words::WORDS),
    ("cat_meta", meta::WORDS),
];

/// Install every category into `store`.
pub fn register_all(store: &mut NamespaceStore) {
    for (category, words) in CATEGORIES {
        store.add_category(category);
        for word in *words {
            let doc = word.doc();
            for name in word.names {
                store.register_builtin(category, name, WordDef::native(word.run, doc.clone()));
            }
        }
    }
}
