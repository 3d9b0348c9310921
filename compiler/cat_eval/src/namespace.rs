//! Namespaces: named scopes of words, variables and instances.
//!
//! # Lookup
//!
//! Every lookup starts at a namespace and searches it, then its links in
//! order, depth first. The first hit wins. One visited set is shared by the
//! whole search, so link cycles terminate.
//!
//! The built-in scope `std` links to the category namespaces holding the
//! native words, and after them to the *current user namespace*. An
//! unqualified lookup starts at `std` and therefore reaches both the
//! built-ins and whatever the user is currently defining into. The current
//! user pointer is its own field on [`Links`], never an ordinary link.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use cat_ir::Quotation;

use crate::errors::EvalResult;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Name of the built-in scope.
pub const STD: &str = "std";

/// Current user namespace of a fresh interpreter.
pub const DEFAULT_USER: &str = "user";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("namespace '{name}' already exists or is reserved")]
    NameConflict { name: String },
    #[error("namespace '{name}' does not exist")]
    NotFound { name: String },
    #[error("namespace '{name}' is protected")]
    Protected { name: String },
}

fn not_found(name: &str) -> NamespaceError {
    NamespaceError::NotFound {
        name: name.to_string(),
    }
}

fn protected(name: &str) -> NamespaceError {
    NamespaceError::Protected {
        name: name.to_string(),
    }
}

fn conflict(name: &str) -> NamespaceError {
    NamespaceError::NameConflict {
        name: name.to_string(),
    }
}

/// Native word implementation.
pub type NativeFn = fn(&mut Interpreter) -> EvalResult;

#[derive(Clone, Debug)]
pub enum WordBody {
    Native(NativeFn),
    Defined(Quotation),
}

#[derive(Clone, Debug)]
pub struct WordDef {
    pub body: WordBody,
    pub doc: String,
    /// Words fetched before this one was installed.
    pub deps: Vec<String>,
}

impl WordDef {
    pub fn native(run: NativeFn, doc: impl Into<String>) -> Self {
        Self {
            body: WordBody::Native(run),
            doc: doc.into(),
            deps: Vec::new(),
        }
    }

    pub fn defined(body: Quotation, doc: impl Into<String>, deps: Vec<String>) -> Self {
        Self {
            body: WordBody::Defined(body),
            doc: doc.into(),
            deps,
        }
    }
}

/// Ordered links of a namespace.
///
/// Only `std` has a `current_user` entry; it is always searched after the
/// explicit links.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Links {
    explicit: Vec<String>,
    current_user: Option<String>,
}

impl Links {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.explicit
            .iter()
            .map(String::as_str)
            .chain(self.current_user.as_deref())
    }

    pub fn explicit(&self) -> &[String] {
        &self.explicit
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    fn dedup(&mut self) {
        let mut seen = FxHashSet::default();
        self.explicit.retain(|name| seen.insert(name.clone()));
    }
}

#[derive(Clone, Debug, Default)]
pub struct Namespace {
    pub words: FxHashMap<String, WordDef>,
    pub vars: FxHashMap<String, Value>,
    pub instances: FxHashMap<String, Value>,
    links: Links,
    files: Vec<String>,
}

impl Namespace {
    pub fn links(&self) -> &Links {
        &self.links
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Word names, sorted.
    pub fn word_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.words.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Which table a lookup reads.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Word,
    Variable,
    Instance,
}

/// All namespaces of one interpreter.
#[derive(Clone, Debug)]
pub struct NamespaceStore {
    spaces: FxHashMap<String, Namespace>,
    /// `std` and the built-in category namespaces.
    reserved: FxHashSet<String>,
}

impl Default for NamespaceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceStore {
    /// A store holding `std` and an empty `user` namespace that is current.
    pub fn new() -> Self {
        let mut spaces = FxHashMap::default();
        let mut std_ns = Namespace::default();
        std_ns.links.current_user = Some(DEFAULT_USER.to_string());
        spaces.insert(STD.to_string(), std_ns);
        spaces.insert(DEFAULT_USER.to_string(), Namespace::default());
        let mut reserved = FxHashSet::default();
        reserved.insert(STD.to_string());
        reserved.insert(cat_ir::name::GLOBAL_QUALIFIER.to_string());
        Self { spaces, reserved }
    }

    /// Create a protected category namespace linked from `std`.
    pub fn add_category(&mut self, name: &str) {
        if self.reserved.insert(name.to_string()) {
            self.spaces.insert(name.to_string(), Namespace::default());
            if let Some(std_ns) = self.spaces.get_mut(STD) {
                std_ns.links.explicit.push(name.to_string());
            }
        }
    }

    /// Install a native word into a category namespace.
    pub fn register_builtin(&mut self, category: &str, name: &str, def: WordDef) {
        self.add_category(category);
        if let Some(ns) = self.spaces.get_mut(category) {
            ns.words.insert(name.to_string(), def);
        }
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.spaces.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Namespace> {
        self.spaces.get(name)
    }

    fn get_ok(&self, name: &str) -> Result<&Namespace, NamespaceError> {
        self.spaces.get(name).ok_or_else(|| not_found(name))
    }

    fn get_mut_ok(&mut self, name: &str) -> Result<&mut Namespace, NamespaceError> {
        self.spaces.get_mut(name).ok_or_else(|| not_found(name))
    }

    /// Mutable access to a namespace users may edit.
    fn editable(&mut self, name: &str) -> Result<&mut Namespace, NamespaceError> {
        if self.reserved.contains(name) {
            return Err(protected(name));
        }
        self.get_mut_ok(name)
    }

    /// Name of the current user namespace.
    pub fn current_user(&self) -> &str {
        self.spaces
            .get(STD)
            .and_then(|ns| ns.links.current_user())
            .unwrap_or(DEFAULT_USER)
    }

    /// Point `std` at a different user namespace; returns the previous one.
    pub fn change_current_user(&mut self, name: &str) -> Result<String, NamespaceError> {
        if self.reserved.contains(name) {
            return Err(protected(name));
        }
        if !self.spaces.contains_key(name) {
            return Err(not_found(name));
        }
        let std_ns = self.get_mut_ok(STD)?;
        let previous = std_ns
            .links
            .current_user
            .replace(name.to_string())
            .unwrap_or_else(|| DEFAULT_USER.to_string());
        tracing::debug!(from = %previous, to = name, "current user namespace changed");
        Ok(previous)
    }

    pub fn create(&mut self, name: &str) -> Result<(), NamespaceError> {
        if name.is_empty() || self.reserved.contains(name) || self.spaces.contains_key(name) {
            return Err(conflict(name));
        }
        self.spaces.insert(name.to_string(), Namespace::default());
        Ok(())
    }

    /// Delete a namespace and every link pointing at it.
    pub fn delete(&mut self, name: &str) -> Result<(), NamespaceError> {
        if self.reserved.contains(name) || name == self.current_user() {
            return Err(protected(name));
        }
        if self.spaces.remove(name).is_none() {
            return Err(not_found(name));
        }
        for ns in self.spaces.values_mut() {
            ns.links.explicit.retain(|link| link != name);
        }
        Ok(())
    }

    /// Rename a namespace, rewriting links and the current user pointer.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), NamespaceError> {
        if self.reserved.contains(old) {
            return Err(protected(old));
        }
        if new.is_empty() || self.reserved.contains(new) || self.spaces.contains_key(new) {
            return Err(conflict(new));
        }
        let ns = self.spaces.remove(old).ok_or_else(|| not_found(old))?;
        self.spaces.insert(new.to_string(), ns);
        for ns in self.spaces.values_mut() {
            for link in &mut ns.links.explicit {
                if link == old {
                    *link = new.to_string();
                }
            }
            if ns.links.current_user.as_deref() == Some(old) {
                ns.links.current_user = Some(new.to_string());
            }
        }
        Ok(())
    }

    /// Copy `src` into a new namespace `dest`.
    pub fn copy(&mut self, src: &str, dest: &str) -> Result<(), NamespaceError> {
        if dest.is_empty() || self.reserved.contains(dest) || self.spaces.contains_key(dest) {
            return Err(conflict(dest));
        }
        let mut copy = self.get_ok(src)?.clone();
        copy.links.current_user = None;
        self.spaces.insert(dest.to_string(), copy);
        Ok(())
    }

    /// Union `src` into `dest`. Entries already in `dest` win; links are
    /// appended and deduplicated.
    pub fn append(&mut self, src: &str, dest: &str) -> Result<(), NamespaceError> {
        let source = self.get_ok(src)?.clone();
        let target = self.editable(dest)?;
        for (name, def) in source.words {
            target.words.entry(name).or_insert(def);
        }
        for (name, value) in source.vars {
            target.vars.entry(name).or_insert(value);
        }
        for (name, value) in source.instances {
            target.instances.entry(name).or_insert(value);
        }
        target.links.explicit.extend(source.links.explicit);
        target.links.explicit.retain(|link| link != dest);
        target.links.dedup();
        Ok(())
    }

    pub fn add_link(&mut self, ns: &str, target: &str) -> Result<(), NamespaceError> {
        if !self.spaces.contains_key(target) {
            return Err(not_found(target));
        }
        self.editable(ns)?.links.explicit.push(target.to_string());
        Ok(())
    }

    /// Remove every link from `ns` to `target`; returns whether any existed.
    pub fn remove_link(&mut self, ns: &str, target: &str) -> Result<bool, NamespaceError> {
        let links = &mut self.editable(ns)?.links.explicit;
        let before = links.len();
        links.retain(|link| link != target);
        Ok(links.len() != before)
    }

    pub fn replace_links(&mut self, ns: &str, links: Vec<String>) -> Result<(), NamespaceError> {
        if let Some(missing) = links.iter().find(|l| !self.spaces.contains_key(l.as_str())) {
            return Err(not_found(missing));
        }
        self.editable(ns)?.links.explicit = links;
        Ok(())
    }

    pub fn dedup_links(&mut self, ns: &str) -> Result<(), NamespaceError> {
        self.editable(ns)?.links.dedup();
        Ok(())
    }

    /// Links of `ns` in search order.
    pub fn links(&self, ns: &str) -> Result<Vec<String>, NamespaceError> {
        Ok(self.get_ok(ns)?.links.iter().map(str::to_string).collect())
    }

    /// Depth-first search for `item` starting at `start`.
    ///
    /// Returns the value and the name of the namespace that owns it.
    /// Links to namespaces that no longer exist are skipped.
    pub fn resolve<'s>(
        &'s self,
        item: &str,
        start: &str,
        kind: ItemKind,
    ) -> Result<Option<(Lookup<'s>, &'s str)>, NamespaceError> {
        if !self.spaces.contains_key(start) {
            return Err(not_found(start));
        }
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut pending: Vec<&str> = vec![start];
        while let Some(name) = pending.pop() {
            let Some((owner, ns)) = self.spaces.get_key_value(name) else {
                continue;
            };
            if !visited.insert(owner.as_str()) {
                continue;
            }
            let hit = match kind {
                ItemKind::Word => ns.words.get(item).map(Lookup::Word),
                ItemKind::Variable => ns.vars.get(item).map(Lookup::Value),
                ItemKind::Instance => ns.instances.get(item).map(Lookup::Value),
            };
            if let Some(hit) = hit {
                return Ok(Some((hit, owner.as_str())));
            }
            let links: Vec<&str> = ns.links.iter().collect();
            pending.extend(links.into_iter().rev());
        }
        Ok(None)
    }

    pub fn resolve_word<'s>(
        &'s self,
        name: &str,
        start: &str,
    ) -> Result<Option<(&'s WordDef, &'s str)>, NamespaceError> {
        Ok(self
            .resolve(name, start, ItemKind::Word)?
            .and_then(|(hit, owner)| hit.word().map(|w| (w, owner))))
    }

    pub fn resolve_var<'s>(
        &'s self,
        name: &str,
        start: &str,
    ) -> Result<Option<(&'s Value, &'s str)>, NamespaceError> {
        Ok(self
            .resolve(name, start, ItemKind::Variable)?
            .and_then(|(hit, owner)| hit.value().map(|v| (v, owner))))
    }

    pub fn resolve_instance<'s>(
        &'s self,
        name: &str,
        start: &str,
    ) -> Result<Option<(&'s Value, &'s str)>, NamespaceError> {
        Ok(self
            .resolve(name, start, ItemKind::Instance)?
            .and_then(|(hit, owner)| hit.value().map(|v| (v, owner))))
    }

    /// Sorted names of the namespaces holding `word` directly.
    pub fn owners_of(&self, word: &str) -> Vec<&str> {
        let mut owners: Vec<&str> = self
            .spaces
            .iter()
            .filter(|(_, ns)| ns.words.contains_key(word))
            .map(|(name, _)| name.as_str())
            .collect();
        owners.sort_unstable();
        owners
    }

    pub fn define_word(&mut self, ns: &str, name: &str, def: WordDef) -> Result<(), NamespaceError> {
        self.editable(ns)?.words.insert(name.to_string(), def);
        Ok(())
    }

    pub fn remove_word(&mut self, ns: &str, name: &str) -> Result<bool, NamespaceError> {
        Ok(self.editable(ns)?.words.remove(name).is_some())
    }

    /// Set a variable. `std` accepts variables (the `global:` table) even
    /// though its words are protected.
    pub fn set_var(&mut self, ns: &str, name: &str, value: Value) -> Result<(), NamespaceError> {
        if ns != STD && self.reserved.contains(ns) {
            return Err(protected(ns));
        }
        self.get_mut_ok(ns)?.vars.insert(name.to_string(), value);
        Ok(())
    }

    pub fn remove_var(&mut self, ns: &str, name: &str) -> Result<bool, NamespaceError> {
        Ok(self.get_mut_ok(ns)?.vars.remove(name).is_some())
    }

    pub fn add_instance(&mut self, ns: &str, name: &str, value: Value) -> Result<(), NamespaceError> {
        self.editable(ns)?.instances.insert(name.to_string(), value);
        Ok(())
    }

    pub fn record_file(&mut self, ns: &str, file: &str) -> Result<(), NamespaceError> {
        let files = &mut self.get_mut_ok(ns)?.files;
        if !files.iter().any(|f| f == file) {
            files.push(file.to_string());
        }
        Ok(())
    }

    pub fn has_file(&self, ns: &str, file: &str) -> bool {
        self.spaces
            .get(ns)
            .is_some_and(|n| n.files.iter().any(|f| f == file))
    }

    /// All namespace names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.spaces.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sorted word names defined directly in `ns`.
    pub fn words_in(&self, ns: &str) -> Result<Vec<&str>, NamespaceError> {
        Ok(self.get_ok(ns)?.word_names())
    }

    /// Every word outside the reserved namespaces, as `ns:word`, sorted.
    pub fn user_words(&self) -> Vec<String> {
        let mut words: Vec<String> = self
            .spaces
            .iter()
            .filter(|(name, _)| !self.reserved.contains(name.as_str()))
            .flat_map(|(name, ns)| ns.words.keys().map(move |w| format!("{name}:{w}")))
            .collect();
        words.sort_unstable();
        words
    }

    /// Every native word name, sorted and deduplicated.
    pub fn builtin_words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self
            .reserved
            .iter()
            .filter_map(|name| self.spaces.get(name))
            .flat_map(|ns| ns.words.keys().map(String::as_str))
            .collect();
        words.sort_unstable();
        words.dedup();
        words
    }
}

/// A lookup hit.
#[derive(Copy, Clone, Debug)]
pub enum Lookup<'s> {
    Word(&'s WordDef),
    Value(&'s Value),
}

impl<'s> Lookup<'s> {
    pub fn word(self) -> Option<&'s WordDef> {
        match self {
            Lookup::Word(w) => Some(w),
            Lookup::Value(_) => None,
        }
    }

    pub fn value(self) -> Option<&'s Value> {
        match self {
            Lookup::Value(v) => Some(v),
            Lookup::Word(_) => None,
        }
    }
}
