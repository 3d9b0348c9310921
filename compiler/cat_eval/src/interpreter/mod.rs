//! The stack machine.
//!
//! An [`Interpreter`] owns the value stack, the namespace store, the
//! capability registry and its configuration. Evaluation is plain
//! recursive descent: quotations, control words and defined word bodies
//! all re-enter [`Interpreter::eval_atoms`].
//!
//! # Atom dispatch
//!
//! - string literal: pushed as text
//! - number: pushed
//! - quotation: pushed as a callable
//! - word text, in order:
//!   1. a variable (`x`, `ns:x`, `global:x`) pushes its value
//!   2. a word (`w`, `ns:w`) runs
//!   3. `instance.member` (or `ns:instance.member`) calls or reads a host
//!      object
//!   4. `module.member` runs a registered capability
//!   5. otherwise the text itself is pushed

mod builder;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::{ScopedStack, UserNamespaceScope};

use cat_ir::name::{member_path, QualifiedName};
use cat_ir::{Atom, Quotation};
use cat_lexer::tokenize;
use rustc_hash::FxHashSet;

use crate::capability::{Arity, Capability, CapabilityRegistry};
use crate::config::EvalConfig;
use crate::definition::is_definition;
use crate::diagnostics::CallStack;
use crate::errors::{no_such_member, undefined_instance, undefined_word, EvalResult};
use crate::namespace::{NamespaceStore, WordBody, STD};
use crate::print_handler::SharedPrintHandler;
use crate::recursion::ensure_sufficient_stack;
use crate::stack::ValueStack;
use crate::value::{Callable, Value};

/// A word found by lookup, detached from the store so it can run while
/// the store is mutated.
#[derive(Clone, Debug)]
struct ResolvedWord {
    name: String,
    body: WordBody,
    owner: String,
    qualified: bool,
}

pub struct Interpreter {
    pub stack: ValueStack,
    pub namespaces: NamespaceStore,
    pub(crate) capabilities: CapabilityRegistry,
    pub(crate) config: EvalConfig,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) call_stack: CallStack,
    /// Words currently being fetched, to stop dependency cycles.
    pub(crate) fetching: FxHashSet<String>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter with default configuration, stdout output and the
    /// standard capability set.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EvalConfig {
        &mut self.config
    }

    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    pub fn capabilities_mut(&mut self) -> &mut CapabilityRegistry {
        &mut self.capabilities
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Write a message to the output sink.
    pub fn output(&self, msg: &str, tag: Option<&str>) {
        self.print_handler.output(msg, tag);
    }

    pub(crate) fn output_error(&self, msg: &str) {
        self.print_handler
            .output_error(msg, Some(&self.config.error_tag));
    }

    pub(crate) fn output_info(&self, msg: &str) {
        self.print_handler.output(msg, Some(&self.config.info_tag));
    }

    /// Current stack, bottom first.
    pub fn values(&self) -> &[Value] {
        self.stack.as_slice()
    }

    /// Current word call depth.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Evaluate source text: a `define` statement, or a program.
    ///
    /// Atoms are read lazily, so text after a failing atom is never read.
    pub fn eval(&mut self, source: &str) -> EvalResult {
        let trimmed = source.trim_start();
        if is_definition(trimmed) {
            return self.define(trimmed);
        }
        for atom in tokenize(source) {
            self.eval_atom(&atom)?;
        }
        Ok(())
    }

    pub fn eval_atoms<'a>(&mut self, atoms: impl IntoIterator<Item = &'a Atom>) -> EvalResult {
        for atom in atoms {
            self.eval_atom(atom)?;
        }
        Ok(())
    }

    pub fn eval_quotation(&mut self, quotation: &Quotation) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_atoms(quotation))
    }

    /// Run a value as a program.
    ///
    /// Callables run; text is evaluated as source; in a list, text elements
    /// run as words and everything else is pushed. Other values are pushed.
    pub fn call(&mut self, f: &Value) -> EvalResult {
        match f {
            Value::Callable(c) => self.call_callable(c),
            Value::Text(source) => self.eval(source),
            Value::List(items) => ensure_sufficient_stack(|| {
                for item in items {
                    match item {
                        Value::Text(word) => self.eval_word(word)?,
                        other => self.stack.push(other.clone()),
                    }
                }
                Ok(())
            }),
            other => {
                self.stack.push(other.clone());
                Ok(())
            }
        }
    }

    pub fn call_callable(&mut self, callable: &Callable) -> EvalResult {
        match callable {
            Callable::Quotation(q) => self.eval_quotation(q),
            Callable::Word(name) => self.run_word(name),
            Callable::Constant(value) => {
                self.stack.push(Value::clone(value));
                Ok(())
            }
            Callable::Compose(pair) => self.eval2(&pair.0, &pair.1),
        }
    }

    /// Evaluate `first`, then `second`.
    pub fn eval2(&mut self, first: &Value, second: &Value) -> EvalResult {
        self.call(first)?;
        self.call(second)
    }

    pub fn eval_atom(&mut self, atom: &Atom) -> EvalResult {
        if self.config.trace {
            self.output_info(&format!("{atom}\t{}", self.stack));
        }
        tracing::trace!(%atom, depth = self.stack.len(), "eval atom");
        match atom {
            Atom::Number(n) => self.stack.push((*n).into()),
            Atom::Str(text) => self.stack.push(Value::Text(text.clone())),
            Atom::Quotation(q) => self.stack.push(Value::quotation(q.clone())),
            Atom::Word(text) => return self.eval_word(text),
        }
        Ok(())
    }

    /// Resolve and run word text; unresolved text is pushed as a value.
    pub fn eval_word(&mut self, text: &str) -> EvalResult {
        if let Some(value) = self.lookup_variable(text)? {
            self.stack.push(value);
            return Ok(());
        }
        if let Some(word) = self.lookup_word(text)? {
            return self.invoke(&word);
        }
        let q = QualifiedName::parse(text);
        if let Some((head, member)) = member_path(q.name) {
            if self.invoke_external(text, q.namespace, head, member)? {
                return Ok(());
            }
        }
        self.stack.push(Value::text(text));
        Ok(())
    }

    /// Run a word by name, failing if it does not exist.
    pub fn run_word(&mut self, text: &str) -> EvalResult {
        match self.lookup_word(text)? {
            Some(word) => self.invoke(&word),
            None => {
                let q = QualifiedName::parse(text);
                Err(undefined_word(q.name, q.namespace.unwrap_or(STD)))
            }
        }
    }

    /// Look up a variable, honoring `ns:` and `global:` qualifiers.
    pub fn lookup_variable(&self, text: &str) -> EvalResult<Option<Value>> {
        let q = QualifiedName::parse(text);
        if q.is_global() {
            return Ok(self
                .namespaces
                .get(STD)
                .and_then(|ns| ns.vars.get(q.name))
                .cloned());
        }
        let start = q.namespace.unwrap_or(STD);
        if !self.namespaces.contains(start) {
            return Ok(None);
        }
        Ok(self
            .namespaces
            .resolve_var(q.name, start)?
            .map(|(value, _)| value.clone()))
    }

    fn lookup_word(&self, text: &str) -> EvalResult<Option<ResolvedWord>> {
        let q = QualifiedName::parse(text);
        let start = q.namespace.unwrap_or(STD);
        if !self.namespaces.contains(start) {
            return Ok(None);
        }
        Ok(self
            .namespaces
            .resolve_word(q.name, start)?
            .map(|(def, owner)| ResolvedWord {
                name: q.name.to_string(),
                body: def.body.clone(),
                owner: owner.to_string(),
                qualified: q.namespace.is_some(),
            }))
    }

    /// Whether `text` names a word reachable from the built-in scope.
    pub fn is_word(&self, text: &str) -> bool {
        matches!(self.lookup_word(text), Ok(Some(_)))
    }

    fn invoke(&mut self, word: &ResolvedWord) -> EvalResult {
        // A qualified call into a user namespace runs with that namespace
        // current, so the body's unqualified words resolve there first.
        if word.qualified && !self.namespaces.is_reserved(&word.owner) {
            let mut scoped = self.in_user_namespace(&word.owner)?;
            return scoped.run_body(&word.name, &word.body);
        }
        self.run_body(&word.name, &word.body)
    }

    fn run_body(&mut self, name: &str, body: &WordBody) -> EvalResult {
        match body {
            WordBody::Native(run) => run(self),
            WordBody::Defined(q) => {
                self.call_stack.push(name)?;
                let result = self.eval_quotation(q).map_err(|err| {
                    if err.backtrace.is_some() {
                        err
                    } else {
                        err.with_backtrace(self.call_stack.capture())
                    }
                });
                self.call_stack.pop();
                result
            }
        }
    }

    /// Arguments for a host call: none on an empty stack, the elements of
    /// a list on top, or the single top value.
    fn member_args(&mut self) -> EvalResult<Vec<Value>> {
        if self.stack.is_empty() {
            return Ok(Vec::new());
        }
        let top = self.stack.pop()?;
        if top.is_list_like() {
            return Ok(top.into_list().unwrap_or_default());
        }
        Ok(vec![top])
    }

    /// `instance.member`, `ns:instance.member` or `module.member`. Returns
    /// `false` when neither an instance nor a capability matches.
    ///
    /// A qualifier naming an existing namespace commits to an instance: a
    /// miss there is an error rather than text.
    fn invoke_external(
        &mut self,
        text: &str,
        namespace: Option<&str>,
        head: &str,
        member: &str,
    ) -> EvalResult<bool> {
        let start = namespace.unwrap_or(STD);
        let instance = if self.namespaces.contains(start) {
            self.namespaces
                .resolve_instance(head, start)?
                .map(|(value, _)| value.clone())
        } else {
            None
        };
        if let Some(Value::Instance(obj)) = instance {
            tracing::debug!(instance = head, member, "host member access");
            if obj.has_method(member) {
                let args = self.member_args()?;
                if let Some(result) = obj.call_method(member, args)? {
                    self.stack.push(result);
                }
            } else if let Some(value) = obj.attribute(member) {
                self.stack.push(value);
            } else {
                return Err(no_such_member(member, obj.type_name()));
            }
            return Ok(true);
        }
        if let Some(ns) = namespace {
            if self.namespaces.contains(ns) {
                return Err(undefined_instance(head, ns));
            }
            return Ok(false);
        }

        match self.capabilities.get(text).cloned() {
            Some(Capability::Constant(value)) => {
                self.stack.push(value);
                Ok(true)
            }
            Some(Capability::Function { arity, thunk }) => {
                let args = match arity {
                    Arity::Exact(n) => {
                        let mut popped = self.stack.pop_n(n)?.into_vec();
                        popped.reverse();
                        popped
                    }
                    Arity::Variadic => self.member_args()?,
                };
                tracing::debug!(capability = text, args = args.len(), "capability call");
                if let Some(result) = thunk(args)? {
                    self.stack.push(result);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests;
