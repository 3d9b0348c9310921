//! RAII guards that restore interpreter state on drop.
//!
//! Both guards hold `&mut Interpreter` and deref to it, so code inside the
//! scope keeps calling interpreter methods directly. Restoration happens in
//! `Drop`, which also runs when the inner evaluation returns early with `?`.
//!
//! ```text
//! let mut scoped = interpreter.fresh_stack();
//! scoped.push(item);
//! scoped.call(&f)?;          // on error the outer stack comes back here
//! let results = scoped.collect();
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::stack::ValueStack;
use crate::value::Value;

/// Runs code against an empty stack, putting the outer stack back on drop.
pub struct ScopedStack<'guard> {
    interpreter: &'guard mut Interpreter,
    saved: ValueStack,
}

impl ScopedStack<'_> {
    /// Take everything the scope left on its stack, bottom first.
    pub fn collect(&mut self) -> Vec<Value> {
        self.interpreter.stack.take_all()
    }
}

impl Drop for ScopedStack<'_> {
    fn drop(&mut self) {
        std::mem::swap(&mut self.interpreter.stack, &mut self.saved);
    }
}

impl Deref for ScopedStack<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedStack<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

/// Makes another namespace the current user namespace for a scope.
pub struct UserNamespaceScope<'guard> {
    interpreter: &'guard mut Interpreter,
    previous: Option<String>,
}

impl Drop for UserNamespaceScope<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            // The previous namespace may have been deleted or renamed
            // inside the scope; then the current pointer stays where it is.
            if let Err(err) = self.interpreter.namespaces.change_current_user(&previous) {
                tracing::warn!(%err, "could not restore current user namespace");
            }
        }
    }
}

impl Deref for UserNamespaceScope<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for UserNamespaceScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Swap in an empty stack until the returned guard is dropped.
    pub fn fresh_stack(&mut self) -> ScopedStack<'_> {
        let saved = std::mem::take(&mut self.stack);
        ScopedStack {
            interpreter: self,
            saved,
        }
    }

    /// Make `ns` the current user namespace until the guard is dropped.
    ///
    /// Switching to the namespace that is already current is a no-op.
    pub fn in_user_namespace(
        &mut self,
        ns: &str,
    ) -> Result<UserNamespaceScope<'_>, crate::namespace::NamespaceError> {
        let previous = if self.namespaces.current_user() == ns {
            None
        } else {
            Some(self.namespaces.change_current_user(ns)?)
        };
        Ok(UserNamespaceScope {
            interpreter: self,
            previous,
        })
    }
}
