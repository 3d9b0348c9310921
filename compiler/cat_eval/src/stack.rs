//! The value stack and its auxiliary stack.
//!
//! The top of the stack is the end of the vector. `pop_n` hands values back
//! top first, so `let [top, next] = ...` reads the way words are documented.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

use crate::value::Value;

/// Popped values, top of stack first.
pub type Popped = SmallVec<[Value; 4]>;

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum StackError {
    #[error("stack underflow: needed {needed} item(s), found {available}")]
    Underflow { needed: usize, available: usize },
    #[error("aux stack underflow: needed {needed} item(s), found {available}")]
    AuxUnderflow { needed: usize, available: usize },
}

/// Main stack plus the auxiliary stack used by `->aux` and `aux->`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueStack {
    items: Vec<Value>,
    aux: Vec<Value>,
}

impl ValueStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(items: Vec<Value>) -> Self {
        Self {
            items,
            aux: Vec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    /// Push several values; the last one ends up on top.
    pub fn push_multi(&mut self, values: impl IntoIterator<Item = Value>) {
        self.items.extend(values);
    }

    pub fn pop(&mut self) -> Result<Value, StackError> {
        self.items.pop().ok_or(StackError::Underflow {
            needed: 1,
            available: 0,
        })
    }

    /// Pop `n` values, top first. Nothing is popped on underflow.
    pub fn pop_n(&mut self, n: usize) -> Result<Popped, StackError> {
        let available = self.items.len();
        if available < n {
            return Err(StackError::Underflow {
                needed: n,
                available,
            });
        }
        Ok(self.items.drain(available - n..).rev().collect())
    }

    /// Pop two values as `(top, next)`.
    pub fn pop2(&mut self) -> Result<(Value, Value), StackError> {
        self.check(2)?;
        let top = self.pop()?;
        let next = self.pop()?;
        Ok((top, next))
    }

    /// Pop three values as `(top, middle, bottom)`.
    pub fn pop3(&mut self) -> Result<(Value, Value, Value), StackError> {
        self.check(3)?;
        let top = self.pop()?;
        let middle = self.pop()?;
        let bottom = self.pop()?;
        Ok((top, middle, bottom))
    }

    fn check(&self, needed: usize) -> Result<(), StackError> {
        if self.items.len() < needed {
            return Err(StackError::Underflow {
                needed,
                available: self.items.len(),
            });
        }
        Ok(())
    }

    pub fn peek(&self) -> Result<&Value, StackError> {
        self.peek_at(0)
    }

    /// Value `depth` positions below the top (`0` is the top).
    pub fn peek_at(&self, depth: usize) -> Result<&Value, StackError> {
        let len = self.items.len();
        if depth >= len {
            return Err(StackError::Underflow {
                needed: depth + 1,
                available: len,
            });
        }
        Ok(&self.items[len - 1 - depth])
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Keep only the bottom `n` items.
    pub fn clear_to(&mut self, n: usize) {
        self.items.truncate(n);
    }

    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    /// Remove the first occurrence (from the bottom) of `value`.
    pub fn remove_first(&mut self, value: &Value) -> bool {
        match self.items.iter().position(|v| v == value) {
            Some(i) => {
                self.items.remove(i);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bottom-to-top view.
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn snapshot(&self) -> Vec<Value> {
        self.items.clone()
    }

    pub fn restore(&mut self, items: Vec<Value>) {
        self.items = items;
    }

    /// Remove and return every item, bottom first.
    pub fn take_all(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.items)
    }

    pub fn push_aux(&mut self, value: Value) {
        self.aux.push(value);
    }

    pub fn pop_aux(&mut self) -> Result<Value, StackError> {
        self.aux.pop().ok_or(StackError::AuxUnderflow {
            needed: 1,
            available: 0,
        })
    }

    /// Pop `n` aux values, top first.
    pub fn pop_aux_n(&mut self, n: usize) -> Result<Popped, StackError> {
        let available = self.aux.len();
        if available < n {
            return Err(StackError::AuxUnderflow {
                needed: n,
                available,
            });
        }
        Ok(self.aux.drain(available - n..).rev().collect())
    }

    pub fn aux_len(&self) -> usize {
        self.aux.len()
    }
}

impl fmt::Display for ValueStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::List(self.items.clone()))
    }
}

#[cfg(test)]
mod tests;
