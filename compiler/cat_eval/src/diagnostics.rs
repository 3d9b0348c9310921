//! Call frame tracking for user-defined words.
//!
//! Every call into a defined word body pushes a frame; the depth check is
//! part of `push`. When an error escapes a body, the interpreter snapshots
//! the frames into an [`EvalBacktrace`].

use crate::errors::{recursion_limit_exceeded, EvalBacktrace, EvalError};

#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<String>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `None` means unbounded (native stack growth is still guarded).
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, failing with `RecursionLimit` when the limit is reached.
    /// The frame is not pushed on failure.
    pub fn push(&mut self, word: &str) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(word.to_string());
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Snapshot of the live frames, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        EvalBacktrace::new(self.frames.iter().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_pop_depth() {
        let mut stack = CallStack::new(None);
        assert!(stack.push("a").is_ok());
        assert!(stack.push("b").is_ok());
        assert_eq!(stack.depth(), 2);
        stack.pop();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_limit_is_enforced() {
        let mut stack = CallStack::new(Some(2));
        assert!(stack.push("a").is_ok());
        assert!(stack.push("b").is_ok());
        let err = stack.push("c").err().map(|e| e.kind);
        assert_eq!(err, Some(EvalErrorKind::RecursionLimit { limit: 2 }));
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_capture_most_recent_first() {
        let mut stack = CallStack::new(None);
        let _ = stack.push("outer");
        let _ = stack.push("inner");
        assert_eq!(
            stack.capture().frames(),
            &["inner".to_string(), "outer".to_string()]
        );
    }
}
