//! Runtime errors for the evaluator.
//!
//! `EvalErrorKind` carries the structured category; factory functions
//! below are the public way to build errors, and they fill in both the
//! kind and the display message.
//!
//! Leaf errors from the stack and the namespace store (`StackError`,
//! `NamespaceError`) convert into `EvalError` with `?`.

use std::fmt;

use crate::namespace::NamespaceError;
use crate::stack::StackError;

/// Result of evaluation. Most operations only mutate the stack.
pub type EvalResult<T = ()> = Result<T, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalErrorKind {
    // Stack
    StackUnderflow {
        needed: usize,
        available: usize,
    },

    // Lookup
    UndefinedWord {
        name: String,
        namespace: String,
    },
    UndefinedVariable {
        name: String,
        namespace: String,
    },
    UndefinedInstance {
        name: String,
        namespace: String,
    },
    NoSuchMember {
        member: String,
        type_name: String,
    },

    // Definitions and namespaces
    MalformedDefinition {
        reason: String,
    },
    Namespace(NamespaceError),

    // Values
    TypeMismatch {
        word: String,
        expected: String,
        got: String,
    },
    DivisionByZero,
    IntegerOverflow {
        operation: String,
    },
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    // Execution
    RecursionLimit {
        limit: usize,
    },
    Io {
        path: String,
        message: String,
    },
    UserRaised {
        message: String,
    },
    Halt {
        code: i32,
    },
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StackUnderflow { needed, available } => write!(
                f,
                "stack underflow: needed {needed} item(s), found {available}"
            ),

            Self::UndefinedWord { name, namespace } => {
                write!(f, "undefined word '{name}' (searched from '{namespace}')")
            }
            Self::UndefinedVariable { name, namespace } => {
                write!(f, "undefined variable '{name}' (searched from '{namespace}')")
            }
            Self::UndefinedInstance { name, namespace } => {
                write!(f, "undefined instance '{name}' (searched from '{namespace}')")
            }
            Self::NoSuchMember { member, type_name } => {
                write!(f, "no member '{member}' on {type_name}")
            }

            Self::MalformedDefinition { reason } => write!(f, "malformed definition: {reason}"),
            Self::Namespace(err) => write!(f, "{err}"),

            Self::TypeMismatch {
                word,
                expected,
                got,
            } => write!(f, "{word}: expected {expected}, got {got}"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => write!(f, "{name} expects {expected} argument(s), got {got}"),

            Self::RecursionLimit { limit } => {
                write!(f, "maximum word call depth of {limit} exceeded")
            }
            Self::Io { path, message } => write!(f, "{path}: {message}"),
            Self::UserRaised { message } => write!(f, "cat exception: {message}"),
            Self::Halt { code } => write!(f, "halt ({code})"),
            Self::Custom { message } => f.write_str(message),
        }
    }
}

/// The chain of user word calls active when an error was raised,
/// innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<String>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<String>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "word backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {frame}")?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// Word calls active at the error site, attached by the interpreter.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            backtrace: None,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            backtrace: None,
        }
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// Whether `try_catch` may intercept this error. `halt` always escapes.
    pub fn is_catchable(&self) -> bool {
        !matches!(self.kind, EvalErrorKind::Halt { .. })
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<StackError> for EvalError {
    fn from(err: StackError) -> Self {
        match err {
            StackError::Underflow { needed, available } => stack_underflow(needed, available),
            StackError::AuxUnderflow { needed, available } => Self {
                kind: EvalErrorKind::StackUnderflow { needed, available },
                message: err.to_string(),
                backtrace: None,
            },
        }
    }
}

impl From<NamespaceError> for EvalError {
    fn from(err: NamespaceError) -> Self {
        EvalError::from_kind(EvalErrorKind::Namespace(err))
    }
}

#[cold]
pub fn stack_underflow(needed: usize, available: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackUnderflow { needed, available })
}

#[cold]
pub fn undefined_word(name: &str, namespace: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedWord {
        name: name.to_string(),
        namespace: namespace.to_string(),
    })
}

#[cold]
pub fn undefined_variable(name: &str, namespace: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
        namespace: namespace.to_string(),
    })
}

#[cold]
pub fn undefined_instance(name: &str, namespace: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedInstance {
        name: name.to_string(),
        namespace: namespace.to_string(),
    })
}

#[cold]
pub fn no_such_member(member: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchMember {
        member: member.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn malformed_definition(reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedDefinition {
        reason: reason.into(),
    })
}

/// A word received a value of the wrong shape.
#[cold]
pub fn type_mismatch(word: &str, expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        word: word.to_string(),
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

#[cold]
pub fn io_error(path: &str, err: &std::io::Error) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Io {
        path: path.to_string(),
        message: err.to_string(),
    })
}

/// Error raised by the `raise`/`throw` words.
#[cold]
pub fn user_raised(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UserRaised {
        message: message.into(),
    })
}

#[cold]
pub fn halt(code: i32) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Halt { code })
}

#[cfg(test)]
mod tests;
