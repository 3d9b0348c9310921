//! Runtime values held on the stack and in variables.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use cat_ir::{Atom, Number, Quotation};

use crate::capability::HostObject;

/// Shared handle to a host object registered as an instance.
pub type InstanceHandle = Rc<dyn HostObject>;

/// Something the evaluator can run.
#[derive(Clone, Debug)]
pub enum Callable {
    /// `[ ... ]` or a list of atoms taken from a word body.
    Quotation(Quotation),
    /// A reference to a named word, resolved when called.
    Word(String),
    /// Pushes the wrapped value when called (built by `quote`).
    Constant(Rc<Value>),
    /// Runs the first function, then the second (built by `compose`).
    Compose(Rc<(Value, Value)>),
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Quotation(a), Callable::Quotation(b)) => a == b,
            (Callable::Word(a), Callable::Word(b)) => a == b,
            (Callable::Constant(a), Callable::Constant(b)) => a == b,
            (Callable::Compose(a), Callable::Compose(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Quotation(q) => write!(f, "{q}"),
            Callable::Word(name) => write!(f, "[{name}]"),
            Callable::Constant(v) => write!(f, "[{} quote]", Repr(v)),
            Callable::Compose(pair) => write!(f, "[{} {} compose]", Repr(&pair.0), Repr(&pair.1)),
        }
    }
}

/// A dynamically typed stack value.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Callable(Callable),
    Instance(InstanceHandle),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn quotation(q: Quotation) -> Self {
        Value::Callable(Callable::Quotation(q))
    }

    /// Name of the value's type as shown in errors and by `typeof`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "string",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
            Value::Map(_) => "hash",
            Value::Callable(_) => "function",
            Value::Instance(_) => "instance",
        }
    }

    /// Truthiness: zero, empty text/list/map and `false` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::Text(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::List(items) => !items.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::Callable(_) | Value::Instance(_) => true,
        }
    }

    /// View the value as a list.
    ///
    /// A quotation is viewed as the list of its atoms: numbers stay numbers,
    /// strings and words become text, nested quotations stay callables.
    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            Value::Callable(Callable::Quotation(q)) => Some(q.iter().map(Value::from).collect()),
            _ => None,
        }
    }

    /// Whether [`into_list`](Self::into_list) would succeed.
    pub fn is_list_like(&self) -> bool {
        matches!(
            self,
            Value::List(_) | Value::Callable(Callable::Quotation(_))
        )
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss, reason = "numeric promotion to float")]
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(n) => Value::Int(n),
            Number::Float(x) => Value::Float(x),
        }
    }
}

impl From<&Atom> for Value {
    fn from(atom: &Atom) -> Self {
        match atom {
            Atom::Number(n) => (*n).into(),
            Atom::Str(s) | Atom::Word(s) => Value::Text(s.clone()),
            Atom::Quotation(q) => Value::quotation(q.clone()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl PartialEq for Value {
    /// Numbers compare by value across int and float.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_f64() == other.as_f64()
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a == b,
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// Top-level display: text is shown bare, nested text is quoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            other => write!(f, "{}", Repr(other)),
        }
    }
}

/// Source-like rendering, used inside collections.
struct Repr<'a>(&'a Value);

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Text(s) => write!(f, "'{s}'"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", Repr(item))?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{k}': {}", Repr(v))?;
                }
                f.write_str("}")
            }
            Value::Callable(c) => write!(f, "{c}"),
            Value::Instance(obj) => write!(f, "<{} instance>", obj.type_name()),
        }
    }
}

#[cfg(test)]
mod tests;
