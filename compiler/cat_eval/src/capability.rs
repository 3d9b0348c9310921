//! Host-registered external functions, constants and objects.
//!
//! A word of the form `module.member` that is not a defined word resolves
//! through this closed table. Nothing is looked up dynamically: the host
//! registers every capability up front, usually through
//! [`InterpreterBuilder`](crate::InterpreterBuilder).

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::errors::{arity_mismatch, type_mismatch, EvalResult};
use crate::value::Value;

/// A host object stored as a named instance.
///
/// Methods take `&self`; objects with state use interior mutability.
pub trait HostObject: fmt::Debug {
    fn type_name(&self) -> &str;

    /// Read a non-callable member.
    fn attribute(&self, _name: &str) -> Option<Value> {
        None
    }

    fn has_method(&self, name: &str) -> bool;

    /// Call a method. `Ok(None)` means nothing is pushed.
    fn call_method(&self, name: &str, args: Vec<Value>) -> EvalResult<Option<Value>>;
}

/// How many stack values a capability function consumes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Takes a list from the top of the stack as its arguments, or the
    /// single top value when it is not a list.
    Variadic,
}

pub type NativeThunk = Rc<dyn Fn(Vec<Value>) -> EvalResult<Option<Value>>>;

#[derive(Clone)]
pub enum Capability {
    Function { arity: Arity, thunk: NativeThunk },
    Constant(Value),
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Function { arity, .. } => write!(f, "Function({arity:?})"),
            Capability::Constant(v) => write!(f, "Constant({v})"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CapabilityRegistry {
    entries: FxHashMap<String, Capability>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under its qualified name, replacing any
    /// previous entry.
    pub fn register_fn(
        &mut self,
        name: &str,
        arity: Arity,
        f: impl Fn(Vec<Value>) -> EvalResult<Option<Value>> + 'static,
    ) {
        self.entries.insert(
            name.to_string(),
            Capability::Function {
                arity,
                thunk: Rc::new(f),
            },
        );
    }

    pub fn register_constant(&mut self, name: &str, value: Value) {
        self.entries
            .insert(name.to_string(), Capability::Constant(value));
    }

    pub fn get(&self, name: &str) -> Option<&Capability> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The `math` module shipped with every interpreter.
    pub fn with_math(mut self) -> Self {
        register_math(&mut self);
        self
    }
}

fn number_arg(name: &str, value: &Value) -> EvalResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| type_mismatch(name, "number", value.type_name()))
}

fn unary_math(registry: &mut CapabilityRegistry, name: &'static str, op: fn(f64) -> f64) {
    registry.register_fn(name, Arity::Exact(1), move |args| {
        let [x] = args.as_slice() else {
            return Err(arity_mismatch(name, 1, args.len()));
        };
        Ok(Some(Value::Float(op(number_arg(name, x)?))))
    });
}

fn register_math(registry: &mut CapabilityRegistry) {
    registry.register_constant("math.pi", Value::Float(std::f64::consts::PI));
    registry.register_constant("math.e", Value::Float(std::f64::consts::E));
    unary_math(registry, "math.sqrt", f64::sqrt);
    unary_math(registry, "math.floor", f64::floor);
    unary_math(registry, "math.ceil", f64::ceil);
    unary_math(registry, "math.sin", f64::sin);
    unary_math(registry, "math.cos", f64::cos);
    unary_math(registry, "math.log", f64::ln);
    registry.register_fn("math.pow", Arity::Exact(2), |args| {
        let [base, exp] = args.as_slice() else {
            return Err(arity_mismatch("math.pow", 2, args.len()));
        };
        let base = number_arg("math.pow", base)?;
        let exp = number_arg("math.pow", exp)?;
        Ok(Some(Value::Float(base.powf(exp))))
    });
}

#[cfg(test)]
mod tests;
