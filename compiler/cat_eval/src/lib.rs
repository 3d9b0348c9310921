//! Cat Eval - the stack machine for the Cat language.
//!
//! # Architecture
//!
//! - [`Interpreter`]: value stack, namespace store, capability registry and
//!   configuration; evaluates source text atom by atom
//! - [`NamespaceStore`]: named scopes of words, variables and instances,
//!   searched depth first through their links
//! - [`builtins`]: native words, one protected namespace per category
//! - [`definition`]: `define name : (effect) {{ doc }} { body }` statements
//! - [`loader`]: definition files and dependency fetching from search paths
//! - [`CapabilityRegistry`]: host functions, constants and object
//!   constructors reachable as `module.member`
//!
//! # Usage
//!
//! ```
//! use cat_eval::{silent_handler, InterpreterBuilder, Value};
//!
//! let mut interp = InterpreterBuilder::new()
//!     .print_handler(silent_handler())
//!     .build();
//! interp.eval("define inc { 1 + }").ok();
//! interp.eval("41 inc").ok();
//! assert_eq!(interp.values(), &[Value::Int(42)]);
//! ```

pub mod builtins;
pub mod capability;
pub mod config;
pub mod definition;
mod diagnostics;
pub mod errors;
mod interpreter;
pub mod loader;
pub mod namespace;
pub mod print_handler;
mod recursion;
pub mod stack;
pub mod value;

pub use capability::{Arity, Capability, CapabilityRegistry, HostObject, NativeThunk};
pub use config::{keys as config_keys, ConfigSource, EvalConfig, MapConfig, DEFAULT_MAX_DEPTH};
pub use definition::{parse_definition, Definition};
pub use errors::{EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedStack, UserNamespaceScope};
pub use loader::{find_definition, statements, Statement};
pub use namespace::{NamespaceError, NamespaceStore, WordDef, DEFAULT_USER, STD};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use stack::{StackError, ValueStack};
pub use value::{Callable, InstanceHandle, Value};
