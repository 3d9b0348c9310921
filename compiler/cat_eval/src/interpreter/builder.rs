//! `InterpreterBuilder` for creating interpreters with custom configuration,
//! output sinks and host capabilities.

use rustc_hash::FxHashSet;

use super::Interpreter;
use crate::builtins;
use crate::capability::{Arity, CapabilityRegistry};
use crate::config::{ConfigSource, EvalConfig};
use crate::diagnostics::CallStack;
use crate::errors::EvalResult;
use crate::namespace::NamespaceStore;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::stack::ValueStack;
use crate::value::Value;

/// Builder for [`Interpreter`].
///
/// ```
/// use cat_eval::{buffer_handler, EvalConfig, InterpreterBuilder};
///
/// let mut interp = InterpreterBuilder::new()
///     .config(EvalConfig::default())
///     .print_handler(buffer_handler())
///     .build();
/// interp.eval("3 5 +").ok();
/// ```
pub struct InterpreterBuilder {
    config: EvalConfig,
    print_handler: Option<SharedPrintHandler>,
    capabilities: CapabilityRegistry,
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterBuilder {
    /// Default configuration, stdout output, `math` capabilities.
    pub fn new() -> Self {
        Self {
            config: EvalConfig::default(),
            print_handler: None,
            capabilities: CapabilityRegistry::new().with_math(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Read configuration from a key-value source.
    #[must_use]
    pub fn config_source(mut self, source: &dyn ConfigSource) -> Self {
        self.config = EvalConfig::from_source(source);
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Replace the whole capability registry.
    #[must_use]
    pub fn capabilities(mut self, capabilities: CapabilityRegistry) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[must_use]
    pub fn register_fn(
        mut self,
        name: &str,
        arity: Arity,
        f: impl Fn(Vec<Value>) -> EvalResult<Option<Value>> + 'static,
    ) -> Self {
        self.capabilities.register_fn(name, arity, f);
        self
    }

    #[must_use]
    pub fn register_constant(mut self, name: &str, value: Value) -> Self {
        self.capabilities.register_constant(name, value);
        self
    }

    pub fn build(self) -> Interpreter {
        let mut namespaces = NamespaceStore::new();
        builtins::register_all(&mut namespaces);
        tracing::debug!(
            words = namespaces.builtin_words().len(),
            capabilities = self.capabilities.names().len(),
            "interpreter built"
        );
        Interpreter {
            stack: ValueStack::new(),
            namespaces,
            capabilities: self.capabilities,
            call_stack: CallStack::new(self.config.max_depth),
            config: self.config,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            fetching: FxHashSet::default(),
        }
    }
}
