//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use rustc_hash::FxHashMap;

use quill_ir::{StringInterner, Value};

use super::Interpreter;
use crate::output::OutputTree;
use crate::Environment;

/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Builder for creating Interpreter instances.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    env: Option<Environment>,
    /// Host-provided variables, defined in the global scope.
    globals: Vec<(String, Value)>,
    max_call_depth: usize,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Self {
            interner,
            env: None,
            globals: Vec::new(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Set the initial environment.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Define a global variable before the program runs.
    ///
    /// `name` is written without `$`; hyphens and underscores are
    /// interchangeable as in the document.
    #[must_use]
    pub fn global(mut self, name: impl Into<String>, value: Value) -> Self {
        self.globals.push((name.into(), value));
        self
    }

    /// Limit on nested function calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter<'a> {
        let mut env = self.env.unwrap_or_default();
        for (name, value) in self.globals {
            env.define_global(self.interner.intern_canonical(&name), value);
        }

        Interpreter {
            interner: self.interner,
            env,
            output: OutputTree::new(),
            nodes: FxHashMap::default(),
            call_depth: 0,
            max_call_depth: self.max_call_depth,
        }
    }
}
