//! RAII scope guards for the interpreter's environment.
//!
//! [`ScopedInterpreter`] pushes a runtime scope and pops it when dropped,
//! including during unwinding. Guards for function calls also count
//! towards the call depth for as long as they live.
//!
//! ```text
//! interpreter.with_env_scope(|scoped| scoped.exec_block(body))
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::environment::{LocalScope, Scope};

/// Guard over an interpreter with one more scope pushed.
///
/// Access the interpreter through this guard; it implements `Deref` and `DerefMut`.
pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
    /// Whether this scope is a function call.
    call: bool,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
        if self.call {
            self.interpreter.call_depth -= 1;
        }
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Push a child of the current scope, popped when the guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_, 'a> {
        self.env.push_scope();
        ScopedInterpreter {
            interpreter: self,
            call: false,
        }
    }

    /// Push a call scope under `parent` and count one more call in progress.
    pub(crate) fn scoped_call(&mut self, parent: LocalScope<Scope>) -> ScopedInterpreter<'_, 'a> {
        self.env.push_scope_in(parent);
        self.call_depth += 1;
        ScopedInterpreter {
            interpreter: self,
            call: true,
        }
    }

    /// Run `f` in a new scope.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'a>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }
}
