//! RAII scope guard for the compiler's frame chain.
//!
//! [`ScopedCompiler`] opens a child frame and installs a new output
//! container. Dropping it closes the frame and reinstalls the previous
//! container, whether the nested visit returned normally, returned an
//! error, or panicked.
//!
//! ```text
//! let mut scoped = compiler.scoped(Some(rule_symbol))?;
//! let body = scoped.visit_children(&rule.children)?;
//! // frame closed and container restored here, also on the `?` path
//! ```

use std::ops::{Deref, DerefMut};

use super::Compiler;
use crate::errors::{nesting_too_deep, CompileError};
use quill_ir::Symbol;

/// Guard over a compiler with one more frame open.
///
/// Access the compiler through this guard; it implements `Deref` and `DerefMut`.
pub struct ScopedCompiler<'guard, 'a> {
    compiler: &'guard mut Compiler<'a>,
    /// Container active before the guard was created.
    saved_container: Option<Symbol>,
}

impl Drop for ScopedCompiler<'_, '_> {
    fn drop(&mut self) {
        self.compiler.env.pop_frame();
        self.compiler.container = self.saved_container;
        tracing::trace!(depth = self.compiler.env.depth(), "closed frame");
    }
}

impl<'a> Deref for ScopedCompiler<'_, 'a> {
    type Target = Compiler<'a>;

    fn deref(&self) -> &Self::Target {
        self.compiler
    }
}

impl DerefMut for ScopedCompiler<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.compiler
    }
}

impl<'a> Compiler<'a> {
    /// Open a child frame with `container` as the active output container.
    ///
    /// Fails without touching any state when the frame would exceed
    /// `CompileOptions::max_depth`.
    pub fn scoped(
        &mut self,
        container: Option<Symbol>,
    ) -> Result<ScopedCompiler<'_, 'a>, CompileError> {
        let depth = self.env.depth();
        if depth >= self.options.max_depth {
            return Err(nesting_too_deep(depth + 1, self.options.max_depth));
        }
        let frame = self.env.push_child();
        let saved_container = std::mem::replace(&mut self.container, container);
        tracing::trace!(?frame, depth = depth + 1, "opened frame");
        Ok(ScopedCompiler {
            compiler: self,
            saved_container,
        })
    }
}
