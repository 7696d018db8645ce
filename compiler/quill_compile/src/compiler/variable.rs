//! Variable reference lowering.
//!
//! A reference compiles to a direct slot read when any open frame declares
//! the name, and to a fallible environment lookup otherwise. Either way the
//! read is wrapped in `Op::Canonical`, which strips a number's original
//! text from the value it produces.

use quill_ir::{Op, VariableRef};

use super::Compiler;

impl Compiler<'_> {
    pub(super) fn compile_variable(&self, var: &VariableRef) -> Op {
        let name = self.interner.intern_canonical(&var.name);
        let access = if let Some(slot) = self.env.resolve_local(name) {
            tracing::trace!(variable = %var.name, %slot, "slot read");
            Op::Slot(slot)
        } else {
            tracing::trace!(variable = %var.name, "dynamic lookup");
            Op::Lookup {
                name,
                written: var.name.clone(),
            }
        };
        Op::Canonical(Box::new(access))
    }
}
