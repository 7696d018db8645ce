//! Expression and interpolation lowering.

use quill_ir::{Expr, InterpPart, Interpolation, Op};
use quill_stack::ensure_sufficient_stack;

use super::Compiler;

impl Compiler<'_> {
    /// Lower a script expression.
    pub fn compile_expr(&self, expr: &Expr) -> Op {
        ensure_sufficient_stack(|| match expr {
            Expr::Literal(value) => Op::Literal(value.clone()),
            Expr::Variable(var) => self.compile_variable(var),
            Expr::Interpolation(interp) => self.interp(interp),
            Expr::Call(call) => Op::Call {
                function: self.interner.intern_canonical(&call.name),
                written: call.name.clone(),
                args: call.args.iter().map(|arg| self.compile_expr(arg)).collect(),
            },
            Expr::List(list) => Op::List {
                items: list.items.iter().map(|item| self.compile_expr(item)).collect(),
                separator: list.separator,
            },
        })
    }

    /// Lower an expression whose CSS text is what gets used.
    pub(super) fn stringified(&self, expr: &Expr) -> Op {
        Op::ToText(Box::new(self.compile_expr(expr)))
    }

    /// Lower an interpolation into a left-to-right concatenation.
    ///
    /// Literal fragments become text terms, embedded expressions become
    /// their CSS text. An empty interpolation is a single empty text term.
    pub fn interp(&self, interp: &Interpolation) -> Op {
        if interp.is_empty() {
            return Op::Concat(vec![Op::Text(String::new())]);
        }
        Op::Concat(
            interp
                .parts
                .iter()
                .map(|part| match part {
                    InterpPart::Literal(text) => Op::Text(text.clone()),
                    InterpPart::Expr(expr) => self.stringified(expr),
                })
                .collect(),
        )
    }
}
