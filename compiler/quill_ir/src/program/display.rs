//! Textual listing of a [`Program`].
//!
//! The listing reads as Ruby, one statement per line with nested scopes
//! indented.

use std::fmt;

use super::{Block, FunctionDef, Op, Program, Stmt, StoreTarget};
use crate::name::canonicalize;
use crate::Symbol;

const INDENT: &str = "  ";

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} = Environment.new", self.env)?;
        let mut printer = Printer { f, env: self.env };
        printer.block(&self.body, 0)
    }
}

struct Printer<'a, 'f> {
    f: &'a mut fmt::Formatter<'f>,
    env: Symbol,
}

impl Printer<'_, '_> {
    fn block(&mut self, block: &Block, depth: usize) -> fmt::Result {
        for stmt in block {
            self.stmt(stmt, depth)?;
        }
        Ok(())
    }

    fn line_start(&mut self, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            self.f.write_str(INDENT)?;
        }
        Ok(())
    }

    fn stmt(&mut self, stmt: &Stmt, depth: usize) -> fmt::Result {
        let env = self.env;
        self.line_start(depth)?;
        match stmt {
            Stmt::NewRoot { target } => writeln!(self.f, "{target} = RootNode.new"),
            Stmt::Scope { saved, body } => {
                writeln!(self.f, "{saved}, {env} = {env}, Environment.new({env})")?;
                self.block(body, depth + 1)?;
                self.line_start(depth)?;
                writeln!(self.f, "{env} = {saved}")
            }
            Stmt::AppendComment { parent, text, kind } => {
                write!(self.f, "{parent} << CommentNode.resolved(")?;
                self.op(text)?;
                writeln!(self.f, ", :{})", kind.as_str())
            }
            Stmt::AppendProperty {
                parent,
                target,
                name,
                value,
            } => {
                write!(self.f, "{parent} << {target} = PropNode.resolved(")?;
                self.op(name)?;
                self.f.write_str(", ")?;
                self.op(value)?;
                writeln!(self.f, ")")
            }
            Stmt::AppendRule {
                parent,
                target,
                selector,
            } => {
                write!(self.f, "{parent} << {target} = RuleNode.resolved(parse_selector(")?;
                self.op(selector)?;
                writeln!(self.f, ").resolve_parent_refs({env}.selector))")
            }
            Stmt::SetSelector { rule } => {
                writeln!(self.f, "{env}.selector = {rule}.resolved_rules")
            }
            Stmt::DefineFunction(def) => self.function(def, depth),
            Stmt::Return(op) => {
                self.f.write_str("return ")?;
                self.op(op)?;
                writeln!(self.f)
            }
            Stmt::Assign {
                slot,
                value,
                guarded,
                ..
            } => {
                let assign = if *guarded { "||=" } else { "=" };
                write!(self.f, "{slot} {assign} ")?;
                self.op(value)?;
                writeln!(self.f)
            }
            Stmt::Store {
                written,
                value,
                target,
                guarded,
                ..
            } => {
                let method = match (target, guarded) {
                    (StoreTarget::Current, false) => "set_local_var",
                    (StoreTarget::Current, true) => "set_local_var_default",
                    (StoreTarget::Global, false) => "set_global_var",
                    (StoreTarget::Global, true) => "set_global_var_default",
                };
                write!(self.f, "{env}.{method}(:{}, ", canonicalize(written))?;
                self.op(value)?;
                writeln!(self.f, ")")
            }
        }
    }

    fn function(&mut self, def: &FunctionDef, depth: usize) -> fmt::Result {
        write!(self.f, "def fn_{}(", canonicalize(&def.written))?;
        for (i, param) in def.params.iter().enumerate() {
            if i > 0 {
                self.f.write_str(", ")?;
            }
            write!(self.f, "{}", param.slot)?;
            if let Some(default) = &param.default {
                self.f.write_str(" = ")?;
                self.op(default)?;
            }
        }
        writeln!(self.f, ")")?;
        self.block(&def.body, depth + 1)?;
        self.line_start(depth)?;
        writeln!(self.f, "end")
    }

    fn op(&mut self, op: &Op) -> fmt::Result {
        match op {
            Op::Literal(value) => write!(self.f, "literal({:?})", value.to_css_string()),
            Op::Text(text) => write!(self.f, "{text:?}"),
            Op::Slot(slot) => write!(self.f, "{slot}"),
            Op::Lookup { written, .. } => write!(
                self.f,
                "({}.var(:{}) || raise(UndefinedVariable, \"${written}\"))",
                self.env,
                canonicalize(written)
            ),
            Op::Canonical(inner) => {
                self.f.write_str("canonical(")?;
                self.op(inner)?;
                self.f.write_str(")")
            }
            Op::ToText(inner) => {
                self.f.write_str("(")?;
                self.op(inner)?;
                self.f.write_str(").to_s")
            }
            Op::Concat(parts) if parts.is_empty() => self.f.write_str("\"\""),
            Op::Concat(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        self.f.write_str(" + ")?;
                    }
                    self.op(part)?;
                }
                Ok(())
            }
            Op::Call { written, args, .. } => {
                write!(self.f, "fn_{}(", canonicalize(written))?;
                self.ops(args)?;
                self.f.write_str(")")
            }
            Op::List { items, separator } => {
                self.f.write_str("list([")?;
                self.ops(items)?;
                write!(self.f, "], {:?})", separator.as_str())
            }
        }
    }

    fn ops(&mut self, ops: &[Op]) -> fmt::Result {
        for (i, op) in ops.iter().enumerate() {
            if i > 0 {
                self.f.write_str(", ")?;
            }
            self.op(op)?;
        }
        Ok(())
    }
}
