//! Statement-level node visits.

use quill_ir::{
    Block, Comment, DeclFlags, FunctionDecl, FunctionDef, ParamSlot, Property, Return, Rule, Stmt,
    StoreTarget, SymbolKind, VariableDecl,
};

use super::Compiler;
use crate::errors::CompileError;

impl Compiler<'_> {
    pub(super) fn visit_comment(&mut self, comment: &Comment) -> Block {
        if comment.is_invisible() {
            return Block::new();
        }
        let Some(parent) = self.container else {
            tracing::debug!("comment outside an output container skipped");
            return Block::new();
        };
        Block::from(vec![Stmt::AppendComment {
            parent,
            text: self.interp(&comment.text),
            kind: comment.kind,
        }])
    }

    pub(super) fn visit_property(&mut self, property: &Property) -> Result<Block, CompileError> {
        let Some(parent) = self.container else {
            tracing::debug!("property outside an output container skipped");
            return Ok(Block::new());
        };
        let target = self.env.fresh_symbol(SymbolKind::Prop);
        let mut block = Block::from(vec![Stmt::AppendProperty {
            parent,
            target,
            name: self.interp(&property.name),
            value: self.stringified(&property.value),
        }]);
        if !property.children.is_empty() {
            block.append(self.with_parent(Some(target), |scoped| {
                scoped.visit_children(&property.children)
            })?);
        }
        Ok(block)
    }

    pub(super) fn visit_rule(&mut self, rule: &Rule) -> Result<Block, CompileError> {
        let Some(parent) = self.container else {
            tracing::debug!("rule outside an output container skipped");
            return Ok(Block::new());
        };
        let target = self.env.fresh_symbol(SymbolKind::Rule);
        let mut block = Block::from(vec![Stmt::AppendRule {
            parent,
            target,
            selector: self.interp(&rule.selector),
        }]);
        block.append(self.with_parent(Some(target), |scoped| {
            let mut body = Block::from(vec![Stmt::SetSelector { rule: target }]);
            body.append(scoped.visit_children(&rule.children)?);
            Ok(body)
        })?);
        Ok(block)
    }

    pub(super) fn visit_function(
        &mut self,
        function: &FunctionDecl,
    ) -> Result<Block, CompileError> {
        let name = self.interner.intern_canonical(&function.name);
        let mut scoped = self.scoped(None)?;

        // Each default sees the parameters declared before it.
        let mut params = Vec::with_capacity(function.params.len());
        for param in &function.params {
            let default = param.default.as_ref().map(|expr| scoped.compile_expr(expr));
            let param_name = scoped.interner.intern_canonical(&param.name);
            let slot = scoped.env.declare_param(param_name);
            params.push(ParamSlot {
                slot,
                name: param_name,
                written: param.name.clone(),
                default,
            });
        }

        let body = scoped.visit_children(&function.children)?;
        Ok(Block::from(vec![Stmt::DefineFunction(FunctionDef {
            name,
            written: function.name.clone(),
            params,
            body,
        })]))
    }

    pub(super) fn visit_return(&mut self, ret: &Return) -> Block {
        Block::from(vec![Stmt::Return(self.compile_expr(&ret.expr))])
    }

    pub(super) fn visit_variable_decl(&mut self, decl: &VariableDecl) -> Block {
        let name = self.interner.intern_canonical(&decl.name);
        // The value is compiled before the name is declared: `$x: $x` reads
        // the enclosing binding.
        let value = self.compile_expr(&decl.value);
        let guarded = decl.flags.contains(DeclFlags::DEFAULT);

        let global = decl.flags.contains(DeclFlags::GLOBAL);
        let local = if global {
            self.env.resolve_global(name)
        } else {
            self.env.resolve_local(name)
        };

        let stmt = if let Some(slot) = local {
            Stmt::Assign {
                slot,
                name,
                value,
                guarded,
            }
        } else if global || guarded {
            let target = if global {
                StoreTarget::Global
            } else {
                StoreTarget::Current
            };
            Stmt::Store {
                name,
                written: decl.name.clone(),
                value,
                target,
                guarded,
            }
        } else {
            Stmt::Assign {
                slot: self.env.declare_local(name),
                name,
                value,
                guarded,
            }
        };
        Block::from(vec![stmt])
    }
}
