//! Interpreter for compiled programs.
//!
//! Executes a [`Program`] statement by statement against a live
//! [`Environment`], appending resolved nodes to an [`OutputTree`].
//!
//! # Architecture
//!
//! - `mod.rs` - statement execution and expression evaluation
//! - `call.rs` - function calls, argument binding, the call depth limit
//! - `scope_guard.rs` - RAII scope push/pop
//! - `builder.rs` - configuration
//!
//! `Stmt::Scope` blocks map one to one onto runtime scopes, so a slot the
//! compiler allocated in some frame lives in the scope that runs that
//! frame's block.

mod builder;
mod call;
mod scope_guard;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use scope_guard::ScopedInterpreter;

use std::rc::Rc;

use rustc_hash::FxHashMap;

use quill_ir::{Block, Name, Op, Program, Stmt, StoreTarget, StringInterner, Symbol, Value};
use quill_stack::ensure_sufficient_stack;

use crate::errors::{undefined_variable, EvalResult};
use crate::output::{NodeId, OutputNode, OutputTree};
use crate::selector::SelectorList;
use crate::Environment;

/// How a block finished.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Flow {
    Normal,
    /// `@return` ran; the rest of the enclosing function body is skipped.
    Return(Value),
}

/// Program interpreter.
pub struct Interpreter<'a> {
    interner: &'a StringInterner,
    pub(crate) env: Environment,
    output: OutputTree,
    /// Output nodes bound to program symbols.
    nodes: FxHashMap<Symbol, NodeId>,
    call_depth: usize,
    max_call_depth: usize,
}

impl<'a> Interpreter<'a> {
    /// Interpreter with default configuration.
    pub fn new(interner: &'a StringInterner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn output(&self) -> &OutputTree {
        &self.output
    }

    pub fn into_output(self) -> OutputTree {
        self.output
    }

    /// Number of function calls in progress.
    #[inline]
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    /// Run a program, returning the node its root container is bound to.
    #[tracing::instrument(level = "debug", skip_all, fields(env = %program.env))]
    pub fn run(&mut self, program: &Program) -> EvalResult<NodeId> {
        if let Flow::Return(_) = self.exec_block(&program.body)? {
            tracing::debug!("@return outside a function stopped the document");
        }
        Ok(self.node(program.root))
    }

    pub(crate) fn exec_block(&mut self, block: &Block) -> EvalResult<Flow> {
        ensure_sufficient_stack(|| {
            for stmt in block {
                if let Flow::Return(value) = self.exec_stmt(stmt)? {
                    return Ok(Flow::Return(value));
                }
            }
            Ok(Flow::Normal)
        })
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<Flow> {
        match stmt {
            Stmt::NewRoot { target } => {
                let root = self.output.root();
                self.nodes.insert(*target, root);
            }
            Stmt::Scope { body, .. } => {
                return self.with_env_scope(|scoped| scoped.exec_block(body));
            }
            Stmt::AppendComment { parent, text, kind } => {
                let text = self.eval_text(text)?;
                let parent = self.node(*parent);
                self.output
                    .append(parent, OutputNode::Comment { text, kind: *kind });
            }
            Stmt::AppendProperty {
                parent,
                target,
                name,
                value,
            } => {
                let name = self.eval_text(name)?;
                let value = self.eval_text(value)?;
                let parent = self.node(*parent);
                let id = self
                    .output
                    .append(parent, OutputNode::Property { name, value });
                self.nodes.insert(*target, id);
            }
            Stmt::AppendRule {
                parent,
                target,
                selector,
            } => {
                let text = self.eval_text(selector)?;
                let selector =
                    SelectorList::parse(&text).resolve_parent_refs(self.env.selector().as_ref())?;
                let parent = self.node(*parent);
                let id = self.output.append(parent, OutputNode::Rule { selector });
                self.nodes.insert(*target, id);
            }
            Stmt::SetSelector { rule } => {
                let id = self.node(*rule);
                if let Some(selector) = self.output.selector(id).cloned() {
                    self.env.set_selector(selector);
                }
            }
            Stmt::DefineFunction(def) => {
                self.env.define_function(Rc::new(def.clone()));
            }
            Stmt::Return(op) => return Ok(Flow::Return(self.eval_op(op)?)),
            Stmt::Assign {
                slot,
                name,
                value,
                guarded,
            } => {
                let is_set = *guarded && self.env.read_slot(*slot).is_some_and(|v| !v.is_null());
                if is_set {
                    tracing::trace!(%slot, "guarded assignment skipped");
                } else {
                    let value = self.eval_op(value)?;
                    self.env.assign_slot(*slot, *name, value);
                }
            }
            Stmt::Store {
                name,
                written,
                value,
                target,
                guarded,
            } => self.exec_store(*name, written, value, *target, *guarded)?,
        }
        Ok(Flow::Normal)
    }

    fn exec_store(
        &mut self,
        name: Name,
        written: &str,
        value: &Op,
        target: StoreTarget,
        guarded: bool,
    ) -> EvalResult<()> {
        if guarded {
            let existing = match target {
                StoreTarget::Current => self.env.lookup(name),
                StoreTarget::Global => self.env.lookup_global(name),
            };
            if existing.is_some_and(|v| !v.is_null()) {
                tracing::trace!(variable = written, "guarded assignment skipped");
                return Ok(());
            }
        }
        let value = self.eval_op(value)?;
        match target {
            StoreTarget::Current => self.env.define(name, value),
            StoreTarget::Global => self.env.define_global(name, value),
        }
        Ok(())
    }

    /// Evaluate an expression.
    pub fn eval_op(&mut self, op: &Op) -> EvalResult<Value> {
        ensure_sufficient_stack(|| match op {
            Op::Literal(value) => Ok(value.clone()),
            Op::Text(text) => Ok(Value::ident(text.clone())),
            Op::Slot(slot) => Ok(self.read_slot(*slot)),
            Op::Lookup { name, written } => self.lookup_variable(*name, written),
            Op::Canonical(inner) => Ok(self.eval_op(inner)?.into_canonical()),
            Op::ToText(inner) => Ok(Value::ident(self.eval_op(inner)?.to_css_string())),
            Op::Concat(parts) => {
                let mut text = String::new();
                for part in parts {
                    match part {
                        // Interpolated strings lose their quotes.
                        Op::ToText(inner) => match self.eval_op(inner)? {
                            Value::Str { text: fragment, .. } => text.push_str(&fragment),
                            other => text.push_str(&other.to_css_string()),
                        },
                        other => text.push_str(&self.eval_op(other)?.to_css_string()),
                    }
                }
                Ok(Value::ident(text))
            }
            Op::Call {
                function,
                written,
                args,
            } => self.call_function(*function, written, args),
            Op::List { items, separator } => {
                let items = items
                    .iter()
                    .map(|item| self.eval_op(item))
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::list(items, *separator))
            }
        })
    }

    fn eval_text(&mut self, op: &Op) -> EvalResult<String> {
        Ok(self.eval_op(op)?.to_css_string())
    }

    fn read_slot(&self, slot: Symbol) -> Value {
        self.env.read_slot(slot).unwrap_or_else(|| {
            tracing::debug!(%slot, "read of unset slot");
            Value::Null
        })
    }

    fn lookup_variable(&self, name: Name, written: &str) -> EvalResult<Value> {
        match self.env.lookup(name) {
            Some(value) => Ok(value),
            None => {
                tracing::debug!(
                    variable = written,
                    canonical = self.interner.lookup(name),
                    "undefined variable"
                );
                Err(undefined_variable(written))
            }
        }
    }

    /// Output node bound to a container symbol.
    fn node(&self, symbol: Symbol) -> NodeId {
        self.nodes.get(&symbol).copied().unwrap_or_else(|| {
            tracing::debug!(%symbol, "unbound container, appending to root");
            self.output.root()
        })
    }
}

#[cfg(test)]
mod tests;
