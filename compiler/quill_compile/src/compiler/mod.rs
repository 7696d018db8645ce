//! Document tree → program lowering.
//!
//! [`Compiler`] walks the tree depth-first. Each visit returns the
//! [`Block`] of statements it emitted; sibling blocks are concatenated in
//! tree order. Scope-introducing nodes (rules, properties with nested
//! properties, function declarations) open a compile frame and switch the
//! active output container through [`ScopedCompiler`], which restores both
//! when it is dropped.

mod expr;
mod nodes;
mod scope_guard;
mod variable;

pub use scope_guard::ScopedCompiler;

use quill_ir::{Block, Node, Program, Root, Stmt, StringInterner, Symbol, SymbolKind};
use quill_stack::ensure_sufficient_stack;

use crate::env::CompileEnv;
use crate::errors::CompileError;

/// Default limit on open frames.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Compiler configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Maximum number of simultaneously open frames, the root frame included.
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Compile a document with default options.
pub fn compile(root: &Root, interner: &StringInterner) -> Result<Program, CompileError> {
    Compiler::new(interner).compile(root)
}

/// State of one compilation.
pub struct Compiler<'a> {
    interner: &'a StringInterner,
    pub(crate) env: CompileEnv,
    /// Symbol of the live environment object in the emitted program.
    env_symbol: Symbol,
    /// Container that appended nodes go to; `None` inside function bodies.
    pub(crate) container: Option<Symbol>,
    options: CompileOptions,
}

impl<'a> Compiler<'a> {
    /// Compiler starting from a fresh root frame.
    pub fn new(interner: &'a StringInterner) -> Self {
        Self::with_env(interner, CompileEnv::new())
    }

    /// Compiler continuing an existing frame chain.
    ///
    /// Locals declared in `env` stay visible as slots, and new frames keep
    /// receiving tags that `env` has not handed out.
    pub fn with_env(interner: &'a StringInterner, mut env: CompileEnv) -> Self {
        let env_symbol = env.fresh_symbol(SymbolKind::Env);
        Compiler {
            interner,
            env,
            env_symbol,
            container: None,
            options: CompileOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// The compile-time frame chain.
    #[inline]
    pub fn env(&self) -> &CompileEnv {
        &self.env
    }

    /// Give back the frame chain, for compiling a later document against it.
    pub fn into_env(self) -> CompileEnv {
        self.env
    }

    /// Active output container.
    #[inline]
    pub fn container(&self) -> Option<Symbol> {
        self.container
    }

    /// Compile a document.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn compile(&mut self, root: &Root) -> Result<Program, CompileError> {
        let root_symbol = self.env.fresh_symbol(SymbolKind::Root);
        let mut body = Block::new();
        body.push(Stmt::NewRoot {
            target: root_symbol,
        });
        body.append(self.with_parent(Some(root_symbol), |scoped| {
            scoped.visit_children(&root.children)
        })?);

        tracing::debug!(statements = body.len(), "compiled document");
        Ok(Program {
            env: self.env_symbol,
            root: root_symbol,
            body,
        })
    }

    /// Compile one node into the statements it contributes to the current block.
    pub fn visit(&mut self, node: &Node) -> Result<Block, CompileError> {
        ensure_sufficient_stack(|| match node {
            Node::Root(root) => self.visit_children(&root.children),
            Node::Comment(comment) => Ok(self.visit_comment(comment)),
            Node::Property(property) => self.visit_property(property),
            Node::FunctionDecl(function) => self.visit_function(function),
            Node::Return(ret) => Ok(self.visit_return(ret)),
            Node::Rule(rule) => self.visit_rule(rule),
            Node::VariableDecl(decl) => Ok(self.visit_variable_decl(decl)),
        })
    }

    /// Compile children in order, concatenating their blocks.
    pub fn visit_children(&mut self, children: &[Node]) -> Result<Block, CompileError> {
        let mut block = Block::new();
        for child in children {
            block.append(self.visit(child)?);
        }
        Ok(block)
    }

    /// Run `f` in a child frame with `container` active, wrapping its
    /// statements in a scope block.
    pub(crate) fn with_parent<F>(
        &mut self,
        container: Option<Symbol>,
        f: F,
    ) -> Result<Block, CompileError>
    where
        F: FnOnce(&mut ScopedCompiler<'_, 'a>) -> Result<Block, CompileError>,
    {
        let mut scoped = self.scoped(container)?;
        let saved = scoped.env.fresh_symbol(SymbolKind::SavedEnv);
        let body = f(&mut scoped)?;
        Ok(Block::from(vec![Stmt::Scope { saved, body }]))
    }
}
