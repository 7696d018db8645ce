//! Emitted program.
//!
//! The compiler lowers a document tree into a [`Program`]: nested
//! [`Block`]s of [`Stmt`]s whose expressions are [`Op`]s. Running the
//! program reproduces the tree's output without walking the tree again.
//! Scope-introducing nodes become [`Stmt::Scope`] blocks, so the block
//! structure mirrors the compile-time frame chain one to one.
//!
//! `Program` implements `Display`, rendering a readable listing of the
//! program (see `display.rs`).

mod display;

use crate::ast::CommentKind;
use crate::value::{ListSeparator, Value};
use crate::{Name, Symbol};

/// A compiled document.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    /// The live environment object every dynamic lookup goes through.
    pub env: Symbol,
    /// The root output container.
    pub root: Symbol,
    pub body: Block,
}

/// Ordered statements belonging to one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    stmts: Vec<Stmt>,
}

impl Block {
    pub fn new() -> Self {
        Block { stmts: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, stmt: Stmt) {
        self.stmts.push(stmt);
    }

    /// Append another block's statements after this one's.
    #[inline]
    pub fn append(&mut self, mut other: Block) {
        self.stmts.append(&mut other.stmts);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    #[inline]
    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.stmts.iter()
    }
}

impl From<Vec<Stmt>> for Block {
    fn from(stmts: Vec<Stmt>) -> Self {
        Block { stmts }
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Stmt;
    type IntoIter = std::slice::Iter<'a, Stmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.stmts.iter()
    }
}

/// Where a dynamic assignment writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StoreTarget {
    /// Innermost live frame.
    Current,
    /// Outermost live frame.
    Global,
}

/// Statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// Create the root output container.
    NewRoot { target: Symbol },
    /// Run `body` in a child environment, restoring the parent afterwards.
    Scope { saved: Symbol, body: Block },
    /// Append a resolved comment to `parent`.
    AppendComment {
        parent: Symbol,
        text: Op,
        kind: CommentKind,
    },
    /// Append a resolved property to `parent`, binding it to `target`.
    AppendProperty {
        parent: Symbol,
        target: Symbol,
        name: Op,
        value: Op,
    },
    /// Resolve `selector` against the environment's current selector and
    /// append the rule to `parent`, binding it to `target`.
    AppendRule {
        parent: Symbol,
        target: Symbol,
        selector: Op,
    },
    /// Make `rule`'s resolved selector the environment's current selector.
    SetSelector { rule: Symbol },
    DefineFunction(FunctionDef),
    Return(Op),
    /// Write a local slot. `guarded` writes only when unset or null.
    /// `name` is what dynamic lookups and `!global` writes see the slot as.
    Assign {
        slot: Symbol,
        name: Name,
        value: Op,
        guarded: bool,
    },
    /// Write a variable into the live environment.
    Store {
        name: Name,
        written: String,
        value: Op,
        target: StoreTarget,
        guarded: bool,
    },
}

/// Compiled `@function`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    /// Canonical function name.
    pub name: Name,
    /// Name as written.
    pub written: String,
    pub params: Vec<ParamSlot>,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParamSlot {
    pub slot: Symbol,
    pub name: Name,
    /// Name as written, for arity errors.
    pub written: String,
    /// Evaluated in the callee's frame when the argument is missing.
    pub default: Option<Op>,
}

/// Expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Literal(Value),
    /// Literal text fragment of an interpolation.
    Text(String),
    /// Direct read of a local slot; cannot fail.
    Slot(Symbol),
    /// Search the live environment for `name`; fails with an undefined
    /// variable error naming `written`.
    Lookup { name: Name, written: String },
    /// Strip the original text of a number read through a variable.
    Canonical(Box<Op>),
    /// CSS text of the operand.
    ToText(Box<Op>),
    /// Left-to-right string concatenation.
    Concat(Vec<Op>),
    Call {
        function: Name,
        written: String,
        args: Vec<Op>,
    },
    List {
        items: Vec<Op>,
        separator: ListSeparator,
    },
}

impl Op {
    /// The reference kind a variable read compiled to, looking through the
    /// canonicalization wrapper.
    pub fn variable_access(&self) -> Option<VariableAccess> {
        match self {
            Op::Canonical(inner) => inner.variable_access(),
            Op::Slot(slot) => Some(VariableAccess::Slot(*slot)),
            Op::Lookup { name, .. } => Some(VariableAccess::Dynamic(*name)),
            _ => None,
        }
    }
}

/// How a variable read reaches its value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VariableAccess {
    Slot(Symbol),
    Dynamic(Name),
}
