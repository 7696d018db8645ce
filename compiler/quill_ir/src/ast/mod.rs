//! Parsed document tree.
//!
//! The tree is produced by the parser and only read by the compiler.
//! Statement-level nodes are [`Node`]s; script values embedded in them are
//! [`Expr`]s. Variable references and interpolation fragments only ever
//! occur inside expressions, so they live in [`Expr`] and [`Interpolation`].

use bitflags::bitflags;

use crate::value::{ListSeparator, Value};

/// Statement-level node.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Root(Root),
    Comment(Comment),
    Property(Property),
    FunctionDecl(FunctionDecl),
    Return(Return),
    Rule(Rule),
    VariableDecl(VariableDecl),
}

/// Document root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Root {
    pub children: Vec<Node>,
}

/// How a comment was written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `// ...`: never emitted.
    Silent,
    /// `/* ... */`
    Normal,
    /// `/*! ... */`: kept even by compressing serializers.
    Loud,
}

impl CommentKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            CommentKind::Silent => "silent",
            CommentKind::Normal => "normal",
            CommentKind::Loud => "loud",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    pub text: Interpolation,
    pub kind: CommentKind,
}

impl Comment {
    /// Invisible comments produce no output.
    #[inline]
    pub fn is_invisible(&self) -> bool {
        self.kind == CommentKind::Silent
    }
}

/// `name: value;` or `name: value { nested... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub name: Interpolation,
    pub value: Expr,
    /// Nested properties (`font: { family: x; }`).
    pub children: Vec<Node>,
}

/// `@function name($param, $other: default) { ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    /// Name as written.
    pub name: String,
    pub params: Vec<Param>,
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    /// Name as written, without `$`.
    pub name: String,
    pub default: Option<Expr>,
}

/// `@return expr;`
#[derive(Clone, Debug, PartialEq)]
pub struct Return {
    pub expr: Expr,
}

/// `selector { ... }`; the selector is kept as interpolated text.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub selector: Interpolation,
    pub children: Vec<Node>,
}

bitflags! {
    /// Modifiers of a variable declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct DeclFlags: u8 {
        /// `!default`: only assign when unset or null.
        const DEFAULT = 1 << 0;
        /// `!global`: assign in the outermost scope.
        const GLOBAL = 1 << 1;
    }
}

/// `$name: value [!default] [!global];`
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDecl {
    /// Name as written, without `$`.
    pub name: String,
    pub value: Expr,
    pub flags: DeclFlags,
}

/// Script expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Value),
    Variable(VariableRef),
    Interpolation(Interpolation),
    Call(Call),
    List(ListExpr),
}

impl Expr {
    /// `$name` reference.
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(VariableRef::new(name))
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Literal(value)
    }
}

/// `$name`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariableRef {
    /// Name as written, without `$`. Kept verbatim for error messages.
    pub name: String,
}

impl VariableRef {
    pub fn new(name: impl Into<String>) -> Self {
        VariableRef { name: name.into() }
    }
}

/// `name(args...)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    /// Name as written.
    pub name: String,
    pub args: Vec<Expr>,
}

/// Space- or comma-separated list expression.
#[derive(Clone, Debug, PartialEq)]
pub struct ListExpr {
    pub items: Vec<Expr>,
    pub separator: ListSeparator,
}

/// One piece of an interpolated string.
#[derive(Clone, Debug, PartialEq)]
pub enum InterpPart {
    /// Literal text, inserted verbatim.
    Literal(String),
    /// `#{expr}`, inserted as the expression's CSS text.
    Expr(Expr),
}

/// Ordered literal and expression fragments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interpolation {
    pub parts: Vec<InterpPart>,
}

impl Interpolation {
    pub fn new(parts: Vec<InterpPart>) -> Self {
        Interpolation { parts }
    }

    /// Interpolation made of a single literal.
    pub fn literal(text: impl Into<String>) -> Self {
        Interpolation {
            parts: vec![InterpPart::Literal(text.into())],
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
