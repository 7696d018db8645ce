//! Quill IR - data structures shared by the Quill compiler and runtime.
//!
//! - Interned identifiers (`Name`, `StringInterner`)
//! - Generated identifiers of emitted programs (`Symbol`)
//! - The script value model (`Value`, `Number`)
//! - The parsed document tree (`ast::Node`, `ast::Expr`)
//! - The emitted program (`program::Program`, `Stmt`, `Op`)
//!
//! # Design Philosophy
//!
//! - **Intern names**: variable and function names become `Name(u32)` in
//!   their canonical (hyphen-insensitive) form.
//! - **Structured output**: the compiler emits a statement tree, never
//!   source text; the textual listing is a serializer over that tree.

pub mod ast;
mod interner;
mod name;
pub mod program;
mod symbol;
pub mod value;

pub use ast::{
    Call, Comment, CommentKind, DeclFlags, Expr, FunctionDecl, InterpPart, Interpolation,
    ListExpr, Node, Param, Property, Return, Root, Rule, VariableDecl, VariableRef,
};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::{canonicalize, Name};
pub use program::{
    Block, FunctionDef, Op, ParamSlot, Program, Stmt, StoreTarget, VariableAccess,
};
pub use symbol::{FrameId, Symbol, SymbolKind};
pub use value::{ListSeparator, Number, Value};
