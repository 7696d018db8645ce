//! Quill runtime: executes compiled programs.
//!
//! # Pipeline Position
//!
//! ```text
//! quill_compile (Program) → **Eval** → OutputTree → serializer
//! ```
//!
//! The [`Interpreter`] runs a [`quill_ir::Program`] against a live
//! [`Environment`]. Variable reads the compiler proved local read slots
//! directly; the rest search the scope chain and fail with
//! [`EvalError::UndefinedVariable`] naming the variable as written.

mod environment;
pub mod errors;
mod interpreter;
mod output;
mod selector;

pub use environment::{Environment, FunctionBinding, LocalScope, Scope};
pub use errors::{EvalError, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter, DEFAULT_MAX_CALL_DEPTH};
pub use output::{NodeId, OutputNode, OutputTree};
pub use selector::SelectorList;
