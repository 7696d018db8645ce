//! Quill compiler: document tree → executable program.
//!
//! # Pipeline Position
//!
//! ```text
//! Parser → **Compile** → quill_eval (run) → serializer
//! ```
//!
//! The compiler resolves scopes while it walks the tree. A variable read
//! becomes a direct slot read when a frame visible at that point declares
//! the name; everything else becomes a runtime lookup that may fail with an
//! undefined variable error when the program runs. Compilation itself only
//! fails when scopes nest beyond the configured limit.

mod compiler;
mod env;
mod errors;

pub use compiler::{compile, CompileOptions, Compiler, ScopedCompiler, DEFAULT_MAX_DEPTH};
pub use env::{CompileEnv, Frame};
pub use errors::CompileError;
