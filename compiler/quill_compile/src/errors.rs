//! Compile errors.
//!
//! Compilation is total over well-formed trees: undefined variables and
//! functions are runtime failures of the emitted program. The only
//! compile-time failure is the configured nesting limit.

/// Error produced while compiling a document tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// Scopes nest deeper than `CompileOptions::max_depth`.
    #[error("scopes nest {depth} levels deep, exceeding the limit of {limit}")]
    NestingTooDeep { depth: usize, limit: usize },
}

/// Nesting limit exceeded.
#[cold]
pub fn nesting_too_deep(depth: usize, limit: usize) -> CompileError {
    CompileError::NestingTooDeep { depth, limit }
}
