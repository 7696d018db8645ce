//! Stack growth for recursion over nested style sheets.
//!
//! The compiler recurses once per nested rule, property and expression,
//! and the interpreter recurses once per nested block and operand. Generated
//! or machine-written style sheets nest far deeper than hand-written ones,
//! so both wrap their recursive entry points in [`ensure_sufficient_stack`].
//!
//! On native targets the `stacker` crate grows the stack on demand; on
//! WASM the call is a passthrough.

/// Grow the stack when less than this remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
