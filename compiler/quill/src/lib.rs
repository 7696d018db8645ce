//! Quill: compiles style-sheet document trees into programs and runs them.
//!
//! ```text
//! Root ──compile──▶ Program ──run──▶ OutputTree
//! ```
//!
//! [`render`] does both steps. The crates behind it stay available for
//! callers that want the program itself ([`listing`]) or to drive the
//! [`Compiler`] and [`Interpreter`] directly.

use std::sync::Once;

pub use quill_compile::{compile, CompileEnv, CompileError, CompileOptions, Compiler};
pub use quill_eval::{
    EvalError, Interpreter, InterpreterBuilder, NodeId, OutputNode, OutputTree, SelectorList,
    DEFAULT_MAX_CALL_DEPTH,
};
pub use quill_ir::{ast, program, Number, SharedInterner, StringInterner, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Compile or runtime failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Rendering configuration.
#[derive(Clone, Debug)]
pub struct Options {
    pub compile: CompileOptions,
    pub max_call_depth: usize,
    /// Variables defined before the document runs, by name without `$`.
    pub globals: Vec<(String, Value)>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            compile: CompileOptions::default(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            globals: Vec::new(),
        }
    }
}

impl Options {
    #[must_use]
    pub fn global(mut self, name: impl Into<String>, value: Value) -> Self {
        self.globals.push((name.into(), value));
        self
    }

    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.compile.max_depth = depth;
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}

/// Compile `root` and run it, returning the resolved output tree.
pub fn render(root: &ast::Root, options: &Options) -> Result<OutputTree, Error> {
    let interner = SharedInterner::new();
    render_with(root, &interner, options)
}

/// [`render`] with a caller-owned interner.
#[tracing::instrument(level = "debug", skip_all)]
pub fn render_with(
    root: &ast::Root,
    interner: &StringInterner,
    options: &Options,
) -> Result<OutputTree, Error> {
    let program = Compiler::new(interner)
        .with_options(options.compile)
        .compile(root)?;

    let mut builder = InterpreterBuilder::new(interner).max_call_depth(options.max_call_depth);
    for (name, value) in &options.globals {
        builder = builder.global(name.clone(), value.clone());
    }
    let mut interpreter = builder.build();
    interpreter.run(&program)?;
    Ok(interpreter.into_output())
}

/// Compile `root` and render the emitted program as a readable listing.
pub fn listing(root: &ast::Root, options: &Options) -> Result<String, Error> {
    let interner = StringInterner::new();
    let program = Compiler::new(&interner)
        .with_options(options.compile)
        .compile(root)?;
    Ok(program.to_string())
}
