//! Generated identifiers of the emitted program.
//!
//! A [`Symbol`] names a container, a saved environment or a local slot in
//! the emitted program. Symbols are structural: a kind, the tag of the
//! compile frame that allocated it, and that frame's per-kind counter.
//! Frame tags are unique for the whole compilation, so two symbols are
//! equal exactly when their text is equal.

use std::fmt;

/// What a generated symbol stands for. Doubles as the textual prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    /// The live environment object.
    Env,
    /// Environment saved across a nested scope.
    SavedEnv,
    /// The root output container.
    Root,
    /// A resolved property container.
    Prop,
    /// A resolved rule container.
    Rule,
    /// A local variable slot.
    Var,
    /// A function parameter slot.
    Param,
}

impl SymbolKind {
    /// Textual prefix used by the serializer.
    pub const fn prefix(self) -> &'static str {
        match self {
            SymbolKind::Env => "env",
            SymbolKind::SavedEnv => "saved_env",
            SymbolKind::Root => "root",
            SymbolKind::Prop => "prop",
            SymbolKind::Rule => "rule",
            SymbolKind::Var => "var",
            SymbolKind::Param => "param",
        }
    }
}

/// Compilation-unique tag of a compile frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct FrameId(u32);

impl FrameId {
    /// Tag of the first frame of a compilation.
    pub const ROOT: FrameId = FrameId(0);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        FrameId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Generated identifier: `{prefix}_{frame}_{index}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    kind: SymbolKind,
    frame: FrameId,
    index: u32,
}

impl Symbol {
    #[inline]
    pub const fn new(kind: SymbolKind, frame: FrameId, index: u32) -> Self {
        Symbol { kind, frame, index }
    }

    #[inline]
    pub const fn kind(self) -> SymbolKind {
        self.kind
    }

    /// Tag of the frame that allocated this symbol.
    #[inline]
    pub const fn frame(self) -> FrameId {
        self.frame
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.kind.prefix(),
            self.frame.raw(),
            self.index
        )
    }
}

#[cfg(test)]
mod tests;
