//! Compile-time environment: the frame chain of the tree walk.
//!
//! Every scope-introducing node opens a [`Frame`] on entry and closes it on
//! exit. Frames live on an explicit stack owned by the compiler; a frame's
//! parent is the frame below it, so no frame outlives the visit that
//! pushed it.
//!
//! Frames do two jobs:
//! - **Symbol allocation**: each frame counts symbols per kind. A symbol
//!   carries its frame's compilation-unique tag, so sibling frames asking
//!   for the same kind never collide.
//! - **Local bookkeeping**: names assigned in a frame are recorded with the
//!   slot symbol that holds them, which lets variable references skip the
//!   runtime search.

use rustc_hash::FxHashMap;

use quill_ir::{FrameId, Name, Symbol, SymbolKind};

/// One lexical scope of the document being compiled.
#[derive(Clone, Debug)]
pub struct Frame {
    id: FrameId,
    /// Next index per symbol kind.
    counters: FxHashMap<SymbolKind, u32>,
    /// Names bound as compile-time locals in this frame.
    locals: FxHashMap<Name, Symbol>,
}

impl Frame {
    fn new(id: FrameId) -> Self {
        Frame {
            id,
            counters: FxHashMap::default(),
            locals: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> FrameId {
        self.id
    }

    /// Allocate a symbol that no other frame of this compilation can produce.
    pub fn fresh_symbol(&mut self, kind: SymbolKind) -> Symbol {
        let counter = self.counters.entry(kind).or_insert(0);
        let symbol = Symbol::new(kind, self.id, *counter);
        *counter += 1;
        symbol
    }

    /// Record `name` as local to this frame, returning its slot.
    ///
    /// Declaring a name twice returns the slot of the first declaration.
    pub fn declare_local(&mut self, name: Name) -> Symbol {
        self.declare(name, SymbolKind::Var)
    }

    /// Record a function parameter as local to this frame.
    pub fn declare_param(&mut self, name: Name) -> Symbol {
        self.declare(name, SymbolKind::Param)
    }

    fn declare(&mut self, name: Name, kind: SymbolKind) -> Symbol {
        if let Some(&slot) = self.locals.get(&name) {
            return slot;
        }
        let slot = self.fresh_symbol(kind);
        self.locals.insert(name, slot);
        slot
    }

    /// Whether `name` was declared in this frame. Ancestors are not searched.
    #[inline]
    pub fn is_local(&self, name: Name) -> bool {
        self.locals.contains_key(&name)
    }

    /// Slot of a name declared in this frame.
    #[inline]
    pub fn local(&self, name: Name) -> Option<Symbol> {
        self.locals.get(&name).copied()
    }
}

/// Stack of frames, innermost last.
#[derive(Clone, Debug)]
pub struct CompileEnv {
    frames: Vec<Frame>,
    /// Tag of the next frame to open.
    next_frame: u32,
}

impl CompileEnv {
    /// A chain holding only the root frame.
    pub fn new() -> Self {
        CompileEnv {
            frames: vec![Frame::new(FrameId::ROOT)],
            next_frame: FrameId::ROOT.raw() + 1,
        }
    }

    /// Number of open frames, the root frame included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Open a child frame of the current frame and make it current.
    pub fn push_child(&mut self) -> FrameId {
        let id = FrameId::from_raw(self.next_frame);
        self.next_frame += 1;
        self.frames.push(Frame::new(id));
        id
    }

    /// Close the current frame. The root frame is never closed.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// The innermost frame.
    #[inline]
    pub fn current(&self) -> &Frame {
        // The root frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    #[inline]
    fn current_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Frames from innermost to outermost.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().rev()
    }

    /// Allocate a fresh symbol in the current frame.
    #[inline]
    pub fn fresh_symbol(&mut self, kind: SymbolKind) -> Symbol {
        self.current_mut().fresh_symbol(kind)
    }

    /// Declare `name` local to the current frame.
    #[inline]
    pub fn declare_local(&mut self, name: Name) -> Symbol {
        self.current_mut().declare_local(name)
    }

    /// Declare a function parameter in the current frame.
    #[inline]
    pub fn declare_param(&mut self, name: Name) -> Symbol {
        self.current_mut().declare_param(name)
    }

    /// Whether `name` is local to the current frame.
    #[inline]
    pub fn is_local(&self, name: Name) -> bool {
        self.current().is_local(name)
    }

    /// Slot of the nearest enclosing declaration of `name`.
    pub fn resolve_local(&self, name: Name) -> Option<Symbol> {
        self.frames().find_map(|frame| frame.local(name))
    }

    /// Slot of a document-level declaration of `name`.
    ///
    /// Only the root frame and the document frame directly inside it are
    /// searched, the document frame first.
    pub fn resolve_global(&self, name: Name) -> Option<Symbol> {
        self.frames
            .iter()
            .take(2)
            .rev()
            .find_map(|frame| frame.local(name))
    }
}

impl Default for CompileEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
