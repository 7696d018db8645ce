//! String interner for variable and function names.
//!
//! Interning happens at compile time (the compiler turns every canonical
//! name into a [`Name`]) and at run time (host globals are interned before
//! the program runs), so the interner sits behind a lock and is shared
//! through [`SharedInterner`].

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Interned storage.
struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name::raw`.
    strings: Vec<&'static str>,
}

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Table exceeded capacity (over 4 billion strings).
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "interner exceeded capacity: {count} strings, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

impl InternTable {
    fn with_empty() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        Self {
            map,
            strings: vec![empty],
        }
    }
}

/// String interner with O(1) lookup and equality comparison.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner holding only the empty string.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(InternTable::with_empty()),
        }
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        // Fast path: already interned
        if let Some(&index) = self.table.read().map.get(s) {
            return Ok(Name::from_raw(index));
        }

        let mut guard = self.table.write();

        // Double-check after acquiring write lock
        if let Some(&index) = guard.map.get(s) {
            return Ok(Name::from_raw(index));
        }

        let index = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;

        // Leak the string to get 'static lifetime
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, index);
        Ok(Name::from_raw(index))
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds capacity (over 4 billion strings).
    /// Use `try_intern` for fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Intern the canonical form of a user-written identifier.
    ///
    /// `main-color` and `main_color` intern to the same `Name`.
    #[inline]
    pub fn intern_canonical(&self, written: &str) -> Name {
        self.intern(&super::canonicalize(written))
    }

    /// Look up the string for a Name.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table.read().strings.get(name.index()).copied().unwrap_or("")
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check if the interner is empty (only has the empty string).
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared interner handle for the compiler, the interpreter and the host.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a new shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests;
