//! Interned identifiers and the canonical identifier form.
//!
//! Style-sheet identifiers are hyphen/underscore-insensitive: `$main-color`
//! and `$main_color` name the same variable. Every variable and function
//! name is canonicalized with [`canonicalize`] before it is interned, so two
//! spellings always produce the same [`Name`].

use std::borrow::Cow;
use std::fmt;

/// Interned string identifier.
///
/// A 32-bit index into the [`StringInterner`](crate::StringInterner) that
/// produced it. Comparing two `Name`s is an integer comparison.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the interner's string table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Canonical identifier form: hyphens become underscores.
///
/// Borrows when the name is already canonical.
pub fn canonicalize(written: &str) -> Cow<'_, str> {
    if written.contains('-') {
        Cow::Owned(written.replace('-', "_"))
    } else {
        Cow::Borrowed(written)
    }
}

#[cfg(test)]
mod tests;
