//! Selector lists and parent-reference resolution.
//!
//! Selectors are kept as normalized text. Only the comma that separates
//! list members and the `&` parent reference carry meaning here;
//! combinators, pseudo-classes and the like pass through untouched.

use std::fmt;

use crate::errors::{empty_selector, parent_ref_at_root, EvalResult};

/// The parent-reference character.
const PARENT_REF: char = '&';

/// Comma-separated list of complex selectors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectorList {
    selectors: Vec<String>,
}

impl SelectorList {
    /// Split `text` on commas, collapsing whitespace runs inside each member.
    /// Empty members are dropped.
    pub fn parse(text: &str) -> Self {
        let selectors = text
            .split(',')
            .map(|member| member.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|member| !member.is_empty())
            .collect();
        SelectorList { selectors }
    }

    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Whether any member refers to its parent.
    pub fn has_parent_ref(&self) -> bool {
        self.selectors.iter().any(|s| s.contains(PARENT_REF))
    }

    /// Resolve `&` against the enclosing rule's selector.
    ///
    /// Each parent member combines with each child member, parents outermost:
    /// `&` is replaced by the parent, and a member without `&` becomes a
    /// descendant of the parent.
    pub fn resolve_parent_refs(&self, parent: Option<&SelectorList>) -> EvalResult<SelectorList> {
        if self.is_empty() {
            return Err(empty_selector());
        }
        let Some(parent) = parent else {
            if self.has_parent_ref() {
                return Err(parent_ref_at_root(&self.to_string()));
            }
            return Ok(self.clone());
        };

        let mut selectors = Vec::with_capacity(parent.len() * self.len());
        for outer in &parent.selectors {
            for inner in &self.selectors {
                if inner.contains(PARENT_REF) {
                    selectors.push(inner.replace(PARENT_REF, outer));
                } else {
                    selectors.push(format!("{outer} {inner}"));
                }
            }
        }
        Ok(SelectorList { selectors })
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selectors.join(", "))
    }
}
