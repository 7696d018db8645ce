//! Resolved output tree.
//!
//! Running a program appends resolved nodes to an [`OutputTree`], an arena
//! addressed by [`NodeId`]. Children keep their append order. Serializing
//! the tree to CSS text belongs to the caller.

use quill_ir::CommentKind;

use crate::selector::SelectorList;

/// Index of a node in an [`OutputTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A resolved node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputNode {
    Root,
    Comment { text: String, kind: CommentKind },
    Property { name: String, value: String },
    Rule { selector: SelectorList },
}

#[derive(Clone, Debug)]
struct Entry {
    node: OutputNode,
    children: Vec<NodeId>,
}

/// Arena of resolved nodes; node 0 is the root.
#[derive(Clone, Debug)]
pub struct OutputTree {
    entries: Vec<Entry>,
}

impl OutputTree {
    pub fn new() -> Self {
        OutputTree {
            entries: vec![Entry {
                node: OutputNode::Root,
                children: Vec::new(),
            }],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Append `node` as the last child of `parent`.
    ///
    /// # Panics
    /// Panics if `parent` does not belong to this tree.
    pub fn append(&mut self, parent: NodeId, node: OutputNode) -> NodeId {
        let id = NodeId(
            u32::try_from(self.entries.len())
                .unwrap_or_else(|_| panic!("output tree exceeded {} nodes", u32::MAX)),
        );
        self.entries.push(Entry {
            node,
            children: Vec::new(),
        });
        self.entries[parent.index()].children.push(id);
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&OutputNode> {
        self.entries.get(id.index()).map(|entry| &entry.node)
    }

    /// Children of `id` in append order; empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.entries
            .get(id.index())
            .map_or(&[][..], |entry| entry.children.as_slice())
    }

    /// Number of nodes, the root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing but the root exists.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }

    /// Selector of a rule node.
    pub fn selector(&self, id: NodeId) -> Option<&SelectorList> {
        match self.get(id)? {
            OutputNode::Rule { selector } => Some(selector),
            _ => None,
        }
    }
}

impl Default for OutputTree {
    fn default() -> Self {
        Self::new()
    }
}
