//! Decoded node tree and its display-oriented traversals.
//!
//! Nodes are owned exclusively by their parent (or by the tree for
//! top-level nodes). Traversal and flattening are iterative with explicit
//! stacks; nesting depth never consumes call stack.

use serde::{Deserialize, Serialize};

pub(crate) mod builder;

/// Single decoded node: a human-readable label, the offset of the tag byte
/// that introduced it, and its ordered children.
///
/// # Examples
/// ```
/// use mpview_core::Node;
///
/// let node = Node::leaf("nil", 4);
/// assert_eq!(node.label, "nil");
/// assert_eq!(node.offset, 4);
/// assert!(!node.container);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Type and value rendered as text (e.g. "positive fixint: 5").
    pub label: String,
    /// Offset of the node's leading tag byte in the input buffer.
    pub offset: usize,
    /// Whether the node may own children (container or string header).
    pub container: bool,
    /// Immediate children in decode order; empty for leaves.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(label: impl Into<String>, offset: usize) -> Self {
        Self {
            label: label.into(),
            offset,
            container: false,
            children: Vec::new(),
        }
    }

    pub fn container(label: impl Into<String>, offset: usize) -> Self {
        Self {
            label: label.into(),
            offset,
            container: true,
            children: Vec::new(),
        }
    }
}

/// Completed decode result: the synthetic root's top-level nodes.
///
/// # Examples
/// ```
/// use mpview_core::decode;
///
/// let tree = decode(&[0x05, 0xc0])?;
/// assert_eq!(tree.nodes.len(), 2);
/// assert_eq!(tree.nodes[1].label, "nil");
/// # Ok::<(), mpview_core::DecodeError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterative depth-first traversal yielding `(depth, node)` in display
    /// order. Depth 0 is top level.
    pub fn walk(&self) -> Walk<'_> {
        let mut stack = Vec::with_capacity(self.nodes.len());
        for node in self.nodes.iter().rev() {
            stack.push((0, node));
        }
        Walk { stack }
    }

    /// Total node count, leaves and containers alike.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Deepest nesting level reached (0 for an empty tree, 1 for flat).
    pub fn max_depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }

    /// Flatten into display rows carrying a non-owning parent back-reference
    /// (`parent` indexes into the returned vector). Shells use this to wire
    /// expandable views without a second ownership edge in the tree.
    pub fn rows(&self) -> Vec<Row<'_>> {
        let mut rows = Vec::new();
        let mut stack: Vec<(usize, Option<usize>, &Node)> = Vec::new();
        for node in self.nodes.iter().rev() {
            stack.push((0, None, node));
        }
        while let Some((depth, parent, node)) = stack.pop() {
            let index = rows.len();
            rows.push(Row {
                index,
                parent,
                depth,
                node,
            });
            for child in node.children.iter().rev() {
                stack.push((depth + 1, Some(index), child));
            }
        }
        rows
    }
}

/// Iterator state for [`Tree::walk`].
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

/// Flat display row produced by [`Tree::rows`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub index: usize,
    pub parent: Option<usize>,
    pub depth: usize,
    pub node: &'a Node,
}
