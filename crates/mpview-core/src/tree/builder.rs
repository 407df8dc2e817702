use super::{Node, Tree};

/// One open container and the child count it still expects.
#[derive(Debug)]
struct Frame {
    node: Node,
    expected: usize,
    filled: usize,
}

/// Builds the node tree with an explicit stack of open container frames.
///
/// The synthetic root absorbs top-level items and never closes. An open
/// container is held by its frame until its expected child count is
/// satisfied (or the input ends), then attached to its parent; every node
/// therefore has exactly one owner at all times and no back-pointers exist.
///
/// A pushed container counts one child toward its parent immediately; its
/// own children do not count until appended. `filled` tracks counted
/// children rather than `children.len()` because an open child sits in its
/// frame, not yet in the parent's child vector.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    roots: Vec<Node>,
    frames: Vec<Frame>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open container frames (the root is not counted).
    pub fn open_frames(&self) -> usize {
        self.frames.len()
    }

    /// Nesting depth the next inserted node would land at (0 = top level).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Append a leaf to the innermost open container, then close every
    /// frame whose expected count is now satisfied.
    pub fn insert_leaf(&mut self, node: Node) {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.node.children.push(node);
                frame.filled += 1;
            }
            None => self.roots.push(node),
        }
        self.close_satisfied();
    }

    /// Open a container expecting `expected` immediate children. An
    /// expected count of zero closes in the same step, yielding a childless
    /// container node.
    pub fn insert_container(&mut self, node: Node, expected: usize) {
        if let Some(frame) = self.frames.last_mut() {
            frame.filled += 1;
        }
        self.frames.push(Frame {
            node,
            expected,
            filled: 0,
        });
        self.close_satisfied();
    }

    // Cascading close: one append can complete several nested frames, e.g.
    // the last value of an inner array that is itself the last value of the
    // enclosing map.
    fn close_satisfied(&mut self) {
        while self
            .frames
            .last()
            .is_some_and(|frame| frame.filled >= frame.expected)
        {
            if let Some(frame) = self.frames.pop() {
                self.attach(frame.node);
            }
        }
    }

    fn attach(&mut self, node: Node) {
        match self.frames.last_mut() {
            Some(parent) => parent.node.children.push(node),
            None => self.roots.push(node),
        }
    }

    /// Finish the pass. Containers still open (fewer children supplied than
    /// declared) are attached partially filled, innermost first.
    pub fn finish(mut self) -> Tree {
        while let Some(frame) = self.frames.pop() {
            self.attach(frame.node);
        }
        Tree { nodes: self.roots }
    }
}

#[cfg(test)]
mod tests {
    use super::TreeBuilder;
    use crate::tree::Node;

    #[test]
    fn leaves_append_to_root() {
        let mut builder = TreeBuilder::new();
        builder.insert_leaf(Node::leaf("nil", 0));
        builder.insert_leaf(Node::leaf("true", 1));
        let tree = builder.finish();
        assert_eq!(tree.nodes.len(), 2);
        assert_eq!(tree.nodes[0].label, "nil");
    }

    #[test]
    fn container_closes_when_count_satisfied() {
        let mut builder = TreeBuilder::new();
        builder.insert_container(Node::container("fixarray: count 2", 0), 2);
        assert_eq!(builder.open_frames(), 1);
        builder.insert_leaf(Node::leaf("positive fixint: 1", 1));
        assert_eq!(builder.open_frames(), 1);
        builder.insert_leaf(Node::leaf("positive fixint: 2", 2));
        assert_eq!(builder.open_frames(), 0);

        let tree = builder.finish();
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.nodes[0].children.len(), 2);
    }

    #[test]
    fn cascading_close_unwinds_nested_frames() {
        // array of one array of one integer
        let mut builder = TreeBuilder::new();
        builder.insert_container(Node::container("fixarray: count 1", 0), 1);
        builder.insert_container(Node::container("fixarray: count 1", 1), 1);
        assert_eq!(builder.open_frames(), 2);
        builder.insert_leaf(Node::leaf("positive fixint: 1", 2));
        assert_eq!(builder.open_frames(), 0);

        let tree = builder.finish();
        assert_eq!(tree.nodes.len(), 1);
        let outer = &tree.nodes[0];
        assert_eq!(outer.children.len(), 1);
        let inner = &outer.children[0];
        assert_eq!(inner.children.len(), 1);
        assert_eq!(inner.children[0].label, "positive fixint: 1");
    }

    #[test]
    fn zero_expected_container_closes_immediately() {
        let mut builder = TreeBuilder::new();
        builder.insert_container(Node::container("array 16: count 0", 0), 0);
        assert_eq!(builder.open_frames(), 0);
        let tree = builder.finish();
        assert_eq!(tree.nodes.len(), 1);
        assert!(tree.nodes[0].container);
        assert!(tree.nodes[0].children.is_empty());
    }

    #[test]
    fn pushed_container_counts_toward_parent_once() {
        let mut builder = TreeBuilder::new();
        builder.insert_container(Node::container("fixarray: count 1", 0), 1);
        builder.insert_container(Node::container("fixmap: count 1", 1), 2);
        // outer frame is satisfied by the pushed map alone, but cannot close
        // until the map itself does
        assert_eq!(builder.open_frames(), 2);
        builder.insert_leaf(Node::leaf("positive fixint: 1", 2));
        builder.insert_leaf(Node::leaf("positive fixint: 2", 3));
        assert_eq!(builder.open_frames(), 0);
        let tree = builder.finish();
        assert_eq!(tree.nodes[0].children[0].children.len(), 2);
    }

    #[test]
    fn finish_attaches_open_frames_partially_filled() {
        let mut builder = TreeBuilder::new();
        builder.insert_container(Node::container("fixarray: count 3", 0), 3);
        builder.insert_leaf(Node::leaf("nil", 1));
        assert_eq!(builder.open_frames(), 1);
        let tree = builder.finish();
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.nodes[0].children.len(), 1);
    }

    #[test]
    fn finish_preserves_nesting_of_open_frames() {
        let mut builder = TreeBuilder::new();
        builder.insert_container(Node::container("fixarray: count 2", 0), 2);
        builder.insert_container(Node::container("fixmap: count 3", 1), 6);
        let tree = builder.finish();
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.nodes[0].children.len(), 1);
        assert_eq!(tree.nodes[0].children[0].label, "fixmap: count 3");
    }
}
