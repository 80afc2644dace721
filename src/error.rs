use thiserror::Error;

use crate::NodeId;

/// A red-black or binary-search-tree invariant that does not hold.
///
/// Returned by [`RBTree::check_invariants`](crate::RBTree::check_invariants). A tree
/// built only through the public API never produces one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum InvariantViolation {
    /// The sentinel is not black.
    #[error("the sentinel is not black")]
    RedSentinel,

    /// The sentinel's links do not all point back at itself.
    #[error("the sentinel's links do not point at itself")]
    DetachedSentinel,

    /// The root is not black.
    #[error("root {0} is not black")]
    RedRoot(NodeId),

    /// A red node has a red child.
    #[error("red node {parent} has red child {child}")]
    RedRedEdge {
        /// The red parent.
        parent: NodeId,
        /// Its red child.
        child: NodeId,
    },

    /// Two paths below a node cross different numbers of black nodes.
    #[error("node {node} has black-height {left} on the left but {right} on the right")]
    BlackHeightMismatch {
        /// The node whose subtrees disagree.
        node: NodeId,
        /// Black-height of the left subtree.
        left: usize,
        /// Black-height of the right subtree.
        right: usize,
    },

    /// A child's parent link does not point back at its parent.
    #[error("node {child} does not link back to its parent {parent}")]
    BrokenLink {
        /// The node holding the child link.
        parent: NodeId,
        /// The child whose parent link disagrees.
        child: NodeId,
    },

    /// The in-order walk visits a key that orders before its predecessor.
    #[error("node {node} orders before its in-order predecessor {previous}")]
    OutOfOrder {
        /// The earlier node of the walk.
        previous: NodeId,
        /// The node that should not precede it.
        node: NodeId,
    },

    /// The number of reachable nodes differs from the stored length.
    #[error("{reachable} nodes are reachable from the root but the tree holds {len}")]
    LengthMismatch {
        /// Nodes reachable from the root.
        reachable: usize,
        /// The tree's recorded length.
        len: usize,
    },
}
