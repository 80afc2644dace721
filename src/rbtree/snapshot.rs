use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use super::RBTree;
use crate::raw::{Color, Handle};

/// The identity of a node within one tree.
///
/// Identities are stable for the lifetime of the tree: rotations relink nodes but
/// never move them. [`NodeId::NIL`] names the sentinel.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The identity of the sentinel.
    pub const NIL: NodeId = NodeId(0);

    pub(crate) const fn from_handle(handle: Handle) -> Self {
        NodeId(handle.slot())
    }

    /// Returns `true` for the sentinel.
    #[must_use]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }

    /// The slot index of the node. Nodes are numbered in insertion order from 1.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() { f.write_str("nil") } else { write!(f, "#{}", self.0) }
    }
}

/// One node of a [`Snapshot`].
#[derive(Debug, PartialEq, Eq)]
pub struct NodeSnapshot<'a, K> {
    /// The node's identity.
    pub id: NodeId,
    /// The stored key, or `None` for the sentinel.
    pub key: Option<&'a K>,
    /// The node's color.
    pub color: Color,
    /// The parent's identity.
    pub parent: NodeId,
    /// The left child's identity.
    pub left: NodeId,
    /// The right child's identity.
    pub right: NodeId,
}

impl<K> Clone for NodeSnapshot<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeSnapshot<'_, K> {}

/// A read-only export of a tree's node graph.
///
/// Nodes appear in pre-order from the root, followed by the sentinel, which is
/// always last. This is the boundary consumed by renderers such as the `graphviz`
/// module; it carries no rendering concerns itself.
///
/// # Examples
///
/// ```
/// use redblack_tree::{Color, NodeId, RBTree};
///
/// let tree = RBTree::from([2, 1, 3]);
/// let snapshot = tree.snapshot();
/// assert_eq!(snapshot.len(), 4);
///
/// let keys: Vec<_> = snapshot.iter().map(|node| node.key.copied()).collect();
/// assert_eq!(keys, [Some(2), Some(1), Some(3), None]);
///
/// let nil = snapshot.nil();
/// assert_eq!(nil.id, NodeId::NIL);
/// assert_eq!(nil.color, Color::Black);
/// assert_eq!((nil.parent, nil.left, nil.right), (NodeId::NIL, NodeId::NIL, NodeId::NIL));
/// ```
#[derive(Debug)]
pub struct Snapshot<'a, K> {
    root: NodeId,
    nodes: Vec<NodeSnapshot<'a, K>>,
}

impl<'a, K> Snapshot<'a, K> {
    /// The root's identity, or [`NodeId::NIL`] for an empty tree.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The sentinel's entry.
    #[must_use]
    pub fn nil(&self) -> &NodeSnapshot<'a, K> {
        self.nodes.last().expect("`Snapshot::nil()` - the sentinel is always exported!")
    }

    /// Every entry, real nodes in pre-order then the sentinel.
    #[must_use]
    pub fn nodes(&self) -> &[NodeSnapshot<'a, K>] {
        &self.nodes
    }

    /// Looks up an entry by identity.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&NodeSnapshot<'a, K>> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// The number of entries, sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the sentinel is part of every snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the entries in export order.
    pub fn iter(&self) -> core::slice::Iter<'_, NodeSnapshot<'a, K>> {
        self.nodes.iter()
    }
}

impl<'s, 'a, K> IntoIterator for &'s Snapshot<'a, K> {
    type Item = &'s NodeSnapshot<'a, K>;
    type IntoIter = core::slice::Iter<'s, NodeSnapshot<'a, K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl<K, C> RBTree<K, C> {
    /// Exports the node graph, sentinel included, for diagnostics.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_, K> {
        let raw = &self.raw;
        let entry = |handle: Handle| {
            let node = raw.node(handle);
            NodeSnapshot {
                id: NodeId::from_handle(handle),
                key: if handle.is_nil() { None } else { Some(raw.key(handle)) },
                color: node.color(),
                parent: NodeId::from_handle(node.parent()),
                left: NodeId::from_handle(node.left()),
                right: NodeId::from_handle(node.right()),
            }
        };

        let mut nodes = Vec::with_capacity(raw.len() + 1);
        let mut pending: SmallVec<[Handle; 64]> = SmallVec::new();
        if !raw.root().is_nil() {
            pending.push(raw.root());
        }
        while let Some(handle) = pending.pop() {
            nodes.push(entry(handle));
            // Right first so the left subtree is exported first.
            for child in [raw.right(handle), raw.left(handle)] {
                if !child.is_nil() {
                    pending.push(child);
                }
            }
        }
        nodes.push(entry(Handle::NIL));

        Snapshot {
            root: NodeId::from_handle(raw.root()),
            nodes,
        }
    }
}
