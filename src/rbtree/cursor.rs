use core::fmt;

use super::NodeId;
use crate::raw::{Color, Handle, RawRBTree};

/// A read-only reference to one node of an [`RBTree`](crate::RBTree).
///
/// A `NodeRef` never points at the sentinel: navigation that would reach it
/// returns `None` instead.
///
/// # Examples
///
/// ```
/// use redblack_tree::RBTree;
///
/// let tree = RBTree::from([20, 10, 30]);
/// let root = tree.root().unwrap();
/// assert_eq!(*root.key(), 20);
/// assert_eq!(root.left().map(|node| *node.key()), Some(10));
/// assert_eq!(root.right().map(|node| *node.key()), Some(30));
/// assert!(root.parent().is_none());
/// ```
pub struct NodeRef<'a, K, C> {
    tree: &'a RawRBTree<K, C>,
    handle: Handle,
}

impl<'a, K, C> NodeRef<'a, K, C> {
    pub(crate) fn new(tree: &'a RawRBTree<K, C>, handle: Handle) -> Option<Self> {
        if handle.is_nil() {
            None
        } else {
            Some(NodeRef {
                tree,
                handle,
            })
        }
    }

    /// The key stored in this node.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.tree.key(self.handle)
    }

    /// The node's current color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.tree.color(self.handle)
    }

    /// The node's identity, as used by [`Snapshot`](super::Snapshot).
    #[must_use]
    pub fn id(&self) -> NodeId {
        NodeId::from_handle(self.handle)
    }

    /// The parent node, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        Self::new(self.tree, self.tree.parent(self.handle))
    }

    /// The left child, or `None` if it is the sentinel.
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        Self::new(self.tree, self.tree.left(self.handle))
    }

    /// The right child, or `None` if it is the sentinel.
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        Self::new(self.tree, self.tree.right(self.handle))
    }

    /// The next node in order, or `None` if this node holds the largest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_tree::RBTree;
    ///
    /// let tree = RBTree::from([1, 4, 5, 0, 2, 10, 3]);
    /// let mut node = tree.minimum();
    /// let mut keys = Vec::new();
    /// while let Some(current) = node {
    ///     keys.push(*current.key());
    ///     node = current.successor();
    /// }
    /// assert_eq!(keys, [0, 1, 2, 3, 4, 5, 10]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, O(1) amortized over a full walk.
    #[must_use]
    pub fn successor(&self) -> Option<Self> {
        Self::new(self.tree, self.tree.successor(self.handle))
    }

    /// The previous node in order, or `None` if this node holds the smallest key.
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, O(1) amortized over a full walk.
    #[must_use]
    pub fn predecessor(&self) -> Option<Self> {
        Self::new(self.tree, self.tree.predecessor(self.handle))
    }

    /// The node with the smallest key in the subtree rooted here.
    #[must_use]
    pub fn subtree_minimum(&self) -> Self {
        NodeRef {
            tree: self.tree,
            handle: self.tree.minimum(self.handle),
        }
    }

    /// The node with the largest key in the subtree rooted here.
    #[must_use]
    pub fn subtree_maximum(&self) -> Self {
        NodeRef {
            tree: self.tree,
            handle: self.tree.maximum(self.handle),
        }
    }
}

impl<K, C> Clone for NodeRef<'_, K, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, C> Copy for NodeRef<'_, K, C> {}

impl<K, C> PartialEq for NodeRef<'_, K, C> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.handle == other.handle
    }
}

impl<K, C> Eq for NodeRef<'_, K, C> {}

impl<K: fmt::Debug, C> fmt::Debug for NodeRef<'_, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id())
            .field("key", self.key())
            .field("color", &self.color())
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::{Color, RBTree};

    #[test]
    fn subtree_extremes() {
        // 4(1(0, 2(_, 3)), 5(_, 10))
        let tree = RBTree::from([1, 4, 5, 0, 2, 10, 3]);
        let one = tree.search(&1).unwrap();
        assert_eq!(*one.subtree_minimum().key(), 0);
        assert_eq!(*one.subtree_maximum().key(), 3);
        let root = tree.root().unwrap();
        assert_eq!(root.subtree_minimum(), tree.minimum().unwrap());
        assert_eq!(root.subtree_maximum(), tree.maximum().unwrap());
    }

    #[test]
    fn ends_have_no_neighbours() {
        let tree = RBTree::from([2, 1, 3]);
        assert!(tree.minimum().unwrap().predecessor().is_none());
        assert!(tree.maximum().unwrap().successor().is_none());
    }

    #[test]
    fn links_and_colors() {
        let tree = RBTree::from([1, 4, 5, 0, 2, 10, 3]);
        let root = tree.root().unwrap();
        assert_eq!(*root.key(), 4);
        assert_eq!(root.color(), Color::Black);

        let one = root.left().unwrap();
        assert_eq!(*one.key(), 1);
        assert_eq!(one.color(), Color::Red);
        assert_eq!(one.parent(), Some(root));

        let ten = root.right().unwrap().right().unwrap();
        assert_eq!(*ten.key(), 10);
        assert_eq!(ten.color(), Color::Red);
        assert!(ten.left().is_none());
        assert!(ten.right().is_none());
    }

    #[test]
    fn duplicates_are_neighbours() {
        let tree = RBTree::from([5, 5, 5]);
        let found = tree.search(&5).unwrap();
        let first = tree.minimum().unwrap();
        assert_eq!(first.successor().unwrap().successor(), tree.maximum());
        assert_eq!(*found.key(), 5);
    }
}
