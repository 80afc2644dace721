use crate::comparator::Comparator;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};

/// The core Red-Black tree backing `RBTree`.
#[derive(Clone)]
pub(crate) struct RawRBTree<K, C> {
    /// Colors and links. Slot 0 is the sentinel.
    nodes: Arena<Node>,
    /// Keys, one slot behind the matching node slot.
    keys: Arena<K>,
    /// Handle to the root node, or the sentinel if the tree is empty.
    root: Handle,
    /// Strict less-than predicate used for every descent.
    comparator: C,
}

/// What the rebalancing loop did for a single insertion.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct FixupReport {
    /// Red uncle: recolored and moved two levels up.
    pub(crate) recolors: u32,
    /// Black uncle, inner grandchild: rotated at the parent.
    pub(crate) inner_rotations: u32,
    /// Black uncle, outer grandchild: recolored and rotated at the grandparent.
    pub(crate) outer_rotations: u32,
}

impl FixupReport {
    /// Total rotations performed. Never more than two.
    pub(crate) const fn rotations(&self) -> u32 {
        self.inner_rotations + self.outer_rotations
    }
}

impl<K, C> RawRBTree<K, C> {
    /// Creates a new tree with room for `capacity` keys.
    pub(crate) fn with_capacity(comparator: C, capacity: usize) -> Self {
        let mut nodes = Arena::with_capacity(capacity.saturating_add(1));
        let nil = nodes.push(Node::SENTINEL);
        debug_assert_eq!(nil, Handle::NIL);

        Self {
            nodes,
            keys: Arena::with_capacity(capacity),
            root: Handle::NIL,
            comparator,
        }
    }

    /// Returns the number of keys in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the tree contains no keys.
    pub(crate) const fn is_empty(&self) -> bool {
        self.keys.len() == 0
    }

    /// Returns the number of keys the tree can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.keys.capacity()
    }

    /// Returns the root handle, which is the sentinel for an empty tree.
    pub(crate) const fn root(&self) -> Handle {
        self.root
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns a reference to a node by handle. The sentinel is a valid handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node {
        self.nodes.get_mut(handle)
    }

    /// Returns the key stored in a real node.
    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.keys.slot(handle.key_slot())
    }

    #[inline]
    pub(crate) fn color(&self, handle: Handle) -> Color {
        self.node(handle).color()
    }

    #[inline]
    pub(crate) fn parent(&self, handle: Handle) -> Handle {
        self.node(handle).parent()
    }

    #[inline]
    pub(crate) fn left(&self, handle: Handle) -> Handle {
        self.node(handle).left()
    }

    #[inline]
    pub(crate) fn right(&self, handle: Handle) -> Handle {
        self.node(handle).right()
    }

    /// Which child link of its parent `handle` hangs from. The root reports `Right`.
    #[inline]
    fn side_of(&self, handle: Handle) -> Side {
        if handle == self.left(self.parent(handle)) { Side::Left } else { Side::Right }
    }

    /// Follows left links from `handle` down to the last real node.
    pub(crate) fn minimum(&self, mut handle: Handle) -> Handle {
        debug_assert!(!handle.is_nil(), "`RawRBTree::minimum()` - called on the sentinel!");
        while !self.left(handle).is_nil() {
            handle = self.left(handle);
        }
        handle
    }

    /// Follows right links from `handle` down to the last real node.
    pub(crate) fn maximum(&self, mut handle: Handle) -> Handle {
        debug_assert!(!handle.is_nil(), "`RawRBTree::maximum()` - called on the sentinel!");
        while !self.right(handle).is_nil() {
            handle = self.right(handle);
        }
        handle
    }

    /// Returns the next node in order, or the sentinel after the last one.
    pub(crate) fn successor(&self, mut handle: Handle) -> Handle {
        if !self.right(handle).is_nil() {
            return self.minimum(self.right(handle));
        }

        let mut ancestor = self.parent(handle);
        while !ancestor.is_nil() && handle == self.right(ancestor) {
            handle = ancestor;
            ancestor = self.parent(ancestor);
        }
        ancestor
    }

    /// Returns the previous node in order, or the sentinel before the first one.
    pub(crate) fn predecessor(&self, mut handle: Handle) -> Handle {
        if !self.left(handle).is_nil() {
            return self.maximum(self.left(handle));
        }

        let mut ancestor = self.parent(handle);
        while !ancestor.is_nil() && handle == self.left(ancestor) {
            handle = ancestor;
            ancestor = self.parent(ancestor);
        }
        ancestor
    }

    /// Returns the smallest node of the tree, or the sentinel if it is empty.
    pub(crate) fn first(&self) -> Handle {
        if self.root.is_nil() { Handle::NIL } else { self.minimum(self.root) }
    }

    /// Returns the largest node of the tree, or the sentinel if it is empty.
    pub(crate) fn last(&self) -> Handle {
        if self.root.is_nil() { Handle::NIL } else { self.maximum(self.root) }
    }

    /// Promotes `x.right` into the place of `x`. Colors are left untouched.
    pub(crate) fn rotate_left(&mut self, x: Handle) {
        let y = self.right(x);
        debug_assert!(!y.is_nil(), "`RawRBTree::rotate_left()` - right child is the sentinel!");

        // y's left subtree becomes x's right subtree.
        let y_left = self.left(y);
        self.node_mut(x).set_right(y_left);
        if !y_left.is_nil() {
            self.node_mut(y_left).set_parent(x);
        }

        // y takes x's place under x's parent.
        let x_parent = self.parent(x);
        self.node_mut(y).set_parent(x_parent);
        if x_parent.is_nil() {
            self.root = y;
        } else if x == self.left(x_parent) {
            self.node_mut(x_parent).set_left(y);
        } else {
            self.node_mut(x_parent).set_right(y);
        }

        self.node_mut(y).set_left(x);
        self.node_mut(x).set_parent(y);
    }

    /// Promotes `x.left` into the place of `x`. Colors are left untouched.
    pub(crate) fn rotate_right(&mut self, x: Handle) {
        let y = self.left(x);
        debug_assert!(!y.is_nil(), "`RawRBTree::rotate_right()` - left child is the sentinel!");

        // y's right subtree becomes x's left subtree.
        let y_right = self.right(y);
        self.node_mut(x).set_left(y_right);
        if !y_right.is_nil() {
            self.node_mut(y_right).set_parent(x);
        }

        // y takes x's place under x's parent.
        let x_parent = self.parent(x);
        self.node_mut(y).set_parent(x_parent);
        if x_parent.is_nil() {
            self.root = y;
        } else if x == self.left(x_parent) {
            self.node_mut(x_parent).set_left(y);
        } else {
            self.node_mut(x_parent).set_right(y);
        }

        self.node_mut(y).set_right(x);
        self.node_mut(x).set_parent(y);
    }

    /// Rotates `x` down toward `side`.
    #[inline]
    fn rotate_toward(&mut self, x: Handle, side: Side) {
        match side {
            Side::Left => self.rotate_left(x),
            Side::Right => self.rotate_right(x),
        }
    }

    /// Restores "no red node has a red child" after `z` was attached as a red leaf.
    ///
    /// Loop invariant: `z` is red and the only possible violation is between `z` and
    /// its parent.
    fn insert_fixup(&mut self, mut z: Handle) -> FixupReport {
        let mut report = FixupReport::default();

        while self.node(self.parent(z)).is_red() {
            // A red parent is never the root, so the grandparent is a real node.
            let parent = self.parent(z);
            let grandparent = self.parent(parent);
            let side = self.side_of(parent);
            let uncle = self.node(grandparent).child(side.opposite());

            if self.node(uncle).is_red() {
                self.node_mut(parent).set_color(Color::Black);
                self.node_mut(uncle).set_color(Color::Black);
                self.node_mut(grandparent).set_color(Color::Red);
                z = grandparent;
                report.recolors += 1;
                continue;
            }

            if z == self.node(parent).child(side.opposite()) {
                // Inner grandchild: turn it into the outer case.
                z = parent;
                self.rotate_toward(z, side);
                report.inner_rotations += 1;
            }

            let parent = self.parent(z);
            let grandparent = self.parent(parent);
            self.node_mut(parent).set_color(Color::Black);
            self.node_mut(grandparent).set_color(Color::Red);
            self.rotate_toward(grandparent, side.opposite());
            report.outer_rotations += 1;
        }

        let root = self.root;
        self.node_mut(root).set_color(Color::Black);
        report
    }
}

impl<K, C: Comparator<K>> RawRBTree<K, C> {
    /// Descends from the root to a node equivalent to `key`, or the sentinel.
    pub(crate) fn search(&self, key: &K) -> Handle {
        let mut current = self.root;
        while !current.is_nil() {
            let current_key = self.key(current);
            if self.comparator.equivalent(key, current_key) {
                break;
            }
            current = if self.comparator.less(key, current_key) { self.left(current) } else { self.right(current) };
        }
        current
    }

    /// Inserts `key` as a red leaf and rebalances. Equivalent keys go to the right.
    pub(crate) fn insert(&mut self, key: K) -> (Handle, FixupReport) {
        let mut parent = Handle::NIL;
        let mut side = Side::Left;
        let mut current = self.root;
        while !current.is_nil() {
            parent = current;
            side = if self.comparator.less(&key, self.key(current)) { Side::Left } else { Side::Right };
            current = self.node(current).child(side);
        }

        let z = self.nodes.push(Node::new_red(parent));
        let slot = self.keys.push(key);
        debug_assert_eq!(z.key_slot(), slot.slot());

        if parent.is_nil() {
            self.root = z;
        } else {
            self.node_mut(parent).set_child(side, z);
        }

        let report = self.insert_fixup(z);
        (z, report)
    }
}

#[cfg(test)]
impl<K, C> RawRBTree<K, C> {
    pub(crate) fn new(comparator: C) -> Self {
        Self::with_capacity(comparator, 0)
    }

    /// Recolors a node without rebalancing, to build corrupted trees.
    pub(crate) fn paint(&mut self, handle: Handle, color: Color) {
        self.node_mut(handle).set_color(color);
    }

    /// Swaps the comparator without reordering anything.
    pub(crate) fn with_comparator<D>(self, comparator: D) -> RawRBTree<K, D> {
        RawRBTree {
            nodes: self.nodes,
            keys: self.keys,
            root: self.root,
            comparator,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::comparator::NaturalOrder;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    fn tree_from(keys: &[i32]) -> RawRBTree<i32, NaturalOrder> {
        let mut tree = RawRBTree::new(NaturalOrder);
        for &key in keys {
            tree.insert(key);
        }
        tree
    }

    fn keys_in_order<K: Copy, C>(tree: &RawRBTree<K, C>) -> Vec<K> {
        let mut keys = Vec::with_capacity(tree.len());
        let mut current = tree.first();
        while !current.is_nil() {
            keys.push(*tree.key(current));
            current = tree.successor(current);
        }
        keys
    }

    #[test]
    fn empty_tree_is_just_the_sentinel() {
        let tree: RawRBTree<i32, _> = RawRBTree::new(NaturalOrder);
        assert!(tree.is_empty());
        assert!(tree.root().is_nil());
        assert!(tree.first().is_nil());
        assert!(tree.last().is_nil());
        assert!(tree.search(&1).is_nil());
        assert_eq!(*tree.node(Handle::NIL), Node::SENTINEL);
    }

    #[test]
    fn single_insert_recolors_root() {
        let mut tree = RawRBTree::new(NaturalOrder);
        let (handle, report) = tree.insert(42);
        assert_eq!(tree.root(), handle);
        assert_eq!(tree.color(handle), Color::Black);
        assert_eq!(report, FixupReport::default());
    }

    #[test]
    fn ascending_three_rotates_once_at_root() {
        let mut tree = RawRBTree::new(NaturalOrder);
        tree.insert(1);
        tree.insert(2);
        let (three, report) = tree.insert(3);
        assert_eq!(report.outer_rotations, 1);
        assert_eq!(report.inner_rotations, 0);

        let root = tree.root();
        assert_eq!(*tree.key(root), 2);
        assert_eq!(tree.color(root), Color::Black);
        assert_eq!(*tree.key(tree.left(root)), 1);
        assert_eq!(tree.right(root), three);
        assert_eq!(tree.color(three), Color::Red);
    }

    #[test]
    fn zig_zag_takes_both_rotations() {
        let mut tree = RawRBTree::new(NaturalOrder);
        tree.insert(3);
        tree.insert(1);
        let (two, report) = tree.insert(2);
        assert_eq!(report.inner_rotations, 1);
        assert_eq!(report.outer_rotations, 1);
        assert_eq!(tree.root(), two);
        assert_eq!(keys_in_order(&tree), [1, 2, 3]);
    }

    #[test]
    fn red_uncle_recolors_without_rotating() {
        let mut tree = tree_from(&[2, 1, 3]);
        let (_, report) = tree.insert(4);
        assert_eq!(report.recolors, 1);
        assert_eq!(report.rotations(), 0);
        let root = tree.root();
        assert_eq!(tree.color(tree.left(root)), Color::Black);
        assert_eq!(tree.color(tree.right(root)), Color::Black);
    }

    #[test]
    fn rotations_preserve_order_and_links() {
        let mut tree = tree_from(&[4, 2, 6, 1, 3, 5, 7]);
        let before = keys_in_order(&tree);
        let root = tree.root();

        tree.rotate_left(root);
        assert_eq!(keys_in_order(&tree), before);
        assert_eq!(tree.left(tree.root()), root);
        assert_eq!(tree.parent(root), tree.root());
        assert!(tree.parent(tree.root()).is_nil());

        tree.rotate_right(tree.root());
        assert_eq!(tree.root(), root);
        assert_eq!(keys_in_order(&tree), before);
        assert_eq!(*tree.node(Handle::NIL), Node::SENTINEL);
    }

    #[test]
    fn rotation_does_not_touch_colors() {
        let mut tree = tree_from(&[4, 2, 6, 1, 3, 5, 7]);
        let colors: Vec<_> = (1..=7).map(|i| tree.color(Handle::at(i))).collect();
        let root = tree.root();
        tree.rotate_right(root);
        let after: Vec<_> = (1..=7).map(|i| tree.color(Handle::at(i))).collect();
        assert_eq!(colors, after);
    }

    #[test]
    fn search_routes_ties_right() {
        let mut tree = RawRBTree::new(NaturalOrder);
        let (first, _) = tree.insert(5);
        let (second, _) = tree.insert(5);
        assert_eq!(tree.successor(first), second);
        assert!(!tree.search(&5).is_nil());
        assert!(tree.search(&6).is_nil());
    }

    #[test]
    fn min_max_on_subtrees() {
        let tree = tree_from(&[1, 4, 5, 0, 2, 10, 3]);
        assert_eq!(*tree.key(tree.first()), 0);
        assert_eq!(*tree.key(tree.last()), 10);
        // 4(1(0, 2(_, 3)), 5(_, 10))
        let one = tree.search(&1);
        assert_eq!(tree.parent(one), tree.root());
        assert_eq!(*tree.key(tree.minimum(one)), 0);
        assert_eq!(*tree.key(tree.maximum(one)), 3);
        let five = tree.search(&5);
        assert_eq!(tree.minimum(five), five);
        assert_eq!(*tree.key(tree.maximum(five)), 10);
    }

    #[test]
    fn successor_and_predecessor_stop_at_the_ends() {
        let tree = tree_from(&[3, 1, 2]);
        assert!(tree.predecessor(tree.first()).is_nil());
        assert!(tree.successor(tree.last()).is_nil());
    }

    proptest! {
        #[test]
        fn insert_keeps_invariants(keys in prop::collection::vec(-500i32..500, 0..512)) {
            let mut tree = RawRBTree::new(NaturalOrder);
            for &key in &keys {
                let (_, report) = tree.insert(key);
                prop_assert!(report.rotations() <= 2, "{:?}", report);
                prop_assert!(tree.check_invariants().is_ok(), "{:?}", tree.check_invariants());
            }

            let mut sorted = keys.clone();
            sorted.sort_unstable();
            prop_assert_eq!(keys_in_order(&tree), sorted);
        }

        #[test]
        fn predecessor_walks_backwards(keys in prop::collection::vec(any::<i16>(), 1..256)) {
            let mut tree = RawRBTree::new(NaturalOrder);
            for &key in &keys {
                tree.insert(key);
            }

            let mut backwards = Vec::new();
            let mut current = tree.last();
            while !current.is_nil() {
                backwards.push(*tree.key(current));
                current = tree.predecessor(current);
            }
            backwards.reverse();
            prop_assert_eq!(backwards, keys_in_order(&tree));
        }

        #[test]
        fn search_finds_inserted_keys(keys in prop::collection::vec(0i32..1000, 0..256), probe in 1000i32..2000) {
            let mut tree = RawRBTree::new(NaturalOrder);
            for &key in &keys {
                tree.insert(key);
            }
            for key in &keys {
                let found = tree.search(key);
                prop_assert!(!found.is_nil());
                prop_assert_eq!(tree.key(found), key);
            }
            prop_assert!(tree.search(&probe).is_nil());
        }
    }
}
