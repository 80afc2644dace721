use core::fmt;
use core::iter::FusedIterator;

use log::{debug, trace};
use smallvec::SmallVec;

use crate::comparator::{Comparator, NaturalOrder};
use crate::config::Config;
use crate::error::InvariantViolation;
use crate::raw::{FixupReport, Handle, RawRBTree};

mod cursor;
mod snapshot;

pub use cursor::NodeRef;
pub use snapshot::{NodeId, NodeSnapshot, Snapshot};

/// Spine stack for in-order iteration. Red-black height stays under 2·log2(n + 1),
/// so 64 entries cover any tree that fits in memory without spilling in practice.
type Spine = SmallVec<[Handle; 64]>;

/// An ordered multiset based on a Red-Black tree.
///
/// Keys are ordered by a [`Comparator`], a strict less-than predicate. By default
/// ([`RBTree::new`]) this is the key's own [`Ord`]; [`RBTree::with_comparator`]
/// accepts any comparator, including a plain closure.
///
/// Keys that compare neither less nor greater than each other are *equivalent*.
/// Equivalent keys are all kept: a new key is placed after every key already in the
/// tree that it does not order before, so iteration yields equivalent keys in
/// insertion order.
///
/// Every node lives in an arena owned by the tree and is addressed by index. A single
/// black sentinel node stands in for every absent child and for the parent of the
/// root. Nodes are never removed; dropping the tree releases all of them at once.
///
/// It is a logic error for a key to be modified in such a way that its ordering
/// relative to any other key, as determined by the comparator, changes while it is in
/// the tree. This is normally only possible through [`Cell`], [`RefCell`], global
/// state, I/O, or unsafe code. The behavior resulting from such a logic error is not
/// specified, but will be encapsulated to the `RBTree` that observed the logic error
/// and not result in undefined behavior.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use redblack_tree::RBTree;
///
/// let mut tree = RBTree::new();
/// for key in [1, 4, 5, 0, 2, 10, 3] {
///     tree.insert(key);
/// }
///
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 4, 5, 10]);
/// assert_eq!(tree.first(), Some(&0));
/// assert!(tree.contains(&3));
/// assert!(!tree.contains(&6));
///
/// let four = tree.search(&4).unwrap();
/// assert_eq!(four.successor().map(|node| *node.key()), Some(5));
/// assert_eq!(four.predecessor().map(|node| *node.key()), Some(3));
/// ```
pub struct RBTree<K, C = NaturalOrder> {
    raw: RawRBTree<K, C>,
    config: Config,
}

/// An in-order iterator over the keys of an `RBTree`.
///
/// This `struct` is created by the [`iter`] method on [`RBTree`]. See its
/// documentation for more.
///
/// # Examples
///
/// ```
/// use redblack_tree::RBTree;
///
/// let tree = RBTree::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: RBTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, C> {
    tree: &'a RawRBTree<K, C>,
    // Nodes whose left subtree is done but which are not yet yielded from the front.
    front: Spine,
    // Mirror of `front` for the back end.
    back: Spine,
    remaining: usize,
}

impl<K> RBTree<K, NaturalOrder> {
    /// Makes a new, empty `RBTree` ordered by `K`'s [`Ord`].
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// tree.insert("b");
    /// tree.insert("a");
    /// assert_eq!(tree.first(), Some(&"a"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, C> RBTree<K, C> {
    /// Makes a new, empty `RBTree` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_tree::RBTree;
    ///
    /// let mut tree = RBTree::with_comparator(|a: &&str, b: &&str| a.len() < b.len());
    /// tree.insert("three");
    /// tree.insert("one");
    /// tree.insert("four");
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["one", "four", "three"]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_config(comparator, Config::new())
    }

    /// Makes a new, empty `RBTree` ordered by `comparator` with the given options.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_tree::{Config, NaturalOrder, RBTree};
    ///
    /// let tree: RBTree<u64> = RBTree::with_config(NaturalOrder, Config::new().with_capacity(128));
    /// assert!(tree.capacity() >= 128);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_config(comparator: C, config: Config) -> Self {
        RBTree {
            raw: RawRBTree::with_capacity(comparator, config.capacity()),
            config,
        }
    }

    /// Returns the number of keys in the tree, duplicates included.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// tree.insert(5);
    /// tree.insert(5);
    /// assert_eq!(tree.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of keys the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the options the tree was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the comparator ordering the tree.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Gets an iterator that visits the keys in the tree in ascending order.
    ///
    /// The iterator is lazy and does not recurse: it keeps an explicit stack of the
    /// nodes along the current spine. Iterating twice yields the same sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_tree::RBTree;
    ///
    /// let tree = RBTree::from([2, 3, 1, 2]);
    /// let keys: Vec<_> = tree.iter().copied().collect();
    /// assert_eq!(keys, [1, 2, 2, 3]);
    /// assert!(tree.iter().eq(keys.iter()));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; O(1) amortized per step.
    pub fn iter(&self) -> Iter<'_, K, C> {
        let mut iter = Iter {
            tree: &self.raw,
            front: Spine::new(),
            back: Spine::new(),
            remaining: self.raw.len(),
        };
        iter.push_left_spine(self.raw.root());
        iter.push_right_spine(self.raw.root());
        iter
    }

    /// Visits the keys in ascending order. Same as [`iter`](RBTree::iter).
    pub fn walk_in_order(&self) -> Iter<'_, K, C> {
        self.iter()
    }

    /// Writes every key, in ascending order and one per line, into `out`.
    ///
    /// # Errors
    ///
    /// Returns any error reported by `out`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_tree::RBTree;
    ///
    /// let tree = RBTree::from([10, 2, 7]);
    /// let mut out = String::new();
    /// tree.inorder_tree_walk(&mut out).unwrap();
    /// assert_eq!(out, "2\n7\n10\n");
    /// ```
    pub fn inorder_tree_walk<W: fmt::Write>(&self, out: &mut W) -> fmt::Result
    where
        K: fmt::Display,
    {
        for key in self {
            writeln!(out, "{key}")?;
        }
        Ok(())
    }

    /// Returns the smallest key, or `None` if the tree is empty.
    ///
    /// Among equivalent smallest keys, the one inserted first is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// assert_eq!(tree.first(), None);
    /// tree.insert(4);
    /// tree.insert(2);
    /// assert_eq!(tree.first(), Some(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.minimum().map(|node| node.key())
    }

    /// Returns the largest key, or `None` if the tree is empty.
    ///
    /// Among equivalent largest keys, the one inserted last is returned.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.maximum().map(|node| node.key())
    }

    /// Returns the node holding the smallest key, or `None` if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn minimum(&self) -> Option<NodeRef<'_, K, C>> {
        NodeRef::new(&self.raw, self.raw.first())
    }

    /// Returns the node holding the largest key, or `None` if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn maximum(&self) -> Option<NodeRef<'_, K, C>> {
        NodeRef::new(&self.raw, self.raw.last())
    }

    /// Returns the root node, or `None` if the tree is empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K, C>> {
        NodeRef::new(&self.raw, self.raw.root())
    }

    /// Returns the number of black nodes on every path from the root down to the
    /// sentinel, counting the sentinel but not the root. Zero for an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// assert_eq!(tree.black_height(), 0);
    /// tree.insert(1);
    /// assert_eq!(tree.black_height(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn black_height(&self) -> usize {
        let mut current = self.raw.root();
        if current.is_nil() {
            return 0;
        }

        let mut height = 0;
        loop {
            current = self.raw.left(current);
            height += usize::from(self.raw.color(current).is_black());
            if current.is_nil() {
                return height;
            }
        }
    }
}

impl<K, C: Comparator<K>> RBTree<K, C> {
    /// Adds a key to the tree.
    ///
    /// Insertion always succeeds. A key equivalent to keys already present is stored
    /// as a separate entry after all of them.
    ///
    /// With [diagnostics](Config::with_diagnostics) enabled, the rebalancing steps are
    /// logged at `debug` level and the whole tree is validated afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds the maximum number of nodes, or if
    /// diagnostics are enabled and a red-black invariant no longer holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// tree.insert(5);
    /// tree.insert(5);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&5, &5]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) comparisons and at most two rotations.
    pub fn insert(&mut self, key: K) {
        let (handle, report) = self.raw.insert(key);
        if self.config.diagnostics() {
            self.log_insertion(handle, report);
        }
    }

    fn log_insertion(&self, handle: Handle, report: FixupReport) {
        debug!(
            "inserted node {} (len {}): {} recolors, {} rotations ({} inner, {} outer)",
            NodeId::from_handle(handle),
            self.raw.len(),
            report.recolors,
            report.rotations(),
            report.inner_rotations,
            report.outer_rotations,
        );
        if let Err(violation) = self.raw.check_invariants() {
            panic!("`RBTree::insert()` - red-black invariant violated: {violation}");
        }
        trace!("root is now {}, black-height {}", NodeId::from_handle(self.raw.root()), self.black_height());
    }

    /// Returns the node holding a key equivalent to `key`, or `None`.
    ///
    /// When several equivalent keys are stored, the one closest to the root is
    /// returned; [`NodeRef::predecessor`] and [`NodeRef::successor`] reach the others.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_tree::RBTree;
    ///
    /// let tree = RBTree::from([1, 4, 5, 0, 2, 10, 3]);
    /// let node = tree.search(&2).unwrap();
    /// assert_eq!(*node.key(), 2);
    /// assert!(tree.search(&7).is_none());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn search(&self, key: &K) -> Option<NodeRef<'_, K, C>> {
        NodeRef::new(&self.raw, self.raw.search(key))
    }

    /// Returns a stored key equivalent to `key`, or `None`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&K> {
        self.search(key).map(|node| node.key())
    }

    /// Returns `true` if the tree holds a key equivalent to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        !self.raw.search(key).is_nil()
    }

    /// Validates every red-black and search-tree invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found. A tree built through this API
    /// never reports one.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_tree::RBTree;
    ///
    /// let tree: RBTree<_> = (1..=7).collect();
    /// assert_eq!(tree.check_invariants(), Ok(()));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.raw.check_invariants().map(|_| ())
    }
}

impl<K: Clone, C: Clone> Clone for RBTree<K, C> {
    fn clone(&self) -> Self {
        RBTree {
            raw: self.raw.clone(),
            config: self.config,
        }
    }
}

impl<K: PartialEq, C> PartialEq for RBTree<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, C> Eq for RBTree<K, C> {}

impl<K: fmt::Debug, C> fmt::Debug for RBTree<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Default for RBTree<K, NaturalOrder> {
    fn default() -> Self {
        RBTree::new()
    }
}

impl<K: Ord> FromIterator<K> for RBTree<K, NaturalOrder> {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut tree = RBTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K, C: Comparator<K>> Extend<K> for RBTree<K, C> {
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: Copy + 'a, C: Comparator<K>> Extend<&'a K> for RBTree<K, C> {
    fn extend<T: IntoIterator<Item = &'a K>>(&mut self, iter: T) {
        self.extend(iter.into_iter().copied());
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for RBTree<K, NaturalOrder> {
    fn from(arr: [K; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, C> IntoIterator for &'a RBTree<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, C>;

    fn into_iter(self) -> Iter<'a, K, C> {
        self.iter()
    }
}

impl<K, C> Iter<'_, K, C> {
    fn push_left_spine(&mut self, mut handle: Handle) {
        while !handle.is_nil() {
            self.front.push(handle);
            handle = self.tree.left(handle);
        }
    }

    fn push_right_spine(&mut self, mut handle: Handle) {
        while !handle.is_nil() {
            self.back.push(handle);
            handle = self.tree.right(handle);
        }
    }
}

impl<'a, K, C> Iterator for Iter<'a, K, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front.pop()?;
        self.push_left_spine(self.tree.right(handle));
        self.remaining -= 1;
        Some(self.tree.key(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }
}

impl<'a, K, C> DoubleEndedIterator for Iter<'a, K, C> {
    fn next_back(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.back.pop()?;
        self.push_right_spine(self.tree.left(handle));
        self.remaining -= 1;
        Some(self.tree.key(handle))
    }
}

impl<K, C> ExactSizeIterator for Iter<'_, K, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, C> FusedIterator for Iter<'_, K, C> {}

impl<K, C> Clone for Iter<'_, K, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, C> fmt::Debug for Iter<'_, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}
