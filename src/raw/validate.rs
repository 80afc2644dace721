use crate::comparator::Comparator;
use crate::error::InvariantViolation;
use crate::rbtree::NodeId;

use super::handle::Handle;
use super::node::Node;
use super::raw_rbtree::RawRBTree;

impl<K, C: Comparator<K>> RawRBTree<K, C> {
    /// Checks every red-black and search-tree invariant.
    ///
    /// Returns the black-height of the root (sentinel included in the count) or the
    /// first violation found.
    pub(crate) fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        if *self.node(Handle::NIL) != Node::SENTINEL {
            return Err(if self.color(Handle::NIL).is_red() {
                InvariantViolation::RedSentinel
            } else {
                InvariantViolation::DetachedSentinel
            });
        }

        let root = self.root();
        if root.is_nil() {
            return if self.is_empty() {
                Ok(1)
            } else {
                Err(InvariantViolation::LengthMismatch {
                    reachable: 0,
                    len: self.len(),
                })
            };
        }

        if self.color(root).is_red() {
            return Err(InvariantViolation::RedRoot(NodeId::from_handle(root)));
        }
        if !self.parent(root).is_nil() {
            return Err(InvariantViolation::BrokenLink {
                parent: NodeId::from_handle(Handle::NIL),
                child: NodeId::from_handle(root),
            });
        }

        let mut reachable = 0;
        let black_height = self.check_subtree(root, &mut reachable)?;
        if reachable != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                reachable,
                len: self.len(),
            });
        }

        self.check_order()?;
        Ok(black_height)
    }

    /// Colors, links and black-heights below `node`. Recursion depth is the tree height.
    fn check_subtree(&self, node: Handle, reachable: &mut usize) -> Result<usize, InvariantViolation> {
        if node.is_nil() {
            return Ok(1);
        }
        *reachable += 1;

        let mut heights = [0; 2];
        for (height, child) in heights.iter_mut().zip([self.left(node), self.right(node)]) {
            if child.is_nil() {
                *height = 1;
                continue;
            }
            if self.parent(child) != node {
                return Err(InvariantViolation::BrokenLink {
                    parent: NodeId::from_handle(node),
                    child: NodeId::from_handle(child),
                });
            }
            if self.color(node).is_red() && self.color(child).is_red() {
                return Err(InvariantViolation::RedRedEdge {
                    parent: NodeId::from_handle(node),
                    child: NodeId::from_handle(child),
                });
            }
            *height = self.check_subtree(child, reachable)?;
        }

        let [left, right] = heights;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch {
                node: NodeId::from_handle(node),
                left,
                right,
            });
        }
        Ok(left + usize::from(self.color(node).is_black()))
    }

    /// The in-order walk never steps to a key that orders before the previous one.
    fn check_order(&self) -> Result<(), InvariantViolation> {
        let mut previous = self.first();
        let mut current = self.successor(previous);
        while !current.is_nil() {
            if self.comparator().less(self.key(current), self.key(previous)) {
                return Err(InvariantViolation::OutOfOrder {
                    previous: NodeId::from_handle(previous),
                    node: NodeId::from_handle(current),
                });
            }
            previous = current;
            current = self.successor(current);
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::comparator::NaturalOrder;
    use crate::raw::Color;

    #[test]
    fn empty_tree_has_black_height_one() {
        let tree: RawRBTree<u8, _> = RawRBTree::new(NaturalOrder);
        assert_eq!(tree.check_invariants(), Ok(1));
    }

    #[test]
    fn perfect_tree_black_height() {
        assert_eq!(perfect_tree().check_invariants(), Ok(3));
    }

    fn perfect_tree() -> RawRBTree<i32, NaturalOrder> {
        // 4(2(1, 3), 6(5, 7)): 4, 2 and 6 black, the leaves red.
        let mut tree = RawRBTree::new(NaturalOrder);
        for key in [4, 2, 6, 1, 3, 5, 7] {
            tree.insert(key);
        }
        tree
    }

    #[test]
    fn red_root_is_reported() {
        let mut tree = perfect_tree();
        let root = tree.root();
        tree.paint(root, Color::Red);
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRoot(NodeId::from_handle(root))));
    }

    #[test]
    fn red_sentinel_is_reported() {
        let mut tree = perfect_tree();
        tree.paint(Handle::NIL, Color::Red);
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedSentinel));
    }

    #[test]
    fn red_red_edge_is_reported() {
        let mut tree = perfect_tree();
        let two = tree.search(&2);
        let one = tree.search(&1);
        tree.paint(two, Color::Red);
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::RedRedEdge {
                parent: NodeId::from_handle(two),
                child: NodeId::from_handle(one),
            })
        );
    }

    #[test]
    fn black_height_mismatch_is_reported() {
        let mut tree = perfect_tree();
        let two = tree.search(&2);
        let one = tree.search(&1);
        tree.paint(one, Color::Black);
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::BlackHeightMismatch {
                node: NodeId::from_handle(two),
                left: 2,
                right: 1,
            })
        );
    }

    #[test]
    fn reversed_comparator_breaks_order() {
        let tree = perfect_tree().with_comparator(|a: &i32, b: &i32| a > b);
        assert!(matches!(tree.check_invariants(), Err(InvariantViolation::OutOfOrder { .. })));
    }
}
