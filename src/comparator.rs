/// A strict less-than predicate over keys.
///
/// Implementations must describe a strict weak ordering: irreflexive, transitive,
/// and with transitive incomparability. Two keys for which neither `less(a, b)` nor
/// `less(b, a)` holds are treated as equivalent. The tree never asks for equality
/// any other way.
///
/// Any `Fn(&K, &K) -> bool` closure is a comparator.
///
/// # Examples
///
/// ```
/// use redblack_tree::RBTree;
///
/// let mut tree = RBTree::with_comparator(|a: &i32, b: &i32| a.abs() < b.abs());
/// tree.insert(-3);
/// tree.insert(2);
/// tree.insert(1);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, -3]);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Returns `true` if `a` orders strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;

    /// Returns `true` if neither key orders before the other.
    #[inline]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

/// The comparator used by [`RBTree::new`](crate::RBTree::new): the key's own [`Ord`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NaturalOrder;

impl<K: ?Sized + Ord> Comparator<K> for NaturalOrder {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }

    #[inline]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// Flips another comparator.
///
/// # Examples
///
/// ```
/// use redblack_tree::{NaturalOrder, RBTree, Reverse};
///
/// let mut tree = RBTree::with_comparator(Reverse(NaturalOrder));
/// tree.insert(1);
/// tree.insert(3);
/// tree.insert(2);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reverse<C>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reverse<C> {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self.0.less(b, a)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn closure_is_a_comparator() {
        let by_len = |a: &&str, b: &&str| a.len() < b.len();
        assert!(by_len.less(&"ab", &"abc"));
        assert!(by_len.equivalent(&"ab", &"xy"));
    }

    proptest! {
        #[test]
        fn natural_order_matches_ord(a: i64, b: i64) {
            prop_assert_eq!(NaturalOrder.less(&a, &b), a < b);
            prop_assert_eq!(Comparator::<i64>::equivalent(&NaturalOrder, &a, &b), a == b);
        }

        #[test]
        fn reverse_swaps_arguments(a: i64, b: i64) {
            prop_assert_eq!(Reverse(NaturalOrder).less(&a, &b), b < a);
            prop_assert_eq!(Reverse(NaturalOrder).equivalent(&a, &b), a == b);
        }
    }
}
