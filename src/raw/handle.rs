#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Position of a node in the tree's link arena.
///
/// Every link is a `Handle`, absent children included: they point at slot 0, the
/// sentinel, so there is no `Option` anywhere in the node graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(RawHandle);

impl Handle {
    /// The largest slot a handle can name.
    pub(crate) const MAX: usize = RawHandle::MAX as usize - 1;
    pub(crate) const NIL: Self = Self(0);

    #[inline]
    pub(crate) const fn at(slot: usize) -> Self {
        assert!(slot <= Self::MAX, "`Handle::at()` - `slot` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        Self(slot as RawHandle)
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) const fn is_nil(self) -> bool {
        self.0 == 0
    }

    /// Slot of this node's key in the key arena, which has no sentinel entry.
    #[inline]
    pub(crate) const fn key_slot(self) -> usize {
        assert!(!self.is_nil(), "`Handle::key_slot()` - the sentinel has no key!");
        self.slot() - 1
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::{assert_eq_size, const_assert};

    assert_eq_size!(Handle, RawHandle);
    const_assert!(Handle::MAX < RawHandle::MAX as usize);

    #[test]
    #[should_panic(expected = "`Handle::at()` - `slot` > `Handle::MAX`!")]
    fn slot_past_max() {
        let _ = Handle::at(Handle::MAX + 1);
    }

    #[test]
    #[should_panic(expected = "`Handle::key_slot()` - the sentinel has no key!")]
    fn sentinel_has_no_key_slot() {
        let _ = Handle::NIL.key_slot();
    }

    #[test]
    fn nil_is_slot_zero() {
        assert_eq!(Handle::NIL.slot(), 0);
        assert_eq!(Handle::at(0), Handle::NIL);
        assert!(!Handle::at(1).is_nil());
        assert_eq!(Handle::at(1).key_slot(), 0);
    }

    proptest! {
        #[test]
        fn key_slot_trails_by_one(slot in 1..=Handle::MAX) {
            let handle = Handle::at(slot);
            prop_assert_eq!(handle.slot(), slot);
            prop_assert_eq!(handle.key_slot() + 1, slot);
        }
    }
}
