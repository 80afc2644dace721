use alloc::vec::Vec;

use super::handle::Handle;

/// Append-only storage for tree nodes or keys.
///
/// A tree owns two arenas that grow in lockstep: links, whose slot 0 holds the
/// sentinel, and keys, which start at the first real node. Nothing is released
/// until the tree itself is dropped.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<T>,
}

impl<T> Arena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Stores `element` in the next slot and returns its handle.
    pub(crate) fn push(&mut self, element: T) -> Handle {
        let index = self.slots.len();
        assert!(index <= Handle::MAX, "`Arena::push()` - no handle left for slot {index}!");
        self.slots.push(element);
        Handle::at(index)
    }

    #[inline]
    pub(crate) fn slot(&self, index: usize) -> &T {
        self.slots.get(index).expect("`Arena::slot()` - `index` is out of bounds!")
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slot(handle.slot())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots.get_mut(handle.slot()).expect("`Arena::get_mut()` - `handle` is out of bounds!")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    #[test]
    fn preallocates() {
        let arena: Arena<u8> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn slots_are_dense() {
        let mut arena = Arena::with_capacity(0);
        for (index, c) in ['a', 'b', 'c'].into_iter().enumerate() {
            assert_eq!(arena.push(c).slot(), index);
        }
        assert_eq!(arena.len(), 3);
        assert_eq!(*arena.slot(1), 'b');
    }

    #[test]
    #[should_panic(expected = "`Arena::slot()` - `index` is out of bounds!")]
    fn handle_past_the_end() {
        let mut arena = Arena::with_capacity(1);
        arena.push(1u8);
        let _ = arena.get(Handle::at(1));
    }

    #[test]
    #[should_panic(expected = "`Arena::push()` - no handle left")]
    fn full_arena() {
        let mut arena = Arena::with_capacity(Handle::MAX + 1);
        for _ in 0..=Handle::MAX {
            arena.push(());
        }
        arena.push(());
    }

    proptest! {
        // Links and keys stay one slot apart however they are written.
        #[test]
        fn links_and_keys_stay_aligned(keys in prop::collection::vec(any::<i32>(), 0..200), edits in prop::collection::vec((any::<usize>(), any::<u16>()), 0..50)) {
            let mut links: Arena<u16> = Arena::with_capacity(keys.len() + 1);
            let mut stored: Arena<i32> = Arena::with_capacity(keys.len());
            links.push(0);

            for &key in &keys {
                let link = links.push(0);
                let slot = stored.push(key);
                prop_assert_eq!(link.key_slot(), slot.slot());
            }

            let mut model: Vec<u16> = alloc::vec![0; keys.len() + 1];
            for (which, value) in edits {
                let index = which % model.len();
                *links.get_mut(Handle::at(index)) = value;
                model[index] = value;
            }

            prop_assert_eq!(links.len(), stored.len() + 1);
            for (index, &value) in model.iter().enumerate() {
                prop_assert_eq!(*links.slot(index), value);
            }
            for (index, &key) in keys.iter().enumerate() {
                let link = Handle::at(index + 1);
                prop_assert_eq!(*stored.slot(link.key_slot()), key);
            }
        }
    }
}
