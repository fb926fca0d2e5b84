//! Fixed-capacity leaf storage.
//!
//! A block owns a buffer allocated once at its capacity. The buffer's length
//! is the block's fill count: slots `[0, len)` are live, everything past that
//! is unused capacity. Insertions never push a block past its capacity, so a
//! block made by `new` is never reallocated. Blocks decoded from a snapshot
//! start smaller and grow up to their capacity as elements arrive.

/// A fixed-capacity run of consecutive list elements.
#[derive(Debug)]
pub(crate) struct Block<T> {
    /// Live elements. `items.len()` is the fill count.
    items: Vec<T>,
    /// Maximum fill count.
    capacity: usize,
}

impl<T> Block<T> {
    pub(crate) fn new(capacity: usize) -> Block<T> {
        return Block {
            items: Vec::with_capacity(capacity),
            capacity,
        };
    }

    /// A block that holds up to `capacity` elements but only reserves room
    /// for `hint` of them up front.
    pub(crate) fn with_len_hint(capacity: usize, hint: usize) -> Block<T> {
        return Block {
            items: Vec::with_capacity(hint.min(capacity)),
            capacity,
        };
    }

    /// Number of live elements.
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        return self.items.len();
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        return self.items.is_empty();
    }

    #[inline(always)]
    pub(crate) fn is_full(&self) -> bool {
        return self.items.len() >= self.capacity;
    }

    #[inline]
    pub(crate) fn get(&self, offset: usize) -> Option<&T> {
        return self.items.get(offset);
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        return self.items.get_mut(offset);
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        return &self.items;
    }

    pub(crate) fn push(&mut self, item: T) {
        debug_assert!(!self.is_full(), "push into a full block");
        self.items.push(item);
    }

    /// Shift `[offset, len)` right by one slot and write `item` at `offset`.
    pub(crate) fn insert(&mut self, offset: usize, item: T) {
        debug_assert!(!self.is_full(), "insert into a full block");
        self.items.insert(offset, item);
    }

    /// Remove the element at `offset`, closing the gap.
    pub(crate) fn remove(&mut self, offset: usize) -> T {
        return self.items.remove(offset);
    }

    /// Move `[offset, len)` into the front of `other`, which must be empty.
    /// Afterwards this block holds `offset` elements and `other` holds the rest.
    pub(crate) fn split_into(&mut self, offset: usize, other: &mut Block<T>) {
        debug_assert!(other.is_empty());
        debug_assert!(other.capacity >= self.len() - offset);
        other.items.extend(self.items.drain(offset..));
    }

    /// Keep only the elements matching `keep`. Returns how many were dropped.
    pub(crate) fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| keep(item));
        return before - self.items.len();
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, T> {
        return self.items.iter();
    }

    pub(crate) fn into_items(self) -> std::vec::IntoIter<T> {
        return self.items.into_iter();
    }
}

impl<T: Clone> Clone for Block<T> {
    // Vec::clone trims capacity to the fill count; keep the full block.
    fn clone(&self) -> Self {
        let mut items = Vec::with_capacity(self.capacity);
        items.extend_from_slice(&self.items);
        return Block {
            items,
            capacity: self.capacity,
        };
    }
}
