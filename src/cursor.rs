//! Change-tracked traversal.
//!
//! A [`Cursor`] is detached from the list it walks: every call borrows the
//! list only for its own duration, so the list may be mutated between calls.
//! The cursor remembers the list's revision when it was created and checks it
//! before doing anything else. Any structural change made behind its back
//! makes every later call fail with [`Error::ConcurrentModification`].
//! Removals made through the cursor itself keep it valid.

use crate::error::Error;
use crate::error::Result;
use crate::list::BlockList;

/// A forward-only, fail-fast position in a [`BlockList`].
///
/// ```
/// use blocklist::BlockList;
///
/// let mut list: BlockList<u32> = (0..10).collect();
/// let mut cursor = list.cursor();
/// while let Some(&item) = cursor.next(&list).unwrap() {
///     if item % 2 == 1 {
///         cursor.remove(&mut list).unwrap();
///     }
/// }
/// assert_eq!(list.to_vec(), vec![0, 2, 4, 6, 8]);
/// ```
#[derive(Clone, Debug)]
pub struct Cursor {
    /// Index of the next element to yield.
    position: usize,
    /// Revision the list must still have.
    revision: u64,
    /// Index of the element last yielded, until it is removed.
    last: Option<usize>,
}

impl Cursor {
    pub(crate) fn new(revision: u64) -> Cursor {
        return Cursor {
            position: 0,
            revision,
            last: None,
        };
    }

    /// Index of the next element to yield.
    pub fn position(&self) -> usize {
        return self.position;
    }

    fn check<T>(&self, list: &BlockList<T>) -> Result<()> {
        if list.revision() != self.revision {
            return Err(Error::ConcurrentModification {
                expected: self.revision,
                found: list.revision(),
            });
        }
        return Ok(());
    }

    pub fn has_next<T>(&self, list: &BlockList<T>) -> Result<bool> {
        self.check(list)?;
        return Ok(self.position < list.len());
    }

    /// Yield the next element, or None once the end is reached.
    pub fn next<'a, T>(&mut self, list: &'a BlockList<T>) -> Result<Option<&'a T>> {
        self.check(list)?;
        if self.position >= list.len() {
            return Ok(None);
        }
        let item = list.get(self.position)?;
        self.last = Some(self.position);
        self.position += 1;
        return Ok(Some(item));
    }

    /// Remove the element most recently yielded by [`next`](Cursor::next).
    ///
    /// The element after it moves into the vacated position, so the next call
    /// to `next` yields it.
    pub fn remove<T>(&mut self, list: &mut BlockList<T>) -> Result<T> {
        self.check(list)?;
        let index = self.last.take().ok_or(Error::NoCurrentElement)?;
        let item = list.remove(index)?;
        self.position = index;
        self.revision = list.revision();
        return Ok(item);
    }
}
