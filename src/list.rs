//! Block List
//!
//! An ordered list whose elements live in a sequence of fixed-capacity blocks.
//! The block index (`blocks`) is a Vec of owned blocks, so reordering it only
//! moves block headers; element storage stays where it was allocated.
//!
//! Structure:
//! - Every live block holds between 1 and `block_size` elements. The only
//!   exception is a single empty block when the whole list is empty.
//! - Concatenating the live elements of `blocks` in order yields the list.
//! - `len` is the sum of all block fill counts.
//! - Blocks drained by removal are kept in `spare` and handed back out when
//!   more capacity is needed.
//!
//! Operations:
//! - get/set: O(blocks) scan from whichever end is closer
//! - insert/remove: O(blocks) scan + O(block_size) shift, possibly one split
//! - push: O(1) amortized

use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::ops::Index;
use std::ops::IndexMut;
use std::ops::Range;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use crate::block::Block;
use crate::config::BlockListConfig;
use crate::cursor::Cursor;
use crate::error::Error;
use crate::error::Result;
use crate::iter::Iter;

/// A resolved element location: which block, and where inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Position {
    pub(crate) block: usize,
    pub(crate) offset: usize,
}

/// An ordered list stored as a sequence of fixed-capacity blocks.
///
/// Inserting or removing in the middle touches at most two blocks plus the
/// block index, never the whole element set, and growing never reallocates
/// existing elements.
///
/// The list is single-owner and not synchronized. Structural changes bump a
/// revision counter that [`Cursor`]s use to detect modification behind their
/// back.
pub struct BlockList<T> {
    /// Live blocks in list order.
    pub(crate) blocks: Vec<Block<T>>,
    /// Empty blocks waiting to be reused by `grow` or `split_block`.
    pub(crate) spare: Vec<Block<T>>,
    /// Capacity of every block.
    pub(crate) block_size: usize,
    /// Configured block count, also the cap on `spare`.
    pub(crate) initial_blocks: usize,
    /// Total number of elements.
    pub(crate) len: usize,
    /// Bumped on every structural change.
    pub(crate) revision: u64,
}

impl<T> BlockList<T> {
    /// Create an empty list with one block of 32 elements.
    pub fn new() -> BlockList<T> {
        return BlockList::from_valid_config(BlockListConfig::default());
    }

    /// Create an empty list whose blocks hold `block_size` elements.
    pub fn with_block_size(block_size: usize) -> Result<BlockList<T>> {
        return BlockList::with_config(BlockListConfig::default().with_block_size(block_size));
    }

    pub fn with_config(config: BlockListConfig) -> Result<BlockList<T>> {
        config.validate()?;
        return Ok(BlockList::from_valid_config(config));
    }

    pub(crate) fn from_valid_config(config: BlockListConfig) -> BlockList<T> {
        let spare = (1..config.initial_blocks)
            .map(|_| Block::new(config.block_size))
            .collect();
        return BlockList {
            blocks: vec![Block::new(config.block_size)],
            spare,
            block_size: config.block_size,
            initial_blocks: config.initial_blocks,
            len: 0,
            revision: 0,
        };
    }

    /// The configuration this list was created with.
    pub fn config(&self) -> BlockListConfig {
        return BlockListConfig::new(self.initial_blocks, self.block_size);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        return self.len;
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    #[inline(always)]
    pub fn block_size(&self) -> usize {
        return self.block_size;
    }

    /// Number of blocks currently holding the list's elements.
    pub fn block_count(&self) -> usize {
        return self.blocks.len();
    }

    /// Fill count of each live block, in list order.
    pub fn block_lens(&self) -> impl Iterator<Item = usize> + '_ {
        return self.blocks.iter().map(|block| block.len());
    }

    /// Structural revision. Changes on every insert, removal, and clear, but
    /// not on `set`.
    #[inline(always)]
    pub fn revision(&self) -> u64 {
        return self.revision;
    }

    // =========================================================================
    // Position resolution
    // =========================================================================

    /// Map a list index to the block holding it.
    ///
    /// The scan runs forward from the first block when `index` is in the
    /// lower half of the list and backward from the last block otherwise.
    ///
    /// With `for_insert` set, `index == len` is accepted as well, and a block
    /// whose end lands exactly on `index` is accepted when it still has room,
    /// so that insertions fill under-full blocks before forcing a split.
    /// Returns None when no existing block can take the position; for
    /// insertions this means the list must grow.
    pub(crate) fn find_block(&self, index: usize, for_insert: bool) -> Option<Position> {
        if index < self.len / 2 {
            let mut start = 0;
            for (b, block) in self.blocks.iter().enumerate() {
                let end = start + block.len();
                if index < end || (for_insert && index == end && !block.is_full()) {
                    return Some(Position {
                        block: b,
                        offset: index - start,
                    });
                }
                start = end;
            }
        } else {
            let mut end = self.len;
            for (b, block) in self.blocks.iter().enumerate().rev() {
                let start = end - block.len();
                if (index >= start && index < end)
                    || (for_insert && index == end && !block.is_full())
                {
                    return Some(Position {
                        block: b,
                        offset: index - start,
                    });
                }
                end = start;
            }
        }
        return None;
    }

    fn resolve(&self, index: usize) -> Result<Position> {
        return self.find_block(index, false).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.len,
        });
    }

    // =========================================================================
    // Capacity management
    // =========================================================================

    /// Take an empty block from the spare pool, or allocate one.
    fn take_block(&mut self) -> Block<T> {
        if let Some(block) = self.spare.pop() {
            return block;
        }
        return Block::new(self.block_size);
    }

    /// Append an empty block to the end of the block index.
    pub(crate) fn grow(&mut self) {
        let block = self.take_block();
        self.blocks.push(block);
        trace!(blocks = self.blocks.len(), "grew block index");
    }

    /// Split the full block at `block_idx` so that `offset` has room.
    ///
    /// Elements `[offset, len)` move into a new block inserted right after it.
    /// Cost is bounded by the block size, not the list size.
    pub(crate) fn split_block(&mut self, block_idx: usize, offset: usize) {
        debug_assert!(offset < self.blocks[block_idx].len());
        let mut right = self.take_block();
        self.blocks[block_idx].split_into(offset, &mut right);
        self.blocks.insert(block_idx + 1, right);
        trace!(block = block_idx, offset, blocks = self.blocks.len(), "split block");
    }

    /// Excise the empty block at `block_idx` from the block index.
    ///
    /// The last remaining block is kept so an empty list still has somewhere
    /// to put its first element.
    fn recycle_block(&mut self, block_idx: usize) {
        debug_assert!(self.blocks[block_idx].is_empty());
        if self.blocks.len() == 1 {
            return;
        }
        let block = self.blocks.remove(block_idx);
        if self.spare.len() < self.initial_blocks {
            self.spare.push(block);
        }
        trace!(block = block_idx, blocks = self.blocks.len(), "recycled empty block");
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn get(&self, index: usize) -> Result<&T> {
        let pos = self.resolve(index)?;
        return Ok(&self.blocks[pos.block].as_slice()[pos.offset]);
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let pos = self.resolve(index)?;
        let len = self.len;
        return self.blocks[pos.block]
            .get_mut(pos.offset)
            .ok_or(Error::IndexOutOfBounds { index, len });
    }

    pub fn first(&self) -> Option<&T> {
        return self.blocks.first().and_then(|block| block.get(0));
    }

    pub fn last(&self) -> Option<&T> {
        let block = self.blocks.iter().rev().find(|block| !block.is_empty())?;
        return block.get(block.len() - 1);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        return Iter::new(&self.blocks, self.len);
    }

    /// Start a change-tracked traversal. See [`Cursor`].
    pub fn cursor(&self) -> Cursor {
        return Cursor::new(self.revision);
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Replace the element at `index`, returning the old one.
    ///
    /// This is not a structural change: the revision stays the same and open
    /// cursors remain valid.
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        return Ok(std::mem::replace(slot, item));
    }

    /// Append an element to the end of the list.
    pub fn push(&mut self, item: T) {
        // The last block is the only candidate for an append: either it has
        // room, or a fresh block goes after it.
        if self.blocks.last().is_none_or(|block| block.is_full()) {
            self.grow();
        }
        if let Some(block) = self.blocks.last_mut() {
            block.push(item);
        }
        self.len += 1;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Insert an element at `index`, shifting everything after it right.
    ///
    /// Fails when `index > len`.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.len {
            return Err(Error::InsertOutOfBounds {
                index,
                len: self.len,
            });
        }

        let mut pos = match self.find_block(index, true) {
            Some(pos) => pos,
            None => {
                self.grow();
                Position {
                    block: self.blocks.len() - 1,
                    offset: 0,
                }
            }
        };

        // Landing on the start of a full block: extend the previous block
        // instead when it has room.
        if pos.offset == 0 && pos.block > 0 && self.blocks[pos.block].is_full() {
            let prev = &self.blocks[pos.block - 1];
            if !prev.is_full() {
                pos = Position {
                    block: pos.block - 1,
                    offset: prev.len(),
                };
            }
        }

        if self.blocks[pos.block].is_full() {
            self.split_block(pos.block, pos.offset);
        }
        self.blocks[pos.block].insert(pos.offset, item);
        self.len += 1;
        self.revision = self.revision.wrapping_add(1);
        return Ok(());
    }

    /// Insert every element of `items` starting at `index`, keeping their order.
    ///
    /// Fails before inserting anything when `index > len`.
    pub fn insert_all<I>(&mut self, index: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        if index > self.len {
            return Err(Error::InsertOutOfBounds {
                index,
                len: self.len,
            });
        }
        for (i, item) in items.into_iter().enumerate() {
            self.insert(index + i, item)?;
        }
        return Ok(());
    }

    /// Remove and return the element at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let pos = self.resolve(index)?;
        return Ok(self.remove_at(pos));
    }

    pub(crate) fn remove_at(&mut self, pos: Position) -> T {
        let item = self.blocks[pos.block].remove(pos.offset);
        if self.blocks[pos.block].is_empty() {
            self.recycle_block(pos.block);
        }
        self.len -= 1;
        self.revision = self.revision.wrapping_add(1);
        return item;
    }

    /// Keep only the elements for which `keep` returns true, preserving order.
    /// Returns whether anything was removed.
    pub fn retain<F>(&mut self, mut keep: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        let mut emptied: SmallVec<[usize; 8]> = SmallVec::new();
        for (b, block) in self.blocks.iter_mut().enumerate() {
            removed += block.retain(&mut keep);
            if block.is_empty() {
                emptied.push(b);
            }
        }
        if removed == 0 {
            return false;
        }

        // Back to front so earlier indices stay valid.
        for &b in emptied.iter().rev() {
            self.recycle_block(b);
        }
        self.len -= removed;
        self.revision = self.revision.wrapping_add(1);
        return true;
    }

    /// Reset to the freshly constructed configuration.
    pub fn clear(&mut self) {
        let revision = self.revision.wrapping_add(1);
        *self = BlockList::from_valid_config(self.config());
        self.revision = revision;
    }

    // =========================================================================
    // Unsupported
    // =========================================================================

    /// Bidirectional positional iteration is not provided.
    pub fn list_cursor(&self, _index: usize) -> Result<Infallible> {
        return Err(Error::Unsupported("list_cursor"));
    }

    /// Sub-range views are not provided.
    pub fn sub_list(&self, _range: Range<usize>) -> Result<Infallible> {
        return Err(Error::Unsupported("sub_list"));
    }
}

impl<T: PartialEq> BlockList<T> {
    fn position_of(&self, item: &T) -> Option<Position> {
        for (b, block) in self.blocks.iter().enumerate() {
            if let Some(offset) = block.iter().position(|x| x == item) {
                return Some(Position { block: b, offset });
            }
        }
        return None;
    }

    pub fn contains(&self, item: &T) -> bool {
        return self.position_of(item).is_some();
    }

    pub fn contains_all(&self, items: &[T]) -> bool {
        return items.iter().all(|item| self.contains(item));
    }

    /// Index of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        let mut start = 0;
        for block in &self.blocks {
            if let Some(offset) = block.iter().position(|x| x == item) {
                return Some(start + offset);
            }
            start += block.len();
        }
        return None;
    }

    /// Index of the last element equal to `item`.
    pub fn last_index_of(&self, item: &T) -> Option<usize> {
        let mut end = self.len;
        for block in self.blocks.iter().rev() {
            let start = end - block.len();
            if let Some(offset) = block.iter().rposition(|x| x == item) {
                return Some(start + offset);
            }
            end = start;
        }
        return None;
    }

    /// Remove the first element equal to `item`. Returns whether one was found.
    pub fn remove_value(&mut self, item: &T) -> bool {
        match self.position_of(item) {
            Some(pos) => {
                self.remove_at(pos);
                return true;
            }
            None => return false,
        }
    }
}

impl<T: Eq + Hash> BlockList<T> {
    /// Remove every element equal to one of `items`. Returns whether the list
    /// changed.
    pub fn remove_all(&mut self, items: &[T]) -> bool {
        if items.is_empty() {
            return false;
        }
        let doomed: FxHashSet<&T> = items.iter().collect();
        return self.retain(|item| !doomed.contains(item));
    }

    /// Remove every element not equal to one of `items`. Returns whether the
    /// list changed.
    pub fn retain_all(&mut self, items: &[T]) -> bool {
        let kept: FxHashSet<&T> = items.iter().collect();
        return self.retain(|item| kept.contains(item));
    }
}

impl<T: Clone> BlockList<T> {
    /// Copy the elements into a flat Vec in list order.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        self.copy_into(&mut out);
        return out;
    }

    /// Replace the contents of `buffer` with the elements in list order,
    /// reusing its allocation when it is large enough.
    pub fn copy_into(&self, buffer: &mut Vec<T>) {
        buffer.clear();
        buffer.reserve(self.len);
        for block in &self.blocks {
            buffer.extend_from_slice(block.as_slice());
        }
    }
}

impl<T> Default for BlockList<T> {
    fn default() -> Self {
        return BlockList::new();
    }
}

impl<T: Clone> Clone for BlockList<T> {
    fn clone(&self) -> Self {
        return BlockList {
            blocks: self.blocks.clone(),
            spare: Vec::new(),
            block_size: self.block_size,
            initial_blocks: self.initial_blocks,
            len: self.len,
            revision: self.revision,
        };
    }
}

impl<T: PartialEq> PartialEq for BlockList<T> {
    fn eq(&self, other: &Self) -> bool {
        return self.len == other.len && self.iter().eq(other.iter());
    }
}

impl<T: Eq> Eq for BlockList<T> {}

impl<T: Hash> Hash for BlockList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BlockList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_list().entries(self.iter()).finish();
    }
}

/// Elements separated by commas, one line per block.
impl<T: fmt::Display> fmt::Display for BlockList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (b, block) in self.blocks.iter().enumerate() {
            if b > 0 {
                f.write_str("\n")?;
            }
            for (i, item) in block.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", item)?;
            }
        }
        return Ok(());
    }
}

impl<T> Index<usize> for BlockList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> IndexMut<usize> for BlockList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(item) => item,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> Extend<T> for BlockList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for BlockList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut list = BlockList::new();
        list.extend(items);
        return list;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_list(block_size: usize, count: usize) -> BlockList<String> {
        let mut list = BlockList::with_block_size(block_size).unwrap();
        for i in 0..count {
            list.push(format!("Hello{}", i));
        }
        return list;
    }

    /// Check the structural invariants of the block index.
    fn check(list: &BlockList<String>) {
        let lens: Vec<usize> = list.block_lens().collect();
        assert_eq!(lens.iter().sum::<usize>(), list.len());
        assert!(lens.iter().all(|&n| n <= list.block_size()));
        if list.is_empty() {
            assert_eq!(lens, vec![0]);
        } else {
            assert!(lens.iter().all(|&n| n > 0), "empty block in {:?}", lens);
        }
    }

    #[test]
    fn empty_list() {
        let list: BlockList<u32> = BlockList::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.block_size(), 32);
        assert_eq!(list.block_count(), 1);
        assert!(list.get(0).is_err());
    }

    #[test]
    fn push_fills_blocks_in_order() {
        let list = hello_list(5, 20);
        assert_eq!(list.block_lens().collect::<Vec<_>>(), vec![5, 5, 5, 5]);
        for i in 0..20 {
            assert_eq!(list.get(i).unwrap(), &format!("Hello{}", i));
        }
        check(&list);
    }

    #[test]
    fn find_block_read_mode() {
        let list = hello_list(5, 20);
        assert_eq!(list.find_block(0, false), Some(Position { block: 0, offset: 0 }));
        assert_eq!(list.find_block(7, false), Some(Position { block: 1, offset: 2 }));
        assert_eq!(list.find_block(14, false), Some(Position { block: 2, offset: 4 }));
        assert_eq!(list.find_block(19, false), Some(Position { block: 3, offset: 4 }));
        assert_eq!(list.find_block(20, false), None);
    }

    #[test]
    fn find_block_insert_mode_full_tail() {
        let list = hello_list(5, 20);
        // Appending past a full last block needs a new block.
        assert_eq!(list.find_block(20, true), None);
        // A boundary after a full block resolves to the start of the next one.
        assert_eq!(list.find_block(5, true), Some(Position { block: 1, offset: 0 }));
    }

    #[test]
    fn find_block_insert_mode_prefers_underfull_block() {
        let mut list = hello_list(5, 20);
        list.remove(2).unwrap();
        // Block 0 now holds 4 and ends at index 4.
        assert_eq!(list.find_block(4, true), Some(Position { block: 0, offset: 4 }));
        assert_eq!(list.find_block(4, false), Some(Position { block: 1, offset: 0 }));
    }

    #[test]
    fn insert_at_block_edges() {
        let mut list = hello_list(5, 20);
        list.insert(14, "InsertA".to_string()).unwrap();
        list.insert(5, "InsertB".to_string()).unwrap();
        list.insert(1, "InsertC".to_string()).unwrap();

        assert_eq!(list.len(), 23);
        assert_eq!(list.get(1).unwrap(), "InsertC");
        assert_eq!(list.get(6).unwrap(), "InsertB");
        assert_eq!(list.get(16).unwrap(), "InsertA");
        check(&list);
    }

    #[test]
    fn split_at_insertion_offset() {
        let mut list = hello_list(5, 5);
        list.insert(2, "X".to_string()).unwrap();
        assert_eq!(list.block_lens().collect::<Vec<_>>(), vec![3, 3]);
        assert_eq!(
            list.iter().cloned().collect::<Vec<_>>(),
            vec!["Hello0", "Hello1", "X", "Hello2", "Hello3", "Hello4"]
        );
    }

    #[test]
    fn insert_at_end_of_full_list_grows() {
        let mut list = hello_list(5, 5);
        list.insert(5, "tail".to_string()).unwrap();
        assert_eq!(list.block_lens().collect::<Vec<_>>(), vec![5, 1]);
        assert_eq!(list.get(5).unwrap(), "tail");
    }

    #[test]
    fn insert_out_of_range() {
        let mut list = hello_list(5, 3);
        let err = list.insert(4, "x".to_string()).unwrap_err();
        assert!(matches!(err, Error::InsertOutOfBounds { index: 4, len: 3 }));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn insert_front_repeatedly() {
        let mut list = BlockList::new();
        for i in 0..70 {
            list.insert(0, i).unwrap();
        }
        assert_eq!(list.len(), 70);
        let items: Vec<_> = list.iter().cloned().collect();
        assert_eq!(items, (0..70).rev().collect::<Vec<_>>());
    }

    #[test]
    fn remove_emptied_block_is_excised() {
        let mut list = hello_list(2, 6);
        assert_eq!(list.block_count(), 3);
        list.remove(2).unwrap();
        list.remove(2).unwrap();
        assert_eq!(list.block_count(), 2);
        assert_eq!(list.spare.len(), 1);
        assert_eq!(list.get(2).unwrap(), "Hello4");
        check(&list);

        // The recycled block is reused on the next growth.
        list.push("more".to_string());
        list.push("more".to_string());
        assert!(list.spare.is_empty());
        check(&list);
    }

    #[test]
    fn remove_everything() {
        let mut list = hello_list(32, 70);
        for _ in 0..70 {
            list.remove(0).unwrap();
        }
        assert!(list.is_empty());
        check(&list);
        for i in 0..70 {
            list.insert(i, format!("Hello{}", i)).unwrap();
        }
        for _ in 0..70 {
            list.remove(list.len() - 1).unwrap();
        }
        assert_eq!(list.len(), 0);
        check(&list);
    }

    #[test]
    fn remove_out_of_range() {
        let mut list = hello_list(5, 3);
        assert!(matches!(
            list.remove(3),
            Err(Error::IndexOutOfBounds { index: 3, len: 3 })
        ));
    }

    #[test]
    fn set_keeps_revision() {
        let mut list = hello_list(5, 10);
        let revision = list.revision();
        let old = list.set(7, "seven".to_string()).unwrap();
        assert_eq!(old, "Hello7");
        assert_eq!(list.get(7).unwrap(), "seven");
        assert_eq!(list.revision(), revision);
        assert!(list.set(10, "nope".to_string()).is_err());
    }

    #[test]
    fn structural_changes_bump_revision() {
        let mut list = hello_list(5, 3);
        let r0 = list.revision();
        list.push("a".to_string());
        let r1 = list.revision();
        assert_ne!(r0, r1);
        list.insert(0, "b".to_string()).unwrap();
        let r2 = list.revision();
        assert_ne!(r1, r2);
        list.remove(0).unwrap();
        let r3 = list.revision();
        assert_ne!(r2, r3);
        list.clear();
        assert_ne!(r3, list.revision());
    }

    #[test]
    fn remove_value_first_occurrence() {
        let mut list: BlockList<u32> = [1, 2, 3, 2, 1].into_iter().collect();
        let revision = list.revision();
        assert!(list.remove_value(&2));
        assert_eq!(list.to_vec(), vec![1, 3, 2, 1]);
        assert!(!list.remove_value(&9));
        assert_ne!(list.revision(), revision);
    }

    #[test]
    fn remove_all_and_retain_all() {
        let mut list = hello_list(32, 70);
        let doomed = ["Hello2".to_string(), "Hello17".to_string()];
        assert!(list.remove_all(&doomed));
        assert_eq!(list.len(), 68);
        assert!(!list.contains(&doomed[0]));
        assert!(!list.contains(&doomed[1]));
        assert!(!list.remove_all(&doomed));
        check(&list);

        let mut list = hello_list(32, 70);
        assert!(list.retain_all(&doomed));
        assert_eq!(list.to_vec(), vec!["Hello2", "Hello17"]);
        check(&list);
    }

    #[test]
    fn retain_across_emptied_blocks() {
        let mut list = hello_list(3, 12);
        // Drop the whole second and fourth blocks plus one from the first.
        let changed = list.retain(|s| !matches!(s.as_str(), "Hello1" | "Hello3" | "Hello4" | "Hello5" | "Hello9" | "Hello10" | "Hello11"));
        assert!(changed);
        assert_eq!(
            list.to_vec(),
            vec!["Hello0", "Hello2", "Hello6", "Hello7", "Hello8"]
        );
        assert_eq!(list.block_lens().collect::<Vec<_>>(), vec![2, 3]);
        check(&list);
    }

    #[test]
    fn retain_nothing_empties_list() {
        let mut list = hello_list(4, 10);
        assert!(list.retain_all(&[]));
        assert!(list.is_empty());
        check(&list);
        assert!(!list.retain(|_| false));
    }

    #[test]
    fn search() {
        let mut list = hello_list(32, 70);
        list.push("Hello2".to_string());
        assert_eq!(list.index_of(&"Hello2".to_string()), Some(2));
        assert_eq!(list.last_index_of(&"Hello2".to_string()), Some(70));
        assert_eq!(list.last_index_of(&"Hello66".to_string()), Some(66));
        assert_eq!(list.last_index_of(&"Hello100".to_string()), None);
        assert!(list.contains(&"Hello69".to_string()));
        assert!(!list.contains(&"foobar".to_string()));
        assert!(list.contains_all(&["Hello0".to_string(), "Hello1".to_string()]));
        assert!(!list.contains_all(&["Hello0".to_string(), "foobar".to_string()]));
    }

    #[test]
    fn none_elements_compare_equal() {
        let a: BlockList<Option<u32>> = [Some(1), None, Some(3)].into_iter().collect();
        let b: BlockList<Option<u32>> = [Some(1), None, Some(3)].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.index_of(&None), Some(1));
        assert!(a.contains(&None));
    }

    #[test]
    fn equality_ignores_block_layout() {
        let mut a = BlockList::with_block_size(2).unwrap();
        let mut b = BlockList::with_block_size(7).unwrap();
        for i in 0..10 {
            a.push(i);
            b.insert(0, 9 - i).unwrap();
        }
        assert_eq!(a, b);
        b.push(10);
        assert_ne!(a, b);
    }

    #[test]
    fn clear_resets_configuration() {
        let config = BlockListConfig::new(3, 4);
        let mut list = BlockList::with_config(config).unwrap();
        for i in 0..20 {
            list.push(i);
        }
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.block_count(), 1);
        assert_eq!(list.spare.len(), 2);
        assert_eq!(list.config(), config);
        list.push(1);
        assert_eq!(list.to_vec(), vec![1]);
    }

    #[test]
    fn initial_blocks_are_reserved() {
        let mut list = BlockList::with_config(BlockListConfig::new(3, 2)).unwrap();
        assert_eq!(list.block_count(), 1);
        for i in 0..6 {
            list.push(i);
        }
        assert_eq!(list.block_count(), 3);
        assert!(list.spare.is_empty());
    }

    #[test]
    fn first_and_last() {
        let mut list = BlockList::with_block_size(2).unwrap();
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        list.extend([1, 2, 3]);
        assert_eq!(list.first(), Some(&1));
        assert_eq!(list.last(), Some(&3));
    }

    #[test]
    fn insert_all_keeps_order() {
        let mut list: BlockList<u32> = (0..10).collect();
        list.insert_all(3, [100, 101, 102]).unwrap();
        assert_eq!(list.to_vec(), vec![0, 1, 2, 100, 101, 102, 3, 4, 5, 6, 7, 8, 9]);
        assert!(list.insert_all(99, [1]).is_err());
        assert_eq!(list.len(), 13);
    }

    #[test]
    fn copy_into_reuses_buffer() {
        let list: BlockList<u32> = (0..70).collect();
        let mut buffer = Vec::with_capacity(100);
        buffer.push(999);
        list.copy_into(&mut buffer);
        assert_eq!(buffer.len(), 70);
        assert!(buffer.capacity() >= 100);
        assert_eq!(buffer, (0..70).collect::<Vec<_>>());
    }

    #[test]
    fn display_one_line_per_block() {
        let list: BlockList<u32> = {
            let mut list = BlockList::with_block_size(3).unwrap();
            list.extend(1..=7);
            list
        };
        assert_eq!(list.to_string(), "1,2,3\n4,5,6\n7");
        assert_eq!(format!("{:?}", list), "[1, 2, 3, 4, 5, 6, 7]");
    }

    #[test]
    fn index_operators() {
        let mut list: BlockList<u32> = (0..40).collect();
        assert_eq!(list[33], 33);
        list[33] = 0;
        assert_eq!(list[33], 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_out_of_range_panics() {
        let list: BlockList<u32> = (0..4).collect();
        let _ = list[4];
    }

    #[test]
    fn unsupported_operations() {
        let list: BlockList<u32> = (0..4).collect();
        assert!(matches!(list.list_cursor(0), Err(Error::Unsupported("list_cursor"))));
        assert!(matches!(list.sub_list(0..2), Err(Error::Unsupported("sub_list"))));
    }

    #[test]
    fn clone_is_deep() {
        let original: BlockList<String> = hello_list(4, 9);
        let mut copy = original.clone();
        copy.set(0, "changed".to_string()).unwrap();
        copy.push("extra".to_string());
        assert_eq!(original.get(0).unwrap(), "Hello0");
        assert_eq!(original.len(), 9);
        assert_eq!(copy.len(), 10);
    }
}
