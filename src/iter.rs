//! Plain iterators over a block list.
//!
//! These borrow or consume the list, so the borrow checker already rules out
//! mutation while they are alive. Use a [`Cursor`](crate::Cursor) when the
//! list has to change mid-traversal.

use std::iter::FusedIterator;

use crate::block::Block;
use crate::list::BlockList;

/// Borrowing iterator, in list order.
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    blocks: std::slice::Iter<'a, Block<T>>,
    current: std::slice::Iter<'a, T>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(blocks: &'a [Block<T>], len: usize) -> Iter<'a, T> {
        return Iter {
            blocks: blocks.iter(),
            current: Default::default(),
            remaining: len,
        };
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            if let Some(item) = self.current.next() {
                self.remaining -= 1;
                return Some(item);
            }
            self.current = self.blocks.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator, in list order.
#[derive(Debug)]
pub struct IntoIter<T> {
    blocks: std::vec::IntoIter<Block<T>>,
    current: std::vec::IntoIter<T>,
    remaining: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(item) = self.current.next() {
                self.remaining -= 1;
                return Some(item);
            }
            self.current = self.blocks.next()?.into_items();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for BlockList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        return IntoIter {
            blocks: self.blocks.into_iter(),
            current: Default::default(),
            remaining: self.len,
        };
    }
}

impl<'a, T> IntoIterator for &'a BlockList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        return self.iter();
    }
}
