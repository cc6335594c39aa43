use std::iter::{Enumerate, FusedIterator};
use std::slice;

use crate::Slot;
use crate::pool::NULL_INDEX;

/// Iterator over `(index, &item)` pairs of an [`IndexPool`][crate::IndexPool].
///
/// Walks the backing region in ascending index order, skipping free slots and the
/// reserved slot 0. Double-ended and exact-size. Created by
/// [`IndexPool::iter()`][crate::IndexPool::iter].
#[derive(Debug)]
pub struct Iter<'p, T> {
    slots: Enumerate<slice::Iter<'p, Slot<T>>>,

    /// Live items not yet yielded from either end.
    remaining: usize,
}

impl<'p, T> Iter<'p, T> {
    pub(crate) fn new(slots: &'p [Slot<T>], len: usize) -> Self {
        Self {
            slots: slots.iter().enumerate(),
            remaining: len,
        }
    }
}

impl<'p, T> Iterator for Iter<'p, T> {
    type Item = (usize, &'p T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, slot) = self.slots.next()?;

            if index == NULL_INDEX {
                continue;
            }

            if let Slot::Used(value) = slot {
                self.remaining = self
                    .remaining
                    .checked_sub(1)
                    .expect("the pool's length counts every used non-reserved slot");
                return Some((index, value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            let (index, slot) = self.slots.next_back()?;

            if index == NULL_INDEX {
                continue;
            }

            if let Slot::Used(value) = slot {
                self.remaining = self
                    .remaining
                    .checked_sub(1)
                    .expect("the pool's length counts every used non-reserved slot");
                return Some((index, value));
            }
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator over `(index, &mut item)` pairs of an [`IndexPool`][crate::IndexPool].
///
/// The mutable counterpart of [`Iter`]. Created by
/// [`IndexPool::iter_mut()`][crate::IndexPool::iter_mut].
#[derive(Debug)]
pub struct IterMut<'p, T> {
    slots: Enumerate<slice::IterMut<'p, Slot<T>>>,

    remaining: usize,
}

impl<'p, T> IterMut<'p, T> {
    pub(crate) fn new(slots: &'p mut [Slot<T>], len: usize) -> Self {
        Self {
            slots: slots.iter_mut().enumerate(),
            remaining: len,
        }
    }
}

impl<'p, T> Iterator for IterMut<'p, T> {
    type Item = (usize, &'p mut T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, slot) = self.slots.next()?;

            if index == NULL_INDEX {
                continue;
            }

            if let Slot::Used(value) = slot {
                self.remaining = self
                    .remaining
                    .checked_sub(1)
                    .expect("the pool's length counts every used non-reserved slot");
                return Some((index, value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            let (index, slot) = self.slots.next_back()?;

            if index == NULL_INDEX {
                continue;
            }

            if let Slot::Used(value) = slot {
                self.remaining = self
                    .remaining
                    .checked_sub(1)
                    .expect("the pool's length counts every used non-reserved slot");
                return Some((index, value));
            }
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}
