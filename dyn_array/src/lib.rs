//! A contiguous, growable array with a doubling/halving capacity policy.
//!
//! [`DynamicArray`] owns exactly one storage block at a time. Appending to a
//! full array doubles the capacity; removing the last element halves it as
//! soon as fewer than half of the slots are in use. Every resize allocates a
//! fresh block, moves the live elements over in order and only then releases
//! the old block, so a failed allocation never leaves the array half-moved.

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice;

use tracing::{debug, trace};

mod error;
mod iter;
mod raw;

pub use error::{AllocError, Error, PushError};
pub use iter::IntoIter;

use raw::RawBlock;

/// Capacity of an array built with [`DynamicArray::new`].
pub const DEFAULT_CAPACITY: usize = 20;

/// A growable array backed by a single heap block.
///
/// Slots `[0, len)` are initialized, slots `[len, capacity)` are not and are
/// never exposed.
pub struct DynamicArray<T> {
    buf: RawBlock<T>,
    len: usize,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array with room for [`DEFAULT_CAPACITY`] elements.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array with room for exactly `capacity` elements.
    ///
    /// A capacity of 0 is allowed; the first push then grows to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBlock::allocate(capacity),
            len: 0,
        }
    }

    /// Number of live elements.
    pub fn size(&self) -> usize {
        self.len
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of slots in the current storage block.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value`, doubling the capacity first if the array is full.
    ///
    /// # Panics
    ///
    /// Panics if the doubled capacity overflows. Allocation failure aborts
    /// through [`std::alloc::handle_alloc_error`].
    pub fn push_back(&mut self, value: T) {
        if let Err(err) = self.reserve_one() {
            err.raise();
        }
        self.write_last(value);
    }

    /// Like [`push_back`](Self::push_back), but reports allocation failure
    /// instead of aborting. On error the array is unchanged and `value` is
    /// returned inside the error.
    pub fn try_push_back(&mut self, value: T) -> Result<(), PushError<T>> {
        match self.reserve_one() {
            Ok(()) => {
                self.write_last(value);
                Ok(())
            }
            Err(error) => Err(PushError { error, value }),
        }
    }

    /// Removes and returns the last element.
    ///
    /// Once fewer than half of the slots are in use the storage is halved.
    /// Returns [`Error::Empty`] without touching the array if it is empty.
    pub fn pop_back(&mut self) -> Result<T, Error> {
        if self.len == 0 {
            return Err(Error::Empty);
        }

        self.len -= 1;
        // SAFETY: the slot at the old last index is initialized and, with len
        // decremented, no longer reachable through the array.
        let value = unsafe { ptr::read(self.buf.as_ptr().add(self.len)) };

        let half = self.capacity() / 2;
        if self.len < half {
            debug!(from = self.capacity(), to = half, len = self.len, "shrinking storage");
            if let Err(err) = self.relocate(half) {
                err.raise();
            }
        }
        Ok(value)
    }

    /// Borrows the element at `index`.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        if index < self.len {
            // SAFETY: index is within the initialized prefix.
            Ok(unsafe { &*self.buf.as_ptr().add(index) })
        } else {
            Err(Error::OutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Mutably borrows the element at `index`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        if index < self.len {
            // SAFETY: index is within the initialized prefix and we hold &mut self.
            Ok(unsafe { &mut *self.buf.as_ptr().add(index) })
        } else {
            Err(Error::OutOfRange {
                index,
                len: self.len,
            })
        }
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first len slots are initialized; the pointer is non-null
        // and aligned even for an empty or zero-capacity block.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in as_slice, plus exclusive access through &mut self.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Makes room for one more element.
    fn reserve_one(&mut self) -> Result<(), AllocError> {
        let cap = self.capacity();
        if self.len < cap {
            return Ok(());
        }
        let new_cap = cap.checked_mul(2).ok_or(AllocError::CapacityOverflow)?.max(1);
        debug!(from = cap, to = new_cap, len = self.len, "growing storage");
        self.relocate(new_cap)
    }

    fn write_last(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        // SAFETY: reserve_one guaranteed a free slot at len.
        unsafe { ptr::write(self.buf.as_ptr().add(self.len), value) };
        self.len += 1;
    }

    /// Moves the live elements into a fresh block of `new_cap` slots and
    /// releases the old one. The old block is untouched if allocation fails.
    fn relocate(&mut self, new_cap: usize) -> Result<(), AllocError> {
        debug_assert!(new_cap >= self.len);
        let fresh = RawBlock::try_allocate(new_cap)?;
        // SAFETY: both blocks have at least len slots and are distinct
        // allocations. The elements are moved bitwise; the old block is
        // released without dropping them.
        unsafe { ptr::copy_nonoverlapping(self.buf.as_ptr(), fresh.as_ptr(), self.len) };
        let old = mem::replace(&mut self.buf, fresh);
        trace!(released = old.capacity(), moved = self.len, "relocated elements");
        drop(old);
        Ok(())
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: drops exactly the initialized prefix; the block itself is
        // released by RawBlock's Drop afterwards.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) };
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.capacity());
        for item in self.iter() {
            copy.push_back(item.clone());
        }
        copy
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests;
