use std::iter::FusedIterator;
use std::mem::ManuallyDrop;
use std::ptr;

use crate::DynamicArray;
use crate::raw::RawBlock;

/// Owning iterator over the elements of a [`DynamicArray`].
///
/// Takes over the array's storage block. Elements not yet yielded are
/// dropped, and the block released, when the iterator is dropped.
pub struct IntoIter<T> {
    buf: RawBlock<T>,
    // live range is [head, tail)
    head: usize,
    tail: usize,
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        // The iterator becomes the owner of the block and of the elements in
        // it, so the array's own Drop must not run.
        let array = ManuallyDrop::new(self);
        // SAFETY: the block is read out exactly once and the source is never
        // dropped.
        let buf = unsafe { ptr::read(&array.buf) };
        IntoIter {
            buf,
            head: 0,
            tail: array.len,
        }
    }
}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [head, tail) is initialized and still owned by the iterator.
        unsafe { std::slice::from_raw_parts(self.buf.as_ptr().add(self.head), self.tail - self.head) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        // SAFETY: head is inside the initialized range and is advanced past
        // immediately, so the slot is read once.
        let value = unsafe { ptr::read(self.buf.as_ptr().add(self.head)) };
        self.head += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tail - self.head;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        // SAFETY: tail now indexes the last initialized slot, which leaves
        // the live range.
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.tail)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: only the unconsumed range is still initialized.
        unsafe {
            let rest = ptr::slice_from_raw_parts_mut(self.buf.as_ptr().add(self.head), self.tail - self.head);
            ptr::drop_in_place(rest);
        }
    }
}
