use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::AllocError;

/// One heap allocation with room for `cap` values of `T`.
///
/// The block only allocates and releases memory. It never reads, writes or
/// drops elements; the owner tracks which slots are initialized.
pub(crate) struct RawBlock<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// SAFETY: the block is a uniquely owned allocation, like Box<[T]>.
unsafe impl<T: Send> Send for RawBlock<T> {}
// SAFETY: shared access to the block only ever hands out &T.
unsafe impl<T: Sync> Sync for RawBlock<T> {}

impl<T> RawBlock<T> {
    /// Allocates a block for `cap` elements.
    ///
    /// Zero-slot blocks and zero-sized `T` use a dangling pointer and touch
    /// no allocator.
    pub(crate) fn try_allocate(cap: usize) -> Result<Self, AllocError> {
        let layout = Layout::array::<T>(cap).map_err(|_| AllocError::CapacityOverflow)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
                _marker: PhantomData,
            });
        }

        // SAFETY: layout has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) };
        match NonNull::new(ptr.cast::<T>()) {
            Some(ptr) => Ok(Self {
                ptr,
                cap,
                _marker: PhantomData,
            }),
            None => Err(AllocError::OutOfMemory { layout }),
        }
    }

    pub(crate) fn allocate(cap: usize) -> Self {
        Self::try_allocate(cap).unwrap_or_else(|err| err.raise())
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T> Drop for RawBlock<T> {
    fn drop(&mut self) {
        // The layout was valid when the block was created, so this only
        // filters out the blocks that never allocated.
        if let Ok(layout) = Layout::array::<T>(self.cap) {
            if layout.size() != 0 {
                // SAFETY: ptr came from alloc::alloc with this exact layout.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
            }
        }
    }
}
