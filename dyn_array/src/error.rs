use std::alloc::Layout;

use thiserror::Error;

/// Recoverable failures of [`DynamicArray`](crate::DynamicArray) operations.
///
/// Both variants leave the array exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("cannot remove from an empty array")]
    Empty,
}

/// Failure to obtain a storage block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("capacity overflow")]
    CapacityOverflow,
    #[error("memory allocation of {} bytes failed", .layout.size())]
    OutOfMemory { layout: Layout },
}

impl AllocError {
    /// Escalates to the process-level handling used by the infallible paths.
    pub(crate) fn raise(self) -> ! {
        match self {
            AllocError::CapacityOverflow => panic!("capacity overflow"),
            AllocError::OutOfMemory { layout } => std::alloc::handle_alloc_error(layout),
        }
    }
}

/// Returned by [`DynamicArray::try_push_back`](crate::DynamicArray::try_push_back)
/// when the array could not grow. The rejected value is handed back.
#[derive(Debug, Error)]
#[error("could not append: {error}")]
pub struct PushError<T> {
    #[source]
    pub error: AllocError,
    pub value: T,
}

impl<T> PushError<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}
