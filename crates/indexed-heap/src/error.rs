//! Heap Error Types

use thiserror::Error;

/// Errors returned by [`IndexedHeap`](crate::IndexedHeap) operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// Peek or pop on a heap with no entries
    #[error("Heap is empty")]
    EmptyHeap,

    /// Handle was already removed, or was issued by a different heap
    #[error("Handle does not refer to a live entry of this heap")]
    InvalidHandle,
}
