//! Indexed Binary Heap
//!
//! A max- or min-ordered binary heap whose entries stay addressable through
//! the handle returned on insertion, so any entry (not just the top) can be
//! removed in O(log n).

mod error;
mod heap;

pub use error::HeapError;
pub use heap::{HeapHandle, HeapOrder, IndexedHeap};
