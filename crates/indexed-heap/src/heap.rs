//! Handle-Indexed Binary Heap Implementation

use crate::error::HeapError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of per-instance ids so handles cannot cross heaps
static NEXT_HEAP_ID: AtomicUsize = AtomicUsize::new(0);

/// Which end of the ordering sits at the top of the heap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeapOrder {
    /// Largest value on top
    #[default]
    Max,
    /// Smallest value on top
    Min,
}

impl HeapOrder {
    /// Whether `a` must sit above `b`
    #[inline]
    fn outranks<T: PartialOrd>(self, a: &T, b: &T) -> bool {
        match self {
            HeapOrder::Max => a > b,
            HeapOrder::Min => a < b,
        }
    }
}

/// Opaque reference to one entry of one [`IndexedHeap`]
///
/// A handle stays valid until its entry leaves the heap (by `pop_top`,
/// `remove` or `clear`). After that the slot may be recycled for a new
/// entry, but the generation counter makes the old handle fail with
/// [`HeapError::InvalidHandle`] instead of aliasing the newcomer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapHandle {
    heap: usize,
    slot: usize,
    generation: u32,
}

/// Handle side table entry
#[derive(Debug)]
struct Slot {
    /// Current index into `nodes`, `None` while the slot is free
    position: Option<usize>,
    generation: u32,
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    slot: usize,
}

/// Array-backed binary heap with handle-based removal
#[derive(Debug)]
pub struct IndexedHeap<T> {
    id: usize,
    order: HeapOrder,
    /// Heap-ordered storage
    nodes: Vec<Node<T>>,
    /// Handle slot -> node position
    slots: Vec<Slot>,
    /// Recyclable slots
    free: Vec<usize>,
}

impl<T: PartialOrd> IndexedHeap<T> {
    /// Create an empty heap with the given ordering
    pub fn new(order: HeapOrder) -> Self {
        Self::with_capacity(order, 0)
    }

    /// Create an empty heap with room for `capacity` entries
    pub fn with_capacity(order: HeapOrder, capacity: usize) -> Self {
        Self {
            id: NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed),
            order,
            nodes: Vec::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Heap ordering
    pub fn order(&self) -> HeapOrder {
        self.order
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if heap is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a value, returning the handle that addresses it
    pub fn insert(&mut self, value: T) -> HeapHandle {
        let position = self.nodes.len();
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot].position = Some(position);
                slot
            }
            None => {
                self.slots.push(Slot {
                    position: Some(position),
                    generation: 0,
                });
                self.slots.len() - 1
            }
        };
        let generation = self.slots[slot].generation;

        self.nodes.push(Node { value, slot });
        self.sift_up(position);

        HeapHandle {
            heap: self.id,
            slot,
            generation,
        }
    }

    /// Borrow the top value
    pub fn peek_top(&self) -> Result<&T, HeapError> {
        self.nodes
            .first()
            .map(|node| &node.value)
            .ok_or(HeapError::EmptyHeap)
    }

    /// Remove and return the top value
    pub fn pop_top(&mut self) -> Result<T, HeapError> {
        if self.nodes.is_empty() {
            return Err(HeapError::EmptyHeap);
        }
        Ok(self.remove_at(0))
    }

    /// Remove the entry addressed by `handle`, wherever it sits
    pub fn remove(&mut self, handle: HeapHandle) -> Result<T, HeapError> {
        let position = self.position_of(handle).ok_or(HeapError::InvalidHandle)?;
        Ok(self.remove_at(position))
    }

    /// Borrow the value addressed by `handle`
    pub fn get(&self, handle: HeapHandle) -> Option<&T> {
        self.position_of(handle).map(|position| &self.nodes[position].value)
    }

    /// Check whether `handle` still addresses a live entry
    pub fn contains(&self, handle: HeapHandle) -> bool {
        self.position_of(handle).is_some()
    }

    /// Iterate live values in storage (not sorted) order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.nodes.iter().map(|node| &node.value)
    }

    /// Drop every entry; all outstanding handles become invalid
    pub fn clear(&mut self) {
        for node in std::mem::take(&mut self.nodes) {
            self.release(node.slot);
        }
    }

    fn position_of(&self, handle: HeapHandle) -> Option<usize> {
        if handle.heap != self.id {
            return None;
        }
        let slot = self.slots.get(handle.slot)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.position
    }

    fn remove_at(&mut self, position: usize) -> T {
        let node = self.nodes.swap_remove(position);
        self.release(node.slot);

        // The former last entry now occupies `position` and may violate
        // heap order in either direction.
        if position < self.nodes.len() {
            let moved = self.nodes[position].slot;
            self.slots[moved].position = Some(position);
            let position = self.sift_up(position);
            self.sift_down(position);
        }

        node.value
    }

    fn release(&mut self, slot: usize) {
        let entry = &mut self.slots[slot];
        entry.position = None;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(slot);
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.nodes.swap(a, b);
        self.slots[self.nodes[a].slot].position = Some(a);
        self.slots[self.nodes[b].slot].position = Some(b);
    }

    /// Returns the final position of the entry
    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self
                .order
                .outranks(&self.nodes[i].value, &self.nodes[parent].value)
            {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.nodes.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut best = i;

            if left < n
                && self
                    .order
                    .outranks(&self.nodes[left].value, &self.nodes[best].value)
            {
                best = left;
            }
            if right < n
                && self
                    .order
                    .outranks(&self.nodes[right].value, &self.nodes[best].value)
            {
                best = right;
            }
            if best == i {
                break;
            }
            self.swap(i, best);
            i = best;
        }
    }
}
