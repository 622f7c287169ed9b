//! Two-Heap Median Tracker

use crate::sample::Sample;
use indexed_heap::{HeapError, HeapHandle, HeapOrder, IndexedHeap};
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use tracing::trace;

/// Upper bound on storage reserved up front; huge windows grow on demand
const PREALLOCATE_MAX: usize = 4096;

/// Which half of the window holds an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Max-ordered heap with the smaller values
    Lower,
    /// Min-ordered heap with the larger values
    Upper,
}

/// Heap entry; ordered by value only, `position` is never a tie-breaker
#[derive(Debug, Clone, Copy)]
struct Element<T> {
    value: T,
    position: usize,
}

impl<T: PartialEq> PartialEq for Element<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: PartialOrd> PartialOrd for Element<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

/// Eviction queue record of one in-window element
#[derive(Debug, Clone, Copy)]
struct Member {
    position: usize,
    partition: Partition,
    handle: HeapHandle,
}

/// Streaming median over the most recent `window_limit` positions
///
/// Every admitted value goes to one of two heaps: `lower` (max on top) or
/// `upper` (min on top). After each update the top of `lower` never exceeds
/// the top of `upper` and the sizes differ by at most one, so the median is
/// read straight off the tops. The eviction queue records admission order
/// and the heap handle of every member; it alone decides which element
/// leaves when the window slides.
#[derive(Debug)]
pub struct MedianTracker<T> {
    lower: IndexedHeap<Element<T>>,
    upper: IndexedHeap<Element<T>>,
    /// Members in admission order, positions strictly increasing
    members: VecDeque<Member>,
    window_limit: usize,
    /// Position the next `observe`/`skip` will occupy
    next_position: usize,
    median: Option<T>,
}

impl<T: Sample> MedianTracker<T> {
    /// Create a tracker over a window of `window_limit` positions
    pub fn new(window_limit: NonZeroUsize) -> Self {
        let window_limit = window_limit.get();
        let reserve = window_limit.min(PREALLOCATE_MAX);
        let half = reserve / 2 + 1;
        Self {
            lower: IndexedHeap::with_capacity(HeapOrder::Max, half),
            upper: IndexedHeap::with_capacity(HeapOrder::Min, half),
            members: VecDeque::with_capacity(reserve),
            window_limit,
            next_position: 0,
            median: None,
        }
    }

    /// Admit `value`, evicting the oldest member if the window is full, and
    /// return the median of the updated window
    pub fn observe(&mut self, value: T) -> T {
        let position = self.next_position;
        self.evict_expired(position);

        // Route against the median of the previous update. Evictions since
        // then can only lower `lower`'s top or raise `upper`'s top, so the
        // old median still separates the halves.
        let partition = match self.median {
            Some(median) if value >= median => Partition::Upper,
            _ => Partition::Lower,
        };
        let handle = self.heap_mut(partition).insert(Element { value, position });
        self.members.push_back(Member {
            position,
            partition,
            handle,
        });
        self.next_position += 1;

        self.rebalance();
        self.median = self.compute_median();
        self.median
            .unwrap_or_else(|| breach("window is empty right after an admission"))
    }

    /// Slide the window forward one position without admitting a value
    ///
    /// Used to shrink the window once the input is exhausted. Returns the
    /// median of what remains, or `None` once the window is empty.
    pub fn skip(&mut self) -> Option<T> {
        let position = self.next_position;
        self.evict_expired(position);
        self.next_position += 1;

        self.rebalance();
        self.median = self.compute_median();
        self.median
    }

    /// Median after the last update
    pub fn median(&self) -> Option<T> {
        self.median
    }

    /// Number of values currently in the window
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the window holds no values
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Maximum number of positions the window spans
    pub fn window_limit(&self) -> usize {
        self.window_limit
    }

    /// Size of the lower half
    pub fn lower_len(&self) -> usize {
        self.lower.len()
    }

    /// Size of the upper half
    pub fn upper_len(&self) -> usize {
        self.upper.len()
    }

    /// Largest value of the lower half
    pub fn lower_top(&self) -> Option<T> {
        self.lower.peek_top().ok().map(|element| element.value)
    }

    /// Smallest value of the upper half
    pub fn upper_top(&self) -> Option<T> {
        self.upper.peek_top().ok().map(|element| element.value)
    }

    /// Partition currently holding the oldest in-window value
    pub fn oldest_partition(&self) -> Option<Partition> {
        self.members.front().map(|member| member.partition)
    }

    /// Forget every value and start over with an empty window
    pub fn reset(&mut self) {
        self.lower.clear();
        self.upper.clear();
        self.members.clear();
        self.next_position = 0;
        self.median = None;
    }

    fn heap_mut(&mut self, partition: Partition) -> &mut IndexedHeap<Element<T>> {
        match partition {
            Partition::Lower => &mut self.lower,
            Partition::Upper => &mut self.upper,
        }
    }

    /// Remove every member that no longer fits in a window ending at `position`
    fn evict_expired(&mut self, position: usize) {
        while let Some(&member) = self.members.front() {
            if position - member.position < self.window_limit {
                break;
            }
            self.members.pop_front();
            let removed = self.heap_mut(member.partition).remove(member.handle);
            let element = invariant(removed, "evicting the oldest value");
            trace!(
                "Evicted position {} ({:?}) from {:?}",
                element.position,
                element.value,
                member.partition
            );
        }
    }

    /// Move at most one top element so the halves differ by at most one
    ///
    /// A single transfer is enough: one eviction plus one admission moves
    /// the size difference by at most 3 and a transfer changes it by 2.
    fn rebalance(&mut self) {
        let (from, to) = if self.lower.len() >= self.upper.len() + 2 {
            (Partition::Lower, Partition::Upper)
        } else if self.upper.len() >= self.lower.len() + 2 {
            (Partition::Upper, Partition::Lower)
        } else {
            return;
        };

        let element = invariant(self.heap_mut(from).pop_top(), "taking the top to rebalance");
        let handle = self.heap_mut(to).insert(element);

        match self
            .members
            .binary_search_by_key(&element.position, |member| member.position)
        {
            Ok(index) => {
                let member = &mut self.members[index];
                member.partition = to;
                member.handle = handle;
            }
            Err(_) => breach("rebalanced element is missing from the eviction queue"),
        }
    }

    fn compute_median(&self) -> Option<T> {
        let lower = self.lower_top();
        let upper = self.upper_top();
        match self.lower.len().cmp(&self.upper.len()) {
            Ordering::Greater => lower,
            Ordering::Less => upper,
            Ordering::Equal => match (lower, upper) {
                (Some(a), Some(b)) => Some(T::average(a, b)),
                _ => None,
            },
        }
    }
}

/// Heap failures here mean the partition bookkeeping is corrupt; that is a
/// bug in the tracker, never a property of the input.
fn invariant<V>(result: Result<V, HeapError>, context: &str) -> V {
    result.unwrap_or_else(|err| breach(&format!("{context}: {err}")))
}

#[cold]
fn breach(context: &str) -> ! {
    panic!("median tracker invariant violated while {context}")
}
