//! Reference min-priority queue
//!
//! [`HeapMinPQ`] wraps `std::collections::BinaryHeap` and keeps a side set of
//! queued items for membership tests. It has no way to find an item inside the
//! binary heap, so `change_priority` rebuilds the heap without the old entry
//! before pushing the new one.
//!
//! This queue exists as a correctness oracle for
//! [`OptimizedHeapMinPQ`](crate::optimized::OptimizedHeapMinPQ): both implement
//! [`ExtrinsicMinPQ`], so the same operation sequence can be replayed against
//! each and the results compared.
//!
//! # Time Complexity
//!
//! | Operation         | Complexity |
//! |-------------------|------------|
//! | `add`             | O(log n)   |
//! | `contains`        | O(1)       |
//! | `peek_min`        | O(1)       |
//! | `remove_min`      | O(log n)   |
//! | `change_priority` | O(n)       |
//! | `priority_of`     | O(n)       |

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::entry::Entry;
use crate::traits::{validate_priority, ExtrinsicMinPQ, QueueError};

/// `BinaryHeap`-backed min-priority queue with O(n) priority changes
pub struct HeapMinPQ<T> {
    /// `BinaryHeap` is a max-heap; `Reverse` turns it into a min-heap
    heap: BinaryHeap<Reverse<Entry<T>>>,
    members: FxHashSet<T>,
}

impl<T: Eq + Hash + Clone> HeapMinPQ<T> {
    /// Creates an empty queue with room for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        let mut members = FxHashSet::default();
        members.reserve(capacity);
        HeapMinPQ {
            heap: BinaryHeap::with_capacity(capacity),
            members,
        }
    }

    /// Removes every item
    pub fn clear(&mut self) {
        self.heap.clear();
        self.members.clear();
    }
}

impl<T: Eq + Hash + Clone> ExtrinsicMinPQ<T> for HeapMinPQ<T> {
    fn new() -> Self {
        Self::with_capacity(0)
    }

    fn add(&mut self, item: T, priority: f64) -> Result<(), QueueError> {
        let priority = validate_priority(priority)?;
        if self.members.contains(&item) {
            return Err(QueueError::DuplicateItem);
        }
        self.members.insert(item.clone());
        self.heap.push(Reverse(Entry::new(item, priority)));
        Ok(())
    }

    fn contains(&self, item: &T) -> bool {
        self.members.contains(item)
    }

    fn peek_min(&self) -> Result<&T, QueueError> {
        self.heap
            .peek()
            .map(|Reverse(entry)| entry.item())
            .ok_or(QueueError::EmptyQueue)
    }

    fn peek_min_priority(&self) -> Result<f64, QueueError> {
        self.heap
            .peek()
            .map(|Reverse(entry)| entry.priority())
            .ok_or(QueueError::EmptyQueue)
    }

    fn remove_min(&mut self) -> Result<T, QueueError> {
        let Reverse(entry) = self.heap.pop().ok_or(QueueError::EmptyQueue)?;
        self.members.remove(entry.item());
        Ok(entry.into_item())
    }

    fn change_priority(&mut self, item: &T, priority: f64) -> Result<(), QueueError> {
        let priority = validate_priority(priority)?;
        if !self.members.contains(item) {
            return Err(QueueError::ItemNotFound);
        }
        // O(n): BinaryHeap can only remove an arbitrary element by rebuilding
        self.heap.retain(|Reverse(entry)| entry.item() != item);
        self.heap.push(Reverse(Entry::new(item.clone(), priority)));
        Ok(())
    }

    fn priority_of(&self, item: &T) -> Option<f64> {
        self.heap
            .iter()
            .find(|Reverse(entry)| entry.item() == item)
            .map(|Reverse(entry)| entry.priority())
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T: Eq + Hash + Clone> Default for HeapMinPQ<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T: fmt::Debug> fmt::Debug for HeapMinPQ<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapMinPQ")
            .field("len", &self.heap.len())
            .field("heap", &self.heap)
            .finish()
    }
}
