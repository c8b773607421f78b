//! Indexed binary min-heap
//!
//! [`OptimizedHeapMinPQ`] keeps its entries in a dense array laid out as a
//! binary heap, plus a hash map from each item to its current array position.
//! The map turns "find this item in the heap" into a single lookup, so
//! `change_priority` only pays for the swim or sink that follows.
//!
//! Positions are 1-based: the root is position 1, and for a position `i` the
//! parent is `i / 2` and the children are `2i` and `2i + 1`. Position 0 is
//! never occupied. Physically, position `i` lives at `entries[i - 1]`.
//!
//! # Time Complexity
//!
//! | Operation         | Complexity |
//! |-------------------|------------|
//! | `add`             | O(log n)   |
//! | `contains`        | O(1)       |
//! | `peek_min`        | O(1)       |
//! | `remove_min`      | O(log n)   |
//! | `change_priority` | O(log n)   |
//! | `priority_of`     | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use extrinsic_minpq::ExtrinsicMinPQ;
//! use extrinsic_minpq::optimized::OptimizedHeapMinPQ;
//!
//! let mut pq = OptimizedHeapMinPQ::new();
//! pq.add("three", 3.0).unwrap();
//! pq.add("one", 1.0).unwrap();
//! pq.add("two", 2.0).unwrap();
//!
//! // Raising a priority works as well as lowering it
//! pq.change_priority(&"one", 10.0).unwrap();
//!
//! assert_eq!(pq.remove_min(), Ok("two"));
//! assert_eq!(pq.remove_min(), Ok("three"));
//! assert_eq!(pq.remove_min(), Ok("one"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

use crate::entry::Entry;
use crate::traits::{validate_priority, ExtrinsicMinPQ, QueueError};

/// 1-based heap position
type Position = usize;

const ROOT: Position = 1;

#[inline]
fn parent(i: Position) -> Position {
    i / 2
}

#[inline]
fn left(i: Position) -> Position {
    2 * i
}

#[inline]
fn right(i: Position) -> Position {
    2 * i + 1
}

/// Binary min-heap with an item → position index
///
/// `S` is the hasher used by the identity index. It defaults to FxHash,
/// which is fast for the small keys (integers, short strings, node ids)
/// typically queued; pass a different `BuildHasher` via
/// [`with_hasher`](Self::with_hasher) for keys that need DoS resistance.
pub struct OptimizedHeapMinPQ<T, S = FxBuildHasher> {
    /// Heap-ordered entries; position `i` is stored at `entries[i - 1]`
    entries: Vec<Entry<T>>,
    /// Current position of every queued item
    positions: HashMap<T, Position, S>,
}

impl<T: Eq + Hash + Clone> OptimizedHeapMinPQ<T> {
    /// Creates an empty queue using the default FxHash index
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue with room for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher)
    }
}

impl<T: Eq + Hash + Clone, S: BuildHasher> OptimizedHeapMinPQ<T, S> {
    /// Creates an empty queue whose identity index uses `hasher`
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    /// Creates an empty queue with room for `capacity` items, using `hasher`
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        OptimizedHeapMinPQ {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    /// Removes every item
    pub fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
    }

    /// Returns true if every parent's priority is `<=` its children's
    pub fn verify_heap_property(&self) -> bool {
        (2..=self.entries.len()).all(|i| self.entry(parent(i)) <= self.entry(i))
    }

    /// Returns true if the identity index maps exactly the queued items to
    /// the positions they occupy
    pub fn verify_index_consistency(&self) -> bool {
        self.positions.len() == self.entries.len()
            && (ROOT..=self.entries.len())
                .all(|i| self.positions.get(self.entry(i).item()) == Some(&i))
    }

    #[inline]
    fn entry(&self, i: Position) -> &Entry<T> {
        &self.entries[i - 1]
    }

    #[inline]
    fn accessible(&self, i: Position) -> bool {
        ROOT <= i && i <= self.entries.len()
    }

    /// Exchanges the entries at `i` and `j` and records both new positions
    fn swap(&mut self, i: Position, j: Position) {
        self.entries.swap(i - 1, j - 1);
        for k in [i, j] {
            let item = self.entries[k - 1].item();
            if let Some(pos) = self.positions.get_mut(item) {
                *pos = k;
            }
        }
    }

    /// Returns the child of `i` with the smaller priority, if any child exists
    ///
    /// On equal priorities the left child wins; the right child is only
    /// chosen when it is strictly smaller.
    fn min_child(&self, i: Position) -> Option<Position> {
        let (l, r) = (left(i), right(i));
        if !self.accessible(l) {
            return None;
        }
        if self.accessible(r) && self.entry(r) < self.entry(l) {
            Some(r)
        } else {
            Some(l)
        }
    }

    /// Move the entry at `i` up until its parent is no larger
    fn swim(&mut self, mut i: Position) {
        while self.accessible(parent(i)) && self.entry(i) < self.entry(parent(i)) {
            self.swap(i, parent(i));
            i = parent(i);
        }
    }

    /// Move the entry at `i` down until no child is smaller
    fn sink(&mut self, mut i: Position) {
        while let Some(child) = self.min_child(i) {
            if self.entry(i) <= self.entry(child) {
                break;
            }
            self.swap(i, child);
            i = child;
        }
    }

    #[inline]
    fn check_invariants(&self) {
        #[cfg(feature = "debug-invariants")]
        {
            debug_assert!(self.verify_heap_property(), "heap property violated");
            debug_assert!(self.verify_index_consistency(), "identity index out of sync");
        }
    }
}

impl<T: Eq + Hash + Clone, S: BuildHasher + Default> ExtrinsicMinPQ<T> for OptimizedHeapMinPQ<T, S> {
    fn new() -> Self {
        Self::with_hasher(S::default())
    }

    fn add(&mut self, item: T, priority: f64) -> Result<(), QueueError> {
        let priority = validate_priority(priority)?;
        if self.positions.contains_key(&item) {
            log::debug!("add rejected: item already queued");
            return Err(QueueError::DuplicateItem);
        }
        let position = self.entries.len() + 1;
        self.positions.insert(item.clone(), position);
        self.entries.push(Entry::new(item, priority));
        self.swim(position);
        self.check_invariants();
        Ok(())
    }

    fn contains(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    fn peek_min(&self) -> Result<&T, QueueError> {
        self.entries
            .first()
            .map(Entry::item)
            .ok_or(QueueError::EmptyQueue)
    }

    fn peek_min_priority(&self) -> Result<f64, QueueError> {
        self.entries
            .first()
            .map(Entry::priority)
            .ok_or(QueueError::EmptyQueue)
    }

    fn remove_min(&mut self) -> Result<T, QueueError> {
        if self.entries.is_empty() {
            return Err(QueueError::EmptyQueue);
        }
        let last = self.len();
        self.swap(ROOT, last);
        let min = self.entries.pop().ok_or(QueueError::EmptyQueue)?;
        self.positions.remove(min.item());
        if !self.entries.is_empty() {
            self.sink(ROOT);
        }
        self.check_invariants();
        Ok(min.into_item())
    }

    fn change_priority(&mut self, item: &T, priority: f64) -> Result<(), QueueError> {
        let priority = validate_priority(priority)?;
        let Some(&position) = self.positions.get(item) else {
            log::debug!("change_priority rejected: item not queued");
            return Err(QueueError::ItemNotFound);
        };
        let old = self.entry(position).priority();
        self.entries[position - 1].set_priority(priority);
        // Same total order the entries use, so -0.0 counts as a decrease from 0.0
        if priority.total_cmp(&old).is_lt() {
            self.swim(position);
        } else {
            self.sink(position);
        }
        self.check_invariants();
        Ok(())
    }

    fn priority_of(&self, item: &T) -> Option<f64> {
        self.positions
            .get(item)
            .map(|&position| self.entry(position).priority())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<T: Eq + Hash + Clone, S: BuildHasher + Default> Default for OptimizedHeapMinPQ<T, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T: fmt::Debug, S> fmt::Debug for OptimizedHeapMinPQ<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimizedHeapMinPQ")
            .field("entries", &self.entries)
            .finish()
    }
}
