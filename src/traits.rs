//! Common trait and error type for extrinsic min-priority queues
//!
//! Both queue variants in this crate implement [`ExtrinsicMinPQ`], so callers
//! (and tests) can swap one for the other without touching their code:
//!
//! - [`HeapMinPQ`](crate::reference::HeapMinPQ): simple oracle, O(n) `change_priority`
//! - [`OptimizedHeapMinPQ`](crate::optimized::OptimizedHeapMinPQ): indexed binary heap,
//!   O(log n) `change_priority`
//!
//! Priorities are *extrinsic*: they are supplied alongside the item rather than
//! derived from the item's own ordering. Items are located by identity (value
//! equality and hash), never by position.

use std::fmt;
use std::hash::Hash;

/// Error type for queue operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueueError {
    /// `add` was called with an item that is already queued
    DuplicateItem,
    /// `change_priority` was called with an item that is not queued
    ItemNotFound,
    /// The queue has no items to peek at or remove
    EmptyQueue,
    /// The priority cannot be ordered (NaN)
    InvalidPriority(f64),
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::DuplicateItem => write!(f, "item is already in the queue"),
            QueueError::ItemNotFound => write!(f, "item is not in the queue"),
            QueueError::EmptyQueue => write!(f, "queue is empty"),
            QueueError::InvalidPriority(p) => {
                write!(f, "priority {p} cannot be ordered")
            }
        }
    }
}

impl std::error::Error for QueueError {}

/// Rejects priorities that would break the total order of the heap.
pub(crate) fn validate_priority(priority: f64) -> Result<f64, QueueError> {
    if priority.is_nan() {
        log::debug!("rejecting NaN priority");
        return Err(QueueError::InvalidPriority(priority));
    }
    Ok(priority)
}

/// Min-priority queue with externally supplied `f64` priorities
///
/// Each item may appear at most once. Ties between equal priorities are
/// resolved arbitrarily.
///
/// # Example
///
/// ```rust
/// use extrinsic_minpq::{ExtrinsicMinPQ, OptimizedHeapMinPQ};
///
/// let mut pq = OptimizedHeapMinPQ::new();
/// pq.add("a", 3.0).unwrap();
/// pq.add("b", 1.0).unwrap();
/// pq.add("c", 2.0).unwrap();
///
/// pq.change_priority(&"a", 0.0).unwrap();
/// assert_eq!(pq.remove_min(), Ok("a"));
/// assert_eq!(pq.remove_min(), Ok("b"));
/// assert_eq!(pq.remove_min(), Ok("c"));
/// ```
pub trait ExtrinsicMinPQ<T: Eq + Hash + Clone> {
    /// Creates a new empty queue
    fn new() -> Self
    where
        Self: Sized;

    /// Inserts `item` with the given priority
    ///
    /// # Errors
    /// - [`QueueError::DuplicateItem`] if `item` is already queued; the queue is left unchanged.
    /// - [`QueueError::InvalidPriority`] if `priority` is NaN.
    fn add(&mut self, item: T, priority: f64) -> Result<(), QueueError>;

    /// Returns true if `item` is currently queued
    fn contains(&self, item: &T) -> bool;

    /// Returns the item with the smallest priority without removing it
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    fn peek_min(&self) -> Result<&T, QueueError>;

    /// Returns the smallest priority currently queued
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    fn peek_min_priority(&self) -> Result<f64, QueueError>;

    /// Removes and returns the item with the smallest priority
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    fn remove_min(&mut self) -> Result<T, QueueError>;

    /// Updates the priority of a queued item
    ///
    /// The new priority may be smaller or larger than the old one. The result
    /// is indistinguishable from removing the item and adding it again with
    /// `priority`.
    ///
    /// # Errors
    /// - [`QueueError::ItemNotFound`] if `item` is not queued; the queue is left unchanged.
    /// - [`QueueError::InvalidPriority`] if `priority` is NaN.
    fn change_priority(&mut self, item: &T, priority: f64) -> Result<(), QueueError>;

    /// Returns the current priority of `item`, or `None` if it is not queued
    fn priority_of(&self, item: &T) -> Option<f64>;

    /// Returns the number of queued items
    fn len(&self) -> usize;

    /// Returns true if no items are queued
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds `item`, or changes its priority if it is already queued
    ///
    /// This is the edge-relaxation step of Dijkstra-style searches.
    fn add_or_change_priority(&mut self, item: T, priority: f64) -> Result<(), QueueError> {
        if self.contains(&item) {
            self.change_priority(&item, priority)
        } else {
            self.add(item, priority)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(QueueError::DuplicateItem.to_string(), "item is already in the queue");
        assert_eq!(QueueError::ItemNotFound.to_string(), "item is not in the queue");
        assert_eq!(QueueError::EmptyQueue.to_string(), "queue is empty");
        assert_eq!(
            QueueError::InvalidPriority(f64::NAN).to_string(),
            "priority NaN cannot be ordered"
        );
    }

    #[test]
    fn test_validate_priority() {
        assert_eq!(validate_priority(1.5), Ok(1.5));
        assert_eq!(validate_priority(f64::INFINITY), Ok(f64::INFINITY));
        assert_eq!(validate_priority(f64::NEG_INFINITY), Ok(f64::NEG_INFINITY));
        assert!(matches!(
            validate_priority(f64::NAN),
            Err(QueueError::InvalidPriority(p)) if p.is_nan()
        ));
    }
}
