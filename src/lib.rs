//! Indexed min-priority queues with extrinsic priorities
//!
//! This crate provides a mutable min-priority queue where each item carries
//! an `f64` priority supplied by the caller, and where an already-queued item
//! can have its priority changed by naming the item itself rather than a
//! handle or position.
//!
//! # Queues
//!
//! - [`OptimizedHeapMinPQ`]: binary heap plus an item → position index;
//!   O(log n) `add`, `remove_min`, and `change_priority`
//! - [`HeapMinPQ`]: `BinaryHeap`-backed reference queue with O(n)
//!   `change_priority`, kept as a correctness oracle
//!
//! Both implement [`ExtrinsicMinPQ`], so they can be swapped freely.
//! The [`pathfinding`] module builds Dijkstra's and A* searches on that trait.
//!
//! # Example
//!
//! ```rust
//! use extrinsic_minpq::{ExtrinsicMinPQ, OptimizedHeapMinPQ, QueueError};
//!
//! let mut pq = OptimizedHeapMinPQ::new();
//! pq.add("A", 3.0)?;
//! pq.add("B", 1.0)?;
//! pq.add("C", 2.0)?;
//! pq.change_priority(&"A", 0.0)?;
//!
//! assert_eq!(pq.remove_min()?, "A");
//! assert_eq!(pq.remove_min()?, "B");
//! assert_eq!(pq.remove_min()?, "C");
//! assert_eq!(pq.peek_min(), Err(QueueError::EmptyQueue));
//! # Ok::<(), QueueError>(())
//! ```

mod entry;
pub mod optimized;
pub mod pathfinding;
pub mod reference;
pub mod traits;

// Re-export the main types for convenience
pub use optimized::OptimizedHeapMinPQ;
pub use reference::HeapMinPQ;
pub use traits::{ExtrinsicMinPQ, QueueError};
