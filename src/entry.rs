//! Item/priority pairs stored in the queues
//!
//! Entries never leave the crate; callers only see items and priorities.
//!
//! ```compile_fail
//! use extrinsic_minpq::entry::Entry;
//! ```

use std::cmp::Ordering;

/// An item paired with its extrinsic priority.
///
/// Entries compare by priority only; the item takes no part in ordering or
/// equality. Priorities are validated before an entry is built, so the
/// `total_cmp` ordering below never sees a NaN.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Entry<T> {
    item: T,
    priority: f64,
}

impl<T> Entry<T> {
    pub(crate) fn new(item: T, priority: f64) -> Self {
        Entry { item, priority }
    }

    /// The queued item
    pub(crate) fn item(&self) -> &T {
        &self.item
    }

    /// The priority attached to the item
    pub(crate) fn priority(&self) -> f64 {
        self.priority
    }

    pub(crate) fn set_priority(&mut self, priority: f64) {
        self.priority = priority;
    }

    pub(crate) fn into_item(self) -> T {
        self.item
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.total_cmp(&other.priority)
    }
}
