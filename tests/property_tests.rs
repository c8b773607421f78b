//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify that the
//! heap property and the identity index hold after every step.

use proptest::prelude::*;
use extrinsic_minpq::{ExtrinsicMinPQ, HeapMinPQ, OptimizedHeapMinPQ, QueueError};

use std::collections::hash_map::Entry;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Op {
    Add(u16, f64),
    RemoveMin,
    ChangePriority(u16, f64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u16..64, -1000.0f64..1000.0).prop_map(|(item, p)| Op::Add(item, p)),
        2 => Just(Op::RemoveMin),
        3 => (0u16..64, -1000.0f64..1000.0).prop_map(|(item, p)| Op::ChangePriority(item, p)),
    ]
}

/// Applies `ops` to the optimized queue and a plain map model, checking both
/// structural invariants and observable results after every operation.
fn check_invariants_under(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut pq = OptimizedHeapMinPQ::new();
    let mut model: HashMap<u16, f64> = HashMap::new();
    let mut adds = 0usize;
    let mut removes = 0usize;

    for op in ops {
        match op {
            Op::Add(item, priority) => {
                let result = pq.add(item, priority);
                match model.entry(item) {
                    Entry::Occupied(_) => {
                        prop_assert_eq!(result, Err(QueueError::DuplicateItem));
                    }
                    Entry::Vacant(slot) => {
                        prop_assert_eq!(result, Ok(()));
                        slot.insert(priority);
                        adds += 1;
                    }
                }
            }
            Op::RemoveMin => {
                let result = pq.remove_min();
                if model.is_empty() {
                    prop_assert_eq!(result, Err(QueueError::EmptyQueue));
                } else {
                    let item = result.map_err(|e| TestCaseError::fail(e.to_string()))?;
                    let removed = model.remove(&item);
                    prop_assert!(removed.is_some(), "removed item {} was not queued", item);
                    let min = model.values().copied().fold(f64::INFINITY, f64::min);
                    prop_assert!(removed.unwrap_or(f64::NAN) <= min);
                    removes += 1;
                }
            }
            Op::ChangePriority(item, priority) => {
                let result = pq.change_priority(&item, priority);
                match model.get_mut(&item) {
                    Some(current) => {
                        prop_assert_eq!(result, Ok(()));
                        *current = priority;
                    }
                    None => {
                        prop_assert_eq!(result, Err(QueueError::ItemNotFound));
                    }
                }
            }
        }

        prop_assert!(pq.verify_heap_property(), "heap property violated");
        prop_assert!(pq.verify_index_consistency(), "identity index out of sync");
        prop_assert_eq!(pq.len(), adds - removes);
        prop_assert_eq!(pq.len(), model.len());
        for (item, priority) in &model {
            prop_assert!(pq.contains(item));
            prop_assert_eq!(pq.priority_of(item), Some(*priority));
        }
        if let Ok(min) = pq.peek_min_priority() {
            let expected = model.values().copied().fold(f64::INFINITY, f64::min);
            prop_assert_eq!(min, expected);
        }
    }

    Ok(())
}

/// Draining yields non-decreasing priorities
fn check_sorted_extraction<Q: ExtrinsicMinPQ<usize>>(priorities: Vec<f64>) -> Result<(), TestCaseError> {
    let mut pq = Q::new();
    for (item, &priority) in priorities.iter().enumerate() {
        pq.add(item, priority).map_err(|e| TestCaseError::fail(e.to_string()))?;
    }

    let mut last = f64::NEG_INFINITY;
    let mut count = 0;
    while let Ok(item) = pq.remove_min() {
        let priority = priorities[item];
        prop_assert!(priority >= last, "popped {} after {}", priority, last);
        last = priority;
        count += 1;
    }
    prop_assert_eq!(count, priorities.len());
    Ok(())
}

/// Changing every priority and then draining still yields sorted output
fn check_change_all_then_drain<Q: ExtrinsicMinPQ<usize>>(
    initial: Vec<f64>,
    updated: Vec<f64>,
) -> Result<(), TestCaseError> {
    let mut pq = Q::new();
    for (item, &priority) in initial.iter().enumerate() {
        pq.add(item, priority).map_err(|e| TestCaseError::fail(e.to_string()))?;
    }
    let mut current = initial.clone();
    for (item, &priority) in updated.iter().enumerate().take(initial.len()) {
        pq.change_priority(&item, priority)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        current[item] = priority;
    }

    let mut last = f64::NEG_INFINITY;
    while let Ok(item) = pq.remove_min() {
        prop_assert!(current[item] >= last);
        last = current[item];
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_optimized_invariants(ops in prop::collection::vec(op_strategy(), 0..200)) {
        check_invariants_under(ops)?;
    }

    #[test]
    fn test_optimized_sorted_extraction(priorities in prop::collection::vec(-1e6f64..1e6, 0..200)) {
        check_sorted_extraction::<OptimizedHeapMinPQ<usize>>(priorities)?;
    }

    #[test]
    fn test_reference_sorted_extraction(priorities in prop::collection::vec(-1e6f64..1e6, 0..200)) {
        check_sorted_extraction::<HeapMinPQ<usize>>(priorities)?;
    }

    #[test]
    fn test_optimized_sorted_extraction_with_ties(priorities in prop::collection::vec((0u8..4).prop_map(f64::from), 0..100)) {
        check_sorted_extraction::<OptimizedHeapMinPQ<usize>>(priorities)?;
    }

    #[test]
    fn test_optimized_change_all(
        initial in prop::collection::vec(-100.0f64..100.0, 1..100),
        updated in prop::collection::vec(-100.0f64..100.0, 0..100),
    ) {
        check_change_all_then_drain::<OptimizedHeapMinPQ<usize>>(initial, updated)?;
    }

    #[test]
    fn test_reference_change_all(
        initial in prop::collection::vec(-100.0f64..100.0, 1..100),
        updated in prop::collection::vec(-100.0f64..100.0, 0..100),
    ) {
        check_change_all_then_drain::<HeapMinPQ<usize>>(initial, updated)?;
    }
}
