//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify
//! that the heap invariants are always maintained.

use proptest::prelude::*;
use rust_binomial_heap::binomial::BinomialHeap;
use rust_binomial_heap::{Heap, HeapError};

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    Pop,
    Decrease { index: usize, by: i32 },
    Delete { index: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-100i32..100).prop_map(Op::Insert),
        2 => Just(Op::Pop),
        1 => (0usize..64, 0i32..50).prop_map(|(index, by)| Op::Decrease { index, by }),
        1 => (0usize..64).prop_map(|index| Op::Delete { index }),
    ]
}

fn sorted(mut keys: Vec<i32>) -> Vec<i32> {
    keys.sort_unstable();
    keys
}

/// Replays `ops` against the heap and a plain vector model
fn test_random_ops_invariant(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut heap = BinomialHeap::new();
    let mut model: Vec<i32> = Vec::new();

    for op in ops {
        match op {
            Op::Insert(key) => {
                heap.insert(key);
                model.push(key);
            }
            Op::Pop => {
                let expected = model.iter().min().copied();
                let popped = heap.extract_min().ok().map(|node| node.key);
                prop_assert_eq!(popped, expected);
                if let Some(key) = expected {
                    let pos = model.iter().position(|&k| k == key).unwrap();
                    model.swap_remove(pos);
                }
            }
            Op::Decrease { index, by } => {
                if model.is_empty() {
                    prop_assert_eq!(heap.decrease_key(&0, 0).unwrap_err(), HeapError::EmptyHeap);
                    continue;
                }
                let index = index % model.len();
                let target = model[index];
                let resting = heap.decrease_key(&target, target - by).unwrap();
                prop_assert_eq!(resting.key(), Some(target - by));
                model[index] = target - by;
            }
            Op::Delete { index } => {
                if model.is_empty() {
                    prop_assert_eq!(heap.delete(&0), Err(HeapError::EmptyHeap));
                    continue;
                }
                let index = index % model.len();
                let target = model.swap_remove(index);
                prop_assert_eq!(heap.delete(&target), Ok(target));
            }
        }

        prop_assert!(heap.check_invariants().is_ok(), "{:?}", heap.check_invariants());
        prop_assert_eq!(heap.len(), model.len());
        prop_assert_eq!(heap.minimum().copied(), model.iter().min().copied());
    }

    prop_assert_eq!(heap.into_sorted_vec(), sorted(model));
    Ok(())
}

/// Test that all popped keys are in non-decreasing order
fn test_pop_order_invariant(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap = BinomialHeap::new();
    for val in &values {
        heap.insert(*val);
    }

    let mut last = i32::MIN;
    let mut popped = Vec::new();
    while let Ok(node) = heap.extract_min() {
        prop_assert!(node.key >= last, "Popped key {} is less than previous {}", node.key, last);
        last = node.key;
        popped.push(node.key);
    }

    prop_assert_eq!(popped, sorted(values));
    Ok(())
}

/// Test union keeps both key multisets and adds the lengths
fn test_union_invariant(left: Vec<i32>, right: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap1: BinomialHeap<i32> = left.iter().copied().collect();
    let heap2: BinomialHeap<i32> = right.iter().copied().collect();
    let (len1, len2) = (heap1.len(), heap2.len());

    heap1.union(heap2);

    prop_assert_eq!(heap1.len(), len1 + len2);
    prop_assert!(heap1.check_invariants().is_ok());

    let mut expected = left;
    expected.extend(right);
    prop_assert_eq!(heap1.into_sorted_vec(), sorted(expected));
    Ok(())
}

/// Root degrees are the set bits of the element count
fn test_root_degrees_match_binary(count: usize) -> Result<(), TestCaseError> {
    let heap: BinomialHeap<usize> = (0..count).rev().collect();

    let expected: Vec<usize> = (0..usize::BITS as usize)
        .filter(|bit| count & (1 << bit) != 0)
        .collect();
    prop_assert_eq!(heap.root_degrees(), expected);
    Ok(())
}

/// Deleting a unique key makes it unfindable
fn test_delete_then_find(values: Vec<i32>, pick: usize) -> Result<(), TestCaseError> {
    let mut unique = values;
    unique.sort_unstable();
    unique.dedup();
    let target = unique[pick % unique.len()];

    let mut heap: BinomialHeap<i32> = unique.iter().copied().collect();
    prop_assert!(heap.contains(&target));
    prop_assert_eq!(heap.delete(&target), Ok(target));
    prop_assert!(heap.find(&target).is_none());
    if heap.is_empty() {
        prop_assert_eq!(heap.delete(&target), Err(HeapError::EmptyHeap));
    } else {
        prop_assert_eq!(heap.delete(&target), Err(HeapError::NotFound));
    }
    prop_assert!(heap.check_invariants().is_ok());
    Ok(())
}

/// Decrease-key leaves every key at a heap-consistent position
fn test_decrease_key_invariant(
    initial: Vec<i32>,
    decreases: Vec<(usize, i32)>,
) -> Result<(), TestCaseError> {
    let mut heap = BinomialHeap::new();
    let mut keys = Vec::new();
    for (i, key) in initial.iter().enumerate() {
        // Distinct keys so each decrease addresses exactly one node
        let key = key * 1000 + i as i32;
        heap.insert(key);
        keys.push(key);
    }

    for (index, by) in decreases {
        let index = index % keys.len();
        let new_key = keys[index] - by * 1000;
        let resting = heap.decrease_key(&keys[index], new_key).unwrap();
        prop_assert_eq!(resting.key(), Some(new_key));
        keys[index] = new_key;

        prop_assert!(heap.check_invariants().is_ok());
        prop_assert_eq!(heap.peek().copied(), keys.iter().min().copied());
    }

    Ok(())
}

proptest! {
    #[test]
    fn test_binomial_random_ops(ops in prop::collection::vec(op_strategy(), 0..150)) {
        test_random_ops_invariant(ops)?;
    }

    #[test]
    fn test_binomial_pop_order(values in prop::collection::vec(-100i32..100, 1..200)) {
        test_pop_order_invariant(values)?;
    }

    #[test]
    fn test_binomial_union(
        heap1 in prop::collection::vec(-100i32..100, 0..60),
        heap2 in prop::collection::vec(-100i32..100, 0..60)
    ) {
        test_union_invariant(heap1, heap2)?;
    }

    #[test]
    fn test_binomial_root_degrees(count in 0usize..600) {
        test_root_degrees_match_binary(count)?;
    }

    #[test]
    fn test_binomial_delete_then_find(
        values in prop::collection::vec(-1000i32..1000, 1..80),
        pick in 0usize..80
    ) {
        test_delete_then_find(values, pick)?;
    }

    #[test]
    fn test_binomial_decrease_key(
        initial in prop::collection::vec(-100i32..100, 1..50),
        decreases in prop::collection::vec((0usize..50, 0i32..20), 0..20)
    ) {
        test_decrease_key_invariant(initial, decreases)?;
    }
}

/// Deleting the only key empties the heap, so a repeat delete reports emptiness
#[test]
fn test_delete_last_key_then_repeat() {
    test_delete_then_find(vec![0], 0).unwrap();

    let mut heap: BinomialHeap<i32> = std::iter::once(7).collect();
    assert_eq!(heap.delete(&7), Ok(7));
    assert!(heap.is_empty());
    assert_eq!(heap.delete(&7), Err(HeapError::EmptyHeap));
    assert!(heap.check_invariants().is_ok());
}

/// With keys left over, a repeat delete reports the key as missing
#[test]
fn test_delete_then_repeat_with_keys_left() {
    let mut heap: BinomialHeap<i32> = vec![3, 7].into_iter().collect();
    assert_eq!(heap.delete(&7), Ok(7));
    assert_eq!(heap.delete(&7), Err(HeapError::NotFound));
    assert_eq!(heap.len(), 1);
}
