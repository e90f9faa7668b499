//! End-to-end walkthrough: two heaps, a union, then extract, decrease and delete
//!
//! Run with `RUST_LOG=rust_binomial_heap=trace cargo test --test scenario_tests -- --nocapture`
//! to see the structural events and heap dumps.

use rust_binomial_heap::binomial::BinomialHeap;
use rust_binomial_heap::HeapError;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_union_extract_decrease_delete() {
    init_tracing();

    let mut heap = BinomialHeap::new();
    heap.insert(12);
    heap.insert(21);

    let mut other = BinomialHeap::new();
    other.insert(7);
    other.insert(3);
    other.insert(11);

    heap.union(other);
    heap.print_heap();
    assert_eq!(heap.len(), 5);

    assert_eq!(heap.extract_min().map(|node| node.key), Ok(3));
    heap.insert(4);

    heap.decrease_key(&11, 1).unwrap();
    assert_eq!(heap.delete(&21), Ok(21));
    heap.print_heap();

    let mut order = Vec::new();
    while let Ok(node) = heap.extract_min() {
        order.push(node.key);
    }
    assert_eq!(order, vec![1, 4, 7, 12]);
    assert_eq!(heap.extract_min(), Err(HeapError::EmptyHeap));
}

#[test]
fn test_insert_after_delete_keeps_structure() {
    init_tracing();

    let mut heap: BinomialHeap<i32> = [12, 21, 7, 3, 11].into_iter().collect();
    heap.extract_min().unwrap();
    heap.insert(4);
    heap.decrease_key(&11, 1).unwrap();
    heap.delete(&21).unwrap();
    heap.insert(8);

    assert_eq!(heap.len(), 5);
    assert_eq!(heap.root_degrees(), vec![0, 2]);
    assert!(heap.check_invariants().is_ok());
    assert_eq!(heap.into_sorted_vec(), vec![1, 4, 7, 8, 12]);
}

#[test]
fn test_missing_keys_are_reported_and_ignored() {
    init_tracing();

    let mut heap: BinomialHeap<i32> = [5, 9, 2].into_iter().collect();
    let before = heap.to_string();

    assert_eq!(heap.decrease_key(&42, 1).unwrap_err(), HeapError::NotFound);
    assert_eq!(heap.delete(&42), Err(HeapError::NotFound));

    assert_eq!(heap.to_string(), before);
    assert_eq!(heap.len(), 3);
}

#[test]
fn test_five_inserts_give_degrees_zero_and_two() {
    let heap: BinomialHeap<i32> = (1..=5).collect();
    assert_eq!(heap.root_degrees(), vec![0, 2]);

    let dump = heap.to_string();
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("5 degree : 0 Parent : -"));
    assert!(lines[1].starts_with("1 degree : 2 Parent : -"));
}
