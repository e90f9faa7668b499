//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for mergeable min-heaps:
//!
//! - [`Heap`]: Base trait with the `BinaryHeap`-like surface (push, pop, peek, merge)
//! - [`SearchableHeap`]: Extended trait adding key lookup, `decrease_key` and
//!   delete-by-key
//!
//! Keys are the elements: there is no separate payload, the ordering value is
//! what gets stored and returned.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The operation needs at least one element but the heap is empty
    EmptyHeap,
    /// No element with the requested key is present
    NotFound,
    /// The new key is greater than the current key
    KeyNotDecreased,
    /// The handle is no longer valid (element was removed, or belongs to another heap)
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::NotFound => write!(f, "key is not present in the heap"),
            HeapError::KeyNotDecreased => {
                write!(f, "new key is greater than the current key")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap
///
/// This is an opaque type that identifies a specific node in the heap.
/// Handles are `Clone` but not `Copy`, and print without exposing the key.
pub trait Handle: Clone + PartialEq + Eq + fmt::Debug {}

/// Base trait for mergeable min-heaps
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts a key
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
/// - `merge` absorbs another heap of the same type
///
/// # Example
///
/// ```rust
/// use rust_binomial_heap::Heap;
/// use rust_binomial_heap::binomial::BinomialHeap;
///
/// let mut heap: BinomialHeap<i32> = Heap::new();
/// heap.push(3);
/// heap.push(1);
/// heap.push(2);
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.pop(), Some(1));
/// ```
pub trait Heap<K: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts a key
    ///
    /// # Time Complexity
    /// O(log n) worst case for binomial heaps.
    fn push(&mut self, key: K);

    /// Returns the minimum key without removing it
    ///
    /// Note that `BinaryHeap` is a max-heap, while these heaps are min-heaps.
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<&K>;

    /// Removes and returns the minimum key
    ///
    /// # Time Complexity
    /// O(log n)
    fn pop(&mut self) -> Option<K>;

    /// Merges another heap into this one, consuming the other heap
    ///
    /// # Time Complexity
    /// O(log n) for binomial heaps.
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with key lookup, `decrease_key` and delete-by-key
///
/// Elements are addressed by key value: the heap searches for the first node
/// holding the key, exploiting heap order to prune the search.
///
/// # Example
///
/// ```rust
/// use rust_binomial_heap::{Heap, SearchableHeap};
/// use rust_binomial_heap::binomial::BinomialHeap;
///
/// let mut heap: BinomialHeap<i32> = Heap::new();
/// heap.push(10);
/// heap.push(20);
/// SearchableHeap::decrease_key(&mut heap, &20, 5).unwrap();
/// assert_eq!(heap.peek(), Some(&5));
/// ```
pub trait SearchableHeap<K: Ord>: Heap<K> {
    /// The handle type returned by lookups
    type Handle: Handle;

    /// Finds a node holding `key`
    ///
    /// # Time Complexity
    /// O(n) worst case: the search prunes subtrees whose root already exceeds `key`.
    fn find(&self, key: &K) -> Option<Self::Handle>;

    /// Returns true if some node holds `key`
    fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Replaces `target` with the smaller `new_key`, restoring heap order
    ///
    /// # Errors
    /// - `HeapError::EmptyHeap` if the heap has no elements
    /// - `HeapError::NotFound` if no node holds `target`
    /// - `HeapError::KeyNotDecreased` if `new_key` is greater than `target`
    ///
    /// The heap is unchanged when an error is returned.
    fn decrease_key(&mut self, target: &K, new_key: K) -> Result<Self::Handle, HeapError>;

    /// Removes one node holding `key`, returning the removed key
    ///
    /// # Errors
    /// - `HeapError::EmptyHeap` if the heap has no elements
    /// - `HeapError::NotFound` if no node holds `key`
    fn delete(&mut self, key: &K) -> Result<K, HeapError>;
}
