//! Mergeable Binomial Heap for Rust
//!
//! This crate provides a binomial heap: a min-priority queue built from a root
//! list of binomial trees, supporting
//!
//! - **Insert**: O(log n) worst case
//! - **Union**: O(log n) worst case, consuming the other heap
//! - **Extract-min**: O(log n) worst case
//! - **Decrease-key**: O(log n) bubble-up once the key is located
//! - **Delete**: by key or by handle, via bubble-up and extract-min
//! - **Find**: heap-order-pruned search for a key
//!
//! Diagnostics go through [`tracing`]; install a subscriber to see them.
//!
//! # Example
//!
//! ```rust
//! use rust_binomial_heap::binomial::BinomialHeap;
//!
//! let mut heap = BinomialHeap::new();
//! heap.insert(5);
//! heap.insert(3);
//! heap.insert(8);
//! heap.decrease_key(&8, 1).unwrap();
//! assert_eq!(heap.minimum(), Some(&1));
//! assert_eq!(heap.delete(&3), Ok(3));
//! assert_eq!(heap.into_sorted_vec(), vec![1, 5]);
//! ```

pub mod binomial;
pub mod traits;

// Re-export the main types for convenience
pub use binomial::{BinomialHandle, BinomialHeap, ExtractedNode, InvariantViolation};
pub use traits::{Handle, Heap, HeapError, SearchableHeap};
