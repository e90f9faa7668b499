//! Walkthrough of the binomial heap operations with the heap dumped after each step
//!
//! ## Running
//!
//! ```bash
//! cargo run --example scenario
//!
//! # Include link and bubble-up events
//! RUST_LOG=rust_binomial_heap=trace cargo run --example scenario
//! ```

use rust_binomial_heap::binomial::BinomialHeap;
use rust_binomial_heap::HeapError;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<(), HeapError> {
    // RUST_LOG takes precedence over the default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut heap = BinomialHeap::new();
    heap.insert(12);
    heap.insert(21);

    let mut other = BinomialHeap::new();
    other.insert(7);
    other.insert(3);
    other.insert(11);

    heap.union(other);
    info!(len = heap.len(), "after union");
    heap.print_heap();

    let extracted = heap.extract_min()?;
    info!(key = extracted.key, degree = extracted.degree, "extracted minimum");
    heap.insert(4);

    heap.decrease_key(&11, 1)?;
    info!("decreased 11 to 1");
    heap.delete(&21)?;
    info!("deleted 21");

    info!(len = heap.len(), "after extract, decrease and delete");
    heap.print_heap();

    heap.insert(8);
    info!(len = heap.len(), "after inserting 8");
    heap.print_heap();

    if let Err(err) = heap.delete(&99) {
        warn!(%err, "delete of 99 ignored");
    }

    let drained = heap.into_sorted_vec();
    info!(?drained, "drained in order");
    Ok(())
}
