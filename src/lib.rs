//! Fibonacci Heap priority queue for Rust
//!
//! This crate provides a mergeable-tree priority queue with the classic
//! Fibonacci heap bounds:
//!
//! - **insert / peek**: O(1)
//! - **extract_min**: O(log n) amortized
//! - **decrease_key**: O(1) amortized
//! - **delete**: O(log n) amortized
//!
//! Items are ordered by a comparator fixed at construction, either the items'
//! own ordering ([`NaturalOrder`]) or any "strictly less than" closure
//! ([`FnCompare`]). Blank items (empty strings, `None`, NaN, ...) are rejected,
//! see [`Blank`].
//!
//! Iteration works on snapshots: [`FibonacciHeap::iter`] borrows the heap,
//! [`FibonacciHeap::cursor`] returns a detached [`Cursor`] that can remove the
//! element it last returned and fails fast if anything else changed the heap.
//! [`sync::SharedFibonacciHeap`] puts the heap behind a coarse read/write lock.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::{FibonacciHeap, HeapError};
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5).unwrap();
//! heap.insert(3).unwrap();
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.peek(), Ok(&1));
//!
//! let mut words = FibonacciHeap::new();
//! assert_eq!(words.insert("").unwrap_err(), HeapError::BlankItem);
//! ```

pub mod compare;
pub mod fibonacci;
pub mod item;
pub mod iter;
mod node;
#[cfg(feature = "serde")]
pub mod persist;
pub mod sync;
pub mod traits;

// Re-export the main types for convenience
pub use compare::{Compare, FnCompare, NaturalOrder};
pub use fibonacci::{max_degree, FibonacciHandle, FibonacciHeap};
pub use item::Blank;
pub use iter::{Cursor, Iter};
pub use traits::{DecreaseKeyHeap, ErrorKind, Handle, Heap, HeapError};
