//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for priority queues that
//! order their items with a comparator rather than a separate priority value:
//!
//! - [`Heap`]: Base trait for insert / peek / extract-min
//! - [`DecreaseKeyHeap`]: Extended trait adding handle-based `decrease_key` and `delete`
//!
//! Every failure is reported as a [`HeapError`]; nothing is retried or
//! silently repaired.

use std::fmt;

/// Classification of a [`HeapError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a value the heap cannot accept
    InvalidArgument,
    /// The heap or the iteration has nothing left to return
    NotFound,
    /// The heap changed underneath an iteration
    ConcurrentModification,
    /// The operation is not valid in the current iteration state
    IllegalState,
}

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The item is blank (empty string, `None`, NaN, ...) and cannot be stored
    BlankItem,
    /// The new item does not compare strictly less than the current one
    KeyNotDecreased,
    /// The handle is no longer valid (element was removed)
    InvalidHandle,
    /// `peek` or `extract_min` on an empty heap
    Empty,
    /// The snapshot iteration has no remaining elements
    Exhausted,
    /// The heap was structurally modified outside the iteration
    ConcurrentModification,
    /// `remove` called before `next`, or twice without an intervening `next`
    NoCurrentElement,
}

impl HeapError {
    /// Returns the taxonomy class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            HeapError::BlankItem | HeapError::KeyNotDecreased | HeapError::InvalidHandle => {
                ErrorKind::InvalidArgument
            }
            HeapError::Empty | HeapError::Exhausted => ErrorKind::NotFound,
            HeapError::ConcurrentModification => ErrorKind::ConcurrentModification,
            HeapError::NoCurrentElement => ErrorKind::IllegalState,
        }
    }
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::BlankItem => write!(f, "item must not be blank"),
            HeapError::KeyNotDecreased => {
                write!(f, "new item does not compare less than the current item")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
            HeapError::Empty => write!(f, "heap is empty"),
            HeapError::Exhausted => write!(f, "iteration has no remaining elements"),
            HeapError::ConcurrentModification => {
                write!(f, "heap was modified outside of this iteration")
            }
            HeapError::NoCurrentElement => {
                write!(f, "no element to remove (call next first)")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap, used for `decrease_key` and `delete`
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for comparator-ordered min-heaps
///
/// Unlike `BinaryHeap`, empty-heap access is an error rather than `None`,
/// and insertion validates its argument.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::{FibonacciHeap, Heap, HeapError};
///
/// let mut heap: FibonacciHeap<i32> = Heap::new();
/// heap.push(3).unwrap();
/// heap.push(1).unwrap();
///
/// assert_eq!(heap.peek(), Ok(&1));
/// assert_eq!(Heap::pop(&mut heap), Ok(1));
/// assert_eq!(Heap::pop(&mut heap), Ok(3));
/// assert_eq!(Heap::pop(&mut heap), Err(HeapError::Empty));
/// ```
pub trait Heap<T> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an item
    ///
    /// # Errors
    /// Returns `HeapError::BlankItem` if the item is blank.
    fn push(&mut self, item: T) -> Result<(), HeapError>;

    /// Returns the minimum item without removing it
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap is empty.
    fn peek(&self) -> Result<&T, HeapError>;

    /// Removes and returns the minimum item
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap is empty.
    fn pop(&mut self) -> Result<T, HeapError>;

    /// Removes every item
    fn clear(&mut self);
}

/// Extended heap trait with `decrease_key` and `delete` support
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::{DecreaseKeyHeap, FibonacciHeap, Heap};
///
/// let mut heap: FibonacciHeap<i32> = Heap::new();
/// let handle = heap.push_with_handle(10).unwrap();
/// heap.push(7).unwrap();
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Ok(&5));
/// ```
pub trait DecreaseKeyHeap<T>: Heap<T> {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts an item, returning a handle to it
    fn push_with_handle(&mut self, item: T) -> Result<Self::Handle, HeapError>;

    /// Replaces the item behind `handle` with a strictly smaller one
    ///
    /// # Errors
    /// - `HeapError::KeyNotDecreased` if `new_item` is not less than the current item
    /// - `HeapError::BlankItem` if `new_item` is blank
    /// - `HeapError::InvalidHandle` if the element was already removed
    ///
    /// # Time Complexity
    /// O(1) amortized
    fn decrease_key(&mut self, handle: &Self::Handle, new_item: T) -> Result<(), HeapError>;

    /// Removes the element behind `handle` and returns its item
    ///
    /// # Time Complexity
    /// O(log n) amortized
    fn delete(&mut self, handle: &Self::Handle) -> Result<T, HeapError>;
}
