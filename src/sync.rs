//! Shared heap behind a coarse lock
//!
//! [`SharedFibonacciHeap`] is a cloneable handle to one heap guarded by a
//! `parking_lot::RwLock`. Mutating operations take the write lock, so at most
//! one runs at a time; `peek`, `len` and `is_empty` take the read lock and may
//! run concurrently with each other but never observe a half-finished
//! consolidation.
//!
//! [`SharedIter`] holds its own clone of the handle and a snapshot
//! [`Cursor`]. It yields `Err(HeapError::ConcurrentModification)` once if the
//! heap was structurally changed by anyone but itself, then stops.
//!
//! ```rust
//! use rust_fibonacci_heap::sync::SharedFibonacciHeap;
//! use std::thread;
//!
//! let heap = SharedFibonacciHeap::new();
//! let workers: Vec<_> = (0..4)
//!     .map(|t| {
//!         let heap = heap.clone();
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 heap.insert(t * 100 + i).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//! for worker in workers {
//!     worker.join().unwrap();
//! }
//! assert_eq!(heap.len(), 400);
//! assert_eq!(heap.extract_min(), Ok(0));
//! ```

use crate::compare::{Compare, NaturalOrder};
use crate::fibonacci::{FibonacciHandle, FibonacciHeap};
use crate::item::Blank;
use crate::iter::Cursor;
use crate::traits::HeapError;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::sync::Arc;

/// Cloneable, lock-guarded handle to a [`FibonacciHeap`]
pub struct SharedFibonacciHeap<T, C = NaturalOrder> {
    inner: Arc<RwLock<FibonacciHeap<T, C>>>,
}

impl<T, C> Clone for SharedFibonacciHeap<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SharedFibonacciHeap<T, NaturalOrder> {
    /// Creates an empty shared heap ordered by `T`'s own `PartialOrd`
    pub fn new() -> Self {
        Self::from_heap(FibonacciHeap::new())
    }
}

impl<T> Default for SharedFibonacciHeap<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> SharedFibonacciHeap<T, C> {
    /// Creates an empty shared heap ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        Self::from_heap(FibonacciHeap::with_comparator(cmp))
    }

    /// Wraps an existing heap
    pub fn from_heap(heap: FibonacciHeap<T, C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(heap)),
        }
    }

    /// Takes the read lock for a compound read-only operation
    pub fn read(&self) -> RwLockReadGuard<'_, FibonacciHeap<T, C>> {
        self.inner.read()
    }

    /// Takes the write lock for a compound mutation
    pub fn write(&self) -> RwLockWriteGuard<'_, FibonacciHeap<T, C>> {
        self.inner.write()
    }

    /// Number of items, under the read lock
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns true if the heap holds no items
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Removes every item; outstanding handles and iterators become invalid
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Snapshot of all items in walk order
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.read().to_vec()
    }

    /// Returns a fail-fast snapshot iterator yielding cloned items
    pub fn iter(&self) -> SharedIter<T, C> {
        let cursor = self.inner.read().cursor();
        SharedIter {
            heap: self.clone(),
            cursor,
            done: false,
        }
    }
}

impl<T: Blank, C: Compare<T>> SharedFibonacciHeap<T, C> {
    /// Inserts an item under the write lock, see [`FibonacciHeap::insert`]
    pub fn insert(&self, item: T) -> Result<FibonacciHandle, HeapError> {
        self.inner.write().insert(item)
    }

    /// Decreases an item under the write lock, see [`FibonacciHeap::decrease_key`]
    pub fn decrease_key(&self, handle: &FibonacciHandle, new_item: T) -> Result<(), HeapError> {
        self.inner.write().decrease_key(handle, new_item)
    }
}

impl<T, C: Compare<T>> SharedFibonacciHeap<T, C> {
    /// Returns a clone of the minimum item
    pub fn peek(&self) -> Result<T, HeapError>
    where
        T: Clone,
    {
        self.inner.read().peek().cloned()
    }

    /// Removes and returns the minimum item under the write lock
    pub fn extract_min(&self) -> Result<T, HeapError> {
        self.inner.write().extract_min()
    }

    /// Removes the element behind `handle` under the write lock
    pub fn delete(&self, handle: &FibonacciHandle) -> Result<T, HeapError> {
        self.inner.write().delete(handle)
    }
}

impl<T: fmt::Display, C> fmt::Display for SharedFibonacciHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner.read(), f)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SharedFibonacciHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner.read(), f)
    }
}

/// Fail-fast snapshot iterator over a [`SharedFibonacciHeap`]
pub struct SharedIter<T, C = NaturalOrder> {
    heap: SharedFibonacciHeap<T, C>,
    cursor: Cursor,
    done: bool,
}

impl<T, C: Compare<T>> SharedIter<T, C> {
    /// Removes the most recently yielded item from the heap
    ///
    /// # Errors
    /// - `HeapError::ConcurrentModification` if another party changed the heap
    /// - `HeapError::NoCurrentElement` if nothing was yielded since the last removal
    pub fn remove(&mut self) -> Result<T, HeapError> {
        let mut heap = self.heap.write();
        self.cursor.remove(&mut *heap)
    }
}

impl<T: Clone, C> Iterator for SharedIter<T, C> {
    type Item = Result<T, HeapError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let heap = self.heap.read();
        match self.cursor.advance(&*heap) {
            Ok(item) => Some(Ok(item.clone())),
            Err(HeapError::Exhausted) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_basic() {
        let heap = SharedFibonacciHeap::new();
        heap.insert(3).unwrap();
        heap.insert(1).unwrap();
        let other = heap.clone();
        assert_eq!(other.peek(), Ok(1));
        assert_eq!(heap.extract_min(), Ok(1));
        assert_eq!(other.len(), 1);
        other.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), Err(HeapError::Empty));
    }

    #[test]
    fn test_shared_iter_remove_and_fail_fast() {
        let heap = SharedFibonacciHeap::new();
        for x in 0..10 {
            heap.insert(x).unwrap();
        }
        let mut first = heap.iter();
        let mut second = heap.iter();

        let yielded = first.next().unwrap().unwrap();
        assert_eq!(first.remove(), Ok(yielded));
        assert_eq!(heap.len(), 9);

        assert!(matches!(first.next(), Some(Ok(_))));
        assert_eq!(second.next(), Some(Err(HeapError::ConcurrentModification)));
        assert_eq!(second.next(), None);
    }

    #[test]
    fn test_shared_iter_drains_snapshot() {
        let heap = SharedFibonacciHeap::new();
        for x in [4, 2, 8] {
            heap.insert(x).unwrap();
        }
        let mut items: Vec<i32> = heap.iter().map(Result::unwrap).collect();
        items.sort_unstable();
        assert_eq!(items, vec![2, 4, 8]);
    }
}
