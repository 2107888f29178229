//! Snapshot iteration
//!
//! A Fibonacci heap has no stable order to iterate in, so every iteration
//! starts from a snapshot: the whole structure is walked once (root list, each
//! tree depth-first) and the visited nodes are buffered in FIFO order.
//!
//! - [`Iter`] borrows the heap and yields `&T`; the borrow rules guarantee
//!   the snapshot stays valid.
//! - [`Cursor`] is detached from the heap. It is advanced and used for
//!   removal by passing the heap in, and it fails fast with
//!   `HeapError::ConcurrentModification` when anything other than its own
//!   `remove` changed the heap's structure since the snapshot. Passing a
//!   different heap than the one snapshotted fails with
//!   `HeapError::InvalidHandle`.

use crate::compare::Compare;
use crate::fibonacci::FibonacciHeap;
use crate::node::{Arena, NodeKey};
use crate::traits::HeapError;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use tracing::debug;

/// Walks the structure from `start` in pre-order: each root, then its
/// subtree depth-first, then the next root
pub(crate) fn walk<T>(nodes: &Arena<T>, start: Option<NodeKey>) -> VecDeque<NodeKey> {
    let mut order = VecDeque::with_capacity(nodes.len());
    let Some(start) = start else {
        return order;
    };
    // Each stack entry is a node still to be visited, along with the
    // ring member at which its sibling walk stops.
    let mut stack: Vec<(NodeKey, NodeKey)> = vec![(start, start)];
    while let Some((k, stop)) = stack.pop() {
        order.push_back(k);
        let node = &nodes[k];
        if node.right != stop {
            stack.push((node.right, stop));
        }
        if let Some(child) = node.child {
            stack.push((child, child));
        }
    }
    order
}

/// Borrowing snapshot iterator over a [`FibonacciHeap`]
///
/// Created by [`FibonacciHeap::iter`].
pub struct Iter<'a, T> {
    queue: VecDeque<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new<C>(heap: &'a FibonacciHeap<T, C>) -> Self {
        let queue = walk(&heap.nodes, heap.min)
            .into_iter()
            .map(|k| &heap.nodes[k].item)
            .collect();
        Self { queue }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.queue.iter()).finish()
    }
}

/// Detached snapshot cursor with fail-fast removal
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::{FibonacciHeap, HeapError};
///
/// let mut heap: FibonacciHeap<i32> = FibonacciHeap::try_from_iter(1..=3).unwrap();
/// let mut cursor = heap.cursor();
/// let mut stale = heap.cursor();
///
/// let first = *cursor.advance(&heap).unwrap();
/// assert_eq!(cursor.remove(&mut heap), Ok(first));
/// assert!(cursor.advance(&heap).is_ok());
/// assert_eq!(stale.advance(&heap), Err(HeapError::ConcurrentModification));
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    heap_id: u64,
    queue: VecDeque<NodeKey>,
    expected_mod_count: u64,
    last: Option<NodeKey>,
}

impl Cursor {
    pub(crate) fn new<T, C>(heap: &FibonacciHeap<T, C>) -> Self {
        Self {
            heap_id: heap.id,
            queue: walk(&heap.nodes, heap.min),
            expected_mod_count: heap.mod_count,
            last: None,
        }
    }

    /// Number of snapshot elements not yet returned
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    fn check<T, C>(&self, heap: &FibonacciHeap<T, C>) -> Result<(), HeapError> {
        if heap.id != self.heap_id {
            debug!(expected = self.heap_id, actual = heap.id, "cursor used with another heap");
            return Err(HeapError::InvalidHandle);
        }
        if heap.mod_count != self.expected_mod_count {
            debug!(
                expected = self.expected_mod_count,
                actual = heap.mod_count,
                "heap modified during iteration"
            );
            return Err(HeapError::ConcurrentModification);
        }
        Ok(())
    }

    /// Returns the next snapshot element
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if `heap` is not the heap this cursor was taken from
    /// - `HeapError::ConcurrentModification` if the heap changed structurally
    ///   since the snapshot (other than through this cursor's `remove`)
    /// - `HeapError::Exhausted` if every element has been returned
    pub fn advance<'h, T, C>(&mut self, heap: &'h FibonacciHeap<T, C>) -> Result<&'h T, HeapError> {
        self.check(heap)?;
        let k = self.queue.pop_front().ok_or(HeapError::Exhausted)?;
        let node = heap.nodes.get(k).ok_or(HeapError::ConcurrentModification)?;
        self.last = Some(k);
        Ok(&node.item)
    }

    /// Removes the element most recently returned by `advance` from the heap
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if `heap` is not the heap this cursor was taken from
    /// - `HeapError::ConcurrentModification` if the heap changed structurally
    ///   since the snapshot (other than through this cursor)
    /// - `HeapError::NoCurrentElement` if `advance` has not been called since
    ///   the last removal
    pub fn remove<T, C: Compare<T>>(&mut self, heap: &mut FibonacciHeap<T, C>) -> Result<T, HeapError> {
        self.check(heap)?;
        let k = self.last.take().ok_or(HeapError::NoCurrentElement)?;
        let handle = heap.handle_for(k);
        let item = heap.delete(&handle)?;
        self.expected_mod_count = heap.mod_count;
        Ok(item)
    }
}

impl<T, C> FibonacciHeap<T, C> {
    /// Returns a snapshot iterator over all items in walk order
    ///
    /// The order is not sorted; only the first item is guaranteed to be the minimum.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns a detached snapshot cursor
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self)
    }

    /// Copies all items into a vector in walk order
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<'a, T, C> IntoIterator for &'a FibonacciHeap<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
