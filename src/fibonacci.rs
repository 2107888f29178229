//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert and find-min
//! - O(1) amortized decrease_key
//! - O(log n) amortized extract-min and delete
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list, and so are the children of every node. The
//! heap keeps a key to the minimum root.
//!
//! Extract-min is where the deferred work happens: the removed root's children
//! join the root list, then roots of equal degree are linked pairwise until every
//! degree is distinct. Decrease-key cuts a node loose when it would violate heap
//! order; a parent that loses a second child is cut as well (cascading cut). That
//! marking rule keeps a subtree whose root has degree k at least F(k+2) nodes large,
//! so no degree exceeds log_φ(n).
//!
//! Nodes are stored in a generational arena, so handles that outlive their element
//! are detected instead of dangling.

use crate::compare::{Compare, FnCompare, NaturalOrder};
use crate::item::Blank;
use crate::node::{self, Arena, NodeKey};
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
use slotmap::SlotMap;
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// The golden ratio
const PHI: f64 = 1.618_033_988_749_895;

/// Source of per-heap identities; handles and cursors carry the id of the
/// heap that issued them
static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

/// Largest degree any node can reach in a heap holding `len` items
///
/// A node of degree k roots a subtree of at least F(k+2) ≥ φ^k nodes, so
/// k ≤ log_φ(len).
pub fn max_degree(len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    ((len as f64).ln() / PHI.ln() + 1e-9).floor() as usize
}

/// Handle to an element in a Fibonacci heap
///
/// Handles are generational: once the element is removed, every operation
/// taking the handle reports `HeapError::InvalidHandle`. Passing a handle to
/// a heap other than the one that issued it is reported the same way.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    pub(crate) heap: u64,
    pub(crate) key: NodeKey,
}

impl Handle for FibonacciHandle {}

/// Fibonacci Heap
///
/// Items are ordered by the comparator `C`, fixed at construction.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5).unwrap();
/// heap.insert(3).unwrap();
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.peek(), Ok(&1));
/// assert_eq!(heap.extract_min(), Ok(1));
/// assert_eq!(heap.extract_min(), Ok(3));
/// ```
pub struct FibonacciHeap<T, C = NaturalOrder> {
    pub(crate) id: u64,
    pub(crate) nodes: Arena<T>,
    pub(crate) min: Option<NodeKey>,
    len: usize,
    /// Bumped on every structural change; iterators compare against it
    pub(crate) mod_count: u64,
    cmp: C,
}

impl<T> FibonacciHeap<T, NaturalOrder> {
    /// Creates an empty heap ordered by `T`'s own `PartialOrd`
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, F: Fn(&T, &T) -> bool> FibonacciHeap<T, FnCompare<F>> {
    /// Creates an empty heap ordered by a "strictly less than" closure
    pub fn from_fn(less: F) -> Self {
        Self::with_comparator(FnCompare(less))
    }
}

impl<T> Default for FibonacciHeap<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> FibonacciHeap<T, C> {
    /// Creates an empty heap ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            id: NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed),
            nodes: SlotMap::with_key(),
            min: None,
            len: 0,
            mod_count: 0,
            cmp,
        }
    }

    /// Returns the comparator
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of items in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap holds no items
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Structural modification counter
    ///
    /// Increases on insert, extract, delete, every cut and clear.
    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }

    /// Returns the item behind `handle`, if it is still stored
    pub fn get(&self, handle: &FibonacciHandle) -> Option<&T> {
        let key = self.resolve(handle)?;
        Some(&self.nodes[key].item)
    }

    /// Returns true if the element behind `handle` is still stored
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Removes every item
    ///
    /// Outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
        self.len = 0;
        self.mod_count += 1;
    }

    pub(crate) fn handle_for(&self, key: NodeKey) -> FibonacciHandle {
        FibonacciHandle { heap: self.id, key }
    }

    /// Key behind `handle` if it was issued by this heap and is still stored
    fn resolve(&self, handle: &FibonacciHandle) -> Option<NodeKey> {
        (handle.heap == self.id && self.nodes.contains_key(handle.key)).then_some(handle.key)
    }
}

impl<T: Blank, C: Compare<T>> FibonacciHeap<T, C> {
    /// Inserts an item, returning a handle to it
    ///
    /// # Errors
    /// Returns `HeapError::BlankItem` if the item is blank.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, item: T) -> Result<FibonacciHandle, HeapError> {
        if item.is_blank() {
            return Err(HeapError::BlankItem);
        }
        let x = node::alloc(&mut self.nodes, item);
        self.add_root(x);
        self.len += 1;
        self.mod_count += 1;
        Ok(self.handle_for(x))
    }

    /// Replaces the item behind `handle` with a strictly smaller one
    ///
    /// If the node now orders before its parent it is cut into the root list,
    /// and its ancestors are cascade-cut.
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if the element was removed
    /// - `HeapError::BlankItem` if `new_item` is blank
    /// - `HeapError::KeyNotDecreased` if `new_item` is not less than the current item
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(&mut self, handle: &FibonacciHandle, new_item: T) -> Result<(), HeapError> {
        let x = self.resolve(handle).ok_or(HeapError::InvalidHandle)?;
        let current = &self.nodes[x].item;
        if new_item.is_blank() {
            return Err(HeapError::BlankItem);
        }
        if !self.cmp.less(&new_item, current) {
            return Err(HeapError::KeyNotDecreased);
        }
        self.nodes[x].item = new_item;

        if let Some(y) = self.nodes[x].parent {
            if self.less(x, y) {
                self.cut(x, y);
                self.cascading_cut(y);
            }
        }
        if let Some(min) = self.min {
            if self.less(x, min) {
                self.min = Some(x);
            }
        }
        Ok(())
    }
}

impl<T, C: Compare<T>> FibonacciHeap<T, C> {
    /// Returns the minimum item without removing it
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap is empty.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn peek(&self) -> Result<&T, HeapError> {
        self.min
            .map(|min| &self.nodes[min].item)
            .ok_or(HeapError::Empty)
    }

    /// Removes and returns the minimum item
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap is empty.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Result<T, HeapError> {
        let z = self.min.ok_or(HeapError::Empty)?;

        // Children join the root list as parentless, unmarked roots
        if let Some(child) = self.nodes[z].child.take() {
            for c in node::ring(&self.nodes, child) {
                node::make_singleton(&mut self.nodes, c);
                let promoted = &mut self.nodes[c];
                promoted.parent = None;
                promoted.marked = false;
                node::insert_before(&mut self.nodes, z, c);
            }
            self.nodes[z].degree = 0;
        }

        let rest = node::unlink(&mut self.nodes, z);
        self.len -= 1;
        self.mod_count += 1;
        match rest {
            None => self.min = None,
            Some(root) => {
                self.min = Some(root);
                self.consolidate();
            }
        }

        let removed = self.nodes.remove(z);
        debug_assert!(removed.is_some(), "min key missing from arena");
        removed.map(|node| node.item).ok_or(HeapError::Empty)
    }

    /// Removes the element behind `handle` and returns its item
    ///
    /// The node is cut loose (with cascading cuts above it), made the minimum
    /// and extracted. This has the effect of decreasing it below every other
    /// item without needing a sentinel value.
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the element was already removed.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete(&mut self, handle: &FibonacciHandle) -> Result<T, HeapError> {
        let x = self.resolve(handle).ok_or(HeapError::InvalidHandle)?;
        let parent = self.nodes[x].parent;
        if let Some(y) = parent {
            self.cut(x, y);
            self.cascading_cut(y);
        }
        self.min = Some(x);
        self.extract_min()
    }

    #[inline]
    fn less(&self, a: NodeKey, b: NodeKey) -> bool {
        self.cmp.less(&self.nodes[a].item, &self.nodes[b].item)
    }

    /// Splices the detached node `x` into the root list, updating `min`
    fn add_root(&mut self, x: NodeKey) {
        self.nodes[x].parent = None;
        match self.min {
            None => {
                node::make_singleton(&mut self.nodes, x);
                self.min = Some(x);
            }
            Some(min) => {
                node::insert_before(&mut self.nodes, min, x);
                if self.less(x, min) {
                    self.min = Some(x);
                }
            }
        }
    }

    /// Links roots of equal degree until all root degrees are distinct
    ///
    /// `min` must point at some root when called. The roots are captured up
    /// front because linking removes them from the ring mid-walk.
    fn consolidate(&mut self) {
        let Some(start) = self.min else {
            return;
        };
        let roots = node::ring(&self.nodes, start);
        let mut table: SmallVec<[Option<NodeKey>; 64]> = smallvec![None; max_degree(self.len) + 2];

        for &root in &roots {
            let mut x = root;
            let mut d = self.nodes[x].degree;
            loop {
                if d >= table.len() {
                    table.resize(d + 1, None);
                }
                let Some(mut y) = table[d].take() else {
                    break;
                };
                if self.less(y, x) {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                d += 1;
            }
            table[d] = Some(x);
        }

        // Rebuild the root list from the table
        self.min = None;
        let mut survivors = 0usize;
        for x in table.into_iter().flatten() {
            node::make_singleton(&mut self.nodes, x);
            self.add_root(x);
            survivors += 1;
        }
        trace!(roots = roots.len(), survivors, len = self.len, "consolidated root list");
    }

    /// Makes root `y` a child of root `x`
    fn link(&mut self, y: NodeKey, x: NodeKey) {
        node::unlink(&mut self.nodes, y);
        {
            let child = &mut self.nodes[y];
            child.parent = Some(x);
            child.marked = false;
        }
        match self.nodes[x].child {
            Some(first) => node::insert_before(&mut self.nodes, first, y),
            None => self.nodes[x].child = Some(y),
        }
        self.nodes[x].degree += 1;
    }

    /// Moves `x` from `y`'s child list to the root list
    fn cut(&mut self, x: NodeKey, y: NodeKey) {
        let rest = node::unlink(&mut self.nodes, x);
        let parent = &mut self.nodes[y];
        if parent.child == Some(x) {
            parent.child = rest;
        }
        parent.degree -= 1;
        self.nodes[x].marked = false;
        self.add_root(x);
        self.mod_count += 1;
    }

    /// Marks `y`, or cuts it if it already lost a child, walking upwards
    fn cascading_cut(&mut self, mut y: NodeKey) {
        let mut cuts = 0usize;
        while let Some(z) = self.nodes[y].parent {
            if !self.nodes[y].marked {
                self.nodes[y].marked = true;
                break;
            }
            self.cut(y, z);
            cuts += 1;
            y = z;
        }
        if cuts > 0 {
            trace!(cuts, "cascading cut");
        }
    }

    /// Checks every structural invariant
    ///
    /// - every sibling ring is circular with matching `left`/`right` links
    /// - every node's `parent` matches the ring it was reached through
    /// - `degree` equals the length of the child ring and is at most
    ///   [`max_degree`] of the current size
    /// - no child orders before its parent, no root orders before `min`
    /// - roots are never marked
    /// - the number of reachable nodes equals `len()`
    pub fn verify_structure(&self) -> bool {
        let Some(min) = self.min else {
            return self.len == 0 && self.nodes.is_empty();
        };
        let bound = max_degree(self.len);
        let mut reached = 0usize;
        let mut pending: Vec<(NodeKey, Option<NodeKey>)> = vec![(min, None)];

        while let Some((start, parent)) = pending.pop() {
            let Some(members) = self.checked_ring(start) else {
                debug!("sibling ring is not circular");
                return false;
            };
            if parent.is_some_and(|p| self.nodes[p].degree != members.len()) {
                debug!("degree does not match child ring length");
                return false;
            }
            for &k in &members {
                let n = &self.nodes[k];
                reached += 1;
                if reached > self.len || n.parent != parent || n.degree > bound {
                    debug!(reached, degree = n.degree, bound, "node out of place");
                    return false;
                }
                let ordered = match parent {
                    Some(p) => !self.less(k, p),
                    None => !n.marked && !self.less(k, min),
                };
                if !ordered {
                    debug!("heap order or mark invariant violated");
                    return false;
                }
                match n.child {
                    Some(c) => pending.push((c, Some(k))),
                    None if n.degree != 0 => return false,
                    None => {}
                }
            }
        }
        reached == self.len && self.nodes.len() == self.len
    }

    /// Collects a ring, or `None` if it is broken or longer than the heap
    fn checked_ring(&self, start: NodeKey) -> Option<Vec<NodeKey>> {
        let mut members = Vec::new();
        let mut current = start;
        loop {
            let n = self.nodes.get(current)?;
            if self.nodes.get(n.right)?.left != current {
                return None;
            }
            members.push(current);
            if members.len() > self.len {
                return None;
            }
            current = n.right;
            if current == start {
                return Some(members);
            }
        }
    }
}

impl<T: Blank, C: Compare<T> + Default> Heap<T> for FibonacciHeap<T, C> {
    fn new() -> Self {
        Self::with_comparator(C::default())
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, item: T) -> Result<(), HeapError> {
        self.insert(item).map(|_| ())
    }

    fn peek(&self) -> Result<&T, HeapError> {
        FibonacciHeap::peek(self)
    }

    fn pop(&mut self) -> Result<T, HeapError> {
        self.extract_min()
    }

    fn clear(&mut self) {
        FibonacciHeap::clear(self)
    }
}

impl<T: Blank, C: Compare<T> + Default> DecreaseKeyHeap<T> for FibonacciHeap<T, C> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, item: T) -> Result<Self::Handle, HeapError> {
        self.insert(item)
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_item: T) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_item)
    }

    fn delete(&mut self, handle: &Self::Handle) -> Result<T, HeapError> {
        FibonacciHeap::delete(self, handle)
    }
}

impl<T: Blank, C: Compare<T>> FibonacciHeap<T, C> {
    /// Inserts every item, or none of them
    ///
    /// # Errors
    /// Returns `HeapError::BlankItem` if any item is blank; the heap is left
    /// unchanged in that case.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), HeapError> {
        let items: Vec<T> = iter.into_iter().collect();
        if let Some(pos) = items.iter().position(Blank::is_blank) {
            debug!(pos, "rejecting batch with blank item");
            return Err(HeapError::BlankItem);
        }
        for item in items {
            self.insert(item)?;
        }
        Ok(())
    }
}

impl<T: Blank, C: Compare<T> + Default> FibonacciHeap<T, C> {
    /// Builds a heap from every item, failing on the first blank one
    ///
    /// ```rust
    /// use rust_fibonacci_heap::{FibonacciHeap, HeapError};
    ///
    /// let heap: FibonacciHeap<&str> = FibonacciHeap::try_from_iter(["b", "a"]).unwrap();
    /// assert_eq!(heap.peek(), Ok(&"a"));
    ///
    /// let blank: Result<FibonacciHeap<&str>, _> = FibonacciHeap::try_from_iter(["a", "", "b"]);
    /// assert_eq!(blank.unwrap_err(), HeapError::BlankItem);
    /// ```
    pub fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self, HeapError> {
        let mut heap = Self::with_comparator(C::default());
        heap.try_extend(iter)?;
        Ok(heap)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for FibonacciHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("items", &self.iter())
            .finish()
    }
}

/// Renders `[a, b, c]` in walk order (root list, each tree depth-first)
///
/// The order is not sorted; only the first item is guaranteed to be the minimum.
impl<T: fmt::Display, C> fmt::Display for FibonacciHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T, C: Compare<T>>(heap: &mut FibonacciHeap<T, C>) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(item) = heap.extract_min() {
            assert!(heap.verify_structure());
            out.push(item);
        }
        out
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = FibonacciHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.insert(5).unwrap();
        heap.insert(3).unwrap();
        heap.insert(7).unwrap();

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek(), Ok(&3));

        assert_eq!(heap.extract_min(), Ok(3));
        assert_eq!(heap.peek(), Ok(&5));
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_textbook_sequence() {
        let mut heap = FibonacciHeap::new();
        for x in [23, 7, 21, 3, 18, 52, 38, 30, 17, 14, 24, 26, 46, 35] {
            heap.insert(x).unwrap();
        }
        let firsts: Vec<i32> = (0..7).map(|_| heap.extract_min().unwrap()).collect();
        assert_eq!(firsts, vec![3, 7, 14, 17, 18, 21, 23]);
        assert_eq!(heap.len(), 7);
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_single_string() {
        let mut heap = FibonacciHeap::new();
        heap.insert("x").unwrap();
        assert_eq!(heap.peek(), Ok(&"x"));
        assert_eq!(heap.extract_min(), Ok("x"));
        assert_eq!(heap.peek(), Err(HeapError::Empty));
        assert_eq!(heap.extract_min(), Err(HeapError::Empty));
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_extract_then_peek() {
        let mut heap = FibonacciHeap::new();
        for x in [5, 1, 9] {
            heap.insert(x).unwrap();
        }
        assert_eq!(heap.extract_min(), Ok(1));
        assert_eq!(heap.peek(), Ok(&5));
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn test_blank_items_rejected() {
        let mut heap = FibonacciHeap::new();
        assert_eq!(heap.insert(String::new()), Err(HeapError::BlankItem));
        assert_eq!(heap.insert("   ".to_string()), Err(HeapError::BlankItem));
        assert!(heap.is_empty());
        assert_eq!(heap.mod_count(), 0);
    }

    #[test]
    fn test_consolidate_distinct_root_degrees() {
        let mut heap = FibonacciHeap::new();
        for x in 0..100 {
            heap.insert(x).unwrap();
        }
        heap.extract_min().unwrap();

        let roots = node::ring(&heap.nodes, heap.min.unwrap());
        let mut degrees: Vec<usize> = roots.iter().map(|&r| heap.nodes[r].degree).collect();
        degrees.sort_unstable();
        degrees.dedup();
        assert_eq!(degrees.len(), roots.len());
        // 99 = 64 + 32 + 2 + 1 after binomial-style linking
        assert_eq!(roots.len(), 4);
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = FibonacciHeap::new();
        let _h1 = heap.insert(10).unwrap();
        let h2 = heap.insert(20).unwrap();
        let h3 = heap.insert(30).unwrap();

        assert_eq!(heap.peek(), Ok(&10));

        heap.decrease_key(&h2, 5).unwrap();
        assert_eq!(heap.peek(), Ok(&5));

        heap.decrease_key(&h3, 1).unwrap();
        assert_eq!(heap.peek(), Ok(&1));
        assert_eq!(drain(&mut heap), vec![1, 5, 10]);
    }

    #[test]
    fn test_decrease_key_rejections() {
        let mut heap = FibonacciHeap::new();
        let h = heap.insert(10).unwrap();
        assert_eq!(heap.decrease_key(&h, 10), Err(HeapError::KeyNotDecreased));
        assert_eq!(heap.decrease_key(&h, 11), Err(HeapError::KeyNotDecreased));
        assert_eq!(heap.get(&h), Some(&10));

        heap.extract_min().unwrap();
        assert_eq!(heap.decrease_key(&h, 1), Err(HeapError::InvalidHandle));
    }

    #[test]
    fn test_decrease_key_cuts_and_cascades() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..32).map(|x| heap.insert(x * 10).unwrap()).collect();
        // 31 roots consolidate into binomial trees of 16, 8, 4, 2 and 1 nodes
        heap.extract_min().unwrap();
        assert!(heap.verify_structure());

        // Repeatedly pull deep nodes to the top; parents get marked then cut
        let mut expected: Vec<i32> = (1..32).map(|x| x * 10).collect();
        for (i, h) in handles.iter().enumerate().skip(1).rev().step_by(3) {
            let new_key = -(i as i32);
            heap.decrease_key(h, new_key).unwrap();
            expected[i - 1] = new_key;
            assert!(heap.verify_structure());
            assert_eq!(heap.peek(), Ok(expected.iter().min().unwrap()));
        }
        expected.sort_unstable();
        assert_eq!(drain(&mut heap), expected);
    }

    #[test]
    fn test_cut_marks_parent_once() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..9).map(|x| heap.insert(x).unwrap()).collect();
        heap.extract_min().unwrap();
        // Tree rooted at 1 with 8 nodes: children 2, 3 (with 4), 5 (6, 7 (8))
        let parent_of_8 = heap.nodes[handles[8].key].parent.unwrap();
        assert_eq!(heap.nodes[parent_of_8].item, 7);

        heap.decrease_key(&handles[8], -1).unwrap();
        assert!(heap.nodes[parent_of_8].marked);
        assert_eq!(heap.nodes[parent_of_8].degree, 0);
        assert!(heap.verify_structure());

        let before = heap.mod_count();
        heap.decrease_key(&handles[6], -2).unwrap();
        // 5 is marked after losing 6; it is still a child of the root 1
        assert!(heap.nodes[handles[5].key].parent.is_some());
        assert!(heap.nodes[handles[5].key].marked);
        assert_eq!(heap.mod_count(), before + 1);

        heap.decrease_key(&handles[7], -3).unwrap();
        // 5 lost its second child and is cut to the root list, unmarked
        assert!(heap.nodes[handles[5].key].parent.is_none());
        assert!(!heap.nodes[handles[5].key].marked);
        assert!(heap.verify_structure());
        assert_eq!(drain(&mut heap), vec![-3, -2, -1, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_delete_arbitrary() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..20).map(|x| heap.insert(x).unwrap()).collect();
        heap.extract_min().unwrap();

        assert_eq!(heap.delete(&handles[7]), Ok(7));
        assert_eq!(heap.delete(&handles[19]), Ok(19));
        assert_eq!(heap.delete(&handles[1]), Ok(1));
        assert_eq!(heap.delete(&handles[1]), Err(HeapError::InvalidHandle));
        assert!(heap.verify_structure());

        let expected: Vec<i32> = (2..19).filter(|&x| x != 7).collect();
        assert_eq!(drain(&mut heap), expected);
    }

    #[test]
    fn test_clear() {
        let mut heap = FibonacciHeap::new();
        let h = heap.insert(1).unwrap();
        heap.insert(2).unwrap();
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert!(!heap.contains(&h));
        assert_eq!(heap.extract_min(), Err(HeapError::Empty));
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_custom_comparator() {
        let mut heap = FibonacciHeap::from_fn(|a: &i32, b: &i32| a > b);
        for x in [3, 9, 1, 7] {
            heap.insert(x).unwrap();
        }
        let h = heap.insert(0).unwrap();
        // "Decrease" means moving earlier in comparator order
        heap.decrease_key(&h, 100).unwrap();
        assert_eq!(drain(&mut heap), vec![100, 9, 7, 3, 1]);
    }

    #[test]
    fn test_try_extend_is_all_or_nothing() {
        let mut heap = FibonacciHeap::new();
        heap.insert("m".to_string()).unwrap();
        let batch = ["a", "", "b"].map(String::from);
        assert_eq!(heap.try_extend(batch), Err(HeapError::BlankItem));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.mod_count(), 1);

        heap.try_extend(["b", "a"].map(String::from)).unwrap();
        assert_eq!(drain(&mut heap), vec!["a", "b", "m"]);
    }

    #[test]
    fn test_try_from_iter_rejects_blank() {
        let heap: Result<FibonacciHeap<String>, _> =
            FibonacciHeap::try_from_iter(["a", " ", "b"].map(String::from));
        assert_eq!(heap.unwrap_err(), HeapError::BlankItem);

        let heap: FibonacciHeap<Option<u8>> = FibonacciHeap::try_from_iter([Some(3), Some(1)]).unwrap();
        assert_eq!(heap.peek(), Ok(&Some(1)));
    }

    #[test]
    fn test_handle_from_other_heap_is_invalid() {
        let mut a = FibonacciHeap::new();
        let mut b = FibonacciHeap::new();
        let from_a = a.insert(1).unwrap();
        b.insert(10).unwrap();
        // Both heaps put their first item in the same arena slot
        assert!(b.contains(&b.handle_for(from_a.key)));

        assert!(!b.contains(&from_a));
        assert_eq!(b.get(&from_a), None);
        assert_eq!(b.decrease_key(&from_a, 0), Err(HeapError::InvalidHandle));
        assert_eq!(b.delete(&from_a), Err(HeapError::InvalidHandle));
        assert_eq!(b.len(), 1);
        assert_eq!(a.delete(&from_a), Ok(1));
    }

    #[test]
    fn test_max_degree() {
        assert_eq!(max_degree(0), 0);
        assert_eq!(max_degree(1), 0);
        assert_eq!(max_degree(2), 1);
        assert_eq!(max_degree(3), 2);
        assert_eq!(max_degree(100), 9);
    }

    #[test]
    fn test_display() {
        let mut heap = FibonacciHeap::new();
        assert_eq!(heap.to_string(), "[]");
        heap.insert(4).unwrap();
        assert_eq!(heap.to_string(), "[4]");
        heap.insert(2).unwrap();
        let shown = heap.to_string();
        assert!(shown.starts_with("[2"));
        assert!(shown.contains('4'));
    }
}
