//! Node storage and circular-list splicing
//!
//! Nodes live in a [`SlotMap`] arena and refer to each other by [`NodeKey`]
//! instead of by pointer. Every sibling list (the root list, or the children
//! of one parent) is a circular doubly linked list threaded through `left`
//! and `right`; a detached node is a ring of one that points at itself.
//!
//! The primitives here know nothing about heap order. They assume the rings
//! they are handed are well formed and never fail.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Stable key of a node in the heap arena
    pub struct NodeKey;
}

/// One stored item and its links
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) item: T,
    /// Owning node when this node sits in a child list, `None` for roots
    pub(crate) parent: Option<NodeKey>,
    /// Entry point into the child ring
    pub(crate) child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
    /// Number of nodes in the child ring
    pub(crate) degree: usize,
    /// Lost a child since it was last linked under its parent
    pub(crate) marked: bool,
}

pub(crate) type Arena<T> = SlotMap<NodeKey, Node<T>>;

/// Sibling keys collected from one ring
pub(crate) type Ring = SmallVec<[NodeKey; 16]>;

/// Allocates a detached node (a ring of one)
pub(crate) fn alloc<T>(arena: &mut Arena<T>, item: T) -> NodeKey {
    arena.insert_with_key(|key| Node {
        item,
        parent: None,
        child: None,
        left: key,
        right: key,
        degree: 0,
        marked: false,
    })
}

/// Makes `x` a ring of one without touching its former neighbours
pub(crate) fn make_singleton<T>(arena: &mut Arena<T>, x: NodeKey) {
    let node = &mut arena[x];
    node.left = x;
    node.right = x;
}

/// Splices the detached node `x` into `anchor`'s ring, just left of `anchor`
pub(crate) fn insert_before<T>(arena: &mut Arena<T>, anchor: NodeKey, x: NodeKey) {
    let anchor_left = arena[anchor].left;
    {
        let node = &mut arena[x];
        node.right = anchor;
        node.left = anchor_left;
    }
    arena[anchor_left].right = x;
    arena[anchor].left = x;
}

/// Unlinks `x` from its ring, leaving `x` detached
///
/// Returns a remaining member of the ring, or `None` if `x` was alone.
/// Callers fix up any entry pointer (a parent's `child`, the heap's `min`)
/// that referred to `x`.
pub(crate) fn unlink<T>(arena: &mut Arena<T>, x: NodeKey) -> Option<NodeKey> {
    let (left, right) = {
        let node = &arena[x];
        (node.left, node.right)
    };
    if right == x {
        return None;
    }
    arena[left].right = right;
    arena[right].left = left;
    make_singleton(arena, x);
    Some(right)
}

/// Collects every member of the ring containing `start`, following `right`
pub(crate) fn ring<T>(arena: &Arena<T>, start: NodeKey) -> Ring {
    let mut members = Ring::new();
    let mut current = start;
    loop {
        members.push(current);
        current = arena[current].right;
        if current == start {
            break;
        }
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;

    fn right_walk(arena: &Arena<i32>, start: NodeKey) -> Vec<i32> {
        ring(arena, start).iter().map(|&k| arena[k].item).collect()
    }

    fn left_walk(arena: &Arena<i32>, start: NodeKey) -> Vec<i32> {
        let mut out = vec![arena[start].item];
        let mut current = arena[start].left;
        while current != start {
            out.push(arena[current].item);
            current = arena[current].left;
        }
        out
    }

    #[test]
    fn test_alloc_is_singleton() {
        let mut arena: Arena<i32> = SlotMap::with_key();
        let a = alloc(&mut arena, 1);
        assert_eq!(arena[a].left, a);
        assert_eq!(arena[a].right, a);
        assert_eq!(right_walk(&arena, a), vec![1]);
    }

    #[test]
    fn test_insert_before_keeps_ring_circular() {
        let mut arena: Arena<i32> = SlotMap::with_key();
        let a = alloc(&mut arena, 1);
        let b = alloc(&mut arena, 2);
        let c = alloc(&mut arena, 3);
        insert_before(&mut arena, a, b);
        insert_before(&mut arena, a, c);

        assert_eq!(right_walk(&arena, a), vec![1, 2, 3]);
        assert_eq!(left_walk(&arena, a), vec![1, 3, 2]);
    }

    #[test]
    fn test_unlink_middle_and_last() {
        let mut arena: Arena<i32> = SlotMap::with_key();
        let a = alloc(&mut arena, 1);
        let b = alloc(&mut arena, 2);
        let c = alloc(&mut arena, 3);
        insert_before(&mut arena, a, b);
        insert_before(&mut arena, a, c);

        assert_eq!(unlink(&mut arena, b), Some(c));
        assert_eq!(right_walk(&arena, a), vec![1, 3]);
        assert_eq!(left_walk(&arena, a), vec![1, 3]);
        assert_eq!(right_walk(&arena, b), vec![2]);

        assert_eq!(unlink(&mut arena, c), Some(a));
        assert_eq!(unlink(&mut arena, a), None);
        assert_eq!(right_walk(&arena, a), vec![1]);
    }
}
