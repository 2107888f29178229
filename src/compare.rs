//! Comparators
//!
//! The heap orders items with a single comparator fixed at construction.
//! A comparator answers one question: is `a` strictly less than `b`?
//!
//! - [`NaturalOrder`] delegates to the items' own `PartialOrd`
//! - [`FnCompare`] wraps any `Fn(&T, &T) -> bool`
//!
//! ```rust
//! use rust_fibonacci_heap::FibonacciHeap;
//!
//! // Max-heap over string lengths
//! let mut heap = FibonacciHeap::from_fn(|a: &String, b: &String| a.len() > b.len());
//! heap.insert("ab".to_string()).unwrap();
//! heap.insert("abcd".to_string()).unwrap();
//! assert_eq!(heap.peek().map(String::as_str), Ok("abcd"));
//! ```

use std::fmt;

/// Strict "less than" ordering used by a heap
pub trait Compare<T: ?Sized> {
    /// Returns true if `a` orders strictly before `b`
    fn less(&self, a: &T, b: &T) -> bool;
}

/// Orders items by their own `PartialOrd` implementation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: PartialOrd + ?Sized> Compare<T> for NaturalOrder {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Orders items with a closure returning "a is strictly less than b"
#[derive(Clone, Copy)]
pub struct FnCompare<F>(pub F);

impl<F> fmt::Debug for FnCompare<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnCompare").finish_non_exhaustive()
    }
}

impl<T: ?Sized, F: Fn(&T, &T) -> bool> Compare<T> for FnCompare<F> {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b)
    }
}

impl<T: ?Sized, C: Compare<T> + ?Sized> Compare<T> for &C {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        (**self).less(a, b)
    }
}
