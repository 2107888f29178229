//! Persisted state (feature `serde`)
//!
//! A heap serializes as a sequence with a known length: the item count
//! followed by the items in walk order. Length-prefixed formats (bincode,
//! postcard, ...) write the count explicitly; self-describing ones (JSON)
//! write a plain array.
//!
//! Deserialization re-inserts the items in order. The tree shape is not
//! reproduced, but the result is an equivalent valid heap with the same
//! minimum. Blank items are rejected with a custom error.
//!
//! Heaps whose comparator has no `Default` (closures) deserialize through
//! [`WithComparator`]:
//!
//! ```rust
//! use rust_fibonacci_heap::persist::WithComparator;
//! use rust_fibonacci_heap::{FibonacciHeap, FnCompare};
//! use serde::de::DeserializeSeed;
//!
//! let mut de = serde_json::Deserializer::from_str("[1, 5, 3]");
//! let heap: FibonacciHeap<i32, _> = WithComparator::new(FnCompare(|a: &i32, b: &i32| a > b))
//!     .deserialize(&mut de)
//!     .unwrap();
//! assert_eq!(heap.peek(), Ok(&5));
//! ```

use crate::compare::Compare;
use crate::fibonacci::FibonacciHeap;
use crate::item::Blank;
use serde::de::{self, DeserializeSeed, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

impl<T: Serialize, C> Serialize for FibonacciHeap<T, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self.iter() {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<'de, T, C> Deserialize<'de> for FibonacciHeap<T, C>
where
    T: Deserialize<'de> + Blank,
    C: Compare<T> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        WithComparator::new(C::default()).deserialize(deserializer)
    }
}

/// Deserializes a heap ordered by the given comparator
pub struct WithComparator<T, C> {
    cmp: C,
    marker: PhantomData<fn() -> T>,
}

impl<T, C> WithComparator<T, C> {
    pub fn new(cmp: C) -> Self {
        Self {
            cmp,
            marker: PhantomData,
        }
    }
}

impl<'de, T, C> DeserializeSeed<'de> for WithComparator<T, C>
where
    T: Deserialize<'de> + Blank,
    C: Compare<T>,
{
    type Value = FibonacciHeap<T, C>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_seq(HeapVisitor {
            cmp: self.cmp,
            marker: PhantomData,
        })
    }
}

struct HeapVisitor<T, C> {
    cmp: C,
    marker: PhantomData<fn() -> T>,
}

impl<'de, T, C> Visitor<'de> for HeapVisitor<T, C>
where
    T: Deserialize<'de> + Blank,
    C: Compare<T>,
{
    type Value = FibonacciHeap<T, C>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of heap items")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut heap = FibonacciHeap::with_comparator(self.cmp);
        while let Some(item) = seq.next_element()? {
            heap.insert(item).map_err(de::Error::custom)?;
        }
        Ok(heap)
    }
}
