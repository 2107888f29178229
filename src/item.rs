//! Item validation
//!
//! A heap only stores items that carry a usable key. [`Blank`] decides which
//! values do not: empty or whitespace-only strings, `None`, NaN floats and
//! empty collections. Integers, `bool` and `char` are never blank.
//!
//! Implement [`Blank`] for your own item types; the default method accepts
//! every value.
//!
//! ```rust
//! use rust_fibonacci_heap::Blank;
//!
//! struct Task {
//!     name: String,
//! }
//!
//! impl Blank for Task {
//!     fn is_blank(&self) -> bool {
//!         self.name.is_blank()
//!     }
//! }
//!
//! assert!(Task { name: "  ".into() }.is_blank());
//! ```

use std::borrow::Cow;
use std::cmp::Reverse;
use std::rc::Rc;
use std::sync::Arc;

/// Values that may be rejected by `insert` and `decrease_key`
pub trait Blank {
    /// Returns true if the value must not be stored in a heap
    fn is_blank(&self) -> bool {
        false
    }
}

macro_rules! never_blank {
    ($($t:ty),* $(,)?) => {
        $(impl Blank for $t {})*
    };
}

never_blank!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char);

impl Blank for f32 {
    fn is_blank(&self) -> bool {
        self.is_nan()
    }
}

impl Blank for f64 {
    fn is_blank(&self) -> bool {
        self.is_nan()
    }
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

impl<T: Blank + ?Sized> Blank for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank + ?Sized> Blank for Box<T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank + ?Sized> Blank for Rc<T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank + ?Sized> Blank for Arc<T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank + ToOwned + ?Sized> Blank for Cow<'_, T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Blank::is_blank)
    }
}

impl<T: Blank> Blank for Reverse<T> {
    fn is_blank(&self) -> bool {
        self.0.is_blank()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for [T] {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<A: Blank, B: Blank> Blank for (A, B) {
    fn is_blank(&self) -> bool {
        self.0.is_blank() || self.1.is_blank()
    }
}

impl<A: Blank, B: Blank, C: Blank> Blank for (A, B, C) {
    fn is_blank(&self) -> bool {
        self.0.is_blank() || self.1.is_blank() || self.2.is_blank()
    }
}
