// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Each
//!
//! Uniform, lazy iteration over collections, iterator factories, single
//! values, object property sets and index ranges.
//!
//! ## Highlights
//!
//! - `each!` concatenates any number of iterables into one [`Each`] sequence.
//! - Whole-sequence transforms (`filter`, `sort`, `unique`, `shuffle`) leave
//!   the sequence re-iterable.
//! - [`keys`] enumerates property keys, values, entries or descriptors across
//!   prototype chains through the [`Reflect`] capability.
//! - [`index_of`] walks indices with start, end, step and reverse, with
//!   negative ends counting from the back.
//!
//! ## Usage
//!
//! ```rust
//! use each::{each, keys, ObjectGraph};
//!
//! let mut sequence = each![vec![3, 1], [2, 3], std::iter::once(4)];
//! sequence.unique().sort();
//! assert_eq!(sequence.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
//!
//! let mut graph = ObjectGraph::new();
//! let point = graph.create(graph.root());
//! graph.set(point, "x", 1.0);
//! graph.set(point, "y", 2.5);
//!
//! let names: Vec<_> = keys().name_of(&graph, [point]).unwrap().into_iter().collect();
//! assert_eq!(names, ["x", "y"]);
//! ```
//!
//! ## Modules
//!
//! - `dispatch`: `each`, `from_fn`, `once`, `index_of` and `prototype_of`.
//! - `keys`: `KeyView`, the own/defined view over `key_of`, `name_of`,
//!   `symbol_of`, `value_of`, `entry_of` and `descriptor_of`.
//!
//! The building blocks are re-exported as `range`, `error`, `iter` and
//! `reflect`.

pub mod dispatch;
pub mod keys;

pub use dispatch::{each, from_fn, index_of, once, prototype_of};
pub use each_core::{EachError, ErrorKind, Result, error, range};
pub use each_iter::{self as iter, Each, Effect, Predicate};
pub use each_reflect::{
    self as reflect, Descriptor, KeyFilter, KeyType, ObjectGraph, ObjectId, PropertyDescriptor,
    PropertyKey, Reflect, Symbol,
};
pub use keys::{KeyView, keys};

/// Concatenates any number of iterables into one [`Each`] sequence.
///
/// Every argument must yield the same item type. Without arguments the
/// sequence is empty.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
///
/// let set = BTreeSet::from([3, 4]);
/// let all: Vec<i32> = each::each![[1, 2], set, 5..=6].into_iter().collect();
/// assert_eq!(all, vec![1, 2, 3, 4, 5, 6]);
/// ```
#[macro_export]
macro_rules! each {
    () => {
        $crate::Each::new()
    };
    ($($source:expr),+ $(,)?) => {
        $crate::Each::new()$(.chain($source))+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_concatenates_in_order() {
        let sequence = each![vec![1], vec![2, 3],];
        assert_eq!(sequence.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_macro_without_sources_is_empty() {
        let mut sequence: Each<'_, char> = each![];
        assert_eq!(sequence.next(), None);
        assert!(sequence.first().is_err());
    }

    #[test]
    fn test_macro_accepts_sequences() {
        let inner = each![0..2];
        let mut outer = each![inner, [5]];
        assert_eq!(outer.to_vec(), vec![0, 1, 5]);
    }

    #[test]
    fn test_index_of_over_each_output() {
        let mut sequence = each![["a", "b", "c", "d"]];
        sequence.shuffle().sort();
        let letters = sequence.as_slice().to_vec();
        let picked: Vec<_> = index_of(&letters, range::RangeOptions::new().with_start(1))
            .unwrap()
            .map(|&i, _, _| letters[i])
            .into_iter()
            .collect();
        assert_eq!(picked, vec!["b", "c", "d"]);
    }
}
