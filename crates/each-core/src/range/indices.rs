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

//! # Index Range Iteration
//!
//! `IndexRange` is the resolved, validated form of a `RangeSpec`: an inclusive
//! `[start, end]` window walked with a fixed `step`, front-to-back or, when
//! `reverse` is set, back-to-front starting at `end`. Note that the reverse
//! walk is anchored at `end`, so it is not the mirror image of the forward
//! walk whenever `end - start` is not a multiple of `step`.
//!
//! ## Highlights
//!
//! - Implements `Iterator`, `DoubleEndedIterator`, `ExactSizeIterator` and
//!   `FusedIterator`; the length is known up front.
//! - An empty window (`start > end`) is a valid, empty range.
//! - `Length` abstracts over what a range can be taken over: a plain length,
//!   slices, arrays, `Vec` and `VecDeque`.

use super::spec::{RangeArgs, RangeSpec};
use crate::error::{EachError, Result};
use num_traits::ToPrimitive;
use std::{collections::VecDeque, iter::FusedIterator};

/// Anything with a number of addressable elements.
pub trait Length {
    fn length(&self) -> usize;
}

impl Length for usize {
    #[inline]
    fn length(&self) -> usize {
        *self
    }
}

impl<T> Length for [T] {
    #[inline]
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> Length for [T; N] {
    #[inline]
    fn length(&self) -> usize {
        N
    }
}

impl<T> Length for Vec<T> {
    #[inline]
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Length for VecDeque<T> {
    #[inline]
    fn length(&self) -> usize {
        self.len()
    }
}

impl<L> Length for &L
where
    L: Length + ?Sized,
{
    #[inline]
    fn length(&self) -> usize {
        (**self).length()
    }
}

/// Produces the indices of `source` described by `args`.
///
/// # Errors
///
/// Returns `InvalidArgument` if the range fails validation; nothing is
/// produced in that case.
///
/// # Examples
///
/// ```rust
/// use each_core::range::{indices, RangeArg, RangeOptions};
///
/// let letters = ["a", "b", "c", "d", "e", "f"];
///
/// let all: Vec<usize> = indices(&letters, ()).unwrap().collect();
/// assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);
///
/// let every_other: Vec<usize> = indices(&letters, [RangeArg::from(0), RangeArg::from(-1), RangeArg::from(2)])
///     .unwrap()
///     .collect();
/// assert_eq!(every_other, vec![0, 2, 4]);
///
/// let reversed: Vec<usize> = indices(6usize, RangeOptions::new().with_reverse(true))
///     .unwrap()
///     .collect();
/// assert_eq!(reversed, vec![5, 4, 3, 2, 1, 0]);
/// ```
pub fn indices<L, A>(source: L, args: A) -> Result<IndexRange>
where
    L: Length,
    A: Into<RangeArgs>,
{
    RangeSpec::from(args.into()).resolve(source.length())
}

/// Resolves a possibly negative (from-end) element index against `len`.
///
/// # Errors
///
/// Returns `OutOfRange` if no element corresponds to `index`.
///
/// # Examples
///
/// ```rust
/// # use each_core::range::resolve_index;
///
/// assert_eq!(resolve_index(0, 3).unwrap(), 0);
/// assert_eq!(resolve_index(-1, 3).unwrap(), 2);
/// assert!(resolve_index(3, 3).is_err());
/// assert!(resolve_index(-4, 3).is_err());
/// ```
pub fn resolve_index(index: isize, len: usize) -> Result<usize> {
    let out_of_range = || EachError::OutOfRange { index, len };
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        index.to_usize()
    };
    resolved.filter(|i| *i < len).ok_or_else(out_of_range)
}

/// A lazy, validated sequence of indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexRange {
    start: usize,
    end: Option<usize>,
    step: usize,
    reverse: bool,
    front: usize,
    back: usize,
}

impl IndexRange {
    /// Builds a range from already validated bounds.
    ///
    /// `start` and `step` must be non-negative and positive respectively; a
    /// negative `end` yields an empty range.
    pub(crate) fn from_bounds(start: i64, end: i64, step: i64, reverse: bool) -> Self {
        debug_assert!(start >= 0, "called `IndexRange::from_bounds` with a negative start");
        debug_assert!(step > 0, "called `IndexRange::from_bounds` with a non-positive step");

        // Bounds past `usize::MAX` cannot address anything, so clamping them
        // does not change which indices are produced.
        let start = start.to_usize().unwrap_or(usize::MAX);
        let step = step.to_usize().unwrap_or(usize::MAX);
        let end = if end < 0 {
            None
        } else {
            Some(end.to_usize().unwrap_or(usize::MAX))
        };

        let count = match end {
            Some(end) if end >= start => ((end - start) / step).saturating_add(1),
            _ => 0,
        };

        Self {
            start,
            end,
            step,
            reverse,
            front: 0,
            back: count,
        }
    }

    /// Every index of a sequence of `length` elements, optionally back-to-front.
    ///
    /// Equivalent to resolving the default range, but infallible.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use each_core::range::IndexRange;
    ///
    /// assert_eq!(IndexRange::all(3, true).collect::<Vec<_>>(), vec![2, 1, 0]);
    /// assert_eq!(IndexRange::all(0, false).len(), 0);
    /// ```
    pub fn all(length: usize, reverse: bool) -> Self {
        let end = length.to_i64().unwrap_or(i64::MAX) - 1;
        Self::from_bounds(0, end, 1, reverse)
    }

    /// The inclusive lower bound.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// The resolved inclusive upper bound, `None` if it resolved below zero.
    #[inline]
    pub fn end(&self) -> Option<usize> {
        self.end
    }

    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// The `k`-th index of the full (unconsumed) range.
    #[inline]
    fn nth_index(&self, k: usize) -> usize {
        let offset = k * self.step;
        match (self.reverse, self.end) {
            (true, Some(end)) => end - offset,
            _ => self.start + offset,
        }
    }
}

impl Iterator for IndexRange {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let index = self.nth_index(self.front);
        self.front += 1;
        Some(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for IndexRange {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.nth_index(self.back))
    }
}

impl ExactSizeIterator for IndexRange {
    #[inline]
    fn len(&self) -> usize {
        self.back - self.front
    }
}

impl FusedIterator for IndexRange {}

impl std::fmt::Display for IndexRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end {
            Some(end) => write!(
                f,
                "IndexRange([{}, {}], step: {}, reverse: {})",
                self.start, end, self.step, self.reverse
            ),
            None => write!(f, "IndexRange(empty)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorKind,
        range::{Number, RangeArg, RangeOptions},
    };
    use std::iter::FusedIterator;

    fn run(length: usize, options: RangeOptions) -> Vec<usize> {
        indices(length, options).unwrap().collect()
    }

    #[test]
    fn test_default_range() {
        assert_eq!(run(6, RangeOptions::new()), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reverse_range() {
        assert_eq!(
            run(6, RangeOptions::new().with_reverse(true)),
            vec![5, 4, 3, 2, 1, 0]
        );
    }

    #[test]
    fn test_start_end_step() {
        let options = RangeOptions::new().with_start(1).with_end(-2).with_step(2);
        assert_eq!(run(6, options), vec![1, 3]);
        assert_eq!(run(6, options.with_reverse(true)), vec![4, 2]);
    }

    #[test]
    fn test_non_negative_end_is_inclusive() {
        assert_eq!(run(6, RangeOptions::new().with_end(4)), vec![0, 1, 2, 3, 4]);
        assert_eq!(run(6, RangeOptions::new().with_end(-2)), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_when_start_exceeds_end() {
        assert!(run(6, RangeOptions::new().with_start(5).with_end(2)).is_empty());
        assert!(run(0, RangeOptions::new()).is_empty());
        assert!(run(0, RangeOptions::new().with_reverse(true)).is_empty());
    }

    #[test]
    fn test_on_slices_and_collections() {
        let letters = ['a', 'b', 'c'];
        let v: Vec<usize> = indices(&letters[..], ()).unwrap().collect();
        assert_eq!(v, vec![0, 1, 2]);

        let deque: VecDeque<u8> = (0..4).collect();
        let v: Vec<usize> = indices(&deque, [RangeArg::from(true)]).unwrap().collect();
        assert_eq!(v, vec![3, 2, 1, 0]);

        let vec = vec![(); 2];
        assert_eq!(indices(&vec, ()).unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_step_fails_eagerly() {
        let err = indices(6usize, RangeOptions::new().with_step(-1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_fractional_start_fails() {
        let err = indices(6usize, RangeOptions::new().with_start(Number::Float(1.5))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), "start must be a positive integer");
    }

    #[test]
    fn test_exact_size_and_double_ended() {
        let mut range = indices(10usize, RangeOptions::new().with_step(3)).unwrap();
        assert_eq!(range.len(), 4);
        assert_eq!(range.next(), Some(0));
        assert_eq!(range.next_back(), Some(9));
        assert_eq!(range.len(), 2);
        assert_eq!(range.next(), Some(3));
        assert_eq!(range.next_back(), Some(6));
        assert_eq!(range.next(), None);
        assert_eq!(range.next_back(), None);
    }

    #[test]
    fn test_all_matches_default_range() {
        for length in [0usize, 1, 6] {
            let resolved: Vec<usize> = indices(length, ()).unwrap().collect();
            assert_eq!(IndexRange::all(length, false).collect::<Vec<_>>(), resolved);

            let reversed: Vec<usize> = indices(length, [RangeArg::from(true)]).unwrap().collect();
            assert_eq!(IndexRange::all(length, true).collect::<Vec<_>>(), reversed);
        }
    }

    #[test]
    fn test_nth() {
        let mut range = indices(10usize, ()).unwrap();
        assert_eq!(range.nth(3), Some(3));
        assert_eq!(range.nth(100), None);
        assert_eq!(range.next(), None);
    }

    #[test]
    fn test_fused() {
        let mut range = indices(1usize, ()).unwrap();
        assert_eq!(range.next(), Some(0));
        assert_eq!(range.next(), None);
        assert_eq!(range.next(), None);

        fn assert_fused<I: FusedIterator>(_: I) {}
        assert_fused(range);
    }

    #[test]
    fn test_accessors_and_display() {
        let range = indices(6usize, RangeOptions::new().with_start(1).with_step(2)).unwrap();
        assert_eq!(range.start(), 1);
        assert_eq!(range.end(), Some(5));
        assert_eq!(range.step(), 2);
        assert!(!range.is_reverse());
        assert_eq!(range.to_string(), "IndexRange([1, 5], step: 2, reverse: false)");

        let empty = indices(0usize, ()).unwrap();
        assert_eq!(empty.end(), None);
        assert_eq!(empty.to_string(), "IndexRange(empty)");
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index(2, 3).unwrap(), 2);
        assert_eq!(resolve_index(-3, 3).unwrap(), 0);
        assert_eq!(resolve_index(0, 0).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(
            resolve_index(isize::MIN, 3).unwrap_err(),
            EachError::OutOfRange {
                index: isize::MIN,
                len: 3
            }
        );
    }
}
