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

//! # Multi-Source Sequences
//!
//! `Each<'a, T>` presents any number of sources as one pull-based sequence
//! and offers operations that need the whole sequence at once.
//!
//! ## State
//!
//! An `Each` is made of two parts:
//!
//! - a queue of pending lazy sources, drained front-to-back, and
//! - an optional materialized buffer, which always sits in front of the
//!   pending sources.
//!
//! Materializing drains every pending source (and whatever the buffer still
//! holds) into the buffer, which then is the only remaining entry. Transforms
//! (`filter`, `sort`, `unique`, `shuffle`) mutate that buffer in place, so
//! pulling from the same instance afterwards observes the transformed
//! contents. Sources pushed after a materialization queue up behind the
//! buffer.
//!
//! Accessors (`at`, `first`, `last`, `find`, `assert`, `count`, `apply`)
//! materialize but do not consume. `to_vec` and `map` drain the instance.
//!
//! `Each` is not an `Iterator` itself, so these methods never collide with
//! the iterator adaptors of the same name. Pull with `next`, or iterate
//! through `into_iter()`, `drain()` or `&mut each`.
//!
//! Materializing never terminates on an infinite source.
//!
//! ## Usage
//!
//! ```rust
//! use each_iter::Each;
//!
//! let mut numbers = Each::from_sources([vec![3, 1, 2], vec![2, 5]]);
//! numbers.unique().sort();
//!
//! assert_eq!(numbers.count(), 4);
//! assert_eq!(*numbers.last().unwrap(), 5);
//! assert_eq!(numbers.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 5]);
//! ```

use crate::source::SourceQueue;
use each_core::{
    error::{EachError, Result},
    range::{IndexRange, resolve_index},
};
use rand::{Rng, seq::SliceRandom};
use rustc_hash::FxHashSet;
use std::{cmp::Ordering, collections::VecDeque, hash::Hash};

/// A borrowed element test.
pub type Predicate<'p, T> = &'p dyn Fn(&T) -> bool;

/// A borrowed per-element side effect, called with the element, its index
/// and the whole materialized sequence.
pub type Effect<'e, T> = &'e mut dyn FnMut(&T, usize, &[T]);

/// A lazy concatenation of sources.
pub struct Each<'a, T> {
    buffer: Option<VecDeque<T>>,
    sources: SourceQueue<'a, T>,
}

impl<'a, T> Default for Each<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> Each<'a, T> {
    /// Creates an empty sequence.
    #[inline]
    pub fn new() -> Self {
        Self {
            buffer: None,
            sources: SourceQueue::new(),
        }
    }

    /// Creates a sequence draining `sources` in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use each_iter::Each;
    ///
    /// let each = Each::from_sources([vec![1, 2], vec![], vec![3]]);
    /// assert_eq!(each.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    pub fn from_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
        S::IntoIter: 'a,
    {
        let mut each = Self::new();
        for source in sources {
            each.push_source(source);
        }
        each
    }

    /// Appends a source behind everything already queued.
    #[inline]
    pub fn push_source<S>(&mut self, source: S)
    where
        S: IntoIterator<Item = T>,
        S::IntoIter: 'a,
    {
        self.sources.push(source);
    }

    /// Appends a source and returns the sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use each_iter::Each;
    /// use std::collections::{BTreeMap, BTreeSet};
    ///
    /// let set = BTreeSet::from([4, 5]);
    /// let map = BTreeMap::from([(6, "six")]);
    ///
    /// let each = Each::new()
    ///     .chain(vec![1, 2, 3])
    ///     .chain(set)
    ///     .chain(map.into_keys());
    /// assert_eq!(each.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    /// ```
    #[inline]
    pub fn chain<S>(mut self, source: S) -> Self
    where
        S: IntoIterator<Item = T>,
        S::IntoIter: 'a,
    {
        self.push_source(source);
        self
    }

    /// Whether a materialized buffer is queued.
    #[inline]
    pub fn is_materialized(&self) -> bool {
        self.buffer.is_some()
    }

    /// Number of lazy sources not yet consumed.
    #[inline]
    pub fn pending_sources(&self) -> usize {
        self.sources.len()
    }

    /// Pulls the next element: the buffer first, then the pending sources.
    ///
    /// Returns `None` once everything is drained; appending a source
    /// afterwards makes the sequence productive again.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<T> {
        if let Some(buffer) = self.buffer.as_mut() {
            if let Some(value) = buffer.pop_front() {
                return Some(value);
            }
            self.buffer = None;
        }
        self.sources.pull()
    }

    /// Bounds on the number of remaining elements.
    pub fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.buffer.as_ref().map_or(0, VecDeque::len);
        let (lo, hi) = self.sources.size_hint();
        (
            lo.saturating_add(buffered),
            hi.and_then(|hi| hi.checked_add(buffered)),
        )
    }

    /// Borrows the sequence as a standard iterator that pulls elements out
    /// of it.
    ///
    /// Dropping the iterator early leaves the remaining elements queued.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use each_iter::Each;
    ///
    /// let mut each = Each::from_sources([vec![1, 2, 3]]);
    /// let head: Vec<_> = each.drain().take(2).collect();
    /// assert_eq!(head, vec![1, 2]);
    /// assert_eq!(each.to_vec(), vec![3]);
    /// ```
    #[inline]
    pub fn drain(&mut self) -> Drain<'_, 'a, T> {
        Drain { each: self }
    }

    /// Drains every pending source into the buffer and returns it.
    ///
    /// Elements already in the buffer stay in front.
    fn materialize(&mut self) -> &mut VecDeque<T> {
        let mut buffer = self.buffer.take().unwrap_or_default();
        let buffered = buffer.len();
        let sources = self.sources.len();
        while let Some(value) = self.sources.pull() {
            buffer.push_back(value);
        }
        tracing::debug!(
            buffered,
            drained = buffer.len() - buffered,
            sources,
            "materialized sequence"
        );
        self.buffer.insert(buffer)
    }

    /// Materializes and borrows the whole sequence.
    #[inline]
    pub fn as_slice(&mut self) -> &[T] {
        self.materialize().make_contiguous()
    }

    /// Drains the whole sequence into a vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use each_iter::Each;
    ///
    /// let mut each = Each::from_sources([vec![1], vec![2]]);
    /// assert_eq!(each.to_vec(), vec![1, 2]);
    /// assert_eq!(each.next(), None);
    /// ```
    pub fn to_vec(&mut self) -> Vec<T> {
        self.materialize();
        self.buffer.take().map(Vec::from).unwrap_or_default()
    }

    /// Keeps the elements accepted by every predicate.
    ///
    /// Predicates are consulted back-to-front; rejected elements are then
    /// removed in place in a single pass.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use each_iter::Each;
    ///
    /// let mut each = Each::from_sources([vec![1, 2, 3], vec![4, 5, 6]]);
    /// each.filter(&[&|n: &i32| *n > 1, &|n: &i32| n % 2 == 0]);
    /// assert_eq!(each.into_iter().collect::<Vec<_>>(), vec![2, 4, 6]);
    /// ```
    pub fn filter(&mut self, predicates: &[Predicate<'_, T>]) -> &mut Self {
        let buffer = self.materialize();
        let removed = remove_rejected(buffer, |_, value| {
            predicates.iter().all(|predicate| predicate(value))
        });
        tracing::debug!(removed, predicates = predicates.len(), "filtered sequence");
        self
    }

    /// Sorts the sequence in place with `compare`.
    pub fn sort_by<F>(&mut self, compare: F) -> &mut Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let buffer = self.materialize();
        buffer.make_contiguous().sort_by(compare);
        tracing::debug!(len = buffer.len(), "sorted sequence");
        self
    }

    /// Sorts the sequence in place by its natural order.
    #[inline]
    pub fn sort(&mut self) -> &mut Self
    where
        T: Ord,
    {
        self.sort_by(T::cmp)
    }

    /// Drops every repeated element; the first occurrence is kept.
    pub fn unique(&mut self) -> &mut Self
    where
        T: Eq + Hash,
    {
        let buffer = self.materialize();
        let keep = first_occurrences(buffer);
        let removed = remove_rejected(buffer, |index, _| keep[index]);
        tracing::debug!(removed, "removed duplicates");
        self
    }

    /// Shuffles the sequence in place with the thread-local generator.
    #[inline]
    pub fn shuffle(&mut self) -> &mut Self {
        self.shuffle_with(&mut rand::rng())
    }

    /// Shuffles the sequence in place with `rng`, uniformly over every
    /// permutation.
    pub fn shuffle_with<R>(&mut self, rng: &mut R) -> &mut Self
    where
        R: Rng + ?Sized,
    {
        let buffer = self.materialize();
        buffer.make_contiguous().shuffle(rng);
        tracing::debug!(len = buffer.len(), "shuffled sequence");
        self
    }

    /// Drains the sequence and maps it into a new, independent one.
    ///
    /// `mapper` receives each element, its index and the whole drained
    /// sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use each_iter::Each;
    ///
    /// let mut each = Each::from_sources([vec![1, 2, 3], vec![4, 5, 6]]);
    /// let doubled = each.map(|n, _, _| n * 2);
    /// assert_eq!(doubled.into_iter().collect::<Vec<_>>(), vec![2, 4, 6, 8, 10, 12]);
    /// assert_eq!(each.count(), 0);
    /// ```
    pub fn map<U, F>(&mut self, mut mapper: F) -> Each<'a, U>
    where
        F: FnMut(&T, usize, &[T]) -> U,
    {
        let values = self.to_vec();
        let mapped: Vec<U> = values
            .iter()
            .enumerate()
            .map(|(index, value)| mapper(value, index, &values))
            .collect();
        Each::from(mapped)
    }

    /// Returns the element at `index`; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if no element corresponds to `index`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use each_iter::Each;
    ///
    /// let mut each = Each::from_sources([vec!['a', 'b'], vec!['c']]);
    /// assert_eq!(*each.at(1).unwrap(), 'b');
    /// assert_eq!(*each.at(-1).unwrap(), 'c');
    /// assert!(each.at(3).is_err());
    /// ```
    pub fn at(&mut self, index: isize) -> Result<&T> {
        let buffer = self.materialize();
        let index = resolve_index(index, buffer.len())?;
        Ok(&buffer[index])
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if the sequence is empty.
    #[inline]
    pub fn first(&mut self) -> Result<&T> {
        self.at(0)
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if the sequence is empty.
    #[inline]
    pub fn last(&mut self) -> Result<&T> {
        self.at(-1)
    }

    /// Returns the first element accepted by any predicate.
    ///
    /// Elements are visited in order and, for each element, the predicates
    /// are tried in the order given before moving on.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use each_iter::Each;
    ///
    /// let mut each = Each::from_sources([vec![1, 7, 8]]);
    /// let found = each.find(&[&|n: &i32| n % 2 == 0, &|n: &i32| *n > 5]);
    /// assert_eq!(found, Some(&7));
    /// ```
    pub fn find(&mut self, predicates: &[Predicate<'_, T>]) -> Option<&T> {
        self.materialize()
            .iter()
            .find(|value| predicates.iter().any(|predicate| predicate(*value)))
    }

    /// Like [`Each::find`], but a miss is an error.
    ///
    /// # Errors
    ///
    /// `NotFound` if no element is accepted by any predicate.
    pub fn assert(&mut self, predicates: &[Predicate<'_, T>]) -> Result<&T> {
        let count = predicates.len();
        self.find(predicates)
            .ok_or(EachError::NotFound { predicates: count })
    }

    /// Number of elements, materializing the sequence.
    #[inline]
    pub fn count(&mut self) -> usize {
        self.materialize().len()
    }

    /// Runs each effect over every element.
    ///
    /// Effects run one after another: the first effect sees every element
    /// before the second effect starts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use each_iter::Each;
    ///
    /// let mut log = Vec::new();
    /// let mut sum = 0;
    /// Each::from_sources([vec![1, 2]]).apply(&mut [
    ///     &mut |n: &i32, i: usize, _: &[i32]| log.push((i, *n)),
    ///     &mut |n: &i32, _: usize, _: &[i32]| sum += n,
    /// ]);
    /// assert_eq!(log, vec![(0, 1), (1, 2)]);
    /// assert_eq!(sum, 3);
    /// ```
    pub fn apply(&mut self, effects: &mut [Effect<'_, T>]) -> &mut Self {
        let values: &[T] = self.materialize().make_contiguous();
        for effect in effects.iter_mut() {
            for (index, value) in values.iter().enumerate() {
                effect(value, index, values);
            }
        }
        self
    }
}

/// Removes every element `keep` rejects and returns how many were removed.
///
/// `keep` is consulted back-to-front; the rejected elements are then
/// dropped in a single pass that preserves the order of the rest.
fn remove_rejected<T, F>(buffer: &mut VecDeque<T>, mut keep: F) -> usize
where
    F: FnMut(usize, &T) -> bool,
{
    let len = buffer.len();
    let mut mask = vec![true; len];
    for index in IndexRange::all(len, true) {
        mask[index] = keep(index, &buffer[index]);
    }

    let mut index = 0;
    buffer.retain(|_| {
        let kept = mask[index];
        index += 1;
        kept
    });
    len - buffer.len()
}

/// Marks the first occurrence of every distinct element.
fn first_occurrences<T>(buffer: &VecDeque<T>) -> Vec<bool>
where
    T: Eq + Hash,
{
    let mut seen = FxHashSet::default();
    buffer.iter().map(|value| seen.insert(value)).collect()
}

impl<'a, T> From<Vec<T>> for Each<'a, T> {
    /// Wraps an already materialized sequence.
    fn from(values: Vec<T>) -> Self {
        Self {
            buffer: Some(VecDeque::from(values)),
            sources: SourceQueue::new(),
        }
    }
}

impl<'a, T> FromIterator<T> for Each<'a, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

/// A borrowing iterator pulling elements out of an [`Each`].
///
/// Created by [`Each::drain`] or by iterating `&mut Each`.
pub struct Drain<'e, 'a, T> {
    each: &'e mut Each<'a, T>,
}

impl<'e, 'a, T> Iterator for Drain<'e, 'a, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.each.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.each.size_hint()
    }
}

/// An owning iterator over the elements of an [`Each`].
pub struct IntoIter<'a, T> {
    each: Each<'a, T>,
}

impl<'a, T> IntoIter<'a, T> {
    /// Gives the unconsumed rest back as a sequence.
    #[inline]
    pub fn into_inner(self) -> Each<'a, T> {
        self.each
    }
}

impl<'a, T> Iterator for IntoIter<'a, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.each.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.each.size_hint()
    }
}

impl<'a, T> IntoIterator for Each<'a, T> {
    type Item = T;
    type IntoIter = IntoIter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { each: self }
    }
}

impl<'e, 'a, T> IntoIterator for &'e mut Each<'a, T> {
    type Item = T;
    type IntoIter = Drain<'e, 'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.drain()
    }
}

impl<'a, T> std::fmt::Debug for Each<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Each")
            .field("buffered", &self.buffer.as_ref().map(VecDeque::len))
            .field("sources", &self.sources)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use each_core::error::ErrorKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{BTreeMap, BTreeSet, HashSet};

    fn is_even(n: &i32) -> bool {
        n % 2 == 0
    }

    #[test]
    fn test_empty_sequence_ends_immediately() {
        let mut each: Each<'_, i32> = Each::from_sources(Vec::<Vec<i32>>::new());
        assert_eq!(each.next(), None);
        assert_eq!(each.next(), None);
    }

    #[test]
    fn test_concatenation_preserves_order() {
        let a = vec![1, 2, 3];
        let b = vec![4, 5];
        let each = Each::from_sources([a.clone(), b.clone()]);
        let expected: Vec<i32> = a.into_iter().chain(b).collect();
        assert_eq!(each.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_heterogeneous_sources() {
        let array = [1, 2, 3];
        let set = BTreeSet::from([4, 5, 6]);
        let map = BTreeMap::from([(1, "one"), (2, "two")]);

        let numbers: Vec<i32> = Each::new()
            .chain(array)
            .chain(set)
            .chain(map.keys().copied())
            .into_iter()
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 1, 2]);

        let pairs: Vec<(i32, &str)> = Each::new().chain(map.clone()).into_iter().collect();
        assert_eq!(pairs, vec![(1, "one"), (2, "two")]);
    }

    #[test]
    fn test_borrowed_sources() {
        let words = vec!["a".to_string(), "b".to_string()];
        let each = Each::new().chain(words.iter()).chain(words.iter().rev());
        let joined: Vec<&String> = each.into_iter().collect();
        assert_eq!(joined, vec!["a", "b", "b", "a"]);
    }

    #[test]
    fn test_revived_after_end() {
        let mut each = Each::from_sources([vec![1]]);
        assert_eq!(each.next(), Some(1));
        assert_eq!(each.next(), None);
        each.push_source(vec![2]);
        assert_eq!(each.next(), Some(2));
        assert_eq!(each.next(), None);
    }

    #[test]
    fn test_size_hint() {
        let mut each = Each::from_sources([vec![1, 2], vec![3]]);
        assert_eq!(each.size_hint(), (3, Some(3)));
        each.filter(&[]);
        each.push_source(0..2);
        assert_eq!(each.size_hint(), (5, Some(5)));
    }

    #[test]
    fn test_filter_is_conjunctive_and_requeued() {
        let mut each = Each::from_sources([vec![1, 2, 3], vec![4, 5, 6]]);
        each.filter(&[&|n: &i32| *n > 3]);
        assert!(each.is_materialized());
        assert_eq!(each.pending_sources(), 0);
        assert_eq!(each.into_iter().collect::<Vec<_>>(), vec![4, 5, 6]);

        let mut each = Each::from_sources([1..=10]);
        each.filter(&[&is_even, &|n: &i32| *n > 4]);
        assert_eq!(each.to_vec(), vec![6, 8, 10]);
    }

    #[test]
    fn test_filter_without_predicates_keeps_everything() {
        let mut each = Each::from_sources([vec![1, 2, 3]]);
        each.filter(&[]);
        assert_eq!(each.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_removes_adjacent_rejections() {
        let mut each = Each::from_sources([vec![1, 1, 2, 1, 1, 2, 1]]);
        each.filter(&[&is_even]);
        assert_eq!(each.to_vec(), vec![2, 2]);
    }

    #[test]
    fn test_sort_and_inverted_sort() {
        let mut each = Each::from_sources([vec![3, 1, 4], vec![1, 5, 9, 2, 6]]);
        each.unique().sort_by(|a, b| a.cmp(b));
        let ascending = each.as_slice().to_vec();
        assert_eq!(ascending, vec![1, 2, 3, 4, 5, 6, 9]);

        each.sort_by(|a, b| b.cmp(a));
        let mut descending = each.to_vec();
        descending.reverse();
        assert_eq!(descending, ascending);
    }

    #[test]
    fn test_unique_keeps_first_occurrence() {
        let mut each = Each::from_sources([vec!["b", "a", "b"], vec!["c", "a"]]);
        each.unique();
        assert_eq!(each.as_slice(), ["b", "a", "c"]);
    }

    #[test]
    fn test_unique_is_idempotent() {
        let source = vec![5, 3, 5, 1, 3, 3, 7];
        let mut once = Each::from_sources([source.clone()]);
        once.unique();
        let mut twice = Each::from_sources([source]);
        twice.unique().unique();
        assert_eq!(once.to_vec(), twice.to_vec());
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut each = Each::from_sources([0..100]);
        each.shuffle_with(&mut rng);

        let shuffled = each.to_vec();
        let distinct: HashSet<_> = shuffled.iter().copied().collect();
        assert_eq!(shuffled.len(), 100);
        assert_eq!(distinct.len(), 100);
        assert!(shuffled.iter().all(|n| (0..100).contains(n)));
    }

    #[test]
    fn test_shuffle_is_deterministic_per_seed() {
        let run = |seed| {
            let mut each = Each::from_sources([0..32]);
            each.shuffle_with(&mut ChaCha8Rng::seed_from_u64(seed));
            each.to_vec()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(1), run(2));
    }

    #[test]
    fn test_shuffle_with_thread_rng() {
        let mut each = Each::from_sources([vec![1, 2, 3]]);
        each.shuffle().sort();
        assert_eq!(each.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_map_returns_independent_sequence() {
        let mut each = Each::from_sources([vec![1, 2], vec![3]]);
        let described = each.map(|n, index, all| format!("{}:{}/{}", index, n, all.len()));

        assert_eq!(
            described.into_iter().collect::<Vec<_>>(),
            vec!["0:1/3", "1:2/3", "2:3/3"]
        );
        assert_eq!(each.next(), None);
    }

    #[test]
    fn test_at_first_last() {
        let mut each = Each::from_sources([vec![10, 20], vec![30]]);
        assert_eq!(*each.first().unwrap(), 10);
        assert_eq!(*each.last().unwrap(), 30);
        assert_eq!(*each.at(-2).unwrap(), 20);
        let last = *each.at(-1).unwrap();
        assert_eq!(last, *each.at(2).unwrap());

        let err = each.at(3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(err, EachError::OutOfRange { index: 3, len: 3 });
        assert_eq!(each.at(-4).unwrap_err().kind(), ErrorKind::OutOfRange);

        // Accessors do not consume.
        assert_eq!(each.into_iter().collect::<Vec<_>>(), vec![10, 20, 30]);
    }

    #[test]
    fn test_first_on_empty_fails() {
        let mut each: Each<'_, u8> = Each::new();
        assert_eq!(each.first().unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(each.last().unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[derive(Debug, PartialEq)]
    enum Value {
        Number(i32),
        Text(&'static str),
    }

    fn is_text(value: &Value) -> bool {
        matches!(value, Value::Text(_))
    }

    fn is_number(value: &Value) -> bool {
        matches!(value, Value::Number(_))
    }

    #[test]
    fn test_find_scans_elements_in_order() {
        let mut each = Each::from_sources([vec![
            Value::Number(1),
            Value::Text("a"),
            Value::Number(2),
        ]]);
        assert_eq!(each.find(&[&is_text, &is_number]), Some(&Value::Number(1)));
        assert_eq!(each.find(&[&is_text]), Some(&Value::Text("a")));
        assert_eq!(each.find(&[]), None);
    }

    #[test]
    fn test_find_none_and_assert_not_found() {
        let mut each = Each::from_sources([vec![1, 3, 5]]);
        assert_eq!(each.find(&[&is_even]), None);

        let err = each.assert(&[&is_even, &|n: &i32| *n > 10]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err, EachError::NotFound { predicates: 2 });

        assert_eq!(each.assert(&[&|n: &i32| *n > 2]), Ok(&3));
    }

    #[test]
    fn test_count_does_not_consume() {
        let mut each = Each::from_sources([vec![1, 2], vec![3]]);
        assert_eq!(each.count(), 3);
        assert_eq!(each.count(), 3);
        each.push_source(vec![4]);
        assert_eq!(each.count(), 4);
        assert_eq!(each.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_accessors_leave_sequence_iterable() {
        let mut each = Each::from_sources([vec![1, 2], vec![3, 4]]);
        assert_eq!(each.count(), 4);
        assert_eq!(*each.last().unwrap(), 4);
        assert_eq!(each.find(&[&is_even]), Some(&2));
        each.filter(&[&|n: &i32| *n > 1]);
        assert_eq!(each.count(), 3);
        assert_eq!(each.into_iter().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_borrowed_iteration_keeps_the_rest() {
        let mut each = Each::from_sources([vec![1, 2], vec![3, 4]]);
        let mut seen = Vec::new();
        for value in &mut each {
            seen.push(value);
            if value == 2 {
                break;
            }
        }
        assert_eq!(seen, vec![1, 2]);
        assert_eq!(each.pending_sources(), 2);

        let mut rest = each.into_iter();
        assert_eq!(rest.next(), Some(3));
        assert_eq!(rest.into_inner().to_vec(), vec![4]);
    }

    #[test]
    fn test_filter_large_sequence() {
        let mut each = Each::from_sources([0..50_000, 50_000..100_000]);
        each.filter(&[&|n: &i32| n % 3 == 0]);
        let kept = each.to_vec();
        assert_eq!(kept.len(), 33_334);
        assert!(kept.windows(2).all(|pair| pair[1] - pair[0] == 3));
    }

    #[test]
    fn test_apply_runs_effects_one_after_another() {
        let mut order = Vec::new();
        {
            let order = std::cell::RefCell::new(&mut order);
            let mut each = Each::from_sources([vec!['x', 'y']]);
            each.apply(&mut [
                &mut |c: &char, i: usize, all: &[char]| {
                    order
                        .borrow_mut()
                        .push(format!("first {} {} {}", c, i, all.len()))
                },
                &mut |c: &char, i: usize, _: &[char]| {
                    order.borrow_mut().push(format!("second {} {}", c, i))
                },
            ]);
            assert_eq!(each.count(), 2);
        }
        assert_eq!(
            order,
            vec!["first x 0 2", "first y 1 2", "second x 0", "second y 1"]
        );
    }

    #[test]
    fn test_partially_consumed_then_materialized() {
        let mut each = Each::from_sources([vec![1, 2, 3], vec![4]]);
        assert_eq!(each.next(), Some(1));
        each.sort_by(|a, b| b.cmp(a));
        assert_eq!(each.to_vec(), vec![4, 3, 2]);
    }

    #[test]
    fn test_sources_after_materialization_follow_buffer() {
        let mut each = Each::from_sources([vec![3, 1]]);
        each.sort();
        each.push_source(vec![0]);
        assert_eq!(each.pending_sources(), 1);
        assert_eq!(each.into_iter().collect::<Vec<_>>(), vec![1, 3, 0]);
    }

    #[test]
    fn test_from_iterator_and_vec() {
        let mut each: Each<'_, i32> = (1..=3).collect();
        assert!(each.is_materialized());
        assert_eq!(each.count(), 3);
        let each = Each::from(vec![1]);
        assert_eq!(
            format!("{:?}", each),
            "Each { buffered: Some(1), sources: SourceQueue { active: false, pending: 0 } }"
        );
    }
}
