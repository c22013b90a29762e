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

//! Entry points turning plain values into sequences.
//!
//! Every function here normalizes its argument into one or more sources and
//! hands them to [`Each`]. Nothing is pulled until the caller pulls.

use each_core::{
    error::Result,
    range::{Length, RangeArgs, indices},
};
use each_iter::Each;
use each_reflect::{Reflect, prototype_chain};

/// Wraps a single iterable.
///
/// # Examples
///
/// ```rust
/// let letters: String = each::each("abc".chars()).into_iter().collect();
/// assert_eq!(letters, "abc");
/// ```
#[inline]
pub fn each<'a, S>(source: S) -> Each<'a, S::Item>
where
    S: IntoIterator,
    S::IntoIter: 'a,
{
    Each::new().chain(source)
}

/// Wraps a factory producing an iterable.
///
/// The factory runs when the sequence is first pulled or materialized.
///
/// # Examples
///
/// ```rust
/// let mut sequence = each::from_fn(|| vec![1, 2, 3]);
/// assert_eq!(sequence.count(), 3);
/// ```
pub fn from_fn<'a, F, S>(factory: F) -> Each<'a, S::Item>
where
    F: FnOnce() -> S + 'a,
    S: IntoIterator + 'a,
    S::IntoIter: 'a,
{
    Each::new().chain(std::iter::once(factory).flat_map(|factory| factory()))
}

/// Wraps a single value that is not itself iterated.
///
/// # Examples
///
/// ```rust
/// let values: Vec<_> = each::once(vec![1, 2]).into_iter().collect();
/// assert_eq!(values, vec![vec![1, 2]]);
/// ```
#[inline]
pub fn once<'a, T>(value: T) -> Each<'a, T>
where
    T: 'a,
{
    Each::new().chain(std::iter::once(value))
}

/// Iterates the indices of `source` selected by `args`.
///
/// # Errors
///
/// `InvalidArgument` if the range specification is invalid for the length
/// of `source`.
///
/// # Examples
///
/// ```rust
/// use each::range::RangeOptions;
///
/// let letters = ['a', 'b', 'c', 'd', 'e'];
/// let options = RangeOptions::new().with_step(2).with_reverse(true);
/// let picked: Vec<_> = each::index_of(&letters, options)
///     .unwrap()
///     .map(|&i, _, _| letters[i])
///     .into_iter()
///     .collect();
/// assert_eq!(picked, vec!['e', 'c', 'a']);
/// ```
pub fn index_of<'a, L, A>(source: L, args: A) -> Result<Each<'a, usize>>
where
    L: Length,
    A: Into<RangeArgs>,
{
    Ok(Each::new().chain(indices(source, args)?))
}

/// Iterates every level of the prototype chain of each object in turn,
/// root included.
///
/// # Errors
///
/// `CycleDetected` if any of the chains loops. Chains are walked before the
/// sequence is returned.
pub fn prototype_of<'h, H, I>(host: &'h H, objects: I) -> Result<Each<'h, H::Object>>
where
    H: Reflect + ?Sized,
    I: IntoIterator<Item = H::Object>,
{
    let mut sequence = Each::new();
    for object in objects {
        let levels = prototype_chain(host, object).collect::<Result<Vec<_>>>()?;
        tracing::trace!(levels = levels.len(), "queued prototype chain");
        sequence.push_source(levels);
    }
    Ok(sequence)
}
