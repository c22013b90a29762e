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

//! Pending sources of a multi-source sequence.
//!
//! Sources are consumed front-to-back, each exactly once. The head source is
//! moved out of the queue into the cursor when it is first pulled and the
//! cursor is dropped as soon as it is exhausted, so at most one source is
//! ever live.

use std::collections::VecDeque;

/// A boxed, type-erased source.
pub type Source<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// An ordered queue of lazy sources with at most one active cursor.
pub struct SourceQueue<'a, T> {
    cursor: Option<Source<'a, T>>,
    pending: VecDeque<Source<'a, T>>,
}

impl<'a, T> Default for SourceQueue<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> SourceQueue<'a, T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            cursor: None,
            pending: VecDeque::new(),
        }
    }

    /// Appends a source behind every source already queued.
    pub fn push<S>(&mut self, source: S)
    where
        S: IntoIterator<Item = T>,
        S::IntoIter: 'a,
    {
        self.pending.push_back(Box::new(source.into_iter()));
        tracing::trace!(pending = self.pending.len(), "queued source");
    }

    /// Number of sources not yet fully consumed, the active one included.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len() + usize::from(self.cursor.is_some())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pulls the next element, advancing over exhausted sources.
    ///
    /// Returns `None` once every source is exhausted; appending a source
    /// afterwards makes the queue productive again.
    pub fn pull(&mut self) -> Option<T> {
        loop {
            if let Some(cursor) = self.cursor.as_mut() {
                if let Some(value) = cursor.next() {
                    return Some(value);
                }
                self.cursor = None;
            }
            self.cursor = Some(self.pending.pop_front()?);
            tracing::trace!(pending = self.pending.len(), "advanced to next source");
        }
    }

    pub fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor
            .iter()
            .chain(self.pending.iter())
            .map(|source| source.size_hint())
            .fold((0, Some(0)), |(lo, hi), (source_lo, source_hi)| {
                let hi = match (hi, source_hi) {
                    (Some(hi), Some(source_hi)) => hi.checked_add(source_hi),
                    _ => None,
                };
                (lo.saturating_add(source_lo), hi)
            })
    }
}

impl<'a, T> std::fmt::Debug for SourceQueue<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceQueue")
            .field("active", &self.cursor.is_some())
            .field("pending", &self.pending.len())
            .finish()
    }
}
