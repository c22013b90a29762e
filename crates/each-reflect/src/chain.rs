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

//! Lazy prototype chain walks.

use crate::host::Reflect;
use each_core::error::{EachError, Result};
use rustc_hash::FxHashSet;
use std::iter::FusedIterator;

/// Every level from an object up to and including its root.
///
/// The walk is single-pass and asks the host for one parent at a time.
/// Levels are remembered so that a chain looping back onto itself yields one
/// `CycleDetected` error and then ends instead of spinning forever.
pub struct PrototypeChain<'h, H>
where
    H: Reflect + ?Sized,
{
    host: &'h H,
    next: Option<H::Object>,
    visited: FxHashSet<H::Object>,
}

/// Walks the prototype chain of `object`.
///
/// # Examples
///
/// ```rust
/// use each_reflect::{chain::prototype_chain, graph::ObjectGraph};
///
/// let mut graph = ObjectGraph::<i32>::new();
/// let parent = graph.create(graph.root());
/// let child = graph.create(parent);
///
/// let levels: Vec<_> = prototype_chain(&graph, child).collect::<Result<_, _>>().unwrap();
/// assert_eq!(levels, vec![child, parent, graph.root()]);
/// ```
pub fn prototype_chain<H>(host: &H, object: H::Object) -> PrototypeChain<'_, H>
where
    H: Reflect + ?Sized,
{
    PrototypeChain {
        host,
        next: Some(object),
        visited: FxHashSet::default(),
    }
}

impl<'h, H> PrototypeChain<'h, H>
where
    H: Reflect + ?Sized,
{
    /// Number of levels yielded so far.
    #[inline]
    pub fn depth(&self) -> usize {
        self.visited.len()
    }
}

impl<'h, H> Iterator for PrototypeChain<'h, H>
where
    H: Reflect + ?Sized,
{
    type Item = Result<H::Object>;

    fn next(&mut self) -> Option<Self::Item> {
        let level = self.next.take()?;
        if !self.visited.insert(level.clone()) {
            let depth = self.depth();
            tracing::warn!(depth, "prototype chain loops back onto a visited level");
            return Some(Err(EachError::CycleDetected { depth }));
        }
        self.next = self.host.prototype_of(&level);
        Some(Ok(level))
    }
}

impl<'h, H> FusedIterator for PrototypeChain<'h, H> where H: Reflect + ?Sized {}
