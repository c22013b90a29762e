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

//! # Each Iter
//!
//! Lazy concatenation of heterogeneous sources behind a single re-iterable
//! sequence type.
//!
//! ## Highlights
//!
//! - Any `IntoIterator` is a source: vectors, arrays, sets, maps, borrowed
//!   iterators, index ranges, or other `Each` instances.
//! - Sources are pulled lazily and in order; pulling never materializes.
//! - Whole-sequence transforms (`filter`, `sort`, `unique`, `shuffle`) run
//!   in place and leave the result queued for further pulls.
//!
//! ## Modules
//!
//! - `each`: The `Each` sequence with its transforms and accessors, and
//!   the `Drain` and `IntoIter` adaptors for standard iteration.
//! - `source`: `SourceQueue`, the ordered queue of pending boxed sources.

pub mod each;
pub mod source;

pub use each::{Drain, Each, Effect, IntoIter, Predicate};
pub use source::{Source, SourceQueue};
