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

//! # Index Ranges
//!
//! Parametrized generation of element indices over anything with a length.
//!
//! ## Submodules
//!
//! - `number`: `Number`, a range field that may be integral or fractional so
//!   that non-integral input can be rejected rather than truncated.
//! - `spec`: The two argument forms (`RangeArgs::Positional` and the partial
//!   `RangeOptions` record) and their common resolved form `RangeSpec`.
//! - `indices`: The validated iterator `IndexRange`, the `Length` trait and
//!   the from-end index resolver used by element accessors.
//!
//! ## Semantics
//!
//! Bounds are inclusive. A negative `end` counts back from the length, so the
//! default `end = -1` addresses the last element. Validation happens when the
//! range is built, never while it is iterated.
//!
//! ## Usage
//!
//! ```rust
//! use each_core::range::{indices, RangeOptions};
//!
//! let options = RangeOptions::new().with_start(1).with_end(-2).with_step(2);
//! let picked: Vec<usize> = indices(6usize, options).unwrap().collect();
//! assert_eq!(picked, vec![1, 3]);
//! ```

pub mod indices;
pub mod number;
pub mod spec;

pub use indices::{IndexRange, Length, indices, resolve_index};
pub use number::Number;
pub use spec::{RangeArg, RangeArgs, RangeOptions, RangeSpec};
