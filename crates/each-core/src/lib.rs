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

//! # Each Core
//!
//! Foundational pieces shared by the `each` crates: the error type every
//! fallible operation returns, and the index-range generator that drives
//! index iteration and in-place filtering.
//!
//! ## Modules
//!
//! - `error`: `EachError` with its `ErrorKind` (`InvalidArgument`,
//!   `NotFound`, `OutOfRange`, `CycleDetected`).
//! - `range`: Inclusive `[start, end]` index ranges with a positive step,
//!   optional reversal and from-end (negative) `end` resolution, accepted in
//!   positional or record form and validated eagerly.
//!
//! Refer to each module for detailed APIs and examples.

pub mod error;
pub mod range;

pub use error::{EachError, ErrorKind, Result};
