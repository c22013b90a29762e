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

//! Range specifications.
//!
//! A range can be described positionally, as a list of `RangeArg`s where the
//! numbers fill `start`, `end` and `step` in that order and the first boolean
//! sets `reverse`, or as a partial `RangeOptions` record. Both forms collapse
//! into the same `RangeSpec` with the defaults `start = 0`, `end = -1`,
//! `step = 1` and `reverse = false`.

use super::{indices::IndexRange, number::Number};
use crate::error::{EachError, RangeField, Result};

/// A single positional range argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeArg {
    Reverse(bool),
    Number(Number),
}

impl From<bool> for RangeArg {
    #[inline]
    fn from(reverse: bool) -> Self {
        Self::Reverse(reverse)
    }
}

impl From<Number> for RangeArg {
    #[inline]
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

macro_rules! impl_range_arg_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RangeArg {
                #[inline]
                fn from(value: $t) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_range_arg_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, usize, f32, f64);

/// A partial range configuration; unset fields take the defaults.
///
/// # Examples
///
/// ```rust
/// # use each_core::range::{RangeOptions, RangeSpec};
///
/// let spec = RangeSpec::from(RangeOptions::new().with_start(1).with_reverse(true));
/// assert_eq!(spec, RangeSpec::new().with_start(1).with_reverse(true));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeOptions {
    pub start: Option<Number>,
    pub end: Option<Number>,
    pub step: Option<Number>,
    pub reverse: Option<bool>,
}

impl RangeOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_start(mut self, start: impl Into<Number>) -> Self {
        self.start = Some(start.into());
        self
    }

    #[inline]
    pub fn with_end(mut self, end: impl Into<Number>) -> Self {
        self.end = Some(end.into());
        self
    }

    #[inline]
    pub fn with_step(mut self, step: impl Into<Number>) -> Self {
        self.step = Some(step.into());
        self
    }

    #[inline]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = Some(reverse);
        self
    }
}

/// The two accepted argument forms of a range.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeArgs {
    /// `(reverse?, start?, end?, step?)`, told apart by type.
    Positional(Vec<RangeArg>),
    /// A partial record overriding the defaults.
    Options(RangeOptions),
}

impl Default for RangeArgs {
    fn default() -> Self {
        Self::Options(RangeOptions::default())
    }
}

impl From<()> for RangeArgs {
    #[inline]
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<RangeOptions> for RangeArgs {
    #[inline]
    fn from(options: RangeOptions) -> Self {
        Self::Options(options)
    }
}

impl From<RangeSpec> for RangeArgs {
    #[inline]
    fn from(spec: RangeSpec) -> Self {
        Self::Options(RangeOptions {
            start: Some(spec.start),
            end: Some(spec.end),
            step: Some(spec.step),
            reverse: Some(spec.reverse),
        })
    }
}

impl From<Vec<RangeArg>> for RangeArgs {
    #[inline]
    fn from(args: Vec<RangeArg>) -> Self {
        Self::Positional(args)
    }
}

impl<const N: usize> From<[RangeArg; N]> for RangeArgs {
    #[inline]
    fn from(args: [RangeArg; N]) -> Self {
        Self::Positional(args.to_vec())
    }
}

impl From<&[RangeArg]> for RangeArgs {
    #[inline]
    fn from(args: &[RangeArg]) -> Self {
        Self::Positional(args.to_vec())
    }
}

/// A complete, unresolved range specification.
///
/// `end` may be negative, in which case it counts back from the length the
/// range is resolved against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSpec {
    pub start: Number,
    pub end: Number,
    pub step: Number,
    pub reverse: bool,
}

impl Default for RangeSpec {
    fn default() -> Self {
        Self {
            start: Number::Int(0),
            end: Number::Int(-1),
            step: Number::Int(1),
            reverse: false,
        }
    }
}

impl RangeSpec {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_start(mut self, start: impl Into<Number>) -> Self {
        self.start = start.into();
        self
    }

    #[inline]
    pub fn with_end(mut self, end: impl Into<Number>) -> Self {
        self.end = end.into();
        self
    }

    #[inline]
    pub fn with_step(mut self, step: impl Into<Number>) -> Self {
        self.step = step.into();
        self
    }

    #[inline]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Parses positional arguments.
    ///
    /// Numbers fill `start`, `end` and `step` in order; numbers past the
    /// third are ignored. The first boolean sets `reverse` wherever it
    /// appears.
    pub fn from_positional(args: &[RangeArg]) -> Self {
        let mut numbers = args.iter().filter_map(|arg| match arg {
            RangeArg::Number(n) => Some(*n),
            RangeArg::Reverse(_) => None,
        });
        let start = numbers.next();
        let end = numbers.next();
        let step = numbers.next();

        let reverse = args.iter().find_map(|arg| match arg {
            RangeArg::Reverse(reverse) => Some(*reverse),
            RangeArg::Number(_) => None,
        });

        Self::from(RangeOptions {
            start,
            end,
            step,
            reverse,
        })
    }

    /// Validates the specification and resolves it against `length`.
    ///
    /// Validation is eager: the returned `IndexRange` never fails while it
    /// is being iterated.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `step` is not a positive integer, `start` is not
    /// a non-negative integer, or the resolved `end` is not an integer. The
    /// checks run in that order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use each_core::range::RangeSpec;
    ///
    /// let range = RangeSpec::new().with_start(1).with_end(-2).with_step(2).resolve(6).unwrap();
    /// assert_eq!(range.collect::<Vec<_>>(), vec![1, 3]);
    ///
    /// assert!(RangeSpec::new().with_step(-1).resolve(6).is_err());
    /// ```
    pub fn resolve(&self, length: usize) -> Result<IndexRange> {
        let end = self.end.from_end(length);

        let step = self
            .step
            .to_integer()
            .filter(|step| *step > 0)
            .ok_or_else(|| EachError::invalid(RangeField::Step, self.step.as_f64()))?;

        let start = self
            .start
            .to_integer()
            .filter(|start| *start >= 0)
            .ok_or_else(|| EachError::invalid(RangeField::Start, self.start.as_f64()))?;

        let end = end
            .to_integer()
            .ok_or_else(|| EachError::invalid(RangeField::End, end.as_f64()))?;

        Ok(IndexRange::from_bounds(start, end, step, self.reverse))
    }
}

impl From<RangeOptions> for RangeSpec {
    fn from(options: RangeOptions) -> Self {
        let defaults = Self::default();
        Self {
            start: options.start.unwrap_or(defaults.start),
            end: options.end.unwrap_or(defaults.end),
            step: options.step.unwrap_or(defaults.step),
            reverse: options.reverse.unwrap_or(defaults.reverse),
        }
    }
}

impl From<RangeArgs> for RangeSpec {
    fn from(args: RangeArgs) -> Self {
        match args {
            RangeArgs::Positional(args) => Self::from_positional(&args),
            RangeArgs::Options(options) => Self::from(options),
        }
    }
}

impl std::fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RangeSpec(start: {}, end: {}, step: {}, reverse: {})",
            self.start, self.end, self.step, self.reverse
        )
    }
}
