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

//! Numeric range fields.
//!
//! Range bounds are accepted either as integers or as floats so that a
//! non-integral bound (e.g. `1.5`) is representable and can be rejected by
//! validation instead of being silently truncated by a cast.

use num_traits::ToPrimitive;

/// A numeric range field, as given by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Returns the value as an `i64` if it is integral and representable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use each_core::range::Number;
    ///
    /// assert_eq!(Number::from(3).to_integer(), Some(3));
    /// assert_eq!(Number::from(3.0).to_integer(), Some(3));
    /// assert_eq!(Number::from(1.5).to_integer(), None);
    /// assert_eq!(Number::from(f64::NAN).to_integer(), None);
    /// ```
    #[inline]
    pub fn to_integer(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            Self::Float(value) if value.is_finite() && value.fract() == 0.0 => value.to_i64(),
            Self::Float(_) => None,
        }
    }

    /// Returns the value as an `f64`, used for diagnostics.
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value.to_f64().unwrap_or(f64::NAN),
            Self::Float(value) => value,
        }
    }

    /// Returns `true` if the value is strictly below zero.
    #[inline]
    pub fn is_negative(self) -> bool {
        match self {
            Self::Int(value) => value < 0,
            Self::Float(value) => value < 0.0,
        }
    }

    /// Resolves a from-end value against `length`.
    ///
    /// Negative values count back from `length`; non-negative values are
    /// returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use each_core::range::Number;
    ///
    /// assert_eq!(Number::from(-1).from_end(6), Number::Int(5));
    /// assert_eq!(Number::from(4).from_end(6), Number::Int(4));
    /// assert_eq!(Number::from(-0.5).from_end(6), Number::Float(5.5));
    /// ```
    pub fn from_end(self, length: usize) -> Self {
        if !self.is_negative() {
            return self;
        }
        match self {
            Self::Int(value) => match length.to_i64().and_then(|len| len.checked_add(value)) {
                Some(resolved) => Self::Int(resolved),
                None => Self::Float(length as f64 + value as f64),
            },
            Self::Float(value) => Self::Float(length as f64 + value),
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
        }
    }
}

macro_rules! impl_number_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                #[inline]
                fn from(value: $t) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<isize> for Number {
    /// Saturates at the `i64` bounds.
    #[inline]
    fn from(value: isize) -> Self {
        let saturated = if value < 0 { i64::MIN } else { i64::MAX };
        Self::Int(value.to_i64().unwrap_or(saturated))
    }
}

impl From<usize> for Number {
    /// Saturates at `i64::MAX`. Every length is below that bound, so a
    /// saturated start or step selects the same indices as the exact value.
    #[inline]
    fn from(value: usize) -> Self {
        Self::Int(value.to_i64().unwrap_or(i64::MAX))
    }
}

impl From<f32> for Number {
    #[inline]
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Number {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
