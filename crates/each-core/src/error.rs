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

//! Error type shared by every crate of the toolkit.
//!
//! All failures are synchronous: they are returned by the call that detects
//! them and never deferred to a later pull. Range validation and prototype
//! cycle detection happen eagerly, before the first element is produced, so
//! a caller either gets a fully valid sequence or an error with no partial
//! output.

/// The category of an [`EachError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    /// A range field failed validation.
    InvalidArgument,
    /// A search exhausted the sequence without a match.
    NotFound,
    /// An index has no corresponding element.
    OutOfRange,
    /// A prototype chain revisits one of its own levels.
    CycleDetected,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InvalidArgument => "InvalidArgument",
            Self::NotFound => "NotFound",
            Self::OutOfRange => "OutOfRange",
            Self::CycleDetected => "CycleDetected",
        };
        f.write_str(name)
    }
}

/// The field of a range specification that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RangeField {
    Start,
    End,
    Step,
}

/// The error type of the toolkit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EachError {
    /// A range specification was rejected before any index was produced.
    #[error("{}", invalid_argument_message(.field))]
    InvalidArgument {
        field: RangeField,
        /// The offending (unresolved or resolved) value.
        value: f64,
    },

    /// No element satisfied any of the given predicates.
    #[error("no element matched any of {predicates} predicate(s)")]
    NotFound { predicates: usize },

    /// The index has no element after from-end resolution.
    #[error("index {index} is out of range for a sequence of length {len}")]
    OutOfRange { index: isize, len: usize },

    /// The prototype chain loops back onto a level that was already walked.
    #[error("prototype chain cycle detected after {depth} level(s)")]
    CycleDetected { depth: usize },
}

fn invalid_argument_message(field: &RangeField) -> &'static str {
    match field {
        RangeField::Step => "step must be a positive integer",
        RangeField::Start => "start must be a positive integer",
        RangeField::End => "end must resolve to an integer",
    }
}

impl EachError {
    /// Returns the category of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::CycleDetected { .. } => ErrorKind::CycleDetected,
        }
    }

    #[inline]
    pub(crate) fn invalid(field: RangeField, value: f64) -> Self {
        tracing::debug!(?field, value, "rejected range specification");
        Self::InvalidArgument { field, value }
    }
}

/// Convenience alias used throughout the toolkit.
pub type Result<T> = std::result::Result<T, EachError>;
