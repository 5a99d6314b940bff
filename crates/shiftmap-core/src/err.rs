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

use std::fmt::{Debug, Display};

/// An interval was requested whose start lies after its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MalformedIntervalError<T> {
    start: T,
    end: T,
}

impl<T: Copy> MalformedIntervalError<T> {
    #[inline]
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    #[inline]
    pub fn end(&self) -> T {
        self.end
    }
}

impl<T: Display> Display for MalformedIntervalError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Malformed interval: start {} is greater than end {}",
            self.start, self.end
        )
    }
}

impl<T: Debug + Display> std::error::Error for MalformedIntervalError<T> {}

/// A coordinate computation left the range of the coordinate type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateOverflowError<T> {
    lhs: T,
    rhs: T,
    op: char,
}

impl<T: Copy> CoordinateOverflowError<T> {
    /// `lhs + rhs` overflowed.
    #[inline]
    pub fn addition(lhs: T, rhs: T) -> Self {
        Self { lhs, rhs, op: '+' }
    }

    /// `lhs - rhs` overflowed.
    #[inline]
    pub fn subtraction(lhs: T, rhs: T) -> Self {
        Self { lhs, rhs, op: '-' }
    }

    #[inline]
    pub fn lhs(&self) -> T {
        self.lhs
    }

    #[inline]
    pub fn rhs(&self) -> T {
        self.rhs
    }

    #[inline]
    pub fn op(&self) -> char {
        self.op
    }
}

impl<T: Display> Display for CoordinateOverflowError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Coordinate overflow: {} {} {} is out of range",
            self.lhs, self.op, self.rhs
        )
    }
}

impl<T: Debug + Display> std::error::Error for CoordinateOverflowError<T> {}

/// Failure to build an interval from a start and a length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalError<T> {
    Malformed(MalformedIntervalError<T>),
    Overflow(CoordinateOverflowError<T>),
}

impl<T: Display> Display for IntervalError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntervalError::Malformed(e) => write!(f, "{}", e),
            IntervalError::Overflow(e) => write!(f, "{}", e),
        }
    }
}

impl<T> From<MalformedIntervalError<T>> for IntervalError<T> {
    fn from(err: MalformedIntervalError<T>) -> Self {
        IntervalError::Malformed(err)
    }
}

impl<T> From<CoordinateOverflowError<T>> for IntervalError<T> {
    fn from(err: CoordinateOverflowError<T>) -> Self {
        IntervalError::Overflow(err)
    }
}

impl<T: Debug + Display> std::error::Error for IntervalError<T> {}
