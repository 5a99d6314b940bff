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

use shiftmap_core::{
    Coordinate,
    err::{CoordinateOverflowError, IntervalError},
    primitives::Interval,
};
use std::fmt::Display;

/// One remapped interval: every `v` in `interval` maps to `v + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShiftRange<T> {
    interval: Interval<T>,
    offset: T,
}

impl<T: Coordinate> ShiftRange<T> {
    #[inline]
    pub fn new(interval: Interval<T>, offset: T) -> Self {
        Self { interval, offset }
    }

    /// Builds the range described by an almanac line
    /// `destination_start source_start length`.
    ///
    /// The source interval is `[source_start, source_start + length)` and the
    /// offset `destination_start - source_start`. Both intervals and the
    /// offset must be representable in `T`.
    #[inline]
    pub fn from_triple(
        destination_start: T,
        source_start: T,
        length: T,
    ) -> Result<Self, IntervalError<T>> {
        let interval = Interval::from_start_len(source_start, length)?;
        Interval::from_start_len(destination_start, length)?;
        let offset = destination_start
            .checked_sub(&source_start)
            .ok_or(CoordinateOverflowError::subtraction(destination_start, source_start))?;
        Ok(Self::new(interval, offset))
    }

    #[inline]
    pub fn interval(&self) -> Interval<T> {
        self.interval
    }

    #[inline]
    pub fn offset(&self) -> T {
        self.offset
    }

    /// The interval this range maps its source interval onto.
    #[inline]
    pub fn target(&self) -> Interval<T> {
        self.interval.shift(self.offset)
    }

    /// Maps `point` if it lies in this range.
    #[inline]
    pub fn apply(&self, point: T) -> Option<T> {
        self.interval
            .contains(point)
            .then(|| point + self.offset)
    }
}

impl<T: Coordinate> Display for ShiftRange<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.interval, self.target())
    }
}
