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

//! # Interval Primitive
//!
//! The half-open integer interval every other part of the workspace is built on.
//! Bounds are ordered at construction and never change afterwards, so all
//! queries can rely on `start <= end`.

use crate::err::{CoordinateOverflowError, IntervalError, MalformedIntervalError};
use num_traits::CheckedAdd;
use std::fmt::{self, Debug};
use std::ops::{Add, Sub};

/// A half-open interval `[start, end)`.
///
/// The start is inclusive and the end is exclusive, so the interval holds every
/// value `x` with `start <= x < end`. An interval whose bounds coincide is empty.
///
/// # Examples
///
/// ```
/// use shiftmap_core::primitives::Interval;
///
/// let interval = Interval::new(1, 5);
/// assert_eq!(interval.start(), 1);
/// assert_eq!(interval.end(), 5);
/// assert!(interval.contains(3));
/// assert!(!interval.contains(5));
/// assert_eq!(interval.len(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> Interval<T> {
    /// Creates the interval `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`. Use [`Interval::try_new`] for bounds that come
    /// from untrusted input.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftmap_core::primitives::Interval;
    ///
    /// let interval = Interval::new(3, 5);
    /// assert_eq!((interval.start(), interval.end()), (3, 5));
    /// ```
    #[inline]
    pub fn new(start: T, end: T) -> Self
    where
        T: PartialOrd + Copy + Debug,
    {
        assert!(
            start <= end,
            "Interval::new: start {:?} must not exceed end {:?}",
            start,
            end
        );
        Self {
            start_inclusive: start,
            end_exclusive: end,
        }
    }

    /// Creates the interval `[start, end)`, rejecting `start > end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftmap_core::primitives::Interval;
    ///
    /// assert!(Interval::try_new(1, 4).is_ok());
    /// assert!(Interval::try_new(4, 4).is_ok());
    /// assert!(Interval::try_new(5, 4).is_err());
    /// ```
    #[inline]
    pub fn try_new(start: T, end: T) -> Result<Self, MalformedIntervalError<T>>
    where
        T: PartialOrd + Copy,
    {
        if start > end {
            return Err(MalformedIntervalError::new(start, end));
        }
        Ok(Self {
            start_inclusive: start,
            end_exclusive: end,
        })
    }

    /// Creates the interval `[start, start + len)`.
    ///
    /// A negative `len` yields [`IntervalError::Malformed`], an end beyond the
    /// range of `T` yields [`IntervalError::Overflow`].
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftmap_core::{err::IntervalError, primitives::Interval};
    ///
    /// let interval = Interval::from_start_len(79, 14).unwrap();
    /// assert_eq!(interval, Interval::new(79, 93));
    /// assert!(matches!(Interval::from_start_len(10, -1), Err(IntervalError::Malformed(_))));
    /// assert!(matches!(Interval::from_start_len(i64::MAX, 1), Err(IntervalError::Overflow(_))));
    /// ```
    #[inline]
    pub fn from_start_len(start: T, len: T) -> Result<Self, IntervalError<T>>
    where
        T: PartialOrd + Copy + CheckedAdd,
    {
        let end = start
            .checked_add(&len)
            .ok_or(CoordinateOverflowError::addition(start, len))?;
        Ok(Self::try_new(start, end)?)
    }

    /// Builds an interval from bounds already known to be ordered.
    #[inline]
    pub(crate) const fn new_unchecked(start: T, end: T) -> Self {
        Self {
            start_inclusive: start,
            end_exclusive: end,
        }
    }

    /// Returns the inclusive start of the interval.
    #[inline]
    pub fn start(&self) -> T
    where
        T: Copy,
    {
        self.start_inclusive
    }

    /// Returns the exclusive end of the interval.
    #[inline]
    pub fn end(&self) -> T
    where
        T: Copy,
    {
        self.end_exclusive
    }

    /// Returns `true` if the interval holds no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftmap_core::primitives::Interval;
    ///
    /// assert!(Interval::new(5, 5).is_empty());
    /// assert!(!Interval::new(1, 5).is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool
    where
        T: PartialEq,
    {
        self.start_inclusive == self.end_exclusive
    }

    /// Returns the number of values in the interval.
    #[inline]
    pub fn len(&self) -> T
    where
        T: Copy + Sub<Output = T>,
    {
        self.end_exclusive - self.start_inclusive
    }

    /// Returns `true` if `point` lies in `[start, end)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftmap_core::primitives::Interval;
    ///
    /// let interval = Interval::new(1, 5);
    /// assert!(interval.contains(1));
    /// assert!(interval.contains(4));
    /// assert!(!interval.contains(5));
    /// assert!(!interval.contains(0));
    /// ```
    #[inline]
    pub fn contains(&self, point: T) -> bool
    where
        T: PartialOrd,
    {
        point >= self.start_inclusive && point < self.end_exclusive
    }

    /// Returns the common part of both intervals, or `None` if it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftmap_core::primitives::Interval;
    ///
    /// let a = Interval::new(1, 5);
    /// assert_eq!(a.intersection(&Interval::new(3, 7)), Some(Interval::new(3, 5)));
    /// assert_eq!(a.intersection(&Interval::new(5, 8)), None);
    /// ```
    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Self>
    where
        T: Ord + Copy,
    {
        let start = self.start_inclusive.max(other.start_inclusive);
        let end = self.end_exclusive.min(other.end_exclusive);
        (start < end).then_some(Self::new_unchecked(start, end))
    }

    /// Moves both bounds by `offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftmap_core::primitives::Interval;
    ///
    /// assert_eq!(Interval::new(98, 100).shift(-48), Interval::new(50, 52));
    /// ```
    #[inline]
    pub fn shift(&self, offset: T) -> Self
    where
        T: Copy + Add<Output = T>,
    {
        Self::new_unchecked(
            self.start_inclusive + offset,
            self.end_exclusive + offset,
        )
    }

    /// Converts the interval into a standard library range.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<T>
    where
        T: Copy,
    {
        self.start_inclusive..self.end_exclusive
    }
}

impl<T: Default> Default for Interval<T> {
    #[inline]
    fn default() -> Self {
        Self {
            start_inclusive: T::default(),
            end_exclusive: T::default(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    /// Formats the interval as `[start, end)`.
    ///
    /// ```
    /// use shiftmap_core::primitives::Interval;
    ///
    /// assert_eq!(format!("{}", Interval::new(1, 5)), "[1, 5)");
    /// ```
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}

impl<T: PartialOrd + Copy> TryFrom<std::ops::Range<T>> for Interval<T> {
    type Error = MalformedIntervalError<T>;

    /// ```
    /// use shiftmap_core::primitives::Interval;
    ///
    /// let interval = Interval::try_from(2..6).unwrap();
    /// assert_eq!(interval.to_range(), 2..6);
    /// assert!(Interval::try_from(6..2).is_err());
    /// ```
    #[inline]
    fn try_from(range: std::ops::Range<T>) -> Result<Self, Self::Error> {
        Self::try_new(range.start, range.end)
    }
}
