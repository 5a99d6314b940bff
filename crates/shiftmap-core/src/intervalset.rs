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

//! IntervalSet: sorted, disjoint, coalesced half-open intervals.
//!
//! Invariants (always held):
//!    - intervals are sorted by `start()`
//!    - intervals are non-empty, non-overlapping and non-touching
//!
//! Complexity:
//!    - from_vec: `O(n log n)`
//!    - gaps_within: `O(log n + k)`

use crate::primitives::Interval;
use core::ops::Deref;
use num_traits::Zero;
use std::ops::{Add, Sub};

/// A set of integers stored as sorted, disjoint `[start, end)` intervals.
///
/// Touching intervals are merged on construction (`[1, 3)` and `[3, 5)` become
/// `[1, 5)`), so every set has exactly one representation. This is the
/// structure to reach for when overlapping range images have to be turned
/// into a true disjoint union.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntervalSet<T> {
    intervals: Vec<Interval<T>>,
}

impl<T> IntervalSet<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Builds a set from arbitrary intervals, sorting and merging them in place.
    #[inline]
    pub fn from_vec(mut intervals: Vec<Interval<T>>) -> Self
    where
        T: Ord + Copy,
    {
        Self::coalesce_unsorted_in_place(&mut intervals);
        Self { intervals }
    }

    /// Number of disjoint intervals in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Interval<T>] {
        &self.intervals
    }

    /// Total number of integers covered by the set.
    #[inline]
    pub fn measure(&self) -> T
    where
        T: Copy + Zero + Add<Output = T> + Sub<Output = T>,
    {
        self.intervals
            .iter()
            .fold(T::zero(), |total, interval| total + interval.len())
    }

    /// Index of the first interval whose end lies strictly after `point`.
    ///
    /// Every interval before this index ends at or before `point` and therefore
    /// cannot contain or overlap anything starting at `point`.
    #[inline]
    fn first_ending_after(&self, point: T) -> usize
    where
        T: Ord + Copy,
    {
        self.intervals
            .partition_point(|interval| interval.end() <= point)
    }

    /// The parts of `bounds` that are not covered by the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftmap_core::intervalset::IntervalSet;
    /// use shiftmap_core::primitives::Interval;
    ///
    /// let set = IntervalSet::from_vec(vec![Interval::new(2, 4), Interval::new(6, 8)]);
    /// let gaps = set.gaps_within(Interval::new(0, 10));
    /// assert_eq!(
    ///     gaps.as_slice(),
    ///     &[Interval::new(0, 2), Interval::new(4, 6), Interval::new(8, 10)]
    /// );
    /// ```
    pub fn gaps_within(&self, bounds: Interval<T>) -> Self
    where
        T: Ord + Copy,
    {
        let mut gaps = Vec::new();
        if bounds.is_empty() {
            return Self { intervals: gaps };
        }

        let mut cursor = bounds.start();
        for interval in &self.intervals[self.first_ending_after(bounds.start())..] {
            if interval.start() >= bounds.end() {
                break;
            }
            if cursor < interval.start() {
                gaps.push(Interval::new_unchecked(cursor, interval.start()));
            }
            cursor = cursor.max(interval.end());
        }
        if cursor < bounds.end() {
            gaps.push(Interval::new_unchecked(cursor, bounds.end()));
        }
        Self { intervals: gaps }
    }

    /// Sorts arbitrary intervals and merges overlapping or touching neighbours in place.
    /// Empty intervals are dropped.
    pub fn coalesce_unsorted_in_place(intervals: &mut Vec<Interval<T>>)
    where
        T: Ord + Copy,
    {
        intervals.retain(|interval| !interval.is_empty());
        intervals.sort_unstable_by_key(|interval| interval.start());

        let mut merged: Vec<Interval<T>> = Vec::with_capacity(intervals.len());
        for &interval in intervals.iter() {
            Self::push_sorted(&mut merged, interval);
        }
        *intervals = merged;
        debug_assert!(Self::invariants_hold(intervals));
    }

    /// Appends `next` to a sorted, coalesced vector, merging with the tail when
    /// they overlap or touch. `next` must not start before the current tail.
    #[inline]
    fn push_sorted(destination: &mut Vec<Interval<T>>, next: Interval<T>)
    where
        T: Ord + Copy,
    {
        match destination.last_mut() {
            Some(tail) if tail.end() >= next.start() => {
                *tail = Interval::new_unchecked(tail.start(), tail.end().max(next.end()));
            }
            _ => destination.push(next),
        }
    }

    #[cfg(debug_assertions)]
    fn invariants_hold(intervals: &[Interval<T>]) -> bool
    where
        T: Ord + Copy,
    {
        intervals.iter().all(|interval| !interval.is_empty())
            && intervals
                .windows(2)
                .all(|pair| pair[0].end() < pair[1].start())
    }

    #[cfg(not(debug_assertions))]
    #[inline]
    fn invariants_hold(_intervals: &[Interval<T>]) -> bool {
        true
    }
}

impl<T: Ord + Copy> From<Vec<Interval<T>>> for IntervalSet<T> {
    #[inline]
    fn from(intervals: Vec<Interval<T>>) -> Self {
        Self::from_vec(intervals)
    }
}

impl<T: Ord + Copy> FromIterator<Interval<T>> for IntervalSet<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> Deref for IntervalSet<T> {
    type Target = [Interval<T>];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.intervals
    }
}

impl<'a, T> IntoIterator for &'a IntervalSet<T> {
    type Item = &'a Interval<T>;
    type IntoIter = core::slice::Iter<'a, Interval<T>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
