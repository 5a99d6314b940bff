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

//! # Interval Slicing
//!
//! Splits an interval against another one into the part below it, the part
//! inside it and the part above it. The three pieces are disjoint and together
//! cover the original interval exactly; any of them may be empty.

use crate::primitives::Interval;

/// The `(below, intersection, above)` partition of an interval against another.
///
/// Empty pieces are anchored inside the bounds of the sliced interval, so
/// `below.start()` is always the original start and `above.end()` the original end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Slices<T> {
    below: Interval<T>,
    intersection: Interval<T>,
    above: Interval<T>,
}

impl<T: Copy> Slices<T> {
    /// The part of the sliced interval lying below the other interval.
    #[inline]
    pub fn below(&self) -> Interval<T> {
        self.below
    }

    /// The part of the sliced interval lying inside the other interval.
    #[inline]
    pub fn intersection(&self) -> Interval<T> {
        self.intersection
    }

    /// The part of the sliced interval lying above the other interval.
    #[inline]
    pub fn above(&self) -> Interval<T> {
        self.above
    }

    #[inline]
    pub fn into_parts(self) -> (Interval<T>, Interval<T>, Interval<T>) {
        (self.below, self.intersection, self.above)
    }

    /// Iterates over the non-empty overhangs (`below`, then `above`).
    #[inline]
    pub fn overhangs(&self) -> impl Iterator<Item = Interval<T>>
    where
        T: PartialEq,
    {
        [self.below, self.above]
            .into_iter()
            .filter(|piece| !piece.is_empty())
    }
}

impl<T> Interval<T> {
    /// Slices this interval against `other`.
    ///
    /// The result covers `self` exactly: the intersection equals `self ∩ other`,
    /// and `below`/`above` hold the overhangs on either side, empty if there are none.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftmap_core::primitives::Interval;
    ///
    /// let slices = Interval::new(0, 10).slice(&Interval::new(3, 6));
    /// assert_eq!(slices.below(), Interval::new(0, 3));
    /// assert_eq!(slices.intersection(), Interval::new(3, 6));
    /// assert_eq!(slices.above(), Interval::new(6, 10));
    ///
    /// let slices = Interval::new(0, 10).slice(&Interval::new(20, 30));
    /// assert_eq!(slices.below(), Interval::new(0, 10));
    /// assert!(slices.intersection().is_empty());
    /// assert!(slices.above().is_empty());
    /// ```
    #[inline]
    pub fn slice(&self, other: &Self) -> Slices<T>
    where
        T: Ord + Copy,
    {
        let (start, end) = (self.start(), self.end());
        // Both cut points are clamped into `self`; since `other.start() <= other.end()`
        // the clamped points stay ordered as well.
        let lower_cut = other.start().clamp(start, end);
        let upper_cut = other.end().clamp(start, end);

        Slices {
            below: Interval::new_unchecked(start, lower_cut),
            intersection: Interval::new_unchecked(lower_cut, upper_cut),
            above: Interval::new_unchecked(upper_cut, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[inline]
    fn iv(a: i64, b: i64) -> Interval<i64> {
        Interval::new(a, b)
    }

    fn assert_exact(a: Interval<i64>, b: Interval<i64>) {
        let slices = a.slice(&b);
        let (below, mid, above) = slices.into_parts();
        assert_eq!(below.len() + mid.len() + above.len(), a.len(), "{a} / {b}");
        assert_eq!(
            a.intersection(&b),
            (!mid.is_empty()).then_some(mid),
            "{a} / {b}"
        );
        for part in [below, mid, above] {
            assert!(a.start() <= part.start() && part.end() <= a.end(), "{a} / {b}");
        }
        assert_eq!(below.end(), mid.start());
        assert_eq!(mid.end(), above.start());
    }

    #[test]
    fn test_other_strictly_below() {
        let s = iv(10, 20).slice(&iv(0, 5));
        assert!(s.below().is_empty());
        assert!(s.intersection().is_empty());
        assert_eq!(s.above(), iv(10, 20));
    }

    #[test]
    fn test_other_strictly_above() {
        let s = iv(10, 20).slice(&iv(25, 30));
        assert_eq!(s.below(), iv(10, 20));
        assert!(s.intersection().is_empty());
        assert!(s.above().is_empty());
    }

    #[test]
    fn test_touching_is_no_overlap() {
        let s = iv(10, 20).slice(&iv(20, 30));
        assert_eq!(s.below(), iv(10, 20));
        assert!(s.intersection().is_empty());

        let s = iv(10, 20).slice(&iv(0, 10));
        assert!(s.intersection().is_empty());
        assert_eq!(s.above(), iv(10, 20));
    }

    #[test]
    fn test_left_overhang_only() {
        let s = iv(10, 20).slice(&iv(15, 30));
        assert_eq!(s.below(), iv(10, 15));
        assert_eq!(s.intersection(), iv(15, 20));
        assert!(s.above().is_empty());
    }

    #[test]
    fn test_right_overhang_only() {
        let s = iv(10, 20).slice(&iv(0, 12));
        assert!(s.below().is_empty());
        assert_eq!(s.intersection(), iv(10, 12));
        assert_eq!(s.above(), iv(12, 20));
    }

    #[test]
    fn test_both_overhangs() {
        let s = iv(10, 20).slice(&iv(12, 18));
        assert_eq!(s.below(), iv(10, 12));
        assert_eq!(s.intersection(), iv(12, 18));
        assert_eq!(s.above(), iv(18, 20));
        assert_eq!(s.overhangs().collect::<Vec<_>>(), vec![iv(10, 12), iv(18, 20)]);
    }

    #[test]
    fn test_other_contains_self() {
        let s = iv(10, 20).slice(&iv(0, 100));
        assert!(s.below().is_empty());
        assert_eq!(s.intersection(), iv(10, 20));
        assert!(s.above().is_empty());
        assert_eq!(s.overhangs().count(), 0);
    }

    #[test]
    fn test_identical_bounds() {
        let s = iv(10, 20).slice(&iv(10, 20));
        assert_eq!(s.intersection(), iv(10, 20));
        assert_eq!(s.overhangs().count(), 0);
    }

    #[test]
    fn test_empty_self_and_empty_other() {
        assert_exact(iv(5, 5), iv(0, 10));
        assert_exact(iv(0, 10), iv(5, 5));
        let s = iv(0, 10).slice(&iv(5, 5));
        assert_eq!(s.below(), iv(0, 5));
        assert_eq!(s.above(), iv(5, 10));
    }

    #[test]
    fn test_slice_exactness_randomized() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5_11CE);
        for _ in 0..2_000 {
            let a0 = rng.random_range(-50..50);
            let b0 = rng.random_range(-50..50);
            let a = iv(a0, a0 + rng.random_range(0..30));
            let b = iv(b0, b0 + rng.random_range(0..30));
            assert_exact(a, b);
        }
    }
}
