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

//! # Shift Mapping
//!
//! A [`ShiftMapping`] is an immutable, piecewise-constant-offset function over
//! the integers: identity everywhere except on a finite set of disjoint
//! intervals, each of which adds its own offset.
//!
//! Ranges are kept sorted by start, which makes disjointness a neighbour check
//! at construction and turns point lookups into a binary search.

use crate::{
    err::{MappingError, OverlappingRangesError},
    shift::ShiftRange,
    stage::Stage,
};
use shiftmap_core::{Coordinate, intervalset::IntervalSet, primitives::Interval};
use std::collections::BTreeSet;
use std::fmt::Display;

/// One stage of a remapping pipeline.
///
/// # Invariants
///
/// 1. **Sorted**: ranges are ordered by the start of their interval.
/// 2. **Disjoint**: no two range intervals share a value.
/// 3. **Non-empty**: ranges with an empty interval are dropped at construction.
///
/// # Examples
///
/// ```
/// use shiftmap_core::primitives::Interval;
/// use shiftmap_engine::{mapping::ShiftMapping, shift::ShiftRange, stage::{DomainId, Stage}};
///
/// let stage = Stage::new(DomainId::new(0), DomainId::new(1));
/// let mapping = ShiftMapping::new(
///     stage,
///     vec![
///         ShiftRange::new(Interval::new(98, 100), -48),
///         ShiftRange::new(Interval::new(50, 98), 2),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(mapping.image(79), 81);
/// assert_eq!(mapping.image(99), 51);
/// assert_eq!(mapping.image(14), 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftMapping<T> {
    stage: Stage,
    ranges: Vec<ShiftRange<T>>,
}

impl<T: Coordinate> ShiftMapping<T> {
    /// Builds a mapping, sorting the ranges and rejecting any overlap.
    pub fn new(
        stage: Stage,
        mut ranges: Vec<ShiftRange<T>>,
    ) -> Result<Self, OverlappingRangesError<T>> {
        ranges.retain(|range| !range.interval().is_empty());
        ranges.sort_unstable_by_key(|range| (range.interval().start(), range.interval().end()));

        if let Some(pair) = ranges
            .windows(2)
            .find(|pair| pair[1].interval().start() < pair[0].interval().end())
        {
            return Err(OverlappingRangesError::new(pair[0], pair[1]));
        }

        Ok(Self { stage, ranges })
    }

    /// Builds a mapping from `(destination_start, source_start, length)` triples.
    pub fn from_triples<I>(stage: Stage, triples: I) -> Result<Self, MappingError<T>>
    where
        I: IntoIterator<Item = (T, T, T)>,
    {
        let ranges = triples
            .into_iter()
            .map(|(destination, source, length)| {
                ShiftRange::from_triple(destination, source, length)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(stage, ranges)?)
    }

    /// The mapping without any ranges: every value maps to itself.
    #[inline]
    pub fn identity(stage: Stage) -> Self {
        Self {
            stage,
            ranges: Vec::new(),
        }
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn ranges(&self) -> &[ShiftRange<T>] {
        &self.ranges
    }

    /// Number of shift ranges.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns `true` if every value maps to itself.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.ranges.iter().all(|range| range.offset().is_zero())
    }

    /// The union of all intervals that carry an offset.
    pub fn domain(&self) -> IntervalSet<T> {
        self.ranges.iter().map(|range| range.interval()).collect()
    }

    /// Index of the first range that ends after `point`.
    #[inline]
    fn first_ending_after(&self, point: T) -> usize {
        self.ranges
            .partition_point(|range| range.interval().end() <= point)
    }

    /// The range containing `point`, if any.
    #[inline]
    pub fn range_of(&self, point: T) -> Option<&ShiftRange<T>> {
        self.ranges
            .get(self.first_ending_after(point))
            .filter(|range| range.interval().contains(point))
    }

    /// Maps a single value.
    #[inline]
    pub fn image(&self, point: T) -> T {
        self.range_of(point)
            .map_or(point, |range| point + range.offset())
    }

    /// Maps every value of a small, explicit set.
    ///
    /// Values that collide after mapping are merged, as sets do. Ranges must
    /// go through [`ShiftMapping::image_range`] instead.
    pub fn image_set(&self, points: &BTreeSet<T>) -> BTreeSet<T> {
        points.iter().map(|&point| self.image(point)).collect()
    }

    /// Splits `input` into consecutive pieces, each paired with the offset the
    /// mapping applies to it (zero for pieces outside every range).
    ///
    /// The remainder still to be classified is sliced against each overlapping
    /// range in order: `below` is untouched, the intersection takes the range
    /// offset and `above` carries over to the next range. Since the ranges are
    /// sorted and disjoint the remainder is always a single interval.
    pub(crate) fn for_each_piece<F>(&self, input: Interval<T>, mut emit: F)
    where
        F: FnMut(Interval<T>, T),
    {
        if input.is_empty() {
            return;
        }

        let mut remainder = input;
        for range in &self.ranges[self.first_ending_after(input.start())..] {
            if remainder.is_empty() || range.interval().start() >= remainder.end() {
                break;
            }
            let (below, inside, above) = remainder.slice(&range.interval()).into_parts();
            if !below.is_empty() {
                emit(below, T::zero());
            }
            if !inside.is_empty() {
                emit(inside, range.offset());
            }
            remainder = above;
        }

        if !remainder.is_empty() {
            emit(remainder, T::zero());
        }
    }

    /// Maps a whole interval.
    ///
    /// The union of the returned intervals is exactly the image of `input`. They
    /// are the images of disjoint pieces of `input`, so their lengths sum to
    /// `input.len()`; two pieces may still land on overlapping targets.
    ///
    /// ```
    /// use shiftmap_core::primitives::Interval;
    /// use shiftmap_engine::{mapping::ShiftMapping, shift::ShiftRange, stage::Stage};
    ///
    /// let mapping = ShiftMapping::new(
    ///     Stage::default(),
    ///     vec![ShiftRange::new(Interval::new(50, 98), 2)],
    /// )
    /// .unwrap();
    /// assert_eq!(
    ///     mapping.image_range(Interval::new(40, 60)),
    ///     vec![Interval::new(40, 50), Interval::new(52, 62)]
    /// );
    /// ```
    pub fn image_range(&self, input: Interval<T>) -> Vec<Interval<T>> {
        let mut images = Vec::new();
        self.image_range_into(input, &mut images);
        images
    }

    #[inline]
    fn image_range_into(&self, input: Interval<T>, images: &mut Vec<Interval<T>>) {
        self.for_each_piece(input, |piece, offset| images.push(piece.shift(offset)));
    }

    /// Maps every input interval and concatenates the results.
    ///
    /// Images of different inputs may overlap; no deduplication happens here.
    pub fn image_multi_range(&self, inputs: &[Interval<T>]) -> Vec<Interval<T>> {
        let mut images = Vec::with_capacity(inputs.len());
        for &input in inputs {
            self.image_range_into(input, &mut images);
        }
        images
    }

    /// An equivalent mapping with zero-offset ranges removed and touching ranges
    /// of equal offset merged.
    pub fn simplify(&self) -> Self {
        let mut merged: Vec<ShiftRange<T>> = Vec::with_capacity(self.ranges.len());
        for range in self.ranges.iter().filter(|range| !range.offset().is_zero()) {
            match merged.last_mut() {
                Some(last)
                    if last.offset() == range.offset()
                        && last.interval().end() == range.interval().start() =>
                {
                    *last = ShiftRange::new(
                        Interval::new(last.interval().start(), range.interval().end()),
                        last.offset(),
                    );
                }
                _ => merged.push(*range),
            }
        }
        Self {
            stage: self.stage,
            ranges: merged,
        }
    }
}

impl<T: Coordinate> Display for ShiftMapping<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ShiftMapping({}: ", self.stage)?;
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", range)?;
        }
        write!(f, ")")
    }
}

impl<'a, T> IntoIterator for &'a ShiftMapping<T> {
    type Item = &'a ShiftRange<T>;
    type IntoIter = core::slice::Iter<'a, ShiftRange<T>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{iv, random_mapping, sample_seed_to_soil, stage};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn covered(intervals: &[Interval<i64>]) -> BTreeSet<i64> {
        intervals.iter().flat_map(|i| i.to_range()).collect()
    }

    #[test]
    fn test_new_sorts_ranges() {
        let m = ShiftMapping::new(
            stage(0),
            vec![
                ShiftRange::new(iv(20, 30), 1),
                ShiftRange::new(iv(0, 10), 2),
                ShiftRange::new(iv(10, 20), 3),
            ],
        )
        .unwrap();
        let starts: Vec<_> = m.ranges().iter().map(|r| r.interval().start()).collect();
        assert_eq!(starts, vec![0, 10, 20]);
    }

    #[test]
    fn test_new_rejects_overlap() {
        let err = ShiftMapping::new(
            stage(0),
            vec![ShiftRange::new(iv(0, 10), 1), ShiftRange::new(iv(9, 12), 2)],
        )
        .unwrap_err();
        assert_eq!(err.first().interval(), iv(0, 10));
        assert_eq!(err.second().interval(), iv(9, 12));
    }

    #[test]
    fn test_new_rejects_containment() {
        assert!(
            ShiftMapping::new(
                stage(0),
                vec![ShiftRange::new(iv(0, 10), 1), ShiftRange::new(iv(3, 4), 2)],
            )
            .is_err()
        );
    }

    #[test]
    fn test_new_drops_empty_ranges() {
        let m = ShiftMapping::new(
            stage(0),
            vec![ShiftRange::new(iv(5, 5), 7), ShiftRange::new(iv(0, 10), 1)],
        )
        .unwrap();
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_from_triples_reports_bad_length() {
        let err = ShiftMapping::<i64>::from_triples(stage(0), [(0, 10, -1)]).unwrap_err();
        assert!(matches!(err, MappingError::MalformedInterval(_)));

        let err = ShiftMapping::<i64>::from_triples(stage(0), [(0, 10, 5), (0, 12, 5)]).unwrap_err();
        assert!(matches!(err, MappingError::OverlappingRanges(_)));
    }

    #[test]
    fn test_from_triples_reports_overflow() {
        let err = ShiftMapping::<i64>::from_triples(stage(0), [(i64::MAX, -10, 1)]).unwrap_err();
        assert!(matches!(err, MappingError::Overflow(_)));
        assert_eq!(
            err.to_string(),
            "Coordinate overflow: 9223372036854775807 + 1 is out of range"
        );
    }

    #[test]
    fn test_image_points() {
        let m = sample_seed_to_soil();
        assert_eq!(m.image(79), 81);
        assert_eq!(m.image(14), 14);
        assert_eq!(m.image(55), 57);
        assert_eq!(m.image(13), 13);
        assert_eq!(m.image(98), 50);
        assert_eq!(m.image(99), 51);
        assert_eq!(m.image(100), 100);
        assert_eq!(m.image(50), 52);
        assert_eq!(m.image(49), 49);
    }

    #[test]
    fn test_image_set() {
        let m = sample_seed_to_soil();
        let seeds = BTreeSet::from([79, 14, 55, 13]);
        assert_eq!(m.image_set(&seeds), BTreeSet::from([81, 14, 57, 13]));
    }

    #[test]
    fn test_image_range_inside_one_range() {
        let m = sample_seed_to_soil();
        let images = m.image_range(iv(79, 93));
        assert_eq!(images, vec![iv(81, 95)]);
        assert_eq!(images.iter().map(|i| i.len()).sum::<i64>(), 14);
    }

    #[test]
    fn test_image_range_spanning_everything() {
        let m = sample_seed_to_soil();
        let images = m.image_range(iv(40, 110));
        assert_eq!(
            images,
            vec![iv(40, 50), iv(52, 100), iv(50, 52), iv(100, 110)]
        );
    }

    #[test]
    fn test_image_range_untouched() {
        let m = sample_seed_to_soil();
        assert_eq!(m.image_range(iv(0, 50)), vec![iv(0, 50)]);
        assert_eq!(m.image_range(iv(100, 120)), vec![iv(100, 120)]);
        assert!(m.image_range(iv(60, 60)).is_empty());
    }

    #[test]
    fn test_image_range_touching_boundaries() {
        let m = sample_seed_to_soil();
        assert_eq!(m.image_range(iv(97, 99)), vec![iv(99, 100), iv(50, 51)]);
        assert_eq!(m.image_range(iv(99, 101)), vec![iv(51, 52), iv(100, 101)]);
    }

    #[test]
    fn test_image_range_at_almanac_scale() {
        let m = ShiftMapping::<i64>::from_triples(
            stage(0),
            [
                (500_000_000_000, 1_000_000_000_000, 2_000_000_000_000),
                (4_000_000_000_000, 3_000_000_000_000, 500_000_000_000),
            ],
        )
        .unwrap();
        let input = iv(500_000_000_000, 3_200_000_000_000);
        let images = m.image_range(input);
        assert_eq!(
            images,
            vec![
                iv(500_000_000_000, 1_000_000_000_000),
                iv(500_000_000_000, 2_500_000_000_000),
                iv(4_000_000_000_000, 4_200_000_000_000),
            ]
        );
        assert_eq!(images.iter().map(|i| i.len()).sum::<i64>(), input.len());
        assert_eq!(images.iter().map(|i| i.start()).min(), Some(500_000_000_000));
        for x in [input.start(), 999_999_999_999, 1_000_000_000_000, 3_199_999_999_999] {
            let y = m.image(x);
            assert!(images.iter().any(|i| i.contains(y)), "x = {x}");
        }
    }

    #[test]
    fn test_image_multi_range_concatenates() {
        let m = sample_seed_to_soil();
        let images = m.image_multi_range(&[iv(79, 93), iv(55, 68)]);
        assert_eq!(images, vec![iv(81, 95), iv(57, 70)]);
    }

    #[test]
    fn test_identity() {
        let m = ShiftMapping::<i64>::identity(stage(0));
        assert!(m.is_identity());
        assert_eq!(m.image(-7), -7);
        assert_eq!(m.image_range(iv(-3, 3)), vec![iv(-3, 3)]);
    }

    #[test]
    fn test_simplify_merges_and_drops_zero_offsets() {
        let m = ShiftMapping::new(
            stage(0),
            vec![
                ShiftRange::new(iv(0, 5), 3),
                ShiftRange::new(iv(5, 9), 3),
                ShiftRange::new(iv(9, 12), 0),
                ShiftRange::new(iv(12, 14), 3),
            ],
        )
        .unwrap();
        let simple = m.simplify();
        assert_eq!(
            simple.ranges(),
            &[ShiftRange::new(iv(0, 9), 3), ShiftRange::new(iv(12, 14), 3)]
        );
        for x in -2..16 {
            assert_eq!(m.image(x), simple.image(x));
        }
    }

    #[test]
    fn test_range_images_preserve_cardinality_and_cover_point_images() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xC0_FFEE);
        for _ in 0..300 {
            let m = random_mapping(&mut rng, stage(0));
            let start = rng.random_range(-40..120);
            let input = iv(start, start + rng.random_range(0..60));
            let images = m.image_range(input);

            assert_eq!(images.iter().map(|i| i.len()).sum::<i64>(), input.len());
            let expected: BTreeSet<i64> = input.to_range().map(|p| m.image(p)).collect();
            assert_eq!(covered(&images), expected, "{m} on {input}");
        }
    }
}
