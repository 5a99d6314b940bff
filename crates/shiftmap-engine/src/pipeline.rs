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

//! # Pipeline Evaluation
//!
//! Pushes seed ranges or seed points through a chain of mappings and reduces
//! the outcome. The free functions work on plain slices; [`Pipeline`] wraps a
//! chain that has already been validated once.

use crate::{
    compose::compose_all,
    err::{CompositionDomainMismatchError, CompositionError, EmptyReductionError, PipelineError},
    mapping::ShiftMapping,
    stage::Stage,
};
use rayon::prelude::*;
use shiftmap_core::{Coordinate, intervalset::IntervalSet, primitives::Interval};
use std::collections::BTreeSet;
use tracing::{instrument, trace};

/// The smallest start among the non-empty intervals.
///
/// # Errors
///
/// [`EmptyReductionError`] if there is no non-empty interval to reduce over.
#[inline]
pub fn reduce_minimum<T: Coordinate>(ranges: &[Interval<T>]) -> Result<T, EmptyReductionError> {
    ranges
        .iter()
        .filter(|range| !range.is_empty())
        .map(|range| range.start())
        .min()
        .ok_or(EmptyReductionError)
}

/// Merges possibly overlapping ranges into their disjoint union.
#[inline]
pub fn merge_ranges<T: Coordinate>(ranges: &[Interval<T>]) -> IntervalSet<T> {
    ranges.iter().copied().collect()
}

fn check_chain<T: Coordinate>(stages: &[ShiftMapping<T>]) -> Result<(), CompositionDomainMismatchError> {
    match stages
        .windows(2)
        .find(|pair| !pair[0].stage().chains_into(&pair[1].stage()))
    {
        Some(pair) => Err(CompositionDomainMismatchError::new(
            pair[0].stage(),
            pair[1].stage(),
        )),
        None => Ok(()),
    }
}

fn fold_ranges<T: Coordinate>(ranges: Vec<Interval<T>>, stages: &[ShiftMapping<T>]) -> Vec<Interval<T>> {
    stages.iter().fold(ranges, |current, mapping| {
        let next = mapping.image_multi_range(&current);
        trace!(stage = %mapping.stage(), inputs = current.len(), outputs = next.len(), "Applied stage");
        next
    })
}

fn fold_points<T: Coordinate>(points: &BTreeSet<T>, stages: &[ShiftMapping<T>]) -> BTreeSet<T> {
    stages
        .iter()
        .fold(points.clone(), |current, mapping| mapping.image_set(&current))
}

/// Applies `stages` in order, feeding each stage's output ranges into the next.
///
/// An empty stage list returns the input unchanged.
///
/// # Errors
///
/// [`PipelineError::DomainMismatch`] if two neighbouring stages do not chain.
#[instrument(level = "debug", skip_all, fields(stages = stages.len(), inputs = ranges.len()))]
pub fn apply_stages<T: Coordinate>(
    ranges: &[Interval<T>],
    stages: &[ShiftMapping<T>],
) -> Result<Vec<Interval<T>>, PipelineError> {
    check_chain(stages)?;
    Ok(fold_ranges(ranges.to_vec(), stages))
}

/// Applies `stages` in order to an explicit set of points.
///
/// # Errors
///
/// [`PipelineError::DomainMismatch`] if two neighbouring stages do not chain.
#[instrument(level = "debug", skip_all, fields(stages = stages.len(), inputs = points.len()))]
pub fn apply_stages_to_points<T: Coordinate>(
    points: &BTreeSet<T>,
    stages: &[ShiftMapping<T>],
) -> Result<BTreeSet<T>, PipelineError> {
    check_chain(stages)?;
    Ok(fold_points(points, stages))
}

/// A non-empty, validated chain of mappings.
///
/// # Examples
///
/// ```
/// use shiftmap_core::primitives::Interval;
/// use shiftmap_engine::{mapping::ShiftMapping, pipeline::{Pipeline, reduce_minimum}, stage::{DomainId, Stage}};
///
/// let seed_to_soil = ShiftMapping::from_triples(
///     Stage::new(DomainId::new(0), DomainId::new(1)),
///     [(50, 98, 2), (52, 50, 48)],
/// )
/// .unwrap();
/// let pipeline = Pipeline::new(vec![seed_to_soil]).unwrap();
///
/// let images = pipeline.apply_ranges(&[Interval::new(79, 93), Interval::new(55, 68)]);
/// assert_eq!(reduce_minimum(&images).unwrap(), 57);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline<T> {
    stages: Vec<ShiftMapping<T>>,
}

impl<T: Coordinate> Pipeline<T> {
    /// # Errors
    ///
    /// [`PipelineError::EmptyPipeline`] without stages,
    /// [`PipelineError::DomainMismatch`] if two neighbouring stages do not chain.
    pub fn new(stages: Vec<ShiftMapping<T>>) -> Result<Self, PipelineError> {
        if stages.is_empty() {
            return Err(PipelineError::EmptyPipeline);
        }
        check_chain(&stages)?;
        Ok(Self { stages })
    }

    #[inline]
    pub fn stages(&self) -> &[ShiftMapping<T>] {
        &self.stages
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always `false`; a pipeline holds at least one stage.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The stage from the first input domain to the last output domain.
    pub fn stage(&self) -> Stage {
        let first = self.stages[0].stage();
        let last = self.stages[self.stages.len() - 1].stage();
        first.then(&last)
    }

    #[instrument(level = "debug", skip_all, fields(stages = self.stages.len(), inputs = ranges.len()))]
    pub fn apply_ranges(&self, ranges: &[Interval<T>]) -> Vec<Interval<T>> {
        fold_ranges(ranges.to_vec(), &self.stages)
    }

    /// Like [`Pipeline::apply_ranges`], but every input range travels through the
    /// chain on its own rayon task.
    ///
    /// The result covers the same values as the sequential version; pieces are
    /// grouped by input range, in input order.
    #[instrument(level = "debug", skip_all, fields(stages = self.stages.len(), inputs = ranges.len()))]
    pub fn par_apply_ranges(&self, ranges: &[Interval<T>]) -> Vec<Interval<T>> {
        let per_input: Vec<Vec<Interval<T>>> = ranges
            .par_iter()
            .map(|&range| fold_ranges(vec![range], &self.stages))
            .collect();
        per_input.into_iter().flatten().collect()
    }

    #[instrument(level = "debug", skip_all, fields(stages = self.stages.len(), inputs = points.len()))]
    pub fn apply_points(&self, points: &BTreeSet<T>) -> BTreeSet<T> {
        fold_points(points, &self.stages)
    }

    /// Folds the whole chain into a single mapping.
    pub fn composed(&self) -> Result<ShiftMapping<T>, CompositionError<T>> {
        compose_all(&self.stages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        shift::ShiftRange,
        stage::DomainId,
        testutil::{iv, random_mapping, random_wide_mapping, sample_stages, stage},
    };
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use static_assertions::assert_impl_all;

    assert_impl_all!(ShiftMapping<i64>: Send, Sync, Clone);
    assert_impl_all!(Pipeline<i64>: Send, Sync, Clone);

    fn sample_seed_ranges() -> Vec<Interval<i64>> {
        vec![iv(79, 93), iv(55, 68)]
    }

    #[test]
    fn test_reduce_minimum() {
        assert_eq!(reduce_minimum(&[iv(5, 9), iv(-3, 0), iv(2, 4)]), Ok(-3));
    }

    #[test]
    fn test_reduce_minimum_ignores_empty_intervals() {
        assert_eq!(reduce_minimum(&[iv(-10, -10), iv(2, 4)]), Ok(2));
    }

    #[test]
    fn test_reduce_minimum_fails_without_values() {
        assert_eq!(reduce_minimum::<i64>(&[]), Err(EmptyReductionError));
        assert_eq!(reduce_minimum(&[iv(1, 1), iv(3, 3)]), Err(EmptyReductionError));
    }

    #[test]
    fn test_merge_ranges() {
        let merged = merge_ranges(&[iv(5, 10), iv(0, 3), iv(8, 12), iv(3, 4)]);
        assert_eq!(merged.as_slice(), &[iv(0, 4), iv(5, 12)]);
    }

    #[test]
    fn test_apply_stages_sample_ranges() {
        let images = apply_stages(&sample_seed_ranges(), &sample_stages()).unwrap();
        assert_eq!(reduce_minimum(&images), Ok(46));
        assert_eq!(images.iter().map(|r| r.len()).sum::<i64>(), 27);
    }

    #[test]
    fn test_apply_stages_to_points_sample() {
        let seeds = BTreeSet::from([79, 14, 55, 13]);
        let locations = apply_stages_to_points(&seeds, &sample_stages()).unwrap();
        assert_eq!(locations, BTreeSet::from([82, 43, 86, 35]));
        assert_eq!(locations.first(), Some(&35));
    }

    #[test]
    fn test_apply_stages_without_stages_is_identity() {
        let ranges = sample_seed_ranges();
        assert_eq!(apply_stages::<i64>(&ranges, &[]).unwrap(), ranges);
    }

    #[test]
    fn test_apply_stages_rejects_broken_chain() {
        let mut stages = sample_stages();
        stages.swap(2, 3);
        let err = apply_stages(&sample_seed_ranges(), &stages).unwrap_err();
        assert_eq!(
            err,
            PipelineError::DomainMismatch(CompositionDomainMismatchError::new(
                stage(1),
                stage(3)
            ))
        );
    }

    #[test]
    fn test_pipeline_new_validates() {
        assert_eq!(
            Pipeline::<i64>::new(Vec::new()).unwrap_err(),
            PipelineError::EmptyPipeline
        );
        let broken = vec![
            ShiftMapping::new(stage(0), vec![ShiftRange::new(iv(0, 1), 1)]).unwrap(),
            ShiftMapping::new(stage(5), Vec::new()).unwrap(),
        ];
        assert!(matches!(
            Pipeline::new(broken),
            Err(PipelineError::DomainMismatch(_))
        ));
    }

    #[test]
    fn test_pipeline_stage_spans_chain() {
        let pipeline = Pipeline::new(sample_stages()).unwrap();
        assert_eq!(pipeline.len(), 7);
        assert_eq!(
            pipeline.stage(),
            Stage::new(DomainId::new(0), DomainId::new(7))
        );
    }

    #[test]
    fn test_pipeline_strategies_agree_on_sample() {
        let pipeline = Pipeline::new(sample_stages()).unwrap();
        let seeds = sample_seed_ranges();

        let staged = pipeline.apply_ranges(&seeds);
        let parallel = pipeline.par_apply_ranges(&seeds);
        let composed = pipeline.composed().unwrap().image_multi_range(&seeds);

        assert_eq!(reduce_minimum(&staged), Ok(46));
        assert_eq!(reduce_minimum(&parallel), Ok(46));
        assert_eq!(reduce_minimum(&composed), Ok(46));
        assert_eq!(merge_ranges(&staged), merge_ranges(&parallel));
        assert_eq!(merge_ranges(&staged), merge_ranges(&composed));
    }

    #[test]
    fn test_pipeline_strategies_agree_randomized() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xB1_7E);
        for _ in 0..100 {
            let stages: Vec<_> = (0..rng.random_range(1..5))
                .map(|n| random_mapping(&mut rng, stage(n)))
                .collect();
            let pipeline = Pipeline::new(stages).unwrap();
            let seeds: Vec<_> = (0..rng.random_range(1..4))
                .map(|_| {
                    let start = rng.random_range(-40..100);
                    iv(start, start + rng.random_range(1..40))
                })
                .collect();

            let staged = pipeline.apply_ranges(&seeds);
            let expected: BTreeSet<i64> = seeds
                .iter()
                .flat_map(|seed| seed.to_range())
                .map(|x| pipeline.stages().iter().fold(x, |v, m| m.image(v)))
                .collect();
            let merged = merge_ranges(&staged);
            let covered: BTreeSet<i64> = merged.iter().flat_map(|r| r.to_range()).collect();

            assert_eq!(covered, expected);
            assert_eq!(reduce_minimum(&staged).ok(), expected.first().copied());
            assert_eq!(merge_ranges(&pipeline.par_apply_ranges(&seeds)), merged);
            assert_eq!(
                merge_ranges(&pipeline.composed().unwrap().image_multi_range(&seeds)),
                merged
            );
        }
    }

    #[test]
    fn test_pipeline_strategies_agree_at_almanac_scale() {
        const SPAN: i64 = 4_000_000_000_000;
        let mut rng = ChaCha8Rng::seed_from_u64(0x5EED_1E12);
        for _ in 0..20 {
            let stages: Vec<_> = (0..7)
                .map(|n| random_wide_mapping(&mut rng, stage(n), SPAN))
                .collect();
            let pipeline = Pipeline::new(stages).unwrap();
            let seeds: Vec<_> = (0..10)
                .map(|_| {
                    let start = rng.random_range(0..SPAN);
                    iv(start, start + rng.random_range(1_000_000_000..100_000_000_000))
                })
                .collect();
            let seed_len: i64 = seeds.iter().map(|s| s.len()).sum();

            let staged = pipeline.apply_ranges(&seeds);
            let parallel = pipeline.par_apply_ranges(&seeds);
            let composed = pipeline.composed().unwrap().image_multi_range(&seeds);

            for images in [&staged, &parallel, &composed] {
                assert_eq!(images.iter().map(|i| i.len()).sum::<i64>(), seed_len);
            }
            let minimum = reduce_minimum(&staged).unwrap();
            assert_eq!(reduce_minimum(&composed), Ok(minimum));
            assert_eq!(reduce_minimum(&parallel), Ok(minimum));
            assert_eq!(merge_ranges(&staged), merge_ranges(&composed));

            let merged = merge_ranges(&staged);
            for seed in &seeds {
                for x in [seed.start(), seed.end() - 1] {
                    let y = pipeline.stages().iter().fold(x, |v, m| m.image(v));
                    assert!(minimum <= y);
                    assert!(merged.iter().any(|i| i.contains(y)), "x = {x}");
                }
            }
        }
    }
}
