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

//! Fixtures shared by the unit tests of this crate.

use crate::{
    mapping::ShiftMapping,
    shift::ShiftRange,
    stage::{DomainId, Stage},
};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use shiftmap_core::primitives::Interval;

#[inline]
pub fn iv(a: i64, b: i64) -> Interval<i64> {
    Interval::new(a, b)
}

/// The stage `n -> n + 1`.
#[inline]
pub fn stage(n: u32) -> Stage {
    Stage::new(DomainId::new(n), DomainId::new(n + 1))
}

/// `seed-to-soil` of the almanac sample: `50 98 2` and `52 50 48`.
pub fn sample_seed_to_soil() -> ShiftMapping<i64> {
    ShiftMapping::from_triples(stage(0), [(50, 98, 2), (52, 50, 48)])
        .expect("sample seed-to-soil map is valid")
}

/// All seven maps of the almanac sample, chained `0 -> 1 -> ... -> 7`.
pub fn sample_stages() -> Vec<ShiftMapping<i64>> {
    let blocks: [&[(i64, i64, i64)]; 7] = [
        &[(50, 98, 2), (52, 50, 48)],
        &[(0, 15, 37), (37, 52, 2), (39, 0, 15)],
        &[(49, 53, 8), (0, 11, 42), (42, 0, 7), (57, 7, 4)],
        &[(88, 18, 7), (18, 25, 70)],
        &[(45, 77, 23), (81, 45, 19), (68, 64, 13)],
        &[(0, 69, 1), (1, 0, 69)],
        &[(60, 56, 37), (56, 93, 4)],
    ];
    blocks
        .iter()
        .zip(0u32..)
        .map(|(triples, n)| {
            ShiftMapping::from_triples(stage(n), triples.iter().copied())
                .expect("sample almanac maps are valid")
        })
        .collect()
}

/// A random mapping over roughly `[-30, 130)` with small gaps, touching
/// neighbours and offsets in both directions.
pub fn random_mapping(rng: &mut ChaCha8Rng, stage: Stage) -> ShiftMapping<i64> {
    let mut ranges = Vec::new();
    let mut cursor: i64 = rng.random_range(-30..0);
    for _ in 0..rng.random_range(0..7) {
        cursor += rng.random_range(0..12);
        let len = rng.random_range(1..25);
        let offset = rng.random_range(-40..=40);
        ranges.push(ShiftRange::new(iv(cursor, cursor + len), offset));
        cursor += len;
    }
    ShiftMapping::new(stage, ranges).expect("generated ranges are disjoint")
}

/// A random mapping over `[0, span)` with up to a dozen ranges and offsets
/// of up to a quarter span in both directions.
pub fn random_wide_mapping(rng: &mut ChaCha8Rng, stage: Stage, span: i64) -> ShiftMapping<i64> {
    let mut cuts: Vec<i64> = (0..24).map(|_| rng.random_range(0..span)).collect();
    cuts.sort_unstable();
    cuts.dedup();
    let ranges = cuts
        .chunks_exact(2)
        .map(|pair| {
            let offset = rng.random_range(-span / 4..=span / 4);
            ShiftRange::new(iv(pair[0], pair[1]), offset)
        })
        .collect();
    ShiftMapping::new(stage, ranges).expect("generated ranges are disjoint")
}
