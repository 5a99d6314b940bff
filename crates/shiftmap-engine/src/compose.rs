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

//! # Mapping Composition
//!
//! Folds two chained mappings (`X → Y`, then `Y → Z`) into one `X → Z` mapping
//! by slicing intervals, never by enumerating values.
//!
//! Every `x` falls into exactly one of three cases:
//!
//! 1. `x` lies in a range `(I, a)` of `first`. Its `Y` value is `x + a`, which
//!    lies in `I' = I + a`. Slicing `I'` against `second` tells which offset `b`
//!    (possibly zero) applies next; the piece is moved back into `X` by `-a` and
//!    gets the combined offset `a + b`.
//! 2. `x` lies outside `first` but inside a range `(J, b)` of `second`. `first`
//!    leaves it alone, so it gets offset `b`. These are the parts of `J` not
//!    covered by the domain of `first`.
//! 3. Everything else maps to itself and needs no range.

use crate::{
    err::{CompositionDomainMismatchError, CompositionError},
    mapping::ShiftMapping,
    shift::ShiftRange,
};
use shiftmap_core::{Coordinate, err::CoordinateOverflowError, primitives::Interval};
use tracing::{debug, instrument};

/// Composes `first` followed by `second`.
///
/// For every `x`, `compose(first, second)?.image(x) == second.image(first.image(x))`.
///
/// # Errors
///
/// - [`CompositionError::DomainMismatch`] if `first` does not chain into `second`.
/// - [`CompositionError::Overlap`] if the derived ranges are not disjoint, which
///   can only happen for degenerate inputs.
/// - [`CompositionError::Overflow`] if some `x` would move further than the
///   coordinate type can express in one step.
///
/// # Examples
///
/// ```
/// use shiftmap_core::primitives::Interval;
/// use shiftmap_engine::{compose::compose, mapping::ShiftMapping, shift::ShiftRange, stage::{DomainId, Stage}};
///
/// let a = ShiftMapping::new(
///     Stage::new(DomainId::new(0), DomainId::new(1)),
///     vec![ShiftRange::new(Interval::new(10, 20), 5)],
/// )
/// .unwrap();
/// let b = ShiftMapping::new(
///     Stage::new(DomainId::new(1), DomainId::new(2)),
///     vec![ShiftRange::new(Interval::new(13, 17), 100)],
/// )
/// .unwrap();
///
/// let ab = compose(&a, &b).unwrap();
/// assert_eq!(ab.image(11), 116);
/// assert_eq!(ab.image(13), 18);
/// assert_eq!(ab.image(25), 25);
/// ```
#[instrument(level = "debug", skip_all, fields(first = %first.stage(), second = %second.stage()))]
pub fn compose<T: Coordinate>(
    first: &ShiftMapping<T>,
    second: &ShiftMapping<T>,
) -> Result<ShiftMapping<T>, CompositionError<T>> {
    if !first.stage().chains_into(&second.stage()) {
        return Err(CompositionDomainMismatchError::new(first.stage(), second.stage()).into());
    }

    let mut derived = Vec::with_capacity(first.len() + second.len());

    let mut overflow = None;
    for range in first.ranges() {
        let a = range.offset();
        second.for_each_piece(range.target(), |piece, b| match a.checked_add(&b) {
            Some(total) => {
                let source = Interval::new(piece.start() - a, piece.end() - a);
                derived.push(ShiftRange::new(source, total));
            }
            None => {
                overflow.get_or_insert(CoordinateOverflowError::addition(a, b));
            }
        });
    }
    if let Some(err) = overflow {
        return Err(CompositionError::Overflow(err));
    }

    let first_domain = first.domain();
    for range in second.ranges() {
        for gap in &first_domain.gaps_within(range.interval()) {
            derived.push(ShiftRange::new(*gap, range.offset()));
        }
    }

    let composed = ShiftMapping::new(first.stage().then(&second.stage()), derived)
        .map_err(CompositionError::Overlap)?
        .simplify();
    debug!(
        first_ranges = first.len(),
        second_ranges = second.len(),
        composed_ranges = composed.len(),
        "Composed mappings"
    );
    Ok(composed)
}

/// Composes a whole chain of mappings from left to right.
///
/// # Errors
///
/// [`CompositionError::EmptyChain`] for an empty slice, otherwise whatever
/// [`compose`] reports for the first failing pair.
pub fn compose_all<T: Coordinate>(
    mappings: &[ShiftMapping<T>],
) -> Result<ShiftMapping<T>, CompositionError<T>> {
    let (head, tail) = mappings.split_first().ok_or(CompositionError::EmptyChain)?;
    tail.iter()
        .try_fold(head.clone(), |composed, next| compose(&composed, next))
}
