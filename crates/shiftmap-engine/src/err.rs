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

use crate::{shift::ShiftRange, stage::Stage};
use shiftmap_core::{
    Coordinate,
    err::{CoordinateOverflowError, IntervalError, MalformedIntervalError},
};
use std::fmt::Display;

/// Two ranges of the same mapping claim a common value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlappingRangesError<T> {
    first: ShiftRange<T>,
    second: ShiftRange<T>,
}

impl<T: Coordinate> OverlappingRangesError<T> {
    #[inline]
    pub fn new(first: ShiftRange<T>, second: ShiftRange<T>) -> Self {
        Self { first, second }
    }

    #[inline]
    pub fn first(&self) -> ShiftRange<T> {
        self.first
    }

    #[inline]
    pub fn second(&self) -> ShiftRange<T> {
        self.second
    }
}

impl<T: Coordinate> Display for OverlappingRangesError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Shift ranges overlap: {} and {}",
            self.first.interval(),
            self.second.interval()
        )
    }
}

impl<T: Coordinate> std::error::Error for OverlappingRangesError<T> {}

/// The output domain of one mapping is not the input domain of the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompositionDomainMismatchError {
    first: Stage,
    second: Stage,
}

impl CompositionDomainMismatchError {
    #[inline]
    pub fn new(first: Stage, second: Stage) -> Self {
        Self { first, second }
    }

    #[inline]
    pub fn first(&self) -> Stage {
        self.first
    }

    #[inline]
    pub fn second(&self) -> Stage {
        self.second
    }
}

impl Display for CompositionDomainMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stage {} does not chain into stage {}",
            self.first, self.second
        )
    }
}

impl std::error::Error for CompositionDomainMismatchError {}

/// A minimum was requested over no (non-empty) intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EmptyReductionError;

impl Display for EmptyReductionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cannot reduce an empty collection of intervals")
    }
}

impl std::error::Error for EmptyReductionError {}

/// Failure to build a [`ShiftMapping`](crate::mapping::ShiftMapping) from raw parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingError<T> {
    MalformedInterval(MalformedIntervalError<T>),
    Overflow(CoordinateOverflowError<T>),
    OverlappingRanges(OverlappingRangesError<T>),
}

impl<T: Coordinate> Display for MappingError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingError::MalformedInterval(e) => write!(f, "{}", e),
            MappingError::Overflow(e) => write!(f, "{}", e),
            MappingError::OverlappingRanges(e) => write!(f, "{}", e),
        }
    }
}

impl<T: Coordinate> From<MalformedIntervalError<T>> for MappingError<T> {
    fn from(err: MalformedIntervalError<T>) -> Self {
        MappingError::MalformedInterval(err)
    }
}

impl<T: Coordinate> From<IntervalError<T>> for MappingError<T> {
    fn from(err: IntervalError<T>) -> Self {
        match err {
            IntervalError::Malformed(e) => MappingError::MalformedInterval(e),
            IntervalError::Overflow(e) => MappingError::Overflow(e),
        }
    }
}

impl<T: Coordinate> From<OverlappingRangesError<T>> for MappingError<T> {
    fn from(err: OverlappingRangesError<T>) -> Self {
        MappingError::OverlappingRanges(err)
    }
}

impl<T: Coordinate> std::error::Error for MappingError<T> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionError<T> {
    DomainMismatch(CompositionDomainMismatchError),
    /// The derived ranges overlap; the inputs were degenerate.
    Overlap(OverlappingRangesError<T>),
    /// A composed offset does not fit the coordinate type.
    Overflow(CoordinateOverflowError<T>),
    EmptyChain,
}

impl<T: Coordinate> Display for CompositionError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CompositionError::*;
        match self {
            DomainMismatch(e) => write!(f, "{}", e),
            Overlap(e) => write!(f, "Composition produced overlapping ranges: {}", e),
            Overflow(e) => write!(f, "Composition left the coordinate range: {}", e),
            EmptyChain => write!(f, "Cannot compose an empty chain of mappings"),
        }
    }
}

impl<T: Coordinate> From<CompositionDomainMismatchError> for CompositionError<T> {
    fn from(err: CompositionDomainMismatchError) -> Self {
        CompositionError::DomainMismatch(err)
    }
}

impl<T: Coordinate> std::error::Error for CompositionError<T> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineError {
    DomainMismatch(CompositionDomainMismatchError),
    EmptyPipeline,
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::DomainMismatch(e) => write!(f, "{}", e),
            PipelineError::EmptyPipeline => write!(f, "A pipeline needs at least one stage"),
        }
    }
}

impl From<CompositionDomainMismatchError> for PipelineError {
    fn from(err: CompositionDomainMismatchError) -> Self {
        PipelineError::DomainMismatch(err)
    }
}

impl std::error::Error for PipelineError {}
