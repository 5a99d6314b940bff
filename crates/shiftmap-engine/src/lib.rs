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

//! # Shiftmap Engine (`shiftmap-engine`)
//!
//! Piecewise-offset mappings between integer domains, built on the interval
//! primitives of `shiftmap-core`.
//!
//! ## Key Data Structures
//!
//! - **`ShiftRange`**: an interval of the input domain together with the offset
//!   added to every value inside it.
//! - **`ShiftMapping`**: a sorted set of disjoint `ShiftRange`s tagged with the
//!   [`stage::Stage`] it translates between. Values outside every range map to
//!   themselves.
//! - **`Pipeline`**: a non-empty chain of mappings whose stages line up.
//!
//! ## Operations
//!
//! A mapping can be applied to a single value, to a set of values or to whole
//! ranges. Range images are computed by slicing, so their cost depends on the
//! number of intervals involved and never on how many values they contain. Two
//! chained mappings can be folded into one with [`compose::compose`]; the
//! result behaves exactly like applying both in order.

pub mod compose;
pub mod err;
pub mod mapping;
pub mod pipeline;
pub mod shift;
pub mod stage;

#[cfg(test)]
mod testutil;

pub mod prelude {
    pub use crate::compose::{compose, compose_all};
    pub use crate::err::{CompositionError, MappingError, PipelineError};
    pub use crate::mapping::ShiftMapping;
    pub use crate::pipeline::{Pipeline, merge_ranges, reduce_minimum};
    pub use crate::shift::ShiftRange;
    pub use crate::stage::{DomainId, Stage};
    pub use shiftmap_core::primitives::Interval;
}
