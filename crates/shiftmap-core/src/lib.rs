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

//! # Shiftmap Core (`shiftmap-core`)
//!
//! Foundational interval primitives used by the remapping engine:
//!
//! - [`primitives::Interval`]: a half-open integer interval `[start, end)`.
//! - [`slice::Slices`]: the exact `(below, intersection, above)` partition of one
//!   interval against another.
//! - [`intervalset::IntervalSet`]: a sorted, coalesced set of disjoint intervals.
//!
//! Everything here is a plain value type; nothing allocates unless it has to.

use num_traits::{PrimInt, Signed, Zero};
use std::fmt::{Debug, Display};
use std::hash::Hash;

pub mod err;
pub mod intervalset;
pub mod primitives;
pub mod slice;

/// The integer type intervals and offsets are expressed in.
///
/// Offsets can move values in both directions, so the coordinate must be signed.
pub trait Coordinate: PrimInt + Signed + Zero + Hash + Send + Sync + Debug + Display {}
impl<T> Coordinate for T where T: PrimInt + Signed + Zero + Hash + Send + Sync + Debug + Display {}
