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

use crate::almanac::AlmanacError;
use shiftmap_engine::err::{CompositionError, EmptyReductionError, PipelineError};
use std::fmt::Display;

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Almanac(AlmanacError),
    Pipeline(PipelineError),
    Composition(CompositionError<i64>),
    EmptyReduction(EmptyReductionError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use AppError::*;
        match self {
            Io(e) => write!(f, "Failed to read input: {}", e),
            Almanac(e) => write!(f, "Invalid almanac: {}", e),
            Pipeline(e) => write!(f, "{}", e),
            Composition(e) => write!(f, "{}", e),
            EmptyReduction(_) => write!(f, "No seeds to locate"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use AppError::*;
        match self {
            Io(e) => Some(e),
            Almanac(e) => Some(e),
            Pipeline(e) => Some(e),
            Composition(e) => Some(e),
            EmptyReduction(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<AlmanacError> for AppError {
    fn from(err: AlmanacError) -> Self {
        AppError::Almanac(err)
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::Pipeline(err)
    }
}

impl From<CompositionError<i64>> for AppError {
    fn from(err: CompositionError<i64>) -> Self {
        AppError::Composition(err)
    }
}

impl From<EmptyReductionError> for AppError {
    fn from(err: EmptyReductionError) -> Self {
        AppError::EmptyReduction(err)
    }
}
