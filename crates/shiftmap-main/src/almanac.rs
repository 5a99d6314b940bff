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

//! Parser for almanac files: a `seeds:` line followed by a chain of
//! `<source>-to-<destination> map:` blocks, each holding
//! `destination_start source_start length` lines.

use shiftmap_core::{
    err::{CoordinateOverflowError, IntervalError},
    primitives::Interval,
};
use shiftmap_engine::{
    err::{OverlappingRangesError, PipelineError},
    mapping::ShiftMapping,
    pipeline::Pipeline,
    shift::ShiftRange,
    stage::{DomainId, Stage},
};
use std::{collections::BTreeSet, fmt::Display};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlmanacErrorKind {
    MissingSeeds,
    InvalidNumber(String),
    MalformedHeader(String),
    FieldCount(usize),
    NegativeLength(i64),
    /// A range or seed reaches past the 64-bit coordinate space.
    Overflow(CoordinateOverflowError<i64>),
    BrokenChain { expected: String, found: String },
    Overlap(OverlappingRangesError<i64>),
    OddSeedCount(usize),
    UnexpectedLine,
}

impl Display for AlmanacErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use AlmanacErrorKind::*;
        match self {
            MissingSeeds => write!(f, "expected a `seeds:` line"),
            InvalidNumber(token) => write!(f, "`{}` is not a valid integer", token),
            MalformedHeader(header) => {
                write!(f, "`{}` is not a `<source>-to-<destination> map:` header", header)
            }
            FieldCount(n) => write!(f, "expected 3 numbers, found {}", n),
            NegativeLength(len) => write!(f, "length {} is negative", len),
            Overflow(e) => write!(f, "{}", e),
            BrokenChain { expected, found } => write!(
                f,
                "map starts at `{}` but the previous map ends at `{}`",
                found, expected
            ),
            Overlap(e) => write!(f, "{}", e),
            OddSeedCount(n) => write!(f, "{} seed numbers cannot form (start, length) pairs", n),
            UnexpectedLine => write!(f, "range line outside of a map block"),
        }
    }
}

/// A parse failure and the 1-based line it was detected on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlmanacError {
    line: usize,
    kind: AlmanacErrorKind,
}

impl AlmanacError {
    #[inline]
    pub fn new(line: usize, kind: AlmanacErrorKind) -> Self {
        Self { line, kind }
    }

    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub fn kind(&self) -> &AlmanacErrorKind {
        &self.kind
    }
}

impl Display for AlmanacError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for AlmanacError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Almanac {
    seeds: Vec<i64>,
    seeds_line: usize,
    domains: Vec<String>,
    stages: Vec<ShiftMapping<i64>>,
}

/// A map block that is still collecting range lines.
struct OpenBlock {
    header_line: usize,
    stage: Stage,
    ranges: Vec<ShiftRange<i64>>,
}

fn parse_number(token: &str, line: usize) -> Result<i64, AlmanacError> {
    token
        .parse()
        .map_err(|_| AlmanacError::new(line, AlmanacErrorKind::InvalidNumber(token.to_owned())))
}

fn intern(domains: &mut Vec<String>, name: &str) -> DomainId {
    let index = match domains.iter().position(|known| known == name) {
        Some(index) => index,
        None => {
            domains.push(name.to_owned());
            domains.len() - 1
        }
    };
    DomainId::new(index as u32)
}

fn parse_header(header: &str, line: usize) -> Result<(&str, &str), AlmanacError> {
    let malformed = || AlmanacError::new(line, AlmanacErrorKind::MalformedHeader(header.to_owned()));
    let name = header.strip_suffix(" map:").ok_or_else(malformed)?;
    let (source, destination) = name.split_once("-to-").ok_or_else(malformed)?;
    let valid = |part: &str| !part.is_empty() && !part.contains(char::is_whitespace);
    if valid(source) && valid(destination) {
        Ok((source, destination))
    } else {
        Err(malformed())
    }
}

fn parse_range(text: &str, line: usize) -> Result<ShiftRange<i64>, AlmanacError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let &[destination, source, length] = fields.as_slice() else {
        return Err(AlmanacError::new(
            line,
            AlmanacErrorKind::FieldCount(fields.len()),
        ));
    };
    let destination = parse_number(destination, line)?;
    let source = parse_number(source, line)?;
    let length = parse_number(length, line)?;
    ShiftRange::from_triple(destination, source, length)
        .map_err(|e| length_error(e, length, line))
}

fn length_error(err: IntervalError<i64>, length: i64, line: usize) -> AlmanacError {
    let kind = if length < 0 {
        AlmanacErrorKind::NegativeLength(length)
    } else {
        match err {
            IntervalError::Overflow(e) => AlmanacErrorKind::Overflow(e),
            IntervalError::Malformed(_) => AlmanacErrorKind::NegativeLength(length),
        }
    };
    AlmanacError::new(line, kind)
}

impl OpenBlock {
    fn close(self) -> Result<ShiftMapping<i64>, AlmanacError> {
        ShiftMapping::new(self.stage, self.ranges)
            .map_err(|e| AlmanacError::new(self.header_line, AlmanacErrorKind::Overlap(e)))
    }
}

impl Almanac {
    pub fn parse(input: &str) -> Result<Self, AlmanacError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(index, text)| (index + 1, text.trim()));

        let (seeds_line, seeds_text) = lines
            .by_ref()
            .find(|(_, text)| !text.is_empty())
            .ok_or_else(|| AlmanacError::new(1, AlmanacErrorKind::MissingSeeds))?;
        let seeds = seeds_text
            .strip_prefix("seeds:")
            .ok_or_else(|| AlmanacError::new(seeds_line, AlmanacErrorKind::MissingSeeds))?
            .split_whitespace()
            .map(|token| parse_number(token, seeds_line))
            .collect::<Result<Vec<_>, _>>()?;

        let mut domains = Vec::new();
        let mut stages: Vec<ShiftMapping<i64>> = Vec::new();
        let mut block: Option<OpenBlock> = None;

        for (line, text) in lines {
            if text.is_empty() {
                if let Some(open) = block.take() {
                    stages.push(open.close()?);
                }
            } else if text.ends_with(':') {
                if let Some(open) = block.take() {
                    stages.push(open.close()?);
                }
                let (source, destination) = parse_header(text, line)?;
                let input = intern(&mut domains, source);
                if let Some(previous) = stages.last() {
                    let expected = previous.stage().output();
                    if expected != input {
                        return Err(AlmanacError::new(
                            line,
                            AlmanacErrorKind::BrokenChain {
                                expected: domains[expected.value() as usize].clone(),
                                found: source.to_owned(),
                            },
                        ));
                    }
                }
                let output = intern(&mut domains, destination);
                block = Some(OpenBlock {
                    header_line: line,
                    stage: Stage::new(input, output),
                    ranges: Vec::new(),
                });
            } else {
                let open = block
                    .as_mut()
                    .ok_or_else(|| AlmanacError::new(line, AlmanacErrorKind::UnexpectedLine))?;
                open.ranges.push(parse_range(text, line)?);
            }
        }
        if let Some(open) = block.take() {
            stages.push(open.close()?);
        }

        debug!(
            seeds = seeds.len(),
            stages = stages.len(),
            domains = domains.len(),
            "Parsed almanac"
        );
        Ok(Self {
            seeds,
            seeds_line,
            domains,
            stages,
        })
    }

    #[inline]
    pub fn seeds(&self) -> &[i64] {
        &self.seeds
    }

    #[inline]
    pub fn stages(&self) -> &[ShiftMapping<i64>] {
        &self.stages
    }

    /// The name a domain was interned under.
    #[inline]
    pub fn domain_name(&self, id: DomainId) -> Option<&str> {
        self.domains.get(id.value() as usize).map(String::as_str)
    }

    pub fn seed_points(&self) -> BTreeSet<i64> {
        self.seeds.iter().copied().collect()
    }

    /// The seeds read as `(start, length)` pairs.
    pub fn seed_ranges(&self) -> Result<Vec<Interval<i64>>, AlmanacError> {
        if self.seeds.len() % 2 != 0 {
            return Err(AlmanacError::new(
                self.seeds_line,
                AlmanacErrorKind::OddSeedCount(self.seeds.len()),
            ));
        }
        self.seeds
            .chunks_exact(2)
            .map(|pair| {
                Interval::from_start_len(pair[0], pair[1])
                    .map_err(|e| length_error(e, pair[1], self.seeds_line))
            })
            .collect()
    }

    pub fn pipeline(&self) -> Result<Pipeline<i64>, PipelineError> {
        Pipeline::new(self.stages.clone())
    }
}
