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

use std::fmt::Display;

/// Identifies the value domain a mapping reads from or writes to
/// (for an almanac: seed, soil, fertilizer, ...).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DomainId(u32);

impl DomainId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        DomainId(id)
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Display for DomainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DomainId({})", self.0)
    }
}

impl From<u32> for DomainId {
    fn from(value: u32) -> Self {
        DomainId(value)
    }
}

/// The `input → output` domain pair a mapping translates between.
///
/// Two mappings chain only when the output of the first is the input of the
/// second; the composer and the pipeline check this before doing any work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Stage {
    input: DomainId,
    output: DomainId,
}

impl Stage {
    #[inline]
    pub const fn new(input: DomainId, output: DomainId) -> Self {
        Self { input, output }
    }

    /// A stage that maps a domain onto itself, e.g. for identity mappings.
    #[inline]
    pub const fn within(domain: DomainId) -> Self {
        Self::new(domain, domain)
    }

    #[inline]
    pub const fn input(&self) -> DomainId {
        self.input
    }

    #[inline]
    pub const fn output(&self) -> DomainId {
        self.output
    }

    /// Returns `true` if `next` consumes what this stage produces.
    #[inline]
    pub fn chains_into(&self, next: &Stage) -> bool {
        self.output == next.input
    }

    /// The stage covering this stage followed by `next`.
    #[inline]
    pub const fn then(&self, next: &Stage) -> Stage {
        Stage::new(self.input, next.output)
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.input.0, self.output.0)
    }
}
