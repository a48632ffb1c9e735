//! Source loci attached to operations
//!
//! A locus only ever feeds diagnostics. Nothing in the operation tree makes a
//! semantic decision based on where a node came from.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A unique identifier for a source file
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[display("file#{_0}")]
pub struct FileId(pub u32);

impl FileId {
    /// Creates a file id from its raw index
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A byte offset span in a source file
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[display("{start}..{end}")]
pub struct Span {
    /// Inclusive start offset
    pub start: u32,
    /// Exclusive end offset
    pub end: u32,
}

impl Span {
    /// Creates a span, swapping the bounds if they arrive reversed
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Byte range covered by this span
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Length in bytes
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the span covers no bytes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely inside this span
    #[must_use]
    pub const fn contains(&self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest span covering both
    #[must_use]
    pub fn cover(self, other: Self) -> Self {
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// The originating source range of an operation
///
/// Synthetic nodes borrow the locus of the construct they summarize, so two
/// operations sharing a locus is normal.
#[derive(Copy, Clone, Debug, Display, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[display("{file}@{span}")]
pub struct SourceLocus {
    /// File the range belongs to
    pub file: FileId,
    /// Byte range inside the file
    pub span: Span,
}

impl SourceLocus {
    /// Creates a locus
    #[must_use]
    pub const fn new(file: FileId, span: Span) -> Self {
        Self { file, span }
    }

    /// Byte range inside the file
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.span.range()
    }

    /// Whether `other` is nested inside this locus
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.file == other.file && self.span.contains(other.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_bounds_are_normalized() {
        let span = Span::new(10, 4);
        assert_eq!(span.start, 4);
        assert_eq!(span.end, 10);
        assert_eq!(span.len(), 6);
    }

    #[test]
    fn test_locus_containment_requires_same_file() {
        let outer = SourceLocus::new(FileId(0), Span::new(0, 20));
        let inner = SourceLocus::new(FileId(0), Span::new(3, 9));
        let elsewhere = SourceLocus::new(FileId(1), Span::new(3, 9));
        assert!(outer.contains(&inner));
        assert!(!outer.contains(&elsewhere));
        assert_eq!(outer.to_string(), "file#0@0..20");
    }
}
