//! Text ranges addressed by character offsets

use serde::{Deserialize, Serialize};
use std::fmt;

/// A contiguous span of buffer text.
///
/// Offsets count characters, not bytes. `start <= end` always holds; an
/// anchor/caret pair given in reverse order is normalized on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    /// Create a range from two offsets in either order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Create an empty range (a caret) at `offset`
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Destructure into `(start, end)`
    pub fn to_pair(self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Whether the two ranges intersect
    ///
    /// A caret strictly inside a non-empty range counts as intersecting it;
    /// touching end points do not.
    pub fn overlaps(&self, other: &Range) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Move both offsets by `delta`, saturating at zero
    pub fn shifted(self, delta: isize) -> Self {
        let shift = |offset: usize| {
            if delta.is_negative() {
                offset.saturating_sub(delta.unsigned_abs())
            } else {
                offset + delta as usize
            }
        };
        Self {
            start: shift(self.start),
            end: shift(self.end),
        }
    }
}

impl From<(usize, usize)> for Range {
    fn from((a, b): (usize, usize)) -> Self {
        Self::new(a, b)
    }
}

impl From<Range> for (usize, usize) {
    fn from(range: Range) -> Self {
        range.to_pair()
    }
}

impl From<std::ops::Range<usize>> for Range {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
