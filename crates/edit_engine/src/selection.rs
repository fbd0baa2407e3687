//! Ordered set of selected ranges

use crate::Range;
use serde::{Deserialize, Serialize};

/// The ranges currently selected in a view.
///
/// Ranges are kept sorted by start offset and overlapping ranges are merged,
/// so iteration order is the order an editor presents them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ranges: Vec<Range>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from arbitrary ranges
    pub fn from_ranges(ranges: impl IntoIterator<Item = Range>) -> Self {
        let mut selection = Self::new();
        for range in ranges {
            selection.add(range);
        }
        selection
    }

    /// Add a range, merging it with any range it overlaps
    pub fn add(&mut self, range: Range) {
        let mut merged = range;
        self.ranges.retain(|existing| {
            if existing.overlaps(&merged) || existing == &merged {
                merged = Range::new(existing.start.min(merged.start), existing.end.max(merged.end));
                false
            } else {
                true
            }
        });
        let index = self
            .ranges
            .partition_point(|existing| existing.start < merged.start);
        self.ranges.insert(index, merged);
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn iter(&self) -> impl Iterator<Item = &Range> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Whether any selected range covers at least one character
    pub fn has_non_empty(&self) -> bool {
        self.ranges.iter().any(|range| !range.is_empty())
    }
}
