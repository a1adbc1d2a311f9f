//! Visible range calculation result

use std::ops::Range;

/// Range of rows visible in the current viewport.
///
/// Computed via nearest-top search plus a forward scan over cached tops.
///
/// # Invariants
/// - `start <= end`
/// - `end <= row count`
/// - Every row in range has some portion inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    /// Index of first visible row (inclusive).
    pub start: usize,
    /// Index one past the last visible row (exclusive).
    pub end: usize,
}

impl VisibleRange {
    /// Create new visible range.
    ///
    /// # Panics
    /// In debug builds, panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "start {start} > end {end}");
        Self { start, end }
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if range is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Iterate over visible row indices.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if a specific row index is visible.
    pub fn contains(&self, index: usize) -> bool {
        self.indices().contains(&index)
    }

    /// Restrict the range to rows that exist in a document of `len` rows.
    pub fn clamp_to(self, len: usize) -> Self {
        let end = self.end.min(len);
        Self::new(self.start.min(end), end)
    }
}
