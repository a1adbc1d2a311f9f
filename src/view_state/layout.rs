//! Row layout cache.
//!
//! Tracks the absolute top offset and height of every row so that rendering
//! and hit testing never walk the whole document.
//!
//! # Invariants
//! - `tops.len() == heights.len() == row count` after every update
//! - `tops[0] == 0` and `tops` is non-decreasing
//! - `tops[i] + heights[i] == tops[i + 1]` (rows are contiguous)
//! - `heights[i] >= 0`
//!
//! # Update paths
//! - `rebuild_all`: O(n) measurements, used for whole-document changes
//! - `patch_from`: one measurement; O(1) when the row height is unchanged,
//!   otherwise an O(n - index) height re-accumulation with no measuring

use super::search::nearest_index;
use super::visible_range::VisibleRange;
use crate::model::StyleConfig;
use crate::source::DocumentEvent;
use crate::surface::DrawingSurface;
use std::fmt;
use tracing::{debug, trace, warn};

/// Computes the height of a row from its text and the view style.
pub type HeightCalculator = Box<dyn Fn(&str, &StyleConfig) -> f32>;

/// Default height calculator: every row is one line tall.
pub fn uniform_height(_row: &str, style: &StyleConfig) -> f32 {
    style.line_height()
}

/// What a layout update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutUpdate {
    /// Every row was measured and laid out again.
    Rebuilt,
    /// The changed row kept its height; no tops moved.
    Unchanged,
    /// Rows from `from` onward were laid out again.
    Relaid {
        /// First row whose layout was recomputed.
        from: usize,
    },
}

/// Parallel `tops`/`heights` for every row, plus the published content size.
pub struct LayoutCache {
    style: StyleConfig,
    height_calculator: HeightCalculator,
    tops: Vec<f32>,
    heights: Vec<f32>,
    document_width: f32,
    document_height: f32,
}

impl LayoutCache {
    /// Create an empty cache where every row is one line tall.
    pub fn new(style: StyleConfig) -> Self {
        Self::with_height_calculator(style, uniform_height)
    }

    /// Create an empty cache with a custom per-row height calculator.
    ///
    /// Negative heights returned by the calculator are treated as zero.
    pub fn with_height_calculator<F>(style: StyleConfig, height_calculator: F) -> Self
    where
        F: Fn(&str, &StyleConfig) -> f32 + 'static,
    {
        Self {
            style,
            height_calculator: Box::new(height_calculator),
            tops: Vec::new(),
            heights: Vec::new(),
            document_width: 0.0,
            document_height: 0.0,
        }
    }

    /// Style used for every measurement and draw call.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Number of rows laid out.
    pub fn len(&self) -> usize {
        self.tops.len()
    }

    /// Check if no rows are laid out.
    pub fn is_empty(&self) -> bool {
        self.tops.is_empty()
    }

    /// Top offset of every row.
    pub fn tops(&self) -> &[f32] {
        &self.tops
    }

    /// Height of every row.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Top offset of row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`. Callers must not query stale indices.
    pub fn row_top(&self, index: usize) -> f32 {
        self.tops[index]
    }

    /// Height of row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn row_height(&self, index: usize) -> f32 {
        self.heights[index]
    }

    /// Offset just below row `index`: `row_top + row_height`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn row_bottom(&self, index: usize) -> f32 {
        self.tops[index] + self.heights[index]
    }

    /// Widest row width seen (published as the content width).
    pub fn document_width(&self) -> f32 {
        self.document_width
    }

    /// Sum of all row heights (published as the content height).
    pub fn document_height(&self) -> f32 {
        self.document_height
    }

    /// Measure and lay out every row, then publish the content size.
    pub fn rebuild_all<S>(&mut self, rows: &[String], surface: &mut S)
    where
        S: DrawingSurface + ?Sized,
    {
        self.tops.clear();
        self.heights.clear();
        self.tops.reserve(rows.len());
        self.heights.reserve(rows.len());

        let mut width = 0.0f32;
        let mut top = 0.0f32;
        for (index, row) in rows.iter().enumerate() {
            width = width.max(self.measure_row(index, row, surface));
            let height = self.height_of(row);
            self.tops.push(top);
            self.heights.push(height);
            top += height;
        }

        self.document_width = width;
        self.document_height = top;
        surface.set_scroll_size(width, top);

        debug!(rows = rows.len(), width, height = top, "Rebuilt row layout");
    }

    /// Update the layout after row `index` changed.
    ///
    /// Only the changed row is measured; its width can only grow the content
    /// width. If its height is unchanged nothing else is touched. Otherwise
    /// the rows before `index` keep their layout and rows `[index, n)` are
    /// laid out again starting from the bottom of row `index - 1`.
    ///
    /// A patch that does not match the cached layout (stale index, or a row
    /// count that changed without a whole-document notification) falls back
    /// to `rebuild_all`.
    pub fn patch_from<S>(&mut self, index: usize, rows: &[String], surface: &mut S) -> LayoutUpdate
    where
        S: DrawingSurface + ?Sized,
    {
        if index >= rows.len() || rows.len() != self.tops.len() {
            warn!(
                index,
                rows = rows.len(),
                cached = self.tops.len(),
                "Row patch does not match cached layout, rebuilding"
            );
            self.rebuild_all(rows, surface);
            return LayoutUpdate::Rebuilt;
        }

        let row = &rows[index];
        let width = self.measure_row(index, row, surface);
        let width_grew = width > self.document_width;
        if width_grew {
            self.document_width = width;
        }

        let height = self.height_of(row);
        if height == self.heights[index] {
            if width_grew {
                surface.set_scroll_size(self.document_width, self.document_height);
            }
            trace!(index, "Row height unchanged");
            return LayoutUpdate::Unchanged;
        }

        let mut top = if index == 0 {
            0.0
        } else {
            self.row_bottom(index - 1)
        };
        self.tops.truncate(index);
        self.heights.truncate(index);

        for row in &rows[index..] {
            let height = self.height_of(row);
            self.tops.push(top);
            self.heights.push(height);
            top += height;
        }

        self.document_height = top;
        surface.set_scroll_size(self.document_width, top);

        debug!(
            from = index,
            relaid = rows.len() - index,
            height = top,
            "Relaid rows after height change"
        );
        LayoutUpdate::Relaid { from: index }
    }

    /// Route a document notification to the matching update path.
    pub fn apply<S>(&mut self, event: DocumentEvent, rows: &[String], surface: &mut S) -> LayoutUpdate
    where
        S: DrawingSurface + ?Sized,
    {
        match event {
            DocumentEvent::RowChanged(index) => self.patch_from(index, rows, surface),
            DocumentEvent::TextChanged | DocumentEvent::StyleChanged => {
                self.rebuild_all(rows, surface);
                LayoutUpdate::Rebuilt
            }
        }
    }

    /// Row containing content offset `y`.
    ///
    /// Finds the row whose top is nearest to `y`, then steps back one row if
    /// that top lies below `y`. Zero-height rows share their top with the
    /// next row, so the result then moves forward past rows ending at or
    /// above `y`. Offsets above the document map to row 0 and offsets past
    /// the end map to the last row. `None` if there are no rows.
    pub fn row_at(&self, y: f32) -> Option<usize> {
        let closest = nearest_index(&self.tops, y)?;
        let mut row = if self.tops[closest] > y {
            closest.saturating_sub(1)
        } else {
            closest
        };
        while row + 1 < self.len() && self.row_bottom(row) <= y {
            row += 1;
        }
        Some(row)
    }

    /// Rows intersecting `[scroll_top, scroll_top + height)`.
    ///
    /// O(log n + visible rows). Empty for a viewport with no height.
    pub fn visible_range(&self, scroll_top: f32, height: f32) -> VisibleRange {
        let Some(mut start) = self.row_at(scroll_top) else {
            return VisibleRange::default();
        };

        // Scrolled past the last row.
        if self.row_bottom(start) <= scroll_top {
            start += 1;
        }
        if height <= 0.0 {
            return VisibleRange::new(start, start);
        }

        let bottom = scroll_top + height;
        let mut end = start;
        while end < self.len() && self.tops[end] < bottom {
            end += 1;
        }

        VisibleRange::new(start, end)
    }

    fn height_of(&self, row: &str) -> f32 {
        (self.height_calculator)(row, &self.style).max(0.0)
    }

    fn measure_row<S>(&self, index: usize, row: &str, surface: &S) -> f32
    where
        S: DrawingSurface + ?Sized,
    {
        match surface.measure_text(row, self.style.text()) {
            Ok(width) => width,
            Err(error) => {
                warn!(index, %error, "Failed to measure row, treating as zero width");
                0.0
            }
        }
    }
}

impl fmt::Debug for LayoutCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutCache")
            .field("style", &self.style)
            .field("rows", &self.tops.len())
            .field("document_width", &self.document_width)
            .field("document_height", &self.document_height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
