//! Viewport rendering.
//!
//! Draws exactly the rows that intersect the surface's viewport, one
//! `draw_text` call per row, positioned at the row's cached top.

use super::layout::LayoutCache;
use super::visible_range::VisibleRange;
use crate::surface::DrawingSurface;
use tracing::trace;

/// Something that paints onto a drawing surface.
pub trait Renderer<S: DrawingSurface + ?Sized> {
    /// Paint the current viewport and return the rows that were drawn.
    fn render(&self, surface: &mut S) -> VisibleRange;
}

/// Renders the rows of a document through its layout cache.
///
/// `rows` must be the document the cache was last updated for. Rows the cache
/// knows about but the document no longer has are not drawn.
#[derive(Debug, Clone, Copy)]
pub struct ViewportRenderer<'a> {
    cache: &'a LayoutCache,
    rows: &'a [String],
}

impl<'a> ViewportRenderer<'a> {
    /// Create a renderer over `rows` laid out by `cache`.
    pub fn new(cache: &'a LayoutCache, rows: &'a [String]) -> Self {
        Self { cache, rows }
    }
}

impl<S: DrawingSurface + ?Sized> Renderer<S> for ViewportRenderer<'_> {
    fn render(&self, surface: &mut S) -> VisibleRange {
        let viewport = surface.viewport();
        let range = self
            .cache
            .visible_range(viewport.scroll_top, viewport.height)
            .clamp_to(self.rows.len());

        let style = self.cache.style().text();
        for index in range.indices() {
            surface.draw_text(0.0, self.cache.row_top(index), &self.rows[index], style);
        }

        trace!(
            start = range.start,
            end = range.end,
            scroll_top = viewport.scroll_top,
            "Rendered rows"
        );
        range
    }
}
