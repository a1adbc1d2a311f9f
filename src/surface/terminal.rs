//! Terminal surface backed by a ratatui `Buffer`.
//!
//! The layout core works in pixels; the terminal works in cells. One cell is
//! `font_size * advance` pixels wide and one line height tall, so a document
//! laid out for a 12px font with 2px spacing scrolls by 14px per terminal row.

use super::{DrawingSurface, MonospaceMetrics, Viewport};
use crate::model::{MeasureError, StyleConfig, TextStyle};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

/// Drawing surface that paints rows into a ratatui [`Buffer`].
///
/// Call [`TerminalSurface::begin_frame`] with the target area before each
/// render pass, then merge [`TerminalSurface::buffer`] into the frame.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    viewport: Viewport,
    metrics: MonospaceMetrics,
    cell_width: f32,
    cell_height: f32,
    buffer: Buffer,
}

impl TerminalSurface {
    /// Create a surface whose cell size is derived from `style`.
    pub fn new(style: &StyleConfig) -> Self {
        Self::with_metrics(style, MonospaceMetrics::default())
    }

    /// Create a surface with explicit metrics.
    pub fn with_metrics(style: &StyleConfig, metrics: MonospaceMetrics) -> Self {
        Self {
            viewport: Viewport::default(),
            metrics,
            cell_width: metrics.cell_width(style.text()).max(1.0),
            cell_height: style.line_height().max(1.0),
            buffer: Buffer::empty(Rect::default()),
        }
    }

    /// Pixel width of one cell.
    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Pixel height of one cell.
    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Area the current frame draws into.
    pub fn area(&self) -> Rect {
        self.buffer.area
    }

    /// Cells drawn during the current frame.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Start a frame: clear the buffer and size the viewport to `area`.
    pub fn begin_frame(&mut self, area: Rect) {
        self.buffer = Buffer::empty(area);
        self.viewport.width = f32::from(area.width) * self.cell_width;
        self.viewport.height = f32::from(area.height) * self.cell_height;
        self.clamp_scroll();
    }

    /// Scroll to pixel offsets, clamped to the published content size.
    pub fn scroll_to(&mut self, scroll_left: f32, scroll_top: f32) {
        self.viewport.scroll_to(scroll_left, scroll_top);
    }

    /// Scroll by a number of cell rows and columns (negative scrolls back).
    pub fn scroll_cells(&mut self, columns: i32, rows: i32) {
        let left = self.viewport.scroll_left + columns as f32 * self.cell_width;
        let top = self.viewport.scroll_top + rows as f32 * self.cell_height;
        self.scroll_to(left, top);
    }

    /// Number of whole rows visible in the current area.
    pub fn page_rows(&self) -> u16 {
        self.buffer.area.height
    }

    /// Viewport-relative pixel position of an absolute terminal cell.
    ///
    /// Returns `None` if the cell lies outside the current area. The y
    /// coordinate is the vertical centre of the cell row.
    pub fn cell_to_pixel(&self, column: u16, row: u16) -> Option<(f32, f32)> {
        let area = self.buffer.area;
        if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
            return None;
        }
        let x = f32::from(column - area.x) * self.cell_width;
        let y = (f32::from(row - area.y) + 0.5) * self.cell_height;
        Some((x, y))
    }

    /// Absolute terminal cell showing content position `(x, y)`, if visible.
    pub fn pixel_to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let area = self.buffer.area;
        let column = ((x - self.viewport.scroll_left) / self.cell_width).floor();
        let row = ((y - self.viewport.scroll_top) / self.cell_height).floor();
        if column < 0.0 || row < 0.0 || column >= f32::from(area.width) || row >= f32::from(area.height) {
            return None;
        }
        Some((area.x + column as u16, area.y + row as u16))
    }

    fn clamp_scroll(&mut self) {
        let Viewport {
            scroll_left,
            scroll_top,
            ..
        } = self.viewport;
        self.viewport.scroll_to(scroll_left, scroll_top);
    }
}

impl DrawingSurface for TerminalSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_scroll_size(&mut self, width: f32, height: f32) {
        self.viewport.scroll_width = width;
        self.viewport.scroll_height = height;
        self.clamp_scroll();
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> Result<f32, MeasureError> {
        self.metrics.measure(text, style)
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, _style: &TextStyle) {
        let area = self.buffer.area;
        let row = ((y - self.viewport.scroll_top) / self.cell_height).floor();
        if row < 0.0 || row >= f32::from(area.height) {
            return;
        }
        let row = area.y + row as u16;
        let width = i64::from(area.width);
        let mut column = ((x - self.viewport.scroll_left) / self.cell_width).floor() as i64;

        for ch in text.chars() {
            if column >= width {
                break;
            }
            let cells = ch.width().unwrap_or(0) as i64;
            if cells == 0 {
                continue;
            }
            // Characters straddling either edge are clipped whole.
            if column >= 0 && column + cells <= width {
                if let Some(cell) = self.buffer.cell_mut((area.x + column as u16, row)) {
                    cell.set_char(ch);
                }
            }
            column += cells;
        }
    }
}
