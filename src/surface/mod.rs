//! Drawing surfaces.
//!
//! A drawing surface owns the scroll geometry, measures text and performs the
//! actual drawing. The layout core only talks to it through [`DrawingSurface`].
//!
//! # Module Structure
//!
//! - `metrics`: MonospaceMetrics - cell-based text measurement
//! - `headless`: HeadlessSurface - records draw calls, used by tests and benches
//! - `terminal`: TerminalSurface - draws into a ratatui `Buffer`

pub mod headless;
pub mod metrics;
pub mod terminal;

pub use headless::{DrawCall, HeadlessSurface};
pub use metrics::MonospaceMetrics;
pub use terminal::TerminalSurface;

use crate::model::{MeasureError, TextStyle};

/// Scroll geometry of a surface, in pixels.
///
/// `scroll_width`/`scroll_height` are the total content size, published by
/// the layout cache after every update. Everything else is owned by the
/// surface and read-only to the layout core.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Vertical scroll offset (content y at the top edge of the viewport).
    pub scroll_top: f32,
    /// Horizontal scroll offset.
    pub scroll_left: f32,
    /// Visible width.
    pub width: f32,
    /// Visible height.
    pub height: f32,
    /// Total content width.
    pub scroll_width: f32,
    /// Total content height.
    pub scroll_height: f32,
}

impl Viewport {
    /// Create a viewport of the given visible size, scrolled to the origin.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Content y just below the visible area: `scroll_top + height`.
    pub fn bottom(&self) -> f32 {
        self.scroll_top + self.height
    }

    /// Largest `scroll_top` that still fills the viewport (0 if content fits).
    pub fn max_scroll_top(&self) -> f32 {
        (self.scroll_height - self.height).max(0.0)
    }

    /// Largest `scroll_left` that still fills the viewport (0 if content fits).
    pub fn max_scroll_left(&self) -> f32 {
        (self.scroll_width - self.width).max(0.0)
    }

    /// Set both scroll offsets, clamped to the content size.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rowview::surface::Viewport;
    /// let mut viewport = Viewport::new(100.0, 50.0);
    /// viewport.scroll_width = 300.0;
    /// viewport.scroll_height = 80.0;
    /// viewport.scroll_to(500.0, -3.0);
    /// assert_eq!(viewport.scroll_left, 200.0);
    /// assert_eq!(viewport.scroll_top, 0.0);
    /// ```
    pub fn scroll_to(&mut self, scroll_left: f32, scroll_top: f32) {
        self.scroll_left = scroll_left.clamp(0.0, self.max_scroll_left());
        self.scroll_top = scroll_top.clamp(0.0, self.max_scroll_top());
    }
}

/// The surface contract the layout core depends on.
///
/// Measurement is synchronous and must not suspend. `draw_text` coordinates are
/// content coordinates; translating by the scroll offsets and clipping is the
/// surface's job.
pub trait DrawingSurface {
    /// Current scroll geometry.
    fn viewport(&self) -> Viewport;

    /// Publish the total content size.
    fn set_scroll_size(&mut self, width: f32, height: f32);

    /// Rendered width of `text` in `style`.
    fn measure_text(&self, text: &str, style: &TextStyle) -> Result<f32, MeasureError>;

    /// Draw `text` with its top-left corner at content position `(x, y)`.
    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle);
}
