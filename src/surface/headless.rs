//! Headless surface that records draw calls instead of drawing.

use super::{DrawingSurface, MonospaceMetrics, Viewport};
use crate::model::{MeasureError, TextStyle};
use std::cell::Cell;
use std::fmt::Write as _;

/// One recorded `draw_text` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Content x.
    pub x: f32,
    /// Content y.
    pub y: f32,
    /// Text drawn.
    pub text: String,
}

/// In-memory drawing surface.
///
/// Scroll offsets are set directly and are NOT clamped, so callers can put the
/// viewport anywhere (including past the end of the content).
/// Every measurement is counted, which lets callers check how much
/// measuring a layout update did.
#[derive(Debug)]
pub struct HeadlessSurface {
    viewport: Viewport,
    metrics: MonospaceMetrics,
    draws: Vec<DrawCall>,
    measure_calls: Cell<usize>,
}

impl HeadlessSurface {
    /// Create a surface with the given visible size and default metrics.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            metrics: MonospaceMetrics::default(),
            draws: Vec::new(),
            measure_calls: Cell::new(0),
        }
    }

    /// Replace the metrics provider.
    pub fn with_metrics(mut self, metrics: MonospaceMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set scroll offsets without clamping.
    pub fn set_scroll(&mut self, scroll_left: f32, scroll_top: f32) {
        self.viewport.scroll_left = scroll_left;
        self.viewport.scroll_top = scroll_top;
    }

    /// Change the visible size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    /// Draw calls recorded since the last `take_draws`.
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Remove and return the recorded draw calls.
    pub fn take_draws(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.draws)
    }

    /// Number of `measure_text` calls since creation or the last reset.
    pub fn measure_calls(&self) -> usize {
        self.measure_calls.get()
    }

    /// Reset the measurement counter.
    pub fn reset_measure_calls(&self) {
        self.measure_calls.set(0);
    }

    /// One line per recorded draw call: `(x, y) "text"`.
    pub fn draw_log(&self) -> String {
        let mut log = String::new();
        for call in &self.draws {
            let _ = writeln!(log, "({}, {}) {:?}", call.x, call.y, call.text);
        }
        log
    }
}

impl DrawingSurface for HeadlessSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_scroll_size(&mut self, width: f32, height: f32) {
        self.viewport.scroll_width = width;
        self.viewport.scroll_height = height;
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> Result<f32, MeasureError> {
        self.measure_calls.set(self.measure_calls.get() + 1);
        self.metrics.measure(text, style)
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, _style: &TextStyle) {
        self.draws.push(DrawCall {
            x,
            y,
            text: text.to_string(),
        });
    }
}
