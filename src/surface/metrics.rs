//! Cell-based text measurement.

use crate::model::{MeasureError, TextStyle};
use unicode_width::UnicodeWidthChar;

/// Default advance of one terminal cell, as a fraction of the font size.
pub const DEFAULT_ADVANCE: f32 = 0.5;

/// Measures text as a grid of equal-width cells.
///
/// Each character occupies `unicode-width` cells (wide CJK characters take
/// two, combining marks none) and each cell is `font_size * advance` pixels
/// wide. Characters without a defined width, such as control characters,
/// cannot be measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    advance: f32,
}

impl MonospaceMetrics {
    /// Create metrics with the given cell advance (fraction of font size).
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }

    /// Pixel width of one cell in `style`.
    pub fn cell_width(&self, style: &TextStyle) -> f32 {
        style.font_size * self.advance
    }

    /// Number of cells `text` occupies.
    ///
    /// # Errors
    ///
    /// Returns `MeasureError::UnsupportedChar` for the first character without
    /// a display width.
    pub fn cells(&self, text: &str) -> Result<usize, MeasureError> {
        text.chars().enumerate().try_fold(0usize, |total, (offset, ch)| {
            ch.width()
                .map(|w| total + w)
                .ok_or(MeasureError::UnsupportedChar { ch, offset })
        })
    }

    /// Pixel width of `text` in `style`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rowview::model::TextStyle;
    /// # use rowview::surface::MonospaceMetrics;
    /// let metrics = MonospaceMetrics::default();
    /// let style = TextStyle::new("monospace", 12.0);
    /// assert_eq!(metrics.measure("abc", &style), Ok(18.0));
    /// ```
    pub fn measure(&self, text: &str, style: &TextStyle) -> Result<f32, MeasureError> {
        let cells = self.cells(text)?;
        Ok(cells as f32 * self.cell_width(style))
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_ADVANCE)
    }
}
