//! Style configuration shared by every row.

/// Font record used for every text measurement and draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font family name (e.g. "monospace").
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f32,
}

impl TextStyle {
    /// Create a text style.
    pub fn new(font_family: impl Into<String>, font_size: f32) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
        }
    }
}

/// Immutable style configuration for a view.
///
/// Uniform across rows: there is no per-row styling. Passed explicitly to the
/// layout cache at construction; there is no ambient default.
///
/// # Examples
///
/// ```
/// # use rowview::model::StyleConfig;
/// let style = StyleConfig::new("monospace", 12.0, 2.0);
/// assert_eq!(style.line_height(), 14.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    text: TextStyle,
    line_spacing: f32,
}

impl StyleConfig {
    /// Create a style from font family, font size and line spacing (pixels).
    pub fn new(font_family: impl Into<String>, font_size: f32, line_spacing: f32) -> Self {
        Self {
            text: TextStyle::new(font_family, font_size),
            line_spacing,
        }
    }

    /// The font record passed to measurement and drawing.
    pub fn text(&self) -> &TextStyle {
        &self.text
    }

    /// Extra vertical space added to every row.
    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    /// Height of a single line of text: `line_spacing + font_size`.
    pub fn line_height(&self) -> f32 {
        self.line_spacing + self.text.font_size
    }
}
