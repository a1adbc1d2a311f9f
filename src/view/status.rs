//! Status line shown below the document.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

/// Cursor position in the document, in rows and characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Row index.
    pub row: usize,
    /// Character offset within the row.
    pub column: usize,
}

impl Cursor {
    /// Create a cursor at `(row, column)`.
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Everything the status line reports.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusInfo<'a> {
    /// Current cursor.
    pub cursor: Cursor,
    /// Rows in the document.
    pub rows: usize,
    /// Published content width in pixels.
    pub width: f32,
    /// Published content height in pixels.
    pub height: f32,
    /// Transient message from the last action, if any.
    pub message: Option<&'a str>,
}

/// Build the status line: 1-based cursor, row count, content size, message.
pub fn status_line(info: &StatusInfo<'_>) -> Line<'static> {
    let base = Style::default().add_modifier(Modifier::REVERSED);
    let mut spans = vec![
        Span::styled(
            format!(" {}:{} ", info.cursor.row + 1, info.cursor.column + 1),
            base.add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} rows  {}x{}px ", info.rows, info.width, info.height),
            base,
        ),
    ];
    if let Some(message) = info.message {
        spans.push(Span::styled(format!(" {message} "), base));
    }
    Line::from(spans)
}
