//! Row-oriented document with change notifications.

use super::{DocumentEvent, Observable};
use std::ops::Range;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::trace;

/// Named metadata attached to a contiguous range of rows.
///
/// Tags carry no layout meaning of their own; changing them only triggers a
/// whole-document relayout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag name (e.g. "selection", "error").
    pub name: String,
    /// Rows covered by the tag.
    pub rows: Range<usize>,
}

/// An ordered sequence of text rows.
///
/// Every mutation publishes a [`DocumentEvent`] to all subscribers:
/// edits confined to one row publish `RowChanged(index)`, edits that change
/// the row count publish `TextChanged`, tag edits publish `StyleChanged`.
///
/// Positions within a row are character offsets, not byte offsets.
#[derive(Debug, Default)]
pub struct Document {
    rows: Vec<String>,
    tags: Vec<Tag>,
    subscribers: Vec<Sender<DocumentEvent>>,
}

impl Document {
    /// Create a document from rows.
    pub fn new(rows: Vec<String>) -> Self {
        Self {
            rows,
            tags: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Create a document by splitting text on `\n`.
    ///
    /// A trailing `\r` is stripped from each row. The result always has at
    /// least one row.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rowview::source::Document;
    /// let doc = Document::from_text("alpha\r\nbeta\n");
    /// assert_eq!(doc.rows(), &["alpha", "beta", ""]);
    /// ```
    pub fn from_text(text: &str) -> Self {
        Self::new(split_rows(text))
    }

    /// All rows in order.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Row at `index`, or `None` if it no longer exists.
    pub fn row(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(String::as_str)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the document has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Full text with rows joined by `\n`.
    pub fn text(&self) -> String {
        self.rows.join("\n")
    }

    /// Current tags.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Replace the whole text.
    pub fn set_text(&mut self, text: &str) {
        self.rows = split_rows(text);
        self.publish(DocumentEvent::TextChanged);
    }

    /// Replace the text of one row.
    ///
    /// Returns `false` if `index` is out of range or `text` contains a line
    /// break; use [`Document::set_text`] or [`Document::split_row`] for those.
    pub fn set_row(&mut self, index: usize, text: impl Into<String>) -> bool {
        let text = text.into();
        if is_multiline(&text) {
            return false;
        }
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        *row = text;
        self.publish(DocumentEvent::RowChanged(index));
        true
    }

    /// Insert a row before `index` (or append when `index == len()`).
    /// Returns `false` if `index > len()` or `text` contains a line break.
    pub fn insert_row(&mut self, index: usize, text: impl Into<String>) -> bool {
        let text = text.into();
        if index > self.rows.len() || is_multiline(&text) {
            return false;
        }
        self.rows.insert(index, text);
        self.publish(DocumentEvent::TextChanged);
        true
    }

    /// Remove and return the row at `index`.
    pub fn remove_row(&mut self, index: usize) -> Option<String> {
        if index >= self.rows.len() {
            return None;
        }
        let removed = self.rows.remove(index);
        self.publish(DocumentEvent::TextChanged);
        Some(removed)
    }

    /// Insert `ch` at character offset `column` of `row`.
    ///
    /// `column` is clamped to the row length. Returns `false` if `row` does
    /// not exist or `ch` is a line break.
    pub fn insert_char(&mut self, row: usize, column: usize, ch: char) -> bool {
        if is_line_break(ch) {
            return false;
        }
        let Some(text) = self.rows.get_mut(row) else {
            return false;
        };
        let at = byte_offset(text, column);
        text.insert(at, ch);
        self.publish(DocumentEvent::RowChanged(row));
        true
    }

    /// Delete the character before `(row, column)`.
    ///
    /// At column 0 the row is joined onto the previous one. Returns the new
    /// cursor position, or `None` if there was nothing to delete.
    pub fn backspace(&mut self, row: usize, column: usize) -> Option<(usize, usize)> {
        let text = self.rows.get_mut(row)?;
        let column = column.min(text.chars().count());

        if column > 0 {
            let at = byte_offset(text, column - 1);
            text.remove(at);
            self.publish(DocumentEvent::RowChanged(row));
            return Some((row, column - 1));
        }

        if row == 0 {
            return None;
        }
        let tail = self.rows.remove(row);
        let previous = &mut self.rows[row - 1];
        let joined_at = previous.chars().count();
        previous.push_str(&tail);
        self.publish(DocumentEvent::TextChanged);
        Some((row - 1, joined_at))
    }

    /// Split `row` at character offset `column`, moving the tail to a new row.
    /// Returns `false` if `row` does not exist.
    pub fn split_row(&mut self, row: usize, column: usize) -> bool {
        let Some(text) = self.rows.get_mut(row) else {
            return false;
        };
        let at = byte_offset(text, column);
        let tail = text.split_off(at);
        self.rows.insert(row + 1, tail);
        self.publish(DocumentEvent::TextChanged);
        true
    }

    /// Attach a named tag to a range of rows.
    pub fn tag_rows(&mut self, name: impl Into<String>, rows: Range<usize>) {
        self.tags.push(Tag {
            name: name.into(),
            rows,
        });
        self.publish(DocumentEvent::StyleChanged);
    }

    /// Remove all tags.
    pub fn clear_tags(&mut self) {
        self.tags.clear();
        self.publish(DocumentEvent::StyleChanged);
    }

    /// Deliver `event` to every live subscriber, dropping closed ones.
    fn publish(&mut self, event: DocumentEvent) {
        trace!(?event, subscribers = self.subscribers.len(), "publish");
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}

impl Observable for Document {
    type Event = DocumentEvent;

    fn subscribe(&mut self) -> Receiver<DocumentEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }
}

fn split_rows(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|row| row.strip_suffix('\r').unwrap_or(row).to_string())
        .collect()
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r')
}

fn is_multiline(text: &str) -> bool {
    text.chars().any(is_line_break)
}

/// Byte offset of character `column` in `text`, clamped to the end.
fn byte_offset(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
