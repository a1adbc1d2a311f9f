//! Document sources.
//!
//! This module provides the row-oriented document that the layout core reads:
//! - `document`: the row store and its change notifications
//! - `file`: loading a document from disk

use std::sync::mpsc::Receiver;

pub mod document;
pub mod file;

pub use document::{Document, Tag};
pub use file::load_document;

/// Change notification emitted by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    /// Style or tag metadata changed. Affects every row.
    StyleChanged,
    /// Text changed in a way that may add, remove or reorder rows.
    TextChanged,
    /// Exactly one row's text changed; the row count is unchanged.
    RowChanged(usize),
}

impl DocumentEvent {
    /// Whether this notification requires a whole-document relayout.
    pub fn is_whole_document(&self) -> bool {
        !matches!(self, DocumentEvent::RowChanged(_))
    }
}

/// Publish/subscribe capability for change notifications.
///
/// Subscribers receive every event published after they subscribed, in order.
/// Dropping the receiver unsubscribes.
pub trait Observable {
    /// Event type delivered to subscribers.
    type Event;

    /// Register a new subscriber.
    fn subscribe(&mut self) -> Receiver<Self::Event>;
}
