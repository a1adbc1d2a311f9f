//! A document, its layout and the surface it is shown on.

use super::hit_test::{HitTestResult, HitTester};
use super::layout::{LayoutCache, LayoutUpdate};
use super::renderer::{Renderer, ViewportRenderer};
use super::visible_range::VisibleRange;
use crate::model::StyleConfig;
use crate::source::{Document, DocumentEvent, Observable};
use crate::surface::DrawingSurface;
use std::sync::mpsc::Receiver;
use tracing::debug;

/// Composes a document, its change subscription, a layout cache and a surface.
///
/// Document edits made through [`TextView::document_mut`] are queued as
/// notifications and folded into the layout by [`TextView::sync`]. Rendering
/// and hit testing use the layout as of the last sync, so a stale layout
/// degrades to stale hit results rather than panics.
#[derive(Debug)]
pub struct TextView<S: DrawingSurface> {
    document: Document,
    events: Receiver<DocumentEvent>,
    cache: LayoutCache,
    surface: S,
}

impl<S: DrawingSurface> TextView<S> {
    /// Lay out `document` with uniform line heights and show it on `surface`.
    pub fn new(document: Document, style: StyleConfig, surface: S) -> Self {
        Self::with_layout(document, LayoutCache::new(style), surface)
    }

    /// Show `document` using a preconfigured (possibly empty) layout cache.
    ///
    /// Subscribes to the document and performs the initial full layout.
    pub fn with_layout(mut document: Document, mut cache: LayoutCache, mut surface: S) -> Self {
        let events = document.subscribe();
        cache.rebuild_all(document.rows(), &mut surface);
        Self {
            document,
            events,
            cache,
            surface,
        }
    }

    /// The document being shown.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the document. Call [`TextView::sync`] afterwards.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Current layout.
    pub fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the drawing surface (scrolling, resizing).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Apply every pending document notification to the layout.
    ///
    /// Any whole-document notification in the batch triggers one rebuild and
    /// makes the row notifications redundant. Otherwise each changed row is
    /// patched in order. Returns the number of notifications drained.
    pub fn sync(&mut self) -> usize {
        let pending: Vec<DocumentEvent> = self.events.try_iter().collect();
        if pending.is_empty() {
            return 0;
        }

        let rows = self.document.rows();
        if pending.iter().any(DocumentEvent::is_whole_document) {
            self.cache.rebuild_all(rows, &mut self.surface);
        } else {
            for event in &pending {
                if let LayoutUpdate::Rebuilt = self.cache.apply(*event, rows, &mut self.surface) {
                    break;
                }
            }
        }

        debug!(events = pending.len(), "Synced layout with document");
        pending.len()
    }

    /// Draw the visible rows onto the surface.
    pub fn render(&mut self) -> VisibleRange {
        ViewportRenderer::new(&self.cache, self.document.rows()).render(&mut self.surface)
    }

    /// Hit test a viewport-relative cursor position.
    pub fn locate(&self, cursor_x: f32, cursor_y: f32) -> HitTestResult {
        HitTester::new(&self.cache, self.document.rows()).locate(cursor_x, cursor_y, &self.surface)
    }
}
