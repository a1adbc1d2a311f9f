//! rowview
//!
//! Row layout engine for rendering a line-oriented document on a scrollable
//! surface, plus a terminal viewer built on it.
//!
//! The core lives in [`view_state`]: a [`view_state::LayoutCache`] of row tops
//! and heights kept in sync with a [`source::Document`], a renderer that draws
//! only the visible rows, and a hit tester that maps pointer positions to
//! `(row, char)`. Everything it knows about pixels comes through the
//! [`surface::DrawingSurface`] trait.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod surface;
pub mod view;
pub mod view_state;
