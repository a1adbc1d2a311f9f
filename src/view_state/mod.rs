//! View-state layer - Layout, rendering, and hit-testing
//!
//! This module is the layout core: it keeps a per-row layout in sync with a
//! document and answers "what is visible" and "what is under the pointer"
//! without walking the whole document.
//!
//! # Module Structure
//!
//! - `search`: nearest_index - O(log n) nearest-value search over sorted offsets
//! - `layout`: LayoutCache - parallel row tops/heights with incremental patching
//! - `visible_range`: VisibleRange - result of visible range calculation
//! - `renderer`: Renderer, ViewportRenderer - draws exactly the visible rows
//! - `hit_test`: HitTester, HitTestResult - pointer position to `(row, char)`
//! - `text_view`: TextView - document + layout + surface, kept in sync

pub mod layout;
pub mod renderer;
pub mod search;
pub mod text_view;
pub mod visible_range;

pub use hit_test::{HitTestResult, HitTester};
pub use layout::{LayoutCache, LayoutUpdate};
pub use renderer::{Renderer, ViewportRenderer};
pub use text_view::TextView;
pub use visible_range::VisibleRange;
