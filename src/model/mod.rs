//! Domain model types (pure).
//!
//! Error taxonomy and the style configuration shared by layout, rendering and
//! hit testing.

pub mod error;
pub mod style;

pub use error::{InputError, MeasureError};
pub use style::{StyleConfig, TextStyle};
