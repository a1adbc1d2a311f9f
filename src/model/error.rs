//! Error types for rowview.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`InputError`] - Document file reading failures (file not found, IO)
//! - [`MeasureError`] - Text measurement failures reported by a drawing surface
//!
//! Configuration, logging and terminal errors live next to the code that
//! raises them and are wrapped by `view::TuiError` or returned to `main`.
//!
//! # Error Recovery Strategy
//!
//! Measurement errors are **non-fatal**: the layout cache treats an unmeasurable
//! row as zero width and the hit tester returns the best partial position it
//! computed. A pointer event racing a document edit must never take the UI down.
//! Input errors are fatal and propagate to `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors encountered when reading a document from disk.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use rowview::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.txt")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.txt"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// Generic I/O error reading the file (permissions, invalid UTF-8, disk errors).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to measure the rendered width of a piece of text.
///
/// Surfaces report this instead of guessing a width. Callers decide how to
/// degrade: layout uses zero width, hit testing keeps its partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MeasureError {
    /// The text contains a character the metrics provider has no advance for
    /// (control characters, for a cell-based provider).
    #[error("cannot measure {ch:?} at char offset {offset}")]
    UnsupportedChar {
        /// The offending character.
        ch: char,
        /// Character (not byte) offset of `ch` within the measured text.
        offset: usize,
    },
}
