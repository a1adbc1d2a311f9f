//! File-based document loading.

use super::Document;
use crate::model::error::InputError;
use std::path::Path;
use tracing::debug;

/// Read a UTF-8 text file into a [`Document`], one row per line.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for other I/O errors (including invalid UTF-8).
pub fn load_document(path: impl AsRef<Path>) -> Result<Document, InputError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path)?;
    let document = Document::from_text(&text);
    debug!(path = ?path, rows = document.len(), "Loaded document");
    Ok(document)
}
