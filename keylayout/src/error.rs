//! Error types for loading layout files.

use keylayout_schema::LayoutError;
use thiserror::Error;

/// Error type for loading a layout from a file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid layout.
    #[error("{0}")]
    Layout(#[from] LayoutError),
}

impl LoadError {
    /// Returns the layout error, if the file was read but rejected.
    #[must_use]
    pub const fn layout(&self) -> Option<&LayoutError> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Io(_) => None,
        }
    }
}
