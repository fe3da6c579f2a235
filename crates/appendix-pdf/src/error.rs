//! Error types for PDF reading and writing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to load PDF '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("malformed PDF '{path}': {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("failed to write PDF: {0}")]
    Write(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

impl PdfError {
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }
}
