//! Error types for appendix editing operations.
//!
//! Every error here is an input-validation failure: the edit that raised it
//! left the registry unchanged and may simply be retried.

use std::path::PathBuf;
use thiserror::Error;

/// A range expression that could not be parsed against a page count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRangeError {
    /// Token is neither a page number nor an `A-B` range.
    #[error(
        "'{token}' is not a page number or range for a document with {max_pages} pages \
         (use formats like '1-5, 8, 10-12')"
    )]
    InvalidToken { token: String, max_pages: usize },

    /// Single page outside `1..=max_pages`.
    #[error("page {page} is invalid for a document with {max_pages} pages")]
    PageOutOfBounds { page: usize, max_pages: usize },

    /// Range reversed or reaching outside `1..=max_pages`.
    #[error("range '{token}' is invalid for a document with {max_pages} pages")]
    InvalidRange { token: String, max_pages: usize },
}

impl PageRangeError {
    /// Page count the expression was validated against.
    pub fn max_pages(&self) -> usize {
        match self {
            Self::InvalidToken { max_pages, .. }
            | Self::PageOutOfBounds { max_pages, .. }
            | Self::InvalidRange { max_pages, .. } => *max_pages,
        }
    }
}

/// Errors raised by registry edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no appendix at position {index} (registry holds {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("appendix title must not be empty")]
    EmptyTitle,

    #[error("exactly one appendix must be selected (got {count})")]
    SelectionNotSingle { count: usize },

    #[error("invalid page range for {label}")]
    InvalidPageRange {
        label: String,
        #[source]
        source: PageRangeError,
    },
}

/// A source document that could not be accepted into the registry.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source not found: {path}")]
    NotFound { path: PathBuf },

    #[error("could not read '{path}': {message}")]
    Unreadable { path: PathBuf, message: String },
}

impl SourceError {
    pub fn unreadable(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Unreadable {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
