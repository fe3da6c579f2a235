//! Error types for assembly and the editing session.

use std::path::PathBuf;

use appendix_convert::ConvertError;
use appendix_model::{PageRangeError, RegistryError};
use appendix_pdf::PdfError;
use thiserror::Error;

/// Result type for assembly operations.
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Broad class of an assembly failure, used to pick the message shown to
/// the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Something the user can fix in the session before retrying.
    Precondition,
    /// A required external tool is missing or broken.
    Environment,
    /// Anything else.
    Unexpected,
}

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("base document not found: {path}")]
    BaseDocumentMissing { path: PathBuf },

    #[error("no appendices to add")]
    NoAppendices,

    #[error("{label}: source file no longer exists: {path}")]
    AppendixMissing { label: String, path: PathBuf },

    #[error("{label}: invalid page range")]
    InvalidPageRange {
        label: String,
        #[source]
        source: PageRangeError,
    },

    #[error("failed to convert {document}")]
    Conversion {
        document: PathBuf,
        #[source]
        source: ConvertError,
    },

    #[error("failed to write title page {path}: {message}")]
    TitlePage { path: PathBuf, message: String },

    #[error(transparent)]
    Pdf(#[from] PdfError),

    #[error("failed to write output {path}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssemblyError {
    pub fn conversion(document: impl Into<PathBuf>, source: ConvertError) -> Self {
        Self::Conversion {
            document: document.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BaseDocumentMissing { .. }
            | Self::NoAppendices
            | Self::AppendixMissing { .. }
            | Self::InvalidPageRange { .. } => ErrorKind::Precondition,
            Self::Conversion { source, .. } if source.is_environment() => ErrorKind::Environment,
            _ => ErrorKind::Unexpected,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("an assembly is already running; wait for it to finish")]
    Busy,

    #[error("no assembly is running")]
    NoAssembly,

    #[error("no base document connected")]
    NoBaseDocument,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
