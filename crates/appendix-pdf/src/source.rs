use std::path::{Path, PathBuf};

use appendix_model::{PageCounter, SourceError};
use lopdf::Document;

use crate::error::{PdfError, Result};

/// A loaded PDF whose pages can be appended to a [`crate::PdfComposer`].
#[derive(Debug, Clone)]
pub struct SourcePdf {
    path: PathBuf,
    document: Document,
}

impl SourcePdf {
    /// Load the document at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PdfError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let document = Document::load(path).map_err(|source| PdfError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_document(path, document))
    }

    /// Wrap a document that is already in memory. `path` is only used in
    /// messages.
    pub fn from_document(path: impl Into<PathBuf>, document: Document) -> Self {
        Self {
            path: path.into(),
            document,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }
}

/// Number of pages in the PDF at `path`.
pub fn page_count(path: impl AsRef<Path>) -> Result<usize> {
    SourcePdf::open(path).map(|source| source.page_count())
}

/// [`PageCounter`] backed by the PDF reader, for adding appendix sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfPageCounter;

impl PageCounter for PdfPageCounter {
    fn count_pages(&self, path: &Path) -> std::result::Result<usize, SourceError> {
        page_count(path).map_err(|error| match error {
            PdfError::FileNotFound { path } => SourceError::NotFound { path },
            other => SourceError::unreadable(path, other),
        })
    }
}
